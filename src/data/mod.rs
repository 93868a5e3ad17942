/// Data layer: series type, tab-separated loading, and the peak report.
///
/// Architecture:
/// ```text
///   x<TAB>y per line
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → DataSeries
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ DataSeries  │  parallel x / y vectors
///   └────────────┘
///        │   + PeakSet (from detect)
///        ▼
///   ┌──────────┐
///   │  report   │  "index; value" lines → text / file
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod report;
