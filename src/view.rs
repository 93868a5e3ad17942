use crate::data::model::{DataSeries, PeakSet};
use crate::data::report::PeakReport;

// ---------------------------------------------------------------------------
// PlotView – what the shell draws
// ---------------------------------------------------------------------------

/// Render-ready data derived from the current series and peaks.
///
/// Rebuilt from scratch after every command; never edited in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotView {
    /// The full curve, in file order.
    pub curve: Vec<[f64; 2]>,
    /// `(x, y)` of every detected peak, for the marker overlay.
    pub peak_points: Vec<[f64; 2]>,
    /// `index; value` listing shown next to the plot and saved to disk.
    pub report: PeakReport,
}

impl PlotView {
    /// No series means an empty view; no peaks means "nothing detected yet".
    pub fn build(series: Option<&DataSeries>, peaks: Option<&PeakSet>) -> Self {
        let Some(series) = series else {
            return Self::default();
        };

        let curve = series.points().collect();
        let (peak_points, report) = match peaks {
            Some(peaks) => {
                let report = PeakReport::build(series, peaks);
                let points = report
                    .entries()
                    .iter()
                    .filter_map(|e| series.point(e.index))
                    .collect();
                (points, report)
            }
            None => (Vec::new(), PeakReport::default()),
        };

        Self {
            curve,
            peak_points,
            report,
        }
    }

    pub fn has_data(&self) -> bool {
        !self.curve.is_empty()
    }
}
