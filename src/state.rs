use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::data::loader::{load_series, LoadError};
use crate::data::model::{DataSeries, PeakSet};
use crate::data::report::SaveError;
use crate::detect::{
    CwtPeakFinder, DetectError, PeakDetector, PeakFinder, RangeError, ScanWidthRange,
};
use crate::view::PlotView;

// ---------------------------------------------------------------------------
// Commands and status
// ---------------------------------------------------------------------------

/// Everything the user can ask the session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A data file was picked.
    LoadFile(PathBuf),
    /// New scan-width bounds were entered.
    SetRange { min: i64, max: i64 },
    /// Run peak detection on the loaded series.
    Detect,
    /// Write the current peak report to a file.
    SaveReport(PathBuf),
}

/// Message for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

impl Status {
    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Status::Info(m) | Status::Error(m) => m,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("invalid width range: {0}")]
    Range(#[from] RangeError),
    #[error("peak detection failed: {0}")]
    Detect(#[from] DetectError),
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error("no data loaded")]
    NoData,
    #[error("width '{text}' is not a whole number")]
    InvalidWidth { text: String },
}

/// Parse the contents of a width entry field.
pub fn parse_width(text: &str) -> Result<i64, SessionError> {
    let trimmed = text.trim();
    trimmed.parse::<i64>().map_err(|_| SessionError::InvalidWidth {
        text: trimmed.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The whole application state, independent of rendering.
///
/// Series and peaks are only ever replaced wholesale. A command that fails
/// leaves them (and the width range) exactly as they were.
#[derive(Debug, Default)]
pub struct Session<F = CwtPeakFinder> {
    /// Loaded series (None until the user loads a file).
    series: Option<DataSeries>,
    /// Where `series` came from.
    source: Option<PathBuf>,
    /// Last detection result; cleared when a new file is loaded.
    peaks: Option<PeakSet>,
    detector: PeakDetector<F>,
    /// Cached render data, rebuilt after each successful command.
    view: PlotView,
    status: Option<Status>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: PeakFinder> Session<F> {
    pub fn with_detector(detector: PeakDetector<F>) -> Self {
        Self {
            series: None,
            source: None,
            peaks: None,
            detector,
            view: PlotView::default(),
            status: None,
        }
    }

    pub fn series(&self) -> Option<&DataSeries> {
        self.series.as_ref()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn peaks(&self) -> Option<&PeakSet> {
        self.peaks.as_ref()
    }

    pub fn range(&self) -> ScanWidthRange {
        self.detector.range()
    }

    pub fn view(&self) -> &PlotView {
        &self.view
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Run one command, update the status line and return the fresh view.
    pub fn dispatch(&mut self, command: Command) -> &PlotView {
        let outcome = match command {
            Command::LoadFile(path) => self.load_file(path),
            Command::SetRange { min, max } => self.set_range(min, max),
            Command::Detect => self.detect(),
            Command::SaveReport(path) => self.save_report(&path),
        };

        match outcome {
            Ok(msg) => self.status = Some(Status::Info(msg)),
            Err(e) => self.report_error(e),
        }
        &self.view
    }

    /// Surface an error raised outside of [`Session::dispatch`], e.g. while
    /// reading the UI's entry fields. State is left untouched.
    pub fn report_error(&mut self, error: SessionError) {
        log::error!("{error}");
        self.status = Some(Status::Error(error.to_string()));
    }

    fn rebuild_view(&mut self) {
        self.view = PlotView::build(self.series.as_ref(), self.peaks.as_ref());
    }

    fn load_file(&mut self, path: PathBuf) -> Result<String, SessionError> {
        let series = load_series(&path)?;
        log::info!("Loaded {} samples from {}", series.len(), path.display());

        let msg = format!("File opened: {}", display_name(&path));
        self.series = Some(series);
        self.peaks = None;
        self.source = Some(path);
        self.rebuild_view();
        Ok(msg)
    }

    fn set_range(&mut self, min: i64, max: i64) -> Result<String, SessionError> {
        if let Err(e) = self.detector.set_range(min, max) {
            log::warn!("Rejected width range {min}..{max}: {e}");
            return Err(e.into());
        }
        Ok(format!("Width range set to {min}..{max}"))
    }

    fn detect(&mut self) -> Result<String, SessionError> {
        let series = self.series.as_ref().ok_or(SessionError::NoData)?;
        let range = self.detector.range();
        let peaks = self.detector.detect(series)?;
        log::info!(
            "Found {} peaks with widths {}..{}",
            peaks.len(),
            range.min(),
            range.max()
        );

        let msg = format!("Calculation done: {} peaks found", peaks.len());
        self.peaks = Some(peaks);
        self.rebuild_view();
        Ok(msg)
    }

    fn save_report(&mut self, path: &Path) -> Result<String, SessionError> {
        self.view.report.save(path)?;
        log::info!(
            "Saved {} peaks to {}",
            self.view.report.entries().len(),
            path.display()
        );
        Ok(format!("Peaks saved to: {}", display_name(path)))
    }
}

/// File name only, as shown in labels and the status bar.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_width() {
        assert_eq!(parse_width(" 12 ").unwrap(), 12);
        assert_eq!(parse_width("-3").unwrap(), -3);
        let err = parse_width("1.5").unwrap_err();
        assert_eq!(err.to_string(), "width '1.5' is not a whole number");
    }

    #[test]
    fn test_detect_without_data() {
        let mut session = Session::new();
        let view = session.dispatch(Command::Detect);
        assert!(!view.has_data());
        let status = session.status().unwrap();
        assert!(status.is_error());
        assert_eq!(status.message(), "no data loaded");
        assert!(session.peaks().is_none());
    }

    #[test]
    fn test_rejected_range_keeps_prior_range() {
        let mut session = Session::new();
        session.dispatch(Command::SetRange { min: 2, max: 6 });
        assert!(!session.status().unwrap().is_error());

        session.dispatch(Command::SetRange { min: 6, max: 2 });
        assert!(session.status().unwrap().is_error());
        assert_eq!(session.range(), ScanWidthRange::new(2, 6).unwrap());
    }

    #[test]
    fn test_failed_load_is_reported() {
        let mut session = Session::new();
        session.dispatch(Command::LoadFile(PathBuf::from("/no/such/data.txt")));
        let status = session.status().unwrap();
        assert!(status.is_error());
        assert!(status.message().contains("data.txt"), "{}", status.message());
        assert!(session.series().is_none());
        assert!(session.source().is_none());
    }

    #[test]
    fn test_report_error_sets_status_only() {
        let mut session = Session::new();
        session.dispatch(Command::SetRange { min: 2, max: 5 });
        session.report_error(parse_width("abc").unwrap_err());
        assert_eq!(
            session.status(),
            Some(&Status::Error("width 'abc' is not a whole number".into()))
        );
        assert_eq!(session.range(), ScanWidthRange::new(2, 5).unwrap());
    }

    #[test]
    fn test_with_detector_keeps_its_range() {
        let mut detector: PeakDetector = PeakDetector::default();
        detector.set_range(2, 8).unwrap();
        let session = Session::with_detector(detector);
        assert_eq!(session.range(), ScanWidthRange::new(2, 8).unwrap());
        assert!(session.status().is_none());
    }

    #[test]
    fn test_oversized_range_is_rejected_not_run() {
        let mut session = Session::new();
        session.dispatch(Command::SetRange {
            min: 1 << 62,
            max: (1 << 62) + 1,
        });
        assert!(session.status().unwrap().is_error());
        assert_eq!(session.range(), ScanWidthRange::default());

        session.dispatch(Command::SetRange { min: 1, max: i64::MAX });
        assert!(session.status().unwrap().is_error());
        assert_eq!(session.range(), ScanWidthRange::default());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/tmp/run 1/peaks.txt")), "peaks.txt");
    }
}
