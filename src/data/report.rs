use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::loader::LoadError;
use super::model::{DataSeries, PeakSet};

// ---------------------------------------------------------------------------
// PeakReport – "index; value" listing of the detected peaks
// ---------------------------------------------------------------------------

/// One line of the report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakEntry {
    pub index: usize,
    pub value: f64,
}

/// Detected peaks joined with their signal values, ascending by index.
///
/// Rendered as one `"<index>; <value>"` line per peak. Derived data: it is
/// rebuilt whenever the series or the peak set changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeakReport {
    entries: Vec<PeakEntry>,
}

#[derive(Debug, Error)]
#[error("cannot write {}: {source}", path.display())]
pub struct SaveError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl PeakReport {
    /// Join `peaks` with `series.y`. Indices outside the series are skipped.
    pub fn build(series: &DataSeries, peaks: &PeakSet) -> Self {
        let mut entries: Vec<PeakEntry> = peaks
            .indices()
            .iter()
            .filter_map(|&index| {
                series
                    .y()
                    .get(index)
                    .map(|&value| PeakEntry { index, value })
            })
            .collect();
        entries.sort_by_key(|e| e.index);
        Self { entries }
    }

    pub fn entries(&self) -> &[PeakEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The report as it is shown in the UI and written to disk.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Write the report text to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), SaveError> {
        std::fs::write(path, self.to_text()).map_err(|source| SaveError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read back a saved report.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut entries = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line = (i + 1) as u64;
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let (index, value) = raw.split_once(';').ok_or_else(|| LoadError::Parse {
                line,
                reason: format!("expected '<index>; <value>', got '{raw}'"),
            })?;
            let index = index.trim().parse::<usize>().map_err(|_| LoadError::Parse {
                line,
                reason: format!("peak index '{}' is not an integer", index.trim()),
            })?;
            let value = value.trim().parse::<f64>().map_err(|_| LoadError::Parse {
                line,
                reason: format!("peak value '{}' is not a number", value.trim()),
            })?;
            entries.push(PeakEntry { index, value });
        }
        Ok(Self { entries })
    }
}

impl fmt::Display for PeakReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            // `{:?}` keeps the trailing ".0" on whole numbers and round-trips.
            write!(f, "{}; {:?}", e.index, e.value)?;
        }
        Ok(())
    }
}
