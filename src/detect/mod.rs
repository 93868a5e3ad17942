//! Peak detection: the scan-width range and the detector that hands the
//! signal to a [`PeakFinder`].
//!
//! ```text
//!   DataSeries.y ──┐
//!                  ├──► PeakFinder::find_peaks(y, min..max) ──► PeakSet
//!   ScanWidthRange ┘
//! ```

pub mod cwt;

use thiserror::Error;

use crate::data::model::{DataSeries, PeakSet};

pub use cwt::{CwtParams, CwtPeakFinder};

// ---------------------------------------------------------------------------
// PeakFinder – the numerical routine
// ---------------------------------------------------------------------------

/// A peak-finding routine over a signal and a set of wavelet widths.
///
/// Implementations return ascending indices into `signal`.
pub trait PeakFinder {
    fn find_peaks(&self, signal: &[f64], widths: &[usize]) -> Vec<usize>;
}

// ---------------------------------------------------------------------------
// ScanWidthRange
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("widths must be positive (got min {min}, max {max})")]
    NonPositive { min: i64, max: i64 },
    #[error("min width {min} must be smaller than max width {max}")]
    Inverted { min: i64, max: i64 },
    #[error("max width {max} exceeds the limit of {limit}")]
    TooWide { max: i64, limit: i64 },
}

/// Wavelet widths swept by the detector: `min..max`, max exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWidthRange {
    min: usize,
    max: usize,
}

impl Default for ScanWidthRange {
    fn default() -> Self {
        Self { min: 1, max: 10 }
    }
}

impl ScanWidthRange {
    /// Largest accepted `max`. One CWT row is computed per width.
    pub const MAX_WIDTH: i64 = 100_000;

    /// Validate a user-supplied pair. Requires `0 < min < max <= MAX_WIDTH`.
    pub fn new(min: i64, max: i64) -> Result<Self, RangeError> {
        if min <= 0 || max <= 0 {
            return Err(RangeError::NonPositive { min, max });
        }
        if min >= max {
            return Err(RangeError::Inverted { min, max });
        }
        if max > Self::MAX_WIDTH {
            return Err(RangeError::TooWide {
                max,
                limit: Self::MAX_WIDTH,
            });
        }
        let to_usize =
            |v: i64| usize::try_from(v).map_err(|_| RangeError::NonPositive { min, max });
        Ok(Self {
            min: to_usize(min)?,
            max: to_usize(max)?,
        })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// The widths handed to the peak finder.
    pub fn widths(&self) -> Vec<usize> {
        (self.min..self.max).collect()
    }
}

// ---------------------------------------------------------------------------
// PeakDetector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectError {
    #[error("sample {index} is not a finite number ({value})")]
    NonFinite { index: usize, value: f64 },
    #[error("peak finder returned index {index} for a series of {len} samples")]
    OutOfBounds { index: usize, len: usize },
}

pub type DetectResult<T> = Result<T, DetectError>;

/// Holds the scan-width range and runs a [`PeakFinder`] over a series.
///
/// Detection itself is stateless: the same series and range always give
/// the same [`PeakSet`].
#[derive(Debug, Clone, Default)]
pub struct PeakDetector<F = CwtPeakFinder> {
    range: ScanWidthRange,
    finder: F,
}

impl<F: PeakFinder> PeakDetector<F> {
    pub fn with_finder(finder: F) -> Self {
        Self {
            range: ScanWidthRange::default(),
            finder,
        }
    }

    pub fn range(&self) -> ScanWidthRange {
        self.range
    }

    /// Replace the range. On error the previous range is kept.
    pub fn set_range(&mut self, min: i64, max: i64) -> Result<(), RangeError> {
        self.range = ScanWidthRange::new(min, max)?;
        Ok(())
    }

    /// Run the finder over `series.y` with widths `min..max`.
    pub fn detect(&self, series: &DataSeries) -> DetectResult<PeakSet> {
        let signal = series.y();
        if let Some((index, &value)) = signal.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(DetectError::NonFinite { index, value });
        }
        if signal.is_empty() {
            return Ok(PeakSet::default());
        }

        let indices = self.finder.find_peaks(signal, &self.range.widths());
        if let Some(&index) = indices.iter().find(|&&i| i >= signal.len()) {
            return Err(DetectError::OutOfBounds {
                index,
                len: signal.len(),
            });
        }
        Ok(PeakSet::new(indices))
    }
}
