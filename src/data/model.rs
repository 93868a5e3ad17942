use thiserror::Error;

// ---------------------------------------------------------------------------
// DataSeries – the loaded two-column file
// ---------------------------------------------------------------------------

/// Returned when `x` and `y` would end up with different lengths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("x has {x_len} values but y has {y_len}")]
pub struct LengthMismatch {
    pub x_len: usize,
    pub y_len: usize,
}

/// An ordered sequence of `(x, y)` samples, in file order.
///
/// `x` and `y` always have the same length. `x` is usually monotonic
/// (time / wavenumber) but nothing here relies on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSeries {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl DataSeries {
    /// Build a series from parallel vectors.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, LengthMismatch> {
        if x.len() != y.len() {
            return Err(LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    /// Abscissa values (time, wavenumber, …).
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Signal values – what the detector scans.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Whether the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// The `(x, y)` sample at `index`, if any.
    pub fn point(&self, index: usize) -> Option<[f64; 2]> {
        Some([*self.x.get(index)?, *self.y.get(index)?])
    }

    /// Iterate over all samples as `[x, y]` pairs.
    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.x.iter().zip(&self.y).map(|(&x, &y)| [x, y])
    }
}

// ---------------------------------------------------------------------------
// PeakSet – detected local maxima
// ---------------------------------------------------------------------------

/// Indices into [`DataSeries::y`] of the detected peaks, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeakSet {
    indices: Vec<usize>,
}

impl PeakSet {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_rejects_length_mismatch() {
        let err = DataSeries::new(vec![0.0, 1.0], vec![1.0]).unwrap_err();
        assert_eq!(err, LengthMismatch { x_len: 2, y_len: 1 });
        assert_eq!(err.to_string(), "x has 2 values but y has 1");
    }

    #[test]
    fn test_series_points() {
        let series = DataSeries::new(vec![0.0, 1.0, 2.0], vec![1.0, 5.0, 1.0]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.point(1), Some([1.0, 5.0]));
        assert_eq!(series.point(3), None);
        let pts: Vec<[f64; 2]> = series.points().collect();
        assert_eq!(pts, vec![[0.0, 1.0], [1.0, 5.0], [2.0, 1.0]]);
    }

    #[test]
    fn test_empty_peak_set() {
        let peaks = PeakSet::default();
        assert!(peaks.is_empty());
        assert_eq!(peaks.indices(), &[] as &[usize]);
    }
}
