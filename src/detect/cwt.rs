//! Continuous-wavelet-transform peak finding (`find_peaks_cwt`).
//!
//! The signal is convolved with Ricker ("Mexican hat") wavelets at every
//! requested width. Relative maxima of neighbouring rows are chained into
//! ridge lines, and a ridge that is long enough and stands out of the
//! local noise floor marks a peak.

use super::PeakFinder;

/// Tuning knobs for [`CwtPeakFinder`]. `None` picks the usual default,
/// derived from the widths or the signal length.
#[derive(Debug, Clone, PartialEq)]
pub struct CwtParams {
    /// Rows a ridge may skip before it is closed. Default: the first width.
    pub gap_thresh: Option<f64>,
    /// Minimum ridge length in rows. Default: `ceil(rows / 4)`.
    pub min_length: Option<usize>,
    /// Minimum signal-to-noise ratio of a ridge.
    pub min_snr: f64,
    /// Percentile of the smallest-width row used as the noise floor.
    pub noise_perc: f64,
    /// Window for the noise floor, in samples. Default: `ceil(n / 20)`.
    pub window_size: Option<usize>,
}

impl Default for CwtParams {
    fn default() -> Self {
        Self {
            gap_thresh: None,
            min_length: None,
            min_snr: 1.0,
            noise_perc: 10.0,
            window_size: None,
        }
    }
}

/// The default [`PeakFinder`]: ridge-line CWT peak detection.
#[derive(Debug, Clone, Default)]
pub struct CwtPeakFinder {
    pub params: CwtParams,
}

impl CwtPeakFinder {
    pub fn new(params: CwtParams) -> Self {
        Self { params }
    }
}

impl PeakFinder for CwtPeakFinder {
    fn find_peaks(&self, signal: &[f64], widths: &[usize]) -> Vec<usize> {
        if signal.is_empty() || widths.is_empty() {
            return Vec::new();
        }

        let gap_thresh = self.params.gap_thresh.unwrap_or(widths[0] as f64);
        let max_distances: Vec<f64> = widths.iter().map(|&w| w as f64 / 4.0).collect();

        let matrix = cwt(signal, widths);
        let ridges = identify_ridge_lines(&matrix, &max_distances, gap_thresh);
        let n_ridges = ridges.len();
        let kept = filter_ridge_lines(&matrix, ridges, &self.params);
        log::debug!("cwt: {n_ridges} ridge lines, {} kept", kept.len());

        let mut peaks: Vec<usize> = kept.iter().map(|r| r.cols[0]).collect();
        peaks.sort_unstable();
        peaks.dedup();
        peaks
    }
}

// ---------------------------------------------------------------------------
// Wavelet transform
// ---------------------------------------------------------------------------

/// Ricker wavelet of `points` samples and width `a`, centred on the window.
pub fn ricker(points: usize, a: f64) -> Vec<f64> {
    let norm = 2.0 / ((3.0 * a).sqrt() * std::f64::consts::PI.powf(0.25));
    let center = (points as f64 - 1.0) / 2.0;
    let wsq = a * a;
    (0..points)
        .map(|i| {
            let t = i as f64 - center;
            let tsq = t * t;
            norm * (1.0 - tsq / wsq) * (-tsq / (2.0 * wsq)).exp()
        })
        .collect()
}

/// Convolution trimmed to the length of `x`, centred on the full result.
fn convolve_same(x: &[f64], h: &[f64]) -> Vec<f64> {
    let n = x.len();
    let m = h.len();
    if m == 0 {
        return vec![0.0; n];
    }
    let offset = (m - 1) / 2;
    (0..n)
        .map(|i| {
            let k = i + offset;
            // full[k] = Σ_j x[k - j] · h[j]
            let j_lo = k.saturating_sub(n - 1);
            let j_hi = k.min(m - 1);
            (j_lo..=j_hi).map(|j| x[k - j] * h[j]).sum()
        })
        .collect()
}

/// One row per width: the signal convolved with `ricker(min(10·w, n), w)`.
pub fn cwt(signal: &[f64], widths: &[usize]) -> Vec<Vec<f64>> {
    widths
        .iter()
        .map(|&w| {
            let points = w.saturating_mul(10).min(signal.len());
            let mut wavelet = ricker(points, w as f64);
            wavelet.reverse();
            convolve_same(signal, &wavelet)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Ridge lines
// ---------------------------------------------------------------------------

/// A chain of relative maxima across rows, stored with ascending rows
/// once identification is finished.
#[derive(Debug, Clone, PartialEq)]
struct RidgeLine {
    rows: Vec<usize>,
    cols: Vec<usize>,
    gap: usize,
}

impl RidgeLine {
    fn start(row: usize, col: usize) -> Self {
        Self {
            rows: vec![row],
            cols: vec![col],
            gap: 0,
        }
    }
}

/// Columns strictly greater than both neighbours. Edges never qualify.
fn relative_maxima(row: &[f64]) -> Vec<usize> {
    if row.len() < 3 {
        return Vec::new();
    }
    (1..row.len() - 1)
        .filter(|&i| row[i] > row[i - 1] && row[i] > row[i + 1])
        .collect()
}

fn identify_ridge_lines(
    matrix: &[Vec<f64>],
    max_distances: &[f64],
    gap_thresh: f64,
) -> Vec<RidgeLine> {
    let maxima: Vec<Vec<usize>> = matrix.iter().map(|row| relative_maxima(row)).collect();

    // Start from the widest row that has any maxima at all.
    let Some(start_row) = maxima.iter().rposition(|cols| !cols.is_empty()) else {
        return Vec::new();
    };

    let mut active: Vec<RidgeLine> = maxima[start_row]
        .iter()
        .map(|&col| RidgeLine::start(start_row, col))
        .collect();
    let mut finished = Vec::new();

    for row in (0..start_row).rev() {
        for line in &mut active {
            line.gap += 1;
        }

        // Snapshot: ridges started on this row are not candidates yet.
        let prev_cols: Vec<usize> = active
            .iter()
            .map(|l| l.cols.last().copied().unwrap_or_default())
            .collect();

        for &col in &maxima[row] {
            let closest = prev_cols
                .iter()
                .enumerate()
                .min_by_key(|&(_, &c)| c.abs_diff(col))
                .filter(|&(_, &c)| c.abs_diff(col) as f64 <= max_distances[row])
                .map(|(i, _)| i);

            match closest {
                Some(i) => {
                    let line = &mut active[i];
                    line.rows.push(row);
                    line.cols.push(col);
                    line.gap = 0;
                }
                None => active.push(RidgeLine::start(row, col)),
            }
        }

        let (closed, open): (Vec<_>, Vec<_>) = active
            .into_iter()
            .partition(|l| l.gap as f64 > gap_thresh);
        finished.extend(closed);
        active = open;
    }

    finished
        .into_iter()
        .chain(active)
        .map(|mut line| {
            // Rows were appended top-down.
            line.rows.reverse();
            line.cols.reverse();
            line
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Percentile of `values` with linear interpolation between neighbours.
fn percentile(values: &mut [f64], per: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.sort_by(f64::total_cmp);
    let idx = per / 100.0 * (values.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let frac = idx - lo as f64;
    if frac == 0.0 || lo + 1 >= values.len() {
        values[lo.min(values.len() - 1)]
    } else {
        values[lo] + (values[lo + 1] - values[lo]) * frac
    }
}

/// Noise floor per column from the smallest-width row.
fn noise_floor(row: &[f64], window_size: usize, noise_perc: f64) -> Vec<f64> {
    let n = row.len();
    let half = window_size / 2;
    let odd = window_size % 2;
    (0..n)
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half + odd).min(n);
            // Signed values: only the final ratio is taken as an absolute.
            let mut window = row[start..end].to_vec();
            percentile(&mut window, noise_perc)
        })
        .collect()
}

fn filter_ridge_lines(
    matrix: &[Vec<f64>],
    ridges: Vec<RidgeLine>,
    params: &CwtParams,
) -> Vec<RidgeLine> {
    let n_rows = matrix.len();
    let n_cols = matrix[0].len();
    let min_length = params.min_length.unwrap_or(n_rows.div_ceil(4));
    let window_size = params.window_size.unwrap_or(n_cols.div_ceil(20)).max(1);

    let noises = noise_floor(&matrix[0], window_size, params.noise_perc);

    ridges
        .into_iter()
        .filter(|line| {
            if line.rows.len() < min_length {
                return false;
            }
            let (row, col) = (line.rows[0], line.cols[0]);
            let snr = (matrix[row][col] / noises[col]).abs();
            // A NaN ratio (0 / 0) is not "below" the threshold.
            !(snr < params.min_snr)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
        amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
    }

    #[test]
    fn test_ricker_shape() {
        let w = ricker(3, 1.0);
        // t = ±1 with a = 1 sits exactly on the zero crossings.
        assert_eq!(w[0], 0.0);
        assert_eq!(w[2], 0.0);
        let norm = 2.0 / (3.0f64.sqrt() * std::f64::consts::PI.powf(0.25));
        assert!((w[1] - norm).abs() < 1e-12);

        let wide = ricker(20, 2.0);
        for i in 0..10 {
            assert!((wide[i] - wide[19 - i]).abs() < 1e-12, "not symmetric at {i}");
        }
    }

    #[test]
    fn test_convolve_same_alignment() {
        // Odd kernel: centred.
        assert_eq!(
            convolve_same(&[0.0, 1.0, 0.0, 0.0], &[1.0, 2.0, 3.0]),
            vec![1.0, 2.0, 3.0, 0.0]
        );
        // Even kernel: full convolution offset by (m - 1) / 2.
        assert_eq!(
            convolve_same(&[1.0, 2.0, 3.0], &[1.0, 1.0]),
            vec![1.0, 3.0, 5.0]
        );
    }

    #[test]
    fn test_relative_maxima_strict() {
        assert_eq!(relative_maxima(&[0.0, 2.0, 1.0, 3.0, 3.0, 0.0]), vec![1]);
        assert!(relative_maxima(&[5.0, 1.0]).is_empty());
    }

    #[test]
    fn test_percentile_interpolates() {
        let mut v = vec![4.0, 1.0, 3.0, 2.0];
        // idx = 0.1 * 3 = 0.3 → 1 + 0.3 * (2 - 1)
        assert!((percentile(&mut v, 10.0) - 1.3).abs() < 1e-12);
        assert_eq!(percentile(&mut [7.0], 10.0), 7.0);
    }

    #[test]
    fn test_noise_floor_uses_signed_row() {
        // idx = 0.1 * 3 = 0.3 → -3 + 0.3 * (-2 - -3)
        let floor = noise_floor(&[-3.0, -2.0, -1.0, 4.0], 8, 10.0);
        assert_eq!(floor.len(), 4);
        for v in floor {
            assert!((v - -2.7).abs() < 1e-12, "{v}");
        }
    }

    #[test]
    fn test_huge_width_does_not_overflow() {
        let finder = CwtPeakFinder::default();
        let peaks = finder.find_peaks(&[1.0, 5.0, 1.0], &[1 << 62, (1 << 62) + 1]);
        assert!(peaks.iter().all(|&p| p < 3));
        assert_eq!(cwt(&[1.0, 5.0, 1.0], &[usize::MAX]).len(), 1);
    }

    #[test]
    fn test_single_spike() {
        let finder = CwtPeakFinder::default();
        assert_eq!(finder.find_peaks(&[1.0, 5.0, 1.0], &[1, 2]), vec![1]);
    }

    #[test]
    fn test_flat_signal_has_no_peaks() {
        let finder = CwtPeakFinder::default();
        let zeros = vec![0.0; 64];
        assert!(finder.find_peaks(&zeros, &[1, 2, 3, 4]).is_empty());
    }

    #[test]
    fn test_two_gaussians() {
        let signal: Vec<f64> = (0..200)
            .map(|i| {
                let x = i as f64;
                gaussian(x, 50.3, 5.0, 1.0) + gaussian(x, 140.3, 5.0, 0.8)
            })
            .collect();
        let widths: Vec<usize> = (1..20).collect();
        let finder = CwtPeakFinder::default();
        let peaks = finder.find_peaks(&signal, &widths);

        for expected in [50usize, 140] {
            assert!(
                peaks.iter().any(|&p| p.abs_diff(expected) <= 2),
                "no peak near {expected} in {peaks:?}"
            );
        }
        assert!(peaks.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(finder.find_peaks(&signal, &widths), peaks);
    }

    #[test]
    fn test_long_min_length_rejects_everything() {
        let finder = CwtPeakFinder::new(CwtParams {
            min_length: Some(10),
            ..CwtParams::default()
        });
        assert!(finder.find_peaks(&[1.0, 5.0, 1.0], &[1, 2]).is_empty());
    }
}
