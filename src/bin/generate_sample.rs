use anyhow::{Context, Result};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

fn generate_signal(
    xs: &[f64],
    peaks: &[(f64, f64, f64)],
    noise_level: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    xs.iter()
        .map(|&x| {
            let signal: f64 = peaks
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(x, mu, sigma, amp))
                .sum();
            signal + rng.gauss(0.0, noise_level)
        })
        .collect()
}

/// Deterministic PRNG: xoshiro256** output and state update, with the
/// state seeded by an LCG rather than SplitMix64.
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_data.txt".to_string());

    let mut rng = SimpleRng::new(42);

    // x: 400 → 1198, step 2 (e.g. a wavelength axis in nm)
    let xs: Vec<f64> = (0..400).map(|i| 400.0 + i as f64 * 2.0).collect();

    // (centre, sigma, amplitude)
    let peaks = [
        (480.0, 12.0, 1.0),
        (610.0, 6.0, 0.45),
        (655.0, 8.0, 0.7),
        (900.0, 30.0, 0.9),
        (1100.0, 10.0, 0.3),
    ];
    let ys = generate_signal(&xs, &peaks, 0.01, &mut rng);

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    for (x, y) in xs.iter().zip(&ys) {
        writer
            .write_record([x.to_string(), y.to_string()])
            .with_context(|| format!("writing {output_path}"))?;
    }
    writer.flush().context("flushing output")?;

    println!(
        "Wrote {} samples with {} peaks to {output_path}",
        xs.len(),
        peaks.len()
    );
    Ok(())
}
