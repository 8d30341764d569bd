//! Seeded deterministic random stream (xorshift64*).

/// Deterministic random number generator for one simulation run.
///
/// xorshift64* has 64-bit state and a finalizing multiply; the sequence
/// depends only on the seed and is identical on every platform. Every
/// stochastic consumer draws from the single run-level instance in the
/// fixed per-day component order, which is what keeps runs replayable.
#[derive(Debug, Clone)]
pub struct SimRng {
    state: u64,
}

impl SimRng {
    /// Seed the generator. xorshift state must be non-zero.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform draw in [0, 1) with 53 bits of precision.
    pub fn next(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform draw in [min, max).
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next() * (max - min)
    }

    /// Gaussian draw via Box-Muller, consuming exactly two uniform draws.
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next();
        let u2 = self.next();
        // 1 - u1 lies in (0, 1], keeping the log finite.
        let r = (-2.0 * (1.0 - u1).ln()).sqrt();
        let theta = 2.0 * std::f64::consts::PI * u2;
        mean + std_dev * r * theta.cos()
    }
}
