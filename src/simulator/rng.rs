//! Seedable random source for the simulator engine (§4.4, §9): a uniform
//! `[0, 1)` draw and a standard-normal draw via the Marsaglia polar method,
//! with the second variate of each pair cached for the following call.
//!
//! The source's global RNG state is re-architected here as an owned,
//! seedable object threaded explicitly through the engine (§9 Design
//! Notes) rather than process-global mutable state.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Wraps a seedable PRNG with the two distributions the simulator needs.
/// Statistical quality is explicitly non-critical (§4.4); what matters is
/// that `unit_uniform` never degenerates to a constant, unlike the source's
/// documented integer-division bug (§9 Open Question).
pub struct SimRng {
    inner: StdRng,
    cached_normal: Option<f64>,
}

impl SimRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            cached_normal: None,
        }
    }

    /// A uniform draw in `[0, 1)`. Always a genuine float: the source's
    /// `unit_uniform()` divided an integer `random()` by a `double` without
    /// casting the dividend first, which on some platforms truncated to
    /// zero; this implementation has no such bug.
    pub fn unit_uniform(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// A standard normal draw via the Marsaglia polar method. Each pair of
    /// uniform draws yields two independent normal variates; the second is
    /// cached and returned on the next call without drawing again.
    pub fn unit_normal(&mut self) -> f64 {
        if let Some(cached) = self.cached_normal.take() {
            return cached;
        }

        loop {
            let u = 2.0 * self.unit_uniform() - 1.0;
            let v = 2.0 * self.unit_uniform() - 1.0;
            let s = u * u + v * v;
            if s >= 1.0 || s == 0.0 {
                continue;
            }
            let factor = (-2.0 * s.ln() / s).sqrt();
            self.cached_normal = Some(v * factor);
            return u * factor;
        }
    }
}
