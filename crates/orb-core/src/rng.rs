use rand::Rng;

/// Source of uniform randomness for burst spawning.
///
/// Every `rand::Rng` is a `RandomSource`, so production code passes a real
/// generator and tests pass a seeded one or a scripted sequence.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform sample in `[low, high)`. Returns `low` for an empty range.
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.unit()
    }

    /// Bernoulli trial: true with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}
