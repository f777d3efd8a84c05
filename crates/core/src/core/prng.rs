// Minimal PRNG (no external crates).
//
// This is NOT cryptographically secure.
// It drives widget randomness (reply choice, push direction, episode resets)
// and keeps test runs reproducible.

/// Source of uniform randomness consumed by the widgets.
///
/// Widgets never reach for an ambient generator; hosts pass one in so a test
/// can pin every draw.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_f32_01(&mut self) -> f32;

    #[inline]
    fn gen_range_f32(&mut self, low: f32, high: f32) -> f32 {
        low + (high - low) * self.next_f32_01()
    }

    /// Uniform index in `[low, high)`; returns `low` for an empty range.
    #[inline]
    fn gen_range_usize(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        let span = (high - low) as f32;
        let v = (self.next_f32_01() * span) as usize;
        low + v.min(high - low - 1)
    }

    /// Fair coin flip.
    #[inline]
    fn coin(&mut self) -> bool {
        self.next_f32_01() < 0.5
    }
}

#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        // Avoid a zero state.
        let seed = if seed == 0 { 0x9E3779B97F4A7C15 } else { seed };
        Self { state: seed }
    }

    /// Seed from a host-provided hint (wall clock, `Math.random`, ...).
    ///
    /// Hints are often small or correlated, so they are passed through a
    /// splitmix64 finalizer before use.
    pub fn from_entropy_hint(hint: u64) -> Self {
        let mut z = hint.wrapping_add(0x9E3779B97F4A7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        Self::new(z ^ (z >> 31))
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }
}

impl RandomSource for Prng {
    #[inline]
    fn next_f32_01(&mut self) -> f32 {
        // Top 24 bits so the result is exactly representable and stays below 1.0.
        let x = self.next_u32() >> 8;
        (x as f32) / ((1u32 << 24) as f32)
    }

    #[inline]
    fn gen_range_usize(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        let span = (high - low) as u32;
        let v = self.next_u32() % span;
        low + v as usize
    }
}
