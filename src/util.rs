//! Shared utilities for the driver

use std::collections::VecDeque;
use std::time::Instant;

/// Simple deterministic RNG using xorshift64
/// Good for reproducible simulation runs without external dependencies
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) } // Ensure non-zero
    }

    /// Get the next random u64
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Get a random f32 in [0, 1)
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() & 0xFFFFFF) as f32 / 0x1000000 as f32
    }

    /// Get a random i32 in [min, max]
    ///
    /// # Panics
    /// Panics in debug builds if `min > max`
    #[inline]
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max, "range_i32: min ({}) must be <= max ({})", min, max);
        if min >= max {
            return min;
        }
        let range = (max - min + 1) as u64;
        min + (self.next_u64() % range) as i32
    }

    /// Get a random index in [0, len). `len` must be non-zero.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        (self.next_u64() % len.max(1) as u64) as usize
    }
}

/// Rolling tick timer over the last `window` ticks
pub struct FpsCounter {
    samples: VecDeque<f32>,
    last: Instant,
    window: usize,
}

impl FpsCounter {
    pub fn new(window: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(window),
            last: Instant::now(),
            window: window.max(1),
        }
    }

    /// Record one tick. Returns the rolling average ticks per second.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.samples.push_back((now - self.last).as_secs_f32());
        self.last = now;
        if self.samples.len() > self.window {
            self.samples.pop_front();
        }

        let avg = self.mean_secs();
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }

    pub fn avg_frame_time_ms(&self) -> f32 {
        self.mean_secs() * 1000.0
    }

    fn mean_secs(&self) -> f32 {
        self.samples.iter().sum::<f32>() / self.samples.len().max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_is_deterministic() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn range_i32_stays_in_bounds() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let v = rng.range_i32(-1, 1);
            assert!((-1..=1).contains(&v));
        }
        assert_eq!(rng.range_i32(3, 3), 3);
    }

    #[test]
    fn zero_seed_is_usable() {
        let mut rng = Rng::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn index_stays_below_len() {
        let mut rng = Rng::new(11);
        for len in [1, 2, 7, 100] {
            for _ in 0..200 {
                assert!(rng.index(len) < len);
            }
        }
        // len 0 is clamped instead of dividing by zero
        assert_eq!(rng.index(0), 0);
    }

    #[test]
    fn fps_window_is_bounded() {
        let mut fps = FpsCounter::new(3);
        for _ in 0..10 {
            assert!(fps.tick() >= 0.0);
        }
        assert_eq!(fps.samples.len(), 3);
        assert!(fps.avg_frame_time_ms() >= 0.0);
    }
}
