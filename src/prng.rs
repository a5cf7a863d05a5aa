//! Deterministic pseudo-random generator for daily puzzle material.
//!
//! This module exposes a compact four-word 32-bit generator in the small
//! fast counting family.  Every player must derive the identical merkle
//! field for a given puzzle day, so the generator is a pure function of
//! its seed words and call count: wrapping adds, shifts and a rotate-left,
//! with no platform-dependent arithmetic and no external entropy.

/// A deterministic four-word 32-bit shift/rotate generator.
///
/// The state transition per emitted value is fixed:
///
/// ```text
/// t = a + b + d;  d = d + 1
/// a = b ^ (b >> 9)
/// b = c + (c << 3)
/// c = rotl(c, 21) + t
/// ```
///
/// Identical seeds yield identical output streams on every platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sfc32 {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
}

impl Sfc32 {
    /// Creates a generator from four explicit 32-bit seed words.
    pub fn new(a: u32, b: u32, c: u32, d: u32) -> Self {
        Self { a, b, c, d }
    }

    /// Advances the generator and returns the next 32-bit pseudorandom value.
    pub fn next_u32(&mut self) -> u32 {
        let t = self.a.wrapping_add(self.b).wrapping_add(self.d);
        self.d = self.d.wrapping_add(1);
        self.a = self.b ^ (self.b >> 9);
        self.b = self.c.wrapping_add(self.c << 3);
        self.c = self.c.rotate_left(21).wrapping_add(t);
        t
    }

    /// Advances the generator and returns the top byte of the next value.
    pub fn next_byte(&mut self) -> u8 {
        (self.next_u32() >> 24) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::Sfc32;

    #[test]
    fn test_identical_seeds_identical_streams() {
        let mut lhs = Sfc32::new(1, 2, 3, 4);
        let mut rhs = Sfc32::new(1, 2, 3, 4);
        for _ in 0..256 {
            assert_eq!(lhs.next_u32(), rhs.next_u32());
        }
    }

    #[test]
    fn test_seed_sensitivity() {
        let mut lhs = Sfc32::new(1, 2, 3, 4);
        let mut rhs = Sfc32::new(1, 2, 3, 5);
        let lhs_stream: Vec<u32> = (0..16).map(|_| lhs.next_u32()).collect();
        let rhs_stream: Vec<u32> = (0..16).map(|_| rhs.next_u32()).collect();
        assert_ne!(lhs_stream, rhs_stream);
    }

    #[test]
    fn test_stream_is_not_constant() {
        let mut rng = Sfc32::new(7, 7, 7, 7);
        let first = rng.next_u32();
        assert!((0..64).any(|_| rng.next_u32() != first));
    }

    #[test]
    fn test_clone_preserves_position() {
        let mut rng = Sfc32::new(11, 22, 33, 44);
        for _ in 0..10 {
            rng.next_u32();
        }
        let mut forked = rng.clone();
        for _ in 0..32 {
            assert_eq!(rng.next_u32(), forked.next_u32());
        }
    }

    #[test]
    fn test_next_byte_is_top_byte() {
        let probe = Sfc32::new(5, 6, 7, 8);
        let mut as_word = probe.clone();
        let mut as_byte = probe;
        assert_eq!(as_byte.next_byte(), (as_word.next_u32() >> 24) as u8);
    }
}
