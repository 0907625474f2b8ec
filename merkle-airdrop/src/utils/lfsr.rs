//! Deterministic pseudo-random source for sample leaf sets.
//!
//! A 63-bit Galois LFSR with a maximum-length tap set, following
//! "Efficient Shift Registers, LFSR Counters, and Long Pseudo-Random Sequence
//! Generators" (https://www.physics.otago.ac.nz/reports/electronics/ETR2012-1.pdf).
//! It is NOT a cryptographic generator; it only makes generated account
//! lists reproducible from a seed.

const STATE_BITS: u32 = 63;
const STATE_MASK: u64 = (1u64 << STATE_BITS) - 1;
const TAPS: u64 = (1u64 << 63) | (1u64 << 62) | (1u64 << 59) | (1u64 << 58);

#[derive(Debug, Clone, Copy)]
pub struct GaloisLfsr {
    state: u64,
}

impl GaloisLfsr {
    /// Creates a register from any seed. The seed is folded into the 63-bit
    /// state space and a zero state (which would lock up) is replaced by 1.
    pub fn new(seed: u64) -> Self {
        let state = seed & STATE_MASK;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    /// Advances the register by one step and returns the new state.
    pub fn next(&mut self) -> u64 {
        let taps = if self.state & 1 == 0 { 0 } else { TAPS };
        self.state = (self.state ^ taps) >> 1;
        self.state
    }

    /// Advances `n` steps and returns the lowest `n` bits, `1 <= n <= 63`.
    pub fn rand_n(&mut self, n: u32) -> u64 {
        let n = n.clamp(1, STATE_BITS);
        for _ in 0..n {
            self.next();
        }
        self.state & ((1u64 << n) - 1)
    }

    /// Returns a value in `0..bound`, or 0 when `bound` is 0 or 1.
    pub fn below(&mut self, bound: u64) -> u64 {
        if bound <= 1 {
            return 0;
        }
        let bits = (64 - bound.leading_zeros()).clamp(1, STATE_BITS);
        loop {
            let v = self.rand_n(bits);
            if v < bound {
                return v;
            }
        }
    }

    pub fn state(&self) -> u64 {
        self.state
    }
}
