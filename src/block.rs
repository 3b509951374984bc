//! 128-bit AES block
//!
//! Stored as four little-endian `u32` words so that word `i` matches
//! 32-bit lane `i` of an SSE register loaded from the same bytes.

use core::ops::{BitXor, BitXorAssign};

use crate::params::BLOCK_SIZE;

/// One 128-bit lane value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(C, align(16))]
pub struct Block([u32; 4]);

impl Block {
    /// All-zero block
    pub const ZERO: Self = Self([0; 4]);

    /// Build a block from its four 32-bit lanes (lane 0 first)
    #[inline(always)]
    pub const fn from_words(words: [u32; 4]) -> Self {
        Self(words)
    }

    /// The four 32-bit lanes (lane 0 first)
    #[inline(always)]
    pub const fn words(self) -> [u32; 4] {
        self.0
    }

    /// Load a block from exactly 16 bytes
    #[inline(always)]
    pub fn from_bytes(bytes: &[u8; BLOCK_SIZE]) -> Self {
        Self::load(bytes)
    }

    /// Load a block from the first 16 bytes of `src`
    ///
    /// Panics if `src` is shorter than 16 bytes.
    #[inline(always)]
    pub fn load(src: &[u8]) -> Self {
        let mut words = [0u32; 4];
        for (word, chunk) in words.iter_mut().zip(src[..BLOCK_SIZE].chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self(words)
    }

    /// Store the block into the first 16 bytes of `dst`
    ///
    /// Panics if `dst` is shorter than 16 bytes.
    #[inline(always)]
    pub fn store(self, dst: &mut [u8]) {
        for (chunk, word) in dst[..BLOCK_SIZE].chunks_exact_mut(4).zip(self.0) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
    }

    /// Byte representation
    #[inline(always)]
    pub fn to_bytes(self) -> [u8; BLOCK_SIZE] {
        let mut out = [0u8; BLOCK_SIZE];
        self.store(&mut out);
        out
    }

    /// Block with `word` in every lane
    #[inline(always)]
    pub const fn splat(word: u32) -> Self {
        Self([word; 4])
    }

    /// Copy lane `lane` into every lane (PSHUFD with a uniform selector)
    #[inline(always)]
    pub const fn broadcast(self, lane: usize) -> Self {
        Self::splat(self.0[lane])
    }

    /// Shift-left-XOR fold: lane `i` becomes the XOR of lanes `0..=i`.
    ///
    /// Equivalent to `x ^= x << 32; x ^= x << 64; x ^= x << 96` on the
    /// 128-bit value.
    #[inline(always)]
    pub const fn shl_xor(self) -> Self {
        let [w0, w1, w2, w3] = self.0;
        let w1 = w1 ^ w0;
        let w2 = w2 ^ w1;
        let w3 = w3 ^ w2;
        Self([w0, w1, w2, w3])
    }
}

impl From<[u8; BLOCK_SIZE]> for Block {
    #[inline(always)]
    fn from(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self::from_bytes(&bytes)
    }
}

impl From<Block> for [u8; BLOCK_SIZE] {
    #[inline(always)]
    fn from(block: Block) -> Self {
        block.to_bytes()
    }
}

impl BitXor for Block {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        let [a0, a1, a2, a3] = self.0;
        let [b0, b1, b2, b3] = rhs.0;
        Self([a0 ^ b0, a1 ^ b1, a2 ^ b2, a3 ^ b3])
    }
}

impl BitXorAssign for Block {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}
