//! AES-256 key expansion truncated to ten round keys
//!
//! The scratchpad network runs ten rounds per lane, so only the first five
//! `(lo, hi)` pairs of the AES-256 schedule are derived and only the first
//! four round constants are ever used.

use crate::block::Block;
use crate::params::BLOCK_SIZE;
use crate::soft_aes::key_schedule_assist;

/// Number of round keys applied per lane
pub const ROUND_KEYS: usize = 10;

/// Round constants for the four derived pairs
const RCON: [u8; 4] = [0x01, 0x02, 0x04, 0x08];

/// The ten round keys of one explode or implode call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys([Block; ROUND_KEYS]);

impl RoundKeys {
    /// Expand a 256-bit key given as two blocks
    #[inline(always)]
    pub fn expand(lo: Block, hi: Block) -> Self {
        let mut keys = [Block::ZERO; ROUND_KEYS];
        keys[0] = lo;
        keys[1] = hi;

        let (mut lo, mut hi) = (lo, hi);
        for (pair, rcon) in keys[2..].chunks_exact_mut(2).zip(RCON) {
            expand_pair(&mut lo, &mut hi, rcon);
            pair[0] = lo;
            pair[1] = hi;
        }

        Self(keys)
    }

    /// Expand the key held in state blocks `first_block` and `first_block + 1`
    ///
    /// Panics if `state` does not contain both blocks.
    #[inline(always)]
    pub fn from_state(state: &[u8], first_block: usize) -> Self {
        let offset = first_block * BLOCK_SIZE;
        Self::expand(
            Block::load(&state[offset..]),
            Block::load(&state[offset + BLOCK_SIZE..]),
        )
    }

    /// Round keys in application order
    #[inline(always)]
    pub fn as_blocks(&self) -> &[Block; ROUND_KEYS] {
        &self.0
    }

    /// Iterate over the round keys in application order
    #[inline(always)]
    pub fn iter(&self) -> core::slice::Iter<'_, Block> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a RoundKeys {
    type Item = &'a Block;
    type IntoIter = core::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One step of the AES-256 recurrence: the even key takes RotWord+SubWord of
/// the previous odd key's top lane plus `rcon`, the odd key takes SubWord of
/// the new even key's top lane.
#[inline(always)]
fn expand_pair(lo: &mut Block, hi: &mut Block, rcon: u8) {
    let helper = key_schedule_assist(*hi, rcon).broadcast(3);
    *lo = lo.shl_xor() ^ helper;

    let helper = key_schedule_assist(*lo, 0x00).broadcast(2);
    *hi = hi.shl_xor() ^ helper;
}
