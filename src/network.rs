//! Round network over independent lanes
//!
//! Every lane sees the same key in the same round, and lanes never mix, so
//! applying a round key to the whole lane set before moving to the next key
//! keeps several independent table lookups in flight per round.

use crate::block::Block;
use crate::key_schedule::RoundKeys;
use crate::soft_aes::encrypt_round;

/// Apply one round with `key` to each of `N` lanes
#[inline(always)]
pub fn round_lanes<const N: usize>(key: Block, lanes: &mut [Block; N]) {
    for lane in lanes.iter_mut() {
        *lane = encrypt_round(*lane, key);
    }
}

/// One round over a 4-lane group
#[inline(always)]
pub fn round4(key: Block, lanes: &mut [Block; 4]) {
    round_lanes(key, lanes);
}

/// One round over an 8-lane group
#[inline(always)]
pub fn round8(key: Block, lanes: &mut [Block; 8]) {
    round_lanes(key, lanes);
}

/// Run the full ten-key network over a 4-lane group
#[inline(always)]
pub fn encrypt4(keys: &RoundKeys, lanes: &mut [Block; 4]) {
    for &key in keys {
        round4(key, lanes);
    }
}

/// Run the full ten-key network over an 8-lane group
#[inline(always)]
pub fn encrypt8(keys: &RoundKeys, lanes: &mut [Block; 8]) {
    for &key in keys {
        round8(key, lanes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_keys() -> RoundKeys {
        RoundKeys::expand(
            Block::from_bytes(&core::array::from_fn(|i| (i * 11 + 1) as u8)),
            Block::from_bytes(&core::array::from_fn(|i| (i * 29 + 7) as u8)),
        )
    }

    fn sample_lanes<const N: usize>() -> [Block; N] {
        core::array::from_fn(|lane| {
            Block::from_bytes(&core::array::from_fn(|i| (lane * 16 + i) as u8 ^ 0x5A))
        })
    }

    /// Single-lane reference: ten sequential rounds on one block
    fn encrypt_single(keys: &RoundKeys, mut block: Block) -> Block {
        for &key in keys.as_blocks() {
            block = encrypt_round(block, key);
        }
        block
    }

    #[test]
    fn test_encrypt4_matches_single_lane() {
        let keys = sample_keys();
        let input = sample_lanes::<4>();

        let mut lanes = input;
        encrypt4(&keys, &mut lanes);

        for (out, inp) in lanes.iter().zip(input) {
            assert_eq!(*out, encrypt_single(&keys, inp));
        }
    }

    #[test]
    fn test_encrypt8_matches_single_lane() {
        let keys = sample_keys();
        let input = sample_lanes::<8>();

        let mut lanes = input;
        encrypt8(&keys, &mut lanes);

        for (out, inp) in lanes.iter().zip(input) {
            assert_eq!(*out, encrypt_single(&keys, inp));
        }
    }

    #[test]
    fn test_encrypt8_equals_two_encrypt4_groups() {
        let keys = sample_keys();
        let input = sample_lanes::<8>();

        let mut wide = input;
        encrypt8(&keys, &mut wide);

        let mut low: [Block; 4] = core::array::from_fn(|i| input[i]);
        let mut high: [Block; 4] = core::array::from_fn(|i| input[i + 4]);
        encrypt4(&keys, &mut low);
        encrypt4(&keys, &mut high);

        assert_eq!(&wide[..4], &low);
        assert_eq!(&wide[4..], &high);
    }

    #[test]
    fn test_round_applies_same_key_to_every_lane() {
        let key = Block::from_words([1, 2, 3, 4]);
        let mut lanes = [Block::ZERO; 4];
        round4(key, &mut lanes);

        let expected = encrypt_round(Block::ZERO, key);
        assert!(lanes.iter().all(|&lane| lane == expected));
    }
}
