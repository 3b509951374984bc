//! Scratchpad explode and implode
//!
//! Explode expands state blocks 4..12 into the whole scratchpad, keyed by
//! state blocks 0..2. Implode folds the scratchpad back into state blocks
//! 4..12, keyed by state blocks 2..4.
//!
//! The scratchpad is processed in 128-byte windows. Lane group A (state
//! blocks 4..8) owns the first 64 bytes of every window and lane group B
//! (state blocks 8..12) owns the last 64 bytes. Each group makes its own
//! complete sweep: explode writes group A's half of every window before
//! starting group B, and implode finishes and stores group A before loading
//! group B.
//!
//! Buffers are plain byte slices; blocks are loaded and stored bytewise, so
//! no alignment is required. 64-byte alignment of the scratchpad keeps every
//! lane group inside one cache line.

use log::warn;

use crate::block::Block;
use crate::error::LayoutError;
use crate::key_schedule::RoundKeys;
use crate::network::encrypt4;
use crate::params::*;
use crate::prefetch;

/// How far ahead of the current window the prefetch hints reach
const PREFETCH_DISTANCE: usize = 4 * WINDOW_SIZE;

/// Validate buffer lengths for a scratchpad of `MEM` bytes
pub fn check_layout<const MEM: usize>(
    state_len: usize,
    scratchpad_len: usize,
) -> Result<(), LayoutError> {
    if state_len < STATE_SIZE {
        return Err(LayoutError::StateTooShort { len: state_len });
    }
    if scratchpad_len != MEM {
        return Err(LayoutError::ScratchpadLength {
            expected: MEM,
            actual: scratchpad_len,
        });
    }
    Ok(())
}

/// Expand `state` into `scratchpad`
///
/// Reads state blocks 0..12 and overwrites every byte of the scratchpad.
/// `state` is not modified.
///
/// # Panics
///
/// If `state` is shorter than [`STATE_SIZE`] or `scratchpad` is not exactly
/// `MEM` bytes. `MEM` itself is checked at compile time.
pub fn explode<const MEM: usize, const PREFETCH: bool>(state: &[u8], scratchpad: &mut [u8]) {
    const { assert!(is_valid_memory(MEM), "MEM must be a non-zero multiple of 128") };
    if let Err(err) = check_layout::<MEM>(state.len(), scratchpad.len()) {
        panic!("explode: {err}");
    }

    if PREFETCH {
        prefetch::read(state.as_ptr());
        prefetch::read(state.as_ptr().wrapping_add(LANES_A_BLOCK * BLOCK_SIZE));
        prefetch::read(state.as_ptr().wrapping_add(LANES_B_BLOCK * BLOCK_SIZE));
    }

    let keys = RoundKeys::from_state(state, EXPLODE_KEY_BLOCK);

    let mut lanes = load_group(state, LANES_A_BLOCK);
    for window in scratchpad.chunks_exact_mut(WINDOW_SIZE) {
        encrypt4(&keys, &mut lanes);
        store_group(&lanes, &mut window[..GROUP_SIZE]);
    }

    let mut lanes = load_group(state, LANES_B_BLOCK);
    for window in scratchpad.chunks_exact_mut(WINDOW_SIZE) {
        if PREFETCH {
            prefetch::write(window.as_ptr().wrapping_add(PREFETCH_DISTANCE));
        }
        encrypt4(&keys, &mut lanes);
        store_group(&lanes, &mut window[GROUP_SIZE..]);
    }
}

/// Fold `scratchpad` into `state`
///
/// Overwrites state blocks 4..12; blocks 0..4 and any bytes past
/// [`STATE_SIZE`] are left untouched.
///
/// # Panics
///
/// Under the same conditions as [`explode`].
pub fn implode<const MEM: usize, const PREFETCH: bool>(scratchpad: &[u8], state: &mut [u8]) {
    const { assert!(is_valid_memory(MEM), "MEM must be a non-zero multiple of 128") };
    if let Err(err) = check_layout::<MEM>(state.len(), scratchpad.len()) {
        panic!("implode: {err}");
    }

    let keys = RoundKeys::from_state(state, IMPLODE_KEY_BLOCK);

    if PREFETCH {
        prefetch::read(scratchpad.as_ptr());
    }
    fold_group::<PREFETCH>(&keys, scratchpad, state, LANES_A_BLOCK, 0);

    if PREFETCH {
        prefetch::read(scratchpad.as_ptr().wrapping_add(GROUP_SIZE));
    }
    fold_group::<PREFETCH>(&keys, scratchpad, state, LANES_B_BLOCK, GROUP_SIZE);
}

/// [`explode`] for callers holding unvalidated buffers
pub fn try_explode<const MEM: usize, const PREFETCH: bool>(
    state: &[u8],
    scratchpad: &mut [u8],
) -> Result<(), LayoutError> {
    check_layout::<MEM>(state.len(), scratchpad.len()).inspect_err(|err| {
        warn!("rejecting explode: {err}");
    })?;
    explode::<MEM, PREFETCH>(state, scratchpad);
    Ok(())
}

/// [`implode`] for callers holding unvalidated buffers
pub fn try_implode<const MEM: usize, const PREFETCH: bool>(
    scratchpad: &[u8],
    state: &mut [u8],
) -> Result<(), LayoutError> {
    check_layout::<MEM>(state.len(), scratchpad.len()).inspect_err(|err| {
        warn!("rejecting implode: {err}");
    })?;
    implode::<MEM, PREFETCH>(scratchpad, state);
    Ok(())
}

/// Sweep one lane group over the whole scratchpad: XOR in the group's half
/// of each window, then run the network. The result replaces the group's
/// state blocks.
#[inline(always)]
fn fold_group<const PREFETCH: bool>(
    keys: &RoundKeys,
    scratchpad: &[u8],
    state: &mut [u8],
    first_block: usize,
    group_offset: usize,
) {
    let mut lanes = load_group(state, first_block);
    for window in scratchpad.chunks_exact(WINDOW_SIZE) {
        if PREFETCH {
            prefetch::read(window.as_ptr().wrapping_add(PREFETCH_DISTANCE + group_offset));
        }
        xor_group(&mut lanes, &window[group_offset..group_offset + GROUP_SIZE]);
        encrypt4(keys, &mut lanes);
    }

    let start = first_block * BLOCK_SIZE;
    store_group(&lanes, &mut state[start..start + GROUP_SIZE]);
}

#[inline(always)]
fn load_group(state: &[u8], first_block: usize) -> [Block; GROUP_LANES] {
    core::array::from_fn(|lane| Block::load(&state[(first_block + lane) * BLOCK_SIZE..]))
}

#[inline(always)]
fn store_group(lanes: &[Block; GROUP_LANES], dst: &mut [u8]) {
    for (lane, chunk) in lanes.iter().zip(dst.chunks_exact_mut(BLOCK_SIZE)) {
        lane.store(chunk);
    }
}

#[inline(always)]
fn xor_group(lanes: &mut [Block; GROUP_LANES], src: &[u8]) {
    for (lane, chunk) in lanes.iter_mut().zip(src.chunks_exact(BLOCK_SIZE)) {
        *lane ^= Block::load(chunk);
    }
}
