//! C FFI bindings for native mining pipelines
//!
//! Buffers stay owned by the caller. Every entry point returns
//! [`CN_OK`] on success, [`CN_ERR_NULL`] for a null pointer and
//! [`CN_ERR_LAYOUT`] when a length does not fit the variant.

use core::slice;

use log::error;

use crate::params::{CN_LITE_MEMORY, CN_MEMORY};
use crate::scratchpad::{try_explode, try_implode};

/// Success
pub const CN_OK: i32 = 0;
/// A pointer argument was null
pub const CN_ERR_NULL: i32 = -1;
/// State too short or scratchpad of the wrong size
pub const CN_ERR_LAYOUT: i32 = -2;

fn explode_raw<const MEM: usize>(
    state: *const u8,
    state_len: usize,
    scratchpad: *mut u8,
    scratchpad_len: usize,
) -> i32 {
    if state.is_null() || scratchpad.is_null() {
        error!("explode called with a null buffer");
        return CN_ERR_NULL;
    }

    // SAFETY: the caller guarantees both pointers are valid for their lengths
    // and that the regions do not overlap.
    let (state, scratchpad) = unsafe {
        (
            slice::from_raw_parts(state, state_len),
            slice::from_raw_parts_mut(scratchpad, scratchpad_len),
        )
    };

    match try_explode::<MEM, true>(state, scratchpad) {
        Ok(()) => CN_OK,
        Err(_) => CN_ERR_LAYOUT,
    }
}

fn implode_raw<const MEM: usize>(
    scratchpad: *const u8,
    scratchpad_len: usize,
    state: *mut u8,
    state_len: usize,
) -> i32 {
    if state.is_null() || scratchpad.is_null() {
        error!("implode called with a null buffer");
        return CN_ERR_NULL;
    }

    // SAFETY: the caller guarantees both pointers are valid for their lengths
    // and that the regions do not overlap.
    let (scratchpad, state) = unsafe {
        (
            slice::from_raw_parts(scratchpad, scratchpad_len),
            slice::from_raw_parts_mut(state, state_len),
        )
    };

    match try_implode::<MEM, true>(scratchpad, state) {
        Ok(()) => CN_OK,
        Err(_) => CN_ERR_LAYOUT,
    }
}

/// Expand a state into a 2 MiB scratchpad
#[unsafe(no_mangle)]
pub extern "C" fn cn_soft_explode(
    state: *const u8,
    state_len: usize,
    scratchpad: *mut u8,
    scratchpad_len: usize,
) -> i32 {
    explode_raw::<CN_MEMORY>(state, state_len, scratchpad, scratchpad_len)
}

/// Fold a 2 MiB scratchpad into a state
#[unsafe(no_mangle)]
pub extern "C" fn cn_soft_implode(
    scratchpad: *const u8,
    scratchpad_len: usize,
    state: *mut u8,
    state_len: usize,
) -> i32 {
    implode_raw::<CN_MEMORY>(scratchpad, scratchpad_len, state, state_len)
}

/// Expand a state into a 1 MiB (Lite) scratchpad
#[unsafe(no_mangle)]
pub extern "C" fn cn_lite_soft_explode(
    state: *const u8,
    state_len: usize,
    scratchpad: *mut u8,
    scratchpad_len: usize,
) -> i32 {
    explode_raw::<CN_LITE_MEMORY>(state, state_len, scratchpad, scratchpad_len)
}

/// Fold a 1 MiB (Lite) scratchpad into a state
#[unsafe(no_mangle)]
pub extern "C" fn cn_lite_soft_implode(
    scratchpad: *const u8,
    scratchpad_len: usize,
    state: *mut u8,
    state_len: usize,
) -> i32 {
    implode_raw::<CN_LITE_MEMORY>(scratchpad, scratchpad_len, state, state_len)
}
