//! # CryptoNight Scratchpad Kernel (Software AES)
//!
//! The memory-hard expand/fold pair at the heart of CryptoNight-family
//! proof-of-work, built on a portable table-driven AES round for CPUs
//! without AES-NI or ARMv8 crypto extensions.
//!
//! Output is bit-exact with the hardware-accelerated path: both paths must
//! agree for the hash to be accepted.
//!
//! ## Pipeline Position
//!
//! ```text
//! Keccak state ─▶ explode ─▶ scratchpad ─▶ (memory-hard loop) ─▶ implode ─▶ final hash
//! ```
//!
//! The sponge, the memory-hard loop and the final hash live outside this
//! crate, as do allocation and thread scheduling. Each worker owns its own
//! state and scratchpad; nothing here is shared or global.
//!
//! ## State Layout (16-byte blocks)
//!
//! | Blocks | Role                                  |
//! |--------|---------------------------------------|
//! | 0..2   | AES-256 key for explode               |
//! | 2..4   | AES-256 key for implode               |
//! | 4..8   | Lane group A                          |
//! | 8..12  | Lane group B                          |
//!
//! ## Parameters
//!
//! Scratchpad size and prefetching are compile-time parameters:
//!
//! - `MEM`: scratchpad bytes, a non-zero multiple of 128
//!   ([`CN_MEMORY`] = 2 MiB, [`CN_LITE_MEMORY`] = 1 MiB, [`CN_HEAVY_MEMORY`] = 4 MiB)
//! - `PREFETCH`: emit cache prefetch hints (no effect on output)
//!
//! ## Example
//!
//! ```rust
//! use cn_scratchpad::{explode, implode, CN_MEMORY, SPONGE_STATE_SIZE};
//!
//! let mut state = [0u8; SPONGE_STATE_SIZE];
//! state[..32].copy_from_slice(&[0x42; 32]);
//!
//! let mut scratchpad = vec![0u8; CN_MEMORY];
//! explode::<CN_MEMORY, true>(&state, &mut scratchpad);
//!
//! // ... memory-hard loop mutates scratchpad and state[32..64] ...
//!
//! implode::<CN_MEMORY, true>(&scratchpad, &mut state);
//! ```
//!
//! ## no_std Support
//!
//! ```toml
//! [dependencies]
//! cn-scratchpad = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]

mod block;
mod detect;
mod error;
mod key_schedule;
mod network;
mod params;
mod prefetch;
mod scratchpad;
mod soft_aes;

#[cfg(feature = "std")]
mod ffi;

pub use block::Block;
pub use detect::{AesBackend, hardware_aes_available, preferred_backend};
pub use error::LayoutError;
pub use key_schedule::{ROUND_KEYS, RoundKeys};
pub use network::{encrypt4, encrypt8, round4, round8, round_lanes};
pub use params::*;
pub use scratchpad::{check_layout, explode, implode, try_explode, try_implode};
pub use soft_aes::{encrypt_round, key_schedule_assist, sub_word};
