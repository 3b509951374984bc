//! Scratchpad Geometry and Variant Parameters
//!
//! All sizes are in bytes unless the name says otherwise.

/// AES block size (one lane)
pub const BLOCK_SIZE: usize = 16;

/// Lanes per lane group
pub const GROUP_LANES: usize = 4;

/// Bytes covered by one lane group in a window
pub const GROUP_SIZE: usize = GROUP_LANES * BLOCK_SIZE;

/// Blocks processed per loop iteration (two lane groups)
pub const WINDOW_BLOCKS: usize = 2 * GROUP_LANES;

/// Bytes processed per loop iteration; `MEM` must be a multiple of this
pub const WINDOW_SIZE: usize = WINDOW_BLOCKS * BLOCK_SIZE;

/// Number of state blocks read by explode and implode
pub const STATE_BLOCKS: usize = 12;

/// Minimum state length accepted by explode and implode
pub const STATE_SIZE: usize = STATE_BLOCKS * BLOCK_SIZE;

/// Full Keccak sponge state length the state region normally lives in
pub const SPONGE_STATE_SIZE: usize = 200;

/// First of the two key blocks used by explode
pub const EXPLODE_KEY_BLOCK: usize = 0;

/// First of the two key blocks used by implode
pub const IMPLODE_KEY_BLOCK: usize = 2;

/// First state block of lane group A
pub const LANES_A_BLOCK: usize = 4;

/// First state block of lane group B
pub const LANES_B_BLOCK: usize = 8;

/// Original CryptoNight scratchpad (2 MiB)
pub const CN_MEMORY: usize = 2 * 1024 * 1024;

/// CryptoNight-Lite scratchpad (1 MiB)
pub const CN_LITE_MEMORY: usize = 1024 * 1024;

/// CryptoNight-Heavy scratchpad (4 MiB)
pub const CN_HEAVY_MEMORY: usize = 4 * 1024 * 1024;

/// Whether `mem` is a usable scratchpad size.
pub const fn is_valid_memory(mem: usize) -> bool {
    mem != 0 && mem % WINDOW_SIZE == 0
}
