//! Buffer layout errors

use thiserror::Error;

/// A state or scratchpad buffer that does not fit the kernel's layout
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    #[error("state is {len} bytes, at least {min} required", min = crate::params::STATE_SIZE)]
    StateTooShort { len: usize },

    #[error("scratchpad is {actual} bytes, expected {expected}")]
    ScratchpadLength { expected: usize, actual: usize },
}
