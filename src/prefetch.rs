//! Cache prefetch hints for scratchpad sweeps
//!
//! Prefetch is a hint: the CPU ignores addresses it cannot resolve, so the
//! helpers take any pointer and use wrapping arithmetic for look-ahead.
//! Other targets compile these to nothing.

#[cfg(target_arch = "x86_64")]
mod imp {
    use core::arch::x86_64::{_MM_HINT_T0, _MM_HINT_T2, _mm_prefetch};

    /// Prefetch into L1 for an imminent read
    #[inline(always)]
    pub fn read(ptr: *const u8) {
        // SAFETY: PREFETCHh never faults, whatever the address
        unsafe { _mm_prefetch::<_MM_HINT_T0>(ptr.cast::<i8>()) }
    }

    /// Prefetch into the outer cache levels ahead of a later write
    #[inline(always)]
    pub fn write(ptr: *const u8) {
        // SAFETY: PREFETCHh never faults, whatever the address
        unsafe { _mm_prefetch::<_MM_HINT_T2>(ptr.cast::<i8>()) }
    }
}

#[cfg(target_arch = "aarch64")]
mod imp {
    /// Prefetch into L1 for an imminent read (PLDL1KEEP)
    #[inline(always)]
    pub fn read(ptr: *const u8) {
        // SAFETY: PRFM never faults, whatever the address
        unsafe {
            core::arch::asm!(
                "prfm pldl1keep, [{ptr}]",
                ptr = in(reg) ptr,
                options(nostack, preserves_flags)
            );
        }
    }

    /// Prefetch into L3 ahead of a later write (PSTL3KEEP)
    #[inline(always)]
    pub fn write(ptr: *const u8) {
        // SAFETY: PRFM never faults, whatever the address
        unsafe {
            core::arch::asm!(
                "prfm pstl3keep, [{ptr}]",
                ptr = in(reg) ptr,
                options(nostack, preserves_flags)
            );
        }
    }
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
mod imp {
    #[inline(always)]
    pub fn read(_ptr: *const u8) {}

    #[inline(always)]
    pub fn write(_ptr: *const u8) {}
}

pub use imp::{read, write};
