//! Hardware AES probe
//!
//! The kernel in this crate always runs in software. The probe lets the
//! surrounding pipeline decide whether it needs the software path at all.

use log::debug;

#[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
cpufeatures::new!(cpuid_aes, "aes");

/// Which AES implementation a caller should dispatch to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AesBackend {
    /// AES-NI or ARMv8 crypto extensions are present
    Hardware,
    /// No hardware AES; use this crate's software path
    Software,
}

/// Whether the running CPU has hardware AES instructions
///
/// The underlying CPUID / auxv lookup is cached after the first call.
pub fn hardware_aes_available() -> bool {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
    {
        cpuid_aes::get()
    }

    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
    {
        false
    }
}

/// Backend the pipeline should use on this CPU
pub fn preferred_backend() -> AesBackend {
    let backend = if hardware_aes_available() {
        AesBackend::Hardware
    } else {
        AesBackend::Software
    };
    debug!("AES backend: {:?}", backend);
    backend
}
