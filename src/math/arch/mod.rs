// Architecture-specific control-register access.

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
mod x86;
#[cfg(target_arch = "aarch64")]
mod aarch64;

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
pub(crate) use x86::rounding_mode;

#[cfg(target_arch = "aarch64")]
pub(crate) use aarch64::rounding_mode;

#[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
#[inline(always)]
pub(crate) fn rounding_mode() -> super::RoundingMode {
    super::RoundingMode::Nearest
}
