use super::super::RoundingMode;

/// RMode field of FPCR (bits 22-23).
#[inline(always)]
pub(crate) fn rounding_mode() -> RoundingMode {
    let fpcr: u64;
    // Safety: reading FPCR has no side effects.
    unsafe {
        core::arch::asm!(
            "mrs {fpcr}, fpcr",
            fpcr = out(reg) fpcr,
            options(nomem, nostack, preserves_flags)
        );
    }
    match (fpcr >> 22) & 3 {
        0 => RoundingMode::Nearest,
        1 => RoundingMode::Up,
        2 => RoundingMode::Down,
        _ => RoundingMode::TowardZero,
    }
}
