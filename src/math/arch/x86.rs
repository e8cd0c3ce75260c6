use super::super::RoundingMode;

#[inline(always)]
fn decode(rc: u32) -> RoundingMode {
    match rc & 3 {
        0 => RoundingMode::Nearest,
        1 => RoundingMode::Down,
        2 => RoundingMode::Up,
        _ => RoundingMode::TowardZero,
    }
}

/// Rounding control of MXCSR (bits 13-14), which governs SSE2 double arithmetic.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub(crate) fn rounding_mode() -> RoundingMode {
    let mut csr: u32 = 0;
    // Safety: stmxcsr stores four bytes into `csr` and touches nothing else.
    unsafe {
        core::arch::asm!(
            "stmxcsr [{ptr}]",
            ptr = in(reg) core::ptr::addr_of_mut!(csr),
            options(nostack, preserves_flags)
        );
    }
    decode(csr >> 13)
}

/// Rounding control of the x87 control word (bits 10-11); 32-bit x86 doubles
/// may be computed on the x87 stack.
#[cfg(target_arch = "x86")]
#[inline(always)]
pub(crate) fn rounding_mode() -> RoundingMode {
    let mut cw: u16 = 0;
    // Safety: fnstcw stores two bytes into `cw` and touches nothing else.
    unsafe {
        core::arch::asm!(
            "fnstcw [{ptr}]",
            ptr = in(reg) core::ptr::addr_of_mut!(cw),
            options(nostack, preserves_flags)
        );
    }
    decode(u32::from(cw) >> 10)
}
