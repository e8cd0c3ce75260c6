//! Build metadata reported through `get_extension_info`.

use std::ffi::c_char;

use bitflags::bitflags;
use log::debug;

use crate::backend::{Active, TrigBackend};

bitflags! {
    /// Instruction-set extensions the library was compiled for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CompilerFlags: u32 {
        const SSE = 1 << 0;
        const SSE2 = 1 << 1;
        const AVX = 1 << 2;
        const AVX2 = 1 << 3;
    }
}

impl CompilerFlags {
    /// The extensions enabled for the current compilation target.
    pub const fn target() -> Self {
        let mut bits = 0;
        if cfg!(target_feature = "sse") {
            bits |= Self::SSE.bits();
        }
        if cfg!(target_feature = "sse2") {
            bits |= Self::SSE2.bits();
        }
        if cfg!(target_feature = "avx") {
            bits |= Self::AVX.bits();
        }
        if cfg!(target_feature = "avx2") {
            bits |= Self::AVX2.bits();
        }
        Self::from_bits_retain(bits)
    }
}

/// Toolchain identification handed to the host.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ExtensionInfo {
    /// Static NUL-terminated compiler name.
    pub library_name: *const c_char,
    pub version_major: u16,
    pub version_minor: u16,
    pub version_build: u16,
    /// [`CompilerFlags`] bits.
    pub flags: u32,
}

const fn parse_u16(s: &str) -> u16 {
    let bytes = s.as_bytes();
    let mut value: u16 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let d = bytes[i];
        if !d.is_ascii_digit() {
            return 0;
        }
        value = value.saturating_mul(10).saturating_add((d - b'0') as u16);
        i += 1;
    }
    value
}

pub const RUSTC_MAJOR: u16 = parse_u16(env!("NATIVE_OPERATORS_RUSTC_MAJOR"));
pub const RUSTC_MINOR: u16 = parse_u16(env!("NATIVE_OPERATORS_RUSTC_MINOR"));
pub const RUSTC_PATCH: u16 = parse_u16(env!("NATIVE_OPERATORS_RUSTC_PATCH"));

#[unsafe(no_mangle)]
pub extern "C" fn get_extension_info() -> ExtensionInfo {
    let flags = CompilerFlags::target();
    debug!(
        "extension info: rustc {RUSTC_MAJOR}.{RUSTC_MINOR}.{RUSTC_PATCH}, flags {flags:?}, backend {}",
        Active::NAME
    );
    ExtensionInfo {
        library_name: c"rustc".as_ptr(),
        version_major: RUSTC_MAJOR,
        version_minor: RUSTC_MINOR,
        version_build: RUSTC_PATCH,
        flags: flags.bits(),
    }
}
