use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=RUSTC");

    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let (major, minor, patch) = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .and_then(|text| parse_version(&text))
        .unwrap_or((0, 0, 0));

    println!("cargo:rustc-env=NATIVE_OPERATORS_RUSTC_MAJOR={major}");
    println!("cargo:rustc-env=NATIVE_OPERATORS_RUSTC_MINOR={minor}");
    println!("cargo:rustc-env=NATIVE_OPERATORS_RUSTC_PATCH={patch}");
}

// "rustc 1.86.0 (05f9846f8 2025-03-31)" -> (1, 86, 0)
fn parse_version(text: &str) -> Option<(u16, u16, u16)> {
    let version = text.split_whitespace().nth(1)?;
    let core = version.split('-').next()?;
    let mut parts = core.split('.').map(|p| p.parse::<u16>().ok());
    Some((parts.next()??, parts.next()??, parts.next()??))
}
