//! The built shared library, loaded and resolved by name the way a host does.

use std::ffi::CStr;
use std::path::PathBuf;

use libloading::{Library, Symbol, library_filename};
use native_operators::extension::{CompilerFlags, ExtensionInfo};
use native_operators::{Active, Backend, TrigBackend};

type Constant = unsafe extern "C" fn() -> f64;
type Unary = unsafe extern "C" fn(f64) -> f64;
type Binary = unsafe extern "C" fn(f64, f64) -> f64;
type Info = unsafe extern "C" fn() -> ExtensionInfo;

const CONSTANTS: [&str; 2] = ["constant_e", "constant_pi"];

const UNARY: [&str; 17] = [
    "operator_abs",
    "operator_sqrt",
    "operator_exp",
    "operator_ln",
    "operator_log",
    "operator_sin",
    "operator_cos",
    "operator_tan",
    "operator_asin",
    "operator_acos",
    "operator_atan",
    "operator_sinh",
    "operator_cosh",
    "operator_tanh",
    "operator_round",
    "operator_floor",
    "operator_ceil",
];

const BINARY: [&str; 6] = [
    "operator_add",
    "operator_subtract",
    "operator_multiply",
    "operator_divide",
    "operator_pow",
    "operator_remainder",
];

/// `NATIVE_OPERATORS_CDYLIB`, else the cdylib cargo builds next to this test
/// binary (`target/<profile>/deps`) or one level up.
fn cdylib_path() -> PathBuf {
    if let Some(p) = std::env::var_os("NATIVE_OPERATORS_CDYLIB") {
        return PathBuf::from(p);
    }
    let exe = std::env::current_exe().expect("test binary path");
    let deps = exe.parent().expect("test binary directory");
    let name = library_filename("native_operators");
    [Some(deps), deps.parent()]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(&name))
        .find(|p| p.is_file())
        .unwrap_or_else(|| panic!("{name:?} not found next to {}", exe.display()))
}

fn load() -> Library {
    let path = cdylib_path();
    // Safety: the library has no initialisers beyond the Rust runtime's.
    unsafe { Library::new(&path) }.unwrap_or_else(|e| panic!("load {}: {e}", path.display()))
}

fn resolve<'lib, T>(lib: &'lib Library, name: &str) -> Symbol<'lib, T> {
    // Safety: every caller names the symbol with its exported signature.
    unsafe { lib.get(name.as_bytes()) }.unwrap_or_else(|e| panic!("resolve {name}: {e}"))
}

#[test]
fn every_export_resolves() {
    let lib = load();
    let mut missing = Vec::new();
    let names = CONSTANTS
        .iter()
        .chain(&UNARY)
        .chain(&BINARY)
        .chain(&["get_extension_info"]);
    for name in names {
        // Safety: only the address is looked at.
        if unsafe { lib.get::<*const ()>(name.as_bytes()) }.is_err() {
            missing.push(*name);
        }
    }
    assert!(missing.is_empty(), "missing exports: {missing:?}");
    assert_eq!(CONSTANTS.len() + UNARY.len() + BINARY.len() + 1, 26);
}

#[test]
fn loaded_operators_match_active_backend() {
    let lib = load();
    let e: Symbol<Constant> = resolve(&lib, "constant_e");
    let pi: Symbol<Constant> = resolve(&lib, "constant_pi");
    // Safety: the symbols have the declared signatures.
    unsafe {
        assert_eq!(e(), std::f64::consts::E);
        assert_eq!(pi(), std::f64::consts::PI);
    }

    let unary: [(&str, fn(f64) -> f64); 7] = [
        ("operator_sin", Active::sin),
        ("operator_cos", Active::cos),
        ("operator_tan", Active::tan),
        ("operator_atan", Active::atan),
        ("operator_exp", Active::exp),
        ("operator_ln", Active::ln),
        ("operator_sqrt", f64::sqrt),
    ];
    for (name, expected) in unary {
        let f: Symbol<Unary> = resolve(&lib, name);
        for &x in &[-3.5f64, -0.1, 0.0, 0.7, 1.0, 2.5, 42.0, 1e10] {
            let arg = if matches!(name, "operator_ln" | "operator_sqrt") { x.abs() } else { x };
            // Safety: `f` has the declared signature.
            let got = unsafe { f(arg) };
            assert_eq!(got.to_bits(), expected(arg).to_bits(), "{name}({arg})");
        }
    }

    let pow: Symbol<Binary> = resolve(&lib, "operator_pow");
    let add: Symbol<Binary> = resolve(&lib, "operator_add");
    let rem: Symbol<Binary> = resolve(&lib, "operator_remainder");
    // Safety: the symbols have the declared signatures.
    unsafe {
        assert_eq!(pow(2.5, 1.5).to_bits(), Active::pow(2.5, 1.5).to_bits());
        assert_eq!(pow(0.3, -7.25).to_bits(), Active::pow(0.3, -7.25).to_bits());
        assert_eq!(add(0.1, 0.2), 0.1 + 0.2);
        assert_eq!(rem(-7.5, 2.0), -1.5);
        assert!(pow(f64::NAN, 2.0).is_nan());
    }

    let round: Symbol<Unary> = resolve(&lib, "operator_round");
    // Safety: `round` has the declared signature.
    unsafe {
        assert_eq!(round(2.5), 3.0);
        assert_eq!(round(-2.5), -3.0);
    }
}

#[test]
fn loaded_extension_info() {
    let lib = load();
    let get_info: Symbol<Info> = resolve(&lib, "get_extension_info");
    // Safety: `get_info` has the declared signature.
    let info = unsafe { get_info() };
    // Safety: the name is a static C string inside the still-loaded library.
    let name = unsafe { CStr::from_ptr(info.library_name) };
    assert_eq!(name, c"rustc");
    assert!(CompilerFlags::from_bits(info.flags).is_some());
    let here = native_operators::extension::get_extension_info();
    assert_eq!(
        (info.version_major, info.version_minor, info.version_build, info.flags),
        (here.version_major, here.version_minor, here.version_build, here.flags)
    );
}
