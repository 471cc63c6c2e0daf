//! Cross-language linkage checks
//!
//! `build.rs` compiles `bindings/c/linkage_check.c` as strict C99 and
//! `linkage_check.cpp` as C++, both against the shipped header. Each unit
//! calls `tree_sitter_swift` through the header's declaration, so a
//! successful link plus a matching pointer shows the unmangled C symbol is
//! reachable from that language mode.

use log::trace;
use std::ffi::c_void;

use crate::error::{GrammarError, Result};
use crate::ffi;

extern "C" {
    fn swift_grammar_from_c() -> *const c_void;
    fn swift_grammar_abi_version_from_c() -> u32;
    fn swift_grammar_from_cxx() -> *const c_void;
}

/// Pointer returned when `tree_sitter_swift` is called from a C translation unit
pub fn from_c() -> *const c_void {
    // SAFETY: the C function only forwards the zero-argument accessor
    unsafe { swift_grammar_from_c() }
}

/// ABI version read through `ts_language_version` in C, with the header
/// included after `tree_sitter/api.h`
pub fn abi_version_from_c() -> usize {
    // SAFETY: forwards the accessor's result to the engine's version query
    unsafe { swift_grammar_abi_version_from_c() as usize }
}

/// Pointer returned when `tree_sitter_swift` is called from a C++ translation unit
pub fn from_cxx() -> *const c_void {
    // SAFETY: the C++ function only forwards the zero-argument accessor
    unsafe { swift_grammar_from_cxx() }
}

/// Check that both compiled units see the same grammar as Rust does.
pub fn verify() -> Result<()> {
    let expected = ffi::raw_language().ok_or(GrammarError::NullLanguage)?;
    let expected = expected.as_ptr() as *const c_void;

    for (unit, found) in [("C", from_c()), ("C++", from_cxx())] {
        trace!("{unit} unit returned {found:p}, Rust sees {expected:p}");
        if found != expected {
            return Err(GrammarError::LinkageMismatch { unit });
        }
    }

    Ok(())
}
