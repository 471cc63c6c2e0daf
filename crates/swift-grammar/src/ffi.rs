//! C ABI declaration of the Swift grammar accessor
//!
//! Mirrors `bindings/c/tree_sitter_swift.h`. The symbol itself is defined by
//! the generated parser that the `tree-sitter-swift` crate compiles and links.

use std::ffi::c_void;
use std::ptr::NonNull;

extern "C" {
    pub(crate) fn tree_sitter_swift() -> *const c_void;
}

/// Call `tree_sitter_swift` and return the raw grammar pointer.
///
/// Returns `None` if the accessor hands back null. The pointee is owned by
/// the generated parser and must never be freed or mutated by the caller.
pub fn raw_language() -> Option<NonNull<c_void>> {
    // SAFETY: the accessor takes no arguments and returns the address of a
    // statically initialized table.
    let ptr = unsafe { tree_sitter_swift() };
    NonNull::new(ptr.cast_mut())
}
