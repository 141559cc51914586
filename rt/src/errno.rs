//! Process-wide last-error cell
//!
//! The shim surface signals why a call failed by storing an errno
//! value here before returning its failure marker, matching the
//! hosted library's expectations. Single-threaded process model; the
//! atomic exists for well-defined mutation, not for cross-thread
//! coordination.

use core::ffi::c_int;
use core::sync::atomic::{AtomicI32, Ordering};

use driftos_abi::Errno;

static LAST_ERROR: AtomicI32 = AtomicI32::new(0);

/// Read the current last-error value. Zero means no recorded error.
#[inline]
pub fn errno() -> c_int {
    LAST_ERROR.load(Ordering::Relaxed)
}

/// Record the reason for a failing shim call.
#[inline]
pub fn set_errno(err: Errno) {
    LAST_ERROR.store(err.as_c_int(), Ordering::Relaxed);
}

/// Reset the cell to the no-error state.
#[inline]
pub fn clear_errno() {
    LAST_ERROR.store(0, Ordering::Relaxed);
}
