//! Error values for the runtime's last-error convention

use core::ffi::c_int;

/// Implement common methods for ABI error enums.
///
/// Generates `as_c_int()` and `from_c_int()` for `#[repr(i32)]` enums
/// that follow the conventional errno numbering.
macro_rules! impl_errno_values {
    ($ty:ty, fallback: $fallback:ident, variants: { $($val:literal => $variant:ident),* $(,)? }) => {
        impl $ty {
            /// Convert to the C-style integer stored in the last-error cell.
            #[inline]
            pub fn as_c_int(self) -> c_int {
                self as c_int
            }

            /// Convert from a C-style integer.
            #[inline]
            pub fn from_c_int(val: c_int) -> Self {
                match val {
                    $($val => Self::$variant,)*
                    _ => Self::$fallback,
                }
            }
        }
    };
}

/// Error values a failing shim entry point reports through the
/// process-wide last-error cell.
///
/// Numbering follows the conventional errno values the hosted C
/// library was built against. Each unimplementable capability maps to
/// exactly one of these; callers must treat the capability as
/// permanently absent rather than retry.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Errno {
    /// No such file or directory
    NoSuchFile = 2,
    /// No child processes to wait for
    NoChild = 10,
    /// Resource temporarily unavailable
    TryAgain = 11,
    /// Out of memory
    OutOfMemory = 12,
    /// Invalid argument
    InvalidArgument = 22,
    /// Too many links
    TooManyLinks = 31,
}

impl_errno_values!(Errno, fallback: InvalidArgument, variants: {
    2 => NoSuchFile,
    10 => NoChild,
    11 => TryAgain,
    12 => OutOfMemory,
    22 => InvalidArgument,
    31 => TooManyLinks,
});
