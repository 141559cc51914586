//! DriftOS userland demo programs
//!
//! Small programs that exercise the syscall boundary directly, without
//! going through a hosted C library.

#![cfg_attr(not(test), no_std)]

pub mod hello;
