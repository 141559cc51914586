//! DriftOS Kernel-Userland ABI Definitions
//!
//! This crate provides the canonical definitions for everything shared
//! across the syscall boundary: syscall identifiers, the reboot magic
//! words, errno values, and the `#[repr(C)]` structures the runtime
//! shim fills in for a hosted C library. Having a single source of
//! truth eliminates:
//! - Duplicate constant tables
//! - ABI mismatches between kernel and userland
//! - The need for unsafe FFI conversions
//!
//! All structures in this crate are `#[repr(C)]` for ABI stability.

#![no_std]
#![forbid(unsafe_code)]

pub mod error;
pub mod stat;
pub mod syscall;

pub use error::*;
pub use stat::*;
pub use syscall::*;
