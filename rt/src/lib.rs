//! driftos-rt - Minimal C runtime support layer for DriftOS userland
//!
//! This crate provides the small set of low-level functions a hosted
//! standard library expects an operating system to supply:
//! - A syscall trampoline (`int 0x80` marshalling, 0-3 word arguments)
//! - The newlib-style shim surface (`sys_close`, `sys_write`, ...)
//! - Heap growth via `sys_sbrk`, backed by a kernel BRK query
//!
//! The target implements almost nothing: apart from console write and
//! reboot, every entry point reports a fixed, plausible-looking
//! success or failure so higher-level library code (buffered I/O, the
//! allocator) keeps working in a single-process, no-filesystem
//! environment.
//!
//! Kernel access goes through the [`syscall::SyscallGate`] seam so the
//! whole layer can be exercised against a scripted kernel in tests.

#![cfg_attr(not(test), no_std)]

pub mod api;
pub mod errno;
pub mod heap;
pub mod power;
pub mod syscall;
pub mod testing;
pub mod ulog;

#[cfg(test)]
mod tests;

pub use api::{
    sys_close, sys_execve, sys_exit, sys_fork, sys_fstat, sys_getpid, sys_isatty, sys_kill,
    sys_link, sys_lseek, sys_open, sys_read, sys_stat, sys_times, sys_unlink, sys_wait, sys_write,
};
pub use errno::{clear_errno, errno, set_errno};
pub use heap::{SBRK_FAILED, sys_sbrk};
pub use power::sys_reboot;
pub use syscall::{KernelGate, SyscallGate};
