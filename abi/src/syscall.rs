#![allow(dead_code)]

// Syscall numbers (rax on entry)
pub const SYSCALL_WRITE: u64 = 1;
pub const SYSCALL_BRK: u64 = 12;
pub const SYSCALL_REBOOT: u64 = 48;

/// File-descriptor-like target the kernel routes console writes to.
pub const CONSOLE_FD: u64 = 1;

/// Both magic words must accompany `SYSCALL_REBOOT` or the kernel
/// ignores the request.
pub const REBOOT_MAGIC_1: u64 = 318_839_184;
pub const REBOOT_MAGIC_2: u64 = 3_402_301_098;
