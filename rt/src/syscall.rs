//! Syscall trampoline
//!
//! One `int 0x80` primitive marshals a syscall number and up to three
//! word arguments into the kernel and hands back the raw result word.
//! The trampoline validates nothing; failure semantics are entirely
//! the kernel's, surfaced as the returned word.

use core::arch::asm;

/// Issue a syscall with the kernel's register convention:
/// rax = number, rdi/rsi/rdx = arguments, rax = result.
///
/// # Safety
/// Transfers control to privileged code. The kernel may read or write
/// memory named by the arguments, or never return at all (reboot).
#[inline(always)]
pub unsafe fn syscall_invoke(num: u64, arg0: u64, arg1: u64, arg2: u64) -> i64 {
    let ret: i64;
    unsafe {
        asm!(
            "int 0x80",
            in("rax") num,
            in("rdi") arg0,
            in("rsi") arg1,
            in("rdx") arg2,
            lateout("rax") ret,
            options(nostack, preserves_flags),
        );
    }
    ret
}

#[inline(always)]
pub fn syscall0(num: u64) -> i64 {
    unsafe { syscall_invoke(num, 0, 0, 0) }
}

#[inline(always)]
pub fn syscall1(num: u64, arg0: u64) -> i64 {
    unsafe { syscall_invoke(num, arg0, 0, 0) }
}

#[inline(always)]
pub fn syscall2(num: u64, arg0: u64, arg1: u64) -> i64 {
    unsafe { syscall_invoke(num, arg0, arg1, 0) }
}

#[inline(always)]
pub fn syscall3(num: u64, arg0: u64, arg1: u64, arg2: u64) -> i64 {
    unsafe { syscall_invoke(num, arg0, arg1, arg2) }
}

/// Kernel access seam for the runtime layer.
///
/// Callers that need kernel services take a gate by reference instead
/// of reaching for the trampoline directly, so the same code path runs
/// against [`KernelGate`] in production and against a scripted gate in
/// tests. Only the 3-argument form is required; the narrower arities
/// zero-pad into it, mirroring the trampoline itself.
pub trait SyscallGate {
    fn syscall3(&self, num: u64, arg0: u64, arg1: u64, arg2: u64) -> i64;

    #[inline]
    fn syscall0(&self, num: u64) -> i64 {
        self.syscall3(num, 0, 0, 0)
    }

    #[inline]
    fn syscall1(&self, num: u64, arg0: u64) -> i64 {
        self.syscall3(num, arg0, 0, 0)
    }

    #[inline]
    fn syscall2(&self, num: u64, arg0: u64, arg1: u64) -> i64 {
        self.syscall3(num, arg0, arg1, 0)
    }
}

/// The real kernel, reached through the trap instruction.
#[derive(Clone, Copy, Default)]
pub struct KernelGate;

impl SyscallGate for KernelGate {
    #[inline(always)]
    fn syscall3(&self, num: u64, arg0: u64, arg1: u64, arg2: u64) -> i64 {
        unsafe { syscall_invoke(num, arg0, arg1, arg2) }
    }
}
