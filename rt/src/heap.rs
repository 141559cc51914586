//! Heap growth primitive
//!
//! Tracks the end of the linear heap region for the hosted library's
//! allocator. The kernel is consulted exactly once per process
//! lifetime, via a BRK query, to learn the ceiling the heap may grow
//! to; after that every request is settled locally. Growth that would
//! run past the caller's stack is warned about but not refused; growth
//! past the ceiling is refused with the state left untouched.

use core::ffi::c_void;

use spin::Mutex;

use driftos_abi::syscall::{CONSOLE_FD, SYSCALL_BRK, SYSCALL_WRITE};

use crate::syscall::{KernelGate, SyscallGate};

/// Failure marker `sys_sbrk` hands back when the ceiling would be
/// exceeded, the conventional all-ones address.
pub const SBRK_FAILED: *mut c_void = usize::MAX as *mut c_void;

/// Fixed warning emitted straight through the WRITE syscall when a
/// growth request crosses the caller's stack position. Bypasses any
/// buffered output on purpose; the heap may be unusable at this point.
pub const HEAP_STACK_COLLISION_MSG: &[u8] = b"Heap and stack collision\n";

/// Access to linker-provided section symbols, isolated here so other
/// modules avoid raw `extern "C"` declarations.
mod externs {
    #[allow(non_upper_case_globals)]
    unsafe extern "C" {
        pub(crate) static _end: u8;
    }
}

/// Start of the dynamically growable heap, as placed by the linker.
#[inline]
pub fn heap_base() -> usize {
    (&raw const externs::_end) as usize
}

/// Process heap state: current break plus the lazily discovered
/// ceiling.
///
/// Owned state is explicit here rather than hidden in file-scope
/// statics; the process-wide instance lives behind [`sys_sbrk`], and
/// tests construct their own.
pub struct ProgramBreak {
    heap_base: usize,
    heap_end: usize,
    ceiling: Option<usize>,
}

impl ProgramBreak {
    pub const fn new(heap_base: usize) -> Self {
        Self {
            heap_base,
            heap_end: heap_base,
            ceiling: None,
        }
    }

    #[inline]
    pub fn heap_base(&self) -> usize {
        self.heap_base
    }

    #[inline]
    pub fn heap_end(&self) -> usize {
        self.heap_end
    }

    /// Ceiling learned from the kernel, if a request has triggered the
    /// query yet.
    #[inline]
    pub fn ceiling(&self) -> Option<usize> {
        self.ceiling
    }

    /// Adjust the break by `increment` bytes, returning the previous
    /// break on success: for a positive increment that is the address
    /// of the newly available region. `None` means the ceiling would
    /// be exceeded and nothing changed; repeating the same request
    /// yields the same answer.
    ///
    /// `stack_hint` is the caller's approximate stack position.
    /// Crossing it only earns a diagnostic on the console; the request
    /// still proceeds. A zero increment is a valid query of the
    /// current break, and negative increments shrink under the same
    /// checks.
    pub fn sbrk(
        &mut self,
        gate: &impl SyscallGate,
        increment: isize,
        stack_hint: usize,
    ) -> Option<usize> {
        let new_end = self.heap_end.checked_add_signed(increment)?;

        if new_end > stack_hint {
            let msg = HEAP_STACK_COLLISION_MSG;
            let _ = gate.syscall3(
                SYSCALL_WRITE,
                CONSOLE_FD,
                msg.as_ptr() as u64,
                msg.len() as u64,
            );
        }

        let ceiling = match self.ceiling {
            Some(ceiling) => ceiling,
            None => {
                // One query per process lifetime. The raw word comes
                // back as-is; a kernel-side refusal is not
                // distinguishable from a ceiling here.
                let ceiling = gate.syscall1(SYSCALL_BRK, 0) as usize;
                self.ceiling = Some(ceiling);
                ceiling
            }
        };

        if new_end > ceiling {
            return None;
        }

        let prev_end = self.heap_end;
        self.heap_end = new_end;
        Some(prev_end)
    }
}

static PROGRAM_BREAK: Mutex<Option<ProgramBreak>> = Mutex::new(None);

/// Newlib-contract heap growth entry point.
///
/// Returns the previous break, or [`SBRK_FAILED`] when the kernel's
/// ceiling would be exceeded. The last-error cell is left untouched on
/// failure.
pub extern "C" fn sys_sbrk(increment: isize) -> *mut c_void {
    // The argument's own address approximates the caller's stack
    // position for the collision check.
    let stack_hint = (&raw const increment) as usize;

    let mut slot = PROGRAM_BREAK.lock();
    let brk = slot.get_or_insert_with(|| ProgramBreak::new(heap_base()));
    match brk.sbrk(&KernelGate, increment, stack_hint) {
        Some(prev_end) => prev_end as *mut c_void,
        None => SBRK_FAILED,
    }
}
