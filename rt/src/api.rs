//! Newlib-style shim surface
//!
//! The fixed set of entry points a hosted C library expects from the
//! operating system underneath it. The target implements almost none
//! of the capabilities involved, so every function here is a
//! constant-behavior stub except `sys_write` (forwards to the WRITE
//! syscall) and `sys_sbrk` (see [`crate::heap`]). The stubs report
//! plausible success or failure so buffered I/O and the allocator keep
//! working even though the capability does not exist.

use core::ffi::{c_char, c_int, c_void};

use driftos_abi::stat::{FSTAT_PLACEHOLDER_MODE, FileMode, FileStat, ProcessTimes};
use driftos_abi::syscall::SYSCALL_WRITE;
use driftos_abi::Errno;

use crate::errno::set_errno;
use crate::syscall::{KernelGate, SyscallGate};

/// Define stubs for capabilities the target permanently lacks: each
/// records its one fixed errno value and reports failure, for any
/// input, with no other side effect.
macro_rules! errno_stub {
    ($( $(#[$meta:meta])* $name:ident( $($arg:ident : $ty:ty),* $(,)? ) => $err:expr; )*) => {
        paste::paste! { $(
            $(#[$meta])*
            pub extern "C" fn [<sys_ $name>]( $( $arg : $ty ),* ) -> c_int {
                $( let _ = &$arg; )*
                set_errno($err);
                -1
            }
        )* }
    };
}

errno_stub! {
    /// There is no program loader; executing anything is refused.
    execve(path: *const c_char, argv: *const *const c_char, envp: *const *const c_char) => Errno::OutOfMemory;
    /// Single-process target; there is never capacity for a second one.
    fork() => Errno::TryAgain;
    /// No signal delivery exists to carry the request.
    kill(pid: c_int, sig: c_int) => Errno::InvalidArgument;
    link(old: *const c_char, new: *const c_char) => Errno::TooManyLinks;
    unlink(path: *const c_char) => Errno::NoSuchFile;
    /// No children can exist, so there is nothing to wait for.
    wait(status: *mut c_int) => Errno::NoChild;
}

/// Process exit is a no-op: the target has no process model, so a
/// hosted program's request to terminate does not stop execution.
/// Callers must not rely on control ending here.
pub extern "C" fn sys_exit(status: c_int) {
    let _ = status;
}

/// Always fails; no errno value is recorded for this one.
pub extern "C" fn sys_close(fd: c_int) -> c_int {
    let _ = fd;
    -1
}

/// Always succeeds with a fixed, non-meaningful mode so the library
/// treats the descriptor as something it can keep using.
///
/// # Safety
/// `st` must point to writable memory for a [`FileStat`].
pub unsafe extern "C" fn sys_fstat(fd: c_int, st: *mut FileStat) -> c_int {
    let _ = fd;
    unsafe {
        *st = FileStat {
            st_mode: FSTAT_PLACEHOLDER_MODE,
            ..FileStat::default()
        };
    }
    0
}

/// The one and only process id.
pub extern "C" fn sys_getpid() -> c_int {
    1
}

/// Every descriptor claims to be a terminal; console output is the
/// only real sink.
pub extern "C" fn sys_isatty(fd: c_int) -> c_int {
    let _ = fd;
    1
}

/// Seeking is meaningless without files; reports offset 0 regardless.
pub extern "C" fn sys_lseek(fd: c_int, offset: c_int, whence: c_int) -> c_int {
    let _ = (fd, offset, whence);
    0
}

/// Always fails; no errno value is recorded for this one.
pub extern "C" fn sys_open(path: *const c_char, flags: c_int, mode: c_int) -> c_int {
    let _ = (path, flags, mode);
    -1
}

/// Always reports end of input.
pub extern "C" fn sys_read(fd: c_int, buf: *mut c_void, len: usize) -> isize {
    let _ = (fd, buf, len);
    0
}

/// Always succeeds, reporting a character device; paths do not resolve
/// to anything else here.
///
/// # Safety
/// `st` must point to writable memory for a [`FileStat`].
pub unsafe extern "C" fn sys_stat(path: *const c_char, st: *mut FileStat) -> c_int {
    let _ = path;
    unsafe {
        *st = FileStat {
            st_mode: FileMode::CHAR_DEVICE.bits(),
            ..FileStat::default()
        };
    }
    0
}

/// No per-process accounting exists; always fails, errno untouched.
pub extern "C" fn sys_times(buf: *mut ProcessTimes) -> c_int {
    let _ = buf;
    -1
}

/// Forward a buffer to the console through `gate`.
///
/// The kernel's actual byte count is discarded and the full requested
/// length reported back: the console is treated as infallible. That is
/// the contract the rest of the layer was built against.
pub fn write_via(gate: &impl SyscallGate, fd: c_int, buf: *const c_void, len: usize) -> isize {
    let _ = gate.syscall3(SYSCALL_WRITE, fd as u64, buf as u64, len as u64);
    len as isize
}

/// Console write; reports the full requested length for any `len >= 0`
/// (see [`write_via`]).
pub extern "C" fn sys_write(fd: c_int, buf: *const c_void, len: usize) -> isize {
    write_via(&KernelGate, fd, buf, len)
}
