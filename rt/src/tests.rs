use std::panic::{AssertUnwindSafe, catch_unwind};

use driftos_abi::stat::{FSTAT_PLACEHOLDER_MODE, FileMode, FileStat, ProcessTimes};
use driftos_abi::syscall::{
    CONSOLE_FD, REBOOT_MAGIC_1, REBOOT_MAGIC_2, SYSCALL_BRK, SYSCALL_REBOOT, SYSCALL_WRITE,
};
use driftos_abi::Errno;

use crate::api;
use crate::errno::{clear_errno, errno};
use crate::heap::{HEAP_STACK_COLLISION_MSG, ProgramBreak, heap_base};
use crate::power::reboot_request;
use crate::testing::RecordingGate;
use crate::ulog::{UlogLevel, log_args, ulog_get_level, ulog_set_level};

const HEAP_BASE: usize = 0x1000;
const CEILING: usize = 0x9000;
const STACK_FAR_AWAY: usize = 0x0010_0000;

fn test_break() -> (ProgramBreak, RecordingGate) {
    let brk = ProgramBreak::new(HEAP_BASE);
    let gate = RecordingGate::new().with_brk_result(CEILING as i64);
    (brk, gate)
}

#[test]
fn test_heap_base_is_a_linker_address() {
    // The linker places the heap start; a fresh break sits exactly there.
    let base = heap_base();
    assert_ne!(base, 0);
    assert_eq!(ProgramBreak::new(base).heap_end(), base);
}

#[test]
fn test_grow_returns_previous_end_and_advances() {
    let (mut brk, gate) = test_break();

    assert_eq!(brk.sbrk(&gate, 0x800, STACK_FAR_AWAY), Some(HEAP_BASE));
    assert_eq!(brk.heap_end(), HEAP_BASE + 0x800);

    assert_eq!(brk.sbrk(&gate, 0x100, STACK_FAR_AWAY), Some(HEAP_BASE + 0x800));
    assert_eq!(brk.heap_end(), HEAP_BASE + 0x900);
}

#[test]
fn test_grow_zero_is_a_query() {
    let (mut brk, gate) = test_break();

    assert_eq!(brk.sbrk(&gate, 0x200, STACK_FAR_AWAY), Some(HEAP_BASE));
    let end = brk.heap_end();
    assert_eq!(brk.sbrk(&gate, 0, STACK_FAR_AWAY), Some(end));
    assert_eq!(brk.heap_end(), end);
}

#[test]
fn test_negative_increment_shrinks() {
    let (mut brk, gate) = test_break();

    brk.sbrk(&gate, 0x800, STACK_FAR_AWAY).unwrap();
    let end = brk.heap_end();
    assert_eq!(brk.sbrk(&gate, -0x200, STACK_FAR_AWAY), Some(end));
    assert_eq!(brk.heap_end(), end - 0x200);
}

#[test]
fn test_ceiling_rejection_is_idempotent() {
    let (mut brk, gate) = test_break();
    let too_much = (CEILING - HEAP_BASE + 1) as isize;

    assert_eq!(brk.sbrk(&gate, too_much, STACK_FAR_AWAY), None);
    assert_eq!(brk.heap_end(), HEAP_BASE);
    assert_eq!(brk.sbrk(&gate, too_much, STACK_FAR_AWAY), None);
    assert_eq!(brk.heap_end(), HEAP_BASE);

    // Rejection still leaves the ceiling cached from the single query.
    assert_eq!(gate.count_of(SYSCALL_BRK), 1);
    assert_eq!(brk.ceiling(), Some(CEILING));
}

#[test]
fn test_ceiling_is_queried_at_most_once() {
    let (mut brk, gate) = test_break();

    brk.sbrk(&gate, 0x100, STACK_FAR_AWAY).unwrap();
    brk.sbrk(&gate, 0x100, STACK_FAR_AWAY).unwrap();
    brk.sbrk(&gate, 0, STACK_FAR_AWAY).unwrap();

    assert_eq!(gate.count_of(SYSCALL_BRK), 1);
}

#[test]
fn test_stack_collision_warns_but_proceeds() {
    let (mut brk, gate) = test_break();
    let stack_hint = HEAP_BASE + 0x10;

    // Crosses the stack hint but stays under the ceiling.
    assert_eq!(brk.sbrk(&gate, 0x100, stack_hint), Some(HEAP_BASE));
    assert_eq!(brk.heap_end(), HEAP_BASE + 0x100);

    // First invocation on the gate is the warning, straight through
    // the WRITE path, before the ceiling query.
    let warning = gate.call(0);
    assert_eq!(warning.num, SYSCALL_WRITE);
    assert_eq!(warning.args[0], CONSOLE_FD);
    assert_eq!(warning.args[2], HEAP_STACK_COLLISION_MSG.len() as u64);
    let emitted = unsafe {
        core::slice::from_raw_parts(warning.args[1] as *const u8, warning.args[2] as usize)
    };
    assert_eq!(emitted, HEAP_STACK_COLLISION_MSG);
    assert_eq!(gate.call(1).num, SYSCALL_BRK);
}

#[test]
fn test_overflowing_increment_is_rejected_without_kernel_traffic() {
    let mut brk = ProgramBreak::new(usize::MAX - 8);
    let gate = RecordingGate::new().with_brk_result(i64::MAX);

    assert_eq!(brk.sbrk(&gate, isize::MAX, STACK_FAR_AWAY), None);
    assert_eq!(brk.heap_end(), usize::MAX - 8);
    assert_eq!(gate.call_count(), 0);
}

#[test]
fn test_write_reports_full_length_regardless_of_kernel() {
    // Kernel claims to have accepted 2 bytes; the shim reports all 6.
    let gate = RecordingGate::new().with_write_result(2);
    let buf = *b"Hello\n";

    let written = api::write_via(&gate, 1, buf.as_ptr().cast(), buf.len());
    assert_eq!(written, 6);

    let call = gate.call(0);
    assert_eq!(call.num, SYSCALL_WRITE);
    assert_eq!(call.args[0], 1);
    assert_eq!(call.args[2], 6);
}

#[test]
fn test_write_forwards_empty_buffers() {
    let gate = RecordingGate::new();
    let written = api::write_via(&gate, 1, core::ptr::null(), 0);
    assert_eq!(written, 0);
    assert_eq!(gate.call(0).args[2], 0);
}

#[test]
fn test_reboot_does_not_return() {
    let gate = RecordingGate::new().trapping_on(SYSCALL_REBOOT);

    let outcome = catch_unwind(AssertUnwindSafe(|| reboot_request(&gate)));
    assert!(outcome.is_err(), "reboot must be observed as non-returning");

    let last = gate.call(gate.call_count() - 1);
    assert_eq!(last.num, SYSCALL_REBOOT);
    assert_eq!(last.args[0], REBOOT_MAGIC_1);
    assert_eq!(last.args[1], REBOOT_MAGIC_2);
    assert_eq!(last.args[2], 0);
}

#[test]
fn test_reboot_result_surfaces_when_kernel_declines() {
    let gate = RecordingGate::new().with_default_result(-1);
    assert_eq!(reboot_request(&gate), -1);
}

// The last-error cell and the log level are process-wide, so every
// assertion touching them lives in a single test.
#[test]
fn test_stub_surface_contract() {
    use core::ptr;

    clear_errno();

    // Failures that record no errno value.
    assert_eq!(api::sys_close(3), -1);
    assert_eq!(api::sys_open(ptr::null(), 0, 0), -1);
    let mut times = ProcessTimes::default();
    assert_eq!(api::sys_times(&mut times), -1);
    assert_eq!(errno(), 0);

    // Each unimplementable capability reports its one fixed errno.
    assert_eq!(api::sys_execve(ptr::null(), ptr::null(), ptr::null()), -1);
    assert_eq!(errno(), Errno::OutOfMemory.as_c_int());
    assert_eq!(api::sys_fork(), -1);
    assert_eq!(errno(), Errno::TryAgain.as_c_int());
    assert_eq!(api::sys_kill(1, 9), -1);
    assert_eq!(errno(), Errno::InvalidArgument.as_c_int());
    assert_eq!(api::sys_link(ptr::null(), ptr::null()), -1);
    assert_eq!(errno(), Errno::TooManyLinks.as_c_int());
    assert_eq!(api::sys_unlink(ptr::null()), -1);
    assert_eq!(errno(), Errno::NoSuchFile.as_c_int());
    assert_eq!(api::sys_wait(ptr::null_mut()), -1);
    assert_eq!(errno(), Errno::NoChild.as_c_int());

    // Constant successes.
    assert_eq!(api::sys_getpid(), 1);
    assert_eq!(api::sys_isatty(0), 1);
    assert_eq!(api::sys_lseek(0, 42, 1), 0);
    let mut buf = [0u8; 8];
    assert_eq!(api::sys_read(0, buf.as_mut_ptr().cast(), buf.len()), 0);

    let mut st = FileStat::default();
    assert_eq!(unsafe { api::sys_fstat(5, &mut st) }, 0);
    assert_eq!(st.st_mode, FSTAT_PLACEHOLDER_MODE);

    let mut st = FileStat::default();
    assert_eq!(unsafe { api::sys_stat(ptr::null(), &mut st) }, 0);
    assert_eq!(st.st_mode, FileMode::CHAR_DEVICE.bits());

    // Exit is a no-op; control comes straight back.
    api::sys_exit(0);

    // Heap growth failure leaves the cell untouched, unlike every
    // failing stub above.
    clear_errno();
    let mut brk = ProgramBreak::new(HEAP_BASE);
    let gate = RecordingGate::new().with_brk_result(HEAP_BASE as i64);
    assert_eq!(brk.sbrk(&gate, 0x100, STACK_FAR_AWAY), None);
    assert_eq!(errno(), 0);
}

#[test]
fn test_ulog_levels_filter_console_traffic() {
    let gate = RecordingGate::new();

    ulog_set_level(UlogLevel::Info);
    assert_eq!(ulog_get_level(), UlogLevel::Info);

    log_args(&gate, UlogLevel::Info, format_args!("runtime: up"));
    let after_info = gate.call_count();
    assert!(after_info > 0);
    assert_eq!(gate.call(0).num, SYSCALL_WRITE);
    assert_eq!(gate.call(0).args[0], CONSOLE_FD);

    log_args(&gate, UlogLevel::Debug, format_args!("runtime: hidden"));
    assert_eq!(gate.call_count(), after_info);

    ulog_set_level(UlogLevel::Error);
    log_args(&gate, UlogLevel::Info, format_args!("runtime: hidden"));
    assert_eq!(gate.call_count(), after_info);

    ulog_set_level(UlogLevel::Info);
}
