//! Scripted kernel gate for exercising the runtime layer
//!
//! [`RecordingGate`] stands in for the kernel behind the
//! [`SyscallGate`] seam: it logs every invocation into a
//! fixed-capacity table and answers with configurable result words.
//! `trapping_on` models a syscall the kernel never returns from
//! (reboot) by panicking instead of answering, which a hosted test
//! harness can observe as the call not coming back.

use core::cell::RefCell;

use driftos_abi::syscall::{SYSCALL_BRK, SYSCALL_WRITE};

use crate::syscall::SyscallGate;

/// Upper bound on logged invocations per gate instance.
pub const RECORD_CAPACITY: usize = 32;

/// One marshalled syscall as the trampoline would have seen it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SyscallRecord {
    pub num: u64,
    pub args: [u64; 3],
}

struct RecordLog {
    entries: [SyscallRecord; RECORD_CAPACITY],
    len: usize,
}

pub struct RecordingGate {
    log: RefCell<RecordLog>,
    brk_result: i64,
    write_result: Option<i64>,
    default_result: i64,
    trap_on: Option<u64>,
}

impl RecordingGate {
    /// A gate that logs everything, reports a zero ceiling for BRK,
    /// and echoes the requested length back for WRITE.
    pub fn new() -> Self {
        Self {
            log: RefCell::new(RecordLog {
                entries: [SyscallRecord::default(); RECORD_CAPACITY],
                len: 0,
            }),
            brk_result: 0,
            write_result: None,
            default_result: 0,
            trap_on: None,
        }
    }

    /// Word handed back for BRK queries (the heap ceiling).
    pub fn with_brk_result(mut self, result: i64) -> Self {
        self.brk_result = result;
        self
    }

    /// Fixed word handed back for WRITE instead of echoing the length.
    pub fn with_write_result(mut self, result: i64) -> Self {
        self.write_result = Some(result);
        self
    }

    /// Word handed back for any syscall without specific handling.
    pub fn with_default_result(mut self, result: i64) -> Self {
        self.default_result = result;
        self
    }

    /// Treat `num` as a syscall the kernel never returns from: the
    /// invocation is logged, then the gate panics.
    pub fn trapping_on(mut self, num: u64) -> Self {
        self.trap_on = Some(num);
        self
    }

    pub fn call_count(&self) -> usize {
        self.log.borrow().len
    }

    /// The `idx`-th logged invocation; panics when out of range.
    pub fn call(&self, idx: usize) -> SyscallRecord {
        let log = self.log.borrow();
        assert!(idx < log.len, "no syscall was recorded at index {idx}");
        log.entries[idx]
    }

    /// How many logged invocations used syscall number `num`.
    pub fn count_of(&self, num: u64) -> usize {
        let log = self.log.borrow();
        log.entries[..log.len].iter().filter(|r| r.num == num).count()
    }
}

impl Default for RecordingGate {
    fn default() -> Self {
        Self::new()
    }
}

impl SyscallGate for RecordingGate {
    fn syscall3(&self, num: u64, arg0: u64, arg1: u64, arg2: u64) -> i64 {
        {
            let mut log = self.log.borrow_mut();
            if log.len < RECORD_CAPACITY {
                let idx = log.len;
                log.entries[idx] = SyscallRecord {
                    num,
                    args: [arg0, arg1, arg2],
                };
                log.len += 1;
            }
        }

        if self.trap_on == Some(num) {
            panic!("kernel did not return control from syscall {num}");
        }

        match num {
            SYSCALL_BRK => self.brk_result,
            SYSCALL_WRITE => self.write_result.unwrap_or(arg2 as i64),
            _ => self.default_result,
        }
    }
}
