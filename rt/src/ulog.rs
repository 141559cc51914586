//! Userland console diagnostics
//!
//! A small leveled logger for the runtime itself, writing through the
//! WRITE syscall path of whichever gate the caller is holding. The
//! heap collision warning deliberately does not come through here; it
//! is a fixed byte string that must reach the console unfiltered.

use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};

use driftos_abi::syscall::{CONSOLE_FD, SYSCALL_WRITE};

use crate::syscall::SyscallGate;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UlogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl UlogLevel {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => UlogLevel::Error,
            1 => UlogLevel::Warn,
            2 => UlogLevel::Info,
            _ => UlogLevel::Debug,
        }
    }
}

static CURRENT_LEVEL: AtomicU8 = AtomicU8::new(UlogLevel::Info as u8);

#[inline(always)]
fn is_enabled(level: UlogLevel) -> bool {
    level as u8 <= CURRENT_LEVEL.load(Ordering::Relaxed)
}

pub fn is_enabled_level(level: UlogLevel) -> bool {
    is_enabled(level)
}

pub fn ulog_set_level(level: UlogLevel) {
    CURRENT_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn ulog_get_level() -> UlogLevel {
    UlogLevel::from_raw(CURRENT_LEVEL.load(Ordering::Relaxed))
}

struct ConsoleWriter<'a, G: SyscallGate> {
    gate: &'a G,
}

impl<G: SyscallGate> fmt::Write for ConsoleWriter<'_, G> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let _ = self.gate.syscall3(
            SYSCALL_WRITE,
            CONSOLE_FD,
            s.as_ptr() as u64,
            s.len() as u64,
        );
        Ok(())
    }
}

pub fn log_args(gate: &impl SyscallGate, level: UlogLevel, args: fmt::Arguments<'_>) {
    if !is_enabled(level) {
        return;
    }
    let mut writer = ConsoleWriter { gate };
    let _ = fmt::write(&mut writer, args);
    let _ = fmt::Write::write_str(&mut writer, "\n");
}

#[macro_export]
macro_rules! ulog {
    ($gate:expr, $level:expr, $($arg:tt)*) => {{
        $crate::ulog::log_args($gate, $level, ::core::format_args!($($arg)*));
    }};
}

#[macro_export]
macro_rules! ulog_error {
    ($gate:expr, $($arg:tt)*) => {
        $crate::ulog::log_args($gate, $crate::ulog::UlogLevel::Error, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! ulog_warn {
    ($gate:expr, $($arg:tt)*) => {
        $crate::ulog::log_args($gate, $crate::ulog::UlogLevel::Warn, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! ulog_info {
    ($gate:expr, $($arg:tt)*) => {
        $crate::ulog::log_args($gate, $crate::ulog::UlogLevel::Info, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! ulog_debug {
    ($gate:expr, $($arg:tt)*) => {
        $crate::ulog::log_args($gate, $crate::ulog::UlogLevel::Debug, ::core::format_args!($($arg)*))
    };
}
