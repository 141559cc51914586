//! Write-then-reboot demo
//!
//! Issues a console write and then a reboot straight through the
//! trampoline's fixed-arity forms, demonstrating the raw kernel
//! contract with no runtime shim in between.

use driftos_abi::syscall::{
    CONSOLE_FD, REBOOT_MAGIC_1, REBOOT_MAGIC_2, SYSCALL_REBOOT, SYSCALL_WRITE,
};
use driftos_rt::syscall::SyscallGate;

pub const GREETING: &[u8] = b"Hello\n";

/// Greet the console, then ask the kernel to reboot. Only returns,
/// with the kernel's answer word, if the reboot is declined.
pub fn hello_main(gate: &impl SyscallGate) -> i64 {
    let _ = gate.syscall3(
        SYSCALL_WRITE,
        CONSOLE_FD,
        GREETING.as_ptr() as u64,
        GREETING.len() as u64,
    );
    gate.syscall2(SYSCALL_REBOOT, REBOOT_MAGIC_1, REBOOT_MAGIC_2)
}

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use driftos_rt::testing::RecordingGate;

    use super::*;

    #[test]
    fn test_demo_writes_then_reboots() {
        let gate = RecordingGate::new().trapping_on(SYSCALL_REBOOT);

        let outcome = catch_unwind(AssertUnwindSafe(|| hello_main(&gate)));
        assert!(outcome.is_err(), "reboot must not come back");

        assert_eq!(gate.call_count(), 2);

        let write = gate.call(0);
        assert_eq!(write.num, SYSCALL_WRITE);
        assert_eq!(write.args[0], CONSOLE_FD);
        assert_eq!(write.args[2], 6);

        let reboot = gate.call(1);
        assert_eq!(reboot.num, SYSCALL_REBOOT);
        assert_eq!(reboot.args[0], REBOOT_MAGIC_1);
        assert_eq!(reboot.args[1], REBOOT_MAGIC_2);
    }

    #[test]
    fn test_demo_surfaces_declined_reboot() {
        let gate = RecordingGate::new().with_default_result(-1);
        assert_eq!(hello_main(&gate), -1);
        assert_eq!(gate.call_count(), 2);
    }
}
