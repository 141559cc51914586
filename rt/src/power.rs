//! Reboot request path
//!
//! Reboot is the only way execution ends on this target; process exit
//! is a no-op. The kernel demands both magic words and simply ignores
//! the request otherwise.

use driftos_abi::syscall::{REBOOT_MAGIC_1, REBOOT_MAGIC_2, SYSCALL_REBOOT};

use crate::syscall::{KernelGate, SyscallGate};
use crate::ulog_info;

/// Ask the kernel to reboot through `gate`.
///
/// On success the call never comes back; the returned word is only
/// observable when the kernel declines.
pub fn reboot_request(gate: &impl SyscallGate) -> i64 {
    ulog_info!(gate, "runtime: requesting system reboot");
    gate.syscall2(SYSCALL_REBOOT, REBOOT_MAGIC_1, REBOOT_MAGIC_2)
}

/// Reboot the machine. Parks in a spin loop if the kernel refuses,
/// since there is nowhere sensible left to go.
pub extern "C" fn sys_reboot() -> ! {
    let _ = reboot_request(&KernelGate);
    loop {
        core::hint::spin_loop();
    }
}
