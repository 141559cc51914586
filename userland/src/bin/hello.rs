#![no_std]
#![no_main]

use driftos_rt::syscall::KernelGate;
use driftos_userland::hello::hello_main;

#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    loop {}
}

#[unsafe(no_mangle)]
pub extern "C" fn _start() -> ! {
    hello_main(&KernelGate);
    loop {}
}
