//! One-time floating point control-mode setup.
//!
//! Denormal arithmetic is far slower than normal arithmetic on x86 and
//! the renderer routinely produces near-zero throughput values, so the
//! SSE control register is switched to flush-to-zero / denormals-are-
//! zero once at startup, before any render thread exists. Worker
//! threads inherit the mode from the spawning thread on all supported
//! platforms.

/// Enable flush-to-zero and denormals-are-zero in the MXCSR register.
#[cfg(target_arch = "x86_64")]
pub fn flush_denormals() {
    // MXCSR bit 15 = FTZ, bit 6 = DAZ
    const FTZ_DAZ: u32 = (1 << 15) | (1 << 6);

    unsafe {
        let mut mxcsr: u32 = 0;
        std::arch::asm!(
            "stmxcsr [{ptr}]",
            ptr = in(reg) &mut mxcsr as *mut u32,
            options(nostack)
        );
        mxcsr |= FTZ_DAZ;
        std::arch::asm!(
            "ldmxcsr [{ptr}]",
            ptr = in(reg) &mxcsr as *const u32,
            options(nostack)
        );
    }

    log::debug!("Enabled flush-to-zero / denormals-are-zero");
}

#[cfg(not(target_arch = "x86_64"))]
pub fn flush_denormals() {}
