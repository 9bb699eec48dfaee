//! Debugger attach detection and break support.
//!
//! Both operations are best-effort platform shims: on platforms without
//! support they are permitted to be no-ops, and callers must not rely on a
//! break actually occurring. The session configuration (`no_breaks`) gates
//! whether these are consulted at all.

/// Returns true when the current process is being traced by a debugger.
///
/// On Linux this reads the `TracerPid` field of `/proc/self/status`; any
/// non-zero pid means a tracer is attached. Other platforms report false.
pub fn is_debugger_attached() -> bool {
    #[cfg(target_os = "linux")]
    {
        tracer_pid().map(|pid| pid != 0).unwrap_or(false)
    }
    #[cfg(not(target_os = "linux"))]
    {
        false
    }
}

#[cfg(target_os = "linux")]
fn tracer_pid() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let line = status.lines().find(|l| l.starts_with("TracerPid:"))?;
    line.split_whitespace().nth(1)?.parse().ok()
}

/// Raises a breakpoint trap so an attached debugger regains control.
///
/// A no-op on architectures without a known trap instruction. Callers should
/// check [`is_debugger_attached`] first; trapping without a debugger attached
/// would crash the process.
pub fn break_into_debugger() {
    #[cfg(all(target_arch = "x86_64", not(miri)))]
    unsafe {
        std::arch::asm!("int3");
    }
    #[cfg(all(target_arch = "aarch64", not(miri)))]
    unsafe {
        std::arch::asm!("brk #0");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_detection_does_not_panic() {
        // Value depends on the environment; only the call itself is checked.
        let _ = is_debugger_attached();
    }
}
