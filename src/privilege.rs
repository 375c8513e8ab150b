//! Best-effort privilege reduction for the two binaries.
//!
//! The original tool uses OpenBSD's `pledge(2)` to narrow its own syscall
//! surface once argument parsing is done. There is no Linux equivalent
//! with comparable ergonomics, and a seccomp-bpf filter is out of
//! proportion to what this crate needs, so this only asks the kernel to
//! never grant the process new privileges via `prctl(PR_SET_NO_NEW_PRIVS)`
//! — advisory, best-effort, a no-op everywhere but Linux.

/// Ask the kernel to prevent this process (and its children) from ever
/// gaining privileges beyond what it has now. Failure is logged, not
/// fatal: this narrows the attack surface, it does not gate correctness.
#[cfg(target_os = "linux")]
pub fn drop_new_privileges() {
    let rc = unsafe { libc::prctl(libc::PR_SET_NO_NEW_PRIVS, 1, 0, 0, 0) };
    if rc != 0 {
        eprintln!(
            "warning: prctl(PR_SET_NO_NEW_PRIVS) failed: {}",
            std::io::Error::last_os_error()
        );
    }
}

#[cfg(not(target_os = "linux"))]
pub fn drop_new_privileges() {}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;

    #[test]
    fn drop_new_privileges_does_not_panic() {
        drop_new_privileges();
    }
}
