//! Interrupt handling and cancellation tokens.
//!
//! The SIGINT handler only stores into an atomic; the scan loop polls a
//! `CancelToken` between waits and performs the actual shutdown work.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(unix)]
use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
extern "C" fn handle_sigint(_sig: i32) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Route SIGINT into the process-wide interrupt token instead of terminating.
#[cfg(unix)]
pub fn install_interrupt_handler() -> io::Result<()> {
    let act_int = SigAction::new(
        SigHandler::Handler(handle_sigint),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    // Safety: the handler only touches an atomic.
    let prev = unsafe { signal::sigaction(Signal::SIGINT, &act_int) };
    prev.map(|_| ()).map_err(io::Error::from)
}

#[cfg(not(unix))]
pub fn install_interrupt_handler() -> io::Result<()> {
    Ok(())
}

#[derive(Clone, Debug)]
enum Flag {
    Interrupt,
    Local(Arc<AtomicBool>),
}

/// Cloneable cancellation request flag.
#[derive(Clone, Debug)]
pub struct CancelToken {
    flag: Flag,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    /// A fresh token, independent of process signals.
    pub fn new() -> Self {
        Self {
            flag: Flag::Local(Arc::new(AtomicBool::new(false))),
        }
    }

    /// The token set by SIGINT once `install_interrupt_handler` ran.
    pub fn interrupt() -> Self {
        Self {
            flag: Flag::Interrupt,
        }
    }

    pub fn cancel(&self) {
        match &self.flag {
            Flag::Interrupt => INTERRUPTED.store(true, Ordering::SeqCst),
            Flag::Local(f) => f.store(true, Ordering::SeqCst),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        match &self.flag {
            Flag::Interrupt => INTERRUPTED.load(Ordering::SeqCst),
            Flag::Local(f) => f.load(Ordering::SeqCst),
        }
    }
}

/// Ask another process to interrupt itself (the tray helper's "quit").
#[cfg(unix)]
pub fn send_interrupt(pid: u32) -> io::Result<()> {
    let raw = i32::try_from(pid)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "pid out of range"))?;
    signal::kill(Pid::from_raw(raw), Signal::SIGINT).map_err(io::Error::from)
}

#[cfg(not(unix))]
pub fn send_interrupt(_pid: u32) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "interrupting another process is not supported on this platform",
    ))
}

/// Whether a process with this pid still exists.
#[cfg(unix)]
pub fn process_alive(pid: u32) -> bool {
    match i32::try_from(pid) {
        Ok(raw) => match signal::kill(Pid::from_raw(raw), None::<Signal>) {
            Ok(()) => true,
            Err(nix::errno::Errno::EPERM) => true,
            Err(_) => false,
        },
        Err(_) => false,
    }
}

#[cfg(not(unix))]
pub fn process_alive(_pid: u32) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_token_shared_between_clones() {
        let t = CancelToken::new();
        let t2 = t.clone();
        assert!(!t2.is_cancelled());
        t.cancel();
        assert!(t2.is_cancelled());
        assert!(!CancelToken::new().is_cancelled());
    }

    #[cfg(unix)]
    #[test]
    fn test_own_process_is_alive() {
        assert!(process_alive(std::process::id()));
    }
}
