#![allow(clippy::module_name_repetitions)]
//! Desktop integration helper.
//!
//! The helper runs as a separate process (`ecco --tray-parent <pid> --tray-url <url>`)
//! and shares nothing with the launcher after spawn. It offers two actions read
//! from its stdin: `o` opens the notebook in the browser, `q` interrupts the
//! launcher and exits. It also exits on its own once the launcher is gone.

use std::env;
use std::io;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::color;

/// How often the helper checks that the launcher is still alive.
pub const PARENT_POLL: Duration = Duration::from_millis(250);

/// Launcher-side handle of a running helper.
#[derive(Debug)]
pub struct TrayHandle {
    child: Child,
}

impl TrayHandle {
    /// Stop the helper and reap it.
    pub fn stop(mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Start the helper from the current executable without waiting for it.
pub fn spawn_helper(parent_pid: u32, url: &str) -> io::Result<TrayHandle> {
    let exe = env::current_exe()?;
    let child = Command::new(exe)
        .arg("--tray-parent")
        .arg(parent_pid.to_string())
        .arg("--tray-url")
        .arg(url)
        .stdin(Stdio::inherit())
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn()?;
    Ok(TrayHandle { child })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    OpenInBrowser,
    Quit,
}

pub fn parse_action(input: &str) -> Option<TrayAction> {
    match input.trim().to_ascii_lowercase().as_str() {
        "o" | "open" => Some(TrayAction::OpenInBrowser),
        "q" | "quit" => Some(TrayAction::Quit),
        _ => None,
    }
}

/// What the helper does for each action; the real one opens a browser and signals the launcher.
pub trait TrayBackend {
    fn open(&mut self, url: &str) -> io::Result<()>;
    fn interrupt_parent(&mut self, parent_pid: u32) -> io::Result<()>;
    fn parent_alive(&self, parent_pid: u32) -> bool;
}

pub struct SystemTray;

impl TrayBackend for SystemTray {
    fn open(&mut self, url: &str) -> io::Result<()> {
        webbrowser::open(url)
    }

    fn interrupt_parent(&mut self, parent_pid: u32) -> io::Result<()> {
        crate::signal::send_interrupt(parent_pid)
    }

    fn parent_alive(&self, parent_pid: u32) -> bool {
        crate::signal::process_alive(parent_pid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Perform one action. Quitting always ends the helper, even if the signal failed.
pub fn dispatch<B: TrayBackend>(
    action: TrayAction,
    parent_pid: u32,
    url: &str,
    backend: &mut B,
) -> Result<Flow> {
    match action {
        TrayAction::OpenInBrowser => {
            backend
                .open(url)
                .with_context(|| format!("failed to open {url}"))?;
            Ok(Flow::Continue)
        }
        TrayAction::Quit => {
            backend
                .interrupt_parent(parent_pid)
                .with_context(|| format!("failed to interrupt ecco (pid {parent_pid})"))?;
            Ok(Flow::Exit)
        }
    }
}

/// Helper main loop over already-split input lines.
pub fn serve<B: TrayBackend>(
    parent_pid: u32,
    url: &str,
    input: Receiver<String>,
    backend: &mut B,
) -> Result<()> {
    let use_err = color::color_enabled_stderr();
    let mut input = Some(input);
    loop {
        if !backend.parent_alive(parent_pid) {
            return Ok(());
        }
        let Some(rx) = input.as_ref() else {
            thread::sleep(PARENT_POLL);
            continue;
        };
        match rx.recv_timeout(PARENT_POLL) {
            Ok(line) => match parse_action(&line) {
                Some(action) => {
                    let quitting = action == TrayAction::Quit;
                    match dispatch(action, parent_pid, url, backend) {
                        Ok(Flow::Exit) => return Ok(()),
                        Ok(Flow::Continue) => {}
                        Err(e) if quitting => return Err(e),
                        Err(e) => color::log_warn_stderr(use_err, &format!("ecco: tray: {e:#}")),
                    }
                }
                None if line.trim().is_empty() => {}
                None => color::log_warn_stderr(
                    use_err,
                    &format!("ecco: tray: unknown action '{}' (use o or q)", line.trim()),
                ),
            },
            Err(RecvTimeoutError::Timeout) => {}
            // No more input: keep watching the launcher only
            Err(RecvTimeoutError::Disconnected) => input = None,
        }
    }
}

/// Entry point of the helper process.
pub fn run_helper(parent_pid: u32, url: &str) -> Result<()> {
    let use_err = color::color_enabled_stderr();
    color::log_stderr(
        use_err,
        &format!("ecco: {url} -- [o]pen in browser, [q]uit"),
    );
    let (rx, _reader) = crate::session::spawn_line_reader(io::stdin())
        .context("failed to read tray actions from stdin")?;
    serve(parent_pid, url, rx, &mut SystemTray)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[derive(Default)]
    struct FakeBackend {
        opened: Vec<String>,
        interrupted: Vec<u32>,
        alive: bool,
    }

    impl TrayBackend for FakeBackend {
        fn open(&mut self, url: &str) -> io::Result<()> {
            self.opened.push(url.to_string());
            Ok(())
        }

        fn interrupt_parent(&mut self, parent_pid: u32) -> io::Result<()> {
            self.interrupted.push(parent_pid);
            Ok(())
        }

        fn parent_alive(&self, _parent_pid: u32) -> bool {
            self.alive
        }
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action("o\n"), Some(TrayAction::OpenInBrowser));
        assert_eq!(parse_action(" OPEN "), Some(TrayAction::OpenInBrowser));
        assert_eq!(parse_action("q"), Some(TrayAction::Quit));
        assert_eq!(parse_action("x"), None);
    }

    #[test]
    fn test_serve_open_then_quit() {
        let (tx, rx) = mpsc::channel();
        for l in ["o\n", "bogus\n", "\n", "o\n", "q\n", "o\n"] {
            tx.send(l.to_string()).unwrap();
        }
        let mut b = FakeBackend {
            alive: true,
            ..Default::default()
        };
        serve(77, "http://127.0.0.1:8000/", rx, &mut b).unwrap();
        assert_eq!(b.opened.len(), 2);
        assert_eq!(b.interrupted, vec![77]);
    }

    #[test]
    fn test_serve_exits_when_parent_gone() {
        let (_tx, rx) = mpsc::channel::<String>();
        let mut b = FakeBackend::default();
        serve(77, "http://127.0.0.1:8000/", rx, &mut b).unwrap();
        assert!(b.interrupted.is_empty());
    }
}
