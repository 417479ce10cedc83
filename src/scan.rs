#![allow(clippy::module_name_repetitions)]
//! Output scanning: find the notebook URL in the container output exactly once.
//!
//! The scanner owns a one-way `ScanState` (`Waiting` -> `Captured`). Lines are
//! echoed in debug mode; the first line matching the local URL pattern fires
//! the one-shot actions (log, optional tray helper, optional browser).

use std::io;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use regex::Regex;

use crate::color::{self, Kind};
use crate::signal::CancelToken;

/// How long the loop waits for a line before re-checking for cancellation.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// `http://127.0.0.1:<port>/` followed by any non-whitespace.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    re: Regex,
}

impl UrlPattern {
    pub fn for_port(port: u16) -> Result<Self, regex::Error> {
        let re = Regex::new(&format!(r"http://127\.0\.0\.1:{port}/\S*"))?;
        Ok(Self { re })
    }

    /// First match in `line`, if any.
    pub fn find<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.re.find(line).map(|m| m.as_str())
    }
}

/// Whether the URL has been seen yet. Never goes back to `Waiting`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Waiting,
    Captured(String),
}

impl ScanState {
    /// Check one line. Returns the URL only on the `Waiting -> Captured` transition.
    pub fn observe(&mut self, line: &str, pattern: &UrlPattern) -> Option<String> {
        if let ScanState::Captured(_) = self {
            return None;
        }
        let url = pattern.find(line)?.to_string();
        *self = ScanState::Captured(url.clone());
        Some(url)
    }

    pub fn captured(&self) -> Option<&str> {
        match self {
            ScanState::Waiting => None,
            ScanState::Captured(url) => Some(url),
        }
    }
}

/// Side effects fired when the URL is captured.
pub trait UrlActions {
    fn open_browser(&mut self, url: &str) -> io::Result<()>;
    /// Start the tray helper; must return without waiting for it.
    fn start_tray(&mut self, parent_pid: u32, url: &str) -> io::Result<()>;
}

/// The scanned child process, as far as the scanner is concerned.
pub trait ChildControl {
    /// Ask the child to shut down gracefully.
    fn terminate(&mut self) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The output stream closed (child exited).
    Closed,
    /// Cancellation was requested; the child was asked to terminate.
    Interrupted,
}

#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub auto_browse: bool,
    pub tray: bool,
    /// Host side of the port mapping.
    ///
    /// The browser and the tray helper get the captured URL with its port
    /// replaced by this one (see [`browse_url`]), since the captured URL names
    /// the container port. The capture log line keeps the URL as printed.
    /// With the default `-p 8000` the two are identical.
    pub host_port: u16,
    pub parent_pid: u32,
}

/// Rewrite the port of a captured URL to the host port, keeping path and query.
pub fn browse_url(captured: &str, host_port: u16) -> String {
    match url::Url::parse(captured) {
        Ok(mut u) => {
            if u.port_or_known_default() == Some(host_port) {
                return captured.to_string();
            }
            if u.set_port(Some(host_port)).is_err() {
                return captured.to_string();
            }
            u.to_string()
        }
        Err(_) => captured.to_string(),
    }
}

pub struct OutputScanner<A: UrlActions> {
    pattern: UrlPattern,
    state: ScanState,
    settings: ScanSettings,
    actions: A,
    use_color: bool,
}

impl<A: UrlActions> OutputScanner<A> {
    pub fn new(pattern: UrlPattern, settings: ScanSettings, actions: A) -> Self {
        Self {
            pattern,
            state: ScanState::Waiting,
            settings,
            actions,
            use_color: color::color_enabled_stderr(),
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn actions(&self) -> &A {
        &self.actions
    }

    pub fn into_actions(self) -> A {
        self.actions
    }

    /// Echo one line and fire the one-shot actions if it carries the URL.
    pub fn handle_line(&mut self, line: &str) {
        color::emit(self.use_color, Kind::Docker, line.trim_end());
        if let Some(url) = self.state.observe(line, &self.pattern) {
            self.on_captured(&url);
        }
    }

    fn on_captured(&mut self, url: &str) {
        color::log_stderr(self.use_color, &format!("jupyter-notebook is at: {url}"));
        let target = browse_url(url, self.settings.host_port);
        if self.settings.tray {
            if let Err(e) = self.actions.start_tray(self.settings.parent_pid, &target) {
                color::log_warn_stderr(
                    self.use_color,
                    &format!("ecco: warning: could not start tray helper: {e}"),
                );
            }
        }
        if self.settings.auto_browse {
            color::log_info_stderr(self.use_color, "starting browser...");
            if let Err(e) = self.actions.open_browser(&target) {
                color::log_warn_stderr(
                    self.use_color,
                    &format!("ecco: warning: could not open browser: {e}"),
                );
            }
            self.settings.auto_browse = false;
        }
    }

    /// Consume lines until the sender side hangs up or `cancel` is set.
    ///
    /// Cancellation is checked before every line; once it is observed the
    /// child gets exactly one terminate request and no more lines are read.
    pub fn run<C: ChildControl>(
        &mut self,
        lines: &Receiver<String>,
        child: &mut C,
        cancel: &CancelToken,
    ) -> ScanOutcome {
        loop {
            if cancel.is_cancelled() {
                color::log_stderr(self.use_color, "terminating...");
                if let Err(e) = child.terminate() {
                    color::log_warn_stderr(
                        self.use_color,
                        &format!("ecco: warning: could not terminate container: {e}"),
                    );
                }
                return ScanOutcome::Interrupted;
            }
            match lines.recv_timeout(POLL_INTERVAL) {
                Ok(line) => self.handle_line(&line),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return ScanOutcome::Closed,
            }
        }
    }
}
