#![allow(clippy::module_name_repetitions)]
//! Color mode configuration and ANSI painting helpers.
//!
//! Logging helpers policy (stderr one-liners):
//! - Every launcher message goes to stderr as a single line.
//! - `Kind::Log`, `Kind::Warn` and `Kind::Error` always print.
//! - `Kind::Docker` (container output echo) and `Kind::Info` print only in debug mode.
//! - Precompute once per scope and reuse:
//!     let use_err = ecco::color_enabled_stderr();
//! - Keep exact message strings; helpers only add color when enabled.

use clap::ValueEnum;
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicBool, Ordering};

/// Color mode selected with `--color` or `ECCO_COLOR`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

static COLOR_MODE: OnceCell<ColorMode> = OnceCell::new();
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

pub fn set_color_mode(mode: ColorMode) {
    let _ = COLOR_MODE.set(mode);
}

/// Enable or disable the debug-only log kinds for the rest of the process.
pub fn set_debug(enabled: bool) {
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
}

pub fn debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::SeqCst)
}

pub(crate) fn parse_color_mode(s: &str) -> Option<ColorMode> {
    match s.trim().to_ascii_lowercase().as_str() {
        "auto" => Some(ColorMode::Auto),
        "always" | "on" | "true" | "yes" => Some(ColorMode::Always),
        "never" | "off" | "false" | "no" => Some(ColorMode::Never),
        _ => None,
    }
}

fn env_color_mode_pref() -> Option<ColorMode> {
    std::env::var("ECCO_COLOR")
        .ok()
        .and_then(|v| parse_color_mode(&v))
}

fn no_color_env() -> bool {
    // Per https://no-color.org/
    std::env::var("NO_COLOR").is_ok()
}

fn resolve(mode: ColorMode, is_tty: bool) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => is_tty,
    }
}

fn color_enabled_for(is_tty: bool) -> bool {
    if no_color_env() {
        return false;
    }
    if let Some(mode) = COLOR_MODE.get().copied() {
        return resolve(mode, is_tty);
    }
    if let Some(env_mode) = env_color_mode_pref() {
        return resolve(env_mode, is_tty);
    }
    is_tty
}

pub fn color_enabled_stderr() -> bool {
    color_enabled_for(atty::is(atty::Stream::Stderr))
}

/// Wrap string with ANSI color code when enabled; otherwise return unchanged.
pub fn paint(enabled: bool, code: &str, s: &str) -> String {
    if enabled {
        format!("{code}{s}\x1b[0m")
    } else {
        s.to_string()
    }
}

/// Kind of a launcher log line; selects color and visibility.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Kind {
    /// Echoed container output.
    Docker,
    Info,
    Warn,
    Error,
    /// Regular user-facing progress line.
    Log,
}

impl Kind {
    pub fn ansi_code(self) -> &'static str {
        match self {
            Kind::Docker => "\x1b[90m",
            Kind::Info => "\x1b[34m",
            Kind::Warn => "\x1b[31m",
            Kind::Error => "\x1b[31;1m",
            Kind::Log => "\x1b[1m",
        }
    }

    /// Debug-only kinds are dropped unless debug mode is on.
    pub fn debug_only(self) -> bool {
        matches!(self, Kind::Docker | Kind::Info)
    }
}

/// Print one line of the given kind to stderr, honoring debug mode and color.
pub fn emit(use_color: bool, kind: Kind, msg: &str) {
    if kind.debug_only() && !debug_enabled() {
        return;
    }
    eprintln!("{}", paint(use_color, kind.ansi_code(), msg));
}

pub fn log_info_stderr(use_color: bool, msg: &str) {
    emit(use_color, Kind::Info, msg);
}

pub fn log_warn_stderr(use_color: bool, msg: &str) {
    emit(use_color, Kind::Warn, msg);
}

pub fn log_error_stderr(use_color: bool, msg: &str) {
    emit(use_color, Kind::Error, msg);
}

pub fn log_stderr(use_color: bool, msg: &str) {
    emit(use_color, Kind::Log, msg);
}
