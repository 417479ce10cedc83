//! Real one-shot actions: the system browser and the tray helper process.

use std::io;

use crate::scan::UrlActions;
use crate::tray::{self, TrayHandle};

#[derive(Debug, Default)]
pub struct DesktopActions {
    tray: Option<TrayHandle>,
}

impl DesktopActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the tray helper if one was started.
    pub fn shutdown(self) {
        if let Some(t) = self.tray {
            t.stop();
        }
    }
}

impl UrlActions for DesktopActions {
    fn open_browser(&mut self, url: &str) -> io::Result<()> {
        webbrowser::open(url)
    }

    fn start_tray(&mut self, parent_pid: u32, url: &str) -> io::Result<()> {
        if self.tray.is_none() {
            self.tray = Some(tray::spawn_helper(parent_pid, url)?);
        }
        Ok(())
    }
}
