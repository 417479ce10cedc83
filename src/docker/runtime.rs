#![allow(clippy::module_name_repetitions)]
//! Container runtime discovery.

use std::env;
use std::io;
use std::path::PathBuf;

use which::which;

/// Locate the container runtime binary.
///
/// `ECCO_CONTAINER_RUNTIME` names an explicit binary (path or name looked up in PATH);
/// otherwise `docker` is searched in PATH.
pub fn container_runtime_path() -> io::Result<PathBuf> {
    // Allow tests or callers to explicitly disable Docker detection to avoid hard failures
    if env::var("ECCO_SKIP_DOCKER").ok().as_deref() == Some("1") {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            "Docker disabled by environment override.",
        ));
    }

    if let Ok(name) = env::var("ECCO_CONTAINER_RUNTIME") {
        let name = name.trim();
        if !name.is_empty() {
            return which(name).map_err(|_| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("container runtime '{name}' (ECCO_CONTAINER_RUNTIME) was not found."),
                )
            });
        }
    }

    if let Ok(p) = which("docker") {
        return Ok(p);
    }
    Err(io::Error::new(
        io::ErrorKind::NotFound,
        "Docker is required but was not found in PATH.",
    ))
}
