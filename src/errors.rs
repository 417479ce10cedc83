//! Error mapping guide:
//! - Map io::ErrorKind::NotFound to exit code 127; all others to 1.
//! - A mount collision is fatal and happens before any process is spawned.
//! - An interrupted run is not an error; see `scan::ScanOutcome::Interrupted`.
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Map an io::Error to a process exit code:
/// - 127 for NotFound (command not found)
/// - 1 for all other errors
pub fn exit_code_for_io_error(e: &io::Error) -> u8 {
    if e.kind() == io::ErrorKind::NotFound {
        127
    } else {
        1
    }
}

#[derive(Debug)]
pub enum EccoError {
    /// No unused destination name could be built for this mount.
    /// `mount` is the path as given on the command line, `source` the resolved one.
    MountCollision { mount: String, source: PathBuf },
    /// The container runtime binary could not be located.
    RuntimeNotFound(io::Error),
    /// The child process could not be started; `command` is the shell-quoted preview.
    ChildSpawn { command: String, source: io::Error },
    Io(io::Error),
}

impl From<io::Error> for EccoError {
    fn from(e: io::Error) -> Self {
        EccoError::Io(e)
    }
}

impl fmt::Display for EccoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EccoError::MountCollision { mount, .. } => {
                write!(f, "could not build a mountpoint for {mount}")
            }
            EccoError::RuntimeNotFound(e) => write!(f, "{e}"),
            EccoError::ChildSpawn { command, source } => {
                write!(f, "failed to start {command}: {source}")
            }
            EccoError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EccoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EccoError::MountCollision { .. } => None,
            EccoError::RuntimeNotFound(e) | EccoError::Io(e) => Some(e),
            EccoError::ChildSpawn { source, .. } => Some(source),
        }
    }
}

/// Convert EccoError to exit code (parity with io::Error mapping).
pub fn exit_code_for_ecco_error(e: &EccoError) -> u8 {
    match e {
        EccoError::MountCollision { .. } => 1,
        EccoError::RuntimeNotFound(_) => 127,
        EccoError::ChildSpawn { source, .. } => exit_code_for_io_error(source),
        EccoError::Io(ioe) => exit_code_for_io_error(ioe),
    }
}
