//! ecco launcher library: docker command construction, bind mount mapping,
//! output scanning for the notebook URL and the desktop helper.

pub mod actions;
pub mod color;
pub mod config;
pub mod docker;
pub mod errors;
pub mod scan;
pub mod session;
pub mod signal;
#[cfg(feature = "otel")]
pub mod telemetry;
pub mod tray;
pub mod util;

pub use actions::DesktopActions;
pub use color::{
    color_enabled_stderr, log_error_stderr, log_info_stderr, log_stderr, log_warn_stderr, paint,
    set_color_mode, set_debug, ColorMode, Kind,
};
pub use config::{default_command, image_reference, repository_prefix};
pub use docker::{
    build_docker_cmd, build_docker_preview, container_runtime_path, map_mounts, mapping_line,
    MountRegistry, MountSpec, RunOptions, CONTAINER_HOME,
};
pub use errors::{exit_code_for_ecco_error, exit_code_for_io_error, EccoError};
pub use scan::{OutputScanner, ScanOutcome, ScanSettings, ScanState, UrlPattern};
pub use session::{run_session, SessionReport};
pub use signal::{install_interrupt_handler, CancelToken};
pub use util::{shell_escape, shell_join};
