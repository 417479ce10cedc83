#![allow(clippy::module_name_repetitions)]
//! Docker command construction, bind mount mapping and runtime detection.

pub mod mounts;
pub mod run;
pub mod runtime;

pub use mounts::{map_mounts, mapping_line, MountRegistry, MountSpec, CONTAINER_HOME};
pub use run::{build_docker_cmd, build_docker_preview, RunOptions};
pub use runtime::container_runtime_path;
