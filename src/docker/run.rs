#![allow(clippy::module_name_repetitions)]
//! Docker `run` command construction and preview rendering.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

#[cfg(feature = "otel")]
use tracing::instrument;

use crate::config::CONTAINER_PORT;
use crate::docker::mounts::MountSpec;

/// Everything needed to build one container run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub runtime: PathBuf,
    pub host_port: u16,
    pub user: String,
    pub workdir: String,
    pub mounts: Vec<MountSpec>,
    pub image: String,
    pub command: Vec<String>,
}

fn collect_port_flags(host_port: u16) -> Vec<OsString> {
    vec![
        OsString::from("-p"),
        OsString::from(format!("{host_port}:{CONTAINER_PORT}")),
    ]
}

fn collect_user_flags(user: &str, workdir: &str) -> Vec<OsString> {
    vec![
        OsString::from("-u"),
        OsString::from(user),
        OsString::from("-w"),
        OsString::from(workdir),
    ]
}

fn collect_mount_flags(mounts: &[MountSpec]) -> Vec<OsString> {
    mounts.iter().flat_map(MountSpec::flag_pair).collect()
}

/// Arguments after the runtime binary, in fixed order:
/// `run -p <port>:8000 -u <user> -w <dir> [--mount ...]... <image> <cmd>...`
pub fn build_run_args(opts: &RunOptions) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![OsString::from("run")];
    args.extend(collect_port_flags(opts.host_port));
    args.extend(collect_user_flags(&opts.user, &opts.workdir));
    args.extend(collect_mount_flags(&opts.mounts));
    args.push(OsString::from(&opts.image));
    args.extend(opts.command.iter().map(OsString::from));
    args
}

/// Full argv (runtime first) as strings, for previews and diagnostics.
pub fn preview_args(opts: &RunOptions) -> Vec<String> {
    let mut out = vec![opts.runtime.display().to_string()];
    out.extend(
        build_run_args(opts)
            .into_iter()
            .map(|a| a.to_string_lossy().to_string()),
    );
    out
}

/// Shell-quoted one-line preview of the command.
pub fn build_docker_preview(opts: &RunOptions) -> String {
    crate::util::shell_join(&preview_args(opts))
}

#[cfg_attr(
    feature = "otel",
    instrument(
        level = "info",
        skip(opts),
        fields(ecco_image = %opts.image, ecco_mounts = opts.mounts.len())
    )
)]
/// Build the runtime `Command` and its preview string. Stdio is left for the caller.
pub fn build_docker_cmd(opts: &RunOptions) -> (Command, String) {
    let mut cmd = Command::new(&opts.runtime);
    cmd.args(build_run_args(opts));
    (cmd, build_docker_preview(opts))
}
