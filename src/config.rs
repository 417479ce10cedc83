#![allow(clippy::module_name_repetitions)]
//! Defaults and environment overrides for the launcher.

use std::env;

/// Repository prefix of the published ecco image.
pub const DEFAULT_REPOSITORY: &str = "franckpommereau/";
pub const IMAGE_NAME: &str = "ecco";
pub const DEFAULT_TAG: &str = "latest";
pub const DEFAULT_USER: &str = "ecco";
pub const DEFAULT_WORKDIR: &str = "/home/ecco";
pub const DEFAULT_HOST_PORT: u16 = 8000;

/// Port the notebook server listens on inside the container.
pub const CONTAINER_PORT: u16 = 8000;

/// Container command used when none is given on the command line.
pub fn default_command() -> Vec<String> {
    [
        "jupyter-notebook",
        "--no-browser",
        "--port=8000",
        "--ip=0.0.0.0",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Normalize a repository prefix: "" for empty/whitespace; otherwise a single trailing '/'.
pub fn normalize_repository(raw: &str) -> String {
    let t = raw.trim();
    if t.is_empty() {
        String::new()
    } else {
        let mut s = t.trim_end_matches('/').to_string();
        s.push('/');
        s
    }
}

/// Repository prefix for this run.
///
/// `--local` always wins (empty prefix). Otherwise `ECCO_REPOSITORY` when set,
/// then a prefix baked in at build time, then the published default.
pub fn repository_prefix(local: bool) -> String {
    if local {
        return String::new();
    }
    if let Ok(v) = env::var("ECCO_REPOSITORY") {
        return normalize_repository(&v);
    }
    if let Some(baked) = option_env!("ECCO_BAKED_REPOSITORY") {
        return normalize_repository(baked);
    }
    DEFAULT_REPOSITORY.to_string()
}

/// `<prefix><name>:<tag>`
pub fn image_reference(prefix: &str, tag: &str) -> String {
    format!("{prefix}{IMAGE_NAME}:{tag}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_repository() {
        assert_eq!(normalize_repository(""), "");
        assert_eq!(normalize_repository("   "), "");
        assert_eq!(normalize_repository("me"), "me/");
        assert_eq!(normalize_repository("registry.local:5000/me//"), "registry.local:5000/me/");
    }

    #[test]
    fn test_local_has_no_prefix() {
        assert_eq!(repository_prefix(true), "");
    }

    #[test]
    fn test_image_reference() {
        assert_eq!(
            image_reference(DEFAULT_REPOSITORY, "0.4"),
            "franckpommereau/ecco:0.4"
        );
        assert_eq!(image_reference("", DEFAULT_TAG), "ecco:latest");
    }

    #[test]
    fn test_default_command_targets_container_port() {
        let cmd = default_command();
        assert_eq!(cmd[0], "jupyter-notebook");
        assert!(cmd.contains(&format!("--port={CONTAINER_PORT}")));
    }
}
