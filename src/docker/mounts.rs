#![allow(clippy::module_name_repetitions)]
//! Bind mount mapping: user directories to unique folders under the container home.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::errors::EccoError;

/// Home directory of the image user; every mount lands directly below it.
pub const CONTAINER_HOME: &str = "/home/ecco";

/// One bind mount declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountSpec {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl MountSpec {
    /// Value for `--mount`: `type=bind,source=<src>,destination=<dst>`.
    ///
    /// Built from the raw OS strings so non-UTF-8 sources reach the runtime unchanged.
    pub fn to_flag_value(&self) -> OsString {
        let mut value = OsString::from("type=bind,source=");
        value.push(self.source.as_os_str());
        value.push(",destination=");
        value.push(self.destination.as_os_str());
        value
    }

    pub fn flag_pair(&self) -> [OsString; 2] {
        [OsString::from("--mount"), self.to_flag_value()]
    }
}

/// Destination folder names already handed out during this invocation.
#[derive(Debug, Default)]
pub struct MountRegistry {
    used: HashSet<String>,
}

impl MountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Map an already resolved absolute source to a destination under `home` and record it.
    pub fn assign(&mut self, source: &Path, home: &Path) -> Result<MountSpec, EccoError> {
        let components = normal_components(source);
        let name = choose_destination_name(&components, &self.used).ok_or_else(|| {
            EccoError::MountCollision {
                mount: source.display().to_string(),
                source: source.to_path_buf(),
            }
        })?;
        let destination = home.join(&name);
        self.used.insert(name);
        Ok(MountSpec {
            source: source.to_path_buf(),
            destination,
        })
    }
}

fn normal_components(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Pick the shortest unused hyphen-joined suffix of `components`.
///
/// Candidates grow from the deepest component towards the root:
/// `c`, `b-c`, `a-b-c`. Returns None when every candidate is taken
/// (or there are no components at all).
pub fn choose_destination_name(components: &[String], used: &HashSet<String>) -> Option<String> {
    components
        .iter()
        .rev()
        .scan(Vec::<&str>::new(), |suffix, part| {
            suffix.insert(0, part.as_str());
            Some(suffix.join("-"))
        })
        .find(|candidate| !used.contains(candidate))
}

/// Render the mapping line logged for each mount.
///
/// The resolved path is shown only when it differs from what the user typed.
pub fn mapping_line(input: &str, spec: &MountSpec) -> String {
    let resolved = spec.source.display().to_string();
    if resolved == input {
        format!("mount: {} => {}", resolved, spec.destination.display())
    } else {
        format!(
            "mount: {} => {} => {}",
            input,
            resolved,
            spec.destination.display()
        )
    }
}

/// Resolve and map every user mount in order.
///
/// Each successful mapping is handed to `on_mapped` (used for logging) before the next one.
/// The first collision aborts the whole batch.
pub fn map_mounts<F>(
    inputs: &[String],
    cwd: &Path,
    home: &Path,
    mut on_mapped: F,
) -> Result<Vec<MountSpec>, EccoError>
where
    F: FnMut(&str, &MountSpec),
{
    let mut registry = MountRegistry::new();
    let mut specs = Vec::with_capacity(inputs.len());
    for input in inputs {
        let source = crate::util::resolve_lenient(Path::new(input), cwd);
        let spec = registry.assign(&source, home).map_err(|e| match e {
            // Report the mount as the user typed it
            EccoError::MountCollision { source, .. } => EccoError::MountCollision {
                mount: input.clone(),
                source,
            },
            other => other,
        })?;
        on_mapped(input, &spec);
        specs.push(spec);
    }
    Ok(specs)
}
