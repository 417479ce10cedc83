use std::fs;
use std::path::{Component, Path, PathBuf};

/// Resolve `input` to an absolute path with symlinks resolved, without requiring it to exist.
///
/// Relative inputs are joined onto `cwd`. The longest existing prefix is
/// canonicalized; the remaining components are appended lexically
/// (`.` is dropped, `..` pops one component).
pub fn resolve_lenient(input: &Path, cwd: &Path) -> PathBuf {
    let abs = if input.is_absolute() {
        input.to_path_buf()
    } else {
        cwd.join(input)
    };

    let mut resolved = PathBuf::new();
    let mut pending: Vec<Component<'_>> = abs.components().collect();
    pending.reverse();

    // Canonicalize while the path still exists on disk
    while let Some(comp) = pending.pop() {
        match comp {
            Component::Prefix(_) | Component::RootDir => resolved.push(comp.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                let candidate = resolved.join(name);
                match fs::canonicalize(&candidate) {
                    Ok(canon) => resolved = canon,
                    Err(_) => {
                        resolved = candidate;
                        break;
                    }
                }
            }
        }
    }

    // Rest is lexical
    while let Some(comp) = pending.pop() {
        match comp {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => resolved.push(name),
        }
    }
    resolved
}
