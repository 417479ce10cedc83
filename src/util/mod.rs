#![allow(clippy::module_name_repetitions)]
//! Small utilities: shell quoting for command previews and lenient path resolution.

pub mod fs;

pub use fs::resolve_lenient;

pub fn shell_join(args: &[String]) -> String {
    args.iter()
        .map(|a| shell_escape(a))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn shell_escape(s: &str) -> String {
    if s.is_empty() {
        "''".to_string()
    } else if s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_=./:@,".contains(c))
    {
        s.to_string()
    } else {
        let escaped = s.replace('\'', "'\"'\"'");
        format!("'{}'", escaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_escape_plain_and_quoted() {
        assert_eq!(shell_escape(""), "''");
        assert_eq!(
            shell_escape("type=bind,source=/a,destination=/home/ecco/a"),
            "type=bind,source=/a,destination=/home/ecco/a"
        );
        assert_eq!(shell_escape("a b"), "'a b'");
        assert_eq!(shell_escape("it's"), "'it'\"'\"'s'");
    }

    #[test]
    fn test_shell_join() {
        let v = vec!["docker".to_string(), "run".to_string(), "x y".to_string()];
        assert_eq!(shell_join(&v), "docker run 'x y'");
    }
}
