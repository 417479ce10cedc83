mod common;

use common::{run_ecco, stderr_of};

#[test]
fn test_cli_dry_run_default_command_preview() {
    let out = run_ecco(&["--dry-run"], &[("ECCO_SKIP_DOCKER", "1")]);
    let err = stderr_of(&out);
    assert!(
        out.status.success(),
        "ecco --dry-run exited non-zero: {:?}\nstderr:\n{}",
        out.status.code(),
        err
    );
    assert!(
        err.contains(
            "ecco: docker: docker run -p 8000:8000 -u ecco -w /home/ecco franckpommereau/ecco:latest jupyter-notebook --no-browser --port=8000 --ip=0.0.0.0"
        ),
        "unexpected preview:\n{}",
        err
    );
    assert!(!err.contains("starting Docker"), "dry-run must not start:\n{err}");
}

#[test]
fn test_cli_dry_run_flags_and_custom_command() {
    let out = run_ecco(
        &[
            "--dry-run", "-t", "0.4", "-p", "8888", "-u", "root", "-c", "/tmp", "--", "bash", "-l",
        ],
        &[("ECCO_SKIP_DOCKER", "1")],
    );
    let err = stderr_of(&out);
    assert!(out.status.success(), "stderr:\n{err}");
    assert!(
        err.contains("docker run -p 8888:8000 -u root -w /tmp franckpommereau/ecco:0.4 bash -l"),
        "unexpected preview:\n{}",
        err
    );
}

#[test]
fn test_cli_local_and_repository_override() {
    let out = run_ecco(&["--dry-run", "-l"], &[("ECCO_SKIP_DOCKER", "1")]);
    let err = stderr_of(&out);
    assert!(err.contains(" ecco:latest jupyter-notebook"), "stderr:\n{err}");

    let out = run_ecco(
        &["--dry-run"],
        &[("ECCO_SKIP_DOCKER", "1"), ("ECCO_REPOSITORY", "registry.local/team")],
    );
    let err = stderr_of(&out);
    assert!(
        err.contains(" registry.local/team/ecco:latest "),
        "stderr:\n{err}"
    );

    // --local wins over the environment
    let out = run_ecco(
        &["--dry-run", "--local"],
        &[("ECCO_SKIP_DOCKER", "1"), ("ECCO_REPOSITORY", "registry.local/team")],
    );
    let err = stderr_of(&out);
    assert!(err.contains(" ecco:latest "), "stderr:\n{err}");
    assert!(!err.contains("registry.local"), "stderr:\n{err}");
}

#[test]
fn test_cli_missing_runtime_exits_127() {
    let out = run_ecco(&[], &[("ECCO_SKIP_DOCKER", "1")]);
    assert_eq!(out.status.code(), Some(127), "stderr:\n{}", stderr_of(&out));
}
