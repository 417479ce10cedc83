#![cfg(unix)]

use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use ecco::scan::UrlActions;
use ecco::{
    run_session, CancelToken, OutputScanner, RunOptions, ScanOutcome, ScanSettings, ScanState,
    UrlPattern,
};

#[derive(Default, Debug)]
struct Recorded {
    browsed: Vec<String>,
    trays: Vec<(u32, String)>,
}

impl UrlActions for Recorded {
    fn open_browser(&mut self, url: &str) -> io::Result<()> {
        self.browsed.push(url.to_string());
        Ok(())
    }

    fn start_tray(&mut self, parent_pid: u32, url: &str) -> io::Result<()> {
        self.trays.push((parent_pid, url.to_string()));
        Ok(())
    }
}

fn write_runtime(dir: &Path, body: &str) -> PathBuf {
    let p = dir.join("fake-docker");
    std::fs::write(&p, format!("#!/bin/sh\n{body}\n")).expect("write script");
    let mut perms = std::fs::metadata(&p).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&p, perms).unwrap();
    p
}

fn options(runtime: PathBuf) -> RunOptions {
    RunOptions {
        runtime,
        host_port: 8000,
        user: "ecco".to_string(),
        workdir: "/home/ecco".to_string(),
        mounts: Vec::new(),
        image: "ecco:latest".to_string(),
        command: ecco::default_command(),
    }
}

fn scanner(tray: bool) -> OutputScanner<Recorded> {
    OutputScanner::new(
        UrlPattern::for_port(8000).unwrap(),
        ScanSettings {
            auto_browse: true,
            tray,
            host_port: 8000,
            parent_pid: std::process::id(),
        },
        Recorded::default(),
    )
}

#[test]
fn test_session_captures_url_from_stderr_and_reports_exit_code() {
    let td = tempfile::tempdir().expect("tmpdir");
    let rt = write_runtime(
        td.path(),
        r#"echo "starting $1 $2 $3"
echo "Notebook is running at http://127.0.0.1:8000/?token=abc" 1>&2
echo "again http://127.0.0.1:8000/?token=zzz"
exit 3"#,
    );

    let report = run_session(&options(rt), scanner(true), &CancelToken::new()).expect("session");

    assert_eq!(report.outcome, ScanOutcome::Closed);
    assert_eq!(
        report.state,
        ScanState::Captured("http://127.0.0.1:8000/?token=abc".to_string())
    );
    assert_eq!(report.actions.browsed, vec!["http://127.0.0.1:8000/?token=abc"]);
    assert_eq!(report.actions.trays.len(), 1);
    assert_eq!(report.actions.trays[0].0, std::process::id());
    assert_eq!(report.exit_code(), 3);
}

#[test]
fn test_session_interrupt_terminates_child() {
    let td = tempfile::tempdir().expect("tmpdir");
    let rt = write_runtime(td.path(), "echo ready\nexec sleep 30");

    let cancel = CancelToken::new();
    let c2 = cancel.clone();
    let h = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(300));
        c2.cancel();
    });

    let start = Instant::now();
    let report = run_session(&options(rt), scanner(false), &cancel).expect("session");
    h.join().unwrap();

    assert_eq!(report.outcome, ScanOutcome::Interrupted);
    assert_eq!(report.state, ScanState::Waiting);
    assert!(report.actions.browsed.is_empty());
    assert_eq!(report.exit_code(), 0);
    assert!(
        start.elapsed() < Duration::from_secs(10),
        "child was not terminated gracefully: {:?}",
        start.elapsed()
    );
    let status = report.status.expect("child reaped");
    assert!(!status.success());
}

#[test]
fn test_session_missing_runtime_is_spawn_error() {
    let td = tempfile::tempdir().expect("tmpdir");
    let missing = td.path().join("no-such-runtime");
    let err = run_session(&options(missing), scanner(false), &CancelToken::new())
        .expect_err("spawn must fail");
    assert_eq!(ecco::exit_code_for_ecco_error(&err), 127);
    assert!(err.to_string().contains("no-such-runtime run -p 8000:8000"), "{err}");
}
