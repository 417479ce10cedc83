#![allow(clippy::module_name_repetitions)]
//! One container session: spawn with merged output, scan it, shut it down.

use std::io::{self, BufRead, BufReader, Read};
use std::process::{Child, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

#[cfg(unix)]
use nix::sys::signal::{kill, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

#[cfg(feature = "otel")]
use tracing::instrument;

use crate::docker::{build_docker_cmd, RunOptions};
use crate::errors::EccoError;
use crate::scan::{ChildControl, OutputScanner, ScanOutcome, ScanState, UrlActions};
use crate::signal::CancelToken;

/// How long an interrupted child gets to exit after SIGTERM before it is killed.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Read `source` line by line on a background thread and forward each line.
///
/// Invalid UTF-8 is replaced, never fatal. The thread ends on EOF, on a read
/// error, or when the receiving side is dropped.
pub fn spawn_line_reader<R>(source: R) -> io::Result<(Receiver<String>, JoinHandle<()>)>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let handle = thread::Builder::new()
        .name("ecco-output".to_string())
        .spawn(move || {
            let mut reader = BufReader::new(source);
            let mut buf: Vec<u8> = Vec::new();
            loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf) {
                    Ok(0) => break,
                    Ok(_) => {
                        let line = String::from_utf8_lossy(&buf).into_owned();
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(_) => break,
                }
            }
        })?;
    Ok((rx, handle))
}

/// The spawned runtime process.
pub struct RunningChild {
    child: Child,
}

impl RunningChild {
    pub fn wait(&mut self) -> io::Result<ExitStatus> {
        self.child.wait()
    }

    /// Wait up to `grace` for the child to exit, then kill it.
    pub fn wait_or_kill(&mut self, grace: Duration) -> io::Result<ExitStatus> {
        let deadline = Instant::now() + grace;
        loop {
            if let Some(status) = self.child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                let _ = self.child.kill();
                return self.child.wait();
            }
            thread::sleep(Duration::from_millis(25));
        }
    }
}

impl ChildControl for RunningChild {
    #[cfg(unix)]
    fn terminate(&mut self) -> io::Result<()> {
        let pid = i32::try_from(self.child.id())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "pid out of range"))?;
        kill(Pid::from_raw(pid), Signal::SIGTERM).map_err(io::Error::from)
    }

    #[cfg(not(unix))]
    fn terminate(&mut self) -> io::Result<()> {
        self.child.kill()
    }
}

/// What a finished session reports back.
#[derive(Debug)]
pub struct SessionReport<A> {
    pub outcome: ScanOutcome,
    pub state: ScanState,
    /// Exit status of the runtime process, once it was reaped.
    pub status: Option<ExitStatus>,
    pub actions: A,
}

impl<A> SessionReport<A> {
    /// Launcher exit code: 0 after an interrupt, otherwise the child's code.
    pub fn exit_code(&self) -> u8 {
        match self.outcome {
            ScanOutcome::Interrupted => 0,
            ScanOutcome::Closed => match self.status.and_then(|s| s.code()) {
                Some(code) => u8::try_from(code).unwrap_or(1),
                None => 1,
            },
        }
    }
}

#[cfg_attr(
    feature = "otel",
    instrument(
        level = "info",
        skip(opts, scanner, cancel),
        fields(ecco_image = %opts.image)
    )
)]
/// Spawn the runtime with stdout and stderr merged into one pipe and scan it to the end.
pub fn run_session<A: UrlActions>(
    opts: &RunOptions,
    mut scanner: OutputScanner<A>,
    cancel: &CancelToken,
) -> Result<SessionReport<A>, EccoError> {
    let (mut cmd, preview) = build_docker_cmd(opts);

    let (pipe_reader, pipe_writer) = io::pipe()?;
    let pipe_writer_err = pipe_writer.try_clone()?;
    cmd.stdout(Stdio::from(pipe_writer))
        .stderr(Stdio::from(pipe_writer_err));

    let child = cmd.spawn().map_err(|source| EccoError::ChildSpawn {
        command: preview.clone(),
        source,
    })?;
    // Close our copies of the write end so EOF arrives when the child exits
    drop(cmd);

    let mut running = RunningChild { child };
    let (lines, reader_thread) = spawn_line_reader(pipe_reader)?;

    let outcome = scanner.run(&lines, &mut running, cancel);
    let status = match outcome {
        ScanOutcome::Closed => {
            let status = running.wait()?;
            let _ = reader_thread.join();
            Some(status)
        }
        ScanOutcome::Interrupted => {
            drop(lines);
            Some(running.wait_or_kill(SHUTDOWN_GRACE)?)
        }
    };

    let state = scanner.state().clone();
    Ok(SessionReport {
        outcome,
        state,
        status,
        actions: scanner.into_actions(),
    })
}
