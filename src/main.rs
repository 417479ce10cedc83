use clap::Parser;
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ecco::config::{default_command, image_reference, repository_prefix, CONTAINER_PORT};
use ecco::{
    color_enabled_stderr, container_runtime_path, log_error_stderr, log_info_stderr, log_stderr,
    map_mounts, mapping_line, run_session, CancelToken, DesktopActions, EccoError,
    OutputScanner, RunOptions, ScanSettings, UrlPattern, CONTAINER_HOME,
};

mod cli;

use cli::Cli;

fn build_run_options(cli: &Cli, use_err: bool) -> Result<RunOptions, EccoError> {
    let cwd = env::current_dir()?;
    let mounts = map_mounts(&cli.mount, &cwd, Path::new(CONTAINER_HOME), |input, spec| {
        log_stderr(use_err, &mapping_line(input, spec));
    })?;

    let runtime = match container_runtime_path() {
        Ok(p) => p,
        // A preview does not need the runtime to exist
        Err(_) if cli.dry_run => PathBuf::from("docker"),
        Err(e) => return Err(EccoError::RuntimeNotFound(e)),
    };

    let command = if cli.cmd.is_empty() {
        default_command()
    } else {
        cli.cmd.clone()
    };

    Ok(RunOptions {
        runtime,
        host_port: cli.port,
        user: cli.user.clone(),
        workdir: cli.chdir.clone(),
        mounts,
        image: image_reference(&repository_prefix(cli.local), &cli.tag),
        command,
    })
}

fn launch(cli: &Cli) -> Result<u8, EccoError> {
    let use_err = color_enabled_stderr();
    let opts = build_run_options(cli, use_err)?;
    let preview = ecco::build_docker_preview(&opts);

    if cli.dry_run {
        log_stderr(use_err, &format!("ecco: docker: {preview}"));
        log_stderr(use_err, "ecco: dry-run requested; not executing Docker.");
        return Ok(0);
    }

    log_stderr(use_err, "starting Docker");
    log_info_stderr(use_err, &format!("running: {preview}"));

    ecco::install_interrupt_handler()?;
    let pattern = UrlPattern::for_port(CONTAINER_PORT)
        .map_err(|e| EccoError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, e)))?;
    let scanner = OutputScanner::new(
        pattern,
        ScanSettings {
            auto_browse: !cli.no_browse,
            tray: cli.gui,
            host_port: cli.port,
            parent_pid: std::process::id(),
        },
        DesktopActions::new(),
    );

    let report = run_session(&opts, scanner, &CancelToken::interrupt())?;
    let code = report.exit_code();
    report.actions.shutdown();
    Ok(code)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(mode) = cli.color {
        ecco::set_color_mode(mode);
    }
    ecco::set_debug(cli.debug);

    #[cfg(feature = "otel")]
    let _ = ecco::telemetry::telemetry_init();

    // Helper mode: the process was started by a launcher to offer tray actions
    if let (Some(pid), Some(url)) = (cli.tray_parent, cli.tray_url.as_deref()) {
        return match ecco::tray::run_helper(pid, url) {
            Ok(()) => ExitCode::from(0),
            Err(e) => {
                log_error_stderr(color_enabled_stderr(), &format!("ecco: tray: {e:#}"));
                ExitCode::from(1)
            }
        };
    }

    match launch(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            log_error_stderr(color_enabled_stderr(), &e.to_string());
            ExitCode::from(ecco::exit_code_for_ecco_error(&e))
        }
    }
}
