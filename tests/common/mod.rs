use std::process::{Command, Output};

/// Run the ecco binary with a clean, color-free environment.
pub fn run_ecco(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let bin = env!("CARGO_BIN_EXE_ecco");
    let mut cmd = Command::new(bin);
    cmd.args(args)
        .env("NO_COLOR", "1")
        .env_remove("ECCO_REPOSITORY")
        .env_remove("ECCO_CONTAINER_RUNTIME")
        .env_remove("ECCO_COLOR");
    for (k, v) in envs {
        cmd.env(k, v);
    }
    cmd.output().expect("failed to run ecco")
}

#[allow(dead_code)]
pub fn stderr_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}
