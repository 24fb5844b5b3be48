//! Helpers for spawning the phraugr binaries.
#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

/// Runs `binary` with `args` from `cwd`, with colour and custom filters off.
pub fn run_in<I, S>(binary: &str, cwd: &Path, args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_with_env(binary, cwd, args, &[])
}

/// Like [`run_in`], with extra environment variables.
pub fn run_with_env<I, S>(binary: &str, cwd: &Path, args: I, env: &[(&str, &str)]) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(binary);
    command
        .args(args)
        .current_dir(cwd)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("PHRAUGR_LOG_FORMAT");
    for (key, value) in env {
        command.env(key, value);
    }
    match command.output() {
        Ok(output) => output,
        Err(error) => panic!("failed to run {binary}: {error}"),
    }
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Panics with stderr attached unless the process succeeded.
pub fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!("expected success, got {:?}: {}", output.status, stderr_of(output));
    }
}

/// File names in `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(err) => panic!("failed to list {}: {err}", dir.display()),
    };
    names.sort();
    names
}
