//! Process entry glue shared by the `chunk` and `split` binaries.
//!
//! Initialises logging, runs the command body, and maps failures to an exit
//! code after logging them with their stable error code.

use std::process::ExitCode;

use tracing::{error, field};

use crate::{
    cli::CliError,
    logging::{self, LoggingError},
};

/// Runs `body` with logging installed and converts its outcome into an
/// [`ExitCode`].
///
/// Failures are logged at `error` level with the full context chain and,
/// when the root cause is a [`CliError`], its stable code.
pub fn execute(tool: &'static str, body: impl FnOnce() -> anyhow::Result<()>) -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    match body() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err
                .downcast_ref::<CliError>()
                .map(|cli_error| field::display(cli_error.code().as_str()));
            let message = describe(&err);
            error!(tool, error = %message, code, "command execution failed");
            ExitCode::FAILURE
        }
    }
}

/// Joins the context chain of `err` into one line.
fn describe(err: &anyhow::Error) -> String {
    format!("{err:#}")
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
