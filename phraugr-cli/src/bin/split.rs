//! `split`: divide the lines of a file at random between two output files.
//!
//! Progress counts are written to stdout every 100,000 lines.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use phraugr_cli::{
    cli::{SplitCli, run_split},
    entry,
};

fn try_main() -> Result<()> {
    let cli = SplitCli::parse();
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    run_split(&cli, &mut writer)
        .with_context(|| format!("failed to split `{}`", cli.input_file.display()))?;
    writer.flush().context("failed to flush progress output")?;
    Ok(())
}

fn main() -> ExitCode {
    entry::execute("split", try_main)
}
