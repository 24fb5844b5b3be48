//! `chunk`: distribute the lines of a file at random over N chunk files.
//!
//! Parses arguments with clap, runs the chunker, and writes progress counts
//! to stdout when `--verbose` is given.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use phraugr_cli::{
    cli::{ChunkCli, run_chunk},
    entry,
};

fn try_main() -> Result<()> {
    let cli = ChunkCli::parse();
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    run_chunk(&cli, &mut writer)
        .with_context(|| format!("failed to chunk `{}`", cli.input_file.display()))?;
    writer.flush().context("failed to flush progress output")?;
    Ok(())
}

fn main() -> ExitCode {
    entry::execute("chunk", try_main)
}
