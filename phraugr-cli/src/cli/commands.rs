//! Argument parsing and command execution for the phraugr tools.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser};
use phraugr_core::{
    Chunker, ChunkerBuilder, PartitionError, PartitionErrorCode, RunSummary, Seed, Splitter,
    SplitterBuilder,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Header handling flags shared by both tools.
#[derive(Debug, Args, Clone, Copy, Default)]
pub struct HeaderArgs {
    /// Discard the first line of the input.
    #[arg(short = 's', long = "skip_headers", visible_alias = "skip-headers")]
    pub skip_headers: bool,

    /// Write the first line of the input to every output.
    #[arg(short = 'c', long = "copy_headers", visible_alias = "copy-headers")]
    pub copy_headers: bool,
}

/// Options accepted by the `chunk` tool.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "chunk",
    version,
    about = "Distribute the lines of a file uniformly at random over N chunk files.",
    after_help = "Chunks are named <stem>_001.<ext> through <stem>_<N>.<ext>."
)]
pub struct ChunkCli {
    /// File to read lines from.
    pub input_file: PathBuf,

    /// Number of chunk files to create (1 to 100,000).
    pub num_chunks: usize,

    /// Seed text; every run with the same text produces the same chunks.
    #[arg(short = 'r', long = "random_seed", visible_alias = "random-seed", value_name = "SEED")]
    pub random_seed: Option<String>,

    /// Print the running line count every 100,000 lines.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Header handling.
    #[command(flatten)]
    pub header: HeaderArgs,

    /// Directory for the chunk files (defaults to the current directory).
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// Options accepted by the `split` tool.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "split",
    version,
    about = "Split the lines of a file at random between two output files."
)]
pub struct SplitCli {
    /// File to read lines from.
    pub input_file: PathBuf,

    /// Receives lines whose draw exceeds the probability.
    pub output_file1: PathBuf,

    /// Receives every other line.
    pub output_file2: PathBuf,

    /// Threshold compared with each line's draw.
    #[arg(short = 'p', long, default_value_t = 0.9, value_name = "P")]
    pub probability: f64,

    /// Seed text; every run with the same text produces the same split.
    #[arg(short = 'r', long = "random_seed", visible_alias = "random-seed", value_name = "SEED")]
    pub random_seed: Option<String>,

    /// Header handling.
    #[command(flatten)]
    pub header: HeaderArgs,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    /// Configuring or running the partition failed.
    #[error(transparent)]
    Core(#[from] PartitionError),
}

impl CliError {
    /// Stable code of the underlying core error.
    #[must_use]
    pub const fn code(&self) -> PartitionErrorCode {
        match self {
            Self::Core(err) => err.code(),
        }
    }
}

pub(super) fn chunker_from(cli: &ChunkCli) -> Result<Chunker, CliError> {
    let mut builder = ChunkerBuilder::new(&cli.input_file)
        .with_chunks(cli.num_chunks)
        .with_header_flags(cli.header.skip_headers, cli.header.copy_headers)
        .with_seed(Seed::from(cli.random_seed.clone()))
        .with_progress(cli.verbose);
    if let Some(dir) = &cli.output_dir {
        builder = builder.with_output_dir(dir);
    }
    Ok(builder.build()?)
}

pub(super) fn splitter_from(cli: &SplitCli) -> Result<Splitter, CliError> {
    let splitter = SplitterBuilder::new(&cli.input_file, &cli.output_file1, &cli.output_file2)
        .with_probability(cli.probability)
        .with_header_flags(cli.header.skip_headers, cli.header.copy_headers)
        .with_seed(Seed::from(cli.random_seed.clone()))
        .build()?;
    Ok(splitter)
}

/// Executes the `chunk` tool, writing progress counts to `progress` when
/// `--verbose` is set.
///
/// # Errors
/// Returns [`CliError`] when the configuration is invalid or the partition
/// fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::ffi::OsString;
/// # use clap::Parser;
/// # use phraugr_cli::cli::{ChunkCli, run_chunk};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let input = dir.path().join("data.csv");
/// std::fs::write(&input, "id\n1\n2\n")?;
/// let cli = ChunkCli::try_parse_from([
///     OsString::from("chunk"),
///     input.clone().into_os_string(),
///     OsString::from("2"),
///     OsString::from("--skip_headers"),
///     OsString::from("--output-dir"),
///     dir.path().as_os_str().to_owned(),
/// ])?;
/// let summary = run_chunk(&cli, std::io::sink())?;
/// assert_eq!(summary.report.lines_written(), 2);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.chunk",
    err(level = "debug"),
    skip(cli, progress),
    fields(input = %cli.input_file.display(), chunks = cli.num_chunks, header = field::Empty),
)]
pub fn run_chunk(cli: &ChunkCli, progress: impl Write) -> Result<RunSummary, CliError> {
    let chunker = chunker_from(cli)?;
    Span::current().record("header", field::display(chunker.header()));
    let summary = chunker.run(progress)?;
    info!(
        outputs = summary.outputs.len(),
        lines = summary.report.lines_read,
        "chunk command completed"
    );
    Ok(summary)
}

/// Executes the `split` tool, writing progress counts to `progress`.
///
/// # Errors
/// Returns [`CliError`] when the configuration is invalid or the partition
/// fails.
#[instrument(
    name = "cli.split",
    err(level = "debug"),
    skip(cli, progress),
    fields(input = %cli.input_file.display(), probability = cli.probability, header = field::Empty),
)]
pub fn run_split(cli: &SplitCli, progress: impl Write) -> Result<RunSummary, CliError> {
    let splitter = splitter_from(cli)?;
    Span::current().record("header", field::display(splitter.header()));
    let summary = splitter.run(progress)?;
    info!(
        first = summary.report.per_output.first().copied().unwrap_or_default(),
        second = summary.report.per_output.get(1).copied().unwrap_or_default(),
        "split command completed"
    );
    Ok(summary)
}
