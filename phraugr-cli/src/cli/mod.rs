//! Command-line interface for the `chunk` and `split` tools.
//!
//! Each binary parses its own clap struct, maps it onto the matching core
//! builder, and streams the input once. Progress counts are written to the
//! caller's writer so the binaries can point them at `stdout`.

mod commands;

pub use commands::{ChunkCli, CliError, HeaderArgs, SplitCli, run_chunk, run_split};

#[cfg(test)]
mod test_helpers;
