//! Support library for the `chunk` and `split` binaries.
//!
//! Re-exports the CLI module so integration tests can drive a command
//! without forking a subprocess, and hosts the shared logging and process
//! entry glue used by both binaries.

pub mod cli;
pub mod entry;
pub mod logging;
