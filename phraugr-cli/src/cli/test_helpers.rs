//! Small helpers shared across CLI tests.

use std::ffi::OsString;
use std::path::Path;

use clap::Parser;

use super::{ChunkCli, SplitCli};

/// Parses `chunk` arguments, prefixing the binary name.
pub(super) fn chunk_cli<I, T>(args: I) -> ChunkCli
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv = std::iter::once(OsString::from("chunk")).chain(args.into_iter().map(Into::into));
    match ChunkCli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(err) => panic!("chunk arguments must parse: {err}"),
    }
}

/// Parses `split` arguments, prefixing the binary name.
pub(super) fn split_cli<I, T>(args: I) -> SplitCli
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv = std::iter::once(OsString::from("split")).chain(args.into_iter().map(Into::into));
    match SplitCli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(err) => panic!("split arguments must parse: {err}"),
    }
}

pub(super) fn os(path: &Path) -> OsString {
    path.as_os_str().to_owned()
}
