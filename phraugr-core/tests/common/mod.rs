//! Helpers shared by the core integration tests.
#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::path::Path;

use phraugr_core::{Chunker, ChunkerBuilder, RunSummary, Seed};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Builds a chunker writing into `out_dir` with a fixed seed.
pub fn seeded_chunker(
    input: &Path,
    out_dir: &Path,
    chunks: usize,
    seed: impl Into<Seed>,
) -> Chunker {
    match ChunkerBuilder::new(input)
        .with_chunks(chunks)
        .with_seed(seed)
        .with_output_dir(out_dir)
        .build()
    {
        Ok(chunker) => chunker,
        Err(err) => panic!("chunker configuration must be valid: {err}"),
    }
}

/// Reads every output of `summary` as raw bytes.
pub fn output_bytes(summary: &RunSummary) -> Vec<Vec<u8>> {
    summary
        .outputs
        .iter()
        .map(|path| match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => panic!("failed to read {}: {err}", path.display()),
        })
        .collect()
}

/// Lists the file names present in `dir`, sorted.
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
