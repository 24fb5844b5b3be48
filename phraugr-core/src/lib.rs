//! Phraugr core library.
//!
//! Streams a line-oriented file into several outputs, choosing the
//! destination of every line with one draw from a seeded generator. The
//! [`Chunker`] spreads lines uniformly over N files; the [`Splitter`] sends
//! each line to one of two files by comparing a unit draw with a threshold.
//! Both share the [`Partitioner`] pass, the [`HeaderPolicy`] for the first
//! line, and [`normalize_seed`] for textual seeds.

mod chunk;
mod draw;
mod error;
mod header;
mod naming;
mod partition;
mod routing;
mod seed;
mod sink;
mod split;

pub use crate::{
    chunk::{Chunker, ChunkerBuilder, MAX_CHUNKS},
    draw::{LineDraws, ScriptedDraws, SeededDraws},
    error::{PartitionError, PartitionErrorCode, Result},
    header::{HeaderPolicy, LineClass},
    naming::{CHUNK_INDEX_WIDTH, chunk_paths},
    partition::{
        NoProgress, PROGRESS_INTERVAL, PartitionReport, Partitioner, ProgressObserver, RunSummary,
        WriterProgress,
    },
    routing::{Probability, Routing},
    seed::{Seed, normalize_seed},
    sink::SinkSet,
    split::{Splitter, SplitterBuilder},
};
