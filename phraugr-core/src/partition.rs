//! The single streaming pass shared by the chunker and the splitter.
//!
//! Lines are read with [`BufRead::read_until`] so terminators are preserved
//! byte for byte and non-UTF-8 input passes through untouched. Every line is
//! classified, then discarded, broadcast, or routed by one draw.

use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
    num::NonZeroU64,
    path::{Path, PathBuf},
};

use tracing::{Span, debug, field, info, instrument};

use crate::{
    PartitionError, Result,
    draw::LineDraws,
    header::{HeaderPolicy, LineAction, LineClass, action_for},
    routing::Routing,
    sink::SinkSet,
};

/// Lines between two progress reports.
pub const PROGRESS_INTERVAL: NonZeroU64 = match NonZeroU64::new(100_000) {
    Some(interval) => interval,
    None => panic!("progress interval must be non-zero"),
};

/// Receives the running line count during a pass.
pub trait ProgressObserver {
    /// Called after `lines` input lines have been processed.
    ///
    /// # Errors
    /// Implementations writing to an output may fail.
    fn lines_processed(&mut self, lines: u64) -> Result<()>;
}

/// Observer that ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn lines_processed(&mut self, _lines: u64) -> Result<()> {
        Ok(())
    }
}

/// Observer that writes each running count on its own line.
///
/// # Examples
/// ```
/// use phraugr_core::{ProgressObserver, WriterProgress};
///
/// let mut progress = WriterProgress::new(Vec::new());
/// progress.lines_processed(100_000)?;
/// progress.lines_processed(200_000)?;
/// assert_eq!(progress.into_inner(), b"100000\n200000\n");
/// # Ok::<(), phraugr_core::PartitionError>(())
/// ```
#[derive(Debug)]
pub struct WriterProgress<W> {
    writer: W,
}

impl<W: Write> WriterProgress<W> {
    /// Wraps `writer`.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ProgressObserver for WriterProgress<W> {
    fn lines_processed(&mut self, lines: u64) -> Result<()> {
        writeln!(self.writer, "{lines}")
            .and_then(|()| self.writer.flush())
            .map_err(|source| PartitionError::Write {
                target: "progress".to_owned(),
                source,
            })
    }
}

impl<O: ProgressObserver + ?Sized> ProgressObserver for &mut O {
    fn lines_processed(&mut self, lines: u64) -> Result<()> {
        (**self).lines_processed(lines)
    }
}

/// Line counts gathered during a pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionReport {
    /// Lines read from the input.
    pub lines_read: u64,
    /// Lines discarded by [`HeaderPolicy::Skip`].
    pub lines_skipped: u64,
    /// Copies written while broadcasting the header.
    pub header_copies: u64,
    /// Lines written to each output, in output order.
    pub per_output: Vec<u64>,
}

impl PartitionReport {
    /// Total lines written across all outputs.
    #[must_use]
    pub fn lines_written(&self) -> u64 {
        self.per_output.iter().sum()
    }
}

/// Outcome of a chunker or splitter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Output files, in output order.
    pub outputs: Vec<PathBuf>,
    /// Integer seed used by the run, or `None` when seeded from entropy.
    pub seed: Option<u64>,
    /// Line counts gathered during the pass.
    pub report: PartitionReport,
}

#[instrument(
    name = "partition.open_input",
    err(level = "debug"),
    skip(path),
    fields(path = %path.display()),
)]
pub(crate) fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|source| PartitionError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Streams an input into a [`SinkSet`] according to a routing rule and a
/// header policy.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
///
/// use phraugr_core::{HeaderPolicy, NoProgress, Partitioner, Routing, ScriptedDraws, SinkSet};
///
/// let routing = Routing::Uniform { outputs: NonZeroUsize::new(2).expect("non-zero") };
/// let partitioner = Partitioner::new(routing, HeaderPolicy::Copy);
/// let sinks = SinkSet::from_writers([("a", Vec::new()), ("b", Vec::new())]);
/// let mut draws = ScriptedDraws::indices([1, 0]);
/// let (report, outputs) =
///     partitioner.run(&b"id\nx\ny\n"[..], sinks, &mut draws, &mut NoProgress)?;
/// assert_eq!(outputs, vec![b"id\ny\n".to_vec(), b"id\nx\n".to_vec()]);
/// assert_eq!(report.lines_written(), 4);
/// # Ok::<(), phraugr_core::PartitionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Partitioner {
    routing: Routing,
    header: HeaderPolicy,
    progress_interval: NonZeroU64,
    input_label: String,
}

impl Partitioner {
    /// Creates a partitioner reporting progress every [`PROGRESS_INTERVAL`]
    /// lines.
    #[must_use]
    pub fn new(routing: Routing, header: HeaderPolicy) -> Self {
        Self {
            routing,
            header,
            progress_interval: PROGRESS_INTERVAL,
            input_label: "<input>".to_owned(),
        }
    }

    /// Overrides the number of lines between progress reports.
    #[must_use]
    pub fn with_progress_interval(mut self, interval: NonZeroU64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Names the input in read errors.
    #[must_use]
    pub fn with_input_label(mut self, label: impl Into<String>) -> Self {
        self.input_label = label.into();
        self
    }

    /// Returns the routing rule.
    #[must_use]
    pub const fn routing(&self) -> Routing {
        self.routing
    }

    /// Returns the header policy.
    #[must_use]
    pub const fn header(&self) -> HeaderPolicy {
        self.header
    }

    /// Reads `input` to the end, writing every line to `sinks`, then flushes
    /// the sinks and returns them with the pass report.
    ///
    /// # Errors
    /// Returns [`PartitionError::SinkCountMismatch`] before reading when the
    /// sink count differs from the routing rule, and propagates read, write,
    /// draw, and progress failures. Output already written stays in place.
    #[instrument(
        name = "partition.run",
        err(level = "debug"),
        skip_all,
        fields(
            input = %self.input_label,
            header = %self.header,
            outputs = self.routing.outputs().get(),
            lines = field::Empty,
        ),
    )]
    pub fn run<R, W, D, O>(
        &self,
        mut input: R,
        mut sinks: SinkSet<W>,
        draws: &mut D,
        progress: &mut O,
    ) -> Result<(PartitionReport, Vec<W>)>
    where
        R: BufRead,
        W: Write,
        D: LineDraws + ?Sized,
        O: ProgressObserver + ?Sized,
    {
        let expected = self.routing.outputs().get();
        if sinks.len() != expected {
            return Err(PartitionError::SinkCountMismatch {
                expected,
                got: sinks.len(),
            });
        }

        let mut report = PartitionReport::default();
        let mut line = Vec::new();
        loop {
            line.clear();
            let read = input
                .read_until(b'\n', &mut line)
                .map_err(|source| PartitionError::Read {
                    input: self.input_label.clone(),
                    source,
                })?;
            if read == 0 {
                break;
            }

            match action_for(LineClass::of(report.lines_read), self.header) {
                LineAction::Discard => report.lines_skipped += 1,
                LineAction::Broadcast => {
                    sinks.broadcast(&line)?;
                    report.header_copies += sinks.len() as u64;
                }
                LineAction::Route => {
                    let target = self.routing.choose(draws)?;
                    sinks.write_line(target, &line)?;
                }
            }

            report.lines_read += 1;
            if report.lines_read % self.progress_interval.get() == 0 {
                debug!(lines = report.lines_read, "progress");
                progress.lines_processed(report.lines_read)?;
            }
        }

        report.per_output = sinks.line_counts();
        let outputs = sinks.finish()?;
        Span::current().record("lines", report.lines_read);
        info!(
            lines_read = report.lines_read,
            lines_written = report.lines_written(),
            lines_skipped = report.lines_skipped,
            "partition completed"
        );
        Ok((report, outputs))
    }
}
