//! Ordered output handles addressed by index.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use tracing::{Span, debug, field, instrument};

use crate::{PartitionError, Result};

#[derive(Debug)]
struct Sink<W> {
    label: String,
    writer: W,
    lines: u64,
}

/// The output handles of a single run.
///
/// Handles are opened before the input is read and stay open until
/// [`SinkSet::finish`] flushes them.
///
/// # Examples
/// ```
/// use phraugr_core::SinkSet;
///
/// let mut sinks = SinkSet::from_writers([("a", Vec::new()), ("b", Vec::new())]);
/// sinks.write_line(1, b"x\n")?;
/// sinks.broadcast(b"h\n")?;
/// let outputs = sinks.finish()?;
/// assert_eq!(outputs, vec![b"h\n".to_vec(), b"x\nh\n".to_vec()]);
/// # Ok::<(), phraugr_core::PartitionError>(())
/// ```
#[derive(Debug)]
pub struct SinkSet<W> {
    sinks: Vec<Sink<W>>,
}

impl SinkSet<BufWriter<File>> {
    /// Creates (or truncates) one file per path, in order.
    ///
    /// # Errors
    /// Returns [`PartitionError::CreateOutput`] for the first path that cannot
    /// be created. Files created before the failure are left in place.
    #[instrument(
        name = "sinks.create",
        err(level = "debug"),
        skip(paths),
        fields(count = field::Empty),
    )]
    pub fn create<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Self> {
        let mut sinks = Vec::new();
        for path in paths {
            let path = path.as_ref();
            let file = File::create(path).map_err(|source| PartitionError::CreateOutput {
                path: path.to_path_buf(),
                source,
            })?;
            debug!(path = %path.display(), "output created");
            sinks.push(Sink {
                label: path.display().to_string(),
                writer: BufWriter::new(file),
                lines: 0,
            });
        }
        Span::current().record("count", sinks.len());
        Ok(Self { sinks })
    }
}

impl<W: Write> SinkSet<W> {
    /// Wraps already-open writers, labelling each for diagnostics.
    pub fn from_writers<L: Into<String>>(writers: impl IntoIterator<Item = (L, W)>) -> Self {
        let sinks = writers
            .into_iter()
            .map(|(label, writer)| Sink {
                label: label.into(),
                writer,
                lines: 0,
            })
            .collect();
        Self { sinks }
    }

    /// Number of outputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Returns `true` when the set holds no outputs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Lines written to each output so far, in index order.
    #[must_use]
    pub fn line_counts(&self) -> Vec<u64> {
        self.sinks.iter().map(|sink| sink.lines).collect()
    }

    /// Appends `line` verbatim to the output at `index`.
    ///
    /// # Errors
    /// Returns [`PartitionError::SinkOutOfRange`] when `index` does not address
    /// an output, or [`PartitionError::Write`] when the write fails.
    pub fn write_line(&mut self, index: usize, line: &[u8]) -> Result<()> {
        let count = self.sinks.len();
        let sink = self
            .sinks
            .get_mut(index)
            .ok_or(PartitionError::SinkOutOfRange {
                index,
                sinks: count,
            })?;
        Self::append(sink, line)
    }

    /// Appends `line` verbatim to every output.
    ///
    /// # Errors
    /// Returns [`PartitionError::Write`] for the first failing output.
    pub fn broadcast(&mut self, line: &[u8]) -> Result<()> {
        self.sinks
            .iter_mut()
            .try_for_each(|sink| Self::append(sink, line))
    }

    /// Flushes every output and hands the writers back.
    ///
    /// # Errors
    /// Returns [`PartitionError::Write`] for the first output that fails to
    /// flush.
    pub fn finish(self) -> Result<Vec<W>> {
        self.sinks
            .into_iter()
            .map(|mut sink| {
                sink.writer
                    .flush()
                    .map_err(|source| PartitionError::Write {
                        target: sink.label,
                        source,
                    })?;
                Ok(sink.writer)
            })
            .collect()
    }

    fn append(sink: &mut Sink<W>, line: &[u8]) -> Result<()> {
        sink.writer
            .write_all(line)
            .map_err(|source| PartitionError::Write {
                target: sink.label.clone(),
                source,
            })?;
        sink.lines += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;

    use tempfile::TempDir;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_line_rejects_out_of_range_index() {
        let mut sinks = SinkSet::from_writers([("only", Vec::new())]);
        let err = sinks.write_line(1, b"x\n").expect_err("index 1 is out of range");
        assert!(matches!(
            err,
            PartitionError::SinkOutOfRange { index: 1, sinks: 1 }
        ));
    }

    #[test]
    fn write_failures_carry_the_sink_label() {
        let mut sinks = SinkSet::from_writers([("broken", FailingWriter)]);
        let err = sinks.write_line(0, b"x\n").expect_err("writer always fails");
        match err {
            PartitionError::Write { target, .. } => assert_eq!(target, "broken"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn line_counts_track_each_output() {
        let mut sinks = SinkSet::from_writers([("a", Vec::new()), ("b", Vec::new())]);
        sinks.broadcast(b"h\n").expect("broadcast");
        sinks.write_line(0, b"x\n").expect("write");
        assert_eq!(sinks.line_counts(), vec![2, 1]);
    }

    #[test]
    fn create_truncates_existing_files() -> io::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "stale\n")?;
        let sinks = SinkSet::create(&[path.clone()]).expect("create");
        sinks.finish().expect("flush");
        assert_eq!(std::fs::read(&path)?, Vec::<u8>::new());
        Ok(())
    }

    #[test]
    fn create_consumes_paths_lazily() -> io::Result<()> {
        let dir = TempDir::new()?;
        let paths = (1..=3).map(|index| dir.path().join(format!("out-{index}.txt")));
        let sinks = SinkSet::create(paths).expect("create");
        assert_eq!(sinks.len(), 3);
        sinks.finish().expect("flush");
        assert!(dir.path().join("out-3.txt").exists());
        Ok(())
    }

    #[test]
    fn create_reports_the_failing_path() -> io::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("missing").join("out.txt");
        let err = SinkSet::create(&[path.clone()]).expect_err("parent does not exist");
        match err {
            PartitionError::CreateOutput { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("unexpected error: {other:?}"),
        }
        Ok(())
    }
}
