//! Random N-way chunking of a line-oriented file.

use std::{
    io::Write,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use tracing::{info, instrument};

use crate::{
    PartitionError, Result,
    draw::{LineDraws, SeededDraws},
    header::HeaderPolicy,
    naming::chunk_paths,
    partition::{
        NoProgress, Partitioner, ProgressObserver, RunSummary, WriterProgress, open_input,
    },
    routing::Routing,
    seed::Seed,
    sink::SinkSet,
};

/// Largest chunk count accepted by [`ChunkerBuilder::build`].
///
/// Every chunk holds an open file for the whole run, so counts above this
/// exhaust descriptors long before they are useful.
pub const MAX_CHUNKS: usize = 100_000;

/// Configures and constructs [`Chunker`] instances.
///
/// # Examples
/// ```
/// use phraugr_core::{ChunkerBuilder, HeaderPolicy, Seed};
///
/// let chunker = ChunkerBuilder::new("data.csv")
///     .with_chunks(3)
///     .with_header_flags(false, true)
///     .with_seed(Seed::text("AB"))
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(chunker.chunks().get(), 3);
/// assert_eq!(chunker.header(), HeaderPolicy::Copy);
/// ```
#[derive(Debug, Clone)]
pub struct ChunkerBuilder {
    input: PathBuf,
    chunks: usize,
    skip_headers: bool,
    copy_headers: bool,
    seed: Seed,
    output_dir: Option<PathBuf>,
    report_progress: bool,
}

impl ChunkerBuilder {
    /// Starts a configuration for `input` with two chunks, the header routed
    /// like any other line, an entropy seed, and progress reporting off.
    #[must_use]
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            chunks: 2,
            skip_headers: false,
            copy_headers: false,
            seed: Seed::Entropy,
            output_dir: None,
            report_progress: false,
        }
    }

    /// Sets the number of output files.
    #[must_use]
    pub fn with_chunks(mut self, chunks: usize) -> Self {
        self.chunks = chunks;
        self
    }

    /// Records the skip and copy header flags. Setting both fails in
    /// [`ChunkerBuilder::build`].
    #[must_use]
    pub fn with_header_flags(mut self, skip: bool, copy: bool) -> Self {
        self.skip_headers = skip;
        self.copy_headers = copy;
        self
    }

    /// Sets the header policy directly.
    #[must_use]
    pub fn with_header_policy(self, policy: HeaderPolicy) -> Self {
        let (skip, copy) = policy.flags();
        self.with_header_flags(skip, copy)
    }

    /// Sets the seed of the random stream.
    #[must_use]
    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = seed.into();
        self
    }

    /// Places the chunk files in `dir` instead of the working directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Enables a progress report every 100,000 lines.
    #[must_use]
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.report_progress = enabled;
        self
    }

    /// Validates the configuration and constructs a [`Chunker`].
    ///
    /// # Errors
    /// Returns [`PartitionError::InvalidChunkCount`] when the chunk count is
    /// zero or above [`MAX_CHUNKS`], and [`PartitionError::HeaderConflict`]
    /// when both header flags are set.
    pub fn build(self) -> Result<Chunker> {
        let chunks = NonZeroUsize::new(self.chunks)
            .filter(|chunks| chunks.get() <= MAX_CHUNKS)
            .ok_or(PartitionError::InvalidChunkCount { got: self.chunks })?;
        let header = HeaderPolicy::from_flags(self.skip_headers, self.copy_headers)?;
        Ok(Chunker {
            input: self.input,
            chunks,
            header,
            seed: self.seed,
            output_dir: self.output_dir,
            report_progress: self.report_progress,
        })
    }
}

/// Splits one input file into N files by uniform random choice per line.
#[derive(Debug, Clone)]
pub struct Chunker {
    input: PathBuf,
    chunks: NonZeroUsize,
    header: HeaderPolicy,
    seed: Seed,
    output_dir: Option<PathBuf>,
    report_progress: bool,
}

impl Chunker {
    /// Path of the input file.
    #[must_use]
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Number of output files.
    #[must_use]
    pub const fn chunks(&self) -> NonZeroUsize {
        self.chunks
    }

    /// Header policy in effect.
    #[must_use]
    pub const fn header(&self) -> HeaderPolicy {
        self.header
    }

    /// Seed of the random stream.
    #[must_use]
    pub const fn seed(&self) -> &Seed {
        &self.seed
    }

    /// Paths the chunk files will be written to.
    ///
    /// # Examples
    /// ```
    /// use std::path::PathBuf;
    ///
    /// use phraugr_core::ChunkerBuilder;
    ///
    /// let chunker = ChunkerBuilder::new("data.csv")
    ///     .with_chunks(2)
    ///     .with_output_dir("out")
    ///     .build()
    ///     .expect("configuration is valid");
    /// assert_eq!(
    ///     chunker.output_paths(),
    ///     vec![PathBuf::from("out/data_001.csv"), PathBuf::from("out/data_002.csv")]
    /// );
    /// ```
    #[must_use]
    pub fn output_paths(&self) -> Vec<PathBuf> {
        chunk_paths(&self.input, self.chunks, self.output_dir.as_deref())
    }

    /// Runs the chunker with a generator seeded from the configured seed.
    /// When progress reporting is enabled the running counts go to `progress`.
    ///
    /// # Errors
    /// Returns [`PartitionError`] when the input cannot be read or an output
    /// cannot be created or written.
    pub fn run<P: Write>(&self, progress: P) -> Result<RunSummary> {
        let mut draws = SeededDraws::new(&self.seed);
        let seed = draws.seed();
        let mut summary = if self.report_progress {
            self.run_with(&mut draws, &mut WriterProgress::new(progress))?
        } else {
            self.run_with(&mut draws, &mut NoProgress)?
        };
        summary.seed = seed;
        Ok(summary)
    }

    /// Runs the chunker with caller-supplied draws and progress observer.
    ///
    /// The returned summary carries no seed; only [`Chunker::run`] knows it.
    ///
    /// # Errors
    /// Returns [`PartitionError`] when the input cannot be read, an output
    /// cannot be created or written, or the draw source fails.
    #[instrument(
        name = "chunker.run",
        err(level = "debug"),
        skip_all,
        fields(input = %self.input.display(), chunks = self.chunks.get(), seed = %self.seed),
    )]
    pub fn run_with<D, O>(&self, draws: &mut D, progress: &mut O) -> Result<RunSummary>
    where
        D: LineDraws + ?Sized,
        O: ProgressObserver + ?Sized,
    {
        let reader = open_input(&self.input)?;
        let outputs = self.output_paths();
        let sinks = SinkSet::create(&outputs)?;
        let partitioner = Partitioner::new(
            Routing::Uniform {
                outputs: self.chunks,
            },
            self.header,
        )
        .with_input_label(self.input.display().to_string());
        let (report, _) = partitioner.run(reader, sinks, draws, progress)?;
        info!(chunks = self.chunks.get(), "chunking completed");
        Ok(RunSummary {
            outputs,
            seed: None,
            report,
        })
    }
}
