//! Two-way threshold split of a line-oriented file.
//!
//! Each line draws `u` in `[0, 1)`. A draw strictly greater than the
//! probability goes to the first output, anything else to the second, so the
//! probability is the share of lines expected in the *second* output. Existing
//! seeded splits depend on this comparison direction.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tracing::{info, instrument};

use crate::{
    Result,
    draw::{LineDraws, SeededDraws},
    header::HeaderPolicy,
    partition::{
        NoProgress, Partitioner, ProgressObserver, RunSummary, WriterProgress, open_input,
    },
    routing::{Probability, Routing},
    seed::Seed,
    sink::SinkSet,
};

/// Configures and constructs [`Splitter`] instances.
///
/// # Examples
/// ```
/// use phraugr_core::SplitterBuilder;
///
/// let splitter = SplitterBuilder::new("data.csv", "train.csv", "test.csv")
///     .with_probability(0.8)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(splitter.probability().get(), 0.8);
/// ```
#[derive(Debug, Clone)]
pub struct SplitterBuilder {
    input: PathBuf,
    first: PathBuf,
    second: PathBuf,
    probability: f64,
    skip_headers: bool,
    copy_headers: bool,
    seed: Seed,
    report_progress: bool,
}

impl SplitterBuilder {
    /// Starts a configuration splitting `input` into `first` and `second` with
    /// the default probability, routed headers, an entropy seed, and progress
    /// reporting on.
    #[must_use]
    pub fn new(
        input: impl Into<PathBuf>,
        first: impl Into<PathBuf>,
        second: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input: input.into(),
            first: first.into(),
            second: second.into(),
            probability: Probability::DEFAULT.get(),
            skip_headers: false,
            copy_headers: false,
            seed: Seed::Entropy,
            report_progress: true,
        }
    }

    /// Sets the threshold compared against each draw.
    #[must_use]
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    /// Records the skip and copy header flags. Setting both fails in
    /// [`SplitterBuilder::build`].
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

    /// Toggles the progress report every 100,000 lines.
    #[must_use]
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.report_progress = enabled;
        self
    }

    /// Validates the configuration and constructs a [`Splitter`].
    ///
    /// # Errors
    /// Returns [`crate::PartitionError::InvalidProbability`] for a threshold
    /// outside `(0, 1)` and [`crate::PartitionError::HeaderConflict`] when
    /// both header flags are set.
    pub fn build(self) -> Result<Splitter> {
        let probability = Probability::new(self.probability)?;
        let header = HeaderPolicy::from_flags(self.skip_headers, self.copy_headers)?;
        Ok(Splitter {
            input: self.input,
            outputs: [self.first, self.second],
            probability,
            header,
            seed: self.seed,
            report_progress: self.report_progress,
        })
    }
}

/// Splits one input file into two files by a Bernoulli trial per line.
#[derive(Debug, Clone)]
pub struct Splitter {
    input: PathBuf,
    outputs: [PathBuf; 2],
    probability: Probability,
    header: HeaderPolicy,
    seed: Seed,
    report_progress: bool,
}

impl Splitter {
    /// Path of the input file.
    #[must_use]
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Paths of the first and second outputs.
    #[must_use]
    pub const fn outputs(&self) -> &[PathBuf; 2] {
        &self.outputs
    }

    /// Threshold compared against each draw.
    #[must_use]
    pub const fn probability(&self) -> Probability {
        self.probability
    }

    /// Header policy in effect.
    #[must_use]
    pub const fn header(&self) -> HeaderPolicy {
        self.header
    }

    /// Runs the splitter with a generator seeded from the configured seed.
    /// When progress reporting is enabled the running counts go to `progress`.
    ///
    /// # Errors
    /// Returns [`crate::PartitionError`] when the input cannot be read or an
    /// output cannot be created or written.
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

    /// Runs the splitter with caller-supplied draws and progress observer.
    ///
    /// # Errors
    /// Returns [`crate::PartitionError`] when the input cannot be read, an
    /// output cannot be created or written, or the draw source fails.
    #[instrument(
        name = "splitter.run",
        err(level = "debug"),
        skip_all,
        fields(
            input = %self.input.display(),
            probability = self.probability.get(),
            seed = %self.seed,
        ),
    )]
    pub fn run_with<D, O>(&self, draws: &mut D, progress: &mut O) -> Result<RunSummary>
    where
        D: LineDraws + ?Sized,
        O: ProgressObserver + ?Sized,
    {
        let reader = open_input(&self.input)?;
        let sinks = SinkSet::create(self.outputs.as_slice())?;
        let partitioner = Partitioner::new(
            Routing::Threshold {
                probability: self.probability,
            },
            self.header,
        )
        .with_input_label(self.input.display().to_string());
        let (report, _) = partitioner.run(reader, sinks, draws, progress)?;
        info!(
            first = report.per_output.first().copied().unwrap_or_default(),
            second = report.per_output.get(1).copied().unwrap_or_default(),
            "split completed"
        );
        Ok(RunSummary {
            outputs: self.outputs.to_vec(),
            seed: None,
            report,
        })
    }
}
