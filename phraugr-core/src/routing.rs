//! Routing rules that turn one random draw into an output index.

use std::{fmt, num::NonZeroUsize};

use crate::{PartitionError, Result, draw::LineDraws};

/// Threshold used by the two-way split.
///
/// A unit draw strictly greater than the threshold routes to the first output;
/// any other draw routes to the second. The threshold is therefore the
/// probability of landing in the *second* output.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Probability(f64);

impl Probability {
    /// Threshold applied when none is configured.
    pub const DEFAULT: Self = Self(0.9);

    /// Validates `value` as a threshold strictly inside `(0, 1)`.
    ///
    /// # Errors
    /// Returns [`PartitionError::InvalidProbability`] for values outside the
    /// open interval, including NaN.
    ///
    /// # Examples
    /// ```
    /// use phraugr_core::Probability;
    ///
    /// assert_eq!(Probability::new(0.25)?.get(), 0.25);
    /// assert!(Probability::new(1.0).is_err());
    /// assert!(Probability::new(f64::NAN).is_err());
    /// # Ok::<(), phraugr_core::PartitionError>(())
    /// ```
    pub fn new(value: f64) -> Result<Self> {
        if value > 0.0 && value < 1.0 {
            Ok(Self(value))
        } else {
            Err(PartitionError::InvalidProbability { got: value })
        }
    }

    /// Returns the raw threshold.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Default for Probability {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rule mapping a draw to an output index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Routing {
    /// Pick one of `outputs` uniformly.
    Uniform {
        /// Number of outputs.
        outputs: NonZeroUsize,
    },
    /// Bernoulli trial against `probability` over exactly two outputs.
    Threshold {
        /// Threshold compared against each unit draw.
        probability: Probability,
    },
}

const SPLIT_OUTPUTS: NonZeroUsize = NonZeroUsize::MIN.saturating_add(1);

impl Routing {
    /// Number of outputs this rule addresses.
    #[must_use]
    pub const fn outputs(&self) -> NonZeroUsize {
        match self {
            Self::Uniform { outputs } => *outputs,
            Self::Threshold { .. } => SPLIT_OUTPUTS,
        }
    }

    /// Draws once from `draws` and returns the chosen output index.
    ///
    /// # Errors
    /// Propagates failures from the draw source.
    ///
    /// # Examples
    /// ```
    /// use phraugr_core::{Probability, Routing, ScriptedDraws};
    ///
    /// let routing = Routing::Threshold { probability: Probability::new(0.5)? };
    /// let mut draws = ScriptedDraws::units([0.75, 0.5, 0.25]);
    /// assert_eq!(routing.choose(&mut draws)?, 0);
    /// assert_eq!(routing.choose(&mut draws)?, 1);
    /// assert_eq!(routing.choose(&mut draws)?, 1);
    /// # Ok::<(), phraugr_core::PartitionError>(())
    /// ```
    pub fn choose<D: LineDraws + ?Sized>(&self, draws: &mut D) -> Result<usize> {
        match self {
            Self::Uniform { outputs } => draws.draw_index(*outputs),
            Self::Threshold { probability } => {
                let draw = draws.draw_unit()?;
                Ok(if draw > probability.get() { 0 } else { 1 })
            }
        }
    }
}
