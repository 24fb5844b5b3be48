//! Seed resolution for the per-run random stream.
//!
//! Seeds arrive either as integers or as text. Text is normalized by
//! multiplying the Unicode scalar values of its characters, starting from an
//! accumulator of one, so a textual seed and the integer it normalizes to
//! drive identical runs.

use std::fmt;

/// Seed used to initialise the random stream of a run.
///
/// # Examples
/// ```
/// use phraugr_core::Seed;
///
/// assert_eq!(Seed::text("AB").resolve(), Some(4290));
/// assert_eq!(Seed::Numeric(7).resolve(), Some(7));
/// assert_eq!(Seed::Entropy.resolve(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Seed {
    /// Seed the generator from operating system entropy. Runs are not
    /// reproducible.
    #[default]
    Entropy,
    /// Seed the generator with an explicit integer.
    Numeric(u64),
    /// Seed the generator with text, normalized via [`normalize_seed`].
    Text(String),
}

impl Seed {
    /// Builds a textual seed.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns the integer fed to the generator, or `None` for [`Seed::Entropy`].
    #[must_use]
    pub fn resolve(&self) -> Option<u64> {
        match self {
            Self::Entropy => None,
            Self::Numeric(value) => Some(*value),
            Self::Text(text) => Some(normalize_seed(text)),
        }
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self::Numeric(value)
    }
}

impl From<Option<String>> for Seed {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Entropy, Self::Text)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entropy => f.write_str("<entropy>"),
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// Converts a textual seed into the integer seed for the generator.
///
/// The result is the product of the Unicode scalar values of `text`, starting
/// from one. The product wraps modulo 2^64.
///
/// # Examples
/// ```
/// use phraugr_core::normalize_seed;
///
/// assert_eq!(normalize_seed("AB"), 65 * 66);
/// assert_eq!(normalize_seed(""), 1);
/// ```
#[must_use]
pub fn normalize_seed(text: &str) -> u64 {
    text.chars()
        .fold(1_u64, |acc, ch| acc.wrapping_mul(u64::from(u32::from(ch))))
}
