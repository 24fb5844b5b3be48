//! Header policy and line classification.
//!
//! Only the first input line can be a header. Classification is kept apart
//! from routing so the two can be tested independently.

use std::fmt;

use crate::{PartitionError, Result};

/// Treatment of the first input line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderPolicy {
    /// Route the first line like any other line.
    #[default]
    Route,
    /// Discard the first line.
    Skip,
    /// Write the first line to every output.
    Copy,
}

impl HeaderPolicy {
    /// Resolves the policy from the `skip` and `copy` flags.
    ///
    /// # Errors
    /// Returns [`PartitionError::HeaderConflict`] when both flags are set.
    ///
    /// # Examples
    /// ```
    /// use phraugr_core::{HeaderPolicy, PartitionError};
    ///
    /// assert_eq!(HeaderPolicy::from_flags(false, false)?, HeaderPolicy::Route);
    /// assert_eq!(HeaderPolicy::from_flags(true, false)?, HeaderPolicy::Skip);
    /// assert_eq!(HeaderPolicy::from_flags(false, true)?, HeaderPolicy::Copy);
    /// assert!(matches!(
    ///     HeaderPolicy::from_flags(true, true),
    ///     Err(PartitionError::HeaderConflict)
    /// ));
    /// # Ok::<(), PartitionError>(())
    /// ```
    pub fn from_flags(skip: bool, copy: bool) -> Result<Self> {
        match (skip, copy) {
            (true, true) => Err(PartitionError::HeaderConflict),
            (true, false) => Ok(Self::Skip),
            (false, true) => Ok(Self::Copy),
            (false, false) => Ok(Self::Route),
        }
    }

    /// The `(skip, copy)` flags that resolve to this policy.
    #[must_use]
    pub const fn flags(self) -> (bool, bool) {
        match self {
            Self::Route => (false, false),
            Self::Skip => (true, false),
            Self::Copy => (false, true),
        }
    }

    /// Stable label used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Route => "route",
            Self::Skip => "skip",
            Self::Copy => "copy",
        }
    }
}

impl fmt::Display for HeaderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a line relative to the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// The first line of the input.
    Header,
    /// Any subsequent line.
    Body,
}

impl LineClass {
    /// Classifies the line at zero-based `index`.
    #[must_use]
    pub const fn of(index: u64) -> Self {
        if index == 0 { Self::Header } else { Self::Body }
    }
}

/// What to do with a single line once classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineAction {
    Discard,
    Broadcast,
    Route,
}

pub(crate) const fn action_for(class: LineClass, policy: HeaderPolicy) -> LineAction {
    match (class, policy) {
        (LineClass::Header, HeaderPolicy::Skip) => LineAction::Discard,
        (LineClass::Header, HeaderPolicy::Copy) => LineAction::Broadcast,
        (LineClass::Header, HeaderPolicy::Route) | (LineClass::Body, _) => LineAction::Route,
    }
}
