//! Error types for the phraugr core library.
//!
//! Defines the error enum exposed by the public API, its stable error codes,
//! and a convenient result alias.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

use crate::chunk::MAX_CHUNKS;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced when configuring or running a partition.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PartitionError {
    /// Skipping and copying the header line were both requested.
    #[error("you can either skip or copy headers, not both")]
    HeaderConflict,
    /// The chunk count must lie between one and [`MAX_CHUNKS`].
    #[error("num_chunks must lie between 1 and {max} (got {got})", max = MAX_CHUNKS)]
    InvalidChunkCount {
        /// The invalid chunk count supplied by the caller.
        got: usize,
    },
    /// The split probability must lie strictly between zero and one.
    #[error("probability must lie strictly between 0 and 1 (got {got})")]
    InvalidProbability {
        /// The rejected probability.
        got: f64,
    },
    /// The input file could not be opened.
    #[error("failed to open input `{path}`")]
    OpenInput {
        /// Path of the input file.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// An output file could not be created.
    #[error("failed to create output `{path}`")]
    CreateOutput {
        /// Path of the output file.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Reading a line from the input failed.
    #[error("failed to read from `{input}`")]
    Read {
        /// Label of the input being read.
        input: String,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Writing or flushing an output failed.
    #[error("failed to write to `{target}`")]
    Write {
        /// Label of the output being written.
        target: String,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A draw selected an output that does not exist.
    #[error("draw selected output {index} but only {sinks} outputs are open")]
    SinkOutOfRange {
        /// Index produced by the draw source.
        index: usize,
        /// Number of open outputs.
        sinks: usize,
    },
    /// The number of open outputs does not match the routing rule.
    #[error("routing addresses {expected} outputs but {got} are open")]
    SinkCountMismatch {
        /// Outputs addressed by the routing rule.
        expected: usize,
        /// Outputs actually open.
        got: usize,
    },
    /// A scripted draw source ran out of values.
    #[error("scripted draws exhausted after {consumed} values")]
    ScriptExhausted {
        /// Number of values handed out before exhaustion.
        consumed: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`PartitionError`] variants.
    enum PartitionErrorCode for PartitionError {
        /// Skipping and copying the header line were both requested.
        HeaderConflict => HeaderConflict => "PHRAUGR_HEADER_CONFLICT",
        /// The chunk count lies outside `1..=MAX_CHUNKS`.
        InvalidChunkCount => InvalidChunkCount { .. } => "PHRAUGR_INVALID_CHUNK_COUNT",
        /// The split probability must lie strictly between zero and one.
        InvalidProbability => InvalidProbability { .. } => "PHRAUGR_INVALID_PROBABILITY",
        /// The input file could not be opened.
        OpenInput => OpenInput { .. } => "PHRAUGR_IO_OPEN_INPUT",
        /// An output file could not be created.
        CreateOutput => CreateOutput { .. } => "PHRAUGR_IO_CREATE_OUTPUT",
        /// Reading a line from the input failed.
        Read => Read { .. } => "PHRAUGR_IO_READ",
        /// Writing or flushing an output failed.
        Write => Write { .. } => "PHRAUGR_IO_WRITE",
        /// A draw selected an output that does not exist.
        SinkOutOfRange => SinkOutOfRange { .. } => "PHRAUGR_SINK_OUT_OF_RANGE",
        /// The number of open outputs does not match the routing rule.
        SinkCountMismatch => SinkCountMismatch { .. } => "PHRAUGR_SINK_COUNT_MISMATCH",
        /// A scripted draw source ran out of values.
        ScriptExhausted => ScriptExhausted { .. } => "PHRAUGR_SCRIPT_EXHAUSTED",
    }
}

impl PartitionError {
    /// Returns `true` when the error was raised while resolving configuration,
    /// before any file was opened.
    ///
    /// # Examples
    /// ```
    /// use phraugr_core::PartitionError;
    ///
    /// assert!(PartitionError::HeaderConflict.is_configuration());
    /// assert!(!PartitionError::ScriptExhausted { consumed: 0 }.is_configuration());
    /// ```
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::HeaderConflict | Self::InvalidChunkCount { .. } | Self::InvalidProbability { .. }
        )
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, PartitionError>;
