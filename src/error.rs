//! Error types for rtlvec operations.
//!
//! Every failure the generator can hit is a variant of [`GenError`]. The
//! scenario driver never propagates these; it collects them as diagnostics
//! in its run report so sibling outputs keep being produced.

use std::fmt;
use std::io;
use std::path::Path;

/// Errors that can occur while generating, encoding or writing test vectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// The matrix dimension `n` is not a positive integer.
    InvalidDimension {
        /// The rejected dimension.
        n: i64,
    },
    /// A product was requested but one of its operands was not generated.
    MissingPrerequisite {
        /// The skipped operation, e.g. `"B@A"`.
        operation: &'static str,
        /// The operand(s) that were not generated.
        missing: &'static str,
    },
    /// Writing one output file failed.
    Io {
        /// The file that could not be written.
        path: String,
        /// The underlying I/O error kind.
        kind: io::ErrorKind,
        /// Human-readable error message.
        message: String,
    },
    /// A value does not fit the target width and strict encoding was requested.
    Overflow {
        /// The value that did not fit.
        value: i64,
        /// The target width in bits.
        width: u32,
    },
    /// A bit width outside `1..=64`.
    InvalidWidth {
        /// The rejected width.
        width: u32,
    },
    /// A string that is not a valid two's-complement bit string.
    InvalidBitString {
        /// The rejected input.
        input: String,
        /// Human-readable error message.
        message: String,
    },
    /// An empty sampling range (`lo > hi`).
    InvalidRange {
        /// Lower bound.
        lo: i64,
        /// Upper bound.
        hi: i64,
    },
    /// The inner dimensions of a product do not agree.
    ShapeMismatch {
        /// Shape of the left operand.
        left: (usize, usize),
        /// Shape of the right operand.
        right: (usize, usize),
    },
    /// The accumulator type was too narrow for an output element.
    AccumulatorOverflow {
        /// Output row of the overflowing element.
        row: usize,
        /// Output column of the overflowing element.
        col: usize,
    },
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::InvalidDimension { n } => {
                write!(f, "Invalid dimension: n must be a positive integer (got {n})")
            }
            GenError::MissingPrerequisite { operation, missing } => write!(
                f,
                "Missing prerequisite: {operation} requires matrix {missing} to be generated first, skipping"
            ),
            GenError::Io {
                path,
                kind,
                message,
            } => write!(f, "Failed to write {path}: {message} ({kind:?})"),
            GenError::Overflow { value, width } => write!(
                f,
                "Overflow: {value} is not representable as a {width}-bit signed integer"
            ),
            GenError::InvalidWidth { width } => {
                write!(f, "Invalid bit width: {width} (expected 1..=64)")
            }
            GenError::InvalidBitString { input, message } => {
                write!(f, "Invalid bit string {input:?}: {message}")
            }
            GenError::InvalidRange { lo, hi } => {
                write!(f, "Invalid range: [{lo}, {hi}] is empty")
            }
            GenError::ShapeMismatch { left, right } => write!(
                f,
                "Shape mismatch: cannot multiply {}x{} by {}x{}",
                left.0, left.1, right.0, right.1
            ),
            GenError::AccumulatorOverflow { row, col } => {
                write!(f, "Accumulator overflow at output element ({row}, {col})")
            }
        }
    }
}

impl std::error::Error for GenError {}

/// Result type alias for rtlvec operations.
pub type Result<T> = std::result::Result<T, GenError>;

/// Creates an I/O error for the given output path.
pub fn io_error(path: &Path, err: &io::Error) -> GenError {
    GenError::Io {
        path: path.display().to_string(),
        kind: err.kind(),
        message: err.to_string(),
    }
}

/// Creates a bit string parsing error.
pub fn bit_string_error(input: &str, message: impl Into<String>) -> GenError {
    GenError::InvalidBitString {
        input: input.to_owned(),
        message: message.into(),
    }
}

/// Creates a missing-prerequisite error.
pub fn missing_prerequisite(operation: &'static str, missing: &'static str) -> GenError {
    GenError::MissingPrerequisite { operation, missing }
}
