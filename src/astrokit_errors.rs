//! Crate-wide error type.
//!
//! Every fallible operation in astrokit reports one of the variants below.
//! All of them are recoverable: the library never aborts the process and a
//! failed operation leaves no partial state behind (a failed `open` keeps no
//! handle, a failed `compute` yields no output).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AstrokitError {
    #[error("Unable to perform a file operation: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unable to read catalog file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Ephemeris file is closed")]
    FileClosed,

    #[error("Corrupt ephemeris header: {0}")]
    CorruptHeader(String),

    #[error("Truncated ephemeris file: {0}")]
    TruncatedFile(String),

    #[error("JED {jed} outside the ephemeris span [{start_jed}, {stop_jed}]")]
    TimeOutOfRange {
        jed: f64,
        start_jed: f64,
        stop_jed: f64,
    },

    #[error("Invalid body: {0}")]
    InvalidBody(String),

    #[error("Index {index} out of range (count: {count})")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Cannot normalize a vector with zero magnitude")]
    DegenerateVector,

    #[error("Matrix is singular (determinant {0:e} within tolerance of zero)")]
    SingularMatrix(f64),

    #[error("Malformed angle string: {0:?}")]
    MalformedAngleString(String),
}

impl PartialEq for AstrokitError {
    fn eq(&self, other: &Self) -> bool {
        use AstrokitError::*;
        match (self, other) {
            // Underlying errors are not comparable: equality on the variant alone
            (Io(_), Io(_)) => true,
            (Csv(_), Csv(_)) => true,

            (FileClosed, FileClosed) => true,
            (CorruptHeader(a), CorruptHeader(b)) => a == b,
            (TruncatedFile(a), TruncatedFile(b)) => a == b,
            (
                TimeOutOfRange {
                    jed: a,
                    start_jed: b,
                    stop_jed: c,
                },
                TimeOutOfRange {
                    jed: x,
                    start_jed: y,
                    stop_jed: z,
                },
            ) => a == x && b == y && c == z,
            (InvalidBody(a), InvalidBody(b)) => a == b,
            (
                IndexOutOfRange { index: a, count: b },
                IndexOutOfRange { index: x, count: y },
            ) => a == x && b == y,
            (DegenerateVector, DegenerateVector) => true,
            (SingularMatrix(a), SingularMatrix(b)) => a == b,
            (MalformedAngleString(a), MalformedAngleString(b)) => a == b,

            _ => false,
        }
    }
}
