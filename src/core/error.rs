use thiserror::Error;

/// The error taxonomy for the whole crate.
///
/// Variants fall into the buckets described in the design notes: a
/// [`OError::Precondition`] is always a programmer error (a data structure was
/// misused) and is meant to abort the run; [`OError::InvalidArgument`] covers
/// bad user input (CLI flags, problem sizes); the rest surface failures from
/// the objective function or from I/O.
#[derive(Error, Debug)]
pub enum OError {
    /// A data-structure invariant was violated by the caller: popping an empty
    /// heap, pushing a duplicate id, raising a key via `decrease_key`, adding
    /// an edge to a node that was never added, accessing a removed linked-list
    /// entry, or reusing a domination DAG after it has been peeled.
    #[error("precondition violated in {0}: {1}")]
    Precondition(String, String),
    /// A CLI flag or problem size was out of the allowed domain (e.g. an odd
    /// objective size, or a genome length not divisible by `m / 2`).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The user-supplied objective function failed, or returned a vector of
    /// the wrong length.
    #[error("objective evaluation failed: {0}")]
    Evaluation(String),
    /// The log file could not be read or written. This is reported but does
    /// not abort the run.
    #[error("I/O failure on {0:?}: {1}")]
    File(std::path::PathBuf, String),
    /// A catch-all for conditions that don't need their own variant.
    #[error("{0}")]
    Generic(String),
}

impl OError {
    /// Build a [`OError::Precondition`] tagged with the subsystem that raised it.
    pub fn precondition(subsystem: &str, message: impl Into<String>) -> Self {
        OError::Precondition(subsystem.to_string(), message.into())
    }
}
