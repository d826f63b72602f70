use std::io;
use std::num::ParseFloatError;
use thiserror::Error;

/// Errors surfaced by tree operations and the command layer.
///
/// Soft conditions are not errors: removing an absent key returns `None`,
/// inserting a duplicate key returns `false`, and structural queries on
/// absent keys return empty results.
#[derive(Debug, Error)]
pub enum Error {
    /// The event sink failed while an operation was narrating a mutation.
    /// The mutation itself has already been applied.
    #[error("failed to emit event: {0}")]
    Sink(#[from] io::Error),

    /// The command stream could not be read or flushed.
    #[error("command stream failed: {0}")]
    Io(#[source] io::Error),

    /// A command line used a keyword the dispatcher does not know.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    /// A command line was missing one of its expected tokens.
    #[error("malformed command line `{0}`")]
    MalformedCommand(String),

    /// A numeric token in a command line failed to parse.
    #[error("invalid number `{token}`: {source}")]
    InvalidNumber {
        token: String,
        source: ParseFloatError,
    },

    /// The command stream ended before the initial root line.
    #[error("command stream is empty")]
    EmptyInput,
}
