use thiserror::Error;

use crate::types::ValueSource;

#[derive(Debug, Error)]
pub enum EnvFlagsError {
    /// The record could not be turned into a binding table. Nothing was
    /// written when this is returned.
    #[error("Invalid target: {reason}")]
    InvalidTarget { reason: String },

    /// A value supplied through the environment or the command line did not
    /// parse as the field's kind. Treat as fatal.
    #[error("Invalid value '{value}' for '{name}' from {origin}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        origin: ValueSource,
        reason: String,
    },

    /// Malformed or unknown command-line arguments, or a help request.
    #[error("{0}")]
    Args(#[from] clap::Error),
}

impl EnvFlagsError {
    /// Whether the hosting application should stop. Bad supplied input is
    /// fatal; an unbindable target and a help request are not.
    pub fn is_fatal(&self) -> bool {
        match self {
            EnvFlagsError::InvalidTarget { .. } => false,
            EnvFlagsError::InvalidValue { .. } => true,
            EnvFlagsError::Args(err) => !is_help(err),
        }
    }

    /// Process exit status for callers that terminate on error.
    pub fn exit_code(&self) -> i32 {
        match self {
            EnvFlagsError::InvalidTarget { .. } => 1,
            EnvFlagsError::InvalidValue { .. } => 2,
            EnvFlagsError::Args(err) => err.exit_code(),
        }
    }
}

fn is_help(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
    )
}
