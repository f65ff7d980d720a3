//! The error taxonomy for ghorg commands, and how each kind maps onto a process exit code.

use http::StatusCode;
use thiserror::Error;

/// Exit code for usage errors: bad flags, unknown commands, wrong argument counts
pub const EXIT_USAGE: i32 = 1;

/// Exit code for failures raised while a command runs
pub const EXIT_FAILURE: i32 = 2;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {variable} {reason}")]
    Config {
        variable: &'static str,
        reason: String,
    },

    #[error("Wrong number of arguments for `{command}`: expected {expected}, got {actual}. Run `ghorg --help` for usage")]
    Arity {
        command: &'static str,
        expected: String,
        actual: usize,
    },

    #[error("No command given. Run `ghorg --help` for a list of commands")]
    NoCommand,

    #[error("Unknown command `{0}`. Run `ghorg --help` for a list of commands")]
    UnknownCommand(String),

    #[error("{0}")]
    UnknownFlag(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("API returned {status}: {snippet}")]
    Api { status: StatusCode, snippet: String },

    #[error("Could not read response ({status}): {reason}: {snippet}")]
    Projection {
        status: StatusCode,
        reason: String,
        snippet: String,
    },
}

impl Error {
    pub fn config(variable: &'static str, reason: impl Into<String>) -> Self {
        Error::Config {
            variable,
            reason: reason.into(),
        }
    }

    /// Whether this error is the operator's fault (usage) rather than a runtime failure
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::Arity { .. }
                | Error::NoCommand
                | Error::UnknownCommand(_)
                | Error::UnknownFlag(_)
        )
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_usage() {
            EXIT_USAGE
        } else {
            EXIT_FAILURE
        }
    }
}

impl From<octocrab::Error> for Error {
    fn from(e: octocrab::Error) -> Self {
        Error::Transport(describe_octocrab_error(&e))
    }
}

/// The chain of causes behind an Octocrab error, root cause last. Octocrab's own
/// `Display` appends a captured backtrace, so it is only used when there is no source.
fn describe_octocrab_error(e: &octocrab::Error) -> String {
    let mut causes = Vec::new();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }
    if causes.is_empty() {
        let message = e.to_string();
        return match message.find("Found at") {
            Some(cut) => message[..cut].trim().to_string(),
            None => message.trim().to_string(),
        };
    }
    causes.join(": ")
}

pub type Result<T> = std::result::Result<T, Error>;
