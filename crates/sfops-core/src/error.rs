//! Error types for sfops operations.

use sfops_cluster::ClusterError;
use std::io;
use thiserror::Error;

/// Result type for sfops operations.
pub type Result<T> = std::result::Result<T, OpsError>;

/// Errors that can occur while running an operational target.
#[derive(Debug, Error)]
pub enum OpsError {
    /// An external command ran and exited unsuccessfully.
    #[error("`{command}` {}", exit_label(.code, .signal))]
    CommandFailed {
        /// Rendered command line.
        command: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Terminating signal, on Unix.
        signal: Option<i32>,
    },

    /// An external command could not be started.
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying launch error.
        #[source]
        source: io::Error,
    },

    /// A required environment variable is unset or empty.
    #[error("environment variable {0} is not set")]
    MissingEnv(String),

    /// Configuration file or value error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Download returned a non-success status.
    #[error("download of {url} failed: {reason}")]
    Download {
        /// Requested URL.
        url: String,
        /// Status or transport failure.
        reason: String,
    },

    /// Invalid argument supplied by the caller.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Cluster request templating error.
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl OpsError {
    /// Exit code to hand back to the invoking shell, if an external tool set one.
    ///
    /// A child killed by signal `n` maps to `128 + n`, as a POSIX shell reports it.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            OpsError::CommandFailed { code: Some(code), .. } => Some(*code),
            OpsError::CommandFailed { signal: Some(signal), .. } => Some(128 + signal),
            _ => None,
        }
    }
}

#[allow(clippy::ref_option)]
fn exit_label(code: &Option<i32>, signal: &Option<i32>) -> String {
    match (code, signal) {
        (Some(code), _) => format!("exited with status {code}"),
        (None, Some(signal)) => format!("was terminated by signal {signal}"),
        (None, None) => "was terminated by a signal".to_string(),
    }
}
