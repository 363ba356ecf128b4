//! Error types for nsgate
//!
//! Every variant is terminal: the helper refuses and exits, it never
//! retries. Orchestration layers branch on the numeric exit bands, so
//! [`Error::exit_status`] is part of the external contract.

use std::path::PathBuf;

use nix::unistd::Uid;
use thiserror::Error;

/// Exit status for command-line usage errors.
pub const EXIT_USAGE: i32 = 2;

/// Exit status for policy and authorization refusals.
pub const EXIT_POLICY: i32 = 126;

/// Exit status for failed OS primitives.
pub const EXIT_OS: i32 = 127;

/// nsgate error types
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Malformed or contradictory command line
    #[error("usage error: {message}")]
    Usage {
        /// What was wrong with the invocation
        message: String,
    },

    /// Malformed numeric argument
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What failed to parse
        message: String,
    },

    /// Path matches neither accepted namespace-handle shape
    #[error("unrecognized namespace path: {}", .path.display())]
    UnrecognizedNamespacePath {
        /// The rejected path
        path: PathBuf,
    },

    /// Caller does not own the claimed resource
    #[error("ownership mismatch on {}: owned by uid {}, caller is uid {}", .resource.display(), .owner, .caller)]
    OwnershipMismatch {
        /// Resource whose owner was checked
        resource: PathBuf,
        /// Uid the resource reports (or claims) as its owner
        owner: Uid,
        /// Real uid of the invoking user
        caller: Uid,
    },

    /// Metadata lookup failed for reasons other than ownership
    #[error("cannot resolve {}: {}", .path.display(), .source)]
    Resolution {
        /// Path whose metadata was requested
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Command basename is not in the allowlist
    #[error("command not allowed: {program}")]
    CommandNotAllowed {
        /// Program token that was refused
        program: String,
    },

    /// An OS primitive (open, setns, exec) failed
    #[error("{operation} failed: {source}")]
    OperationFailed {
        /// The primitive that failed
        operation: &'static str,
        /// Underlying OS error
        source: std::io::Error,
    },
}

impl Error {
    /// Map the error into the exit-status band the invoking layer
    /// branches on: 2 for usage, 126 for policy/authorization refusals,
    /// 127 for OS-level failures.
    #[must_use]
    pub const fn exit_status(&self) -> i32 {
        match self {
            Self::Usage { .. } => EXIT_USAGE,
            Self::InvalidArgument { .. }
            | Self::UnrecognizedNamespacePath { .. }
            | Self::OwnershipMismatch { .. }
            | Self::CommandNotAllowed { .. } => EXIT_POLICY,
            Self::Resolution { .. } | Self::OperationFailed { .. } => EXIT_OS,
        }
    }
}

/// Result type alias for nsgate operations
pub type Result<T> = std::result::Result<T, Error>;
