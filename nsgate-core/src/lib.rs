//! nsgate core - error taxonomy and foundation types
//!
//! This crate provides the types shared by the validation pipeline:
//! the terminal error taxonomy with its exit-status bands, the validated
//! target pid, and the once-per-run snapshots of caller identity and
//! socket-activation environment.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod identity;
pub mod types;

pub use error::{Error, Result};
pub use identity::{ActivationEnv, CallerIdentity};
pub use types::Pid;
