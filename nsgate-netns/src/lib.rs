//! Network-namespace authorization and entry
//!
//! This crate is the whole security boundary of nsgate, organized as a
//! pipeline of hard gates:
//! - Resolver - classify the namespace selector into a handle path and
//!   an ownership claim
//! - Ownership validator - prove the caller owns the claimed resource
//! - Allowlist gate - restrict the command to a closed set of programs
//! - Entry & handoff - join the namespace and exec, preserving the
//!   descriptor table
//!
//! The first failing stage aborts the run; nothing privileged happens
//! until every earlier check has passed.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod entry;
pub mod ownership;
pub mod pipeline;
pub mod policy;
pub mod resolver;

pub use pipeline::{run, InvocationRequest};
pub use policy::{AllowedProgram, Policy};
pub use resolver::{NamespaceSelector, OwnerClaim, ResolvedNamespace};
