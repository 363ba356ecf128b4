//! The validation pipeline
//!
//! Resolver, ownership validator, allowlist gate, then entry & handoff,
//! in that order, each a hard gate. A single pipeline parameterized by
//! [`Policy`] replaces per-deployment helper variants: what varies is
//! the policy value, never the checks.

use std::convert::Infallible;
use std::path::Path;

use nsgate_core::{ActivationEnv, CallerIdentity, Result};
use tracing::debug;

use crate::entry;
use crate::ownership;
use crate::policy::Policy;
use crate::resolver::{self, NamespaceSelector};

/// A parsed, well-formed invocation: what to join and what to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    /// Which namespace to join
    pub selector: NamespaceSelector,
    /// argv for the final exec; never empty
    pub command: Vec<String>,
}

/// Run the full pipeline and hand control to the target command.
///
/// Returns only on refusal or failure; no privileged action happens
/// until every check has passed.
///
/// # Errors
/// Propagates the first failing stage's error untouched, so the caller
/// can map it onto the exit-status bands.
pub fn run(
    request: &InvocationRequest,
    policy: &Policy,
    caller: &CallerIdentity,
    activation: &ActivationEnv,
) -> Result<Infallible> {
    run_with(request, policy, caller, activation, entry::enter_and_exec)
}

/// Pipeline with the entry stage injected, so tests can prove that
/// nothing privileged runs downstream of a failed check.
fn run_with<F>(
    request: &InvocationRequest,
    policy: &Policy,
    caller: &CallerIdentity,
    activation: &ActivationEnv,
    enter: F,
) -> Result<Infallible>
where
    F: FnOnce(&Path, &ActivationEnv, &[String]) -> Result<Infallible>,
{
    let resolved = resolver::resolve(&request.selector)?;
    debug!(handle = %resolved.handle_path.display(), "resolved namespace selector");

    ownership::authorize(&resolved, caller)?;

    let program = policy.check_command(&request.command)?;
    debug!(program = program.basename(), "command allowed");

    enter(&resolved.handle_path, activation, &request.command)
}
