//! Caller ownership validation
//!
//! The authorization decision itself: prove, via filesystem metadata,
//! that the invoking user owns the resource the namespace handle
//! represents. This stage reads metadata and nothing else; it fails
//! closed on any lookup error.

use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use nix::unistd::Uid;
use nsgate_core::{CallerIdentity, Error, Result};
use tracing::debug;

use crate::resolver::{OwnerClaim, ResolvedNamespace};

/// Decide whether `caller` may use the resolved namespace.
///
/// # Errors
/// Returns `OwnershipMismatch` when the resource belongs to someone
/// else, and `Resolution` when its metadata cannot be read at all
/// (target vanished, permission denied).
pub fn authorize(resolved: &ResolvedNamespace, caller: &CallerIdentity) -> Result<()> {
    match resolved.owner_claim {
        OwnerClaim::ProcDir(pid) => {
            let proc_dir = pid.proc_dir();
            let owner = owner_of(&proc_dir)?;
            ensure_owner(&proc_dir, owner, caller)
        }
        OwnerClaim::RuntimeDir { claimed_uid } => {
            // The uid embedded in the path is attacker-controlled: it
            // must equal the caller before the filesystem is consulted,
            // and the handle's real owner must then agree as well.
            if claimed_uid != caller.uid() {
                return Err(Error::OwnershipMismatch {
                    resource: resolved.handle_path.clone(),
                    owner: claimed_uid,
                    caller: caller.uid(),
                });
            }
            let owner = owner_of(&resolved.handle_path)?;
            ensure_owner(&resolved.handle_path, owner, caller)
        }
    }
}

/// Owner uid of `path`, following symlinks.
///
/// Following is deliberate: the check must describe the object that
/// `open(2)` will reach in the entry stage, so a caller-owned symlink
/// pointing at a foreign handle is judged by the target's owner.
fn owner_of(path: &Path) -> Result<Uid> {
    let metadata = fs::metadata(path).map_err(|source| Error::Resolution {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Uid::from_raw(metadata.uid()))
}

fn ensure_owner(resource: &Path, owner: Uid, caller: &CallerIdentity) -> Result<()> {
    if owner == caller.uid() {
        debug!(resource = %resource.display(), uid = %owner, "ownership verified");
        Ok(())
    } else {
        Err(Error::OwnershipMismatch {
            resource: resource.to_path_buf(),
            owner,
            caller: caller.uid(),
        })
    }
}
