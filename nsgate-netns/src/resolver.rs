//! Namespace handle path resolution
//!
//! Turns a selector into a concrete handle path plus the ownership claim
//! the validator must prove. Classification is closed: an explicit path
//! either matches one of the two recognized shapes exactly or is
//! refused. There is no fallback to "trust the path as given", which is
//! what keeps symlink games, `..` hops, and handles for other namespace
//! types out of the privileged stages below.

use std::path::{Path, PathBuf};

use nix::unistd::Uid;
use nsgate_core::{Error, Pid, Result};

/// How the caller identified the target namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceSelector {
    /// Join the network namespace of this process
    ByPid(Pid),
    /// Join the namespace behind an explicit handle path
    ExplicitPath(PathBuf),
}

/// The identity that must match the caller for authorization to succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerClaim {
    /// The owner of `/proc/<pid>` vouches for the namespace
    ProcDir(Pid),
    /// A per-user runtime-directory handle. The uid embedded in the path
    /// is attacker-controlled, so the validator requires it *and* the
    /// filesystem owner of the handle to both equal the caller.
    RuntimeDir {
        /// Uid taken from the `/run/user/<uid>` path segment
        claimed_uid: Uid,
    },
}

/// A selector resolved into a handle path and an ownership claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNamespace {
    /// Filesystem path to the network-namespace handle
    pub handle_path: PathBuf,
    /// What the validator must prove about the caller
    pub owner_claim: OwnerClaim,
}

/// Resolve a selector without deciding authorization.
///
/// # Errors
/// Returns `UnrecognizedNamespacePath` for explicit paths that match
/// neither accepted shape.
pub fn resolve(selector: &NamespaceSelector) -> Result<ResolvedNamespace> {
    match selector {
        NamespaceSelector::ByPid(pid) => Ok(resolve_pid(*pid)),
        NamespaceSelector::ExplicitPath(path) => classify(path),
    }
}

fn resolve_pid(pid: Pid) -> ResolvedNamespace {
    ResolvedNamespace {
        handle_path: PathBuf::from(format!("/proc/{pid}/ns/net")),
        owner_claim: OwnerClaim::ProcDir(pid),
    }
}

/// Classify an explicit path against the two accepted shapes:
///
/// - Shape A: `/proc/<pid>/ns/net` - equivalent to `ByPid(<pid>)`
/// - Shape B: `/run/user/<uid>/netns/<name>`
///
/// Matching works on the literal string, split on `/` only. No
/// canonicalization happens, so `.` and `..` segments, doubled
/// separators, and relative paths all fail the match instead of being
/// normalized into acceptance.
fn classify(path: &Path) -> Result<ResolvedNamespace> {
    let rejected = || Error::UnrecognizedNamespacePath {
        path: path.to_path_buf(),
    };

    let raw = path.to_str().ok_or_else(rejected)?;

    if let Some(rest) = raw.strip_prefix("/proc/") {
        let digits = rest.strip_suffix("/ns/net").ok_or_else(rejected)?;
        let pid = digits.parse::<Pid>().map_err(|_| rejected())?;
        return Ok(resolve_pid(pid));
    }

    if let Some(rest) = raw.strip_prefix("/run/user/") {
        let mut segments = rest.split('/');
        let (Some(digits), Some("netns"), Some(name), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(rejected());
        };

        let claimed_uid = parse_uid(digits).ok_or_else(rejected)?;
        if name.is_empty() || name == "." || name == ".." {
            return Err(rejected());
        }

        return Ok(ResolvedNamespace {
            handle_path: path.to_path_buf(),
            owner_claim: OwnerClaim::RuntimeDir { claimed_uid },
        });
    }

    Err(rejected())
}

fn parse_uid(s: &str) -> Option<Uid> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u32>().ok().map(Uid::from_raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(raw: i32) -> Pid {
        Pid::from_raw(raw).unwrap()
    }

    fn resolve_path(path: &str) -> Result<ResolvedNamespace> {
        resolve(&NamespaceSelector::ExplicitPath(PathBuf::from(path)))
    }

    #[test]
    fn test_by_pid_resolution() {
        let resolved = resolve(&NamespaceSelector::ByPid(pid(4242))).unwrap();
        assert_eq!(resolved.handle_path, PathBuf::from("/proc/4242/ns/net"));
        assert_eq!(resolved.owner_claim, OwnerClaim::ProcDir(pid(4242)));
    }

    #[test]
    fn test_by_pid_matches_shape_a() {
        // The two selector forms must be indistinguishable downstream
        let by_pid = resolve(&NamespaceSelector::ByPid(pid(4242))).unwrap();
        let by_path = resolve_path("/proc/4242/ns/net").unwrap();
        assert_eq!(by_pid, by_path);
    }

    #[test]
    fn test_shape_b_resolution() {
        let resolved = resolve_path("/run/user/1000/netns/vpn0").unwrap();
        assert_eq!(
            resolved.handle_path,
            PathBuf::from("/run/user/1000/netns/vpn0")
        );
        assert_eq!(
            resolved.owner_claim,
            OwnerClaim::RuntimeDir {
                claimed_uid: Uid::from_raw(1000)
            }
        );
    }

    #[test]
    fn test_shape_b_root_uid() {
        let resolved = resolve_path("/run/user/0/netns/host").unwrap();
        assert_eq!(
            resolved.owner_claim,
            OwnerClaim::RuntimeDir {
                claimed_uid: Uid::from_raw(0)
            }
        );
    }

    #[test]
    fn test_unrecognized_paths_rejected() {
        let rejected = [
            // Wrong namespace type
            "/proc/4242/ns/pid",
            "/proc/4242/ns/mnt",
            // Extra or missing segments
            "/proc/4242/ns/net/",
            "/proc/4242/ns",
            "/proc/4242/task/1/ns/net",
            "/proc/ns/net",
            "/run/user/1000/netns",
            "/run/user/1000/netns/a/b",
            "/run/user/1000/netns/",
            "/run/user/netns/vpn0",
            // Non-numeric ids
            "/proc/self/ns/net",
            "/proc/-1/ns/net",
            "/run/user/alice/netns/vpn0",
            "/run/user/-1/netns/vpn0",
            // Traversal and normalization bait
            "/proc/./4242/ns/net",
            "/proc/4242/../1/ns/net",
            "/run/user/1000/netns/..",
            "/run/user/1000/netns/.",
            "//proc/4242/ns/net",
            "/proc//4242/ns/net",
            // Unrelated or relative paths
            "/etc/passwd",
            "proc/4242/ns/net",
            "/var/run/netns/vpn0",
            "",
        ];

        for path in rejected {
            let err = resolve_path(path).unwrap_err();
            assert!(
                matches!(err, Error::UnrecognizedNamespacePath { .. }),
                "expected rejection for {path:?}, got {err}"
            );
        }
    }

    #[test]
    fn test_pid_overflow_in_path_rejected() {
        assert!(resolve_path("/proc/2147483648/ns/net").is_err());
        assert!(resolve_path("/proc/0/ns/net").is_err());
    }
}
