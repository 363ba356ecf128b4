//! Immutable snapshots of process-global state
//!
//! The caller's identity and the inherited socket-activation environment
//! are read exactly once, at startup, and passed through the validation
//! chain. Re-querying mid-run would let a single invocation observe two
//! different answers to the same question.

use nix::unistd::Uid;

/// The real uid of the invoking user, captured once.
///
/// The *real* uid is deliberate: when the helper runs setuid or with a
/// file capability, the effective uid describes the helper, not the
/// caller the authorization decision is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity {
    uid: Uid,
}

impl CallerIdentity {
    /// Snapshot the real uid of the current process
    #[must_use]
    pub fn current() -> Self {
        Self {
            uid: Uid::current(),
        }
    }

    /// Build an identity for a known uid
    #[must_use]
    pub const fn from_uid(uid: Uid) -> Self {
        Self { uid }
    }

    /// The caller's real uid
    #[must_use]
    pub const fn uid(self) -> Uid {
        self.uid
    }
}

/// Snapshot of the systemd socket-activation environment.
///
/// `LISTEN_FDS` counts the listening descriptors a supervisor passed in;
/// `LISTEN_PID` names the pid those descriptors were stamped for. The
/// entry stage rewrites `LISTEN_PID` before exec only when
/// [`ActivationEnv::is_active`] holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationEnv {
    listen_fds: Option<String>,
    listen_pid: Option<String>,
}

impl ActivationEnv {
    /// Capture `LISTEN_FDS` and `LISTEN_PID` from the inherited environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            listen_fds: std::env::var("LISTEN_FDS").ok(),
            listen_pid: std::env::var("LISTEN_PID").ok(),
        }
    }

    /// Build a snapshot from explicit values
    #[must_use]
    pub fn new(listen_fds: Option<&str>, listen_pid: Option<&str>) -> Self {
        Self {
            listen_fds: listen_fds.map(str::to_string),
            listen_pid: listen_pid.map(str::to_string),
        }
    }

    /// Number of activation descriptors the supervisor claims to have
    /// passed. Absent or unparseable `LISTEN_FDS` counts as zero.
    #[must_use]
    pub fn descriptor_count(&self) -> u32 {
        self.listen_fds
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// Whether the activation protocol is in play for this invocation
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.descriptor_count() > 0
    }

    /// The pid the supervisor stamped the descriptors for, verbatim
    #[must_use]
    pub fn expected_pid(&self) -> Option<&str> {
        self.listen_pid.as_deref()
    }
}
