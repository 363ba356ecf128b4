//! Namespace entry and process handoff
//!
//! The only stage with side effects. By the time control reaches this
//! module every check has passed; what remains is open the handle, join
//! the namespace, patch up the socket-activation environment, and
//! replace the process image. The descriptor table is the payload:
//! nothing here may close or reshuffle inherited descriptors, which is
//! why the handle itself is opened close-on-exec.

use std::convert::Infallible;
use std::ffi::CString;
use std::path::Path;

use nix::fcntl::{open, OFlag};
use nix::sched::{setns, CloneFlags};
use nix::sys::stat::Mode;
use nix::unistd::execvp;
use nsgate_core::{ActivationEnv, Error, Result};
use tracing::debug;

/// Open the namespace handle, join it, and exec `command`.
///
/// Returns only on failure; on success the helper's process image no
/// longer exists.
///
/// # Errors
/// Returns `OperationFailed` when open, setns, or execvp fail.
pub fn enter_and_exec(
    handle_path: &Path,
    activation: &ActivationEnv,
    command: &[String],
) -> Result<Infallible> {
    let handle = open(handle_path, OFlag::O_RDONLY | OFlag::O_CLOEXEC, Mode::empty()).map_err(
        |errno| Error::OperationFailed {
            operation: "open namespace handle",
            source: errno.into(),
        },
    )?;

    // The switch itself is a single syscall; there is no partially
    // joined state to unwind.
    setns(&handle, CloneFlags::CLONE_NEWNET).map_err(|errno| Error::OperationFailed {
        operation: "setns",
        source: errno.into(),
    })?;
    drop(handle);

    debug!(handle = %handle_path.display(), "joined network namespace");

    fixup_activation(activation);

    exec(command)
}

/// Rewrite `LISTEN_PID` to the current pid when activation descriptors
/// are being carried across the exec boundary.
///
/// The supervisor stamped `LISTEN_PID` with the pid it spawned; after
/// the coming exec the protocol expects the pid of the new image. When
/// `LISTEN_FDS` is absent, zero, or garbage, no descriptors are in play
/// and the environment is left untouched.
fn fixup_activation(activation: &ActivationEnv) {
    if !activation.is_active() {
        return;
    }

    let pid = std::process::id().to_string();
    debug!(
        listen_fds = activation.descriptor_count(),
        stale_listen_pid = ?activation.expected_pid(),
        new_listen_pid = %pid,
        "rewriting LISTEN_PID for socket activation"
    );

    // Single-threaded and about to exec; nothing else can observe the
    // environment mutation.
    unsafe { std::env::set_var("LISTEN_PID", pid) };
}

/// Replace the process image, passing the full environment and every
/// descriptor not marked close-on-exec through to the new program.
fn exec(command: &[String]) -> Result<Infallible> {
    let argv = command
        .iter()
        .map(|arg| CString::new(arg.as_bytes()))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| Error::OperationFailed {
            operation: "execvp",
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "argument contains an interior NUL byte",
            ),
        })?;

    let Some(program) = argv.first() else {
        return Err(Error::Usage {
            message: "empty command".to_string(),
        });
    };

    match execvp(program, &argv) {
        Ok(never) => match never {},
        Err(errno) => Err(Error::OperationFailed {
            operation: "execvp",
            source: errno.into(),
        }),
    }
}

/// Log the handoff-relevant inherited state: which low-numbered
/// descriptors are open and what the activation snapshot says.
///
/// Activation descriptors start at fd 3; seeing them open here confirms
/// the supervisor's descriptors survived as far as the helper.
pub fn log_handoff_state(activation: &ActivationEnv) {
    for fd in 0..10 {
        // F_GETFD probes existence without touching the descriptor
        let open = unsafe { libc::fcntl(fd, libc::F_GETFD) } != -1;
        if open {
            debug!(fd, "inherited descriptor is open");
        }
    }

    debug!(
        listen_fds = activation.descriptor_count(),
        listen_pid = ?activation.expected_pid(),
        "activation environment"
    );
}
