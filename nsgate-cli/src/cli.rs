//! CLI argument definitions

use std::path::PathBuf;

use clap::Parser;
use nsgate_core::{Error, Pid, Result};
use nsgate_netns::{InvocationRequest, NamespaceSelector};

#[derive(Parser)]
#[command(name = "nsgate")]
#[command(
    about = "Join a target network namespace and exec an approved command",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Target process whose network namespace to join
    #[arg(long, value_name = "PID", allow_hyphen_values = true)]
    pub pid: Option<String>,

    /// Explicit namespace handle path (/proc/<pid>/ns/net or
    /// /run/user/<uid>/netns/<name>)
    #[arg(long, value_name = "PATH")]
    pub netns: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to exec inside the namespace
    #[arg(last = true, required = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// Convert the raw surface into a validated request.
    ///
    /// Exactly one of `--pid`/`--netns` must be present; supplying both
    /// is refused rather than resolved by precedence. The pid is kept as
    /// a string at the clap layer and parsed here, so a malformed value
    /// lands in the policy exit band instead of clap's usage band.
    pub fn into_request(self) -> Result<InvocationRequest> {
        let selector = match (self.pid, self.netns) {
            (Some(_), Some(_)) => {
                return Err(Error::Usage {
                    message: "--pid and --netns are mutually exclusive".to_string(),
                })
            }
            (None, None) => {
                return Err(Error::Usage {
                    message: "one of --pid or --netns is required".to_string(),
                })
            }
            (Some(pid), None) => NamespaceSelector::ByPid(pid.parse::<Pid>()?),
            (None, Some(path)) => NamespaceSelector::ExplicitPath(path),
        };

        Ok(InvocationRequest {
            selector,
            command: self.command,
        })
    }
}
