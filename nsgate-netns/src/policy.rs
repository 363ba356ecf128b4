//! Deployment policy: the command allowlist
//!
//! Which programs the gate may hand control to is deployment policy,
//! not core algorithm. The set itself is a closed enumeration so that
//! membership checks are exhaustive at compile time instead of living
//! in ad hoc string arrays.

use std::path::Path;

use nsgate_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// A program the gate may exec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllowedProgram {
    /// Network inspection (`ip`)
    Ip,
    /// Namespace-aware HTTP client (`curl`)
    Curl,
    /// Socket-activation proxy (`systemd-socket-proxyd`)
    SystemdSocketProxyd,
}

impl AllowedProgram {
    /// The exact basename this entry matches, case-sensitively
    #[must_use]
    pub const fn basename(self) -> &'static str {
        match self {
            Self::Ip => "ip",
            Self::Curl => "curl",
            Self::SystemdSocketProxyd => "systemd-socket-proxyd",
        }
    }
}

/// Allowlist membership for one deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Programs the gate will exec
    pub allowed_programs: Vec<AllowedProgram>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            allowed_programs: vec![
                AllowedProgram::Ip,
                AllowedProgram::Curl,
                AllowedProgram::SystemdSocketProxyd,
            ],
        }
    }
}

impl Policy {
    /// Policy that refuses everything; combine with [`Policy::with_program`]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            allowed_programs: Vec::new(),
        }
    }

    /// Add a program to the allowlist
    #[must_use]
    pub fn with_program(mut self, program: AllowedProgram) -> Self {
        if !self.allowed_programs.contains(&program) {
            self.allowed_programs.push(program);
        }
        self
    }

    /// Check the first token of a command vector against the allowlist.
    ///
    /// Only the final path component of the token participates in the
    /// match; any directory portion is ignored. The exec'd binary is
    /// still resolved by `execvp`, so this gate asserts intent, not the
    /// exact binary image.
    ///
    /// # Errors
    /// Returns `CommandNotAllowed` when the basename matches no
    /// allowlist entry, and `Usage` for an empty command vector.
    pub fn check_command(&self, command: &[String]) -> Result<AllowedProgram> {
        let program = command.first().ok_or_else(|| Error::Usage {
            message: "empty command".to_string(),
        })?;

        let basename = Path::new(program)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();

        self.allowed_programs
            .iter()
            .copied()
            .find(|allowed| allowed.basename() == basename)
            .ok_or_else(|| Error::CommandNotAllowed {
                program: program.clone(),
            })
    }
}
