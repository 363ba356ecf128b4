//! Core type definitions with strong typing and validation

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::{Error, Result};

/// A validated target process identifier.
///
/// The only way input reaches a `Pid` is through [`FromStr`], which
/// accepts base-10 digits with no sign, no surrounding noise, and a value
/// in `1..=i32::MAX`. Anything else is rejected outright rather than
/// truncated or wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Pid(i32);

impl Pid {
    /// Create from a raw pid value
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `pid` is not strictly positive
    pub fn from_raw(pid: i32) -> Result<Self> {
        if pid > 0 {
            Ok(Self(pid))
        } else {
            Err(Error::InvalidArgument {
                message: format!("pid must be positive, got {pid}"),
            })
        }
    }

    /// The helper's own pid
    #[must_use]
    pub fn current() -> Self {
        #[allow(clippy::cast_possible_wrap)]
        Self(std::process::id() as i32)
    }

    /// Get the raw pid value
    #[must_use]
    pub const fn as_raw(self) -> i32 {
        self.0
    }

    /// The `/proc/<pid>` directory entry whose owner vouches for the pid
    #[must_use]
    pub fn proc_dir(self) -> PathBuf {
        PathBuf::from(format!("/proc/{}", self.0))
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Pid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidArgument {
                message: format!("pid must be a positive decimal integer, got {s:?}"),
            });
        }

        let value: i32 = s.parse().map_err(|_| Error::InvalidArgument {
            message: format!("pid out of range: {s:?}"),
        })?;

        Self::from_raw(value)
    }
}
