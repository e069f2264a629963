//! Account password with memory zeroing
//!
//! The password is held in a buffer that is wiped when dropped, and its
//! `Debug`/`Display` output never contains the secret, so a `Password` can
//! safely appear in logged structs.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A gateway account password
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
    /// Wrap a password string
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// Expose the password
    ///
    /// The returned reference should only be used to build a request body and
    /// must not be stored or logged.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the password is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Password {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Password {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "Password(<empty>)")
        } else {
            write!(f, "Password([REDACTED])")
        }
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}
