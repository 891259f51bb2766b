//! Secret redaction for sensitive values.
//!
//! Wrap the signer's private key (or anything else that must never reach a
//! log line or serialized output) in [`Redacted`]. `Debug`, `Display`, and
//! `Serialize` all render as `"<redacted>"`; the inner value is only
//! reachable through [`Redacted::expose`].

use std::fmt::{self, Debug, Display};

/// Wrapper that hides its inner value from formatting and serialization.
#[derive(Clone)]
pub struct Redacted<T>(T);

impl<T> Redacted<T> {
    pub fn new(value: T) -> Self {
        Redacted(value)
    }

    /// Deliberately reveal the inner value.
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T> Debug for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl<T> Display for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl<T> serde::Serialize for Redacted<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        "<redacted>".serialize(serializer)
    }
}
