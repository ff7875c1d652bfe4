//! Decrypted secret contents.
//!
//! A decrypted `pass` file holds the password on its first line and free-form
//! metadata after it. [`DecryptedSecret`] keeps the whole text in a zeroizing
//! buffer and never prints it through `Debug` or `Display`.

use crate::secret::SecretString;
use std::fmt;

/// Plaintext produced by the crypto client.
pub struct DecryptedSecret {
    inner: SecretString,
}

impl DecryptedSecret {
    /// Create a new decrypted secret from raw plaintext.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: SecretString::new(value),
        }
    }

    /// Expose the full plaintext. Use sparingly.
    pub fn expose(&self) -> &str {
        self.inner.expose_secret()
    }

    /// The first whitespace-delimited token, i.e. the password itself.
    ///
    /// Empty plaintext yields an empty token.
    pub fn first_token(&self) -> &str {
        self.expose().split_whitespace().next().unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for DecryptedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for DecryptedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for DecryptedSecret {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
