//! API credential handling
//!
//! The credential is an opaque secret. It is zeroed on drop, redacted from
//! `Debug` output, and never serialized.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secret key for the hosted generation endpoint
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct ApiCredential {
    inner: String,
}

impl ApiCredential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            inner: secret.into(),
        }
    }

    /// Expose the secret for building a request
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// True when nothing but whitespace was supplied
    pub fn is_blank(&self) -> bool {
        self.inner.trim().is_empty()
    }

    /// Replace the secret, zeroing the previous value
    pub fn set(&mut self, secret: impl Into<String>) {
        self.inner.zeroize();
        self.inner = secret.into();
    }

    /// Append one typed character
    pub fn push(&mut self, c: char) {
        self.inner.push(c);
    }

    /// Remove the last character, if any
    pub fn pop(&mut self) {
        self.inner.pop();
    }

    /// Zero and empty the secret
    pub fn clear(&mut self) {
        self.inner.zeroize();
    }

    /// Mask for display in the form (one bullet per character)
    pub fn masked(&self) -> String {
        "•".repeat(self.inner.chars().count())
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank() {
            write!(f, "ApiCredential(<empty>)")
        } else {
            write!(f, "ApiCredential(<redacted>)")
        }
    }
}
