//! Core entity structs shared across the workspace.
//!
//! Identity records arrive pre-validated from the contact provider; the
//! core never re-checks their format. Artifacts are opaque identifiers
//! compared for exact equality only.

use core::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Name and contact channels of a participant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Display name.
    pub name: String,
    /// Email address, if one was supplied.
    pub email: Option<String>,
    /// Normalized phone number (digits only), if one was supplied.
    pub phone: Option<String>,
}

impl Identity {
    /// Create an identity with no contact channels.
    pub const fn named(name: String) -> Self {
        Self {
            name,
            email: None,
            phone: None,
        }
    }

    /// Attach an email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Attach a phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// The prefix placed in front of every status line addressed to this
    /// participant, naming the channels the notice is delivered to.
    pub fn notification_prefix(&self) -> String {
        match (&self.email, &self.phone) {
            (Some(email), Some(phone)) => {
                format!("Notification for {} was sent to {email} and {phone}: ", self.name)
            }
            (Some(channel), None) | (None, Some(channel)) => {
                format!("Notification for {} was sent to {channel}: ", self.name)
            }
            (None, None) => format!("Notification for {}: ", self.name),
        }
    }
}

// ---------------------------------------------------------------------------
// Artifact
// ---------------------------------------------------------------------------

/// Opaque identifier of a submitted artifact.
///
/// Two artifacts are the same submission exactly when their identifiers
/// are equal. No content is ever inspected.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Artifact(String);

impl Artifact {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
