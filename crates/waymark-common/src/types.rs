//! Core types shared across Waymark components.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{LOCATION_PATH_PREFIX, QR_FILE_EXTENSION};

/// One stop in the hunt.
///
/// The `id` doubles as the URL path segment and the QR archive entry name,
/// so it must never change once codes have been printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Short stable identifier (e.g. "A")
    pub id: String,

    /// Human-readable label
    pub display_name: String,

    /// Riddle shown once the location is unlocked
    pub riddle_text: String,

    /// Shared password revealed at the previous location
    #[serde(default)]
    pub unlock_secret: String,

    /// Next location id, or None for the final stop
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successor: Option<String>,
}

impl LocationRecord {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        riddle_text: impl Into<String>,
        unlock_secret: impl Into<String>,
        successor: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            riddle_text: riddle_text.into(),
            unlock_secret: unlock_secret.into(),
            successor: successor.map(str::to_string),
        }
    }

    /// Returns true if this is the last stop of the hunt
    pub fn is_terminal(&self) -> bool {
        self.successor.is_none()
    }

    /// Canonical page URL encoded into this location's QR code
    pub fn canonical_url(&self, base_url: &str) -> String {
        format!(
            "{}{}{}",
            base_url.trim_end_matches('/'),
            LOCATION_PATH_PREFIX,
            self.id
        )
    }

    /// File name used for this location's QR image
    pub fn qr_file_name(&self) -> String {
        format!("{}.{}", self.id, QR_FILE_EXTENSION)
    }
}

/// How submitted unlock passwords are normalized before comparison.
///
/// Exactly one rule is active per process. The same rule is applied to the
/// stored secret so catalogs may be authored in any case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialRule {
    /// Lowercase and remove every whitespace character
    #[default]
    LowercaseStripWhitespace,
    /// Lowercase only; whitespace is significant
    Lowercase,
}

impl CredentialRule {
    pub fn normalize(&self, raw: &str) -> String {
        match self {
            Self::LowercaseStripWhitespace => raw
                .chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect(),
            Self::Lowercase => raw.to_lowercase(),
        }
    }
}

/// Per-location gate state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlockState {
    Locked,
    Unlocked,
}

/// Result of evaluating one request against a location's gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlockOutcome {
    /// Content is revealed
    Unlocked,
    /// No password submitted yet
    Locked,
    /// A password was submitted and did not match; still locked
    Rejected,
}

impl UnlockOutcome {
    pub fn state(&self) -> UnlockState {
        match self {
            Self::Unlocked => UnlockState::Unlocked,
            Self::Locked | Self::Rejected => UnlockState::Locked,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self, Self::Unlocked)
    }

    /// Returns true if the caller should re-prompt with a mismatch message
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Rejected)
    }
}

/// Final answer verification result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl CompletionResult {
    pub fn completed(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            completed_at: Some(Utc::now()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            completed_at: None,
        }
    }
}

/// QR error correction level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QrEcLevel {
    /// ~7% recovery
    L,
    /// ~15% recovery
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    #[default]
    H,
}
