//! One-time code awaiting confirmation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flow a pending code was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePurpose {
    Verification,
    Reset,
}

impl CodePurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::Verification => "verification",
            CodePurpose::Reset => "reset",
        }
    }
}

impl std::fmt::Display for CodePurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CodePurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verification" => Ok(CodePurpose::Verification),
            "reset" => Ok(CodePurpose::Reset),
            other => Err(format!("unknown code purpose: {other}")),
        }
    }
}

/// Hashed code plus its validity window
///
/// Only the salted hash is kept. The plaintext leaves the process through
/// the notification port and nowhere else.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCode {
    pub purpose: CodePurpose,
    pub code_hash: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PendingCode {
    pub fn new(
        purpose: CodePurpose,
        code_hash: String,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            purpose,
            code_hash,
            issued_at,
            expires_at,
        }
    }
}

impl std::fmt::Debug for PendingCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingCode")
            .field("purpose", &self.purpose)
            .field("code_hash", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
