//! Usage: Supported CLI app identifiers (claude / codex / gemini).

use crate::shared::error::AppResult;
use serde::{Deserialize, Serialize};

pub const SUPPORTED_APP_KEYS: [&str; 3] = ["claude", "codex", "gemini"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppKey {
    Claude,
    Codex,
    Gemini,
}

impl AppKey {
    pub const ALL: [AppKey; 3] = [AppKey::Claude, AppKey::Codex, AppKey::Gemini];

    pub fn parse(input: &str) -> AppResult<Self> {
        match input.trim() {
            "claude" => Ok(Self::Claude),
            "codex" => Ok(Self::Codex),
            "gemini" => Ok(Self::Gemini),
            other => Err(format!(
                "SEC_INVALID_INPUT: app must be one of {}, got: {other}",
                SUPPORTED_APP_KEYS.join(", ")
            )
            .into()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Codex => "codex",
            Self::Gemini => "gemini",
        }
    }
}
