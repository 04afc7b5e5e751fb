//! Session descriptor input.
//!
//! Claude Code invokes the status line with a single JSON document on stdin
//! describing the current session: working directory, transcript path, and
//! the active model descriptor.

use std::io::Read;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{CcslError, Result};

/// The session descriptor read from stdin.
///
/// All fields are optional at the boundary; consumers fall back to sensible
/// defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionInput {
    /// Working directory of the session
    #[serde(default)]
    pub cwd: Option<String>,

    /// Path to the session transcript (JSONL)
    #[serde(default)]
    pub transcript_path: Option<PathBuf>,

    /// Session identifier
    #[serde(default)]
    pub session_id: Option<String>,

    /// Active model descriptor
    #[serde(default)]
    pub model: Option<ModelDescriptor>,
}

/// Model descriptor as sent by Claude Code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelDescriptor {
    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub id: Option<String>,
}

impl SessionInput {
    /// Parse a session descriptor from a reader.
    ///
    /// Empty input and invalid JSON are input errors (exit code 2).
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;

        if raw.trim().is_empty() {
            return Err(CcslError::input("empty input received"));
        }

        Ok(serde_json::from_str(&raw)?)
    }

    /// The model display name, defaulting to "Unknown".
    pub fn model_display_name(&self) -> &str {
        self.model
            .as_ref()
            .and_then(|m| m.display_name.as_deref())
            .unwrap_or("Unknown")
    }

    /// The working directory, defaulting to the process cwd.
    pub fn working_dir(&self) -> String {
        match &self.cwd {
            Some(cwd) => cwd.clone(),
            None => std::env::current_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }
}
