//! File-driven error settings
//!
//! Lets a deployment declare its application codes, the stack depth and the
//! message separator in JSON instead of code:
//!
//! ```json
//! {
//!   "codes": { "100": "quota exceeded", "101": "tenant suspended" },
//!   "max_stack_frames": 8,
//!   "message_separator": " <- "
//! }
//! ```

use crate::error::{joined_renderer, reset_renderer, set_renderer};
use crate::registry::{set_registry, Registry};
use crate::stack::{set_max_stack_frames, DEFAULT_MAX_STACK_FRAMES};
use errkit_common::{Code, RESERVED_CODES};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Failures while loading or applying [`ErrorSettings`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read
    #[error("Failed to read error settings from {}: {source}", path.display())]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// The document is not valid settings JSON
    #[error("Invalid error settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// An application code falls inside the built-in range
    #[error("Error code {0} is reserved for built-in codes")]
    ReservedCode(u32),

    /// `max_stack_frames` was zero
    #[error("max_stack_frames must be greater than zero")]
    InvalidStackDepth,
}

/// Process-wide error settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSettings {
    /// Start from the built-in descriptions and conversions
    #[serde(default = "default_include_builtin_codes")]
    pub include_builtin_codes: bool,
    /// Application codes and their descriptions; all must be outside the reserved range
    #[serde(default)]
    pub codes: BTreeMap<u32, String>,
    /// Frames kept when a stack trace is resolved, at least one
    #[serde(default = "default_max_stack_frames")]
    pub max_stack_frames: usize,
    /// Joins local messages and parent text; `": "` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_separator: Option<String>,
}

fn default_include_builtin_codes() -> bool {
    true
}

fn default_max_stack_frames() -> usize {
    DEFAULT_MAX_STACK_FRAMES
}

impl Default for ErrorSettings {
    fn default() -> Self {
        Self {
            include_builtin_codes: default_include_builtin_codes(),
            codes: BTreeMap::new(),
            max_stack_frames: default_max_stack_frames(),
            message_separator: None,
        }
    }
}

impl ErrorSettings {
    /// Parse and validate settings from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a JSON settings file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Reject reserved codes and a zero stack depth
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_stack_frames == 0 {
            return Err(ConfigError::InvalidStackDepth);
        }
        match self.codes.keys().find(|code| **code < RESERVED_CODES) {
            Some(code) => Err(ConfigError::ReservedCode(*code)),
            None => Ok(()),
        }
    }

    /// Registry described by these settings
    pub fn build_registry(&self) -> Result<Registry, ConfigError> {
        self.validate()?;
        let mut registry = if self.include_builtin_codes {
            Registry::with_defaults()
        } else {
            Registry::new()
        };
        for (code, description) in &self.codes {
            registry.register_error_code(Code::new(*code), description.clone());
        }
        Ok(registry)
    }

    /// Apply these settings process-wide, returning the replaced registry
    pub fn install(&self) -> Result<Arc<Registry>, ConfigError> {
        let registry = self.build_registry()?;
        set_max_stack_frames(self.max_stack_frames);
        match &self.message_separator {
            Some(separator) => set_renderer(joined_renderer(separator.clone())),
            None => reset_renderer(),
        }
        Ok(set_registry(registry))
    }
}
