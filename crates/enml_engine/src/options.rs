use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::FetchSettings;

/// Settings for one conversion. Immutable once a conversion starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Base address relative links and image sources are resolved against.
    pub base_url: String,
    /// Turn every recoverable issue into a conversion failure.
    pub strict: bool,
    pub include_comments: bool,
    /// Drop all images instead of turning them into resources.
    pub ignore_files: bool,
    /// Inputs longer than this are rejected before parsing.
    pub max_input_bytes: usize,
    pub fetch: FetchSettings,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            strict: false,
            include_comments: false,
            ignore_files: false,
            max_input_bytes: 16 * 1024 * 1024,
            fetch: FetchSettings::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid options: {0}")]
    Parse(String),
}

impl ConvertOptions {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Parse options from a RON document; missing fields keep their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self, OptionsError> {
        ron::from_str(text).map_err(|err| OptionsError::Parse(err.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let text = fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    pub fn to_ron_string(&self) -> Result<String, OptionsError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())
            .map_err(|err| OptionsError::Parse(err.to_string()))
    }
}
