// SPDX-License-Identifier: MIT OR Apache-2.0
//! Evaluation settings, stored as RON.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by the evaluator and the image sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorSettings {
    /// Output image edge length in pixels; also sets the blur step
    pub resolution: u32,
    /// Maximum link depth followed before evaluation gives up
    pub max_depth: u32,
}

impl Default for EvaluatorSettings {
    fn default() -> Self {
        Self {
            resolution: 256,
            max_depth: 256,
        }
    }
}

impl EvaluatorSettings {
    /// Default settings at another resolution
    pub fn with_resolution(resolution: u32) -> Self {
        Self {
            resolution,
            ..Self::default()
        }
    }

    /// Parse settings from RON; missing fields take their defaults
    pub fn from_ron(text: &str) -> Result<Self, SettingsError> {
        Ok(ron::from_str(text)?)
    }

    /// Serialize settings to pretty RON
    pub fn to_ron(&self) -> Result<String, SettingsError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Load settings from a RON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_ron(&text)?;
        tracing::trace!("Loaded evaluator settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to a RON file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }
}

/// Settings I/O errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed RON
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),
}
