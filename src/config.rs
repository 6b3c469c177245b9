//! Compiler configuration.

use serde::Deserialize;

use crate::scanner::ScanMode;

/// Options for a compile run. Every field has a default, so `{}` is a valid
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// How delimiters between entity keywords are treated.
    pub scan_mode: ScanMode,
}

impl CompileOptions {
    /// Options matching the keyword scanning of older scripts.
    pub fn legacy() -> Self {
        Self {
            scan_mode: ScanMode::Legacy,
        }
    }

    /// Parse options from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
