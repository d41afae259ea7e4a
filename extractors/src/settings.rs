use serde::{Deserialize, Serialize};

/// Options for building the dispatch table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorSettings {
    /// Archive or document extensions to leave out of the dispatch table,
    /// e.g. `["rar", "7z"]`. Inputs with these extensions fail with
    /// `UnsupportedFormat`.
    pub disabled_formats: Vec<String>,
    /// Replace invalid UTF-8 in plain-text leaves instead of failing them.
    pub lossy_text: bool,
}

impl ExtractorSettings {
    pub fn is_enabled(&self, extension: &str) -> bool {
        !self
            .disabled_formats
            .iter()
            .any(|disabled| disabled.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            disabled_formats: Vec::new(),
            lossy_text: true,
        }
    }
}
