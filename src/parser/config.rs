//! Per-session parser configuration

use serde::Deserialize;

fn default_tab_size() -> usize {
    2
}

/// Recognized session options. Unknown keys in a JSON encoding are
/// ignored rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserConfig {
    /// Columns a tab counts for when computing indent levels.
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            tab_size: default_tab_size(),
        }
    }
}
