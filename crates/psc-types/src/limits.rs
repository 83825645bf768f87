use serde::{Deserialize, Serialize};

/// Structural bounds applied while merging a line.
///
/// Every field has a default, so a partial JSON object is a valid
/// configuration: `{"max_nesting_depth": 16}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum nesting of value positions (brackets, arrays, calls, operands).
    pub max_nesting_depth: u32,
    /// Maximum number of tokens accepted for one line.
    pub max_tokens_per_line: usize,
}

impl Limits {
    pub const DEFAULT_NESTING_DEPTH: u32 = 64;
    pub const DEFAULT_TOKENS_PER_LINE: usize = 4096;

    /// Parse limits from a JSON object, filling in defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_nesting_depth: Self::DEFAULT_NESTING_DEPTH,
            max_tokens_per_line: Self::DEFAULT_TOKENS_PER_LINE,
        }
    }
}
