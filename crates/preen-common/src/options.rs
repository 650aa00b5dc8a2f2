use std::path::Path;

use serde::{Deserialize, Serialize};

/// The options the brace-cleanup pass consults.
///
/// The full beautifier has a much larger option schema; only the handful
/// below influence this pass. Loadable from a TOML file so the CLI can share
/// a config with the rest of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Warn when a `#define` body ends with unbalanced braces.
    pub pp_warn_unbalanced_if: bool,
    /// Indent namespace block contents.
    pub indent_namespace: bool,
    /// Together with `indent_namespace`, collapse directly nested namespaces
    /// onto a single brace level.
    pub indent_namespace_single_indent: bool,
    /// Line count past which a namespace block is flagged `LONG_BLOCK`.
    /// Zero disables the check.
    pub indent_namespace_limit: u32,
    /// Keep `else` and a following `if` on separate levels; suppresses the
    /// `else if` fusion when a newline separates the two keywords.
    pub indent_else_if: bool,
    /// In C#, wrap a brace-less `using (...)` body in virtual braces.
    pub indent_using_block: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            pp_warn_unbalanced_if: false,
            indent_namespace: false,
            indent_namespace_single_indent: false,
            indent_namespace_limit: 0,
            indent_else_if: false,
            indent_using_block: true,
        }
    }
}

impl Options {
    /// Read options from a TOML file.
    pub fn from_file(path: &Path) -> Result<Options, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        Self::from_toml_str(&content)
    }

    /// Parse options from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Options, String> {
        toml::from_str(content).map_err(|e| format!("failed to parse options: {}", e))
    }
}
