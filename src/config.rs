//! Plugin options as passed by the host

use serde::Deserialize;

/// Extension processed when the host does not configure `input`
pub const DEFAULT_EXTENSION: &str = ".js";

/// Configuration for the require-context plugin
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Source file extensions to claim (optional, defaults to `[".js"]`)
    pub input: Option<Vec<String>>,
}

impl Config {
    /// Extensions the plugin claims, each normalized to start with a dot
    pub fn input_extensions(&self) -> Vec<String> {
        match &self.input {
            Some(input) => input.iter().map(|ext| normalize_extension(ext)).collect(),
            None => vec![DEFAULT_EXTENSION.to_string()],
        }
    }

    /// Extensions the plugin emits, which is always JavaScript
    ///
    /// Only `require.context` calls are rewritten. When `.ts`, `.tsx` or
    /// `.jsx` files are claimed, their type annotations and JSX are printed
    /// back unchanged and still need a compile step after this plugin.
    pub fn output_extensions(&self) -> Vec<String> {
        vec![DEFAULT_EXTENSION.to_string()]
    }
}

/// Adds the leading dot to an extension if it is missing
pub fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}
