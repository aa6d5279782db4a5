//! Error type for the require.context transform

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort the transform of a single source file
#[derive(Debug, Error)]
pub enum ContextError {
    /// The source file could not be read
    #[error("E_FILE_READ: Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source text is not syntactically valid
    #[error("E_FILE_PARSE: {}:{line}:{column}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// Listing an existing directory failed
    #[error("E_ENUMERATE: Failed to list {}: {source}", path.display())]
    Enumerate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The filter literal of a context call is not a supported regular expression
    #[error("E_INVALID_PATTERN: /{pattern}/{flags}: {source}")]
    InvalidPattern {
        pattern: String,
        flags: String,
        #[source]
        source: regex::Error,
    },

    /// Code generation failed
    #[error("E_CODEGEN: Failed to print {}: {source}", path.display())]
    Print {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The plugin options are not valid JSON for [`crate::Config`]
    #[error("E_INVALID_CONFIG: Error parsing require-context plugin configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ContextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_codes() {
        let err = ContextError::Parse {
            path: PathBuf::from("/src/app.js"),
            line: 3,
            column: 7,
            message: "Unexpected token".into(),
        };
        assert_eq!(
            err.to_string(),
            "E_FILE_PARSE: /src/app.js:3:7: Unexpected token"
        );

        let err = ContextError::Enumerate {
            path: PathBuf::from("/src/pages"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "E_ENUMERATE: Failed to list /src/pages: denied");
    }
}
