//! Error types for outline extraction.
//!
//! Three categories abort an outline request: invalid invocation (empty
//! path or name, wrong extension), I/O failures, and parse failures.
//! Everything else (a table entry without a name, a map entry with a
//! non-string key) is filtered out silently and never becomes an error.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while producing an outline.
#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("file path cannot be empty")]
    EmptyPath,
    #[error("display name cannot be empty")]
    EmptyName,
    #[error("file must have .go extension: {}", .0.display())]
    NotGoFile(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse Go file {name}: {line}:{column}: {message}")]
    Parse {
        name: String,
        /// 1-indexed line of the first syntax error.
        line: usize,
        /// 1-indexed byte column of the first syntax error.
        column: usize,
        message: String,
    },
    #[error("failed to load Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("invalid tree-sitter query: {0}")]
    Query(#[from] tree_sitter::QueryError),
}

impl OutlineError {
    /// Whether the source text itself was rejected.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, OutlineError::Parse { .. })
    }

    /// Whether the caller supplied an unusable path or name.
    pub fn is_invalid_invocation(&self) -> bool {
        matches!(
            self,
            OutlineError::EmptyPath | OutlineError::EmptyName | OutlineError::NotGoFile(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = OutlineError::Parse {
            name: "foo_test.go".to_string(),
            line: 3,
            column: 7,
            message: "unexpected \"}\"".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse Go file foo_test.go: 3:7: unexpected \"}\""
        );
        assert!(err.is_parse_error());
        assert!(!err.is_invalid_invocation());
    }

    #[test]
    fn test_io_error_is_distinct() {
        let err = OutlineError::Io {
            path: PathBuf::from("missing_test.go"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("failed to read missing_test.go"));
        assert!(!err.is_parse_error());
        assert!(!err.is_invalid_invocation());
    }

    #[test]
    fn test_invalid_invocation() {
        assert!(OutlineError::EmptyPath.is_invalid_invocation());
        assert!(OutlineError::EmptyName.is_invalid_invocation());
        assert!(OutlineError::NotGoFile(PathBuf::from("a.txt")).is_invalid_invocation());
    }
}
