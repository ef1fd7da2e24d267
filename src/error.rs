//! Error types for the two parsing phases.
//!
//! Individual failures are [`ParseError`] values carrying a [`Position`]
//! and a kind. The public entry point aggregates every failure of a run
//! into a [`ParseErrors`] report ordered by source offset.

use std::fmt;

use crate::scan::Position;

/// What the parser ran into when it could not continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    /// End of the current input region. The label names the region:
    /// "input", "inline block", "URI literal".
    EndOf(String),
    /// A concrete piece of input.
    Token(String),
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::EndOf(label) => write!(f, "end of {}", label),
            Found::Token(token) => write!(f, "'{}'", token),
        }
    }
}

/// Error categories surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An unexpected token or end of input, together with the labels
    /// that would have been acceptable at that point.
    Unexpected { found: Found, expected: Vec<String> },
    /// The YAML front-matter decoder rejected its input.
    Yaml(String),
    /// A delimiter run that may neither open nor close an
    /// emphasis-class construct at its position.
    NonFlankingDelimiterRun(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Unexpected { found, expected } => {
                write!(f, "unexpected {}", found)?;
                if !expected.is_empty() {
                    write!(f, "; expected {}", expected.join(" or "))?;
                }
                Ok(())
            }
            ErrorKind::Yaml(message) => write!(f, "YAML parse error: {}", message),
            ErrorKind::NonFlankingDelimiterRun(delims) => {
                write!(f, "non-flanking delimiter run '{}'", delims)
            }
        }
    }
}

/// A single parse failure with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub position: Position,
    pub kind: ErrorKind,
}

impl ParseError {
    /// An unexpected concrete token.
    pub fn unexpected(position: Position, found: impl Into<String>, expected: &[&str]) -> Self {
        Self {
            position,
            kind: ErrorKind::Unexpected {
                found: Found::Token(found.into()),
                expected: expected.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    /// An unexpected end of input.
    pub fn unexpected_end(position: Position, expected: &[&str]) -> Self {
        Self {
            position,
            kind: ErrorKind::Unexpected {
                found: Found::EndOf("input".to_string()),
                expected: expected.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    pub fn non_flanking(position: Position, delims: impl Into<String>) -> Self {
        Self {
            position,
            kind: ErrorKind::NonFlankingDelimiterRun(delims.into()),
        }
    }

    pub fn yaml(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            kind: ErrorKind::Yaml(message.into()),
        }
    }

    /// Rename the end-of-input region in this error, if it is one. Used
    /// by re-entrant sub-parses whose "input" is a slice of the real
    /// document.
    pub fn with_eof_label(mut self, label: &str) -> Self {
        if let ErrorKind::Unexpected {
            found: Found::EndOf(current),
            ..
        } = &mut self.kind
        {
            *current = label.to_string();
        }
        self
    }

    pub fn is_non_flanking(&self) -> bool {
        matches!(self.kind, ErrorKind::NonFlankingDelimiterRun(_))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {}: {}",
            self.position.line, self.position.column, self.kind
        )
    }
}

impl std::error::Error for ParseError {}

/// Convenience alias used throughout the parsing modules.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Every failure collected over a full parsing run, in source order.
///
/// Guaranteed non-empty when returned from [`crate::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors {
    /// The informational file-name label given to [`crate::parse`].
    pub file: String,
    errors: Vec<ParseError>,
}

impl ParseErrors {
    pub(crate) fn new(file: impl Into<String>, mut errors: Vec<ParseError>) -> Self {
        errors.sort_by_key(|e| e.position.offset);
        Self {
            file: file.into(),
            errors,
        }
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParseError> {
        self.errors.iter()
    }
}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{}:{}:{}: {}",
                self.file, error.position.line, error.position.column, error.kind
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}
