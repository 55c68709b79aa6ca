//! Fatal parse errors
//!
//! These abort the whole parse. Everything a template author can get wrong
//! is reported as a recoverable error on the AST instead.

use crate::document::{RunId, TableId};
use crate::logging::{codes, Code};
use crate::tokens::TokenKind;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Expected a field begin, found {found}")]
    NotAtFieldBegin { found: String },

    #[error("Found {table} inside the field starting at {begin}")]
    TableInsideTag { begin: RunId, table: TableId },

    #[error("Field starting at {begin} has no field end")]
    UnterminatedTag { begin: RunId },

    #[error("Unsupported tag {tag}")]
    UnsupportedConstruct { tag: TokenKind, run: Option<RunId> },

    #[error("Maximum nesting depth {depth} exceeded")]
    NestingTooDeep { depth: usize },
}

impl SyntaxError {
    pub fn not_at_field_begin(found: impl Into<String>) -> Self {
        Self::NotAtFieldBegin {
            found: found.into(),
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::NotAtFieldBegin { .. } => codes::syntax::NOT_AT_FIELD_BEGIN,
            Self::TableInsideTag { .. } => codes::syntax::TABLE_INSIDE_TAG,
            Self::UnterminatedTag { .. } => codes::syntax::UNTERMINATED_TAG,
            Self::UnsupportedConstruct { .. } => codes::syntax::UNSUPPORTED_CONSTRUCT,
            Self::NestingTooDeep { .. } => codes::syntax::MAX_NESTING_DEPTH,
        }
    }

    /// Run the error is located at, if any
    pub fn run(&self) -> Option<RunId> {
        match self {
            Self::TableInsideTag { begin, .. } | Self::UnterminatedTag { begin } => Some(*begin),
            Self::UnsupportedConstruct { run, .. } => *run,
            Self::NotAtFieldBegin { .. } | Self::NestingTooDeep { .. } => None,
        }
    }

    pub fn description(&self) -> &'static str {
        codes::get_description(self.error_code().as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let error = SyntaxError::UnterminatedTag {
            begin: RunId::new(4),
        };
        assert_eq!(error.error_code(), codes::syntax::UNTERMINATED_TAG);
        assert_eq!(error.run(), Some(RunId::new(4)));
        assert_eq!(error.to_string(), "Field starting at run #4 has no field end");

        let error = SyntaxError::UnsupportedConstruct {
            tag: TokenKind::Let,
            run: None,
        };
        assert_eq!(error.to_string(), "Unsupported tag m:let");
        assert_ne!(error.description(), "Unknown error");
    }
}
