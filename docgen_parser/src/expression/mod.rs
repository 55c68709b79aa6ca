//! Expression compiler collaborator
//!
//! The parser treats compiled expressions as opaque. It only needs to know
//! whether compilation produced errors.

mod basic;

pub use basic::BasicExpressionCompiler;

use serde::{Serialize, Serializer};
use std::fmt;

/// A compiled expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    source: String,
}

impl Expression {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

/// Outcome of compiling one expression text
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    pub expression: Expression,
    pub errors: Vec<String>,
}

impl Compilation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The expression, when compilation reported no errors
    pub fn into_valid(self) -> Option<Expression> {
        if self.errors.is_empty() {
            Some(self.expression)
        } else {
            None
        }
    }
}

pub trait ExpressionCompiler: Send + Sync {
    fn compile(&self, text: &str) -> Compilation;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_valid() {
        let ok = Compilation {
            expression: Expression::new("self"),
            errors: vec![],
        };
        let bad = Compilation {
            expression: Expression::new("self)"),
            errors: vec!["unbalanced".to_string()],
        };

        assert_eq!(ok.into_valid(), Some(Expression::new("self")));
        assert!(!bad.is_valid());
        assert_eq!(bad.into_valid(), None);
    }

    #[test]
    fn test_expression_serializes_as_source() {
        let json = serde_json::to_string(&Expression::new("self.name")).unwrap();
        assert_eq!(json, "\"self.name\"");
    }
}
