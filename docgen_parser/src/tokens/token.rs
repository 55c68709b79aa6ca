//! Token kinds produced by the field classifier

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the next position of the body holds, from the parser's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Plain content, or a field that is not a template tag
    Static,
    Table,
    For,
    EndFor,
    If,
    ElseIf,
    Else,
    EndIf,
    Element,
    Let,
    EndLet,
    /// Inline query, `m:<expression>`
    Query,
    Image,
    Diagram,
    Eof,
}

impl TokenKind {
    /// Tag keyword introducing this kind, if it is a tag
    pub fn keyword(self) -> Option<&'static str> {
        use crate::grammar::keywords as kw;
        match self {
            Self::For => Some(kw::FOR),
            Self::EndFor => Some(kw::END_FOR),
            Self::If => Some(kw::IF),
            Self::ElseIf => Some(kw::ELSE_IF),
            Self::Else => Some(kw::ELSE),
            Self::EndIf => Some(kw::END_IF),
            Self::Element => Some(kw::ELEMENT),
            Self::Let => Some(kw::LET),
            Self::EndLet => Some(kw::END_LET),
            Self::Query => Some(kw::QUERY),
            Self::Image => Some(kw::IMAGE),
            Self::Diagram => Some(kw::DIAGRAM),
            Self::Static | Self::Table | Self::Eof => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Static => "STATIC",
            Self::Table => "TABLE",
            Self::For => "FOR",
            Self::EndFor => "ENDFOR",
            Self::If => "IF",
            Self::ElseIf => "ELSEIF",
            Self::Else => "ELSE",
            Self::EndIf => "ENDIF",
            Self::Element => "ELT",
            Self::Let => "LET",
            Self::EndLet => "ENDLET",
            Self::Query => "AQL",
            Self::Image => "IMAGE",
            Self::Diagram => "DIAGRAM",
            Self::Eof => "EOF",
        }
    }

    /// Tags that only make sense as the end of an enclosing compound
    pub fn is_terminator(self) -> bool {
        matches!(
            self,
            Self::ElseIf | Self::Else | Self::EndFor | Self::EndIf | Self::EndLet
        )
    }
}

/// Keyword for tags, upper-case name otherwise
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.keyword() {
            Some(keyword) => f.write_str(keyword),
            None => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefers_keyword() {
        assert_eq!(TokenKind::EndFor.to_string(), "m:endfor");
        assert_eq!(TokenKind::Eof.to_string(), "EOF");
        assert_eq!(TokenKind::Table.to_string(), "TABLE");
    }

    #[test]
    fn test_terminators() {
        assert!(TokenKind::EndIf.is_terminator());
        assert!(TokenKind::EndLet.is_terminator());
        assert!(!TokenKind::If.is_terminator());
        assert!(!TokenKind::Eof.is_terminator());
    }
}
