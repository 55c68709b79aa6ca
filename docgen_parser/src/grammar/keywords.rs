//! Tag keywords, option names and the characters of the tag syntax

use crate::tokens::TokenKind;

pub const FOR: &str = "m:for";
pub const END_FOR: &str = "m:endfor";
pub const IF: &str = "m:if";
pub const ELSE_IF: &str = "m:elseif";
pub const ELSE: &str = "m:else";
pub const END_IF: &str = "m:endif";
pub const ELEMENT: &str = "m:elt";
pub const LET: &str = "m:let";
pub const END_LET: &str = "m:endlet";
pub const IMAGE: &str = "m:image";
pub const DIAGRAM: &str = "m:diagram";
/// Any other tag in the namespace is an inline query
pub const QUERY: &str = "m:";

/// Keyword prefixes in matching order; the first prefix match wins.
/// `m:elseif` must be tried before `m:else`, and the bare namespace last.
pub const CLASSIFICATION_ORDER: [(&str, TokenKind); 12] = [
    (FOR, TokenKind::For),
    (END_FOR, TokenKind::EndFor),
    (IF, TokenKind::If),
    (ELSE_IF, TokenKind::ElseIf),
    (ELSE, TokenKind::Else),
    (END_IF, TokenKind::EndIf),
    (ELEMENT, TokenKind::Element),
    (LET, TokenKind::Let),
    (END_LET, TokenKind::EndLet),
    (IMAGE, TokenKind::Image),
    (DIAGRAM, TokenKind::Diagram),
    (QUERY, TokenKind::Query),
];

/// Match trimmed instruction text against the keyword table
pub fn match_keyword(instruction: &str) -> Option<TokenKind> {
    CLASSIFICATION_ORDER
        .iter()
        .find(|(keyword, _)| instruction.starts_with(keyword))
        .map(|(_, kind)| *kind)
}

pub const KEY_VALUE_SEPARATOR: char = ':';
pub const QUOTE: char = '"';
pub const ESCAPE: char = '\\';
pub const ITERATION_SEPARATOR: char = '|';

/// Display-mode suffixes of inline queries
pub mod modifiers {
    pub const LABEL: &str = " label";
    pub const ICON: &str = " icon";
    pub const TEXT: &str = " text";
}

pub mod options {
    pub const FILE: &str = "file";
    pub const HEIGHT: &str = "height";
    pub const WIDTH: &str = "width";
    pub const LEGEND: &str = "legend";
    pub const LEGEND_POSITION: &str = "legendPos";
    pub const PROVIDER: &str = "provider";

    pub const LEGEND_ABOVE: &str = "above";
    pub const LEGEND_BELOW: &str = "below";

    pub const IMAGE_OPTIONS: [&str; 5] = [FILE, HEIGHT, WIDTH, LEGEND, LEGEND_POSITION];
    pub const DIAGRAM_OPTIONS: [&str; 6] = [FILE, HEIGHT, WIDTH, LEGEND, LEGEND_POSITION, PROVIDER];

    /// Handled by the image fields, never copied into a diagram's generic options
    pub const NON_GENERIC_DIAGRAM_OPTIONS: [&str; 5] =
        [LEGEND, LEGEND_POSITION, HEIGHT, WIDTH, PROVIDER];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        assert_eq!(match_keyword("m:for x | y"), Some(TokenKind::For));
        assert_eq!(match_keyword("m:endfor"), Some(TokenKind::EndFor));
        assert_eq!(match_keyword("m:if c"), Some(TokenKind::If));
        assert_eq!(match_keyword("m:elseif c"), Some(TokenKind::ElseIf));
        assert_eq!(match_keyword("m:else"), Some(TokenKind::Else));
        assert_eq!(match_keyword("m:endif"), Some(TokenKind::EndIf));
        assert_eq!(match_keyword("m:elt"), Some(TokenKind::Element));
        assert_eq!(match_keyword("m:let a = b"), Some(TokenKind::Let));
        assert_eq!(match_keyword("m:endlet"), Some(TokenKind::EndLet));
        assert_eq!(match_keyword("m:image file:\"a\""), Some(TokenKind::Image));
        assert_eq!(match_keyword("m:diagram"), Some(TokenKind::Diagram));
        assert_eq!(match_keyword("m:self.name"), Some(TokenKind::Query));
    }

    #[test]
    fn test_prefix_matching_is_greedy_by_order() {
        // "m:format" starts with "m:for"
        assert_eq!(match_keyword("m:format"), Some(TokenKind::For));
        assert_eq!(match_keyword("m:iffy"), Some(TokenKind::If));
    }

    #[test]
    fn test_non_tags() {
        assert_eq!(match_keyword(""), None);
        assert_eq!(match_keyword("PAGE \\* MERGEFORMAT"), None);
        assert_eq!(match_keyword("m"), None);
    }
}
