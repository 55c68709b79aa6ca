//! Field classification and tag reading
//!
//! A tag is a field: a begin-marker run, instruction runs, an end-marker
//! run. Classification only peeks; reading consumes the whole field.

use crate::document::{Run, RunId};
use crate::grammar::ast::TagInfo;
use crate::grammar::keywords::{self, KEY_VALUE_SEPARATOR};
use crate::syntax::{SyntaxError, SyntaxResult};
use crate::tokens::{DocumentCursor, Position, TokenKind};

/// Kind of the next position, without consuming anything
pub fn classify(cursor: &DocumentCursor<'_>) -> TokenKind {
    match cursor.lookahead(1) {
        None => TokenKind::Eof,
        Some(Position::Table(_)) => TokenKind::Table,
        Some(Position::Run(run)) if run.is_field_begin() => match peek_instruction(cursor) {
            Some(instruction) => keywords::match_keyword(&instruction).unwrap_or(TokenKind::Static),
            None => TokenKind::Static,
        },
        Some(Position::Run(_)) => TokenKind::Static,
    }
}

/// Trimmed instruction text of the field starting at `lookahead(1)`, or
/// `None` when a table or the end of the body comes before the field end
fn peek_instruction(cursor: &DocumentCursor<'_>) -> Option<String> {
    let mut instruction = String::new();
    let mut n = 2;
    loop {
        match cursor.lookahead(n)? {
            Position::Table(_) => return None,
            Position::Run(run) if run.is_field_end() => return Some(instruction.trim().to_string()),
            Position::Run(run) => instruction.push_str(&run.instruction_text()),
        }
        n += 1;
    }
}

/// Which list of `TagInfo` a tag's runs go to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRole {
    Opening,
    Closing,
}

/// Consume the field at `lookahead(1)` into `tag`, returning its
/// concatenated, trimmed instruction text.
///
/// The first reading of a node also locates its style run: the run holding
/// the first `:` if text follows it on that run, otherwise the next run with
/// non-empty instruction text.
pub fn read_tag(
    cursor: &mut DocumentCursor<'_>,
    tag: &mut TagInfo,
    role: TagRole,
) -> SyntaxResult<String> {
    let begin = match cursor.lookahead(1) {
        Some(Position::Run(run)) if run.is_field_begin() => run,
        Some(Position::Table(table)) => {
            return Err(SyntaxError::not_at_field_begin(table.id.to_string()))
        }
        Some(Position::Run(run)) => return Err(SyntaxError::not_at_field_begin(run.id.to_string())),
        None => return Err(SyntaxError::not_at_field_begin("end of body")),
    };
    cursor.next();

    let mut runs = vec![begin.id];
    let mut text = String::new();
    let mut style = StyleRunScan::new(tag.style_run.is_none());

    loop {
        let run: &Run = match cursor.next() {
            Some(Position::Run(run)) => run,
            Some(Position::Table(table)) => {
                return Err(SyntaxError::TableInsideTag {
                    begin: begin.id,
                    table: table.id,
                })
            }
            None => return Err(SyntaxError::UnterminatedTag { begin: begin.id }),
        };

        runs.push(run.id);
        if run.is_field_end() {
            break;
        }

        let fragment = run.instruction_text();
        style.observe(run, &fragment);
        text.push_str(&fragment);
    }

    if let Some(style_run) = style.found {
        tag.style_run = Some(style_run);
    }
    match role {
        TagRole::Opening => tag.runs.extend(runs),
        TagRole::Closing => tag.closing_runs.extend(runs),
    }

    Ok(text.trim().to_string())
}

struct StyleRunScan {
    active: bool,
    separator_seen: bool,
    found: Option<RunId>,
}

impl StyleRunScan {
    fn new(active: bool) -> Self {
        Self {
            active,
            separator_seen: false,
            found: None,
        }
    }

    fn observe(&mut self, run: &Run, fragment: &str) {
        if !self.active || self.found.is_some() {
            return;
        }
        if self.separator_seen {
            if !fragment.is_empty() {
                self.found = Some(run.id);
            }
        } else if let Some(index) = fragment.find(KEY_VALUE_SEPARATOR) {
            self.separator_seen = true;
            if index + KEY_VALUE_SEPARATOR.len_utf8() < fragment.len() {
                self.found = Some(run.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Body, BodyBuilder};
    use assert_matches::assert_matches;

    fn single(build: impl FnOnce(&mut crate::document::ParagraphBuilder<'_>)) -> Body {
        BodyBuilder::new().paragraph(build).build()
    }

    #[test]
    fn test_classify_tags() {
        let cases = [
            ("m:for x | y", TokenKind::For),
            ("m:endfor", TokenKind::EndFor),
            ("  m:if c ", TokenKind::If),
            ("m:elseif c", TokenKind::ElseIf),
            ("m:else", TokenKind::Else),
            ("m:endif", TokenKind::EndIf),
            ("m:elt", TokenKind::Element),
            ("m:let a = 1", TokenKind::Let),
            ("m:endlet", TokenKind::EndLet),
            ("m:image file:\"a.png\"", TokenKind::Image),
            ("m:diagram provider:\"p\"", TokenKind::Diagram),
            ("m:self.name", TokenKind::Query),
            ("PAGE", TokenKind::Static),
        ];

        for (instruction, expected) in cases {
            let body = single(|p| {
                p.field(instruction);
            });
            let cursor = DocumentCursor::new(&body);
            assert_eq!(classify(&cursor), expected, "{}", instruction);
        }
    }

    #[test]
    fn test_classify_joins_split_instruction_runs() {
        let body = single(|p| {
            p.field_parts(&["m:el", "se", "if x"]);
        });
        assert_eq!(classify(&DocumentCursor::new(&body)), TokenKind::ElseIf);
    }

    #[test]
    fn test_classify_positions() {
        let body = BodyBuilder::new()
            .paragraph(|p| {
                p.text("plain");
            })
            .table(|_| {})
            .build();
        let mut cursor = DocumentCursor::new(&body);

        assert_eq!(classify(&cursor), TokenKind::Static);
        cursor.next();
        assert_eq!(classify(&cursor), TokenKind::Table);
        cursor.next();
        assert_eq!(classify(&cursor), TokenKind::Eof);
    }

    #[test]
    fn test_unterminated_field_is_static() {
        let body = BodyBuilder::new()
            .paragraph(|p| {
                p.begin().instruction("m:if x");
            })
            .build();
        assert_eq!(classify(&DocumentCursor::new(&body)), TokenKind::Static);

        let body = BodyBuilder::new()
            .paragraph(|p| {
                p.begin().instruction("m:if x");
            })
            .table(|_| {})
            .paragraph(|p| {
                p.end();
            })
            .build();
        assert_eq!(classify(&DocumentCursor::new(&body)), TokenKind::Static);
    }

    #[test]
    fn test_classify_does_not_consume() {
        let body = single(|p| {
            p.field("m:if x");
        });
        let cursor = DocumentCursor::new(&body);
        classify(&cursor);
        assert_eq!(cursor.consumed(), 0);
    }

    #[test]
    fn test_read_tag_consumes_whole_field() {
        let body = single(|p| {
            p.field_parts(&["m:if ", "self.ok"]).text("after");
        });
        let mut cursor = DocumentCursor::new(&body);
        let mut tag = TagInfo::default();

        let text = read_tag(&mut cursor, &mut tag, TagRole::Opening).unwrap();

        assert_eq!(text, "m:if self.ok");
        assert_eq!(
            tag.runs,
            vec![RunId::new(0), RunId::new(1), RunId::new(2), RunId::new(3)]
        );
        assert!(tag.closing_runs.is_empty());
        assert_eq!(cursor.consumed(), 4);
        assert_eq!(classify(&cursor), TokenKind::Static);
    }

    #[test]
    fn test_style_run_on_separator_run_when_text_follows() {
        let body = single(|p| {
            p.field_parts(&["m:self", ".name"]);
        });
        let mut cursor = DocumentCursor::new(&body);
        let mut tag = TagInfo::default();
        read_tag(&mut cursor, &mut tag, TagRole::Opening).unwrap();

        assert_eq!(tag.style_run, Some(RunId::new(1)));
    }

    #[test]
    fn test_style_run_on_next_non_empty_run() {
        let body = single(|p| {
            p.begin()
                .instruction("m:")
                .instruction("")
                .instruction("self.name")
                .end();
        });
        let mut cursor = DocumentCursor::new(&body);
        let mut tag = TagInfo::default();
        read_tag(&mut cursor, &mut tag, TagRole::Opening).unwrap();

        assert_eq!(tag.style_run, Some(RunId::new(3)));
    }

    /// Closing tags never replace the style run chosen from the opening tag
    #[test]
    fn test_closing_tag_keeps_opening_style_run() {
        let body = single(|p| {
            p.field("m:for x | y").field("m:endfor");
        });
        let mut cursor = DocumentCursor::new(&body);
        let mut tag = TagInfo::default();
        read_tag(&mut cursor, &mut tag, TagRole::Opening).unwrap();
        read_tag(&mut cursor, &mut tag, TagRole::Closing).unwrap();

        assert_eq!(tag.style_run, Some(RunId::new(1)));
        assert_eq!(tag.closing_runs, vec![RunId::new(3), RunId::new(4), RunId::new(5)]);
    }

    #[test]
    fn test_read_tag_requires_field_begin() {
        let body = single(|p| {
            p.text("plain");
        });
        let mut cursor = DocumentCursor::new(&body);
        let result = read_tag(&mut cursor, &mut TagInfo::default(), TagRole::Opening);
        assert_matches!(result, Err(SyntaxError::NotAtFieldBegin { .. }));
        assert_eq!(cursor.consumed(), 0);
    }

    #[test]
    fn test_read_tag_fails_on_table_or_exhaustion() {
        let body = BodyBuilder::new()
            .paragraph(|p| {
                p.begin().instruction("m:x");
            })
            .table(|_| {})
            .build();
        let mut cursor = DocumentCursor::new(&body);
        let result = read_tag(&mut cursor, &mut TagInfo::default(), TagRole::Opening);
        assert_matches!(result, Err(SyntaxError::TableInsideTag { .. }));

        let body = single(|p| {
            p.begin().instruction("m:x");
        });
        let mut cursor = DocumentCursor::new(&body);
        let result = read_tag(&mut cursor, &mut TagInfo::default(), TagRole::Opening);
        assert_matches!(result, Err(SyntaxError::UnterminatedTag { .. }));
    }
}
