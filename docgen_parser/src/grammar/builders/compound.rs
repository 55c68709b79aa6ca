//! Compound body parsing and error recovery

use super::constructs::{
    parse_conditional, parse_image, parse_query, parse_repetition, parse_representation,
    parse_static, parse_table,
};
use super::tags::{classify, read_tag, TagRole};
use super::TemplateParser;
use crate::grammar::ast::{Construct, TagInfo};
use crate::grammar::messages::ParsingErrorMessage;
use crate::syntax::{SyntaxError, SyntaxResult};
use crate::tokens::{Position, TokenKind};
use crate::log_debug;

/// Parse constructs into `body` until the next token is one of `end`,
/// returning that token without consuming it.
///
/// Stray terminators are consumed into `tag.runs` with an unexpected-tag
/// error. Reaching the end of the body when `end` does not include
/// [`TokenKind::Eof`] records an error and returns `Eof`.
pub fn parse_compound<'a>(
    parser: &mut dyn TemplateParser<'a>,
    body: &mut Vec<Construct>,
    tag: &mut TagInfo,
    end: &[TokenKind],
) -> SyntaxResult<TokenKind> {
    parser.enter()?;
    let result = parse_until(parser, body, tag, end);
    parser.leave();
    result
}

fn parse_until<'a>(
    parser: &mut dyn TemplateParser<'a>,
    body: &mut Vec<Construct>,
    tag: &mut TagInfo,
    end: &[TokenKind],
) -> SyntaxResult<TokenKind> {
    loop {
        let kind = classify(parser.cursor());
        if end.contains(&kind) {
            return Ok(kind);
        }

        match kind {
            TokenKind::Static => body.push(Construct::Static(parse_static(parser))),
            TokenKind::Query => body.push(Construct::Query(parse_query(parser)?)),
            TokenKind::For => body.push(Construct::Repetition(parse_repetition(parser)?)),
            TokenKind::If => body.push(Construct::Conditional(parse_conditional(parser)?)),
            TokenKind::Image => body.push(Construct::Image(parse_image(parser)?)),
            TokenKind::Diagram => {
                body.push(Construct::Representation(parse_representation(parser)?))
            }
            TokenKind::Table => {
                if let Some(Position::Table(table)) = parser.cursor_mut().next() {
                    body.push(Construct::Table(parse_table(parser, table)?));
                }
            }
            TokenKind::ElseIf
            | TokenKind::Else
            | TokenKind::EndFor
            | TokenKind::EndIf
            | TokenKind::EndLet => {
                let run = next_run(parser);
                tag.push_error(ParsingErrorMessage::UnexpectedTag(kind), run);
                read_tag(parser.cursor_mut(), tag, TagRole::Opening)?;
                log_debug!("Skipped stray tag",
                    "tag" => kind,
                    "depth" => parser.depth()
                );
            }
            TokenKind::Eof => {
                tag.push_error(ParsingErrorMessage::UnexpectedTag(kind), None);
                return Ok(kind);
            }
            TokenKind::Let | TokenKind::Element => {
                return Err(SyntaxError::UnsupportedConstruct {
                    tag: kind,
                    run: next_run(parser),
                });
            }
        }
    }
}

fn next_run(parser: &dyn TemplateParser<'_>) -> Option<crate::document::RunId> {
    parser
        .cursor()
        .lookahead(1)
        .and_then(Position::as_run)
        .map(|run| run.id)
}

#[cfg(test)]
mod tests {
    use crate::document::{BodyBuilder, RunId};
    use crate::expression::BasicExpressionCompiler;
    use crate::grammar::ast::Construct;
    use crate::logging::codes;
    use crate::provider::ProviderRegistry;
    use crate::syntax::{parse_body, SyntaxError};
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;

    #[test]
    fn test_stray_terminators_are_swallowed() {
        let body = BodyBuilder::new()
            .paragraph(|p| {
                p.text("a").field("m:endif").text("b").field("m:endfor");
            })
            .build();
        let template =
            parse_body(&body, &BasicExpressionCompiler::new(), &ProviderRegistry::new()).unwrap();

        assert_eq!(template.tag.errors.len(), 2);
        assert_eq!(template.tag.errors[0].code, codes::template::UNEXPECTED_TAG);
        assert_eq!(
            template.tag.errors[0].message,
            "Unexpected tag m:endif at this location"
        );
        assert_eq!(template.tag.errors[0].run, Some(RunId::new(1)));
        assert_eq!(template.tag.errors[1].run, Some(RunId::new(5)));
        assert_eq!(
            template.tag.runs,
            (1..=3).chain(5..=7).map(RunId::new).collect::<Vec<_>>()
        );

        assert_eq!(template.body.len(), 2);
        assert_matches!(&template.body[0], Construct::Static(s) if s.tag.runs == vec![RunId::new(0)]);
        assert_matches!(&template.body[1], Construct::Static(s) if s.tag.runs == vec![RunId::new(4)]);
    }

    #[test]
    fn test_stray_tag_inside_repetition_stays_local() {
        let body = BodyBuilder::new()
            .paragraph(|p| {
                p.field("m:for x | y")
                    .field("m:else")
                    .field("m:x")
                    .field("m:endfor")
                    .field("m:z");
            })
            .build();
        let template =
            parse_body(&body, &BasicExpressionCompiler::new(), &ProviderRegistry::new()).unwrap();

        assert!(template.tag.errors.is_empty());
        assert_eq!(template.body.len(), 2);
        let repetition = assert_matches!(&template.body[0], Construct::Repetition(r) => r);
        assert_eq!(repetition.tag.errors.len(), 1);
        assert_eq!(repetition.tag.runs.len(), 6);
        assert_eq!(repetition.body.len(), 1);
        assert_eq!(repetition.tag.closing_runs.len(), 3);
    }

    #[test]
    fn test_let_and_elt_are_fatal() {
        for field in ["m:let a = b", "m:elt"] {
            let body = BodyBuilder::new()
                .paragraph(|p| {
                    p.text("x").field(field);
                })
                .build();
            let result =
                parse_body(&body, &BasicExpressionCompiler::new(), &ProviderRegistry::new());
            assert_matches!(
                result,
                Err(SyntaxError::UnsupportedConstruct { tag, run: Some(run) })
                    if run == RunId::new(1) && (tag == TokenKind::Let || tag == TokenKind::Element)
            );
        }
    }

    #[test]
    fn test_stray_endlet_is_recoverable() {
        let body = BodyBuilder::new()
            .paragraph(|p| {
                p.field("m:endlet");
            })
            .build();
        let template =
            parse_body(&body, &BasicExpressionCompiler::new(), &ProviderRegistry::new()).unwrap();
        assert_eq!(template.tag.errors.len(), 1);
        assert!(template.body.is_empty());
    }
}
