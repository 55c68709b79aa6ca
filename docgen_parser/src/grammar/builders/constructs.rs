//! Builders for the individual template constructs

use super::compound::parse_compound;
use super::options::{check_options, parse_options, OptionMap};
use super::tags::{classify, read_tag, TagRole};
use super::TemplateParser;
use crate::document::{self, RunId};
use crate::expression::{Expression, ExpressionCompiler};
use crate::grammar::ast::{
    Alternative, Cell, Conditional, ElseBranch, Image, ImageOptions, LegendPosition, OptionValue,
    Query, QueryBehavior, Repetition, Representation, Row, StaticFragment, Table, TagInfo,
};
use crate::grammar::keywords::{self, modifiers, options, ITERATION_SEPARATOR};
use crate::grammar::messages::ParsingErrorMessage;
use crate::provider::{Capability, OptionType};
use crate::syntax::SyntaxResult;
use crate::tokens::{Position, TokenKind};

/// Compile `source`, recording an invalid-expression error on `tag` when
/// the compiler reports problems
fn compile_expression(
    compiler: &dyn ExpressionCompiler,
    source: &str,
    tag: &mut TagInfo,
    anchor: Option<RunId>,
) -> Option<Expression> {
    let compilation = compiler.compile(source);
    if compilation.is_valid() {
        return Some(compilation.expression);
    }

    tag.push_error(
        ParsingErrorMessage::InvalidExpression {
            expression: source.to_string(),
            details: compilation.errors,
        },
        anchor,
    );
    None
}

fn strip_keyword<'t>(text: &'t str, keyword: &str) -> &'t str {
    text.strip_prefix(keyword).unwrap_or(text)
}

// === QUERY ===

/// `m:<expression>` with an optional ` label`, ` icon` or ` text` suffix
pub fn parse_query<'a>(parser: &mut dyn TemplateParser<'a>) -> SyntaxResult<Query> {
    let mut query = Query::default();
    let text = read_tag(parser.cursor_mut(), &mut query.tag, TagRole::Opening)?;
    let rest = strip_keyword(&text, keywords::QUERY);

    let (source, behavior) = if let Some(source) = rest.strip_suffix(modifiers::LABEL) {
        (source, QueryBehavior::Label)
    } else if let Some(source) = rest.strip_suffix(modifiers::ICON) {
        (source, QueryBehavior::Icon)
    } else if let Some(source) = rest.strip_suffix(modifiers::TEXT) {
        (source, QueryBehavior::Text)
    } else {
        (rest, QueryBehavior::Text)
    };

    query.behavior = behavior;
    let anchor = query.tag.style_run.or_else(|| query.tag.anchor());
    query.expression = compile_expression(parser.compiler(), source.trim(), &mut query.tag, anchor);
    Ok(query)
}

// === REPETITION ===

/// `m:for var | expression` ... `m:endfor`
pub fn parse_repetition<'a>(parser: &mut dyn TemplateParser<'a>) -> SyntaxResult<Repetition> {
    let mut repetition = Repetition::default();
    let text = read_tag(parser.cursor_mut(), &mut repetition.tag, TagRole::Opening)?;
    let rest = strip_keyword(&text, keywords::FOR);
    let anchor = repetition.tag.anchor();

    match rest.split_once(ITERATION_SEPARATOR) {
        None => repetition
            .tag
            .push_error(ParsingErrorMessage::MissingIterationSeparator, anchor),
        Some((variable, source)) => {
            let variable = variable.trim();
            if variable.is_empty() {
                repetition
                    .tag
                    .push_error(ParsingErrorMessage::MissingIterationVariable, anchor);
            } else {
                repetition.iteration_var = Some(variable.to_string());
            }

            let source = source.trim();
            if source.is_empty() {
                repetition
                    .tag
                    .push_error(ParsingErrorMessage::MissingIterationQuery, anchor);
            } else {
                repetition.query =
                    compile_expression(parser.compiler(), source, &mut repetition.tag, anchor);
            }
        }
    }

    let end = parse_compound(
        parser,
        &mut repetition.body,
        &mut repetition.tag,
        &[TokenKind::EndFor],
    )?;
    if end != TokenKind::Eof {
        read_tag(parser.cursor_mut(), &mut repetition.tag, TagRole::Closing)?;
    }
    Ok(repetition)
}

// === CONDITIONAL ===

/// `m:if` or `m:elseif` and everything up to the matching `m:endif`.
/// Each `m:elseif` becomes a conditional chained as the alternative.
pub fn parse_conditional<'a>(parser: &mut dyn TemplateParser<'a>) -> SyntaxResult<Conditional> {
    let mut conditional = Conditional::default();
    let text = read_tag(parser.cursor_mut(), &mut conditional.tag, TagRole::Opening)?;
    let keyword = if text.starts_with(keywords::IF) {
        keywords::IF
    } else {
        keywords::ELSE_IF
    };
    let source = strip_keyword(&text, keyword).trim();
    let anchor = conditional.tag.anchor();
    conditional.condition =
        compile_expression(parser.compiler(), source, &mut conditional.tag, anchor);

    let end = parse_compound(
        parser,
        &mut conditional.body,
        &mut conditional.tag,
        &[TokenKind::ElseIf, TokenKind::Else, TokenKind::EndIf],
    )?;

    match end {
        TokenKind::ElseIf => {
            // each chained link nests one level deeper in the tree
            parser.enter()?;
            let next = parse_conditional(parser);
            parser.leave();
            conditional.alternative = Some(Alternative::ElseIf(Box::new(next?)));
        }
        TokenKind::Else => {
            let mut branch = ElseBranch::default();
            read_tag(parser.cursor_mut(), &mut branch.tag, TagRole::Opening)?;
            let end = parse_compound(parser, &mut branch.body, &mut branch.tag, &[TokenKind::EndIf])?;
            conditional.alternative = Some(Alternative::Else(branch));
            if end != TokenKind::Eof {
                read_tag(parser.cursor_mut(), &mut conditional.tag, TagRole::Closing)?;
            }
        }
        TokenKind::EndIf => {
            read_tag(parser.cursor_mut(), &mut conditional.tag, TagRole::Closing)?;
        }
        _ => conditional
            .tag
            .push_error(ParsingErrorMessage::ConditionalTagExpected, anchor),
    }

    Ok(conditional)
}

// === IMAGES ===

/// Apply legend, legend position, height and width from `map`
fn apply_image_options(map: &OptionMap, target: &mut ImageOptions, tag: &mut TagInfo) {
    let anchor = tag.anchor();
    for (key, value) in map {
        match key.as_str() {
            options::LEGEND => target.legend = Some(value.clone()),
            options::LEGEND_POSITION => {
                target.legend_position = if value == options::LEGEND_ABOVE {
                    LegendPosition::Above
                } else {
                    LegendPosition::Below
                };
            }
            options::HEIGHT | options::WIDTH => match value.parse::<u32>() {
                Ok(size) if key == options::HEIGHT => target.height = Some(size),
                Ok(size) => target.width = Some(size),
                Err(_) => tag.push_error(
                    ParsingErrorMessage::InvalidInteger {
                        key: key.clone(),
                        value: value.clone(),
                    },
                    anchor,
                ),
            },
            _ => {}
        }
    }
}

/// `m:image file:"..." [legend:"..."] [legendPos:"above"|"below"] [height:"n"] [width:"n"]`
pub fn parse_image<'a>(parser: &mut dyn TemplateParser<'a>) -> SyntaxResult<Image> {
    let mut image = Image::default();
    let text = read_tag(parser.cursor_mut(), &mut image.tag, TagRole::Opening)?;
    let map = parse_options(&text, keywords::IMAGE, &mut image.tag);
    check_options(&map, &options::IMAGE_OPTIONS, &[], &mut image.tag);

    match map.get(options::FILE) {
        Some(file) => {
            image.options.file_name = Some(file.clone());
            apply_image_options(&map, &mut image.options, &mut image.tag);
        }
        None => {
            let anchor = image.tag.anchor();
            image.tag.push_error(ParsingErrorMessage::MissingImageFile, anchor);
        }
    }

    Ok(image)
}

/// `m:diagram provider:"..."` plus image options and provider options.
/// Nothing but the provider is checked until a diagram provider resolves.
pub fn parse_representation<'a>(
    parser: &mut dyn TemplateParser<'a>,
) -> SyntaxResult<Representation> {
    let mut representation = Representation::default();
    let text = read_tag(parser.cursor_mut(), &mut representation.tag, TagRole::Opening)?;
    let map = parse_options(&text, keywords::DIAGRAM, &mut representation.tag);
    let anchor = representation.tag.anchor();

    let handle = match map.get(options::PROVIDER) {
        None => {
            representation
                .tag
                .push_error(ParsingErrorMessage::MissingProvider, anchor);
            None
        }
        Some(name) => match parser.providers().lookup(name).cloned() {
            None => {
                representation
                    .tag
                    .push_error(ParsingErrorMessage::UnknownProvider { name: name.clone() }, anchor);
                None
            }
            Some(handle) if !handle.provider().has_capability(Capability::DiagramProvider) => {
                representation.tag.push_error(
                    ParsingErrorMessage::NotADiagramProvider { name: name.clone() },
                    anchor,
                );
                None
            }
            Some(handle) => Some(handle),
        },
    };

    let Some(handle) = handle else {
        return Ok(representation);
    };

    let option_types = handle.provider().option_types();
    let provider_keys: Vec<&str> = option_types
        .map(|types| types.keys().map(String::as_str).collect())
        .unwrap_or_default();
    check_options(
        &map,
        &options::DIAGRAM_OPTIONS,
        &provider_keys,
        &mut representation.tag,
    );
    apply_image_options(&map, &mut representation.options, &mut representation.tag);

    for (key, value) in &map {
        if options::NON_GENERIC_DIAGRAM_OPTIONS.contains(&key.as_str()) {
            continue;
        }
        let option_value = match option_types.and_then(|types| types.get(key)) {
            Some(OptionType::Expression) => OptionValue::Expression(compile_expression(
                parser.compiler(),
                value,
                &mut representation.tag,
                anchor,
            )),
            Some(OptionType::String) | None => OptionValue::Text(value.clone()),
        };
        representation
            .provider_options
            .insert(key.clone(), option_value);
    }

    representation.provider = Some(handle);
    Ok(representation)
}

// === STATIC CONTENT ===

/// Consecutive static positions as one fragment
pub fn parse_static<'a>(parser: &mut dyn TemplateParser<'a>) -> StaticFragment {
    let mut fragment = StaticFragment::default();
    while classify(parser.cursor()) == TokenKind::Static {
        match parser.cursor_mut().next() {
            Some(Position::Run(run)) => fragment.tag.runs.push(run.id),
            _ => break,
        }
    }
    fragment
}

// === TABLES ===

/// Mirror `table` row by row; every cell body is parsed on its own
pub fn parse_table<'a>(
    parser: &mut dyn TemplateParser<'a>,
    table: &'a document::Table,
) -> SyntaxResult<Table> {
    let mut rows = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let mut cells = Vec::with_capacity(row.cells.len());
        for cell in &row.cells {
            cells.push(Cell {
                template: parser.parse_cell(&cell.body)?,
            });
        }
        rows.push(Row { cells });
    }

    Ok(Table {
        table: table.id,
        rows,
    })
}
