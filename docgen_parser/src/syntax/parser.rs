//! Parser over one document body
//!
//! Owns the cursor for that body and borrows the two collaborators. Table
//! cells get their own parser, so nothing mutable is shared between them.

use crate::config::compile_time::syntax::MAX_NESTING_DEPTH;
use crate::document::Body;
use crate::expression::ExpressionCompiler;
use crate::grammar::ast::Template;
use crate::grammar::builders::{parse_compound, TemplateParser};
use crate::provider::ProviderRegistry;
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::tokens::{DocumentCursor, TokenKind};

pub struct BodyParser<'a> {
    cursor: DocumentCursor<'a>,
    compiler: &'a dyn ExpressionCompiler,
    providers: &'a ProviderRegistry,
    depth: usize,
    max_depth: usize,
}

impl<'a> BodyParser<'a> {
    pub fn new(
        body: &'a Body,
        compiler: &'a dyn ExpressionCompiler,
        providers: &'a ProviderRegistry,
    ) -> Self {
        Self {
            cursor: DocumentCursor::new(body),
            compiler,
            providers,
            depth: 0,
            max_depth: MAX_NESTING_DEPTH,
        }
    }

    /// Lower the nesting limit below the compiled-in maximum
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_NESTING_DEPTH);
        self
    }

    /// Parse the whole body. Recoverable problems end up on the returned
    /// tree; only broken fields, `m:let`/`m:elt` and excessive nesting fail.
    pub fn parse_template(&mut self) -> SyntaxResult<Template> {
        let mut template = Template::default();
        parse_compound(self, &mut template.body, &mut template.tag, &[TokenKind::Eof])?;
        Ok(template)
    }

    fn nested(&self, body: &'a Body) -> Self {
        Self {
            cursor: DocumentCursor::new(body),
            compiler: self.compiler,
            providers: self.providers,
            depth: self.depth,
            max_depth: self.max_depth,
        }
    }
}

impl<'a> TemplateParser<'a> for BodyParser<'a> {
    fn cursor(&self) -> &DocumentCursor<'a> {
        &self.cursor
    }

    fn cursor_mut(&mut self) -> &mut DocumentCursor<'a> {
        &mut self.cursor
    }

    fn compiler(&self) -> &dyn ExpressionCompiler {
        self.compiler
    }

    fn providers(&self) -> &ProviderRegistry {
        self.providers
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn enter(&mut self) -> SyntaxResult<()> {
        if self.depth >= self.max_depth {
            return Err(SyntaxError::NestingTooDeep {
                depth: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn parse_cell(&self, body: &'a Body) -> SyntaxResult<Template> {
        self.nested(body).parse_template()
    }
}
