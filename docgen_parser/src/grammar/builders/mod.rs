//! Builder functions for template constructs
//!
//! Builders are free functions over a [`TemplateParser`], the same way the
//! grammar productions of a recursive-descent parser read: each one consumes
//! its tags from the cursor and returns the node it built.

pub mod compound;
pub mod constructs;
pub mod options;
pub mod tags;

use crate::document::Body;
use crate::expression::ExpressionCompiler;
use crate::grammar::ast::Template;
use crate::provider::ProviderRegistry;
use crate::syntax::SyntaxResult;
use crate::tokens::DocumentCursor;

pub use compound::parse_compound;
pub use constructs::{
    parse_conditional, parse_image, parse_query, parse_repetition, parse_representation,
    parse_static, parse_table,
};
pub use options::{check_options, parse_options, OptionMap};
pub use tags::{classify, read_tag, TagRole};

/// What builders need from the parser driving them
pub trait TemplateParser<'a> {
    fn cursor(&self) -> &DocumentCursor<'a>;
    fn cursor_mut(&mut self) -> &mut DocumentCursor<'a>;

    fn compiler(&self) -> &dyn ExpressionCompiler;
    fn providers(&self) -> &ProviderRegistry;

    /// Current nesting depth, 0 for a top-level body
    fn depth(&self) -> usize;

    /// Enter one compound level; fails once the maximum depth is exceeded
    fn enter(&mut self) -> SyntaxResult<()>;
    fn leave(&mut self);

    /// Parse a table cell body with a fresh parser one level deeper
    fn parse_cell(&self, body: &'a Body) -> SyntaxResult<Template>;
}
