//! Template tree produced by the body parser
//!
//! - Every tag-backed node keeps the runs of its opening tag, the runs of
//!   its closing tag, the style run and its recoverable errors in a [`TagInfo`].
//! - Compound nodes own an ordered `body` of child constructs.
//! - Runs are referenced by [`RunId`]; the document owns them.
//! - Everything serializes for JSON output.

use crate::document::{RunId, TableId};
use crate::expression::Expression;
use crate::grammar::messages::ParsingErrorMessage;
use crate::logging::Code;
use crate::provider::ProviderHandle;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

// === ERRORS ===

/// Recoverable problem found while parsing, attached to the node it concerns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsingError {
    pub code: Code,
    pub message: String,
    /// `None` only when the problem is the end of the document itself
    pub run: Option<RunId>,
}

impl ParsingError {
    pub fn new(message: ParsingErrorMessage, run: Option<RunId>) -> Self {
        Self {
            code: message.code(),
            message: message.to_string(),
            run,
        }
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.run {
            Some(run) => write!(f, "{} ({})", self.message, run),
            None => f.write_str(&self.message),
        }
    }
}

// === SHARED TAG DATA ===

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TagInfo {
    /// Opening tag runs, field begin through field end. Compounds also
    /// collect the runs of stray tags found in their body here.
    pub runs: Vec<RunId>,
    pub closing_runs: Vec<RunId>,
    /// Run whose formatting generated content should reuse
    pub style_run: Option<RunId>,
    pub errors: Vec<ParsingError>,
}

impl TagInfo {
    /// Run errors about this tag are reported on: the first run after the
    /// field begin, or the field begin itself for a two-run tag
    pub fn anchor(&self) -> Option<RunId> {
        self.runs.get(1).or_else(|| self.runs.first()).copied()
    }

    pub fn push_error(&mut self, message: ParsingErrorMessage, run: Option<RunId>) {
        self.errors.push(ParsingError::new(message, run));
    }
}

// === ROOT ===

/// Parsed body of a document or of one table cell
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Template {
    pub tag: TagInfo,
    pub body: Vec<Construct>,
}

// === CONSTRUCTS ===

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Construct {
    Static(StaticFragment),
    Query(Query),
    Repetition(Repetition),
    Conditional(Conditional),
    Image(Image),
    Representation(Representation),
    Table(Table),
}

/// Consecutive non-tag runs, kept verbatim
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StaticFragment {
    pub tag: TagInfo,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryBehavior {
    #[default]
    Text,
    Label,
    Icon,
}

/// Inline `m:<expression>` tag
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Query {
    pub tag: TagInfo,
    /// `None` when the expression failed to compile
    pub expression: Option<Expression>,
    pub behavior: QueryBehavior,
}

/// `m:for var | expression` ... `m:endfor`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Repetition {
    pub tag: TagInfo,
    pub iteration_var: Option<String>,
    pub query: Option<Expression>,
    pub body: Vec<Construct>,
}

/// `m:if` / `m:elseif` with its body and what follows it
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Conditional {
    pub tag: TagInfo,
    pub condition: Option<Expression>,
    pub body: Vec<Construct>,
    pub alternative: Option<Alternative>,
}

/// Branch taken when a conditional's own condition is false
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Alternative {
    ElseIf(Box<Conditional>),
    Else(ElseBranch),
}

/// `m:else` body
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ElseBranch {
    pub tag: TagInfo,
    pub body: Vec<Construct>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Above,
    #[default]
    Below,
}

/// Options shared by images and diagrams
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageOptions {
    pub file_name: Option<String>,
    pub legend: Option<String>,
    pub legend_position: LegendPosition,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// `m:image file:"..."`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Image {
    pub tag: TagInfo,
    pub options: ImageOptions,
}

/// Provider option value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Text(String),
    /// `None` when the expression failed to compile
    Expression(Option<Expression>),
}

/// `m:diagram provider:"..."`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Representation {
    pub tag: TagInfo,
    pub options: ImageOptions,
    pub provider: Option<ProviderHandle>,
    /// Options passed through to the provider
    pub provider_options: BTreeMap<String, OptionValue>,
}

/// Template view of a document table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub table: TableId,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cell {
    pub template: Template,
}

impl Construct {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Construct::Static(_) => "static",
            Construct::Query(_) => "query",
            Construct::Repetition(_) => "repetition",
            Construct::Conditional(_) => "conditional",
            Construct::Image(_) => "image",
            Construct::Representation(_) => "representation",
            Construct::Table(_) => "table",
        }
    }

    /// Tag data; tables have none
    pub fn tag(&self) -> Option<&TagInfo> {
        match self {
            Construct::Static(node) => Some(&node.tag),
            Construct::Query(node) => Some(&node.tag),
            Construct::Repetition(node) => Some(&node.tag),
            Construct::Conditional(node) => Some(&node.tag),
            Construct::Image(node) => Some(&node.tag),
            Construct::Representation(node) => Some(&node.tag),
            Construct::Table(_) => None,
        }
    }
}
