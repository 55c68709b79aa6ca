//! Template body parser for document generation
//!
//! Turns the fields of a word-processing document body (`m:for`, `m:if`,
//! `m:image`, inline `m:` queries and friends) into a template tree. Author
//! mistakes never abort a parse; they are attached to the node they concern.
//!
//! ```
//! use docgen_parser::document::BodyBuilder;
//! use docgen_parser::expression::BasicExpressionCompiler;
//! use docgen_parser::provider::ProviderRegistry;
//!
//! let body = BodyBuilder::new()
//!     .paragraph(|p| {
//!         p.field("m:if self.vip").text("Welcome back").field("m:endif");
//!     })
//!     .build();
//! let template = docgen_parser::parse_body(
//!     &body,
//!     &BasicExpressionCompiler::new(),
//!     &ProviderRegistry::new(),
//! )
//! .unwrap();
//! assert!(template.is_valid());
//! ```

#[macro_use]
pub mod logging;
pub mod config;
pub mod document;
pub mod expression;
pub mod grammar;
pub mod pipeline;
pub mod provider;
pub mod syntax;
pub mod tokens;

pub use grammar::ast::Template;
pub use pipeline::{PipelineError, PipelineResult};
pub use syntax::{parse_body, SyntaxError, SyntaxResult};
