//! Syntax analysis: document body to template tree
//!
//! [`parse_body`] is the entry point. It drives a [`BodyParser`] and reports
//! the outcome through the global logging system.

mod error;
mod parser;

pub use error::{SyntaxError, SyntaxResult};
pub use parser::BodyParser;

use crate::document::Body;
use crate::expression::ExpressionCompiler;
use crate::grammar::ast::Template;
use crate::logging::codes;
use crate::provider::ProviderRegistry;
use crate::{log_debug, log_error, log_success, log_warning};

/// Parse a document body into a template, logging every recoverable error
/// as a warning anchored on its run
pub fn parse_body(
    body: &Body,
    compiler: &dyn ExpressionCompiler,
    providers: &ProviderRegistry,
) -> SyntaxResult<Template> {
    log_debug!("Starting template parse",
        "runs" => body.run_count(),
        "providers" => providers.len()
    );

    let result = BodyParser::new(body, compiler, providers).parse_template();

    match &result {
        Ok(template) => {
            let errors = template.errors();
            for error in &errors {
                log_warning!(error.code, &error.message, run = error.run);
            }
            log_success!(codes::success::TEMPLATE_PARSED, "Template parsed",
                "constructs" => template.body.len(),
                "errors" => errors.len()
            );
        }
        Err(error) => {
            log_error!(error.error_code(), "Template parse failed", run = error.run(),
                "error" => error
            );
        }
    }

    result
}
