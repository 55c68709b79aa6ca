//! Document file to template pipeline used by the CLI

mod error;
mod result;
mod stats;

pub use error::PipelineError;
pub use result::PipelineResult;
pub use stats::TemplateStats;

use crate::config::runtime::RuntimeConfig;
use crate::document::{self, Body};
use crate::expression::BasicExpressionCompiler;
use crate::provider::ProviderRegistry;
use crate::syntax;
use std::path::Path;
use std::time::Instant;

/// Load a JSON document body from `path` and parse it into a template
pub fn process_file(path: &Path, config: &RuntimeConfig) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();
    crate::log_info!("Starting document processing", "file" => path.display());

    config.validate()?;
    let body = document::load_file(path)?;
    let result = parse_with_config(&body, config, start_time)?;

    result.log_success(&path.display().to_string());
    Ok(result)
}

/// Parse an in-memory body the same way [`process_file`] does
pub fn process_body(body: &Body, config: &RuntimeConfig) -> Result<PipelineResult, PipelineError> {
    config.validate()?;
    parse_with_config(body, config, Instant::now())
}

fn parse_with_config(
    body: &Body,
    config: &RuntimeConfig,
    start_time: Instant,
) -> Result<PipelineResult, PipelineError> {
    let providers = ProviderRegistry::from_declarations(&config.providers);
    let compiler = BasicExpressionCompiler::new();
    let template = syntax::parse_body(body, &compiler, &providers)?;

    Ok(PipelineResult::new(
        template,
        body.run_count(),
        start_time.elapsed(),
    ))
}
