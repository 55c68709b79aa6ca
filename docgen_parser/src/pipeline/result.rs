use super::stats::TemplateStats;
use crate::grammar::ast::Template;
use serde_json::json;
use std::time::Duration;

/// Parsed template of one document plus what was measured on the way
#[derive(Debug)]
pub struct PipelineResult {
    pub template: Template,
    pub stats: TemplateStats,
    pub run_count: usize,
    pub duration: Duration,
}

impl PipelineResult {
    pub fn new(template: Template, run_count: usize, duration: Duration) -> Self {
        let stats = TemplateStats::collect(&template);
        Self {
            template,
            stats,
            run_count,
            duration,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.stats.errors == 0
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&json!({
            "template": self.template,
            "stats": self.stats,
            "runs": self.run_count,
            "duration_ms": self.duration.as_secs_f64() * 1000.0,
        }))
    }

    pub fn log_success(&self, file_path: &str) {
        crate::log_success!(
            crate::logging::codes::success::OPERATION_COMPLETED_SUCCESSFULLY,
            "Document processing completed",
            "file" => file_path,
            "runs" => self.run_count,
            "constructs" => self.stats.total_constructs(),
            "errors" => self.stats.errors,
            "duration_ms" => format!("{:.2}", self.duration.as_secs_f64() * 1000.0)
        );
    }
}
