use crate::config::runtime::ConfigError;
use crate::document::DocumentError;
use crate::logging::Code;
use crate::syntax::SyntaxError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Document loading failed: {0}")]
    Document(#[from] DocumentError),

    #[error("Template parsing failed: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Configuration failed: {0}")]
    Config(#[from] ConfigError),
}

impl PipelineError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::Document(error) => error.error_code(),
            Self::Syntax(error) => error.error_code(),
            Self::Config(error) => error.error_code(),
        }
    }

    /// Run the failure is located at, for syntax failures that have one
    pub fn run(&self) -> Option<crate::document::RunId> {
        match self {
            Self::Syntax(error) => error.run(),
            Self::Document(_) | Self::Config(_) => None,
        }
    }
}
