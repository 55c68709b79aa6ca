//! Error, warning and success codes with their classification metadata
//!
//! Single source of truth for every code the parser logs. Recoverable
//! template diagnostics use `W` codes, fatal failures `E` codes.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for Code {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Runtime configuration loading
pub mod config {
    use super::Code;

    pub const CONFIG_READ_ERROR: Code = Code::new("E010");
    pub const INVALID_CONFIG: Code = Code::new("E011");
}

/// Document loading
pub mod document {
    use super::Code;

    pub const DOCUMENT_NOT_FOUND: Code = Code::new("E020");
    pub const DOCUMENT_TOO_LARGE: Code = Code::new("E021");
    pub const INVALID_DOCUMENT: Code = Code::new("E022");
    pub const TOO_MANY_RUNS: Code = Code::new("E023");
    pub const IO_ERROR: Code = Code::new("E024");
}

/// Fatal parser failures
pub mod syntax {
    use super::Code;

    pub const NOT_AT_FIELD_BEGIN: Code = Code::new("E040");
    pub const TABLE_INSIDE_TAG: Code = Code::new("E041");
    pub const UNTERMINATED_TAG: Code = Code::new("E042");
    pub const UNSUPPORTED_CONSTRUCT: Code = Code::new("E043");
    pub const MAX_NESTING_DEPTH: Code = Code::new("E087");
}

/// Recoverable template diagnostics attached to the tree
pub mod template {
    use super::Code;

    pub const UNEXPECTED_TAG: Code = Code::new("W100");
    pub const MALFORMED_REPETITION: Code = Code::new("W101");
    pub const INVALID_EXPRESSION: Code = Code::new("W102");
    pub const CONDITIONAL_TAG_EXPECTED: Code = Code::new("W103");
    pub const INVALID_IMAGE_TAG: Code = Code::new("W104");
    pub const INVALID_IMAGE_OPTION: Code = Code::new("W105");
    pub const INVALID_OPTION_SYNTAX: Code = Code::new("W106");
    pub const UNKNOWN_PROVIDER: Code = Code::new("W107");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const CONFIG_LOADED: Code = Code::new("I010");
    pub const DOCUMENT_LOADED: Code = Code::new("I020");
    pub const TEMPLATE_PARSED: Code = Code::new("I040");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

const METADATA: &[ErrorMetadata] = &[
    // System
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal error",
        "File a bug report with the failing document",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "Logging or configuration initialization failure",
        "Check environment variables and configuration files",
    ),
    // Configuration
    ErrorMetadata::new(
        "E010",
        "Configuration",
        Severity::Medium,
        false,
        true,
        "Runtime configuration file could not be read",
        "Check the --config path and file permissions",
    ),
    ErrorMetadata::new(
        "E011",
        "Configuration",
        Severity::Medium,
        false,
        true,
        "Runtime configuration is malformed",
        "Fix the TOML syntax or the provider declarations",
    ),
    // Document
    ErrorMetadata::new(
        "E020",
        "Document",
        Severity::Medium,
        false,
        true,
        "Document file not found",
        "Check the document path",
    ),
    ErrorMetadata::new(
        "E021",
        "Document",
        Severity::Medium,
        false,
        true,
        "Document exceeds the maximum size limit",
        "Split the template or raise max_document_size",
    ),
    ErrorMetadata::new(
        "E022",
        "Document",
        Severity::Medium,
        false,
        true,
        "Document body is not valid JSON for the body model",
        "Regenerate the body export",
    ),
    ErrorMetadata::new(
        "E023",
        "Document",
        Severity::Medium,
        false,
        true,
        "Document has more runs than allowed",
        "Split the template or raise max_runs_per_document",
    ),
    ErrorMetadata::new(
        "E024",
        "Document",
        Severity::Medium,
        false,
        true,
        "I/O error while reading the document",
        "Check file permissions and disk state",
    ),
    // Syntax
    ErrorMetadata::new(
        "E040",
        "Syntax",
        Severity::Critical,
        false,
        true,
        "Tag reading started away from a field begin",
        "Internal parser invariant violated; file a bug report",
    ),
    ErrorMetadata::new(
        "E041",
        "Syntax",
        Severity::High,
        false,
        true,
        "A table appears inside a field",
        "Move the table out of the field instruction",
    ),
    ErrorMetadata::new(
        "E042",
        "Syntax",
        Severity::High,
        false,
        true,
        "The body ended inside a field",
        "Close the field or repair the document",
    ),
    ErrorMetadata::new(
        "E043",
        "Syntax",
        Severity::High,
        false,
        true,
        "The template uses a construct this parser does not support",
        "Remove m:let or m:elt tags from the template",
    ),
    ErrorMetadata::new(
        "E087",
        "Syntax",
        Severity::High,
        false,
        true,
        "Template nesting exceeds the maximum depth",
        "Flatten the template or raise max_nesting_depth",
    ),
    // Template diagnostics
    ErrorMetadata::new(
        "W100",
        "Template",
        Severity::Low,
        true,
        false,
        "Tag found where it cannot close anything",
        "Remove the tag or add the matching opening tag",
    ),
    ErrorMetadata::new(
        "W101",
        "Template",
        Severity::Low,
        true,
        false,
        "Malformed m:for tag",
        "Use m:for variable | expression",
    ),
    ErrorMetadata::new(
        "W102",
        "Template",
        Severity::Low,
        true,
        false,
        "Expression does not compile",
        "Fix the expression syntax",
    ),
    ErrorMetadata::new(
        "W103",
        "Template",
        Severity::Low,
        true,
        false,
        "Conditional is not closed",
        "Add m:elseif, m:else or m:endif",
    ),
    ErrorMetadata::new(
        "W104",
        "Template",
        Severity::Low,
        true,
        false,
        "Image tag lacks a file option",
        "Add file:\"path\" to the tag",
    ),
    ErrorMetadata::new(
        "W105",
        "Template",
        Severity::Low,
        true,
        false,
        "Image or diagram option is unknown or has a bad value",
        "Check option names and values",
    ),
    ErrorMetadata::new(
        "W106",
        "Template",
        Severity::Low,
        true,
        false,
        "Option list is malformed",
        "Use key:\"value\" pairs separated by spaces",
    ),
    ErrorMetadata::new(
        "W107",
        "Template",
        Severity::Low,
        true,
        false,
        "Diagram provider cannot be resolved",
        "Register the provider or fix its name",
    ),
];

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        METADATA
            .iter()
            .map(|metadata| (metadata.code, metadata.clone()))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Human-readable description, "Unknown error" for unregistered codes
pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_failure_code_has_metadata() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            config::CONFIG_READ_ERROR,
            config::INVALID_CONFIG,
            document::DOCUMENT_NOT_FOUND,
            document::DOCUMENT_TOO_LARGE,
            document::INVALID_DOCUMENT,
            document::TOO_MANY_RUNS,
            document::IO_ERROR,
            syntax::NOT_AT_FIELD_BEGIN,
            syntax::TABLE_INSIDE_TAG,
            syntax::UNTERMINATED_TAG,
            syntax::UNSUPPORTED_CONSTRUCT,
            syntax::MAX_NESTING_DEPTH,
            template::UNEXPECTED_TAG,
            template::MALFORMED_REPETITION,
            template::INVALID_EXPRESSION,
            template::CONDITIONAL_TAG_EXPECTED,
            template::INVALID_IMAGE_TAG,
            template::INVALID_IMAGE_OPTION,
            template::INVALID_OPTION_SYNTAX,
            template::UNKNOWN_PROVIDER,
        ];

        for code in codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_template_codes_are_recoverable() {
        assert!(is_recoverable(template::UNEXPECTED_TAG.as_str()));
        assert!(!requires_halt(template::INVALID_EXPRESSION.as_str()));
        assert_eq!(get_category(template::UNKNOWN_PROVIDER.as_str()), "Template");
    }

    #[test]
    fn test_fatal_codes_halt() {
        assert!(requires_halt(syntax::UNSUPPORTED_CONSTRUCT.as_str()));
        assert_eq!(
            get_severity(system::INTERNAL_ERROR.as_str()),
            Severity::Critical
        );
    }

    #[test]
    fn test_unknown_code_fallbacks() {
        assert_eq!(get_description("Z999"), "Unknown error");
        assert_eq!(get_category("Z999"), "Unknown");
        assert!(is_recoverable("Z999"));
    }
}
