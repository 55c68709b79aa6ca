// build.rs - TOML-driven compile-time limits
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    document: DocumentLimits,
    syntax: SyntaxLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct DocumentLimits {
    max_document_size: u64,
    max_runs_per_document: usize,
}

#[derive(serde::Deserialize)]
struct SyntaxLimits {
    max_nesting_depth: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=DOCGEN_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=DOCGEN_CONFIG_DIR");

    let profile = env::var("DOCGEN_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("DOCGEN_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Workspace root is the parent of the crate directory
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_DOCUMENT_SIZE: u64 = 1_000_000_000;
    const ABSOLUTE_MAX_NESTING_DEPTH: usize = 1024;

    if config.document.max_document_size > ABSOLUTE_MAX_DOCUMENT_SIZE {
        panic!("LIMITS: max_document_size exceeds absolute maximum");
    }

    if config.syntax.max_nesting_depth == 0 {
        panic!("LIMITS: max_nesting_depth must be at least 1");
    }

    // Each nesting level costs a few stack frames
    if config.syntax.max_nesting_depth > ABSOLUTE_MAX_NESTING_DEPTH {
        panic!("LIMITS: max_nesting_depth exceeds absolute maximum");
    }

    if profile == "production" && config.document.max_document_size > 50_000_000 {
        panic!("PRODUCTION: max_document_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod document {{
        pub const MAX_DOCUMENT_SIZE: u64 = {};
        pub const MAX_RUNS_PER_DOCUMENT: usize = {};
    }}

    pub mod syntax {{
        pub const MAX_NESTING_DEPTH: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        config.document.max_document_size,
        config.document.max_runs_per_document,
        config.syntax.max_nesting_depth,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
    );

    fs::write(&output_path, constants_code)
        .unwrap_or_else(|e| panic!("Failed to write {}: {}", output_path.display(), e));
}
