//! Loading document bodies from JSON exports

use super::model::Body;
use crate::config::compile_time::document::{MAX_DOCUMENT_SIZE, MAX_RUNS_PER_DOCUMENT};
use crate::logging::{codes, Code};
use crate::{log_debug, log_error, log_success};
use std::path::{Path, PathBuf};

pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Document not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Document {path} is {size} bytes, limit is {limit}")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("Invalid document body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Document has {count} runs, limit is {limit}")]
    TooManyRuns { count: usize, limit: usize },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DocumentError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::NotFound { .. } => codes::document::DOCUMENT_NOT_FOUND,
            Self::TooLarge { .. } => codes::document::DOCUMENT_TOO_LARGE,
            Self::InvalidJson(_) => codes::document::INVALID_DOCUMENT,
            Self::TooManyRuns { .. } => codes::document::TOO_MANY_RUNS,
            Self::Io { .. } => codes::document::IO_ERROR,
        }
    }
}

/// Parse a JSON body export and number its runs and tables
pub fn from_json(content: &str) -> DocumentResult<Body> {
    let mut body: Body = serde_json::from_str(content)?;
    let count = body.assign_ids();
    if count > MAX_RUNS_PER_DOCUMENT {
        return Err(DocumentError::TooManyRuns {
            count,
            limit: MAX_RUNS_PER_DOCUMENT,
        });
    }
    log_debug!("Document body decoded", "runs" => count);
    Ok(body)
}

/// Read and decode a JSON body export from disk
pub fn load_file(path: &Path) -> DocumentResult<Body> {
    let result = read_body(path);
    match &result {
        Ok(body) => {
            log_success!(codes::success::DOCUMENT_LOADED, "Document loaded",
                "path" => path.display(),
                "runs" => body.run_count()
            );
        }
        Err(error) => {
            log_error!(error.error_code(), "Document loading failed",
                "path" => path.display(),
                "error" => error
            );
        }
    }
    result
}

fn read_body(path: &Path) -> DocumentResult<Body> {
    let metadata = std::fs::metadata(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            DocumentError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            DocumentError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    if metadata.len() > MAX_DOCUMENT_SIZE {
        return Err(DocumentError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: MAX_DOCUMENT_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    from_json(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BodyElement, FieldChar, RunId};
    use assert_matches::assert_matches;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "elements": [
            {"type": "paragraph", "runs": [
                {"text": "Hello "},
                {"field_char": "begin"},
                {"instr_text": ["m:self.name"]},
                {"field_char": "end"}
            ]},
            {"type": "table", "rows": [
                {"cells": [{"body": {"elements": [
                    {"type": "paragraph", "runs": [{"text": "cell"}]}
                ]}}]}
            ]}
        ]
    }"#;

    #[test]
    fn test_from_json_assigns_ids() {
        let body = from_json(SAMPLE).unwrap();

        assert_eq!(body.run_count(), 5);
        let BodyElement::Paragraph(paragraph) = &body.elements[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(paragraph.runs[1].field_char, Some(FieldChar::Begin));
        assert_eq!(paragraph.runs[3].id, RunId::new(3));
        assert_eq!(body.find_run(RunId::new(4)).map(|r| r.text.as_str()), Some("cell"));
    }

    #[test]
    fn test_invalid_json() {
        let result = from_json(r#"{"elements": [{"type": "picture"}]}"#);
        assert_matches!(result, Err(DocumentError::InvalidJson(_)));
        assert_eq!(
            result.unwrap_err().error_code(),
            codes::document::INVALID_DOCUMENT
        );
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let body = load_file(file.path()).unwrap();
        assert_eq!(body.run_count(), 5);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_file(&dir.path().join("missing.json"));
        assert_matches!(result, Err(DocumentError::NotFound { .. }));
    }
}
