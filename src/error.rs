use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML error in {source_name}: {source}")]
    Xml {
        source_name: String,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Malformed JUnit document {source_name}: {reason}")]
    Malformed { source_name: String, reason: String },

    #[error("Invalid report options: {0}")]
    InvalidOptions(String),
}

impl ReportError {
    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        ReportError::Malformed {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// True for failures that come from the input documents rather than caller configuration
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ReportError::Io { .. } | ReportError::Xml { .. } | ReportError::Malformed { .. }
        )
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ReportError::Io { .. } => "io_error",
            ReportError::Xml { .. } => "xml_error",
            ReportError::Malformed { .. } => "malformed_document",
            ReportError::InvalidOptions(_) => "invalid_options",
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
