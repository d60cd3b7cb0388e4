//! Document loader — uploaded file in, plain text out.
//!
//! The loader never returns an error. Unsupported extensions become
//! [`UNSUPPORTED_FILE_TYPE`] and parse failures become an inline
//! `"Error reading file: ..."` (or `"Error reading PDF: ..."`) string, so a
//! bad upload shows up in the prompt instead of breaking it.

use std::path::Path;

use playground_core::DocumentError;
use tracing::{debug, warn};

use crate::pdf;
use crate::table::Table;

/// Extensions offered by the upload filter, without the leading dot.
pub const ACCEPTED_EXTENSIONS: [&str; 6] = ["txt", "csv", "json", "xlsx", "xls", "pdf"];

/// Returned verbatim for any extension the loader does not know.
pub const UNSUPPORTED_FILE_TYPE: &str = "Unsupported file type";

/// The formats the loader can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Csv,
    Json,
    Spreadsheet,
    Pdf,
}

impl DocumentKind {
    /// Detect the kind from a file name's extension (case-insensitive).
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = Path::new(file_name)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();

        match extension.as_str() {
            "txt" => Some(Self::Text),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "xlsx" | "xls" => Some(Self::Spreadsheet),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// Whether the upload filter lets `file_name` through.
pub fn is_accepted(file_name: &str) -> bool {
    DocumentKind::from_file_name(file_name).is_some()
}

/// Render an uploaded file as text.
pub fn read_file_content(file_name: &str, bytes: &[u8]) -> String {
    let Some(kind) = DocumentKind::from_file_name(file_name) else {
        debug!(file = file_name, "Unsupported file type");
        return UNSUPPORTED_FILE_TYPE.to_string();
    };

    render(kind, bytes).unwrap_or_else(|e| {
        warn!(file = file_name, error = %e, "Failed to read file");
        placeholder(&e)
    })
}

/// Read a file from disk and render it.
///
/// The file name used for detection is the path's final component.
pub fn read_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match std::fs::read(path).map_err(DocumentError::from) {
        Ok(bytes) => read_file_content(&file_name, &bytes),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to open file");
            placeholder(&e)
        }
    }
}

fn render(kind: DocumentKind, bytes: &[u8]) -> Result<String, DocumentError> {
    match kind {
        DocumentKind::Text => Ok(String::from_utf8(bytes.to_vec())?),
        DocumentKind::Csv => Ok(Table::from_csv(bytes)?.render()),
        DocumentKind::Spreadsheet => Ok(Table::from_workbook(bytes)?.render()),
        DocumentKind::Json => {
            let value: serde_json::Value =
                serde_json::from_slice(bytes).map_err(|e| DocumentError::Json(e.to_string()))?;
            serde_json::to_string_pretty(&value).map_err(|e| DocumentError::Json(e.to_string()))
        }
        DocumentKind::Pdf => pdf::extract_text(bytes),
    }
}

/// The inline text shown in place of a file that could not be read.
fn placeholder(error: &DocumentError) -> String {
    match error {
        DocumentError::Pdf(_) => format!("Error reading PDF: {error}"),
        _ => format!("Error reading file: {error}"),
    }
}
