//! System prompt composition.

/// An uploaded file after text extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub name: String,
    pub content: String,
}

impl LoadedFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Load `path` through the document loader.
    pub fn from_path(path: &std::path::Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            content: crate::loader::read_path(path),
        }
    }
}

fn file_blocks(files: &[LoadedFile]) -> String {
    files
        .iter()
        .map(|f| format!("\n### Content from {}:\n{}\n", f.name, f.content))
        .collect()
}

/// Whether there is anything to compose. When this is false the previous
/// prompt stays in effect and no remote resources are touched.
pub fn should_compose(base: &str, files: &[LoadedFile]) -> bool {
    !base.is_empty() || !files.is_empty()
}

/// Join the base instruction with every file, in upload order.
pub fn compose_system_prompt(base: &str, files: &[LoadedFile]) -> String {
    format!(
        "{base}\n\nContext from uploaded files:\n\n{}",
        file_blocks(files)
    )
}
