pub mod chat;
pub mod compose;
pub mod doctor;
pub mod models;
pub mod onboard;

use std::path::{Path, PathBuf};

use playground_config::AppConfig;
use playground_documents::{is_accepted, LoadedFile, ACCEPTED_EXTENSIONS};

use crate::PromptArgs;

/// Base instruction: `--system-prompt`, then `--system-prompt-file`, then config.
pub fn resolve_base_prompt(
    args: &PromptArgs,
    config: &AppConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(prompt) = &args.system_prompt {
        return Ok(prompt.clone());
    }
    if let Some(path) = &args.system_prompt_file {
        return std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()).into());
    }
    Ok(config.system_prompt.clone().unwrap_or_default())
}

/// Config attachments followed by command-line attachments, upload order kept.
pub fn attachment_paths(args: &PromptArgs, config: &AppConfig) -> Vec<PathBuf> {
    config
        .files
        .iter()
        .map(PathBuf::from)
        .chain(args.files.iter().cloned())
        .collect()
}

/// Run each path through the upload filter and the loader.
///
/// Rejected extensions are reported and skipped.
pub fn load_attachments(paths: &[PathBuf]) -> Vec<LoadedFile> {
    paths
        .iter()
        .filter_map(|path| load_attachment(path))
        .collect()
}

pub fn load_attachment(path: &Path) -> Option<LoadedFile> {
    let name = path.file_name()?.to_string_lossy();
    if !is_accepted(&name) {
        eprintln!(
            "  ⚠️  Skipping {}: only .{} files can be attached",
            path.display(),
            ACCEPTED_EXTENSIONS.join(", .")
        );
        return None;
    }
    Some(LoadedFile::from_path(path))
}
