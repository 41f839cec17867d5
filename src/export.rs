//! Content export
//!
//! Copy the generated article to the system clipboard or write it to a plain text
//! file. Both only read the current article and never touch wizard state.

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::wizard::WizardState;
use std::fs;
use std::path::PathBuf;

/// The article of the current session, if one has been generated
pub fn current_content(state: &WizardState) -> Result<&str, ExportError> {
    match state.content.as_deref() {
        Some(content) if !content.is_empty() => Ok(content),
        _ => Err(ExportError::NothingToExport),
    }
}

/// Put `content` on the system clipboard
pub fn copy_to_clipboard(content: &str) -> Result<(), ExportError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ExportError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(content.to_string())
        .map_err(|e| ExportError::Clipboard(e.to_string()))?;
    tracing::info!("Copied {} chars to clipboard", content.chars().count());
    Ok(())
}

/// Write `content` to the configured export file, replacing any previous export
pub fn export_to_file(content: &str, config: &ExportConfig) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(&config.directory)?;
    let path = config.path();
    fs::write(&path, content)?;
    tracing::info!("Exported content to {}", path.display());
    Ok(path)
}
