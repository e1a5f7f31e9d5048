//! Writing long answers in the user's editor

use std::env;
use std::fs;
use std::io::IsTerminal;
use std::process::Command;

use tracing::debug;

use crate::errors::{AppError, AppResult, ErrorContextExt};

const FALLBACKS: [&str; 3] = ["vim", "vi", "nano"];

/// First non-blank of `$EDITOR` and `$VISUAL`
fn configured(editor: Option<String>, visual: Option<String>) -> Option<String> {
    [editor, visual]
        .into_iter()
        .flatten()
        .map(|command| command.trim().to_string())
        .find(|command| !command.is_empty())
}

fn on_path(program: &str) -> bool {
    Command::new("which")
        .arg(program)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// The editor command to open, if stdin is a terminal that can host one
///
/// Checks `$EDITOR`, then `$VISUAL`, then common editors on `PATH`.
pub fn find_editor() -> Option<String> {
    if !std::io::stdin().is_terminal() {
        return None;
    }
    configured(env::var("EDITOR").ok(), env::var("VISUAL").ok()).or_else(|| {
        FALLBACKS
            .iter()
            .find(|program| on_path(program))
            .map(|program| program.to_string())
    })
}

/// Open `editor` on an empty scratch file and return what was saved
///
/// Trailing newlines the editor adds are dropped.
pub fn edit(editor: &str) -> AppResult<String> {
    let file = tempfile::Builder::new()
        .prefix("fidelius-")
        .suffix(".txt")
        .tempfile()
        .in_file_operation(env::temp_dir(), "create editor file")?;
    let path = file.path();

    let mut words = editor.split_whitespace();
    let program = words
        .next()
        .ok_or_else(|| AppError::prompt("the editor command is empty"))?;
    debug!("Opening {} on {}", editor, path.display());

    let status = Command::new(program)
        .args(words)
        .arg(path)
        .status()
        .map_err(|e| AppError::prompt(format!("Failed to launch editor '{editor}': {e}")))?;
    if !status.success() {
        return Err(AppError::prompt(format!(
            "Editor '{editor}' exited with {status}"
        )));
    }

    let text = fs::read_to_string(path).in_file_operation(path, "read editor file")?;
    Ok(text.trim_end_matches(['\n', '\r']).to_string())
}
