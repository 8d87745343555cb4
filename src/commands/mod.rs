//! Command handlers for the chat2html CLI.
//!
//! Each submodule handles a specific CLI command. The main dispatch logic
//! remains in main.rs.

pub mod completions;
pub mod convert;
pub mod inspect;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Read transcript files in caller order and join them into one text blob.
///
/// Each file's content is forced to end in a newline so entries never run
/// together across file boundaries.
pub fn read_concatenated(files: &[PathBuf]) -> Result<String> {
    let mut text = String::new();
    for file in files {
        let contents = fs::read_to_string(file)
            .with_context(|| format!("Failed to read transcript file: {}", file.display()))?;
        text.push_str(&contents);
        if !text.ends_with('\n') {
            text.push('\n');
        }
    }
    Ok(text)
}
