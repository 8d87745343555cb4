//! Convert command handler.
//!
//! Reads transcript files, runs the parse/resolve pipeline, and writes the
//! rendered HTML page to a file or stdout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::render::{self, RenderOptions, DEFAULT_STYLESHEET};
use crate::transcript::Transcript;

/// Resolve the page title to use.
///
/// Priority order:
/// 1. CLI argument (explicit user intent)
/// 2. Configured default title
/// 3. First input file's stem
pub fn resolve_title(cli_title: Option<String>, config: &Config, files: &[PathBuf]) -> String {
    cli_title
        .or_else(|| config.render.title.clone())
        .unwrap_or_else(|| default_title(files))
}

/// Derive a title from the first input file's stem.
pub fn default_title(files: &[PathBuf]) -> String {
    files
        .first()
        .and_then(|f| f.file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "chat".to_string())
}

/// Resolve the stylesheet to embed.
///
/// Priority order: CLI `--css` file, configured stylesheet path, built-in
/// default. A configured or passed path that cannot be read is an error
/// rather than a silent fallback.
pub fn resolve_stylesheet(cli_css: Option<&Path>, config: &Config) -> Result<String> {
    let path = match cli_css {
        Some(path) => Some(path.to_path_buf()),
        None => config.stylesheet_path(),
    };

    match path {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read stylesheet: {}", path.display())),
        None => Ok(DEFAULT_STYLESHEET.to_string()),
    }
}

/// Handle the convert command.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    files: &[PathBuf],
    output: Option<&Path>,
    title: Option<String>,
    css: Option<&Path>,
    include_private: bool,
) -> Result<()> {
    let config = Config::load()?;

    let text = super::read_concatenated(files)?;
    let transcript = Transcript::parse(&text).context("Failed to parse transcript")?;

    let options = RenderOptions {
        title: resolve_title(title, &config, files),
        stylesheet: resolve_stylesheet(css, &config)?,
        include_private: include_private || config.render.include_private,
    };
    let html = render::render_page(&transcript, &options);

    match output {
        Some(path) => {
            fs::write(path, &html)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;

            let hidden = if options.include_private {
                0
            } else {
                transcript.private_count()
            };
            if hidden > 0 {
                println!(
                    "Rendered {} messages to {} ({} private hidden)",
                    transcript.len() - hidden,
                    path.display(),
                    hidden
                );
            } else {
                println!("Rendered {} messages to {}", transcript.len(), path.display());
            }
        }
        None => print!("{}", html),
    }

    Ok(())
}
