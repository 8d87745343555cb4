//! Inspect command handler.
//!
//! Parses transcript files and reports what the converter would see: message
//! and reaction counts, a per-author breakdown, and the covered time span.
//! With `--json` the report plus the full resolved message list is emitted
//! for machine consumption.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveTime;
use humansize::{format_size, BINARY};
use serde::Serialize;

use crate::transcript::{Message, Transcript};

/// Everything `inspect` knows about a transcript.
#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub files: Vec<String>,
    pub input_bytes: u64,
    pub message_count: usize,
    pub private_count: usize,
    pub reply_count: usize,
    pub reaction_count: usize,
    pub authors: Vec<AuthorCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_timestamp: Option<String>,
    pub messages: Vec<Message>,
}

/// Message count for one author.
#[derive(Debug, Serialize)]
pub struct AuthorCount {
    pub name: String,
    pub messages: usize,
}

/// Build the report for a parsed transcript.
pub fn build_report(files: &[PathBuf], input_bytes: u64, transcript: Transcript) -> InspectReport {
    InspectReport {
        files: files.iter().map(|f| f.display().to_string()).collect(),
        input_bytes,
        message_count: transcript.len(),
        private_count: transcript.private_count(),
        reply_count: transcript.reply_count(),
        reaction_count: transcript.reaction_count(),
        authors: author_counts(&transcript.messages),
        first_timestamp: transcript.messages.first().map(|m| m.timestamp.clone()),
        last_timestamp: transcript.messages.last().map(|m| m.timestamp.clone()),
        messages: transcript.messages,
    }
}

/// Per-author message counts, most active first.
///
/// The sort is stable, so authors with equal counts keep their order of
/// first appearance.
pub fn author_counts(messages: &[Message]) -> Vec<AuthorCount> {
    let mut counts: Vec<AuthorCount> = Vec::new();
    for message in messages {
        match counts.iter_mut().find(|c| c.name == message.author) {
            Some(entry) => entry.messages += 1,
            None => counts.push(AuthorCount {
                name: message.author.clone(),
                messages: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.messages.cmp(&a.messages));
    counts
}

/// Format the covered time span, e.g. `10:00:01 - 11:23:45 (1h 23m)`.
///
/// The duration is omitted when the boundary stamps do not parse or the span
/// runs backwards (a transcript crossing midnight).
pub fn format_span(first: &str, last: &str, span: Option<(NaiveTime, NaiveTime)>) -> String {
    let duration = span
        .map(|(start, end)| end.signed_duration_since(start))
        .filter(|d| d.num_seconds() > 0);

    match duration {
        Some(d) => {
            let minutes = d.num_minutes();
            let label = if minutes >= 60 {
                format!("{}h {}m", minutes / 60, minutes % 60)
            } else if minutes >= 1 {
                format!("{}m", minutes)
            } else {
                format!("{}s", d.num_seconds())
            };
            format!("{} - {} ({})", first, last, label)
        }
        None => format!("{} - {}", first, last),
    }
}

/// Handle the inspect command.
#[cfg(not(tarpaulin_include))]
pub fn handle(files: &[PathBuf], json: bool) -> Result<()> {
    let text = super::read_concatenated(files)?;
    let input_bytes = text.len() as u64;

    let transcript = Transcript::parse(&text).context("Failed to parse transcript")?;
    let span = transcript.time_span();
    let report = build_report(files, input_bytes, transcript);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Transcript: {} file(s), {}",
        report.files.len(),
        format_size(report.input_bytes, BINARY)
    );
    println!(
        "Messages: {} ({} private)",
        report.message_count, report.private_count
    );
    println!("Replies: {}", report.reply_count);
    println!("Reactions: {}", report.reaction_count);

    if !report.authors.is_empty() {
        let breakdown: Vec<String> = report
            .authors
            .iter()
            .map(|a| format!("{}: {}", a.name, a.messages))
            .collect();
        println!("Authors: {}", breakdown.join(", "));
    }

    if let (Some(first), Some(last)) = (&report.first_timestamp, &report.last_timestamp) {
        println!("Span: {}", format_span(first, last, span));
    }

    Ok(())
}
