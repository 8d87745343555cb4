//! Chat transcript parser and reply/reaction resolver
//!
//! This module recovers structured conversation data from exported chat-log
//! text: who said what, when, in reply to what, reacted to by whom. The input
//! is a loosely delimited format with two historical field layouts, so the
//! parser is deliberately tolerant; see `parser` for the exact rules.
//!
//! # Structure
//!
//! - `parser` - Splitting raw text into timestamped events and classifying them
//! - `resolve` - Attaching reactions and resolving reply back-references
//!
//! # Format
//!
//! ```text
//! 10:00:01	From Alice : Hi everyone          <- Entry (format B)
//! 10:00:05	Bob:	Reacted to "Hi everyone" with 👍  <- Reaction event (format A)
//! 10:00:09	From Carol : Replying to "Hi everyone"
//! Good morning!                                <- Reply body (same entry)
//! ```

mod error;
mod parser;
mod resolve;

pub use error::TranscriptError;

use chrono::NaiveTime;
use serde::Serialize;

// ============================================================================
// Message Types
// ============================================================================

/// A parsed, classified chat post.
///
/// Reaction add/remove events do not become messages; they are folded into
/// the [`ReactionIndex`] and attached here during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Literal time string from the log (`H:MM:SS` or `HH:MM:SS`)
    pub timestamp: String,
    /// Display name with format-variant prefixes and recipient suffixes stripped
    pub author: String,
    /// Message body, trimmed, with any reply-quote preamble already removed
    pub text: String,
    /// True when the author field carried a `(privately)` recipient
    pub is_private: bool,
    /// Index of the earlier message this one replies to, if resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<usize>,
    /// Reaction groups attached to this message, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Vec<ReactionGroup>>,
}

impl Message {
    pub fn is_reply(&self) -> bool {
        self.reply_to.is_some()
    }

    pub fn has_reactions(&self) -> bool {
        self.reactions.is_some()
    }
}

/// One reaction symbol and the authors currently holding it, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionGroup {
    pub symbol: String,
    pub authors: Vec<String>,
}

// ============================================================================
// ReactionIndex
// ============================================================================

/// Accumulated reactions keyed by the quoted target-text prefix.
///
/// The source log quotes (and often truncates) the text of the message being
/// reacted to, so reactions can only be correlated back to their message by
/// prefix. Targets are kept in first-seen order; when several targets prefix
/// the same message text, the last one in that order wins during resolution.
///
/// Owned exclusively by the parser while events accumulate, then handed to
/// the resolver read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionIndex {
    targets: Vec<ReactionTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ReactionTarget {
    text: String,
    groups: Vec<ReactionGroup>,
}

impl ReactionIndex {
    /// Record a reaction: append `author` to the group for `symbol` under
    /// `target`, creating the target and group if absent.
    pub fn add(&mut self, target: &str, symbol: &str, author: &str) {
        let entry = match self.targets.iter_mut().find(|t| t.text == target) {
            Some(entry) => entry,
            None => {
                self.targets.push(ReactionTarget {
                    text: target.to_string(),
                    groups: Vec::new(),
                });
                self.targets.last_mut().unwrap()
            }
        };

        match entry.groups.iter_mut().find(|g| g.symbol == symbol) {
            Some(group) => group.authors.push(author.to_string()),
            None => entry.groups.push(ReactionGroup {
                symbol: symbol.to_string(),
                authors: vec![author.to_string()],
            }),
        }
    }

    /// Withdraw a reaction. Empty groups and empty targets are pruned so a
    /// fully-withdrawn target disappears from the index entirely.
    ///
    /// Returns `false` when the (target, symbol, author) combination was not
    /// present; the caller decides whether that is worth reporting.
    pub fn remove(&mut self, target: &str, symbol: &str, author: &str) -> bool {
        let Some(target_idx) = self.targets.iter().position(|t| t.text == target) else {
            return false;
        };

        let entry = &mut self.targets[target_idx];
        let Some(group_idx) = entry.groups.iter().position(|g| g.symbol == symbol) else {
            return false;
        };

        let group = &mut entry.groups[group_idx];
        let Some(author_idx) = group.authors.iter().position(|a| a == author) else {
            return false;
        };

        group.authors.remove(author_idx);
        if group.authors.is_empty() {
            entry.groups.remove(group_idx);
        }
        if entry.groups.is_empty() {
            self.targets.remove(target_idx);
        }
        true
    }

    /// Find the reaction groups whose target text prefixes `text`.
    ///
    /// This is the lossy correlation primitive: targets are truncated quotes,
    /// so matching is by prefix, and the last matching target in first-seen
    /// order wins.
    pub fn best_match(&self, text: &str) -> Option<&[ReactionGroup]> {
        self.targets
            .iter()
            .filter(|t| text.starts_with(&t.text))
            .last()
            .map(|t| t.groups.as_slice())
    }

    pub fn contains_target(&self, target: &str) -> bool {
        self.targets.iter().any(|t| t.text == target)
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }
}

// ============================================================================
// Transcript
// ============================================================================

/// A fully parsed and resolved transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    /// Messages in strict chronological insertion order
    pub messages: Vec<Message>,
}

impl Transcript {
    /// Parse raw concatenated transcript text into resolved messages.
    ///
    /// Runs the full pipeline: timestamp scan, event classification, then
    /// reply/reaction resolution. The final pending event is closed by the
    /// parser itself; callers do not append a sentinel timestamp (a legacy
    /// trailing sentinel is tolerated and ignored).
    ///
    /// # Errors
    ///
    /// Returns an error if an entry lacks the author/message separator or if
    /// internal bookkeeping produces inconsistent counts.
    pub fn parse(text: &str) -> Result<Self, TranscriptError> {
        let (mut messages, reactions) = parser::scan(text)?;
        resolve::resolve(&mut messages, &reactions);
        Ok(Self { messages })
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Count of messages flagged as private.
    pub fn private_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_private).count()
    }

    /// Count of messages with a resolved reply back-reference.
    pub fn reply_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_reply()).count()
    }

    /// Total individual reactions across all messages.
    pub fn reaction_count(&self) -> usize {
        self.messages
            .iter()
            .filter_map(|m| m.reactions.as_ref())
            .flat_map(|groups| groups.iter())
            .map(|g| g.authors.len())
            .sum()
    }

    /// First and last message timestamps as times of day.
    ///
    /// Returns `None` for an empty transcript or when the boundary stamps do
    /// not parse as `H:MM:SS`.
    pub fn time_span(&self) -> Option<(NaiveTime, NaiveTime)> {
        let first = self.messages.first()?;
        let last = self.messages.last()?;
        let start = NaiveTime::parse_from_str(&first.timestamp, "%H:%M:%S").ok()?;
        let end = NaiveTime::parse_from_str(&last.timestamp, "%H:%M:%S").ok()?;
        Some((start, end))
    }
}

// ============================================================================
// Ellipsis Normalization
// ============================================================================

/// Strip the source log's truncation markers from the end of a matching key.
///
/// The log truncates quoted text with a literal `"..."` (older exports) or a
/// `'…'` character; both must be removed before prefix matching, since the
/// untruncated original never contains them. Stripping repeats until neither
/// marker remains, which makes the operation idempotent.
pub fn normalize_ellipsis(s: &str) -> &str {
    let mut out = s;
    loop {
        if let Some(stripped) = out.strip_suffix("...") {
            out = stripped;
        } else if let Some(stripped) = out.strip_suffix('…') {
            out = stripped;
        } else {
            return out;
        }
    }
}
