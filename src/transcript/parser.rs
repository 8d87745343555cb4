//! Timestamp-delimited transcript scanning and event classification.
//!
//! The raw log is a sequence of entries, each beginning with a line that
//! starts with a time of day. An entry body runs from the end of its
//! timestamp to the start of the next one, so multi-line messages keep their
//! embedded line breaks. Each body splits at the first `:` into an author
//! field and a message, which is then classified as a reaction-add, a
//! reaction-remove, or a normal message.
//!
//! Two historical field layouts are tolerated by the same first-colon split:
//!
//! ```text
//! 10:00:01	Alice:	message text               <- format A (tab-delimited)
//! 10:00:01	From Alice  To  Bob(privately) : message text   <- format B
//! ```
//!
//! The scanner closes the final pending entry itself; a legacy trailing
//! sentinel timestamp (with nothing after it) is recognized and dropped.

use memchr::memchr_iter;
use tracing::{debug, trace};

use super::error::TranscriptError;
use super::{normalize_ellipsis, Message, ReactionIndex};

const REACTED_PREFIX: &str = "Reacted to \"";
const REACTED_SEP: &str = "\" with ";
const REMOVED_PREFIX: &str = "Removed a ";
const REMOVED_SEP: &str = " reaction from ";

/// Byte span of one timestamp marker in the input.
#[derive(Debug, Clone, Copy)]
struct Marker {
    start: usize,
    end: usize,
}

/// Scan raw transcript text into ordered messages and accumulated reactions.
///
/// # Errors
///
/// Returns [`TranscriptError::MalformedEntry`] when an entry body has no `:`
/// separator, and [`TranscriptError::InconsistentCounts`] when classification
/// bookkeeping does not add up.
pub(crate) fn scan(text: &str) -> Result<(Vec<Message>, ReactionIndex), TranscriptError> {
    let markers = find_markers(text);

    let mut messages = Vec::new();
    let mut reactions = ReactionIndex::default();
    let mut entries = 0usize;
    let mut reaction_events = 0usize;

    for (i, marker) in markers.iter().enumerate() {
        let timestamp = &text[marker.start..marker.end];
        let body_end = match markers.get(i + 1) {
            Some(next) => next.start,
            None => text.len(),
        };
        let body = &text[marker.end..body_end];

        // A final marker with an empty body is either a legacy sentinel
        // appended by old callers or a bare trailing stamp; nothing to close.
        if i + 1 == markers.len() && body.trim().is_empty() {
            trace!(timestamp = %timestamp, "dropping empty final entry");
            continue;
        }
        entries += 1;

        let Some((author_field, message)) = body.split_once(':') else {
            return Err(TranscriptError::MalformedEntry {
                timestamp: timestamp.to_string(),
            });
        };
        let (author, is_private) = parse_author_field(author_field);
        let message = message.trim();

        if let Some((target, symbol)) = parse_reaction_add(message) {
            trace!(author = %author, symbol = %symbol, target = %target, "reaction added");
            reactions.add(target, symbol, &author);
            reaction_events += 1;
        } else if let Some((target, symbol)) = parse_reaction_remove(message) {
            if !reactions.remove(target, symbol, &author) {
                debug!(
                    author = %author,
                    symbol = %symbol,
                    target = %target,
                    "ignoring removal of a reaction that was never added"
                );
            }
            reaction_events += 1;
        } else {
            messages.push(Message {
                timestamp: timestamp.to_string(),
                author,
                text: message.to_string(),
                is_private,
                reply_to: None,
                reactions: None,
            });
        }
    }

    let accounted = messages.len() + reaction_events;
    if accounted != entries {
        return Err(TranscriptError::InconsistentCounts { entries, accounted });
    }

    Ok((messages, reactions))
}

/// Locate all timestamp markers, in order of appearance.
///
/// Markers only count at the start of a line, so a time of day quoted inside
/// a message body does not split the entry that contains it.
fn find_markers(text: &str) -> Vec<Marker> {
    let bytes = text.as_bytes();
    let mut markers = Vec::new();

    let mut push_if_marker = |start: usize| {
        if let Some(len) = timestamp_len(&bytes[start..]) {
            markers.push(Marker {
                start,
                end: start + len,
            });
        }
    };

    if !bytes.is_empty() {
        push_if_marker(0);
    }
    for nl in memchr_iter(b'\n', bytes) {
        if nl + 1 < bytes.len() {
            push_if_marker(nl + 1);
        }
    }

    markers
}

/// Match `H:MM:SS` / `HH:MM:SS` at the start of `line`, returning the match
/// length. Longer digit runs (`123:00:00`, `10:00:001`) and chained segments
/// (`1:02:03:04`) are rejected.
fn timestamp_len(line: &[u8]) -> Option<usize> {
    let hour_digits = line.iter().take_while(|b| b.is_ascii_digit()).count();
    if !(1..=2).contains(&hour_digits) {
        return None;
    }

    let rest = &line[hour_digits..];
    if rest.len() < 6 {
        return None;
    }
    if rest[0] != b':' || rest[3] != b':' {
        return None;
    }
    if ![rest[1], rest[2], rest[4], rest[5]]
        .iter()
        .all(|b| b.is_ascii_digit())
    {
        return None;
    }

    match rest.get(6) {
        Some(b) if b.is_ascii_digit() || *b == b':' => None,
        _ => Some(hour_digits + 6),
    }
}

/// Normalize the author field shared by both transcript layouts.
///
/// Strips the format-B `"From "` marker, splits off an optional recipient
/// clause, and flags direct messages whose recipient ends in `(privately)`.
fn parse_author_field(field: &str) -> (String, bool) {
    let field = field.trim();
    let field = field.strip_prefix("From ").unwrap_or(field);

    match split_recipient(field) {
        Some((author, recipient)) => {
            let is_private = recipient.trim_end().ends_with("(privately)");
            (author.trim_end().to_string(), is_private)
        }
        None => (field.to_string(), false),
    }
}

/// Split `"Author  To  Recipient"` at the first `To` delimiter.
///
/// Older exports pad `To` with two spaces on each side; newer ones with one.
fn split_recipient(field: &str) -> Option<(&str, &str)> {
    for delim in ["  To  ", " To "] {
        if let Some(idx) = field.find(delim) {
            return Some((&field[..idx], &field[idx + delim.len()..]));
        }
    }
    None
}

/// Parse `Reacted to "<target>" with <symbol>` into its parts.
///
/// Returns `None` when the body carries the prefix but not the full shape,
/// in which case the entry falls through to a normal message.
fn parse_reaction_add(message: &str) -> Option<(&str, &str)> {
    let rest = message.strip_prefix(REACTED_PREFIX)?;
    let (target, symbol) = rest.split_once(REACTED_SEP)?;
    Some((normalize_ellipsis(target), symbol.trim()))
}

/// Parse `Removed a <symbol> reaction from "<target>"` into its parts.
fn parse_reaction_remove(message: &str) -> Option<(&str, &str)> {
    let rest = message.strip_prefix(REMOVED_PREFIX)?;
    let (symbol, rest) = rest.split_once(REMOVED_SEP)?;

    // Target is the first quoted substring of the remainder
    let open = rest.find('"')?;
    let rest = &rest[open + 1..];
    let close = rest.find('"')?;

    Some((normalize_ellipsis(&rest[..close]), symbol))
}
