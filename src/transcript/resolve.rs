//! Reply and reaction resolution over the parsed message sequence.
//!
//! Both passes key off truncated text prefixes, the only correlation the
//! source format offers. The matching policies differ deliberately: reaction
//! attachment lets the last matching target win, reply resolution picks the
//! earliest matching prior message. Each policy lives in one primitive
//! ([`ReactionIndex::best_match`] and [`find_reply_target`]) so the ambiguity
//! stays visible and testable.

use tracing::debug;

use super::{normalize_ellipsis, Message, ReactionIndex};

const REPLY_PREFIX: &str = "Replying to \"";

/// Annotate messages in place with `reactions` and `reply_to`, rewriting the
/// text of reply messages to their actual body. Never reorders or removes.
pub(crate) fn resolve(messages: &mut [Message], reactions: &ReactionIndex) {
    for i in 0..messages.len() {
        // Reactions match the text as it appeared in the log, before any
        // reply-quote stripping of this message.
        if let Some(groups) = reactions.best_match(&messages[i].text) {
            messages[i].reactions = Some(groups.to_vec());
        }

        let Some((quoted, remainder)) = split_reply(&messages[i].text) else {
            continue;
        };
        let quoted = quoted.to_string();
        let remainder = remainder.to_string();

        // Earlier replies have already been rewritten, so the scan sees the
        // text a reader of the rendered page would see.
        let target = find_reply_target(&messages[..i], &quoted);
        if target.is_none() {
            debug!(quoted = %quoted, "reply target not found in earlier messages");
        }

        messages[i].reply_to = target;
        // The quoted-reply presentation is stripped even when resolution fails
        messages[i].text = remainder;
    }
}

/// Split a `Replying to "<original>"` message into the quoted original and
/// the actual reply body.
///
/// The quoted original is the first line minus its closing quote,
/// ellipsis-normalized. The remainder is trimmed; a reply with no body at
/// all yields an empty remainder.
fn split_reply(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix(REPLY_PREFIX)?;

    let (first_line, remainder) = match rest.split_once('\n') {
        Some((first, remainder)) => (first, remainder),
        None => (rest, ""),
    };

    let first_line = first_line.trim_end();
    let quoted = first_line.strip_suffix('"').unwrap_or(first_line);

    Some((normalize_ellipsis(quoted), remainder.trim()))
}

/// Earliest prior message whose text starts with the quoted original.
///
/// An empty quoted original (a reply to a fully elided quote) would prefix
/// every message; it resolves to nothing instead.
fn find_reply_target(earlier: &[Message], quoted: &str) -> Option<usize> {
    if quoted.is_empty() {
        return None;
    }
    earlier.iter().position(|m| m.text.starts_with(quoted))
}
