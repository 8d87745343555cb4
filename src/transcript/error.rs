//! Error types for transcript parsing.

use thiserror::Error;

/// Errors raised while turning raw transcript text into messages.
///
/// Unresolved replies and reactions are not errors (the relevant optional
/// field is simply left unset); these variants cover the cases where the
/// input is structurally broken and the run must abort.
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// An entry body between two timestamps had no author/message separator.
    #[error("malformed entry at {timestamp}: no ':' separating author from message")]
    MalformedEntry {
        /// Timestamp of the entry that failed to split
        timestamp: String,
    },

    /// Internal bookkeeping produced mismatched counts.
    #[error("inconsistent transcript: scanned {entries} entries but accounted for {accounted}")]
    InconsistentCounts {
        /// Entries produced by the timestamp scan
        entries: usize,
        /// Messages plus reaction events actually classified
        accounted: usize,
    },
}
