//! End-to-end tests for the transcript parse/resolve pipeline.
//!
//! These exercise the library API the way the convert command does: raw
//! concatenated text in, resolved messages out.

use chat2html::transcript::{normalize_ellipsis, Transcript};

#[test]
fn end_to_end_reaction_and_reply() {
    let input = "10:00:01\tFrom Alice : Hi\n\
                 10:00:05\tFrom Bob : Reacted to \"Hi\" with 👍\n\
                 10:00:09\tFrom Carol : Replying to \"Hi\"\nYo\n\
                 00:00:00";
    let transcript = Transcript::parse(input).unwrap();

    // Two visible messages: the reaction event is folded into the first
    assert_eq!(transcript.len(), 2);

    let alice = &transcript.messages[0];
    assert_eq!(alice.author, "Alice");
    assert_eq!(alice.text, "Hi");
    let groups = alice.reactions.as_ref().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].symbol, "👍");
    assert_eq!(groups[0].authors, vec!["Bob"]);

    let carol = &transcript.messages[1];
    assert_eq!(carol.author, "Carol");
    assert_eq!(carol.text, "Yo");
    assert_eq!(carol.reply_to, Some(0));
}

#[test]
fn plain_messages_round_trip_unchanged() {
    let input = "10:00:01\tFrom Alice :   Hello, world.  \n";
    let transcript = Transcript::parse(input).unwrap();

    assert_eq!(transcript.messages[0].text, "Hello, world.");
    assert!(transcript.messages[0].reactions.is_none());
    assert_eq!(transcript.messages[0].reply_to, None);
}

#[test]
fn normalize_ellipsis_is_idempotent_property() {
    for input in ["Hello the...", "Hello the…", "Hello", "...", ""] {
        let once = normalize_ellipsis(input);
        assert_eq!(normalize_ellipsis(once), once);
    }
}

#[test]
fn fully_withdrawn_reaction_leaves_no_trace() {
    let input = "10:00:01\tFrom Alice : Hi\n\
                 10:00:05\tFrom Bob : Reacted to \"Hi\" with 👍\n\
                 10:00:09\tFrom Bob : Removed a 👍 reaction from \"Hi\"\n";
    let transcript = Transcript::parse(input).unwrap();

    assert_eq!(transcript.len(), 1);
    assert!(transcript.messages[0].reactions.is_none());
}

#[test]
fn unmatched_reply_quote_still_strips_preamble() {
    let input = "10:00:01\tFrom Alice : Good morning\n\
                 10:00:09\tFrom Carol : Replying to \"Nothing like this\"\nHow are you?\n";
    let transcript = Transcript::parse(input).unwrap();

    let carol = &transcript.messages[1];
    assert_eq!(carol.reply_to, None);
    assert_eq!(carol.text, "How are you?");
}

#[test]
fn private_flag_follows_recipient_suffix() {
    let input = "10:00:01\tFrom Alice  To  Bob(privately) : between us\n\
                 10:00:05\tFrom Alice  To  Everyone : for the room\n";
    let transcript = Transcript::parse(input).unwrap();

    assert!(transcript.messages[0].is_private);
    assert!(!transcript.messages[1].is_private);
    assert_eq!(transcript.private_count(), 1);
}

#[test]
fn sentinel_markers_produce_one_fewer_message() {
    // Four markers including the trailing sentinel, no reactions
    let input = "10:00:01\tFrom A : one\n\
                 10:00:02\tFrom B : two\n\
                 10:00:03\tFrom C : three\n\
                 00:00:00";
    let transcript = Transcript::parse(input).unwrap();

    assert_eq!(transcript.len(), 3);
    let texts: Vec<&str> = transcript.messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
}

#[test]
fn legacy_and_current_layouts_mix_in_one_transcript() {
    let input = "10:00:01\tAlice:\tlegacy tabs here\r\n\
                 10:00:05\tFrom Bob : modern layout here\n";
    let transcript = Transcript::parse(input).unwrap();

    assert_eq!(transcript.messages[0].author, "Alice");
    assert_eq!(transcript.messages[0].text, "legacy tabs here");
    assert_eq!(transcript.messages[1].author, "Bob");
    assert_eq!(transcript.messages[1].text, "modern layout here");
}

#[test]
fn truncated_reaction_quote_attaches_to_full_message() {
    let input = "10:00:01\tFrom Alice : Hello there everyone, what a day\n\
                 10:00:05\tFrom Bob : Reacted to \"Hello there ever...\" with ❤️\n";
    let transcript = Transcript::parse(input).unwrap();

    let groups = transcript.messages[0].reactions.as_ref().unwrap();
    assert_eq!(groups[0].symbol, "❤️");
}

#[test]
fn malformed_entry_aborts_the_run() {
    let input = "10:00:01\tFrom Alice : fine\n10:00:05\tno separator\n";
    let err = Transcript::parse(input).unwrap_err();
    assert!(err.to_string().contains("10:00:05"));
}

#[test]
fn message_json_omits_unset_fields() {
    let transcript = Transcript::parse("10:00:01\tFrom Alice : Hi\n").unwrap();
    let value = serde_json::to_value(&transcript.messages[0]).unwrap();

    assert_eq!(value["author"], "Alice");
    assert_eq!(value["is_private"], false);
    assert!(value.get("reply_to").is_none());
    assert!(value.get("reactions").is_none());
}
