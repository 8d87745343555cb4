//! Shared helpers for integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Run the chat2html binary with HOME pinned to a temp dir so user
/// configuration never leaks into test behavior.
pub fn run_chat2html(args: &[&str], home: &Path) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_chat2html"))
        .args(args)
        .env("HOME", home)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute chat2html");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

/// Write a transcript fixture into the temp dir.
pub fn write_transcript(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write transcript fixture");
    path
}

/// A small transcript with a reaction, a reply, and a private message.
pub fn sample_transcript() -> &'static str {
    "10:00:01\tFrom Alice : Hi everyone\n\
     10:00:05\tFrom Bob : Reacted to \"Hi everyone\" with 👍\n\
     10:00:09\tFrom Carol : Replying to \"Hi everyone\"\nGood morning\n\
     10:00:15\tFrom Alice  To  Bob(privately) : just between us\n"
}
