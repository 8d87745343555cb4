//! Integration tests for the convert command.
//!
//! Tests end-to-end CLI behavior: file reading, rendering, private-message
//! filtering, stylesheet and title resolution, and error handling.

use std::fs;

use tempfile::TempDir;

use crate::helpers::{run_chat2html, sample_transcript, write_transcript};

#[test]
fn convert_writes_output_file() {
    let temp = TempDir::new().unwrap();
    let input = write_transcript(&temp, "standup.txt", sample_transcript());
    let output = temp.path().join("standup.html");

    let (stdout, stderr, exit_code) = run_chat2html(
        &[
            "convert",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ],
        temp.path(),
    );

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert!(
        stdout.contains("Rendered 2 messages"),
        "stdout: {}",
        stdout
    );
    assert!(stdout.contains("1 private hidden"), "stdout: {}", stdout);

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("Hi everyone"));
    assert!(html.contains("👍 Bob"));
    assert!(html.contains("href=\"#id_0\""));
    assert!(!html.contains("just between us"));
}

#[test]
fn convert_defaults_to_stdout() {
    let temp = TempDir::new().unwrap();
    let input = write_transcript(&temp, "standup.txt", sample_transcript());

    let (stdout, stderr, exit_code) =
        run_chat2html(&["convert", input.to_str().unwrap()], temp.path());

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert!(stdout.starts_with("<!DOCTYPE html>"));
    assert!(stdout.contains("Hi everyone"));
}

#[test]
fn convert_include_private_keeps_private_messages() {
    let temp = TempDir::new().unwrap();
    let input = write_transcript(&temp, "standup.txt", sample_transcript());

    let (stdout, _, exit_code) = run_chat2html(
        &["convert", input.to_str().unwrap(), "--include-private"],
        temp.path(),
    );

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("just between us"));
}

#[test]
fn convert_title_defaults_to_file_stem() {
    let temp = TempDir::new().unwrap();
    let input = write_transcript(&temp, "weekly-sync.txt", sample_transcript());

    let (stdout, _, exit_code) =
        run_chat2html(&["convert", input.to_str().unwrap()], temp.path());

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("<title>weekly-sync</title>"));
}

#[test]
fn convert_title_flag_overrides_stem() {
    let temp = TempDir::new().unwrap();
    let input = write_transcript(&temp, "weekly-sync.txt", sample_transcript());

    let (stdout, _, exit_code) = run_chat2html(
        &["convert", input.to_str().unwrap(), "--title", "Monday standup"],
        temp.path(),
    );

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("<title>Monday standup</title>"));
}

#[test]
fn convert_css_flag_embeds_custom_stylesheet() {
    let temp = TempDir::new().unwrap();
    let input = write_transcript(&temp, "standup.txt", sample_transcript());
    let css = temp.path().join("custom.css");
    fs::write(&css, ".custom-marker { color: red }").unwrap();

    let (stdout, _, exit_code) = run_chat2html(
        &[
            "convert",
            input.to_str().unwrap(),
            "--css",
            css.to_str().unwrap(),
        ],
        temp.path(),
    );

    assert_eq!(exit_code, 0);
    assert!(stdout.contains(".custom-marker { color: red }"));
}

#[test]
fn convert_concatenates_files_in_order() {
    let temp = TempDir::new().unwrap();
    let first = write_transcript(&temp, "day1.txt", "10:00:01\tFrom Alice : day one\n");
    let second = write_transcript(&temp, "day2.txt", "10:00:05\tFrom Bob : day two\n");

    let (stdout, _, exit_code) = run_chat2html(
        &[
            "convert",
            first.to_str().unwrap(),
            second.to_str().unwrap(),
        ],
        temp.path(),
    );

    assert_eq!(exit_code, 0);
    let day_one = stdout.find("day one").unwrap();
    let day_two = stdout.find("day two").unwrap();
    assert!(day_one < day_two);
}

#[test]
fn convert_reply_spans_file_boundary() {
    let temp = TempDir::new().unwrap();
    // First file has no trailing newline; the reply in the second file must
    // still resolve against the first file's message
    let first = write_transcript(&temp, "day1.txt", "10:00:01\tFrom Alice : Hi everyone");
    let second = write_transcript(
        &temp,
        "day2.txt",
        "10:00:09\tFrom Carol : Replying to \"Hi everyone\"\nMorning\n",
    );

    let (stdout, stderr, exit_code) = run_chat2html(
        &[
            "convert",
            first.to_str().unwrap(),
            second.to_str().unwrap(),
        ],
        temp.path(),
    );

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("href=\"#id_0\""));
    assert!(stdout.contains("Morning"));
}

#[test]
fn convert_malformed_transcript_fails() {
    let temp = TempDir::new().unwrap();
    let input = write_transcript(&temp, "bad.txt", "10:00:01\tno separator here\n");

    let (_, stderr, exit_code) =
        run_chat2html(&["convert", input.to_str().unwrap()], temp.path());

    assert_ne!(exit_code, 0);
    assert!(stderr.contains("10:00:01"), "stderr: {}", stderr);
}

#[test]
fn convert_missing_input_file_fails() {
    let temp = TempDir::new().unwrap();

    let (_, stderr, exit_code) =
        run_chat2html(&["convert", "/nonexistent/transcript.txt"], temp.path());

    assert_ne!(exit_code, 0);
    assert!(
        stderr.contains("/nonexistent/transcript.txt"),
        "stderr: {}",
        stderr
    );
}
