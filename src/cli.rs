//! CLI definitions for chat2html
//!
//! This module contains the clap CLI structure definitions, separated from
//! main.rs so command handlers and tests can share them.

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

/// Build clap styles using our theme colors.
///
/// Maps theme colors to clap's styling system for consistent CLI appearance.
/// - Green: headers, usage, command names (accent color)
/// - White: descriptions, placeholders (renders as light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default()) // Light gray for descriptions
        .valid(AnsiColor::White.on_default()) // Light gray for valid values
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "chat2html")]
#[command(about = "Convert exported chat-log transcripts into a styled HTML page")]
#[command(
    long_about = "chat2html - Convert exported chat-log transcripts into a styled HTML page.

Reads one or more plain-text chat transcripts (timestamped author/message
lines, including reply and emoji-reaction annotations) and produces a single
self-contained HTML document. Replies become linked back-references and
reactions become grouped emoji summaries under the message they target.

QUICK START:
    chat2html convert meeting.txt -o meeting.html
    chat2html convert part1.txt part2.txt -o all.html
    chat2html inspect meeting.txt

Configuration lives in ~/.config/chat2html/config.toml."
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert transcript files to an HTML page
    #[command(long_about = "Convert one or more transcript files to a single HTML page.

Files are concatenated in the order given, so pass them oldest first.
The page is written to stdout unless --output is given. Messages sent
privately are hidden by default.

EXAMPLES:
    chat2html convert meeting.txt                      Write HTML to stdout
    chat2html convert meeting.txt -o meeting.html      Write to a file
    chat2html convert day1.txt day2.txt -o week.html   Concatenate transcripts
    chat2html convert meeting.txt --include-private    Keep private messages
    chat2html convert meeting.txt --css my.css         Use a custom stylesheet")]
    Convert {
        /// Transcript text files, oldest first
        #[arg(required = true, help = "Transcript .txt files, oldest first")]
        files: Vec<PathBuf>,
        /// Output HTML file (defaults to stdout)
        #[arg(long, short, help = "Output HTML file (defaults to stdout)")]
        output: Option<PathBuf>,
        /// Page title (defaults to the first file's name)
        #[arg(long, short, help = "Page title (defaults to the first file's name)")]
        title: Option<String>,
        /// Stylesheet file replacing the built-in one
        #[arg(long, help = "Stylesheet file replacing the built-in one")]
        css: Option<PathBuf>,
        /// Include messages sent privately
        #[arg(long, help = "Include messages sent privately")]
        include_private: bool,
    },

    /// Summarize a transcript without rendering it
    #[command(long_about = "Parse transcript files and print a summary without rendering HTML.

Shows message, reply, and reaction counts, a per-author breakdown, and the
time span covered. With --json the summary and the full resolved message
list are emitted as JSON for further processing.

EXAMPLES:
    chat2html inspect meeting.txt
    chat2html inspect day1.txt day2.txt
    chat2html inspect meeting.txt --json | jq '.messages[0]'")]
    Inspect {
        /// Transcript text files, oldest first
        #[arg(required = true, help = "Transcript .txt files, oldest first")]
        files: Vec<PathBuf>,
        /// Emit the summary and resolved messages as JSON
        #[arg(long, help = "Emit the summary and resolved messages as JSON")]
        json: bool,
    },

    /// Configuration management
    #[command(
        subcommand,
        long_about = "View and edit the chat2html configuration file.

Configuration is stored in ~/.config/chat2html/config.toml and covers the
default page title, a custom stylesheet path, and whether private messages
are rendered.

EXAMPLES:
    chat2html config show          Display current configuration
    chat2html config edit          Open config in $EDITOR
    chat2html config path          Print the config file location"
    )]
    Config(ConfigCommands),

    /// Generate shell completions (internal use)
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Open configuration in editor
    Edit,
    /// Print the configuration file path
    Path,
}
