//! Static HTML rendering for resolved transcripts.
//!
//! The renderer owns everything the parsing core does not: HTML escaping,
//! `https://` hyperlink detection, line-break conversion, and the page
//! template (title, embedded stylesheet, structure). Private-message
//! filtering also happens here; the core always computes the flag and the
//! render boundary decides what to show.

use std::fmt::Write as _;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::transcript::Transcript;

/// Default stylesheet embedded at compile time.
pub const DEFAULT_STYLESHEET: &str = include_str!("../../assets/default.css");

/// Display columns a reply back-reference preview may occupy.
const REPLY_PREVIEW_WIDTH: usize = 30;

/// Presentation options for a rendered page.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page title, shown in `<title>` and as the heading
    pub title: String,
    /// CSS embedded into the page
    pub stylesheet: String,
    /// Render messages flagged as private
    pub include_private: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "chat".to_string(),
            stylesheet: DEFAULT_STYLESHEET.to_string(),
            include_private: false,
        }
    }
}

/// Render a complete self-contained HTML page for the transcript.
pub fn render_page(transcript: &Transcript, options: &RenderOptions) -> String {
    let visible: Vec<bool> = transcript
        .messages
        .iter()
        .map(|m| options.include_private || !m.is_private)
        .collect();

    let mut content = String::new();
    for (i, message) in transcript.messages.iter().enumerate() {
        if !visible[i] {
            continue;
        }

        let mut rows = String::new();

        // Reply back-reference, linked to the original message. Omitted when
        // the original is filtered out and has no anchor on this page.
        if let Some(j) = message.reply_to {
            if visible[j] {
                let original = &transcript.messages[j];
                let preview = truncate_preview(&original.text, REPLY_PREVIEW_WIDTH);
                let label = format!(
                    "@{} ← {}",
                    escape_html(&original.author),
                    escape_html(&preview)
                );
                let link = anchor("replylink", &format!("#id_{}", j), &label);
                rows.push_str(&div(
                    "post",
                    &[span("time", None, ""), span("auth", None, ""), span("msg", None, &link)],
                ));
            }
        }

        // Main post body
        let text = linkify(&escape_html(&message.text)).replace('\n', "<br>\n");
        rows.push_str(&div(
            "post",
            &[
                span("time", None, &escape_html(&message.timestamp)),
                span("auth", None, &escape_html(&message.author)),
                span("msg", Some(&format!("id_{}", i)), &text),
            ],
        ));

        // Reaction symbols with their authors
        if let Some(groups) = &message.reactions {
            let emojos: Vec<String> = groups
                .iter()
                .map(|g| {
                    let mut parts = vec![g.symbol.clone()];
                    parts.extend(g.authors.iter().map(|a| escape_html(a)));
                    parts.join(" ")
                })
                .collect();
            rows.push_str(&div(
                "post",
                &[
                    span("time", None, ""),
                    span("auth", None, ""),
                    span("emoj", None, &emojos.join(" ")),
                ],
            ));
        }

        content.push_str(&div("container", &[rows]));
        content.push('\n');
    }

    let title = escape_html(&options.title);
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en-US\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <style>{style}</style>\n\
         </head>\n\
         <body>\n\
         <h1>{title}</h1>\n\
         <hr>\n\
         {content}\
         <hr>\n\
         </body>\n\
         </html>\n",
        title = title,
        style = options.stylesheet,
        content = content,
    )
}

/// Escape text for use in HTML bodies and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap bare `https://` URLs in anchor tags.
///
/// Operates on already-escaped text; a URL runs until the next whitespace or
/// tag boundary, trailing punctuation included, as in the source exports.
pub fn linkify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("https://") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let end = tail
            .find(|c: char| c.is_whitespace() || c == '<')
            .unwrap_or(tail.len());
        let url = &tail[..end];
        let _ = write!(out, "<a href=\"{}\">{}</a>", url, url);
        rest = &tail[end..];
    }

    out.push_str(rest);
    out
}

/// Truncate preview text to `max_width` display columns, appending `…` when
/// anything was cut.
fn truncate_preview(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    // The ellipsis itself occupies one column
    let target_width = max_width.saturating_sub(1);
    let mut truncated = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
        if current_width + char_width > target_width {
            break;
        }
        truncated.push(c);
        current_width += char_width;
    }

    truncated.push('…');
    truncated
}

fn div(class: &str, children: &[String]) -> String {
    format!("<div class=\"{}\">{}</div>", class, children.concat())
}

fn span(class: &str, id: Option<&str>, body: &str) -> String {
    match id {
        Some(id) => format!("<span class=\"{}\" id=\"{}\">{}</span>", class, id, body),
        None => format!("<span class=\"{}\">{}</span>", class, body),
    }
}

fn anchor(class: &str, href: &str, body: &str) -> String {
    format!("<a class=\"{}\" href=\"{}\">{}</a>", class, href, body)
}
