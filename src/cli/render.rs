//! Terminal rendering of transcript messages.

use crate::links::{self, Segment};
use crate::types::{Message, Role};

/// Render `text`, turning detected links into OSC 8 hyperlinks when
/// `hyperlinks` is set. Without hyperlinks, a link whose target differs from
/// its text is followed by the target in angle brackets.
pub fn render_text(text: &str, hyperlinks: bool) -> String {
    render_segments(links::extract(text), text.len(), hyperlinks)
}

fn render_segments<'a>(
    segments: impl Iterator<Item = Segment<'a>>,
    capacity: usize,
    hyperlinks: bool,
) -> String {
    let mut out = String::with_capacity(capacity);
    for segment in segments {
        match segment {
            Segment::Text(plain) => out.push_str(plain),
            Segment::Link(link) => {
                let href = link.href();
                if hyperlinks {
                    out.push_str(&format!("\x1b]8;;{href}\x1b\\{}\x1b]8;;\x1b\\", link.text()));
                } else if href != link.text() {
                    out.push_str(&format!("{} <{href}>", link.text()));
                } else {
                    out.push_str(link.text());
                }
            }
        }
    }
    out
}

/// Render a message with a role label.
pub fn render_message(message: &Message, hyperlinks: bool) -> String {
    let label = match message.role() {
        Role::User => "you",
        Role::Assistant => "assistant",
    };
    let body = render_segments(message.segments(), message.text().len(), hyperlinks);
    format!("{label}> {body}")
}
