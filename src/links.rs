//! Link detection for message rendering.
//!
//! [`extract`] splits free text into plain and link segments. A link starts
//! at `http://`, `https://` or `www.` and runs over every non-whitespace
//! character, except that one trailing `. , ; ! ? )` is left outside the link
//! so that sentence punctuation stays in the surrounding text. Concatenating
//! the segments in order always reproduces the input.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

static URL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Characters dropped from the end of a link token.
const TRAILING_PUNCTUATION: [char; 6] = ['.', ',', ';', '!', '?', ')'];

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| {
        Regex::new(r"(?:https?://|www\.)(\S+)").expect("Failed to compile URL regex")
    })
}

/// One contiguous span of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Link(Link<'a>),
}

impl<'a> Segment<'a> {
    /// The original text covered by this segment.
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Text(text) => text,
            Segment::Link(link) => link.text(),
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Segment::Link(_))
    }
}

/// A detected URL token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link<'a> {
    text: &'a str,
}

impl<'a> Link<'a> {
    /// The token as it appears in the text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Navigation target. Tokens without an `http` prefix get `http://`.
    pub fn href(&self) -> Cow<'a, str> {
        if self.text.starts_with("http") {
            Cow::Borrowed(self.text)
        } else {
            Cow::Owned(format!("http://{}", self.text))
        }
    }
}

/// Lazily split `text` into segments, left to right.
///
/// Empty input yields no segments; input without links yields a single
/// [`Segment::Text`] equal to the input.
pub fn extract(text: &str) -> Segments<'_> {
    Segments {
        text,
        cursor: 0,
        pending: None,
    }
}

/// Iterator returned by [`extract`]. Cloning it restarts from the same point.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    cursor: usize,
    pending: Option<(usize, usize)>,
}

impl<'a> Segments<'a> {
    fn link_at(&mut self, start: usize, end: usize) -> Segment<'a> {
        self.cursor = end;
        Segment::Link(Link {
            text: &self.text[start..end],
        })
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((start, end)) = self.pending.take() {
            return Some(self.link_at(start, end));
        }

        if self.cursor >= self.text.len() {
            return None;
        }

        let Some(caps) = url_regex().captures_at(self.text, self.cursor) else {
            let rest = &self.text[self.cursor..];
            self.cursor = self.text.len();
            return Some(Segment::Text(rest));
        };

        let (Some(whole), Some(tail)) = (caps.get(0), caps.get(1)) else {
            return None;
        };
        let start = whole.start();
        let end = token_end(tail.as_str(), whole.end());

        if start > self.cursor {
            let text = &self.text[self.cursor..start];
            self.cursor = start;
            self.pending = Some((start, end));
            return Some(Segment::Text(text));
        }

        Some(self.link_at(start, end))
    }
}

/// End offset of a link whose body after the scheme is `tail`, ending at
/// `match_end`. The body always keeps at least one character.
fn token_end(tail: &str, match_end: usize) -> usize {
    let mut chars = tail.chars();
    match chars.next_back() {
        Some(last) if TRAILING_PUNCTUATION.contains(&last) && !chars.as_str().is_empty() => {
            match_end - last.len_utf8()
        }
        _ => match_end,
    }
}

/// Iterate over only the links found in `text`.
pub fn find_links(text: &str) -> impl Iterator<Item = Link<'_>> {
    extract(text).filter_map(|segment| match segment {
        Segment::Link(link) => Some(link),
        Segment::Text(_) => None,
    })
}
