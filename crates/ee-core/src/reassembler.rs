//! Line sanitizing and token reassembly.
//!
//! Input arrives as lines, but a record's tokens may be spread over any number
//! of them. The [`Reassembler`] strips prompt framing and the end-of-stream
//! sentinel from each line and hands back its tokens, so the caller sees one
//! continuous token sequence regardless of where the line breaks fell.

use std::str::SplitWhitespace;

/// Token marking the logical end of the input stream.
///
/// It may stand alone or be glued to the end of the last data token.
pub const END_OF_STREAM: &str = "EOF";

/// A single input line with framing removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizedLine<'a> {
    /// Data content, without prompt markers or sentinel.
    pub content: &'a str,
    /// Whether the sentinel was present at the end of the line.
    pub end_of_stream: bool,
}

impl<'a> SanitizedLine<'a> {
    /// Whitespace-separated data tokens on this line.
    pub fn tokens(&self) -> SplitWhitespace<'a> {
        self.content.split_whitespace()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Strips leading `>` markers, surrounding whitespace and a trailing sentinel.
///
/// Returns `None` for blank lines, which carry nothing at all.
pub fn sanitize_line(line: &str) -> Option<SanitizedLine<'_>> {
    if line.trim().is_empty() {
        return None;
    }

    let content = line
        .trim_start_matches(|c: char| c == '>' || c.is_whitespace())
        .trim_end();

    let (content, end_of_stream) = match content.strip_suffix(END_OF_STREAM) {
        Some(rest) => (rest.trim_end(), true),
        None => (content, false),
    };

    Some(SanitizedLine {
        content,
        end_of_stream,
    })
}

/// Turns a sequence of lines into one logical token sequence.
#[derive(Debug, Default)]
pub struct Reassembler {
    ended: bool,
    lines_read: usize,
}

impl Reassembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one physical line and returns its data tokens.
    ///
    /// `pending` reports whether the consumer is holding a partial record. A
    /// line that carries no data while nothing is pending ends the stream,
    /// the same as an explicit sentinel. Once the stream has ended, further
    /// lines yield no tokens.
    pub fn feed_line<'a>(&mut self, line: &'a str, pending: bool) -> SplitWhitespace<'a> {
        if self.ended {
            return "".split_whitespace();
        }
        self.lines_read += 1;

        let Some(sanitized) = sanitize_line(line) else {
            return "".split_whitespace();
        };

        if sanitized.end_of_stream || (sanitized.is_empty() && !pending) {
            self.ended = true;
        }

        sanitized.tokens()
    }

    /// Whether the end of the logical stream has been reached.
    pub const fn is_ended(&self) -> bool {
        self.ended
    }

    /// Physical lines consumed before the stream ended.
    pub const fn lines_read(&self) -> usize {
        self.lines_read
    }
}
