//! Contains the [`Source`] struct and the positional types used to point
//! into it.

use std::{cmp::Ordering, fmt::Display, ops::Range};

use getset::Getters;

/// Is an unsigned integer that represents a byte index in the source text.
pub type ByteIndex = usize;

/// Represents a JSON document that is about to be tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Source {
    /// Gets the full text of the document.
    #[get = "pub"]
    content: String,

    /// The byte ranges for each line in the document (including the
    /// newline)
    lines: Vec<Range<usize>>,
}

impl Source {
    /// Creates a new source from the given JSON text.
    #[must_use]
    pub fn new(content: String) -> Self {
        let lines = get_line_byte_positions(&content);
        Self { content, lines }
    }

    /// Gets the number of lines in the document.
    #[must_use]
    pub fn line_count(&self) -> usize { self.lines.len() }

    /// Gets the line of the document at the given line number.
    ///
    /// The line number starts at 0.
    #[must_use]
    pub fn get_line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(|range| &self.content[range.clone()])
    }

    /// Gets the [`Location`] of the given byte index.
    ///
    /// A byte index equal to the length of the content is the end of the
    /// document and maps to the position right after the last character.
    #[must_use]
    pub fn get_location(&self, byte_index: ByteIndex) -> Option<Location> {
        if !self.content.is_char_boundary(byte_index) {
            return None;
        }

        // gets the line number by binary searching the line ranges
        let line = self
            .lines
            .binary_search_by(|range| {
                if range.contains(&byte_index)
                    || (byte_index == range.end
                        && range.end == self.content.len())
                {
                    Ordering::Equal
                } else if byte_index < range.start {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            })
            .ok()?;

        let line_starting_byte_index = self.lines[line].start;
        let line_str = self.get_line(line)?;

        // gets the column number by iterating through the utf-8 characters
        let column = line_str
            .char_indices()
            .take_while(|(i, _)| *i + line_starting_byte_index < byte_index)
            .count();

        Some(Location { line, column })
    }
}

impl AsRef<str> for Source {
    fn as_ref(&self) -> &str { &self.content }
}

impl From<String> for Source {
    fn from(content: String) -> Self { Self::new(content) }
}

impl From<&str> for Source {
    fn from(content: &str) -> Self { Self::new(content.to_owned()) }
}

/// Represents a range of bytes in a [`Source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    /// Gets the start byte index of the span.
    pub start: ByteIndex,

    /// Gets the end byte index of the span (exclusive).
    pub end: ByteIndex,
}

impl Span {
    /// Creates a span from the given start and end byte indices.
    #[must_use]
    pub fn new(start: ByteIndex, end: ByteIndex) -> Self {
        assert!(start <= end, "start index is greater than end index");

        Self { start, end }
    }

    /// Gets the byte range of the span.
    #[must_use]
    pub const fn range(&self) -> Range<ByteIndex> { self.start..self.end }
}

/// Is a struct pointing to a particular location in a [`Source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    /// The line number of the location (starts at 0).
    pub line: usize,

    /// The column number of the location (starts at 0).
    pub column: usize,
}

impl Location {
    /// Creates a new location with the given line and column numbers.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // humans count from one
        write!(f, "line {}, column {}", self.line + 1, self.column + 1)
    }
}

fn get_line_byte_positions(text: &str) -> Vec<Range<usize>> {
    let mut current_position = 0;
    let mut results = Vec::new();

    let mut skip = false;

    for (byte, char) in text.char_indices() {
        if skip {
            skip = false;
            continue;
        }

        // ordinary lf
        if char == '\n' {
            #[allow(clippy::range_plus_one)]
            results.push(current_position..byte + 1);

            current_position = byte + 1;
        }

        // crlf
        if char == '\r' {
            if text.as_bytes().get(byte + 1) == Some(&b'\n') {
                #[allow(clippy::range_plus_one)]
                results.push(current_position..byte + 2);

                current_position = byte + 2;

                skip = true;
            } else {
                #[allow(clippy::range_plus_one)]
                results.push(current_position..byte + 1);

                current_position = byte + 1;
            }
        }
    }

    results.push(current_position..text.len());

    results
}
