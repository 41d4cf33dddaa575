//! Is a module containing the [`Token`] type and the lexeme [`Tokenizer`].

use std::{
    iter::{Iterator, Peekable},
    str::CharIndices,
};

use enum_as_inner::EnumAsInner;

use crate::{
    error::Error,
    source::{ByteIndex, Span},
};

/// The kind of a structural token in a JSON document.
///
/// Commas and colons are validated by the
/// [`TokenStream`](crate::token_stream::TokenStream) but are not part of the
/// stream, every object member is a [`Kind::Name`] followed by its value.
#[derive(Debug, Clone, PartialEq, Eq, EnumAsInner)]
pub enum Kind {
    /// The `{` that opens an object.
    BeginObject,

    /// The `}` that closes an object.
    EndObject,

    /// The `[` that opens an array.
    BeginArray,

    /// The `]` that closes an array.
    EndArray,

    /// The name of an object member, already unescaped.
    Name(String),

    /// A string value, already unescaped.
    String(String),

    /// A number value.
    Number(serde_json::Number),

    /// A `true` or `false` value.
    Boolean(bool),

    /// A `null` value.
    Null,
}

impl Kind {
    /// Gets the [`Tag`] of this kind.
    #[must_use]
    pub const fn tag(&self) -> Tag {
        match self {
            Self::BeginObject => Tag::BeginObject,
            Self::EndObject => Tag::EndObject,
            Self::BeginArray => Tag::BeginArray,
            Self::EndArray => Tag::EndArray,
            Self::Name(_) => Tag::Name,
            Self::String(_) => Tag::String,
            Self::Number(_) => Tag::Number,
            Self::Boolean(_) => Tag::Boolean,
            Self::Null => Tag::Null,
        }
    }
}

/// The payload-less discriminant of a [`Kind`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    displaydoc::Display,
)]
pub enum Tag {
    /// the start of an object
    BeginObject,

    /// the end of an object
    EndObject,

    /// the start of an array
    BeginArray,

    /// the end of an array
    EndArray,

    /// a field name
    Name,

    /// a string
    String,

    /// a number
    Number,

    /// a boolean
    Boolean,

    /// a null
    Null,
}

impl Tag {
    /// Checks whether a token of this tag begins a value.
    #[must_use]
    pub const fn is_value_start(self) -> bool {
        !matches!(self, Self::EndObject | Self::EndArray | Self::Name)
    }
}

/// Represents a single token of the token stream with its location in the
/// source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Specifies the kind of the token.
    pub kind: Kind,

    /// The span of the token in the source text.
    pub span: Span,
}

/// A raw lexical unit before the structure of the document is known.
///
/// The tokenizer can't tell a field name from a string value; that is
/// decided by the [`TokenStream`](crate::token_stream::TokenStream).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lexeme {
    Punctuation(char),
    String(String),
    Number(serde_json::Number),
    Boolean(bool),
    Null,
}

/// Increments the iterator until the predicate returns false.
fn walk_iter(
    iter: &mut Peekable<impl Iterator<Item = (ByteIndex, char)>>,
    predicate: impl Fn(char) -> bool,
) {
    while let Some((_, character)) = iter.peek() {
        if !predicate(*character) {
            break;
        }

        iter.next();
    }
}

const fn is_whitespace(character: char) -> bool {
    matches!(character, ' ' | '\t' | '\n' | '\r')
}

const fn is_number_character(character: char) -> bool {
    matches!(character, '0'..='9' | '-' | '+' | '.' | 'e' | 'E')
}

/// A struct used for splitting the source text into [`Lexeme`]s. The struct
/// implements [`Iterator`], which yields the lexemes one by one with their
/// spans.
#[derive(Debug, Clone)]
pub(crate) struct Tokenizer<'a> {
    source: &'a str,
    iter: Peekable<CharIndices<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self { source, iter: source.char_indices().peekable() }
    }

    /// Creates a span from the given start location to the current location
    /// of the iterator.
    fn create_span(&mut self, start: ByteIndex) -> Span {
        self.iter.peek().copied().map_or_else(
            || Span::new(start, self.source.len()),
            |(index, _)| Span::new(start, index),
        )
    }

    fn handle_string_literal(
        &mut self,
        start: ByteIndex,
    ) -> Result<(String, Span), Error> {
        let mut last_backslash = false;

        loop {
            let Some((_, character)) = self.iter.next() else {
                return Err(Error::UnterminatedString { at: start });
            };

            if last_backslash {
                last_backslash = false;
                continue;
            }

            match character {
                '"' => break,
                '\\' => last_backslash = true,
                // control characters must be escaped
                '\u{0}'..='\u{1f}' => {
                    return Err(Error::InvalidString { at: start })
                }
                _ => {}
            }
        }

        let span = self.create_span(start);

        // the escape sequences are decoded by `serde_json`, the literal is
        // known to be closed at this point
        let string = serde_json::from_str::<String>(&self.source[span.range()])
            .map_err(|_| Error::InvalidString { at: start })?;

        Ok((string, span))
    }

    fn handle_numeric_literal(
        &mut self,
        start: ByteIndex,
    ) -> Result<(serde_json::Number, Span), Error> {
        walk_iter(&mut self.iter, is_number_character);

        let span = self.create_span(start);
        let literal = &self.source[span.range()];

        let number = serde_json::from_str::<serde_json::Number>(literal)
            .map_err(|_| Error::InvalidNumber {
                literal: literal.to_owned(),
                at: start,
            })?;

        Ok((number, span))
    }

    fn handle_keyword(
        &mut self,
        start: ByteIndex,
    ) -> Result<(Lexeme, Span), Error> {
        walk_iter(&mut self.iter, |x| x.is_ascii_alphanumeric());

        let span = self.create_span(start);

        let lexeme = match &self.source[span.range()] {
            "true" => Lexeme::Boolean(true),
            "false" => Lexeme::Boolean(false),
            "null" => Lexeme::Null,
            literal => {
                return Err(Error::InvalidLiteral {
                    literal: literal.to_owned(),
                    at: start,
                })
            }
        };

        Ok((lexeme, span))
    }

    /// Gets the byte index of the end of the source text.
    pub(crate) fn end(&self) -> ByteIndex { self.source.len() }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<(Lexeme, Span), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        walk_iter(&mut self.iter, is_whitespace);

        let (start, character) = self.iter.next()?;

        Some(match character {
            '{' | '}' | '[' | ']' | ':' | ',' => {
                Ok((Lexeme::Punctuation(character), self.create_span(start)))
            }

            '"' => self
                .handle_string_literal(start)
                .map(|(string, span)| (Lexeme::String(string), span)),

            '-' | '0'..='9' => self
                .handle_numeric_literal(start)
                .map(|(number, span)| (Lexeme::Number(number), span)),

            'a'..='z' | 'A'..='Z' => self.handle_keyword(start),

            found => Err(Error::UnexpectedCharacter { found, at: start }),
        })
    }
}
