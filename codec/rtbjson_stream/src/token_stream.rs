//! Contains the [`TokenStream`] struct, the validated flat list of tokens of
//! a single JSON document.

use std::ops::Index;

use derive_more::Deref;
use getset::CopyGetters;

use crate::{
    error::{Error, Expected},
    source::{ByteIndex, Source, Span},
    token::{Kind, Lexeme, Token, Tokenizer},
};

#[cfg(test)]
pub(crate) mod arbitrary;
#[cfg(test)]
mod test;

/// The container the tokenizer is currently inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Object,
    Array,
}

/// What the structural state machine accepts next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Any value, or `]` right after `[`.
    Value { first_in_array: bool },

    /// A field name, or `}` right after `{`.
    Name { first_in_object: bool },

    /// The `:` after a field name.
    Colon,

    /// A `,` or the closing delimiter of the current container.
    CommaOrClose,

    /// The top level value has been closed.
    Done,
}

/// Is a flat list of well structured tokens of a single JSON document.
///
/// Every object in the stream is a [`Kind::BeginObject`], zero or more
/// [`Kind::Name`]-value pairs and a [`Kind::EndObject`]. Every array is a
/// [`Kind::BeginArray`], zero or more values and a [`Kind::EndArray`]. The
/// structure is checked while tokenizing, so consumers can rely on balanced
/// delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Deref, CopyGetters)]
pub struct TokenStream {
    #[deref]
    tokens: Vec<Token>,

    /// The byte index right after the last character of the source text.
    #[get_copy = "pub"]
    end: ByteIndex,
}

impl TokenStream {
    /// Tokenizes the given source text.
    ///
    /// # Errors
    ///
    /// Returns the first lexical or structural [`Error`] found in the
    /// document. The document must contain exactly one top level value.
    pub fn tokenize(source: &Source) -> Result<Self, Error> {
        let mut tokenizer = Tokenizer::new(source.content());
        let mut tokens = Vec::new();
        let mut frames = Vec::new();
        let mut state = State::Value { first_in_array: false };

        while let Some(lexeme) = tokenizer.next() {
            let (lexeme, span) = lexeme?;

            state = Self::handle_lexeme(
                &mut tokens,
                &mut frames,
                state,
                lexeme,
                span,
            )?;
        }

        if state != State::Done {
            return Err(Error::UnexpectedEndOfInput {
                expected: match (state, frames.last()) {
                    (State::Name { .. }, _) => Expected::Name,
                    (State::CommaOrClose, Some(Frame::Object)) => {
                        Expected::ObjectEnd
                    }
                    (State::CommaOrClose, Some(Frame::Array)) => {
                        Expected::ArrayEnd
                    }
                    _ => Expected::Value,
                },
            });
        }

        Ok(Self { tokens, end: tokenizer.end() })
    }

    fn handle_lexeme(
        tokens: &mut Vec<Token>,
        frames: &mut Vec<Frame>,
        state: State,
        lexeme: Lexeme,
        span: Span,
    ) -> Result<State, Error> {
        let unexpected = |lexeme: &Lexeme| match lexeme {
            Lexeme::Punctuation(found) => {
                Error::UnexpectedCharacter { found: *found, at: span.start }
            }
            Lexeme::String(_) => Error::UnexpectedCharacter {
                found: '"',
                at: span.start,
            },
            Lexeme::Number(number) => Error::InvalidNumber {
                literal: number.to_string(),
                at: span.start,
            },
            Lexeme::Boolean(boolean) => Error::InvalidLiteral {
                literal: boolean.to_string(),
                at: span.start,
            },
            Lexeme::Null => Error::InvalidLiteral {
                literal: "null".to_owned(),
                at: span.start,
            },
        };

        let mut push = |kind: Kind| tokens.push(Token { kind, span });

        match (state, lexeme) {
            // empty array
            (State::Value { first_in_array: true }, Lexeme::Punctuation(']')) => {
                frames.pop();
                push(Kind::EndArray);

                Ok(Self::after_value(frames))
            }

            (State::Value { .. }, Lexeme::Punctuation('{')) => {
                frames.push(Frame::Object);
                push(Kind::BeginObject);

                Ok(State::Name { first_in_object: true })
            }

            (State::Value { .. }, Lexeme::Punctuation('[')) => {
                frames.push(Frame::Array);
                push(Kind::BeginArray);

                Ok(State::Value { first_in_array: true })
            }

            (State::Value { .. }, Lexeme::String(string)) => {
                push(Kind::String(string));
                Ok(Self::after_value(frames))
            }

            (State::Value { .. }, Lexeme::Number(number)) => {
                push(Kind::Number(number));
                Ok(Self::after_value(frames))
            }

            (State::Value { .. }, Lexeme::Boolean(boolean)) => {
                push(Kind::Boolean(boolean));
                Ok(Self::after_value(frames))
            }

            (State::Value { .. }, Lexeme::Null) => {
                push(Kind::Null);
                Ok(Self::after_value(frames))
            }

            (State::Name { .. }, Lexeme::String(name)) => {
                push(Kind::Name(name));
                Ok(State::Colon)
            }

            // empty object
            (
                State::Name { first_in_object: true },
                Lexeme::Punctuation('}'),
            ) => {
                frames.pop();
                push(Kind::EndObject);

                Ok(Self::after_value(frames))
            }

            (State::Colon, Lexeme::Punctuation(':')) => {
                Ok(State::Value { first_in_array: false })
            }

            (State::CommaOrClose, Lexeme::Punctuation(',')) => {
                match frames.last() {
                    Some(Frame::Object) => {
                        Ok(State::Name { first_in_object: false })
                    }
                    _ => Ok(State::Value { first_in_array: false }),
                }
            }

            (State::CommaOrClose, Lexeme::Punctuation('}'))
                if frames.last() == Some(&Frame::Object) =>
            {
                frames.pop();
                push(Kind::EndObject);

                Ok(Self::after_value(frames))
            }

            (State::CommaOrClose, Lexeme::Punctuation(']'))
                if frames.last() == Some(&Frame::Array) =>
            {
                frames.pop();
                push(Kind::EndArray);

                Ok(Self::after_value(frames))
            }

            (_, lexeme) => Err(unexpected(&lexeme)),
        }
    }

    fn after_value(frames: &[Frame]) -> State {
        if frames.is_empty() {
            State::Done
        } else {
            State::CommaOrClose
        }
    }

    /// Gets the index right after the value starting at `index`.
    ///
    /// For an object or an array this skips the whole subtree. Returns
    /// [`None`] if no value starts at `index`.
    #[must_use]
    pub fn value_end(&self, index: usize) -> Option<usize> {
        let first = self.tokens.get(index)?;

        if !first.kind.tag().is_value_start() {
            return None;
        }

        let mut depth = 0usize;

        for (offset, token) in self.tokens[index..].iter().enumerate() {
            match token.kind {
                Kind::BeginObject | Kind::BeginArray => depth += 1,
                Kind::EndObject | Kind::EndArray => depth -= 1,
                _ => {}
            }

            if depth == 0 {
                return Some(index + offset + 1);
            }
        }

        None
    }
}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output { &self.tokens[index] }
}
