//! Contains all kinds of errors that can occur while tokenizing, walking, or
//! generating a JSON document.

use crate::{source::ByteIndex, token::Tag};

/// Describes what the cursor was looking for when it found something else.
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
pub enum Expected {
    /// the start of an object
    Object,

    /// the start of an array
    Array,

    /// the end of an object
    ObjectEnd,

    /// the end of an array
    ArrayEnd,

    /// a field name
    Name,

    /// a string
    String,

    /// a number
    Number,

    /// a boolean
    Boolean,

    /// a string or an array of strings
    StringList,

    /// a value
    Value,

    /// the end of the document
    EndOfDocument,
}

/// The error type returned by the tokenizer, the cursor and the generator.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, thiserror::Error, displaydoc::Display,
)]
pub enum Error {
    /// unexpected character `{found}` at byte {at}
    UnexpectedCharacter {
        /// The character that was found.
        found: char,

        /// Where the character starts.
        at: ByteIndex,
    },

    /// unterminated string literal starting at byte {at}
    UnterminatedString {
        /// Where the opening quote is.
        at: ByteIndex,
    },

    /// invalid string literal at byte {at}
    InvalidString {
        /// Where the opening quote is.
        at: ByteIndex,
    },

    /// invalid number literal `{literal}` at byte {at}
    InvalidNumber {
        /// The text of the literal.
        literal: String,

        /// Where the literal starts.
        at: ByteIndex,
    },

    /// invalid literal `{literal}` at byte {at}
    InvalidLiteral {
        /// The text of the literal.
        literal: String,

        /// Where the literal starts.
        at: ByteIndex,
    },

    /// unexpected end of input, expected {expected}
    UnexpectedEndOfInput {
        /// What the tokenizer was waiting for.
        expected: Expected,
    },

    /// expected {expected} but found {found} at byte {at}
    UnexpectedToken {
        /// What the caller was looking for.
        expected: Expected,

        /// The kind of token that was found instead.
        found: Tag,

        /// Where the found token starts.
        at: ByteIndex,
    },

    /// expected {expected} but reached the end of the token stream
    UnexpectedEndOfStream {
        /// What the caller was looking for.
        expected: Expected,
    },

    /// the number at byte {at} does not fit the requested type
    NumberOutOfRange {
        /// Where the number starts.
        at: ByteIndex,
    },

    /// the number at byte {at} is not a valid boolean, expected 0 or 1
    InvalidBoolean {
        /// Where the number starts.
        at: ByteIndex,
    },

    /// cannot write a non-finite floating point number
    NonFiniteFloat,

    /// invalid generator call: {0}
    InvalidGeneratorState(&'static str),
}

impl Error {
    /// Gets the byte index the error points at, if there is one.
    #[must_use]
    pub const fn at(&self) -> Option<ByteIndex> {
        match self {
            Self::UnexpectedCharacter { at, .. }
            | Self::UnterminatedString { at }
            | Self::InvalidString { at }
            | Self::InvalidNumber { at, .. }
            | Self::InvalidLiteral { at, .. }
            | Self::UnexpectedToken { at, .. }
            | Self::NumberOutOfRange { at }
            | Self::InvalidBoolean { at } => Some(*at),

            Self::UnexpectedEndOfInput { .. }
            | Self::UnexpectedEndOfStream { .. }
            | Self::NonFiniteFloat
            | Self::InvalidGeneratorState(_) => None,
        }
    }
}
