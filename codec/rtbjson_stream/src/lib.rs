//! This crate provides the JSON plumbing of the codec: the [`source::Source`]
//! text with line/column mapping, the tokenizer producing a flat
//! [`token_stream::TokenStream`], the pull [`cursor::Cursor`] used by the
//! readers and the push [`generator::Generator`] used by the writers.

pub mod cursor;
pub mod error;
pub mod generator;
pub mod source;
pub mod token;
pub mod token_stream;

pub use cursor::{Cursor, Position};
pub use error::{Error, Expected};
pub use generator::Generator;
pub use source::{ByteIndex, Location, Source, Span};
pub use token::{Kind, Tag, Token};
pub use token_stream::TokenStream;
