//! Contains the [`Cursor`], the pull interface used to walk a
//! [`TokenStream`].

use getset::CopyGetters;

use crate::{
    error::{Error, Expected},
    source::ByteIndex,
    token::{Kind, Tag, Token},
    token_stream::TokenStream,
};

#[cfg(test)]
mod test;

/// A snapshot of where a [`Cursor`] is, compared by value.
///
/// Two equal positions taken from the same cursor mean that nothing was
/// consumed in between. Positions taken from different token streams must
/// never be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// The tag of the token under the cursor, [`None`] at the end of the
    /// stream.
    pub tag: Option<Tag>,

    /// The byte index where the token under the cursor starts.
    pub location: ByteIndex,
}

/// Used for walking the tokens of a [`TokenStream`] one at a time.
///
/// The cursor always points at the next token that has not been consumed
/// yet. A read that fails leaves the cursor where it was.
#[derive(Debug, Clone, CopyGetters)]
#[allow(missing_copy_implementations)]
pub struct Cursor<'a> {
    stream: &'a TokenStream,

    /// The index of the token the cursor points at.
    #[get_copy = "pub"]
    index: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor pointing at the first token of the stream.
    #[must_use]
    pub const fn new(stream: &'a TokenStream) -> Self {
        Self { stream, index: 0 }
    }

    /// Gets the token stream this cursor walks.
    #[must_use]
    pub const fn stream(&self) -> &'a TokenStream { self.stream }

    /// Returns the token under the cursor without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&'a Token> { self.stream.get(self.index) }

    /// Returns the tag of the token under the cursor.
    #[must_use]
    pub fn peek_tag(&self) -> Option<Tag> {
        self.peek().map(|token| token.kind.tag())
    }

    /// Consumes the token under the cursor and returns it.
    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.stream.get(self.index)?;
        self.index += 1;

        Some(token)
    }

    /// Gets the progress witness of the cursor.
    #[must_use]
    pub fn position(&self) -> Position {
        self.peek().map_or(
            Position { tag: None, location: self.stream.end() },
            |token| Position {
                tag: Some(token.kind.tag()),
                location: token.span.start,
            },
        )
    }

    /// Gets the byte index of the token under the cursor, or the end of the
    /// source text if the stream is exhausted.
    #[must_use]
    pub fn location(&self) -> ByteIndex { self.position().location }

    /// Checks whether every token has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool { self.index >= self.stream.len() }

    /// Moves the cursor to the given token index.
    ///
    /// The index should be one previously observed on this cursor, moving
    /// into the middle of an unrelated value leaves the cursor in a state
    /// the callers don't expect.
    pub fn seek(&mut self, index: usize) {
        assert!(index <= self.stream.len(), "index out of the stream bounds");

        self.index = index;
    }

    fn expect(&mut self, expected: Expected, tag: Tag) -> Result<(), Error> {
        match self.peek() {
            Some(token) if token.kind.tag() == tag => {
                self.index += 1;
                Ok(())
            }
            found => Err(unexpected(expected, found)),
        }
    }

    /// Enters the object under the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::UnexpectedToken`] if the cursor is not at the start of an
    /// object.
    pub fn begin_object(&mut self) -> Result<(), Error> {
        self.expect(Expected::Object, Tag::BeginObject)
    }

    /// Leaves the object the cursor is in. The cursor must be at its closing
    /// token.
    ///
    /// # Errors
    ///
    /// [`Error::UnexpectedToken`] if the cursor is not at the end of an
    /// object.
    pub fn end_object(&mut self) -> Result<(), Error> {
        self.expect(Expected::ObjectEnd, Tag::EndObject)
    }

    /// Enters the array under the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::UnexpectedToken`] if the cursor is not at the start of an
    /// array.
    pub fn begin_array(&mut self) -> Result<(), Error> {
        self.expect(Expected::Array, Tag::BeginArray)
    }

    /// Leaves the array the cursor is in. The cursor must be at its closing
    /// token.
    ///
    /// # Errors
    ///
    /// [`Error::UnexpectedToken`] if the cursor is not at the end of an
    /// array.
    pub fn end_array(&mut self) -> Result<(), Error> {
        self.expect(Expected::ArrayEnd, Tag::EndArray)
    }

    /// Checks whether there is another element (or field) before the closing
    /// token of the current container.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.peek_tag()
            .is_some_and(|tag| !matches!(tag, Tag::EndObject | Tag::EndArray))
    }

    /// Returns the field name under the cursor without consuming it.
    #[must_use]
    pub fn peek_field_name(&self) -> Option<&'a str> {
        self.peek().and_then(|token| token.kind.as_name()).map(String::as_str)
    }

    /// Consumes the field name under the cursor, leaving the cursor at the
    /// field's value.
    ///
    /// # Errors
    ///
    /// [`Error::UnexpectedToken`] if the cursor is not at a field name.
    pub fn field_name(&mut self) -> Result<&'a str, Error> {
        let name = self
            .peek_field_name()
            .ok_or_else(|| unexpected(Expected::Name, self.peek()))?;
        self.index += 1;

        Ok(name)
    }

    /// Gets the index right after the value under the cursor without moving
    /// the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::UnexpectedToken`] if no value starts under the cursor.
    pub fn value_end(&self) -> Result<usize, Error> {
        self.stream
            .value_end(self.index)
            .ok_or_else(|| unexpected(Expected::Value, self.peek()))
    }

    /// Skips the value under the cursor, including the whole subtree if the
    /// value is an object or an array.
    ///
    /// # Errors
    ///
    /// [`Error::UnexpectedToken`] if no value starts under the cursor.
    pub fn skip_value(&mut self) -> Result<(), Error> {
        self.index = self.value_end()?;

        Ok(())
    }

    /// Checks whether the value under the cursor is `null`.
    #[must_use]
    pub fn is_null(&self) -> bool { self.peek_tag() == Some(Tag::Null) }

    /// Consumes the `null` under the cursor if there is one. Returns whether
    /// a `null` was consumed.
    pub fn null(&mut self) -> bool {
        if self.is_null() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Reads the string value under the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::UnexpectedToken`] if the value is not a string.
    pub fn string(&mut self) -> Result<&'a str, Error> {
        let string = self
            .peek()
            .and_then(|token| token.kind.as_string())
            .ok_or_else(|| unexpected(Expected::String, self.peek()))?;
        self.index += 1;

        Ok(string)
    }

    fn number(&self) -> Result<(&'a serde_json::Number, ByteIndex), Error> {
        let token = self.peek();
        let number = token
            .and_then(|token| token.kind.as_number())
            .ok_or_else(|| unexpected(Expected::Number, token))?;

        Ok((number, self.location()))
    }

    /// Reads the signed integer value under the cursor.
    ///
    /// A floating point literal without a fractional part (e.g. `3.0`) is
    /// accepted as well.
    ///
    /// # Errors
    ///
    /// - [`Error::UnexpectedToken`] if the value is not a number.
    /// - [`Error::NumberOutOfRange`] if the number is not an integer or
    ///   doesn't fit in an [`i64`].
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    pub fn integer(&mut self) -> Result<i64, Error> {
        let (number, at) = self.number()?;

        let integer = match (number.as_i64(), number.as_f64()) {
            (Some(integer), _) => integer,
            (None, Some(float))
                if float.fract() == 0.0
                    && float >= i64::MIN as f64
                    && float < i64::MAX as f64 =>
            {
                float as i64
            }
            _ => return Err(Error::NumberOutOfRange { at }),
        };
        self.index += 1;

        Ok(integer)
    }

    /// Reads the unsigned integer value under the cursor.
    ///
    /// # Errors
    ///
    /// - [`Error::UnexpectedToken`] if the value is not a number.
    /// - [`Error::NumberOutOfRange`] if the number is negative, not an
    ///   integer or doesn't fit in a [`u64`].
    pub fn unsigned(&mut self) -> Result<u64, Error> {
        let (number, at) = self.number()?;
        let unsigned = number.as_u64().ok_or(Error::NumberOutOfRange { at })?;
        self.index += 1;

        Ok(unsigned)
    }

    /// Reads the floating point value under the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::UnexpectedToken`] if the value is not a number.
    pub fn float(&mut self) -> Result<f64, Error> {
        let (number, at) = self.number()?;
        let float = number.as_f64().ok_or(Error::NumberOutOfRange { at })?;
        self.index += 1;

        Ok(float)
    }

    /// Reads the boolean value under the cursor.
    ///
    /// Both JSON booleans and the integers `0` and `1` are accepted, the
    /// latter being the usual boolean encoding in OpenRTB.
    ///
    /// # Errors
    ///
    /// - [`Error::UnexpectedToken`] if the value is neither a boolean nor a
    ///   number.
    /// - [`Error::InvalidBoolean`] if the value is a number other than `0`
    ///   or `1`.
    pub fn boolean(&mut self) -> Result<bool, Error> {
        match self.peek().map(|token| &token.kind) {
            Some(Kind::Boolean(boolean)) => {
                self.index += 1;
                Ok(*boolean)
            }

            Some(Kind::Number(number)) => {
                let at = self.location();
                let boolean = match number.as_u64() {
                    Some(0) => false,
                    Some(1) => true,
                    _ => return Err(Error::InvalidBoolean { at }),
                };
                self.index += 1;

                Ok(boolean)
            }

            _ => Err(unexpected(Expected::Boolean, self.peek())),
        }
    }

    /// Reads a list of strings.
    ///
    /// The value can either be an array of strings or a single string of
    /// comma separated items. Blank items of the comma separated form are
    /// dropped.
    ///
    /// # Errors
    ///
    /// [`Error::UnexpectedToken`] if the value is neither a string nor an
    /// array of strings.
    pub fn string_list(&mut self) -> Result<Vec<String>, Error> {
        Ok(self
            .located_string_list()?
            .into_iter()
            .map(|(string, _)| string)
            .collect())
    }

    /// Reads a list of strings like [`Cursor::string_list`], pairing every
    /// item with the byte index of the string it came from. The items of
    /// the comma separated form share the index of their string.
    ///
    /// # Errors
    ///
    /// [`Error::UnexpectedToken`] if the value is neither a string nor an
    /// array of strings.
    pub fn located_string_list(
        &mut self,
    ) -> Result<Vec<(String, ByteIndex)>, Error> {
        match self.peek_tag() {
            Some(Tag::String) => {
                let at = self.location();

                Ok(self
                    .string()?
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(|item| (item.to_owned(), at))
                    .collect())
            }

            Some(Tag::BeginArray) => {
                let start = self.index;

                self.string_array().inspect_err(|_| self.index = start)
            }

            _ => Err(unexpected(Expected::StringList, self.peek())),
        }
    }

    fn string_array(&mut self) -> Result<Vec<(String, ByteIndex)>, Error> {
        self.begin_array()?;

        let mut strings = Vec::new();
        while self.has_next() {
            let at = self.location();
            strings.push((self.string()?.to_owned(), at));
        }

        self.end_array()?;

        Ok(strings)
    }
}

fn unexpected(expected: Expected, found: Option<&Token>) -> Error {
    found.map_or(Error::UnexpectedEndOfStream { expected }, |token| {
        Error::UnexpectedToken {
            expected,
            found: token.kind.tag(),
            at: token.span.start,
        }
    })
}
