//! Contains the [`Generator`], the push interface used to write a JSON
//! document.

use std::fmt::Write;

use crate::error::Error;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Object,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    scope: Scope,
    count: usize,
}

/// Writes a JSON document one token at a time.
///
/// The generator keeps track of the containers it is in so the separators
/// and the indentation (in pretty mode) are inserted automatically. Calls
/// that would produce a malformed document are rejected with
/// [`Error::InvalidGeneratorState`].
#[derive(Debug, Clone, Default)]
pub struct Generator {
    output: String,
    frames: Vec<Frame>,
    pending_name: bool,
    pretty: bool,
    written_top_level: bool,
}

impl Generator {
    /// Creates a generator writing the compact form of the document.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Creates a generator writing the indented form of the document.
    #[must_use]
    pub fn pretty() -> Self { Self { pretty: true, ..Self::default() } }

    /// Gets the number of containers that are currently open.
    #[must_use]
    pub fn depth(&self) -> usize { self.frames.len() }

    fn newline(&mut self) {
        if self.pretty {
            self.output.push('\n');
            for _ in 0..self.frames.len() {
                self.output.push_str("  ");
            }
        }
    }

    /// Writes whatever must come before a value: a separator and a line
    /// break inside an array, nothing after a field name.
    fn before_value(&mut self) -> Result<(), Error> {
        if self.pending_name {
            self.pending_name = false;
            return Ok(());
        }

        match self.frames.last_mut() {
            Some(Frame { scope: Scope::Array, count }) => {
                if *count > 0 {
                    self.output.push(',');
                }
                *count += 1;
                self.newline();

                Ok(())
            }

            Some(Frame { scope: Scope::Object, .. }) => {
                Err(Error::InvalidGeneratorState(
                    "a value inside an object needs a name",
                ))
            }

            None if self.written_top_level => Err(
                Error::InvalidGeneratorState("the document has a single value"),
            ),

            None => {
                self.written_top_level = true;
                Ok(())
            }
        }
    }

    fn open(&mut self, scope: Scope, delimiter: char) -> Result<(), Error> {
        self.before_value()?;
        self.output.push(delimiter);
        self.frames.push(Frame { scope, count: 0 });

        Ok(())
    }

    fn close(&mut self, scope: Scope, delimiter: char) -> Result<(), Error> {
        if self.pending_name {
            return Err(Error::InvalidGeneratorState(
                "a field name is missing its value",
            ));
        }

        match self.frames.last() {
            Some(frame) if frame.scope == scope => {}
            _ => {
                return Err(Error::InvalidGeneratorState(
                    "closing a container that is not open",
                ))
            }
        }

        let Some(frame) = self.frames.pop() else {
            unreachable!("the frame was checked above")
        };

        if frame.count > 0 {
            self.newline();
        }
        self.output.push(delimiter);

        Ok(())
    }

    /// Opens an object.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGeneratorState`] if a value is not allowed here.
    pub fn begin_object(&mut self) -> Result<(), Error> {
        self.open(Scope::Object, '{')
    }

    /// Closes the innermost object.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGeneratorState`] if the innermost container is not an
    /// object or the last field name has no value.
    pub fn end_object(&mut self) -> Result<(), Error> {
        self.close(Scope::Object, '}')
    }

    /// Opens an array.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGeneratorState`] if a value is not allowed here.
    pub fn begin_array(&mut self) -> Result<(), Error> {
        self.open(Scope::Array, '[')
    }

    /// Closes the innermost array.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGeneratorState`] if the innermost container is not an
    /// array.
    pub fn end_array(&mut self) -> Result<(), Error> {
        self.close(Scope::Array, ']')
    }

    /// Writes the name of the next field of the innermost object.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGeneratorState`] if the innermost container is not an
    /// object or the previous name has no value yet.
    pub fn field_name(&mut self, name: &str) -> Result<(), Error> {
        if self.pending_name {
            return Err(Error::InvalidGeneratorState(
                "a field name is missing its value",
            ));
        }

        let Some(Frame { scope: Scope::Object, count }) = self.frames.last_mut()
        else {
            return Err(Error::InvalidGeneratorState(
                "a field name outside of an object",
            ));
        };

        if *count > 0 {
            self.output.push(',');
        }
        *count += 1;

        self.newline();
        push_escaped(&mut self.output, name);
        self.output.push(':');
        if self.pretty {
            self.output.push(' ');
        }

        self.pending_name = true;

        Ok(())
    }

    /// Writes a string value.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGeneratorState`] if a value is not allowed here.
    pub fn string(&mut self, value: &str) -> Result<(), Error> {
        self.before_value()?;
        push_escaped(&mut self.output, value);

        Ok(())
    }

    /// Writes a signed integer value.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGeneratorState`] if a value is not allowed here.
    pub fn integer(&mut self, value: i64) -> Result<(), Error> {
        self.before_value()?;
        let _ = write!(self.output, "{value}");

        Ok(())
    }

    /// Writes an unsigned integer value.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGeneratorState`] if a value is not allowed here.
    pub fn unsigned(&mut self, value: u64) -> Result<(), Error> {
        self.before_value()?;
        let _ = write!(self.output, "{value}");

        Ok(())
    }

    /// Writes a floating point value.
    ///
    /// # Errors
    ///
    /// - [`Error::NonFiniteFloat`] if the value is `NaN` or infinite.
    /// - [`Error::InvalidGeneratorState`] if a value is not allowed here.
    pub fn float(&mut self, value: f64) -> Result<(), Error> {
        let number =
            serde_json::Number::from_f64(value).ok_or(Error::NonFiniteFloat)?;

        self.before_value()?;
        let _ = write!(self.output, "{number}");

        Ok(())
    }

    /// Writes a `true` or `false` value.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGeneratorState`] if a value is not allowed here.
    pub fn boolean(&mut self, value: bool) -> Result<(), Error> {
        self.before_value()?;
        self.output.push_str(if value { "true" } else { "false" });

        Ok(())
    }

    /// Writes a `null` value.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGeneratorState`] if a value is not allowed here.
    pub fn null(&mut self) -> Result<(), Error> {
        self.before_value()?;
        self.output.push_str("null");

        Ok(())
    }

    /// Finishes the document and returns its text.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGeneratorState`] if a container is still open or
    /// nothing has been written.
    pub fn finish(self) -> Result<String, Error> {
        if !self.frames.is_empty() || self.pending_name {
            return Err(Error::InvalidGeneratorState(
                "the document has unclosed containers",
            ));
        }

        if !self.written_top_level {
            return Err(Error::InvalidGeneratorState("the document is empty"));
        }

        Ok(self.output)
    }
}

fn push_escaped(output: &mut String, value: &str) {
    // `Value`'s display is the compact JSON encoding, including the quotes
    let _ = write!(output, "{}", serde_json::Value::from(value));
}
