//! Contains the reader capabilities plugged into the read protocol and the
//! [`ExtensionReader`] variant the registry stores them as.
//!
//! A reader is offered one field at a time with the cursor positioned at the
//! field's value. It either recognizes the field, consumes (part of) its
//! value and returns [`Progress::Consumed`]; or returns
//! [`Progress::NotConsumed`] leaving the cursor exactly where it was.

use std::{fmt::Debug, marker::PhantomData, sync::Arc};

use enum_as_inner::EnumAsInner;
use rtbjson_model::{Extendable, ExtensionKey, Payload};
use rtbjson_stream::Cursor;

use crate::error::Error;

/// The outcome of offering a field to a reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumAsInner)]
pub enum Progress {
    /// The reader recognized the field and moved the cursor.
    Consumed,

    /// The reader doesn't know the field, the cursor is untouched.
    NotConsumed,
}

impl From<bool> for Progress {
    fn from(consumed: bool) -> Self {
        if consumed {
            Self::Consumed
        } else {
            Self::NotConsumed
        }
    }
}

/// Reads extension fields straight into the container record `C`.
///
/// Implementations must not hold state that changes between calls, the same
/// reader is shared by every decode the codec performs.
pub trait ScalarReader<C>: Send + Sync {
    /// The field names this reader wants to be offered. An empty list means
    /// every field.
    fn root_names(&self) -> &[&'static str] { &[] }

    /// The name of the reader used in diagnostics.
    fn name(&self) -> &str { std::any::type_name::<Self>() }

    /// Reads the value of `field` into the container.
    ///
    /// # Errors
    ///
    /// Any error aborts the whole decode.
    fn read(
        &self,
        container: &mut C,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<Progress, Error>;
}

/// Reads the fields of the nested extension record `M`.
///
/// The message the reader is given may already hold the fields a previous
/// call (or a sibling reader of the same extension key) has read.
pub trait MessageReader<M>: Send + Sync {
    /// The field names this reader wants to be offered. An empty list means
    /// every field.
    fn root_names(&self) -> &[&'static str] { &[] }

    /// The name of the reader used in diagnostics.
    fn name(&self) -> &str { std::any::type_name::<Self>() }

    /// Reads the value of `field` into the message.
    ///
    /// # Errors
    ///
    /// Any error aborts the whole decode.
    fn read(
        &self,
        message: &mut M,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<Progress, Error>;
}

/// A [`ScalarReader`] made of a closure.
pub struct ScalarFn<C, F> {
    name: &'static str,
    root_names: &'static [&'static str],
    read: F,
    _marker: PhantomData<fn(&mut C)>,
}

/// Creates a [`ScalarReader`] from a closure offered the fields listed in
/// `root_names`.
pub fn scalar_fn<C, F>(
    name: &'static str,
    root_names: &'static [&'static str],
    read: F,
) -> ScalarFn<C, F>
where
    F: Fn(&mut C, &str, &mut Cursor<'_>) -> Result<Progress, Error>
        + Send
        + Sync,
{
    ScalarFn { name, root_names, read, _marker: PhantomData }
}

impl<C, F> ScalarReader<C> for ScalarFn<C, F>
where
    F: Fn(&mut C, &str, &mut Cursor<'_>) -> Result<Progress, Error>
        + Send
        + Sync,
{
    fn root_names(&self) -> &[&'static str] { self.root_names }

    fn name(&self) -> &str { self.name }

    fn read(
        &self,
        container: &mut C,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<Progress, Error> {
        (self.read)(container, field, cursor)
    }
}

impl<C, F> Debug for ScalarFn<C, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarFn")
            .field("name", &self.name)
            .field("root_names", &self.root_names)
            .finish_non_exhaustive()
    }
}

/// A [`MessageReader`] made of a closure.
pub struct MessageFn<M, F> {
    name: &'static str,
    root_names: &'static [&'static str],
    read: F,
    _marker: PhantomData<fn(&mut M)>,
}

/// Creates a [`MessageReader`] from a closure offered the fields listed in
/// `root_names`.
pub fn message_fn<M, F>(
    name: &'static str,
    root_names: &'static [&'static str],
    read: F,
) -> MessageFn<M, F>
where
    F: Fn(&mut M, &str, &mut Cursor<'_>) -> Result<Progress, Error>
        + Send
        + Sync,
{
    MessageFn { name, root_names, read, _marker: PhantomData }
}

impl<M, F> MessageReader<M> for MessageFn<M, F>
where
    F: Fn(&mut M, &str, &mut Cursor<'_>) -> Result<Progress, Error>
        + Send
        + Sync,
{
    fn root_names(&self) -> &[&'static str] { self.root_names }

    fn name(&self) -> &str { self.name }

    fn read(
        &self,
        message: &mut M,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<Progress, Error> {
        (self.read)(message, field, cursor)
    }
}

impl<M, F> Debug for MessageFn<M, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageFn")
            .field("name", &self.name)
            .field("root_names", &self.root_names)
            .finish_non_exhaustive()
    }
}

/// A [`ScalarReader`] that parses a single named field and stores it under
/// an extension key, replacing the previous value.
pub struct ScalarField<C, P, F> {
    key: ExtensionKey<C, P>,
    root_names: [&'static str; 1],
    parse: F,
}

impl<C, P, F> ScalarField<C, P, F>
where
    F: Fn(&mut Cursor<'_>) -> Result<P, Error> + Send + Sync,
{
    /// Creates a reader storing the value of `field` parsed with `parse`
    /// under `key`.
    pub const fn new(
        key: ExtensionKey<C, P>,
        field: &'static str,
        parse: F,
    ) -> Self {
        Self { key, root_names: [field], parse }
    }
}

impl<C, P, F> ScalarReader<C> for ScalarField<C, P, F>
where
    C: Extendable,
    P: Payload,
    F: Fn(&mut Cursor<'_>) -> Result<P, Error> + Send + Sync,
{
    fn root_names(&self) -> &[&'static str] { &self.root_names }

    fn name(&self) -> &str { self.key.name() }

    fn read(
        &self,
        container: &mut C,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<Progress, Error> {
        if field != self.root_names[0] {
            return Ok(Progress::NotConsumed);
        }

        let value = (self.parse)(cursor)?;
        container.extensions_mut().set(&self.key, value);

        Ok(Progress::Consumed)
    }
}

impl<C, P, F> Debug for ScalarField<C, P, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarField")
            .field("key", &self.key)
            .field("field", &self.root_names[0])
            .finish_non_exhaustive()
    }
}

/// The type-erased binding of a [`MessageReader`] to a singular extension
/// key of the container `C`.
pub trait SingularReader<C>: Send + Sync {
    /// The name of the extension key, the accumulator of the read protocol is
    /// shared by every reader of the same key.
    fn key_name(&self) -> &'static str;

    /// See [`MessageReader::root_names`].
    fn root_names(&self) -> &[&'static str];

    /// See [`MessageReader::name`].
    fn name(&self) -> &str;

    /// Creates the message the reader accumulates into: a copy of the
    /// container's current value or an empty message.
    fn seed(&self, container: &C) -> Box<dyn Payload>;

    /// Reads one field into the accumulated message.
    ///
    /// # Errors
    ///
    /// [`Error::PayloadMismatch`] if the message is not of the key's type,
    /// or any error of the inner reader.
    fn read(
        &self,
        message: &mut dyn Payload,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<Progress, Error>;

    /// Stores the accumulated message into the container.
    ///
    /// # Errors
    ///
    /// [`Error::PayloadMismatch`] if the message is not of the key's type.
    fn install(
        &self,
        message: Box<dyn Payload>,
        container: &mut C,
    ) -> Result<(), Error>;
}

/// The type-erased binding of a [`MessageReader`] to a repeated extension key
/// of the container `C`.
pub trait RepeatedReader<C>: Send + Sync {
    /// The field holding the array of messages, as a single element list.
    fn root_names(&self) -> &[&'static str];

    /// See [`MessageReader::name`].
    fn name(&self) -> &str;

    /// Reads the array under the cursor, appending every element that had at
    /// least one field recognized to the container.
    ///
    /// # Errors
    ///
    /// A value that is not an array of objects, or any error of the inner
    /// reader.
    fn read(
        &self,
        container: &mut C,
        cursor: &mut Cursor<'_>,
    ) -> Result<Progress, Error>;
}

pub(crate) struct Singular<C, M, R> {
    pub(crate) key: ExtensionKey<C, M>,
    pub(crate) reader: R,
}

impl<C, M, R> SingularReader<C> for Singular<C, M, R>
where
    C: Extendable,
    M: Payload + Default,
    R: MessageReader<M>,
{
    fn key_name(&self) -> &'static str { self.key.name() }

    fn root_names(&self) -> &[&'static str] { self.reader.root_names() }

    fn name(&self) -> &str { self.reader.name() }

    fn seed(&self, container: &C) -> Box<dyn Payload> {
        match container.extensions().get(&self.key) {
            Some(message) => message.clone_payload(),
            None => Box::new(M::default()),
        }
    }

    fn read(
        &self,
        message: &mut dyn Payload,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<Progress, Error> {
        let message = message
            .downcast_mut::<M>()
            .ok_or(Error::PayloadMismatch { key: self.key.name() })?;

        self.reader.read(message, field, cursor)
    }

    fn install(
        &self,
        message: Box<dyn Payload>,
        container: &mut C,
    ) -> Result<(), Error> {
        let message = message
            .downcast::<M>()
            .map_err(|_| Error::PayloadMismatch { key: self.key.name() })?;

        container.extensions_mut().set(&self.key, *message);

        Ok(())
    }
}

pub(crate) struct Repeated<C, M, R> {
    pub(crate) key: ExtensionKey<C, Vec<M>>,
    pub(crate) root_name: &'static str,
    pub(crate) reader: R,
}

/// An [`ExtensionReader`] as registered for the container `C`.
///
/// The three variants are the payload shapes of the extension keys: scalar
/// readers mutate the container directly, singular readers accumulate into a
/// nested message installed once the wrapper object is closed and repeated
/// readers build one fresh message per array element.
#[derive(EnumAsInner)]
pub enum ExtensionReader<C> {
    /// Reads straight into the container.
    Scalar(Arc<dyn ScalarReader<C>>),

    /// Reads into a singular nested message.
    Singular(Arc<dyn SingularReader<C>>),

    /// Reads an array of nested messages.
    Repeated(Arc<dyn RepeatedReader<C>>),
}

impl<C: Extendable> ExtensionReader<C> {
    /// Creates a scalar reader.
    pub fn scalar(reader: impl ScalarReader<C> + 'static) -> Self {
        Self::Scalar(Arc::new(reader))
    }

    /// Creates a reader of the singular nested message stored under `key`.
    pub fn singular<M, R>(key: ExtensionKey<C, M>, reader: R) -> Self
    where
        M: Payload + Default,
        R: MessageReader<M> + 'static,
    {
        Self::Singular(Arc::new(Singular { key, reader }))
    }

    /// Creates a reader of the array of messages stored under `key`. The
    /// array is expected in the field named after the key.
    pub fn repeated<M, R>(key: ExtensionKey<C, Vec<M>>, reader: R) -> Self
    where
        M: Payload + Default,
        Vec<M>: Payload,
        R: MessageReader<M> + 'static,
    {
        Self::repeated_at(key, key.name(), reader)
    }

    /// Creates a reader of the array of messages stored under `key`, the
    /// array is expected in the field `root_name`.
    pub fn repeated_at<M, R>(
        key: ExtensionKey<C, Vec<M>>,
        root_name: &'static str,
        reader: R,
    ) -> Self
    where
        M: Payload + Default,
        Vec<M>: Payload,
        R: MessageReader<M> + 'static,
    {
        Self::Repeated(Arc::new(Repeated { key, root_name, reader }))
    }
}

impl<C> ExtensionReader<C> {
    /// The field names the reader wants to be offered, empty for every
    /// field.
    #[must_use]
    pub fn root_names(&self) -> &[&'static str] {
        match self {
            Self::Scalar(reader) => reader.root_names(),
            Self::Singular(reader) => reader.root_names(),
            Self::Repeated(reader) => reader.root_names(),
        }
    }

    /// The name of the reader used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(reader) => reader.name(),
            Self::Singular(reader) => reader.name(),
            Self::Repeated(reader) => reader.name(),
        }
    }

    /// Checks whether the reader wants to be offered `field`.
    #[must_use]
    pub fn accepts(&self, field: &str) -> bool {
        let root_names = self.root_names();

        root_names.is_empty() || root_names.contains(&field)
    }
}

impl<C> Clone for ExtensionReader<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Scalar(reader) => Self::Scalar(Arc::clone(reader)),
            Self::Singular(reader) => Self::Singular(Arc::clone(reader)),
            Self::Repeated(reader) => Self::Repeated(Arc::clone(reader)),
        }
    }
}

impl<C> Debug for ExtensionReader<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shape = match self {
            Self::Scalar(_) => "Scalar",
            Self::Singular(_) => "Singular",
            Self::Repeated(_) => "Repeated",
        };

        f.debug_struct("ExtensionReader")
            .field("shape", &shape)
            .field("name", &self.name())
            .field("root_names", &self.root_names())
            .finish()
    }
}
