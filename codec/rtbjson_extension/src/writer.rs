//! Contains the writer capabilities and the write protocol emitting the
//! extension wrapper object of a container record.

use std::{fmt::Debug, marker::PhantomData, sync::Arc};

use rtbjson_model::{Extendable, Extensions, Payload, Shape};
use rtbjson_stream::Generator;

use crate::{error::Error, registry::Registry};


/// Writes an extension payload of type `P`.
///
/// The writer doesn't open or close any object of its own: a regular writer
/// emits its fields straight into the wrapper object, an element writer of a
/// repeated extension emits either the fields of the element's object or a
/// single value, depending on the [`ElementLayout`] it was registered with.
pub trait PayloadWriter<P>: Send + Sync {
    /// Writes the payload.
    ///
    /// # Errors
    ///
    /// Any error aborts the whole encode.
    fn write(&self, payload: &P, generator: &mut Generator)
        -> Result<(), Error>;
}

/// A [`PayloadWriter`] made of a closure.
pub struct WriterFn<P, F> {
    write: F,
    _marker: PhantomData<fn(&P)>,
}

/// Creates a [`PayloadWriter`] from a closure.
pub fn writer_fn<P, F>(write: F) -> WriterFn<P, F>
where
    F: Fn(&P, &mut Generator) -> Result<(), Error> + Send + Sync,
{
    WriterFn { write, _marker: PhantomData }
}

impl<P, F> PayloadWriter<P> for WriterFn<P, F>
where
    F: Fn(&P, &mut Generator) -> Result<(), Error> + Send + Sync,
{
    fn write(
        &self,
        payload: &P,
        generator: &mut Generator,
    ) -> Result<(), Error> {
        (self.write)(payload, generator)
    }
}

impl<P, F> Debug for WriterFn<P, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterFn").finish_non_exhaustive()
    }
}

/// How the elements of a repeated extension are laid out in their array.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    displaydoc::Display,
)]
pub enum ElementLayout {
    /// an array of objects
    #[default]
    Object,

    /// an array of scalar values
    Scalar,
}

/// The type-erased form of a [`PayloadWriter`] of a regular extension.
pub trait RegularWriter: Send + Sync {
    /// Writes the payload into the open wrapper object.
    ///
    /// # Errors
    ///
    /// [`Error::PayloadMismatch`] if the payload is not of the writer's type,
    /// or any error of the writer.
    fn write(
        &self,
        key: &'static str,
        payload: &dyn Payload,
        generator: &mut Generator,
    ) -> Result<(), Error>;
}

/// The type-erased form of a [`PayloadWriter`] of the elements of a repeated
/// extension.
pub trait ElementWriter: Send + Sync {
    /// Writes every element of the `Vec` payload into the open array.
    ///
    /// # Errors
    ///
    /// [`Error::PayloadMismatch`] if the payload is not a `Vec` of the
    /// writer's type, or any error of the writer.
    fn write_elements(
        &self,
        key: &'static str,
        payload: &dyn Payload,
        layout: ElementLayout,
        generator: &mut Generator,
    ) -> Result<(), Error>;
}

pub(crate) struct Typed<P, W> {
    writer: W,
    _marker: PhantomData<fn(&P)>,
}

impl<P, W> Typed<P, W> {
    pub(crate) const fn new(writer: W) -> Self {
        Self { writer, _marker: PhantomData }
    }
}

impl<P: Payload, W: PayloadWriter<P>> RegularWriter for Typed<P, W> {
    fn write(
        &self,
        key: &'static str,
        payload: &dyn Payload,
        generator: &mut Generator,
    ) -> Result<(), Error> {
        let payload = payload
            .downcast_ref::<P>()
            .ok_or(Error::PayloadMismatch { key })?;

        self.writer.write(payload, generator)
    }
}

impl<M: Payload, W: PayloadWriter<M>> ElementWriter for Typed<M, W> {
    fn write_elements(
        &self,
        key: &'static str,
        payload: &dyn Payload,
        layout: ElementLayout,
        generator: &mut Generator,
    ) -> Result<(), Error> {
        let elements = payload
            .downcast_ref::<Vec<M>>()
            .ok_or(Error::PayloadMismatch { key })?;

        for element in elements {
            match layout {
                ElementLayout::Object => {
                    generator.begin_object()?;
                    self.writer.write(element, generator)?;
                    generator.end_object()?;
                }

                ElementLayout::Scalar => self.writer.write(element, generator)?,
            }
        }

        Ok(())
    }
}

/// An extension writer as registered for a path and a payload type.
pub enum ExtensionWriter {
    /// Writes a scalar or a singular payload straight into the wrapper
    /// object.
    Regular(Arc<dyn RegularWriter>),

    /// Writes the elements of a repeated payload as an array under
    /// `root_name` in the wrapper object.
    Repeated {
        /// The field holding the array.
        root_name: &'static str,

        /// The layout of the array elements.
        layout: ElementLayout,

        /// The element writer.
        writer: Arc<dyn ElementWriter>,
    },
}

impl Clone for ExtensionWriter {
    fn clone(&self) -> Self {
        match self {
            Self::Regular(writer) => Self::Regular(Arc::clone(writer)),
            Self::Repeated { root_name, layout, writer } => Self::Repeated {
                root_name: *root_name,
                layout: *layout,
                writer: Arc::clone(writer),
            },
        }
    }
}

impl Debug for ExtensionWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Regular(_) => f.write_str("Regular(..)"),
            Self::Repeated { root_name, layout, .. } => f
                .debug_struct("Repeated")
                .field("root_name", root_name)
                .field("layout", layout)
                .finish_non_exhaustive(),
        }
    }
}

/// Writes the extension wrapper object of the container, looking the
/// writers up under the container's record name.
///
/// # Errors
///
/// See [`write_extensions_at`].
pub fn write_extensions<C: Extendable>(
    registry: &Registry,
    container: &C,
    wrapper_key: &str,
    generator: &mut Generator,
) -> Result<(), Error> {
    write_extensions_at(
        registry,
        container.extensions(),
        C::NAME,
        wrapper_key,
        generator,
    )
}

/// Writes the extension wrapper object for the given slots, looking the
/// writers up under `path`.
///
/// The generator must be inside the container's object. The wrapper field
/// is opened on the first slot with a matching writer; when no slot has
/// one, nothing is written at all. Slots without a writer are left out.
/// The writer registered for a slot's name is preferred over the one
/// registered for its payload type.
///
/// # Errors
///
/// Errors of the writers and of the generator abort the encode.
pub fn write_extensions_at<C>(
    registry: &Registry,
    extensions: &Extensions<C>,
    path: &str,
    wrapper_key: &str,
    generator: &mut Generator,
) -> Result<(), Error> {
    let mut opened = false;

    for (key, slot) in extensions.iter() {
        let repeated = slot.shape() == Shape::Repeated;

        let writer = registry.slot_writer(path, key).or_else(|| {
            registry.writer(path, slot.payload_type(), repeated)
        });

        let Some(writer) = writer else {
            log::trace!("no writer for the extension `{key}` of `{path}`");
            continue;
        };

        if !opened {
            generator.field_name(wrapper_key)?;
            generator.begin_object()?;
            opened = true;
        }

        match writer {
            ExtensionWriter::Regular(writer) => {
                writer.write(key, slot.value(), generator)?;
            }

            ExtensionWriter::Repeated { root_name, layout, writer } => {
                generator.field_name(root_name)?;
                generator.begin_array()?;
                writer.write_elements(key, slot.value(), *layout, generator)?;
                generator.end_array()?;
            }
        }
    }

    if opened {
        generator.end_object()?;
    }

    Ok(())
}
