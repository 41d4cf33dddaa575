//! Contains the [`RegistryBuilder`] collecting the extension readers and
//! writers, and the frozen [`Registry`] snapshot the codec dispatches with.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
};

use rtbjson_model::{Extendable, ExtensionKey, Payload};

use crate::{
    reader::ExtensionReader,
    writer::{ElementLayout, ExtensionWriter, PayloadWriter, Typed},
};

#[cfg(test)]
mod test;

/// Collects the readers and writers of the extensions.
///
/// Registration only happens here. [`RegistryBuilder::build`] consumes the
/// builder into an immutable [`Registry`], so nothing can be registered once
/// the codec is in use.
#[derive(Default)]
pub struct RegistryBuilder {
    // `TypeId` of the container -> `Vec<ExtensionReader<C>>`
    readers: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    reader_counts: HashMap<TypeId, (&'static str, usize)>,
    writers: WriterMap,
}

/// path -> target -> writer
type WriterMap = HashMap<String, HashMap<Target, ExtensionWriter>>;

/// What a writer is registered for within its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Target {
    /// Every slot holding a payload of the type.
    Payload { payload_type: TypeId, repeated: bool },

    /// The single slot of the name.
    Slot(&'static str),
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Registers a reader for the container `C`. Readers of the same
    /// container are offered the fields in registration order.
    pub fn register_reader<C: Extendable>(
        &mut self,
        reader: ExtensionReader<C>,
    ) -> &mut Self {
        let readers = self
            .readers
            .entry(TypeId::of::<C>())
            .or_insert_with(|| Box::new(Vec::<ExtensionReader<C>>::new()));

        if let Some(readers) = readers.downcast_mut::<Vec<ExtensionReader<C>>>()
        {
            readers.push(reader);

            self.reader_counts
                .insert(TypeId::of::<C>(), (C::NAME, readers.len()));
        }

        self
    }

    /// Registers the writer of the scalar or singular payload `P` under the
    /// record name of the container `C`. Returns `false` without replacing
    /// anything if a writer is already registered for the same path and
    /// payload type.
    pub fn register_writer<C: Extendable, P: Payload>(
        &mut self,
        writer: impl PayloadWriter<P> + 'static,
    ) -> bool {
        self.register_writer_at::<P>(C::NAME, writer)
    }

    /// Registers the writer of the scalar or singular payload `P` under an
    /// explicit path.
    pub fn register_writer_at<P: Payload>(
        &mut self,
        path: &str,
        writer: impl PayloadWriter<P> + 'static,
    ) -> bool {
        self.insert_writer(
            path,
            Target::Payload {
                payload_type: TypeId::of::<P>(),
                repeated: false,
            },
            ExtensionWriter::Regular(Arc::new(Typed::<P, _>::new(writer))),
        )
    }

    /// Registers the writer of the single slot `key` under the record name
    /// of the container `C`.
    ///
    /// A slot writer is preferred over the writer registered for the payload
    /// type, which lets several scalar slots of the same type each write
    /// their own field. The payload is written straight into the wrapper
    /// object, whatever the shape of the key.
    pub fn register_slot_writer<C: Extendable, P: Payload>(
        &mut self,
        key: ExtensionKey<C, P>,
        writer: impl PayloadWriter<P> + 'static,
    ) -> bool {
        self.insert_writer(
            C::NAME,
            Target::Slot(key.name()),
            ExtensionWriter::Regular(Arc::new(Typed::<P, _>::new(writer))),
        )
    }

    /// Registers the element writer of the repeated payload `Vec<M>` under
    /// the record name of the container `C`. The array is written in the
    /// field `root_name` of the wrapper object.
    pub fn register_repeated_writer<C: Extendable, M: Payload>(
        &mut self,
        root_name: &'static str,
        layout: ElementLayout,
        writer: impl PayloadWriter<M> + 'static,
    ) -> bool
    where
        Vec<M>: Payload,
    {
        self.insert_writer(
            C::NAME,
            Target::Payload { payload_type: TypeId::of::<M>(), repeated: true },
            ExtensionWriter::Repeated {
                root_name,
                layout,
                writer: Arc::new(Typed::<M, _>::new(writer)),
            },
        )
    }

    fn insert_writer(
        &mut self,
        path: &str,
        key: Target,
        writer: ExtensionWriter,
    ) -> bool {
        let writers = self.writers.entry(path.to_owned()).or_default();

        if writers.contains_key(&key) {
            return false;
        }

        writers.insert(key, writer);

        true
    }

    /// Freezes the registrations into a shareable snapshot.
    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            readers: self.readers,
            reader_counts: self.reader_counts,
            writers: self.writers,
        }
    }
}

impl Debug for RegistryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("readers", &self.reader_counts.values().collect::<Vec<_>>())
            .field("writers", &self.writers)
            .finish()
    }
}

/// The frozen snapshot of the registered readers and writers.
///
/// The registry is immutable, a single instance is shared by every decode
/// and encode of a codec.
pub struct Registry {
    readers: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    reader_counts: HashMap<TypeId, (&'static str, usize)>,
    writers: WriterMap,
}

impl Registry {
    /// Creates a registry without any reader or writer.
    #[must_use]
    pub fn empty() -> Self { RegistryBuilder::new().build() }

    /// Gets the readers registered for the container `C` in registration
    /// order.
    #[must_use]
    pub fn readers<C: 'static>(&self) -> &[ExtensionReader<C>] {
        self.readers
            .get(&TypeId::of::<C>())
            .and_then(|x| x.downcast_ref::<Vec<ExtensionReader<C>>>())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Looks the writer of a payload type up.
    ///
    /// For repeated payloads `payload_type` is the element type.
    #[must_use]
    pub fn writer(
        &self,
        path: &str,
        payload_type: TypeId,
        repeated: bool,
    ) -> Option<&ExtensionWriter> {
        self.writers
            .get(path)?
            .get(&Target::Payload { payload_type, repeated })
    }

    /// Looks the writer of a single slot up.
    #[must_use]
    pub fn slot_writer(
        &self,
        path: &str,
        name: &'static str,
    ) -> Option<&ExtensionWriter> {
        self.writers.get(path)?.get(&Target::Slot(name))
    }

    /// Checks whether neither readers nor writers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readers.is_empty() && self.writers.is_empty()
    }
}

impl Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("readers", &self.reader_counts.values().collect::<Vec<_>>())
            .field("writers", &self.writers)
            .finish()
    }
}
