//! Contains the [`CodecFactory`] the extensions are registered with and the
//! immutable [`Codec`] it builds.

use std::{
    io::{Read, Write},
    sync::Arc,
};

use getset::Getters;
use rtbjson_extension::{
    ElementLayout, ExtensionReader, MessageReader, PayloadWriter, Registry,
    RegistryBuilder, ScalarReader,
};
use rtbjson_model::{
    request::BidRequest, response::BidResponse, Extendable, ExtensionKey,
    Payload,
};
use rtbjson_stream::{Cursor, Generator, Source, TokenStream};

use crate::{
    decoder::{Decoder, ReadFields},
    encoder::{Encoder, WriteFields},
    error::Error,
    options::Options,
};


/// Configures a [`Codec`].
///
/// The factory is consumed by [`CodecFactory::build`], nothing can be
/// registered into a codec that is already in use.
///
/// # Example
///
/// ```
/// use rtbjson::{CodecFactory, Options};
///
/// let codec = CodecFactory::new(Options::default()).build();
/// let request = codec.decode_request(r#"{"id": "1", "imp": []}"#).unwrap();
///
/// assert_eq!(request.id.as_deref(), Some("1"));
/// assert_eq!(codec.encode_request(&request).unwrap(), r#"{"id":"1"}"#);
/// ```
#[derive(Debug, Default)]
pub struct CodecFactory {
    options: Options,
    registry: RegistryBuilder,
}

impl CodecFactory {
    /// Creates a factory without any extension.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self { options, registry: RegistryBuilder::new() }
    }

    /// Registers a reader for the extensions of the record `C`.
    #[must_use]
    pub fn register_reader<C: Extendable>(
        mut self,
        reader: ExtensionReader<C>,
    ) -> Self {
        self.registry.register_reader(reader);
        self
    }

    /// Registers a reader mutating the record `C` directly.
    #[must_use]
    pub fn register_scalar<C: Extendable>(
        self,
        reader: impl ScalarReader<C> + 'static,
    ) -> Self {
        self.register_reader(ExtensionReader::scalar(reader))
    }

    /// Registers a reader of the singular extension `key` of the record `C`.
    #[must_use]
    pub fn register_singular<C, M, R>(
        self,
        key: ExtensionKey<C, M>,
        reader: R,
    ) -> Self
    where
        C: Extendable,
        M: Payload + Default,
        R: MessageReader<M> + 'static,
    {
        self.register_reader(ExtensionReader::singular(key, reader))
    }

    /// Registers a reader of the repeated extension `key` of the record `C`,
    /// the array is expected in the field named after the key.
    #[must_use]
    pub fn register_repeated<C, M, R>(
        self,
        key: ExtensionKey<C, Vec<M>>,
        reader: R,
    ) -> Self
    where
        C: Extendable,
        M: Payload + Default,
        Vec<M>: Payload,
        R: MessageReader<M> + 'static,
    {
        self.register_reader(ExtensionReader::repeated(key, reader))
    }

    /// Registers the writer of the payload `P` of the record `C`.
    ///
    /// The first writer registered for a record and a payload type wins, a
    /// later one is ignored with a warning.
    #[must_use]
    pub fn register_writer<C: Extendable, P: Payload>(
        mut self,
        writer: impl PayloadWriter<P> + 'static,
    ) -> Self {
        if !self.registry.register_writer::<C, P>(writer) {
            log::warn!(
                "a writer of `{}` is already registered for `{}`",
                std::any::type_name::<P>(),
                C::NAME
            );
        }

        self
    }

    /// Registers the writer of the single extension slot `key` of the
    /// record `C`.
    ///
    /// A slot writer is preferred over the writer of the payload type, so
    /// two scalar extensions of the same type are written each by its own
    /// writer.
    #[must_use]
    pub fn register_slot_writer<C: Extendable, P: Payload>(
        mut self,
        key: ExtensionKey<C, P>,
        writer: impl PayloadWriter<P> + 'static,
    ) -> Self {
        if !self.registry.register_slot_writer(key, writer) {
            log::warn!(
                "a writer of the slot `{}` is already registered for `{}`",
                key.name(),
                C::NAME
            );
        }

        self
    }

    /// Registers the element writer of the repeated payload `Vec<M>` of the
    /// record `C`, the array is written under `root_name`.
    #[must_use]
    pub fn register_repeated_writer<C: Extendable, M: Payload>(
        mut self,
        root_name: &'static str,
        layout: ElementLayout,
        writer: impl PayloadWriter<M> + 'static,
    ) -> Self
    where
        Vec<M>: Payload,
    {
        if !self
            .registry
            .register_repeated_writer::<C, M>(root_name, layout, writer)
        {
            log::warn!(
                "a writer of repeated `{}` is already registered for `{}`",
                std::any::type_name::<M>(),
                C::NAME
            );
        }

        self
    }

    /// Freezes the registrations into a codec.
    #[must_use]
    pub fn build(self) -> Codec {
        Codec {
            registry: Arc::new(self.registry.build()),
            options: Arc::new(self.options),
        }
    }
}

/// Decodes and encodes OpenRTB documents with the registered extensions.
///
/// The codec is immutable; clones share the same registry and may be used
/// from any number of threads at once.
#[derive(Debug, Clone, Getters)]
pub struct Codec {
    /// The frozen extension readers and writers.
    #[get = "pub"]
    registry: Arc<Registry>,

    /// The options the codec was built with.
    #[get = "pub"]
    options: Arc<Options>,
}

impl Codec {
    fn decode<R: ReadFields>(&self, text: &str) -> Result<R, Error> {
        let source = Source::from(text);

        let result = TokenStream::tokenize(&source)
            .map_err(rtbjson_extension::Error::from)
            .and_then(|stream| {
                let mut cursor = Cursor::new(&stream);

                Decoder::new(&self.registry, &self.options).record(&mut cursor)
            });

        result.map_err(|error| {
            let location = error.at().and_then(|at| source.get_location(at));

            match error {
                rtbjson_extension::Error::InvalidValue {
                    field, value, ..
                } => Error::InvalidValue { field, value, location },

                error => Error::Decode { source: error, location },
            }
        })
    }

    fn encode<R: WriteFields>(&self, record: &R) -> Result<String, Error> {
        let mut generator = if self.options.pretty {
            Generator::pretty()
        } else {
            Generator::new()
        };

        Encoder::new(&self.registry, &self.options)
            .record(record, &mut generator)
            .map_err(Error::Encode)?;

        generator
            .finish()
            .map_err(|error| Error::Encode(error.into()))
    }

    /// Decodes a bid request document.
    ///
    /// # Errors
    ///
    /// - [`Error::Decode`] if the document is malformed or a reader fails.
    /// - [`Error::InvalidValue`] for an invalid enumeration, gender or
    ///   category value in strict mode.
    pub fn decode_request(&self, text: &str) -> Result<BidRequest, Error> {
        self.decode(text)
    }

    /// Decodes a bid response document.
    ///
    /// # Errors
    ///
    /// See [`Codec::decode_request`].
    pub fn decode_response(&self, text: &str) -> Result<BidResponse, Error> {
        self.decode(text)
    }

    /// Reads the whole of `reader` and decodes it as a bid request.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if reading fails, otherwise see
    /// [`Codec::decode_request`].
    pub fn decode_request_reader(
        &self,
        mut reader: impl Read,
    ) -> Result<BidRequest, Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        self.decode_request(&text)
    }

    /// Encodes a bid request. Unset fields are left out.
    ///
    /// # Errors
    ///
    /// [`Error::Encode`] if a writer fails or a float is not finite.
    pub fn encode_request(
        &self,
        request: &BidRequest,
    ) -> Result<String, Error> {
        self.encode(request)
    }

    /// Encodes a bid response. Unset fields are left out.
    ///
    /// # Errors
    ///
    /// See [`Codec::encode_request`].
    pub fn encode_response(
        &self,
        response: &BidResponse,
    ) -> Result<String, Error> {
        self.encode(response)
    }

    /// Encodes a bid request into `writer`.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if writing fails, otherwise see
    /// [`Codec::encode_request`].
    pub fn encode_request_writer(
        &self,
        request: &BidRequest,
        mut writer: impl Write,
    ) -> Result<(), Error> {
        let text = self.encode_request(request)?;
        writer.write_all(text.as_bytes())?;

        Ok(())
    }
}
