//! This crate implements the extension dispatch of the codec.
//!
//! Every record of the model carries an `ext` wrapper object whose fields are
//! unknown to the base schema. The readers registered for a record type are
//! offered those fields until none of them makes progress, the remaining
//! field is then skipped. On the way out, the writers registered for a
//! record name and a payload type emit the populated extension slots back
//! into the wrapper object.

pub mod error;
pub mod protocol;
pub mod reader;
pub mod registry;
pub mod writer;

pub use error::{Error, Violation};
pub use protocol::read_extensions;
pub use reader::{
    message_fn, scalar_fn, ExtensionReader, MessageReader, Progress,
    ScalarField, ScalarReader,
};
pub use registry::{Registry, RegistryBuilder};
pub use writer::{
    write_extensions, write_extensions_at, writer_fn, ElementLayout,
    ExtensionWriter, PayloadWriter,
};
