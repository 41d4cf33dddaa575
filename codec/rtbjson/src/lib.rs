//! An OpenRTB 2.x JSON codec with pluggable extension readers and writers.
//!
//! The base schema of the bid request and the bid response is mapped
//! field by field; the `ext` wrapper object of every record is handed to the
//! readers registered for that record type, and the extension slots of a
//! record are written back through the registered writers.
//!
//! A [`Codec`] is configured once through a [`CodecFactory`] and is then
//! immutable, so a single instance can be shared by every caller.

mod decoder;
mod encoder;

pub mod error;
pub mod factory;
pub mod options;

pub use error::Error;
pub use factory::{Codec, CodecFactory};
pub use options::Options;
pub use rtbjson_extension as extension;
pub use rtbjson_model as model;
pub use rtbjson_stream as stream;
