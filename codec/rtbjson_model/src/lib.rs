//! This crate provides the record model of the codec: the OpenRTB 2.x
//! request and response records, their enumerations and the typed extension
//! slots every record owns.

pub mod category;
pub mod enums;
pub mod extension;
pub mod request;
pub mod response;

pub use extension::{Extendable, ExtensionKey, Extensions, Payload, Shape};
