//! Contains the errors raised by the extension readers, the writers and the
//! dispatch protocol.

use rtbjson_stream::ByteIndex;

/// How a reader broke the dispatch contract.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    displaydoc::Display,
)]
pub enum Violation {
    /// the reader declined the field but moved the cursor
    MovedWithoutConsuming,

    /// the reader claimed the field without moving the cursor
    ConsumedWithoutMoving,

    /// the reader moved the cursor past the value of the field
    OverranField,
}

/// The error type of the extension protocol.
#[derive(Debug, Clone, PartialEq, thiserror::Error, displaydoc::Display)]
pub enum Error {
    /// {0}
    Stream(#[from] rtbjson_stream::Error),

    /// reader `{reader}` broke the contract on field `{field}` at byte {at}: {violation}
    ContractViolation {
        /// The name of the offending reader.
        reader: String,

        /// The field the reader was offered.
        field: String,

        /// Where the field's value starts.
        at: ByteIndex,

        /// What the reader did wrong.
        violation: Violation,
    },

    /// invalid value `{value}` for field `{field}` at byte {at}
    InvalidValue {
        /// The field holding the value.
        field: String,

        /// The offending value as it appears in the document.
        value: String,

        /// Where the value starts.
        at: ByteIndex,
    },

    /// the payload of the extension `{key}` has an unexpected type
    PayloadMismatch {
        /// The name of the extension key.
        key: &'static str,
    },

    /// {0}
    Custom(String),
}

impl Error {
    /// Gets the byte index the error points at, if there is one.
    #[must_use]
    pub const fn at(&self) -> Option<ByteIndex> {
        match self {
            Self::Stream(error) => error.at(),
            Self::ContractViolation { at, .. }
            | Self::InvalidValue { at, .. } => Some(*at),
            Self::PayloadMismatch { .. } | Self::Custom(_) => None,
        }
    }
}
