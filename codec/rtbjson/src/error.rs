//! Contains the errors surfaced by the [`crate::Codec`].

use rtbjson_stream::Location;

/// The error type of the codec.
#[derive(Debug, thiserror::Error, displaydoc::Display)]
pub enum Error {
    /// failed to decode the document: {source}
    Decode {
        /// The underlying failure.
        source: rtbjson_extension::Error,

        /// Where the failure occurred in the document, if it points at one.
        location: Option<Location>,
    },

    /// invalid value `{value}` for field `{field}`
    InvalidValue {
        /// The field holding the value.
        field: String,

        /// The offending value as it appears in the document.
        value: String,

        /// Where the value is in the document.
        location: Option<Location>,
    },

    /// failed to encode the record: {0}
    Encode(rtbjson_extension::Error),

    /// invalid options: {0}
    Config(#[from] toml::de::Error),

    /// failed to render the options: {0}
    ConfigRender(#[from] toml::ser::Error),

    /// {0}
    Io(#[from] std::io::Error),
}

impl Error {
    /// Gets the location in the document the error points at.
    #[must_use]
    pub const fn location(&self) -> Option<Location> {
        match self {
            Self::Decode { location, .. }
            | Self::InvalidValue { location, .. } => *location,
            Self::Encode(_)
            | Self::Config(_)
            | Self::ConfigRender(_)
            | Self::Io(_) => None,
        }
    }
}
