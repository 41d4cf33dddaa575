//! Contains the [`Options`] a codec is configured with.

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[cfg(test)]
mod test;

/// The behavior of a codec.
///
/// Every field has a default, so a configuration file only lists what it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Whether an invalid enumeration, gender or category value fails the
    /// decode. When `false` the value is dropped with a warning.
    pub strict: bool,

    /// Whether the encoded documents are indented.
    pub pretty: bool,

    /// The name of the field holding the extension wrapper object of every
    /// record.
    pub wrapper_key: String,
}

impl Default for Options {
    fn default() -> Self {
        Self { strict: true, pretty: false, wrapper_key: "ext".to_owned() }
    }
}

impl Options {
    /// Parses the options from a TOML document.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the document is not valid TOML or has unknown
    /// keys or values of the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    /// Renders the options as a TOML document.
    ///
    /// # Errors
    ///
    /// [`Error::ConfigRender`] if the serializer rejects the options.
    pub fn to_toml_string(&self) -> Result<String, Error> {
        Ok(toml::to_string_pretty(self)?)
    }
}
