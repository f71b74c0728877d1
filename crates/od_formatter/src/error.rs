use alloc::borrow::Cow;
use alloc::string::String;

use od_edm::value::ValueError;
use thiserror::Error;

// -----------------------------------------------------------------------------
// DeserializeError

/// An error raised while reading a payload.
///
/// Every error aborts the whole read, no partial value is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeserializeError {
    /// The caller passed something the deserializer cannot work with.
    #[error("invalid argument `{argument}`: {message}")]
    ArgumentInvalid {
        argument: &'static str,
        message: Cow<'static, str>,
    },

    /// Unknown types or properties, or values that do not fit the schema.
    #[error("{0}")]
    SchemaError(String),

    /// No deserializer or no schema mapping is available.
    #[error("{0}")]
    UnsupportedType(String),

    /// A runtime accessor rejected the value.
    #[error("cannot assign the property '{property}'")]
    InvalidValue {
        property: String,
        #[source]
        source: ValueError,
    },

    /// The wire reader rejected the bytes.
    #[error("malformed payload: {0}")]
    Payload(String),

    #[cfg(feature = "std")]
    #[error("failed to read the payload stream")]
    Io(#[from] std::io::Error),
}

impl DeserializeError {
    #[inline]
    pub(crate) fn argument(argument: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self::ArgumentInvalid {
            argument,
            message: message.into(),
        }
    }

    #[inline]
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Self::SchemaError(message.into())
    }

    #[inline]
    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedType(message.into())
    }

    pub(crate) fn missing_model() -> Self {
        Self::argument(
            "model",
            "The EDM model is missing on the read context. \
             The model is required on the read context to deserialize the payload.",
        )
    }

    pub(crate) fn missing_path() -> Self {
        Self::argument(
            "path",
            "The operation cannot be completed because no ODataPath is available for the request.",
        )
    }
}
