use alloc::format;
use alloc::string::String;
use core::fmt;

use od_edm::info::EdmTypeRef;
use od_edm::value::Value;

use crate::de::{DeserializerProvider, EdmTypeDeserializer, PayloadKind};
use crate::tree::ResourceItem;
use crate::{DeserializeError, ReadContext};

// -----------------------------------------------------------------------------
// Uri

/// The target of an entity reference link (`$ref`) payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri(String);

impl Uri {
    #[inline]
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Uri {
    #[inline]
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

// -----------------------------------------------------------------------------
// ReferenceLinkDeserializer

/// Reads an entity reference link into its URL string.
///
/// ```
/// use od_edm::info::EdmTypeRef;
/// use od_edm::value::Value;
/// use od_formatter::ReadContext;
/// use od_formatter::de::{DeserializerProvider, EdmTypeDeserializer, ReferenceLinkDeserializer};
/// use od_formatter::tree::{ReferenceLink, ResourceItem};
///
/// let link = ResourceItem::ReferenceLink(ReferenceLink::new("http://svc/Products(1)"));
/// let value = ReferenceLinkDeserializer
///     .read_inline(link, &EdmTypeRef::untyped(), &DeserializerProvider::new(), &ReadContext::new())
///     .unwrap();
/// assert_eq!(value, Value::from("http://svc/Products(1)"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceLinkDeserializer;

impl EdmTypeDeserializer for ReferenceLinkDeserializer {
    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::EntityReferenceLink
    }

    fn read_inline(
        &self,
        item: ResourceItem,
        _edm_type: &EdmTypeRef,
        _provider: &DeserializerProvider,
        _ctx: &ReadContext,
    ) -> Result<Value, DeserializeError> {
        match item {
            ResourceItem::Null => Ok(Value::Null),
            ResourceItem::ReferenceLink(link) => Ok(Value::from(link.url)),
            other => Err(DeserializeError::argument(
                "item",
                format!(
                    "The argument must be of type 'ODataEntityReferenceLink', found a {}.",
                    other.kind_name()
                ),
            )),
        }
    }
}
