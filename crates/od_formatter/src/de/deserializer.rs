use od_edm::info::EdmTypeRef;
use od_edm::value::Value;

use crate::de::DeserializerProvider;
use crate::tree::ResourceItem;
use crate::{DeserializeError, ReadContext};

/// The payload shape a deserializer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Resource,
    ResourceSet,
    Collection,
    Property,
    EntityReferenceLink,
    Parameter,
    Value,
}

// -----------------------------------------------------------------------------
// EdmTypeDeserializer

/// Reads one [`ResourceItem`] as a value of a schema type.
///
/// Implementors are registered with a [`DeserializerProvider`], which is
/// passed back in so nested values can be dispatched again.
pub trait EdmTypeDeserializer: Send + Sync {
    fn payload_kind(&self) -> PayloadKind;

    fn read_inline(
        &self,
        item: ResourceItem,
        edm_type: &EdmTypeRef,
        provider: &DeserializerProvider,
        ctx: &ReadContext,
    ) -> Result<Value, DeserializeError>;
}
