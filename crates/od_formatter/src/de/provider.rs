use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;

use od_edm::info::{EdmType, EdmTypeRef};
use od_utils::TypeIdMap;
use od_utils::hash::HashMap;

use crate::de::{ActionParameters, ActionPayloadDeserializer, CollectionDeserializer};
use crate::de::{EdmTypeDeserializer, EnumDeserializer, PrimitiveDeserializer};
use crate::de::{ReferenceLinkDeserializer, ResourceDeserializer, ResourceSetDeserializer};
use crate::de::{UntypedActionParameters, UntypedDeserializer, Uri};
use crate::{DeserializeError, ReadContext};

// -----------------------------------------------------------------------------
// DeserializerKind

/// The dispatch tag of the provider table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeserializerKind {
    Resource,
    ResourceSet,
    Collection,
    Enum,
    Primitive,
    Untyped,
    ReferenceLink,
    ActionPayload,
}

impl DeserializerKind {
    /// The tag for a schema type. `Path` types have none.
    ///
    /// ```
    /// use od_edm::info::{EdmTypeRef, PathKind, PrimitiveKind};
    /// use od_formatter::de::DeserializerKind;
    ///
    /// let product = EdmTypeRef::entity("NS.Product");
    /// assert_eq!(DeserializerKind::of(&product), Some(DeserializerKind::Resource));
    /// assert_eq!(
    ///     DeserializerKind::of(&EdmTypeRef::collection(product)),
    ///     Some(DeserializerKind::ResourceSet)
    /// );
    /// assert_eq!(
    ///     DeserializerKind::of(&EdmTypeRef::collection(EdmTypeRef::primitive(PrimitiveKind::Int32))),
    ///     Some(DeserializerKind::Collection)
    /// );
    /// assert_eq!(DeserializerKind::of(&EdmTypeRef::path(PathKind::PropertyPath)), None);
    /// ```
    pub fn of(edm_type: &EdmTypeRef) -> Option<Self> {
        match edm_type.definition() {
            EdmType::Entity(_) | EdmType::Complex(_) => Some(Self::Resource),
            EdmType::Enum(_) => Some(Self::Enum),
            EdmType::Primitive(_) => Some(Self::Primitive),
            EdmType::Collection(element) if element.is_structured() => Some(Self::ResourceSet),
            EdmType::Collection(_) => Some(Self::Collection),
            EdmType::Untyped => Some(Self::Untyped),
            EdmType::Path(_) => None,
        }
    }
}

// -----------------------------------------------------------------------------
// DeserializerProvider

/// Picks the deserializer for a schema type or a runtime type.
///
/// The table is filled once at startup and only read afterwards, so a
/// provider can be shared freely between reads.
///
/// # Examples
///
/// ```
/// use od_edm::info::{EdmTypeRef, PathKind, PrimitiveKind};
/// use od_formatter::de::{DeserializerKind, DeserializerProvider, PayloadKind};
///
/// let provider = DeserializerProvider::new();
///
/// let primitive = provider.resolve(&EdmTypeRef::primitive(PrimitiveKind::Int32)).unwrap();
/// assert_eq!(primitive.payload_kind(), PayloadKind::Property);
/// assert!(provider.resolve(&EdmTypeRef::path(PathKind::NavigationPropertyPath)).is_none());
///
/// assert!(DeserializerProvider::empty().get(DeserializerKind::Resource).is_none());
/// ```
pub struct DeserializerProvider {
    table: HashMap<DeserializerKind, Arc<dyn EdmTypeDeserializer>>,
    runtime_kinds: TypeIdMap<DeserializerKind>,
}

impl Default for DeserializerProvider {
    /// See [`DeserializerProvider::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl DeserializerProvider {
    /// A provider with nothing registered.
    pub fn empty() -> Self {
        Self {
            table: HashMap::default(),
            runtime_kinds: TypeIdMap::new(),
        }
    }

    /// A provider with the built-in deserializers.
    ///
    /// [`Uri`], [`ActionParameters`] and [`UntypedActionParameters`] are
    /// registered as runtime types.
    pub fn new() -> Self {
        let mut provider = Self::empty();
        provider.register(DeserializerKind::Resource, ResourceDeserializer);
        provider.register(DeserializerKind::ResourceSet, ResourceSetDeserializer);
        provider.register(DeserializerKind::Collection, CollectionDeserializer);
        provider.register(DeserializerKind::Enum, EnumDeserializer);
        provider.register(DeserializerKind::Primitive, PrimitiveDeserializer);
        provider.register(DeserializerKind::Untyped, UntypedDeserializer);
        provider.register(DeserializerKind::ReferenceLink, ReferenceLinkDeserializer);
        provider.register(DeserializerKind::ActionPayload, ActionPayloadDeserializer);

        provider.register_runtime_type::<Uri>(DeserializerKind::ReferenceLink);
        provider.register_runtime_type::<ActionParameters>(DeserializerKind::ActionPayload);
        provider.register_runtime_type::<UntypedActionParameters>(DeserializerKind::ActionPayload);
        provider
    }

    /// Registers or replaces the deserializer for `kind`.
    pub fn register(
        &mut self,
        kind: DeserializerKind,
        deserializer: impl EdmTypeDeserializer + 'static,
    ) -> Option<Arc<dyn EdmTypeDeserializer>> {
        self.table.insert(kind, Arc::new(deserializer))
    }

    /// Routes the runtime type `T` to `kind` before the model is consulted.
    pub fn register_runtime_type<T: 'static>(&mut self, kind: DeserializerKind) {
        self.runtime_kinds.insert_type::<T>(kind);
    }

    #[inline]
    pub fn kind_of(&self, edm_type: &EdmTypeRef) -> Option<DeserializerKind> {
        DeserializerKind::of(edm_type)
    }

    pub fn get(&self, kind: DeserializerKind) -> Option<&dyn EdmTypeDeserializer> {
        match self.table.get(&kind) {
            Some(deserializer) => Some(&**deserializer),
            None => None,
        }
    }

    /// The deserializer for a schema type.
    pub fn resolve(&self, edm_type: &EdmTypeRef) -> Option<&dyn EdmTypeDeserializer> {
        self.get(self.kind_of(edm_type)?)
    }

    /// The deserializer for a runtime type.
    ///
    /// Registered runtime types win. Other types are looked up in the
    /// model's type-mapping cache, a miss gives `Ok(None)`.
    pub fn resolve_runtime(
        &self,
        type_id: TypeId,
        ctx: &ReadContext,
    ) -> Result<Option<&dyn EdmTypeDeserializer>, DeserializeError> {
        if let Some(kind) = self.runtime_kinds.get(&type_id) {
            return Ok(self.get(*kind));
        }
        let model = ctx.require_model()?;
        Ok(model
            .get_schema_type(type_id)
            .and_then(|edm_type| self.resolve(edm_type)))
    }
}

impl fmt::Debug for DeserializerProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeserializerProvider")
            .field("kinds", &self.table.keys())
            .field("runtime_types", &self.runtime_kinds.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::de::PayloadKind;
    use crate::de::tests::fixtures::{self, Product};

    struct Unmapped;

    fn payload_kind(found: Option<&dyn EdmTypeDeserializer>) -> Option<PayloadKind> {
        found.map(|deserializer| deserializer.payload_kind())
    }

    #[test]
    fn registered_runtime_types_skip_the_model() {
        let provider = DeserializerProvider::new();
        let ctx = ReadContext::new();

        let found = provider.resolve_runtime(TypeId::of::<Uri>(), &ctx).unwrap();
        assert_eq!(payload_kind(found), Some(PayloadKind::EntityReferenceLink));
        let found = provider.resolve_runtime(TypeId::of::<ActionParameters>(), &ctx).unwrap();
        assert_eq!(payload_kind(found), Some(PayloadKind::Parameter));
    }

    #[test]
    fn mapped_runtime_types_use_the_model() {
        let provider = DeserializerProvider::new();
        let ctx = fixtures::context();

        let found = provider.resolve_runtime(TypeId::of::<Product>(), &ctx).unwrap();
        assert_eq!(payload_kind(found), Some(PayloadKind::Resource));
        assert!(provider.resolve_runtime(TypeId::of::<Unmapped>(), &ctx).unwrap().is_none());
    }

    #[test]
    fn runtime_lookup_requires_a_model() {
        let provider = DeserializerProvider::new();
        let found = provider.resolve_runtime(TypeId::of::<Product>(), &ReadContext::new());
        assert!(matches!(found, Err(DeserializeError::ArgumentInvalid { .. })));
    }

    #[test]
    fn replaced_kinds() {
        let mut provider = DeserializerProvider::new();
        let previous = provider.register(DeserializerKind::Untyped, ResourceDeserializer);
        assert_eq!(previous.map(|d| d.payload_kind()), Some(PayloadKind::Value));

        let found = provider.resolve(&EdmTypeRef::untyped());
        assert_eq!(payload_kind(found), Some(PayloadKind::Resource));
    }
}
