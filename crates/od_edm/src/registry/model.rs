use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use od_utils::hash::HashMap;

use crate::info::{EdmAction, EdmProperty, EdmTypeRef, EnumType, PrimitiveKind};
use crate::info::{StructuredType, UNTYPED_TYPE_NAME};
use crate::registry::{NavigationSource, RuntimeType, TypeMappingCache};

// -----------------------------------------------------------------------------
// EdmModel

/// The entity data model consulted during deserialization.
///
/// Structured and enum types are stored by full name, so type references
/// between them are plain names and may form cycles. Registration methods
/// return `false` and leave the model unchanged when the name is taken.
///
/// A model is built once and then shared read-only, usually behind an `Arc`.
///
/// # Examples
///
/// ```
/// use od_edm::info::{EdmTypeRef, PrimitiveKind, StructuredType};
/// use od_edm::registry::EdmModel;
///
/// let mut model = EdmModel::new();
/// model.add_structured_type(
///     StructuredType::entity("NS.Person")
///         .with_key("ID", EdmTypeRef::primitive(PrimitiveKind::Int32))
///         .with_abstract(true),
/// );
/// model.add_structured_type(
///     StructuredType::entity("NS.Employee")
///         .with_base("NS.Person")
///         .with_property("Title", EdmTypeRef::primitive(PrimitiveKind::String))
///         .with_open(true),
/// );
///
/// let names: Vec<_> = model
///     .declared_properties("NS.Employee")
///     .map(|p| p.name())
///     .collect();
/// assert_eq!(names, ["ID", "Title"]);
///
/// assert!(model.find_property("NS.Employee", "ID").unwrap().is_key());
/// assert!(model.is_abstract("NS.Person"));
/// assert!(model.is_open("NS.Employee"));
/// assert!(!model.is_open("NS.Person"));
/// ```
pub struct EdmModel {
    structured_types: HashMap<Arc<str>, StructuredType>,
    enum_types: HashMap<Arc<str>, EnumType>,
    runtime_types: HashMap<Arc<str>, RuntimeType>,
    type_mapping: TypeMappingCache,
    navigation_sources: HashMap<Arc<str>, NavigationSource>,
    actions: HashMap<Arc<str>, EdmAction>,
}

impl Default for EdmModel {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl EdmModel {
    /// An empty model whose type-mapping cache knows the Rust primitives.
    pub fn new() -> Self {
        Self {
            structured_types: HashMap::default(),
            enum_types: HashMap::default(),
            runtime_types: HashMap::default(),
            type_mapping: TypeMappingCache::new(),
            navigation_sources: HashMap::default(),
            actions: HashMap::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Registration

    pub fn add_structured_type(&mut self, ty: StructuredType) -> bool {
        if self.contains_type_name(ty.full_name()) {
            return false;
        }
        self.structured_types.insert(Arc::from(ty.full_name()), ty);
        true
    }

    pub fn add_enum_type(&mut self, ty: EnumType) -> bool {
        if self.contains_type_name(ty.full_name()) {
            return false;
        }
        self.enum_types.insert(Arc::from(ty.full_name()), ty);
        true
    }

    fn contains_type_name(&self, name: &str) -> bool {
        self.structured_types.contains_key(name) || self.enum_types.contains_key(name)
    }

    /// Binds a runtime type to the structured type `schema_name`.
    ///
    /// The type-mapping cache learns `T`, `Delta<T>` and `Vec<T>`. Returns
    /// `false` if the schema type is unknown or already mapped.
    pub fn map_runtime_type(&mut self, schema_name: &str, runtime: RuntimeType) -> bool {
        let Some(ty) = self.structured_types.get(schema_name) else {
            return false;
        };
        if self.runtime_types.contains_key(schema_name) {
            return false;
        }

        let type_ref = ty.type_ref();
        self.type_mapping
            .insert(runtime.list_type_id(), EdmTypeRef::collection(type_ref.clone()));
        self.type_mapping
            .insert(runtime.delta_type_id(), type_ref.clone());
        self.type_mapping.insert(runtime.type_id(), type_ref);
        self.runtime_types.insert(Arc::from(schema_name), runtime);
        true
    }

    /// Maps an extra runtime type, e.g. a Rust enum, to a schema type.
    #[inline]
    pub fn map_type_id(&mut self, type_id: TypeId, type_ref: EdmTypeRef) {
        self.type_mapping.insert(type_id, type_ref);
    }

    pub fn add_entity_set(&mut self, name: &str, entity_type: &str) -> bool {
        self.add_navigation_source(NavigationSource::entity_set(name, entity_type))
    }

    pub fn add_singleton(&mut self, name: &str, entity_type: &str) -> bool {
        self.add_navigation_source(NavigationSource::singleton(name, entity_type))
    }

    fn add_navigation_source(&mut self, source: NavigationSource) -> bool {
        if self.navigation_sources.contains_key(source.name()) {
            return false;
        }
        self.navigation_sources
            .insert(Arc::from(source.name()), source);
        true
    }

    pub fn add_action(&mut self, action: EdmAction) -> bool {
        if self.actions.contains_key(action.full_name()) {
            return false;
        }
        self.actions.insert(Arc::from(action.full_name()), action);
        true
    }

    // -------------------------------------------------------------------------
    // Types

    /// A structured or enum type declared in this model.
    pub fn find_declared_type(&self, name: &str) -> Option<EdmTypeRef> {
        if let Some(ty) = self.structured_types.get(name) {
            return Some(ty.type_ref());
        }
        self.enum_types.get(name).map(EnumType::type_ref)
    }

    /// Resolves any type name.
    ///
    /// Besides declared types this understands `Edm.*` primitives,
    /// `Edm.Untyped` and `Collection(..)`.
    ///
    /// ```
    /// use od_edm::info::EdmTypeKind;
    /// use od_edm::registry::EdmModel;
    ///
    /// let model = EdmModel::new();
    /// let ty = model.find_type("Collection(Edm.Untyped)").unwrap();
    /// assert_eq!(ty.kind(), EdmTypeKind::Collection);
    /// assert!(ty.is_untyped_value());
    /// assert!(model.find_type("Edm.Int16").unwrap().is_primitive());
    /// assert!(model.find_type("NS.Missing").is_none());
    /// ```
    pub fn find_type(&self, name: &str) -> Option<EdmTypeRef> {
        let name = name.trim();
        if let Some(element) = name
            .strip_prefix("Collection(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return self.find_type(element).map(EdmTypeRef::collection);
        }
        if name == UNTYPED_TYPE_NAME {
            return Some(EdmTypeRef::untyped());
        }
        if name.starts_with("Edm.") {
            return PrimitiveKind::from_name(name).map(EdmTypeRef::primitive);
        }
        self.find_declared_type(name)
    }

    #[inline]
    pub fn find_structured(&self, name: &str) -> Option<&StructuredType> {
        self.structured_types.get(name)
    }

    #[inline]
    pub fn find_enum(&self, name: &str) -> Option<&EnumType> {
        self.enum_types.get(name)
    }

    /// `name` followed by its base types. Stops on unknown or cyclic bases.
    fn lineage<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a StructuredType> + 'a {
        core::iter::successors(self.structured_types.get(name), |ty| {
            ty.base_type_name()
                .and_then(|base| self.structured_types.get(base))
        })
        .take(self.structured_types.len())
    }

    /// All properties of a structured type, base type properties first.
    pub fn declared_properties(&self, name: &str) -> impl Iterator<Item = &EdmProperty> {
        let mut lineage: Vec<_> = self.lineage(name).collect();
        lineage.reverse();
        lineage.into_iter().flat_map(StructuredType::properties)
    }

    /// Finds a property on a structured type or any of its bases.
    pub fn find_property(&self, type_name: &str, property: &str) -> Option<&EdmProperty> {
        self.lineage(type_name).find_map(|ty| ty.property(property))
    }

    /// A type is open if it or any base type is declared open.
    pub fn is_open(&self, name: &str) -> bool {
        self.lineage(name).any(StructuredType::is_open)
    }

    #[inline]
    pub fn is_abstract(&self, name: &str) -> bool {
        self.structured_types
            .get(name)
            .is_some_and(StructuredType::is_abstract)
    }

    /// Returns `true` if `derived` is `base` or inherits from it.
    pub fn is_derived_from(&self, derived: &str, base: &str) -> bool {
        self.lineage(derived).any(|ty| ty.full_name() == base)
    }

    // -------------------------------------------------------------------------
    // Runtime types

    #[inline]
    pub fn runtime_type_mapping(&self, schema_name: &str) -> Option<&RuntimeType> {
        self.runtime_types.get(schema_name)
    }

    #[inline]
    pub fn type_mapping(&self) -> &TypeMappingCache {
        &self.type_mapping
    }

    #[inline]
    pub fn get_schema_type(&self, type_id: TypeId) -> Option<&EdmTypeRef> {
        self.type_mapping.get_schema_type(type_id)
    }

    // -------------------------------------------------------------------------
    // Container

    #[inline]
    pub fn find_navigation_source(&self, name: &str) -> Option<&NavigationSource> {
        self.navigation_sources.get(name)
    }

    #[inline]
    pub fn find_action(&self, name: &str) -> Option<&EdmAction> {
        self.actions.get(name)
    }
}

impl fmt::Debug for EdmModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdmModel")
            .field("structured_types", &self.structured_types.keys())
            .field("enum_types", &self.enum_types.keys())
            .field("runtime_types", &self.runtime_types.keys())
            .field("navigation_sources", &self.navigation_sources.keys())
            .field("actions", &self.actions.keys())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;
    use crate::info::EdmTypeKind;
    use crate::value::{Delta, Resource};

    #[derive(Debug, Default)]
    struct Product {
        name: String,
    }

    impl Resource for Product {}

    fn model() -> EdmModel {
        let mut model = EdmModel::new();
        model.add_structured_type(
            StructuredType::entity("ODataDemo.Product")
                .with_key("ID", EdmTypeRef::primitive(PrimitiveKind::Int32))
                .with_property("Name", EdmTypeRef::primitive(PrimitiveKind::String)),
        );
        model.add_enum_type(EnumType::new("ODataDemo.Color").with_member("Red", 0));
        model
    }

    #[test]
    fn registration_rejects_duplicates() {
        let mut model = model();
        assert!(!model.add_structured_type(StructuredType::complex("ODataDemo.Product")));
        assert!(!model.add_enum_type(EnumType::new("ODataDemo.Product")));
        assert!(model.add_entity_set("Products", "ODataDemo.Product"));
        assert!(!model.add_singleton("Products", "ODataDemo.Product"));
    }

    #[test]
    fn runtime_mapping_fills_the_cache() {
        let mut model = model();
        let runtime = RuntimeType::of::<Product>()
            .field("Name", |p, v| {
                p.name = v.try_into()?;
                Ok(())
            })
            .build();

        assert!(!model.map_runtime_type("ODataDemo.Missing", RuntimeType::of::<Product>().build()));
        assert!(model.map_runtime_type("ODataDemo.Product", runtime));

        let ty = model.get_schema_type(TypeId::of::<Product>()).unwrap();
        assert_eq!(ty.structured_name(), Some("ODataDemo.Product"));
        let delta = model.get_schema_type(TypeId::of::<Delta<Product>>()).unwrap();
        assert_eq!(delta, ty);
        let list = model.get_schema_type(TypeId::of::<Vec<Product>>()).unwrap();
        assert_eq!(list.full_name(), "Collection(ODataDemo.Product)");

        let mapping = model.runtime_type_mapping("ODataDemo.Product").unwrap();
        assert!(mapping.accessor("Name").is_some());
    }

    #[test]
    fn find_type_resolves_every_kind() {
        let model = model();
        assert_eq!(model.find_type("ODataDemo.Color").unwrap().kind(), EdmTypeKind::Enum);
        assert_eq!(model.find_type("ODataDemo.Product").unwrap().kind(), EdmTypeKind::Entity);
        assert_eq!(
            model.find_type("Collection(ODataDemo.Color)").unwrap().full_name(),
            "Collection(ODataDemo.Color)"
        );
        assert!(model.find_type("Edm.Nope").is_none());
        assert!(model.find_type("Collection(Edm.Nope)").is_none());
    }

    #[test]
    fn cyclic_bases_terminate() {
        let mut model = EdmModel::new();
        model.add_structured_type(StructuredType::complex("NS.A").with_base("NS.B"));
        model.add_structured_type(StructuredType::complex("NS.B").with_base("NS.A"));
        assert!(!model.is_open("NS.A"));
        assert_eq!(model.declared_properties("NS.A").count(), 0);
        assert!(model.is_derived_from("NS.A", "NS.B"));
    }
}
