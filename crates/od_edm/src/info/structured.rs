use alloc::sync::Arc;
use alloc::vec::Vec;

use od_utils::hash::HashMap;

use crate::info::{EdmProperty, EdmTypeRef};

// -----------------------------------------------------------------------------
// StructuredKind

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuredKind {
    Entity,
    Complex,
}

// -----------------------------------------------------------------------------
// StructuredType

/// An entity or complex type definition.
///
/// Only the properties declared on this type are stored here. Inherited
/// properties, and the open/abstract flags as seen through the base chain,
/// are answered by [`EdmModel`](crate::registry::EdmModel).
///
/// # Examples
///
/// ```
/// use od_edm::info::{EdmTypeRef, PrimitiveKind, StructuredType};
///
/// let product = StructuredType::entity("ODataDemo.Product")
///     .with_key("ID", EdmTypeRef::primitive(PrimitiveKind::Int32))
///     .with_property("Name", EdmTypeRef::primitive(PrimitiveKind::String))
///     .with_navigation("Category", EdmTypeRef::entity("ODataDemo.Category"));
///
/// assert_eq!(product.name(), "Product");
/// assert_eq!(product.namespace(), "ODataDemo");
/// assert!(product.property("Category").unwrap().is_navigation());
/// assert!(product.property("Missing").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct StructuredType {
    full_name: Arc<str>,
    kind: StructuredKind,
    base: Option<Arc<str>>,
    is_abstract: bool,
    is_open: bool,
    properties: Vec<EdmProperty>,
    property_indices: HashMap<Arc<str>, usize>,
}

impl StructuredType {
    fn new(full_name: Arc<str>, kind: StructuredKind) -> Self {
        Self {
            full_name,
            kind,
            base: None,
            is_abstract: false,
            is_open: false,
            properties: Vec::new(),
            property_indices: HashMap::default(),
        }
    }

    #[inline]
    pub fn entity(full_name: impl Into<Arc<str>>) -> Self {
        Self::new(full_name.into(), StructuredKind::Entity)
    }

    #[inline]
    pub fn complex(full_name: impl Into<Arc<str>>) -> Self {
        Self::new(full_name.into(), StructuredKind::Complex)
    }

    /// Derives this type from `base`, given by full name.
    #[inline]
    pub fn with_base(mut self, base: impl Into<Arc<str>>) -> Self {
        self.base = Some(base.into());
        self
    }

    #[inline]
    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    #[inline]
    pub fn with_open(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self
    }

    /// Adds a property, replacing an earlier one with the same name.
    pub fn with(mut self, property: EdmProperty) -> Self {
        match self.property_indices.get(property.name()) {
            Some(&index) => self.properties[index] = property,
            None => {
                self.property_indices
                    .insert(property.name_arc().clone(), self.properties.len());
                self.properties.push(property);
            }
        }
        self
    }

    #[inline]
    pub fn with_key(self, name: impl Into<Arc<str>>, type_ref: EdmTypeRef) -> Self {
        self.with(EdmProperty::key(name, type_ref))
    }

    #[inline]
    pub fn with_property(self, name: impl Into<Arc<str>>, type_ref: EdmTypeRef) -> Self {
        self.with(EdmProperty::structural(name, type_ref))
    }

    #[inline]
    pub fn with_navigation(self, name: impl Into<Arc<str>>, type_ref: EdmTypeRef) -> Self {
        self.with(EdmProperty::navigation(name, type_ref))
    }

    #[inline]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The unqualified name.
    pub fn name(&self) -> &str {
        match self.full_name.rfind('.') {
            Some(index) => &self.full_name[index + 1..],
            None => &self.full_name,
        }
    }

    pub fn namespace(&self) -> &str {
        match self.full_name.rfind('.') {
            Some(index) => &self.full_name[..index],
            None => "",
        }
    }

    #[inline]
    pub fn kind(&self) -> StructuredKind {
        self.kind
    }

    #[inline]
    pub fn base_type_name(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// The abstract flag declared on this type.
    #[inline]
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// The open flag declared on this type, ignoring base types.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Properties declared on this type, in declaration order.
    #[inline]
    pub fn properties(&self) -> &[EdmProperty] {
        &self.properties
    }

    /// A property declared on this type.
    #[inline]
    pub fn property(&self, name: &str) -> Option<&EdmProperty> {
        let index = *self.property_indices.get(name)?;
        Some(&self.properties[index])
    }

    /// A type reference to this definition.
    pub fn type_ref(&self) -> EdmTypeRef {
        match self.kind {
            StructuredKind::Entity => EdmTypeRef::entity(self.full_name.clone()),
            StructuredKind::Complex => EdmTypeRef::complex(self.full_name.clone()),
        }
    }
}
