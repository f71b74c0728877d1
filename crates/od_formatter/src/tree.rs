//! The parsed form of a payload.
//!
//! A [`PayloadReader`](crate::reader::PayloadReader) produces one
//! [`ResourceItem`] per payload. Deserializers consume the tree by value and
//! never look at the raw bytes.

use alloc::string::String;
use alloc::vec::Vec;

use od_edm::value::PrimitiveValue;

// -----------------------------------------------------------------------------
// ResourceItem

/// Any node of the resource tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceItem {
    Null,
    Primitive(PrimitiveValue),
    Enum(EnumNode),
    /// A collection of primitive or enum literals.
    Collection(CollectionNode),
    Resource(ResourceNode),
    ResourceSet(ResourceSetNode),
    DeltaResourceSet(ResourceSetNode),
    NestedInfo(NestedResourceInfo),
    ReferenceLink(ReferenceLink),
}

impl ResourceItem {
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Primitive(_) => "primitive",
            Self::Enum(_) => "enum",
            Self::Collection(_) => "collection",
            Self::Resource(_) => "resource",
            Self::ResourceSet(_) => "resource set",
            Self::DeltaResourceSet(_) => "delta resource set",
            Self::NestedInfo(_) => "nested resource info",
            Self::ReferenceLink(_) => "reference link",
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn is_reference_link(&self) -> bool {
        matches!(self, Self::ReferenceLink(_))
    }
}

impl From<PrimitiveValue> for ResourceItem {
    #[inline]
    fn from(value: PrimitiveValue) -> Self {
        Self::Primitive(value)
    }
}

impl From<ResourceNode> for ResourceItem {
    #[inline]
    fn from(value: ResourceNode) -> Self {
        Self::Resource(value)
    }
}

// -----------------------------------------------------------------------------
// Nodes

/// A structured value: an entity or complex instance.
///
/// # Examples
///
/// ```
/// use od_edm::value::PrimitiveValue;
/// use od_formatter::tree::{NestedResourceInfo, ReferenceLink, ResourceItem, ResourceNode};
///
/// let product = ResourceNode::new()
///     .with_type_name("ODataDemo.Product")
///     .with_property("ID", PrimitiveValue::from(1))
///     .with_nested(NestedResourceInfo::single(
///         "Supplier",
///         ResourceItem::ReferenceLink(ReferenceLink::new("Suppliers(42)")),
///     ));
///
/// assert_eq!(product.type_name.as_deref(), Some("ODataDemo.Product"));
/// assert_eq!(product.properties.len(), 1);
/// assert!(product.nested[0].items[0].is_reference_link());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceNode {
    /// The `@odata.type` annotation, without the leading `#`.
    pub type_name: Option<String>,
    pub properties: Vec<PropertyNode>,
    pub nested: Vec<NestedResourceInfo>,
}

impl ResourceNode {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<ResourceItem>) -> Self {
        self.properties.push(PropertyNode {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_nested(mut self, nested: NestedResourceInfo) -> Self {
        self.nested.push(nested);
        self
    }
}

/// A structural property of a [`ResourceNode`].
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyNode {
    pub name: String,
    pub value: ResourceItem,
}

/// A navigation or nested structured property.
///
/// Collection-valued infos usually hold one [`ResourceItem::ResourceSet`].
/// Bound entities show up as one [`ResourceItem::ReferenceLink`] per link.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedResourceInfo {
    pub name: String,
    pub is_collection: bool,
    pub items: Vec<ResourceItem>,
}

impl NestedResourceInfo {
    pub fn single(name: impl Into<String>, item: ResourceItem) -> Self {
        Self {
            name: name.into(),
            is_collection: false,
            items: alloc::vec![item],
        }
    }

    pub fn collection(name: impl Into<String>, items: Vec<ResourceItem>) -> Self {
        Self {
            name: name.into(),
            is_collection: true,
            items,
        }
    }
}

/// An ordered list of resources, nested sets, primitives or nulls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceSetNode {
    pub type_name: Option<String>,
    pub items: Vec<ResourceItem>,
}

impl ResourceSetNode {
    #[inline]
    pub fn new(items: Vec<ResourceItem>) -> Self {
        Self {
            type_name: None,
            items,
        }
    }
}

/// An ordered list of primitive or enum literals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionNode {
    pub type_name: Option<String>,
    pub items: Vec<ResourceItem>,
}

impl CollectionNode {
    #[inline]
    pub fn new(items: Vec<ResourceItem>) -> Self {
        Self {
            type_name: None,
            items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumNode {
    pub type_name: Option<String>,
    pub value: String,
}

/// An entity referenced by its address, e.g. `Suppliers(42)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceLink {
    pub url: String,
}

impl ReferenceLink {
    #[inline]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
