use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::format;
use alloc::sync::Arc;
use core::fmt;

use crate::info::{EdmTypeKind, EdmTypeKindError, PrimitiveKind};

/// Full name of the untyped sentinel type.
pub const UNTYPED_TYPE_NAME: &str = "Edm.Untyped";

// -----------------------------------------------------------------------------
// PathKind

/// The `Edm.*Path` types. They have no payload representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    AnnotationPath,
    PropertyPath,
    NavigationPropertyPath,
}

impl PathKind {
    pub const fn full_name(self) -> &'static str {
        match self {
            Self::AnnotationPath => "Edm.AnnotationPath",
            Self::PropertyPath => "Edm.PropertyPath",
            Self::NavigationPropertyPath => "Edm.NavigationPropertyPath",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [
            Self::AnnotationPath,
            Self::PropertyPath,
            Self::NavigationPropertyPath,
        ]
        .into_iter()
        .find(|kind| kind.full_name() == name)
    }
}

// -----------------------------------------------------------------------------
// EdmType

/// The definition a type reference points at.
///
/// Structured and enum types are referenced by their full name and resolved
/// through [`EdmModel`](crate::registry::EdmModel), so type graphs may be
/// cyclic (`Product.Category` and `Category.Products`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdmType {
    Entity(Arc<str>),
    Complex(Arc<str>),
    Enum(Arc<str>),
    Primitive(PrimitiveKind),
    Collection(Box<EdmTypeRef>),
    /// The `Edm.Untyped` sentinel: accepts any wire shape.
    Untyped,
    Path(PathKind),
}

impl EdmType {
    pub const fn kind(&self) -> EdmTypeKind {
        match self {
            Self::Entity(_) => EdmTypeKind::Entity,
            Self::Complex(_) => EdmTypeKind::Complex,
            Self::Enum(_) => EdmTypeKind::Enum,
            Self::Primitive(_) => EdmTypeKind::Primitive,
            Self::Collection(_) => EdmTypeKind::Collection,
            Self::Untyped => EdmTypeKind::Untyped,
            Self::Path(_) => EdmTypeKind::Path,
        }
    }

    /// Returns the qualified name, `Collection(..)` for collections.
    pub fn full_name(&self) -> Cow<'_, str> {
        match self {
            Self::Entity(name) | Self::Complex(name) | Self::Enum(name) => Cow::Borrowed(&**name),
            Self::Primitive(kind) => Cow::Borrowed(kind.full_name()),
            Self::Collection(element) => {
                Cow::Owned(format!("Collection({})", element.definition().full_name()))
            }
            Self::Untyped => Cow::Borrowed(UNTYPED_TYPE_NAME),
            Self::Path(kind) => Cow::Borrowed(kind.full_name()),
        }
    }
}

// -----------------------------------------------------------------------------
// EdmTypeRef

/// A reference to a schema type plus its nullability.
///
/// # Examples
///
/// ```
/// use od_edm::info::{EdmTypeKind, EdmTypeRef, PrimitiveKind};
///
/// let products = EdmTypeRef::collection(EdmTypeRef::entity("ODataDemo.Product"));
/// assert_eq!(products.kind(), EdmTypeKind::Collection);
/// assert_eq!(products.full_name(), "Collection(ODataDemo.Product)");
/// assert_eq!(products.as_element().structured_name(), Some("ODataDemo.Product"));
///
/// let id = EdmTypeRef::primitive(PrimitiveKind::Int32).with_nullable(false);
/// assert!(!id.nullable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdmTypeRef {
    definition: EdmType,
    nullable: bool,
}

macro_rules! impl_is_method {
    ($name:ident : $kind:ident) => {
        #[inline]
        pub const fn $name(&self) -> bool {
            matches!(self.definition.kind(), EdmTypeKind::$kind)
        }
    };
}

impl EdmTypeRef {
    #[inline]
    pub const fn new(definition: EdmType, nullable: bool) -> Self {
        Self {
            definition,
            nullable,
        }
    }

    #[inline]
    pub fn entity(name: impl Into<Arc<str>>) -> Self {
        Self::new(EdmType::Entity(name.into()), true)
    }

    #[inline]
    pub fn complex(name: impl Into<Arc<str>>) -> Self {
        Self::new(EdmType::Complex(name.into()), true)
    }

    #[inline]
    pub fn enumeration(name: impl Into<Arc<str>>) -> Self {
        Self::new(EdmType::Enum(name.into()), true)
    }

    #[inline]
    pub const fn primitive(kind: PrimitiveKind) -> Self {
        Self::new(EdmType::Primitive(kind), true)
    }

    #[inline]
    pub fn collection(element: EdmTypeRef) -> Self {
        Self::new(EdmType::Collection(Box::new(element)), true)
    }

    /// The `Edm.Untyped` sentinel.
    #[inline]
    pub const fn untyped() -> Self {
        Self::new(EdmType::Untyped, true)
    }

    #[inline]
    pub const fn path(kind: PathKind) -> Self {
        Self::new(EdmType::Path(kind), false)
    }

    #[inline]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    #[inline]
    pub const fn definition(&self) -> &EdmType {
        &self.definition
    }

    #[inline]
    pub const fn nullable(&self) -> bool {
        self.nullable
    }

    #[inline]
    pub const fn kind(&self) -> EdmTypeKind {
        self.definition.kind()
    }

    #[inline]
    pub fn full_name(&self) -> Cow<'_, str> {
        self.definition.full_name()
    }

    impl_is_method!(is_entity: Entity);
    impl_is_method!(is_complex: Complex);
    impl_is_method!(is_enum: Enum);
    impl_is_method!(is_primitive: Primitive);
    impl_is_method!(is_collection: Collection);
    impl_is_method!(is_untyped: Untyped);

    #[inline]
    pub const fn is_structured(&self) -> bool {
        self.definition.kind().is_structured()
    }

    /// `Edm.Untyped` or `Collection(Edm.Untyped)`.
    pub fn is_untyped_value(&self) -> bool {
        match &self.definition {
            EdmType::Untyped => true,
            EdmType::Collection(element) => element.is_untyped(),
            _ => false,
        }
    }

    /// Full name of an entity or complex type.
    pub fn structured_name(&self) -> Option<&str> {
        match &self.definition {
            EdmType::Entity(name) | EdmType::Complex(name) => Some(&**name),
            _ => None,
        }
    }

    pub fn enum_name(&self) -> Option<&str> {
        match &self.definition {
            EdmType::Enum(name) => Some(&**name),
            _ => None,
        }
    }

    pub const fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match &self.definition {
            EdmType::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    /// The element type of a collection.
    pub fn as_collection(&self) -> Result<&EdmTypeRef, EdmTypeKindError> {
        match &self.definition {
            EdmType::Collection(element) => Ok(&**element),
            other => Err(EdmTypeKindError {
                expected: EdmTypeKind::Collection,
                received: other.kind(),
            }),
        }
    }

    /// The element type for collections, `self` otherwise.
    pub fn as_element(&self) -> &EdmTypeRef {
        match &self.definition {
            EdmType::Collection(element) => &**element,
            _ => self,
        }
    }
}

impl fmt::Display for EdmTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.full_name())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untyped_sentinel_name() {
        let untyped = EdmTypeRef::untyped();
        assert_eq!(untyped.full_name(), "Edm.Untyped");
        assert!(untyped.is_untyped_value());
        assert!(EdmTypeRef::collection(untyped).is_untyped_value());
        assert!(!EdmTypeRef::primitive(PrimitiveKind::Int32).is_untyped_value());
    }

    #[test]
    fn collection_cast() {
        let tags = EdmTypeRef::collection(EdmTypeRef::primitive(PrimitiveKind::String));
        assert_eq!(
            tags.as_collection().map(EdmTypeRef::primitive_kind).ok(),
            Some(Some(PrimitiveKind::String))
        );

        let err = EdmTypeRef::complex("NS.Address").as_collection().unwrap_err();
        assert_eq!(err.expected, EdmTypeKind::Collection);
        assert_eq!(err.received, EdmTypeKind::Complex);
    }
}
