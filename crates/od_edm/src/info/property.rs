use alloc::sync::Arc;

use crate::info::EdmTypeRef;

// -----------------------------------------------------------------------------
// EdmProperty

/// Whether a property holds a value or points at related entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Structural,
    Navigation,
}

/// A property declared on a structured type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdmProperty {
    name: Arc<str>,
    type_ref: EdmTypeRef,
    kind: PropertyKind,
    is_key: bool,
}

impl EdmProperty {
    #[inline]
    pub fn structural(name: impl Into<Arc<str>>, type_ref: EdmTypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            kind: PropertyKind::Structural,
            is_key: false,
        }
    }

    #[inline]
    pub fn navigation(name: impl Into<Arc<str>>, type_ref: EdmTypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            kind: PropertyKind::Navigation,
            is_key: false,
        }
    }

    /// A structural, non-nullable key property.
    #[inline]
    pub fn key(name: impl Into<Arc<str>>, type_ref: EdmTypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref: type_ref.with_nullable(false),
            kind: PropertyKind::Structural,
            is_key: true,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn name_arc(&self) -> &Arc<str> {
        &self.name
    }

    #[inline]
    pub fn type_ref(&self) -> &EdmTypeRef {
        &self.type_ref
    }

    #[inline]
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    #[inline]
    pub fn is_key(&self) -> bool {
        self.is_key
    }

    #[inline]
    pub fn is_navigation(&self) -> bool {
        self.kind == PropertyKind::Navigation
    }
}
