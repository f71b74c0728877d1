use alloc::sync::Arc;

use crate::info::EdmTypeRef;

// -----------------------------------------------------------------------------
// NavigationSource

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationSourceKind {
    EntitySet,
    Singleton,
}

/// An entity set or singleton of the entity container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationSource {
    name: Arc<str>,
    kind: NavigationSourceKind,
    entity_type: Arc<str>,
}

impl NavigationSource {
    pub fn entity_set(name: impl Into<Arc<str>>, entity_type: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            kind: NavigationSourceKind::EntitySet,
            entity_type: entity_type.into(),
        }
    }

    pub fn singleton(name: impl Into<Arc<str>>, entity_type: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            kind: NavigationSourceKind::Singleton,
            entity_type: entity_type.into(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> NavigationSourceKind {
        self.kind
    }

    /// Full name of the element entity type.
    #[inline]
    pub fn entity_type_name(&self) -> &str {
        &self.entity_type
    }

    #[inline]
    pub fn entity_type(&self) -> EdmTypeRef {
        EdmTypeRef::entity(self.entity_type.clone())
    }
}
