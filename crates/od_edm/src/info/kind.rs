use core::{error, fmt};

// -----------------------------------------------------------------------------
// EdmTypeKind

/// The "kind" of a schema type.
///
/// Deserializers are selected by kind, see `DeserializerProvider` in
/// `od_formatter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdmTypeKind {
    Entity,
    Complex,
    Enum,
    Primitive,
    Collection,
    Untyped,
    Path,
}

impl EdmTypeKind {
    /// Returns `true` for [`Entity`](Self::Entity) and [`Complex`](Self::Complex).
    #[inline]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Entity | Self::Complex)
    }
}

impl fmt::Display for EdmTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity => f.pad("Entity"),
            Self::Complex => f.pad("Complex"),
            Self::Enum => f.pad("Enum"),
            Self::Primitive => f.pad("Primitive"),
            Self::Collection => f.pad("Collection"),
            Self::Untyped => f.pad("Untyped"),
            Self::Path => f.pad("Path"),
        }
    }
}

/// Error returned when a type reference is not of the expected [`EdmTypeKind`].
#[derive(Debug)]
pub struct EdmTypeKindError {
    pub expected: EdmTypeKind,
    pub received: EdmTypeKind,
}

impl fmt::Display for EdmTypeKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "edm type kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for EdmTypeKindError {}
