use alloc::string::String;
use alloc::vec::Vec;
use core::any::TypeId;

use od_utils::TypeIdMap;

use crate::info::{EdmTypeRef, PrimitiveKind};
use crate::value::Value;

// -----------------------------------------------------------------------------
// TypeMappingCache

/// Maps runtime `TypeId`s to schema type references.
///
/// # Examples
///
/// ```
/// use od_edm::info::{EdmTypeRef, PrimitiveKind};
/// use od_edm::registry::TypeMappingCache;
/// use core::any::TypeId;
///
/// let cache = TypeMappingCache::new();
///
/// let ty = cache.get_schema_type(TypeId::of::<i64>()).unwrap();
/// assert_eq!(ty.primitive_kind(), Some(PrimitiveKind::Int64));
/// assert!(cache.get_schema_type(TypeId::of::<char>()).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeMappingCache {
    table: TypeIdMap<EdmTypeRef>,
}

impl TypeMappingCache {
    /// An empty cache.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            table: TypeIdMap::new(),
        }
    }

    /// A cache seeded with the Rust primitives.
    ///
    /// - `bool` `u8` `i8` `i16` `i32` `i64` `f32` `f64`
    /// - `String` `Vec<u8>`
    /// - [`Value`] as `Edm.Untyped`
    pub fn new() -> Self {
        let mut cache = Self::empty();
        cache.insert_primitive::<bool>(PrimitiveKind::Boolean);
        cache.insert_primitive::<u8>(PrimitiveKind::Byte);
        cache.insert_primitive::<i8>(PrimitiveKind::SByte);
        cache.insert_primitive::<i16>(PrimitiveKind::Int16);
        cache.insert_primitive::<i32>(PrimitiveKind::Int32);
        cache.insert_primitive::<i64>(PrimitiveKind::Int64);
        cache.insert_primitive::<f32>(PrimitiveKind::Single);
        cache.insert_primitive::<f64>(PrimitiveKind::Double);
        cache.insert_primitive::<String>(PrimitiveKind::String);
        cache.insert_primitive::<Vec<u8>>(PrimitiveKind::Binary);
        cache.table.insert_type::<Value>(EdmTypeRef::untyped());
        cache
    }

    fn insert_primitive<T: 'static>(&mut self, kind: PrimitiveKind) {
        self.table.insert_type::<T>(EdmTypeRef::primitive(kind));
    }

    /// Inserts or overwrites a mapping.
    #[inline]
    pub fn insert(&mut self, type_id: TypeId, type_ref: EdmTypeRef) -> Option<EdmTypeRef> {
        self.table.insert(type_id, type_ref)
    }

    #[inline]
    pub fn get_schema_type(&self, type_id: TypeId) -> Option<&EdmTypeRef> {
        self.table.get(&type_id)
    }

    #[inline]
    pub fn get_schema_type_of<T: ?Sized + 'static>(&self) -> Option<&EdmTypeRef> {
        self.table.get_type::<T>()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
