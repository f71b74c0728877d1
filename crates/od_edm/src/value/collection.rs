use alloc::vec::Vec;

use crate::info::EdmTypeRef;
use crate::value::Value;

// -----------------------------------------------------------------------------
// EdmCollection

/// An ordered list of values tagged with its element type.
///
/// Null items keep their position.
#[derive(Debug, PartialEq)]
pub struct EdmCollection {
    element_type: EdmTypeRef,
    items: Vec<Value>,
}

impl EdmCollection {
    #[inline]
    pub fn new(element_type: EdmTypeRef) -> Self {
        Self {
            element_type,
            items: Vec::new(),
        }
    }

    /// A collection of `Edm.Untyped` items.
    #[inline]
    pub fn untyped() -> Self {
        Self::new(EdmTypeRef::untyped())
    }

    #[inline]
    pub fn with_items(element_type: EdmTypeRef, items: Vec<Value>) -> Self {
        Self {
            element_type,
            items,
        }
    }

    #[inline]
    pub fn element_type(&self) -> &EdmTypeRef {
        &self.element_type
    }

    /// The `Collection(..)` type of this value.
    #[inline]
    pub fn type_ref(&self) -> EdmTypeRef {
        EdmTypeRef::collection(self.element_type.clone())
    }

    #[inline]
    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Value> {
        self.items.iter()
    }

    #[inline]
    pub fn into_items(self) -> Vec<Value> {
        self.items
    }

    /// See [`Value::clone_data`].
    pub fn clone_data(&self) -> Option<EdmCollection> {
        let items = self
            .items
            .iter()
            .map(Value::clone_data)
            .collect::<Option<Vec<_>>>()?;
        Some(Self::with_items(self.element_type.clone(), items))
    }
}

impl IntoIterator for EdmCollection {
    type Item = Value;
    type IntoIter = alloc::vec::IntoIter<Value>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a EdmCollection {
    type Item = &'a Value;
    type IntoIter = core::slice::Iter<'a, Value>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
