use alloc::string::String;

use od_utils::OrderedMap;

use crate::info::EdmTypeRef;
use crate::value::Value;

// -----------------------------------------------------------------------------
// EdmObject

/// A structured value with no runtime type behind it.
///
/// It is an ordered `name -> value` mapping tagged with its schema type. It
/// is used for the `Edm.Untyped` sentinel and for typeless reads of entity
/// and complex types.
///
/// # Examples
///
/// ```
/// use od_edm::value::{EdmObject, Value};
///
/// let mut object = EdmObject::untyped();
/// object.set_property("Data_ID", Value::from(42));
///
/// assert_eq!(object.type_ref().full_name(), "Edm.Untyped");
/// assert_eq!(object.property("Data_ID"), Some(&Value::from(42)));
/// ```
#[derive(Debug, PartialEq)]
pub struct EdmObject {
    type_ref: EdmTypeRef,
    properties: OrderedMap<Value>,
}

impl EdmObject {
    #[inline]
    pub fn new(type_ref: EdmTypeRef) -> Self {
        Self {
            type_ref,
            properties: OrderedMap::new(),
        }
    }

    /// An object tagged with `Edm.Untyped`.
    #[inline]
    pub fn untyped() -> Self {
        Self::new(EdmTypeRef::untyped())
    }

    #[inline]
    pub fn type_ref(&self) -> &EdmTypeRef {
        &self.type_ref
    }

    #[inline]
    pub fn is_untyped(&self) -> bool {
        self.type_ref.is_untyped()
    }

    #[inline]
    pub fn is_entity(&self) -> bool {
        self.type_ref.is_entity()
    }

    #[inline]
    pub fn is_complex(&self) -> bool {
        self.type_ref.is_complex()
    }

    /// Sets a property, keeping the position of an existing one.
    #[inline]
    pub fn set_property(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.properties.insert(name, value)
    }

    #[inline]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    #[inline]
    pub fn property_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.properties.get_mut(name)
    }

    /// Properties in the order they were set.
    #[inline]
    pub fn properties(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
        self.properties.iter()
    }

    #[inline]
    pub fn property_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.properties.keys()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    #[inline]
    pub fn into_properties(self) -> OrderedMap<Value> {
        self.properties
    }

    /// See [`Value::clone_data`].
    pub fn clone_data(&self) -> Option<EdmObject> {
        let mut properties = OrderedMap::with_capacity(self.properties.len());
        for (name, value) in self.properties.iter() {
            properties.insert(name, value.clone_data()?);
        }
        Some(Self {
            type_ref: self.type_ref.clone(),
            properties,
        })
    }
}

impl Default for EdmObject {
    #[inline]
    fn default() -> Self {
        Self::untyped()
    }
}
