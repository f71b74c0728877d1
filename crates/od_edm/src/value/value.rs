use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::value::{Delta, DeltaResource, EdmCollection, EdmEnumValue, EdmObject};
use crate::value::{PrimitiveValue, Resource, ValueError};

// -----------------------------------------------------------------------------
// Value

/// A materialized value.
///
/// Deserialization produces one `Value` per payload. Typed instances are
/// boxed [`Resource`]s, partial updates are boxed [`DeltaResource`]s, and
/// everything that has no runtime type is represented by [`EdmObject`] and
/// [`EdmCollection`].
///
/// # Equality
///
/// `Resource` and `Delta` values never compare equal, not even to
/// themselves. Downcast them first.
///
/// # Examples
///
/// ```
/// use od_edm::value::{EdmCollection, Value};
///
/// let mut list = EdmCollection::untyped();
/// list.push(Value::from(true));
/// list.push(Value::Null);
/// list.push(Value::from(15));
///
/// let value = Value::from(list);
/// let items = value.as_collection().unwrap();
/// assert_eq!(items.len(), 3);
/// assert!(items.get(1).unwrap().is_null());
/// assert_eq!(items.get(2), Some(&Value::from(15)));
/// ```
#[derive(Debug)]
pub enum Value {
    Null,
    Primitive(PrimitiveValue),
    Enum(EdmEnumValue),
    Object(EdmObject),
    Collection(EdmCollection),
    Resource(Box<dyn Resource>),
    Delta(Box<dyn DeltaResource>),
}

impl Value {
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Primitive(v) => v.kind_name(),
            Self::Enum(_) => "enum",
            Self::Object(_) => "object",
            Self::Collection(_) => "collection",
            Self::Resource(_) => "resource",
            Self::Delta(_) => "delta",
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn as_primitive(&self) -> Option<&PrimitiveValue> {
        match self {
            Self::Primitive(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_enum(&self) -> Option<&EdmEnumValue> {
        match self {
            Self::Enum(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_object(&self) -> Option<&EdmObject> {
        match self {
            Self::Object(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_collection(&self) -> Option<&EdmCollection> {
        match self {
            Self::Collection(v) => Some(v),
            _ => None,
        }
    }

    /// Borrows a typed instance as `T`.
    pub fn as_resource<T: Resource>(&self) -> Option<&T> {
        match self {
            Self::Resource(v) => v.downcast_ref(),
            _ => None,
        }
    }

    pub fn as_delta(&self) -> Option<&dyn DeltaResource> {
        match self {
            Self::Delta(v) => Some(&**v),
            _ => None,
        }
    }

    /// Copies a value holding only data.
    ///
    /// Returns `None` if a typed instance or delta is reachable from `self`.
    pub fn clone_data(&self) -> Option<Value> {
        Some(match self {
            Self::Null => Self::Null,
            Self::Primitive(v) => Self::Primitive(v.clone()),
            Self::Enum(v) => Self::Enum(v.clone()),
            Self::Object(v) => Self::Object(v.clone_data()?),
            Self::Collection(v) => Self::Collection(v.clone_data()?),
            Self::Resource(_) | Self::Delta(_) => return None,
        })
    }

    /// Unboxes a typed instance.
    pub fn into_resource<T: Resource>(self) -> Result<T, ValueError> {
        match self {
            Self::Resource(v) => v.take::<T>().map_err(|v| ValueError::ResourceMismatch {
                expected: core::any::type_name::<T>(),
                found: v.type_path(),
            }),
            other => Err(ValueError::Mismatch {
                expected: "resource",
                found: other.kind_name(),
            }),
        }
    }

    /// Unboxes a collection of typed instances. Null items are skipped.
    pub fn into_resources<T: Resource>(self) -> Result<Vec<T>, ValueError> {
        match self {
            Self::Collection(list) => list
                .into_iter()
                .filter(|item| !item.is_null())
                .map(Value::into_resource::<T>)
                .collect(),
            other => Err(ValueError::Mismatch {
                expected: "collection",
                found: other.kind_name(),
            }),
        }
    }

    /// Unboxes a partial-update wrapper.
    pub fn into_delta<T: Resource>(self) -> Result<Delta<T>, ValueError> {
        match self {
            Self::Delta(v) => v.take::<T>().map_err(|v| ValueError::ResourceMismatch {
                expected: core::any::type_name::<Delta<T>>(),
                found: v.instance().type_path(),
            }),
            other => Err(ValueError::Mismatch {
                expected: "delta",
                found: other.kind_name(),
            }),
        }
    }

    /// Converts nullable values, `Null` becomes `None`.
    pub fn into_nullable<T>(self) -> Result<Option<T>, ValueError>
    where
        T: TryFrom<Value, Error = ValueError>,
    {
        match self {
            Self::Null => Ok(None),
            other => T::try_from(other).map(Some),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Primitive(a), Self::Primitive(b)) => a == b,
            (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Collection(a), Self::Collection(b)) => a == b,
            _ => false,
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

impl From<PrimitiveValue> for Value {
    #[inline]
    fn from(value: PrimitiveValue) -> Self {
        Self::Primitive(value)
    }
}

impl From<EdmEnumValue> for Value {
    #[inline]
    fn from(value: EdmEnumValue) -> Self {
        Self::Enum(value)
    }
}

impl From<EdmObject> for Value {
    #[inline]
    fn from(value: EdmObject) -> Self {
        Self::Object(value)
    }
}

impl From<EdmCollection> for Value {
    #[inline]
    fn from(value: EdmCollection) -> Self {
        Self::Collection(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

macro_rules! impl_scalar_conversion {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Primitive(PrimitiveValue::from(value))
                }
            }
        )*
    };
}

impl_scalar_conversion!(bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, String, &str, Vec<u8>);

macro_rules! impl_integer_try_from {
    ($($ty:ty),*) => {
        $(
            impl TryFrom<Value> for $ty {
                type Error = ValueError;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    match value {
                        Value::Primitive(PrimitiveValue::Int(v)) => {
                            <$ty>::try_from(v).map_err(|_| ValueError::OutOfRange {
                                value: v,
                                target: stringify!($ty),
                            })
                        }
                        other => Err(ValueError::Mismatch {
                            expected: "integer",
                            found: other.kind_name(),
                        }),
                    }
                }
            }
        )*
    };
}

impl_integer_try_from!(i8, i16, i32, i64, u8, u16, u32);

impl TryFrom<Value> for f64 {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value.as_primitive().and_then(PrimitiveValue::as_f64) {
            Some(v) => Ok(v),
            None => Err(ValueError::Mismatch {
                expected: "float",
                found: value.kind_name(),
            }),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        f64::try_from(value).map(|v| v as f32)
    }
}

impl TryFrom<Value> for bool {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Primitive(PrimitiveValue::Boolean(v)) => Ok(v),
            other => Err(ValueError::Mismatch {
                expected: "boolean",
                found: other.kind_name(),
            }),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Primitive(PrimitiveValue::String(v)) => Ok(v),
            other => Err(ValueError::Mismatch {
                expected: "string",
                found: other.kind_name(),
            }),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Primitive(PrimitiveValue::Binary(v)) => Ok(v),
            other => Err(ValueError::Mismatch {
                expected: "binary",
                found: other.kind_name(),
            }),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
