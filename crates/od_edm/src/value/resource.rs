use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use od_utils::OrderedMap;

use crate::value::Value;

/// The dynamic-property bag of an open type, in payload order.
pub type DynamicProperties = OrderedMap<Value>;

// -----------------------------------------------------------------------------
// Resource

/// A runtime type that entity or complex values materialize into.
///
/// Implementors are registered with the model through
/// [`RuntimeType`](crate::registry::RuntimeType), which provides the
/// constructor and the property accessors. A type backing an open schema type
/// exposes its bag through [`dynamic_properties_mut`]. Types that keep the
/// default `None` reject dynamic properties.
///
/// # Examples
///
/// ```
/// use od_edm::value::{DynamicProperties, Resource, Value};
///
/// #[derive(Debug, Default)]
/// struct Customer {
///     id: i32,
///     bag: DynamicProperties,
/// }
///
/// impl Resource for Customer {
///     fn dynamic_properties(&self) -> Option<&DynamicProperties> {
///         Some(&self.bag)
///     }
///
///     fn dynamic_properties_mut(&mut self) -> Option<&mut DynamicProperties> {
///         Some(&mut self.bag)
///     }
/// }
///
/// let mut boxed: Box<dyn Resource> = Box::new(Customer::default());
/// boxed.dynamic_properties_mut().unwrap().insert("Rank", Value::from(3));
///
/// let customer = boxed.take::<Customer>().unwrap();
/// assert_eq!(customer.bag.get("Rank"), Some(&Value::from(3)));
/// ```
///
/// [`dynamic_properties_mut`]: Resource::dynamic_properties_mut
pub trait Resource: Any + Send + Sync + fmt::Debug {
    /// The Rust type name, used in error messages.
    fn type_path(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    fn dynamic_properties(&self) -> Option<&DynamicProperties> {
        None
    }

    fn dynamic_properties_mut(&mut self) -> Option<&mut DynamicProperties> {
        None
    }
}

impl dyn Resource {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Resource>(&self) -> bool {
        <dyn Any>::is::<T>(self)
    }

    #[inline]
    pub fn downcast_ref<T: Resource>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Resource>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the box, handing it back unchanged on a type mismatch.
    pub fn downcast<T: Resource>(self: Box<dyn Resource>) -> Result<Box<T>, Box<dyn Resource>> {
        if self.is::<T>() {
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Downcasts and unboxes the value.
    #[inline]
    pub fn take<T: Resource>(self: Box<dyn Resource>) -> Result<T, Box<dyn Resource>> {
        self.downcast::<T>().map(|value| *value)
    }
}
