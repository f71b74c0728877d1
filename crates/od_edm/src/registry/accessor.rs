use alloc::boxed::Box;
use core::any::type_name;
use core::fmt;

use crate::value::{Resource, Value, ValueError};

type Getter = Box<dyn Fn(&dyn Resource) -> Option<Value> + Send + Sync>;
type Setter = Box<dyn Fn(&mut dyn Resource, Value) -> Result<(), ValueError> + Send + Sync>;

// -----------------------------------------------------------------------------
// PropertyAccessor

/// Type-erased getter and setter for one field of a runtime type.
///
/// The closures are written against the concrete type and wrapped with a
/// downcast, so an accessor called on another type reports
/// [`ValueError::ResourceMismatch`] instead of panicking.
///
/// # Examples
///
/// ```
/// use od_edm::registry::PropertyAccessor;
/// use od_edm::value::{Resource, Value};
///
/// #[derive(Debug, Default)]
/// struct Category {
///     name: String,
/// }
///
/// impl Resource for Category {}
///
/// let accessor = PropertyAccessor::new::<Category>(
///     "name",
///     |category, value| {
///         category.name = value.try_into()?;
///         Ok(())
///     },
/// )
/// .with_getter::<Category>(|category| Some(Value::from(category.name.as_str())));
///
/// let mut category: Box<dyn Resource> = Box::new(Category::default());
/// accessor.set(&mut *category, Value::from("Food")).unwrap();
///
/// assert_eq!(accessor.get(&*category), Some(Value::from("Food")));
/// ```
pub struct PropertyAccessor {
    name: &'static str,
    getter: Option<Getter>,
    setter: Setter,
}

impl PropertyAccessor {
    /// A write-only accessor for the field `name` of `T`.
    pub fn new<T: Resource>(
        name: &'static str,
        set: impl Fn(&mut T, Value) -> Result<(), ValueError> + Send + Sync + 'static,
    ) -> Self {
        let setter = move |instance: &mut dyn Resource, value: Value| {
            let found = instance.type_path();
            match instance.downcast_mut::<T>() {
                Some(instance) => set(instance, value),
                None => Err(ValueError::ResourceMismatch {
                    expected: type_name::<T>(),
                    found,
                }),
            }
        };

        Self {
            name,
            getter: None,
            setter: Box::new(setter),
        }
    }

    /// Adds a getter. `get` may return `None` for values it cannot expose.
    pub fn with_getter<T: Resource>(
        mut self,
        get: impl Fn(&T) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        let getter = move |instance: &dyn Resource| instance.downcast_ref::<T>().and_then(&get);
        self.getter = Some(Box::new(getter));
        self
    }

    /// Name of the runtime field.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    /// Reads the field, `None` for write-only accessors or foreign types.
    pub fn get(&self, instance: &dyn Resource) -> Option<Value> {
        self.getter.as_ref().and_then(|get| get(instance))
    }

    pub fn set(&self, instance: &mut dyn Resource, value: Value) -> Result<(), ValueError> {
        (self.setter)(instance, value)
    }
}

impl fmt::Debug for PropertyAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyAccessor")
            .field("name", &self.name)
            .field("readable", &self.is_readable())
            .finish_non_exhaustive()
    }
}
