use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{TypeId, type_name};
use core::fmt;
use core::marker::PhantomData;

use od_utils::hash::HashMap;

use crate::registry::PropertyAccessor;
use crate::value::{Delta, DeltaResource, Resource, Value, ValueError};

fn construct<T: Resource + Default>() -> Box<dyn Resource> {
    Box::new(T::default())
}

fn construct_delta<T: Resource + Default>(updatable: Vec<Arc<str>>) -> Box<dyn DeltaResource> {
    Box::new(Delta::<T>::new(updatable))
}

// -----------------------------------------------------------------------------
// RuntimeType

/// The runtime side of a structured schema type.
///
/// Holds the parameterless constructor and one [`PropertyAccessor`] per
/// settable field. Schema property names resolve to field names through the
/// alias table, and fall back to the schema name itself.
///
/// # Examples
///
/// ```
/// use od_edm::registry::RuntimeType;
/// use od_edm::value::{Resource, Value};
///
/// #[derive(Debug, Default)]
/// struct Order {
///     id: i32,
/// }
///
/// impl Resource for Order {}
///
/// let runtime = RuntimeType::of::<Order>()
///     .field("Id", |order, value| {
///         order.id = value.try_into()?;
///         Ok(())
///     })
///     .alias("OrderId", "Id")
///     .build();
///
/// let mut order = runtime.construct();
/// runtime.accessor("OrderId").unwrap().set(&mut *order, Value::from(7)).unwrap();
///
/// assert_eq!(order.downcast_ref::<Order>().unwrap().id, 7);
/// ```
pub struct RuntimeType {
    type_id: TypeId,
    type_path: &'static str,
    delta_type_id: TypeId,
    list_type_id: TypeId,
    constructor: fn() -> Box<dyn Resource>,
    delta_constructor: fn(Vec<Arc<str>>) -> Box<dyn DeltaResource>,
    accessors: HashMap<&'static str, PropertyAccessor>,
    aliases: HashMap<&'static str, &'static str>,
}

impl RuntimeType {
    /// Starts describing `T`.
    pub fn of<T: Resource + Default>() -> RuntimeTypeBuilder<T> {
        RuntimeTypeBuilder {
            inner: RuntimeType {
                type_id: TypeId::of::<T>(),
                type_path: type_name::<T>(),
                delta_type_id: TypeId::of::<Delta<T>>(),
                list_type_id: TypeId::of::<Vec<T>>(),
                constructor: construct::<T>,
                delta_constructor: construct_delta::<T>,
                accessors: HashMap::default(),
                aliases: HashMap::default(),
            },
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// `TypeId` of `Delta<T>`.
    #[inline]
    pub fn delta_type_id(&self) -> TypeId {
        self.delta_type_id
    }

    /// `TypeId` of `Vec<T>`.
    #[inline]
    pub fn list_type_id(&self) -> TypeId {
        self.list_type_id
    }

    /// A new default instance.
    #[inline]
    pub fn construct(&self) -> Box<dyn Resource> {
        (self.constructor)()
    }

    /// A new default instance wrapped in a `Delta<T>`.
    #[inline]
    pub fn construct_delta(&self, updatable: Vec<Arc<str>>) -> Box<dyn DeltaResource> {
        (self.delta_constructor)(updatable)
    }

    /// The runtime field a schema property is bound to.
    pub fn runtime_name<'a>(&self, schema_name: &'a str) -> &'a str {
        match self.aliases.get(schema_name) {
            Some(runtime) => *runtime,
            None => schema_name,
        }
    }

    /// The accessor for a schema property, following aliases.
    pub fn accessor(&self, schema_name: &str) -> Option<&PropertyAccessor> {
        self.accessors.get(self.runtime_name(schema_name))
    }

    pub fn accessors(&self) -> impl Iterator<Item = &PropertyAccessor> {
        self.accessors.values()
    }

    /// Reads a schema property from `instance`.
    pub fn get_property(&self, instance: &dyn Resource, schema_name: &str) -> Option<Value> {
        self.accessor(schema_name)?.get(instance)
    }

    /// Writes a schema property. Returns `Ok(false)` if no accessor exists.
    pub fn set_property(
        &self,
        instance: &mut dyn Resource,
        schema_name: &str,
        value: Value,
    ) -> Result<bool, ValueError> {
        match self.accessor(schema_name) {
            Some(accessor) => accessor.set(instance, value).map(|()| true),
            None => Ok(false),
        }
    }
}

impl fmt::Debug for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeType")
            .field("type_path", &self.type_path)
            .field("accessors", &self.accessors.keys())
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// RuntimeTypeBuilder

/// Builder returned by [`RuntimeType::of`].
pub struct RuntimeTypeBuilder<T> {
    inner: RuntimeType,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Resource> RuntimeTypeBuilder<T> {
    /// Adds a write-only field.
    pub fn field(
        mut self,
        name: &'static str,
        set: impl Fn(&mut T, Value) -> Result<(), ValueError> + Send + Sync + 'static,
    ) -> Self {
        self.inner
            .accessors
            .insert(name, PropertyAccessor::new::<T>(name, set));
        self
    }

    /// Adds a readable and writable field.
    pub fn property(
        mut self,
        name: &'static str,
        get: impl Fn(&T) -> Option<Value> + Send + Sync + 'static,
        set: impl Fn(&mut T, Value) -> Result<(), ValueError> + Send + Sync + 'static,
    ) -> Self {
        let accessor = PropertyAccessor::new::<T>(name, set).with_getter::<T>(get);
        self.inner.accessors.insert(name, accessor);
        self
    }

    /// Binds the schema property `schema_name` to the field `runtime_name`.
    pub fn alias(mut self, schema_name: &'static str, runtime_name: &'static str) -> Self {
        self.inner.aliases.insert(schema_name, runtime_name);
        self
    }

    #[inline]
    pub fn build(self) -> RuntimeType {
        self.inner
    }
}

// -----------------------------------------------------------------------------
// Tests
