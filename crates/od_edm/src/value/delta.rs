use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::value::Resource;

// -----------------------------------------------------------------------------
// Delta

/// A partial update of a `T`.
///
/// Wraps a freshly constructed instance and records which of the updatable
/// properties were assigned by the payload.
///
/// # Examples
///
/// ```
/// use od_edm::value::{Delta, Resource};
///
/// #[derive(Debug, Default)]
/// struct Product {
///     name: String,
/// }
///
/// impl Resource for Product {}
///
/// let mut delta = Delta::<Product>::new(["ID", "Name", "Price"]);
/// delta.instance_mut().name = String::from("Bread");
/// delta.mark_changed("Name");
///
/// assert!(delta.is_changed("Name"));
/// assert_eq!(delta.changed_property_names(), ["Name"]);
/// assert_eq!(delta.unchanged_property_names(), ["ID", "Price"]);
/// ```
pub struct Delta<T> {
    instance: T,
    updatable: Vec<Arc<str>>,
    changed: Vec<Arc<str>>,
}

impl<T: Default> Delta<T> {
    /// Wraps a default `T` that allows updates to `updatable`.
    pub fn new<I, S>(updatable: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self {
            instance: T::default(),
            updatable: updatable.into_iter().map(Into::into).collect(),
            changed: Vec::new(),
        }
    }
}

impl<T> Delta<T> {
    #[inline]
    pub fn instance(&self) -> &T {
        &self.instance
    }

    #[inline]
    pub fn instance_mut(&mut self) -> &mut T {
        &mut self.instance
    }

    #[inline]
    pub fn into_instance(self) -> T {
        self.instance
    }

    pub fn updatable_property_names(&self) -> impl Iterator<Item = &str> {
        self.updatable.iter().map(|name| &**name)
    }

    /// Changed properties in assignment order.
    pub fn changed_property_names(&self) -> Vec<&str> {
        self.changed.iter().map(|name| &**name).collect()
    }

    /// Updatable properties that were not assigned.
    pub fn unchanged_property_names(&self) -> Vec<&str> {
        self.updatable
            .iter()
            .filter(|name| !self.changed.contains(*name))
            .map(|name| &**name)
            .collect()
    }

    pub fn is_changed(&self, name: &str) -> bool {
        self.changed.iter().any(|changed| &**changed == name)
    }

    /// Records `name` as changed. Repeated marks are ignored.
    pub fn mark_changed(&mut self, name: &str) {
        if !self.is_changed(name) {
            self.changed.push(Arc::from(name));
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Delta<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delta")
            .field("instance", &self.instance)
            .field("changed", &self.changed)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// DeltaResource

/// Type-erased access to a [`Delta`].
pub trait DeltaResource: Any + Send + Sync + fmt::Debug {
    fn instance(&self) -> &dyn Resource;

    fn instance_mut(&mut self) -> &mut dyn Resource;

    fn mark_changed(&mut self, name: &str);

    fn changed_property_names(&self) -> Vec<&str>;

    fn unchanged_property_names(&self) -> Vec<&str>;
}

impl<T: Resource> DeltaResource for Delta<T> {
    #[inline]
    fn instance(&self) -> &dyn Resource {
        &self.instance
    }

    #[inline]
    fn instance_mut(&mut self) -> &mut dyn Resource {
        &mut self.instance
    }

    #[inline]
    fn mark_changed(&mut self, name: &str) {
        Delta::mark_changed(self, name);
    }

    #[inline]
    fn changed_property_names(&self) -> Vec<&str> {
        Delta::changed_property_names(self)
    }

    #[inline]
    fn unchanged_property_names(&self) -> Vec<&str> {
        Delta::unchanged_property_names(self)
    }
}

impl dyn DeltaResource {
    /// Returns `true` if this is a `Delta<T>`.
    #[inline]
    pub fn is<T: Resource>(&self) -> bool {
        <dyn Any>::is::<Delta<T>>(self)
    }

    #[inline]
    pub fn downcast_ref<T: Resource>(&self) -> Option<&Delta<T>> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Resource>(&mut self) -> Option<&mut Delta<T>> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts and unboxes to `Delta<T>`, handing the box back on mismatch.
    pub fn take<T: Resource>(self: Box<dyn DeltaResource>) -> Result<Delta<T>, Box<dyn DeltaResource>> {
        if self.is::<T>() {
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { *<Box<dyn Any>>::downcast::<Delta<T>>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
