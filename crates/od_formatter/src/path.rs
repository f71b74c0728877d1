//! The request path a payload is read for.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use od_edm::registry::{EdmModel, NavigationSource};

// -----------------------------------------------------------------------------
// PathSegment

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    EntitySet(Arc<str>),
    Singleton(Arc<str>),
    /// A key literal, e.g. the `1` of `Products(1)`.
    Key(String),
    Navigation(Arc<str>),
    /// A bound or unbound action, by full name.
    Action(Arc<str>),
}

// -----------------------------------------------------------------------------
// ODataPath

/// The resource path of a request.
///
/// # Examples
///
/// ```
/// use od_edm::info::{EdmTypeRef, StructuredType};
/// use od_edm::registry::EdmModel;
/// use od_formatter::path::ODataPath;
///
/// let mut model = EdmModel::new();
/// model.add_structured_type(
///     StructuredType::entity("NS.Product")
///         .with_navigation("Category", EdmTypeRef::entity("NS.Category")),
/// );
/// model.add_structured_type(StructuredType::entity("NS.Category"));
/// model.add_entity_set("Products", "NS.Product");
///
/// let path = ODataPath::entity_set("Products").with_key("1").with_navigation("Category");
/// assert_eq!(path.to_string(), "Products(1)/Category");
///
/// let source = path.navigation_source(&model).unwrap();
/// assert_eq!(source.entity_type_name(), "NS.Category");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ODataPath {
    segments: Vec<PathSegment>,
}

impl ODataPath {
    #[inline]
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn entity_set(name: impl Into<Arc<str>>) -> Self {
        Self::new(alloc::vec![PathSegment::EntitySet(name.into())])
    }

    pub fn singleton(name: impl Into<Arc<str>>) -> Self {
        Self::new(alloc::vec![PathSegment::Singleton(name.into())])
    }

    /// An unbound action import.
    pub fn action(name: impl Into<Arc<str>>) -> Self {
        Self::new(alloc::vec![PathSegment::Action(name.into())])
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Key(key.into()));
        self
    }

    pub fn with_navigation(mut self, property: impl Into<Arc<str>>) -> Self {
        self.segments.push(PathSegment::Navigation(property.into()));
        self
    }

    pub fn with_action(mut self, name: impl Into<Arc<str>>) -> Self {
        self.segments.push(PathSegment::Action(name.into()));
        self
    }

    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// The entity set or singleton the path ends in.
    ///
    /// Navigation segments move to the target entity type of the navigation
    /// property. Keys and actions do not change the source.
    pub fn navigation_source(&self, model: &EdmModel) -> Option<NavigationSource> {
        let mut current: Option<NavigationSource> = None;
        for segment in &self.segments {
            match segment {
                PathSegment::EntitySet(name) | PathSegment::Singleton(name) => {
                    current = model.find_navigation_source(name).cloned();
                }
                PathSegment::Navigation(property) => {
                    let source = current.as_ref()?;
                    let target = model
                        .find_property(source.entity_type_name(), property)?
                        .type_ref()
                        .as_element()
                        .structured_name()?;
                    current = Some(NavigationSource::entity_set(property.clone(), target));
                }
                PathSegment::Key(_) | PathSegment::Action(_) => {}
            }
        }
        current
    }

    /// Full name of the last action segment.
    pub fn action_name(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|segment| match segment {
            PathSegment::Action(name) => Some(&**name),
            _ => None,
        })
    }
}

impl fmt::Display for ODataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => write!(f, "({key})")?,
                PathSegment::EntitySet(name)
                | PathSegment::Singleton(name)
                | PathSegment::Navigation(name)
                | PathSegment::Action(name) => {
                    if !first {
                        f.write_str("/")?;
                    }
                    f.write_str(name)?;
                }
            }
            first = false;
        }
        Ok(())
    }
}
