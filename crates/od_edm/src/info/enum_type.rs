use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::info::EdmTypeRef;

// -----------------------------------------------------------------------------
// EnumType

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    name: Arc<str>,
    value: i64,
}

impl EnumMember {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }
}

/// An enum type definition.
///
/// # Examples
///
/// ```
/// use od_edm::info::EnumType;
///
/// let color = EnumType::new("NS.Color")
///     .with_member("Red", 1)
///     .with_member("Blue", 2);
///
/// assert_eq!(color.member("Blue").map(|m| m.value()), Some(2));
/// assert_eq!(color.member_by_value(1).map(|m| m.name()), Some("Red"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    full_name: Arc<str>,
    members: Vec<EnumMember>,
    is_flags: bool,
}

impl EnumType {
    pub fn new(full_name: impl Into<Arc<str>>) -> Self {
        Self {
            full_name: full_name.into(),
            members: Vec::new(),
            is_flags: false,
        }
    }

    pub fn with_member(mut self, name: impl Into<Arc<str>>, value: i64) -> Self {
        self.members.push(EnumMember {
            name: name.into(),
            value,
        });
        self
    }

    /// Allows comma-separated combinations of members.
    #[inline]
    pub fn with_flags(mut self, is_flags: bool) -> Self {
        self.is_flags = is_flags;
        self
    }

    #[inline]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[inline]
    pub fn is_flags(&self) -> bool {
        self.is_flags
    }

    #[inline]
    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| &*m.name == name)
    }

    pub fn member_by_value(&self, value: i64) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.value == value)
    }

    pub fn type_ref(&self) -> EdmTypeRef {
        EdmTypeRef::enumeration(self.full_name.clone())
    }
}
