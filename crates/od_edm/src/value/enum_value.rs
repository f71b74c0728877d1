use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

// -----------------------------------------------------------------------------
// EdmEnumValue

/// An enum member, or a comma-separated member list for flags enums.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdmEnumValue {
    type_name: Arc<str>,
    value: String,
}

impl EdmEnumValue {
    pub fn new(type_name: impl Into<Arc<str>>, value: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            value: value.into(),
        }
    }

    /// Full name of the enum type.
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for EdmEnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'{}'", self.type_name, self.value)
    }
}
