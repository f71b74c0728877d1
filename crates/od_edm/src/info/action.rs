use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::info::EdmTypeRef;

// -----------------------------------------------------------------------------
// EdmAction

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdmParameter {
    name: Arc<str>,
    type_ref: EdmTypeRef,
}

impl EdmParameter {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn type_ref(&self) -> &EdmTypeRef {
        &self.type_ref
    }
}

/// An action and the parameters its request body carries.
///
/// For bound actions the binding parameter comes from the URL, so it is not
/// listed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdmAction {
    full_name: Arc<str>,
    parameters: Vec<EdmParameter>,
}

impl EdmAction {
    pub fn new(full_name: impl Into<Arc<str>>) -> Self {
        Self {
            full_name: full_name.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<Arc<str>>, type_ref: EdmTypeRef) -> Self {
        self.parameters.push(EdmParameter {
            name: name.into(),
            type_ref,
        });
        self
    }

    #[inline]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[inline]
    pub fn parameters(&self) -> &[EdmParameter] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&EdmParameter> {
        self.parameters.iter().find(|p| &*p.name == name)
    }
}
