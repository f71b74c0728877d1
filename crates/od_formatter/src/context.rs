use alloc::borrow::Cow;
use alloc::sync::Arc;

use od_edm::registry::EdmModel;

use crate::DeserializeError;
use crate::path::ODataPath;

// -----------------------------------------------------------------------------
// ReadMode

/// What kind of container a read materializes into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReadMode {
    /// Instances of the mapped runtime types.
    #[default]
    Typed,
    /// [`Delta`](od_edm::value::Delta) wrappers for partial updates.
    Delta,
    /// [`EdmObject`](od_edm::value::EdmObject)s, no runtime types involved.
    Typeless,
}

// -----------------------------------------------------------------------------
// ReadContext

/// The model, path and mode of one read.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use od_edm::registry::EdmModel;
/// use od_formatter::path::ODataPath;
/// use od_formatter::{ReadContext, ReadMode};
///
/// let ctx = ReadContext::new()
///     .with_model(Arc::new(EdmModel::new()))
///     .with_path(ODataPath::entity_set("Products"))
///     .with_mode(ReadMode::Delta);
///
/// assert!(ctx.require_model().is_ok());
/// assert_eq!(ctx.nested().mode(), ReadMode::Typed);
/// assert!(ReadContext::new().require_model().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReadContext {
    model: Option<Arc<EdmModel>>,
    path: Option<ODataPath>,
    mode: ReadMode,
}

impl ReadContext {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: Arc<EdmModel>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_path(mut self, path: ODataPath) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_mode(mut self, mode: ReadMode) -> Self {
        self.mode = mode;
        self
    }

    #[inline]
    pub fn model(&self) -> Option<&EdmModel> {
        self.model.as_deref()
    }

    /// The model, or `ArgumentInvalid` if none was supplied.
    pub fn require_model(&self) -> Result<&EdmModel, DeserializeError> {
        self.model().ok_or_else(DeserializeError::missing_model)
    }

    #[inline]
    pub fn path(&self) -> Option<&ODataPath> {
        self.path.as_ref()
    }

    #[inline]
    pub fn mode(&self) -> ReadMode {
        self.mode
    }

    #[inline]
    pub fn is_delta(&self) -> bool {
        self.mode == ReadMode::Delta
    }

    #[inline]
    pub fn is_typeless(&self) -> bool {
        self.mode == ReadMode::Typeless
    }

    /// The context for resources nested in the one being read.
    ///
    /// Nested resources of a partial update are read in full, the delta
    /// marks the whole nested property as changed.
    pub fn nested(&self) -> Cow<'_, ReadContext> {
        match self.mode {
            ReadMode::Delta => Cow::Owned(self.clone().with_mode(ReadMode::Typed)),
            ReadMode::Typed | ReadMode::Typeless => Cow::Borrowed(self),
        }
    }
}
