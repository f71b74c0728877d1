use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;

use od_edm::info::EdmTypeRef;
use od_edm::value::{Resource, Value};
use od_utils::OrderedMap;

use crate::de::resource::{read_nested_value, read_property_value};
use crate::de::{DeserializerProvider, EdmTypeDeserializer, PayloadKind};
use crate::tree::{NestedResourceInfo, PropertyNode, ResourceItem};
use crate::{DeserializeError, ReadContext};

// -----------------------------------------------------------------------------
// Parameter bags

macro_rules! impl_parameter_bag {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name {
            action: Option<Arc<str>>,
            parameters: OrderedMap<Value>,
        }

        impl $name {
            /// Full name of the action the parameters were read for.
            #[inline]
            pub fn action_name(&self) -> Option<&str> {
                self.action.as_deref()
            }

            #[inline]
            pub fn get(&self, name: &str) -> Option<&Value> {
                self.parameters.get(name)
            }

            /// Removes a parameter to take ownership of its value.
            #[inline]
            pub fn take(&mut self, name: &str) -> Option<Value> {
                self.parameters.remove(name)
            }

            #[inline]
            pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
                self.parameters.insert(name, value)
            }

            /// Parameters in payload order.
            #[inline]
            pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
                self.parameters.iter()
            }

            #[inline]
            pub fn len(&self) -> usize {
                self.parameters.len()
            }

            #[inline]
            pub fn is_empty(&self) -> bool {
                self.parameters.is_empty()
            }
        }

        impl Resource for $name {}
    };
}

impl_parameter_bag! {
    /// Action parameters read into runtime types.
    ActionParameters
}

impl_parameter_bag! {
    /// Action parameters read in typeless mode. Structured parameters are
    /// [`EdmObject`](od_edm::value::EdmObject)s.
    UntypedActionParameters
}

// -----------------------------------------------------------------------------
// ActionPayloadDeserializer

/// Reads the parameter object of an action request.
///
/// The action is named by the last action segment of the request path and
/// looked up in the model. Each parameter is read with its declared type.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use od_edm::info::{EdmAction, EdmTypeRef, PrimitiveKind};
/// use od_edm::registry::EdmModel;
/// use od_edm::value::{PrimitiveValue, Value};
/// use od_formatter::ReadContext;
/// use od_formatter::de::{ActionParameters, ActionPayloadDeserializer, DeserializerProvider, EdmTypeDeserializer};
/// use od_formatter::path::ODataPath;
/// use od_formatter::tree::ResourceNode;
///
/// let mut model = EdmModel::new();
/// model.add_action(
///     EdmAction::new("NS.Rate").with_parameter("Rating", EdmTypeRef::primitive(PrimitiveKind::Int32)),
/// );
/// let ctx = ReadContext::new()
///     .with_model(Arc::new(model))
///     .with_path(ODataPath::action("NS.Rate"));
///
/// let payload = ResourceNode::new().with_property("Rating", PrimitiveValue::from(5));
/// let value = ActionPayloadDeserializer
///     .read_inline(payload.into(), &EdmTypeRef::untyped(), &DeserializerProvider::new(), &ctx)
///     .unwrap();
///
/// let parameters = value.into_resource::<ActionParameters>().unwrap();
/// assert_eq!(parameters.action_name(), Some("NS.Rate"));
/// assert_eq!(parameters.get("Rating"), Some(&Value::from(5)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionPayloadDeserializer;

impl EdmTypeDeserializer for ActionPayloadDeserializer {
    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::Parameter
    }

    fn read_inline(
        &self,
        item: ResourceItem,
        _edm_type: &EdmTypeRef,
        provider: &DeserializerProvider,
        ctx: &ReadContext,
    ) -> Result<Value, DeserializeError> {
        let model = ctx.require_model()?;
        let path = ctx.path().ok_or_else(DeserializeError::missing_path)?;
        let Some(action_name) = path.action_name() else {
            return Err(DeserializeError::argument(
                "path",
                format!("The request path '{path}' does not end in an action."),
            ));
        };
        let Some(action) = model.find_action(action_name) else {
            return Err(DeserializeError::schema(format!(
                "Cannot find the action '{action_name}' in the model."
            )));
        };
        let node = match item {
            ResourceItem::Resource(node) => node,
            other => {
                return Err(DeserializeError::argument(
                    "item",
                    format!(
                        "The argument must be of type 'ODataParameterReader', found a {}.",
                        other.kind_name()
                    ),
                ));
            }
        };

        let unknown = |name: &str| {
            DeserializeError::schema(format!(
                "The parameter '{name}' is not defined for the action '{action_name}'."
            ))
        };
        let nested_ctx = ctx.nested();
        let mut parameters = OrderedMap::with_capacity(node.properties.len() + node.nested.len());

        for PropertyNode { name, value } in node.properties {
            let parameter = action.parameter(&name).ok_or_else(|| unknown(&name))?;
            let value = read_property_value(value, parameter.type_ref(), provider, &nested_ctx)?;
            parameters.insert(name, value);
        }
        for NestedResourceInfo {
            name,
            is_collection,
            items,
        } in node.nested
        {
            let parameter = action.parameter(&name).ok_or_else(|| unknown(&name))?;
            let value = read_nested_value(&name, parameter.type_ref(), is_collection, items, provider, &nested_ctx)?;
            parameters.insert(name, value);
        }

        let action = Some(Arc::from(action_name));
        Ok(if ctx.is_typeless() {
            Value::Resource(Box::new(UntypedActionParameters { action, parameters }))
        } else {
            Value::Resource(Box::new(ActionParameters { action, parameters }))
        })
    }
}

// -----------------------------------------------------------------------------
// Tests
