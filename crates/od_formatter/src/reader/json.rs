use alloc::string::ToString;

use serde_core::de::DeserializeSeed;

use crate::DeserializeError;
use crate::reader::{PayloadReader, ResourceItemSeed};
use crate::tree::ResourceItem;

/// Reads JSON payloads with `serde_json`.
///
/// ```
/// use od_formatter::reader::{JsonPayloadReader, PayloadReader};
/// use od_formatter::tree::ResourceItem;
///
/// let item = JsonPayloadReader.read_payload(br##"{"@odata.type": "#NS.Tag"}"##).unwrap();
/// let ResourceItem::Resource(node) = item else { panic!() };
/// assert_eq!(node.type_name.as_deref(), Some("NS.Tag"));
///
/// assert!(JsonPayloadReader.read_payload(b"{} trailing").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPayloadReader;

impl PayloadReader for JsonPayloadReader {
    fn read_payload(&self, bytes: &[u8]) -> Result<ResourceItem, DeserializeError> {
        let mut de = serde_json::Deserializer::from_slice(bytes);
        let item = ResourceItemSeed
            .deserialize(&mut de)
            .map_err(|e| DeserializeError::Payload(e.to_string()))?;
        de.end()
            .map_err(|e| DeserializeError::Payload(e.to_string()))?;
        Ok(item)
    }
}
