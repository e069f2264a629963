//! Gateway replies
//!
//! The gateway answers with a flat JSON object whose field order carries
//! meaning for display. A [`Reply`] keeps the fields as a list of pairs in the
//! order the server sent them.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;
use std::fmt;

use crate::error::ProtocolError;

/// Field name used for client-side error replies
pub const ERROR_FIELD: &str = "error";

/// An ordered JSON object returned by the gateway
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    fields: Vec<(String, Value)>,
}

impl Reply {
    /// Decode a reply body
    pub fn from_slice(body: &[u8]) -> Result<Self, ProtocolError> {
        // A type mismatch means well-formed JSON that is not an object.
        let mut de = serde_json::Deserializer::from_slice(body);
        match Reply::deserialize(&mut de) {
            Ok(reply) => {
                de.end()?;
                Ok(reply)
            }
            Err(e) if e.is_data() => {
                let value: Value = serde_json::from_slice(body)?;
                Err(ProtocolError::NotAnObject(json_kind(&value)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Build the single-field `{"error": message}` reply
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            fields: vec![(ERROR_FIELD.to_string(), Value::String(message.into()))],
        }
    }

    /// Look up a field by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Whether this reply carries an `error` field
    pub fn is_error(&self) -> bool {
        self.get(ERROR_FIELD).is_some()
    }

    /// Iterate fields in server order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the reply has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'de> Deserialize<'de> for Reply {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ReplyVisitor;

        impl<'de> Visitor<'de> for ReplyVisitor {
            type Value = Reply;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Reply, A::Error> {
                let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    fields.push((key, value));
                }
                Ok(Reply { fields })
            }
        }

        deserializer.deserialize_map(ReplyVisitor)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
