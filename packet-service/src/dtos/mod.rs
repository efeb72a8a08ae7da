//! Request and response payloads for the packet endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Incoming description of observed network traffic.
///
/// Fields may arrive as JSON numbers, strings or anything else the caller
/// sends; absent fields deserialize to `Null` and fail the presence check.
#[derive(Debug, Clone, Deserialize)]
pub struct PacketDescriptor {
    #[serde(default)]
    pub packet_size: Value,
    #[serde(default)]
    pub packet_rate: Value,
    #[serde(default)]
    pub protocol_type: Value,
    #[serde(default)]
    pub connection_state: Value,
    #[serde(default)]
    pub payload_pattern: Value,
}

impl PacketDescriptor {
    /// True when all five fields are present and truthy.
    pub fn is_complete(&self) -> bool {
        self.fields().into_iter().all(is_truthy)
    }

    /// The prompt forwarded to the model, in its exact literal form.
    pub fn prompt(&self) -> String {
        format!(
            "REQUEST CHECK: packet_size = {}, packet_rate = {}, protocol_type = {}, connection_state = {}, payload_pattern = {}",
            display_value(&self.packet_size),
            display_value(&self.packet_rate),
            display_value(&self.protocol_type),
            display_value(&self.connection_state),
            display_value(&self.payload_pattern),
        )
    }

    fn fields(&self) -> [&Value; 5] {
        [
            &self.packet_size,
            &self.packet_rate,
            &self.protocol_type,
            &self.connection_state,
            &self.payload_pattern,
        ]
    }
}

/// Presence check for descriptor fields: `null`, `false`, numeric zero and
/// empty strings, arrays and objects all count as missing. The string "0"
/// is non-empty and therefore passes.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Template substitution: strings appear bare, every other value in its
/// canonical JSON form.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Wire envelope returned by the packet endpoint.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub status: ResponseStatus,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptor(value: Value) -> PacketDescriptor {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn prompt_matches_the_literal_template() {
        let packet = descriptor(json!({
            "packet_size": 100,
            "packet_rate": 5,
            "protocol_type": "TCP",
            "connection_state": "ESTABLISHED",
            "payload_pattern": "random"
        }));

        assert_eq!(
            packet.prompt(),
            "REQUEST CHECK: packet_size = 100, packet_rate = 5, protocol_type = TCP, \
             connection_state = ESTABLISHED, payload_pattern = random"
        );
    }

    #[test]
    fn string_numbers_render_without_quotes() {
        let packet = descriptor(json!({
            "packet_size": "100",
            "packet_rate": 5,
            "protocol_type": "TCP",
            "connection_state": "ESTABLISHED",
            "payload_pattern": "random"
        }));

        assert!(packet.prompt().starts_with("REQUEST CHECK: packet_size = 100,"));
    }

    #[test]
    fn missing_fields_deserialize_to_null() {
        let packet = descriptor(json!({ "packet_size": 100 }));

        assert_eq!(packet.packet_rate, Value::Null);
        assert!(!packet.is_complete());
    }

    #[test]
    fn truthiness_follows_emptiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));

        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(42)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!("TCP")));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!(["a"])));
    }

    #[test]
    fn any_falsy_field_makes_the_descriptor_incomplete() {
        let packet = descriptor(json!({
            "packet_size": 100,
            "packet_rate": 0,
            "protocol_type": "TCP",
            "connection_state": "ESTABLISHED",
            "payload_pattern": "random"
        }));

        assert!(!packet.is_complete());
    }

    #[test]
    fn complete_descriptor_passes_the_presence_check() {
        let packet = descriptor(json!({
            "packet_size": 100,
            "packet_rate": 5,
            "protocol_type": "TCP",
            "connection_state": "ESTABLISHED",
            "payload_pattern": "random"
        }));

        assert!(packet.is_complete());
    }
}
