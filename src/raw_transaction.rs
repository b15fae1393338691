//! Lenient typed view over the transaction JSON returned by the Aptos REST API.
//!
//! Every field is optional. A field with an unexpected shape is treated as absent
//! instead of failing the whole record, so the only hard requirement is that the
//! record itself is a JSON object.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ExplainError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransaction {
    #[serde(default, deserialize_with = "lenient")]
    pub hash: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub gas_used: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub gas_unit_price: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub version: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub block_height: Option<u64>,
    /// Seconds since the epoch
    #[serde(default, deserialize_with = "lenient_u64")]
    pub timestamp: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub sender: Option<String>,
    #[serde(default)]
    pub vm_status: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub payload: Option<RawPayload>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub changes: Vec<RawChange>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub events: Vec<RawEvent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub function: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub arguments: Vec<Value>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub type_arguments: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChange {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub sequence_number: Option<u64>,
    #[serde(default)]
    pub data: Value,
}

impl RawChange {
    /// Sequence number carried on the change itself, or inside an
    /// `0x1::account::Account` resource write.
    pub fn sequence_number(&self) -> Option<u64> {
        if self.sequence_number.is_some() {
            return self.sequence_number;
        }

        let resource_type = self.data.get("type").and_then(Value::as_str)?;
        if !resource_type.ends_with("::account::Account") {
            return None;
        }
        self.data
            .get("data")
            .and_then(|inner| inner.get("sequence_number"))
            .and_then(as_u64)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl RawEvent {
    pub fn event_type(&self) -> &str {
        self.kind.as_deref().unwrap_or_default()
    }

    // Non-empty string field of the event payload
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Raw `amount` in minor units. `None` when missing or not a non-negative integer.
    pub fn amount(&self) -> Option<u128> {
        self.data.get("amount").and_then(as_amount)
    }
}

impl RawTransaction {
    /// Validate the gross shape of a fetched record and read it.
    pub fn from_value(value: Value) -> Result<Self, ExplainError> {
        if !value.is_object() {
            return Err(ExplainError::MalformedTransaction(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        }

        serde_json::from_value(value).map_err(|e| ExplainError::MalformedTransaction(e.to_string()))
    }
}

/// Integer from a JSON number or a decimal string (the REST API encodes u64 as strings).
pub fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_amount(value: &Value) -> Option<u128> {
    match value {
        Value::Number(n) => n.as_u64().map(u128::from),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
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

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_u64(&value))
}

// Non-array values become empty lists, unreadable elements are dropped
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_non_object_records() {
        assert!(matches!(
            RawTransaction::from_value(json!([1, 2, 3])),
            Err(ExplainError::MalformedTransaction(_))
        ));
        assert!(RawTransaction::from_value(json!("0xabc")).is_err());
        assert!(RawTransaction::from_value(Value::Null).is_err());
    }

    #[test]
    fn test_empty_object_reads_as_all_absent() {
        let raw = RawTransaction::from_value(json!({})).unwrap();
        assert!(raw.hash.is_none());
        assert!(raw.payload.is_none());
        assert!(raw.changes.is_empty());
        assert!(raw.events.is_empty());
    }

    #[test]
    fn test_string_encoded_integers() {
        let raw = RawTransaction::from_value(json!({
            "gas_used": "1000",
            "gas_unit_price": 100,
            "version": "123456789",
            "block_height": "42",
            "timestamp": "1700000000"
        }))
        .unwrap();

        assert_eq!(raw.gas_used, Some(1000));
        assert_eq!(raw.gas_unit_price, Some(100));
        assert_eq!(raw.version, Some(123_456_789));
        assert_eq!(raw.block_height, Some(42));
        assert_eq!(raw.timestamp, Some(1_700_000_000));
    }

    #[test]
    fn test_wrong_shaped_fields_become_absent() {
        let raw = RawTransaction::from_value(json!({
            "hash": 17,
            "gas_used": "lots",
            "payload": "not a payload",
            "changes": {"type": "write_resource"},
            "events": [42, {"type": "0x1::coin::CoinDeposited", "data": {"amount": "5"}}]
        }))
        .unwrap();

        assert!(raw.hash.is_none());
        assert!(raw.gas_used.is_none());
        assert!(raw.payload.is_none());
        assert!(raw.changes.is_empty());
        assert_eq!(raw.events.len(), 1);
        assert_eq!(raw.events[0].amount(), Some(5));
    }

    #[test]
    fn test_non_numeric_amount_is_none() {
        let event: RawEvent = serde_json::from_value(json!({
            "type": "0x1::coin::CoinWithdrawn",
            "data": {"amount": "twelve"}
        }))
        .unwrap();
        assert_eq!(event.amount(), None);

        let fractional: RawEvent = serde_json::from_value(json!({
            "type": "0x1::coin::CoinWithdrawn",
            "data": {"amount": "1.5"}
        }))
        .unwrap();
        assert_eq!(fractional.amount(), None);
    }

    #[test]
    fn test_sequence_number_from_account_resource() {
        let change: RawChange = serde_json::from_value(json!({
            "type": "write_resource",
            "address": "0xa11ce",
            "data": {
                "type": "0x1::account::Account",
                "data": {"sequence_number": "7"}
            }
        }))
        .unwrap();
        assert_eq!(change.sequence_number(), Some(7));

        let coin_store: RawChange = serde_json::from_value(json!({
            "type": "write_resource",
            "address": "0xa11ce",
            "data": {
                "type": "0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>",
                "data": {"sequence_number": "7"}
            }
        }))
        .unwrap();
        assert_eq!(coin_store.sequence_number(), None);
    }
}
