//! Lenient decoding of sensor payloads into records
//!
//! A payload is a JSON object carrying an optional array of vibration
//! values and an optional temperature reading under two named fields.
//! Decoding is deliberately forgiving: a wrong-typed or missing field is
//! dropped, not escalated, so one bad publisher cannot stall the feed.

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("payload carries neither vibration nor temperature data")]
    NoUsableFields,
}

/// One decoded message: vibration samples and/or a temperature reading
#[derive(Debug, Clone, PartialEq)]
pub struct SensorRecord {
    /// Vibration samples in publication order, empty when the field was
    /// absent or not an array
    pub vibration: Vec<f64>,

    /// Temperature reading, `None` when absent or not numeric
    pub temperature: Option<f64>,
}

impl SensorRecord {
    pub fn has_vibration(&self) -> bool {
        !self.vibration.is_empty()
    }
}

/// Decoder bound to the deployment's payload field names
#[derive(Debug, Clone)]
pub struct RecordDecoder {
    vibration_field: String,
    temperature_field: String,
}

impl Default for RecordDecoder {
    fn default() -> Self {
        Self {
            vibration_field: "AccelZ".to_string(),
            temperature_field: "Temperature".to_string(),
        }
    }
}

impl RecordDecoder {
    pub fn new(vibration_field: &str, temperature_field: &str) -> Self {
        Self {
            vibration_field: vibration_field.to_string(),
            temperature_field: temperature_field.to_string(),
        }
    }

    /// Decode a raw payload
    ///
    /// Errors only when the payload as a whole is unusable (not JSON, not
    /// an object, or carrying neither field in a usable form). Individual
    /// non-numeric array elements are skipped and logged, never fatal.
    pub fn decode(&self, payload: &[u8]) -> Result<SensorRecord, DecodeError> {
        let value: Value = serde_json::from_slice(payload)
            .map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
        self.decode_value(&value)
    }

    /// Decode an already-parsed JSON value
    pub fn decode_value(&self, value: &Value) -> Result<SensorRecord, DecodeError> {
        let object = value.as_object().ok_or(DecodeError::NotAnObject)?;

        let vibration = match object.get(&self.vibration_field) {
            Some(Value::Array(entries)) => {
                let mut samples = Vec::with_capacity(entries.len());
                let mut skipped = 0usize;
                for entry in entries {
                    match entry.as_f64() {
                        Some(v) => samples.push(v),
                        None => skipped += 1,
                    }
                }
                if skipped > 0 {
                    log::warn!(
                        "dropped {} non-numeric entries from '{}' array",
                        skipped,
                        self.vibration_field
                    );
                }
                samples
            }
            Some(other) => {
                log::warn!(
                    "field '{}' is not an array (got {}), ignoring",
                    self.vibration_field,
                    json_type_name(other)
                );
                Vec::new()
            }
            None => Vec::new(),
        };

        let temperature = match object.get(&self.temperature_field) {
            Some(value) => {
                let temp = value.as_f64();
                if temp.is_none() {
                    log::warn!(
                        "field '{}' is not numeric (got {}), ignoring",
                        self.temperature_field,
                        json_type_name(value)
                    );
                }
                temp
            }
            None => None,
        };

        if vibration.is_empty() && temperature.is_none() {
            return Err(DecodeError::NoUsableFields);
        }

        Ok(SensorRecord {
            vibration,
            temperature,
        })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
