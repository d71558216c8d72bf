//! Typed access to tool call arguments.

use crate::error::MemohError;

/// Wrapper around tool call arguments providing typed extraction.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, MemohError> {
        self.value
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| MemohError::InvalidArgument(format!("Missing string argument: {key}")))
    }

    /// Deserialize the entire arguments into a typed struct.
    ///
    /// Models sometimes send arguments as a JSON-encoded string; that form is
    /// accepted too.
    pub fn deserialize<T: serde::de::DeserializeOwned>(&self) -> Result<T, MemohError> {
        let value = match &self.value {
            serde_json::Value::String(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    serde_json::json!({})
                } else {
                    serde_json::from_str::<serde_json::Value>(trimmed).map_err(|e| {
                        MemohError::InvalidArgument(format!("Failed to deserialize arguments: {e}"))
                    })?
                }
            }
            other => other.clone(),
        };
        serde_json::from_value(value).map_err(|e| {
            MemohError::InvalidArgument(format!("Failed to deserialize arguments: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Query {
        name: String,
        query: String,
    }

    #[test]
    fn get_str_reports_missing_key() {
        let args = ToolArguments::new(serde_json::json!({"name": "scout"}));
        assert_eq!(args.get_str("name").unwrap(), "scout");
        assert!(matches!(
            args.get_str("query"),
            Err(MemohError::InvalidArgument(_))
        ));
    }

    #[test]
    fn deserialize_accepts_string_encoded_arguments() {
        let args = ToolArguments::new(serde_json::json!(
            "{\"name\":\"scout\",\"query\":\"find it\"}"
        ));
        let parsed: Query = args.deserialize().unwrap();
        assert_eq!(
            parsed,
            Query {
                name: "scout".into(),
                query: "find it".into()
            }
        );
    }
}
