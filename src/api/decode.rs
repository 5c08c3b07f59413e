/// Response body decoding
///
/// The backend sometimes returns its JSON payload encoded a second time as
/// a JSON string. Every call site goes through `decode_body`, so dropping
/// the second pass only touches this file.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::error;

use super::error::ApiError;

/// Parse a response body, unwrapping one level of string-encoded JSON.
pub fn decode_body(text: &str) -> Result<Value, ApiError> {
    let value: Value = serde_json::from_str(text).map_err(|e| {
        error!(body = text, "Failed to parse API response JSON: {}", e);
        ApiError::InvalidResponse
    })?;

    match value {
        Value::String(inner) => match serde_json::from_str::<Value>(&inner) {
            Ok(decoded) => Ok(decoded),
            // A plain string payload, not double-encoded JSON
            Err(_) => Ok(Value::String(inner)),
        },
        other => Ok(other),
    }
}

/// Decode a body straight into a typed response.
pub fn decode_as<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let value = decode_body(text)?;
    serde_json::from_value(value).map_err(|e| {
        error!(body = text, "API response has an unexpected shape: {}", e);
        ApiError::InvalidResponse
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_object() {
        let value = decode_body(r#"{"message":"ok"}"#).unwrap();
        assert_eq!(value, json!({ "message": "ok" }));
    }

    #[test]
    fn test_double_encoded_object() {
        let inner = json!({ "name": "Mona", "ID": "2980101" }).to_string();
        let outer = serde_json::to_string(&inner).unwrap();

        let value = decode_body(&outer).unwrap();
        assert_eq!(value["ID"], "2980101");
    }

    #[test]
    fn test_plain_string_stays_a_string() {
        let value = decode_body(r#""Data saved successfully""#).unwrap();
        assert_eq!(value, Value::String("Data saved successfully".into()));
    }

    #[test]
    fn test_only_one_extra_pass() {
        let once = serde_json::to_string(&json!({ "a": 1 }).to_string()).unwrap();
        let twice = serde_json::to_string(&once).unwrap();

        let value = decode_body(&twice).unwrap();
        assert!(value.is_string());
    }

    #[test]
    fn test_garbage_is_invalid_response() {
        let err = decode_body("<html>oops</html>").unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse));
    }

    #[test]
    fn test_wrong_shape_is_invalid_response() {
        #[derive(serde::Deserialize, Debug)]
        struct Needs {
            #[allow(dead_code)]
            image: String,
        }

        let err = decode_as::<Needs>(r#"{"face":"x"}"#).unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse));
    }
}
