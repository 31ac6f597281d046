use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::SchemaError;

/// Deserialize with JSON-path context in error messages.
pub fn from_value_with_path<T: DeserializeOwned>(value: Value) -> Result<T, SchemaError> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| SchemaError::Decode {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

/// Same as [`from_value_with_path`], starting from JSON text (schema files).
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, SchemaError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| SchemaError::Decode {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}
