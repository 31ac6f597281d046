use thiserror::Error;

/// Errors raised by the schema registry and the builders it hands out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema \"{0}\" already registered")]
    DuplicateSchema(String),

    #[error("schema \"{0}\" not registered")]
    UnknownSchema(String),

    #[error("invalid schema name: {0:?}")]
    InvalidName(String),

    #[error("schema \"{schema}\" declares field \"{key}\" more than once")]
    DuplicateField { schema: String, key: String },

    #[error("schema \"{schema}\" has no field \"{key}\"")]
    UndeclaredField { schema: String, key: String },

    #[error("builder for schema \"{actual}\" cannot be viewed as schema \"{expected}\"")]
    SchemaMismatch { expected: String, actual: String },

    #[error("field \"{key}\" has no JSON form: {message}")]
    Encode { key: String, message: String },

    #[error("at JSON path {path} → {message}")]
    Decode { path: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_schema_display() {
        let err = SchemaError::DuplicateSchema("user".to_string());
        assert_eq!(err.to_string(), "schema \"user\" already registered");
    }

    #[test]
    fn test_unknown_schema_display() {
        let err = SchemaError::UnknownSchema("unknown".to_string());
        assert_eq!(err.to_string(), "schema \"unknown\" not registered");
    }

    #[test]
    fn test_field_errors_name_schema_and_key() {
        let err = SchemaError::UndeclaredField {
            schema: "user".to_string(),
            key: "email".to_string(),
        };
        assert!(err.to_string().contains("user"));
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn test_schema_mismatch_names_both_schemas() {
        let err = SchemaError::SchemaMismatch {
            expected: "order".to_string(),
            actual: "user".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "builder for schema \"user\" cannot be viewed as schema \"order\""
        );
    }
}
