//! Immutable fluent builder bound to one schema.
//!
//! Every setter returns a *new* builder; the receiver keeps its own state, so any
//! intermediate builder can be reused as a branching point. `build` hands back the
//! accumulated fields as a plain [`Record`].
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::schema::SchemaDefinition;

/// Field key → value, in the order fields were first set.
pub type Record = Map<String, Value>;

#[derive(Debug, Clone)]
pub struct Builder {
    schema: Arc<SchemaDefinition>,
    state: Arc<Record>,
}

impl Builder {
    pub(crate) fn new(schema: Arc<SchemaDefinition>) -> Self {
        Self { schema, state: Arc::new(Record::new()) }
    }

    pub fn schema(&self) -> &SchemaDefinition {
        &self.schema
    }

    /// Set a declared field by key. Fails only when the schema does not declare `key`.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<Self, SchemaError> {
        if !self.schema.declares(key) {
            return Err(self.undeclared(key));
        }
        Ok(self.put(key, value.into()))
    }

    /// Dispatch a setter by its method name (`"$name"`), the way a generated
    /// method table would.
    pub fn invoke(&self, method: &str, value: impl Into<Value>) -> Result<Self, SchemaError> {
        match self.schema.resolve_setter(method) {
            Some(key) => Ok(self.put(key, value.into())),
            None => Err(self.undeclared(method)),
        }
    }

    /// Identity. Value types are a compile-time concern; nothing changes at runtime.
    pub fn transform(self) -> Self {
        self
    }

    pub fn build(&self) -> Record {
        (*self.state).clone()
    }

    /// Build and deserialize the record into `T`, reporting the failing field path.
    pub fn build_into<T: DeserializeOwned>(&self) -> Result<T, SchemaError> {
        crate::path_de::from_value_with_path(Value::Object(self.build()))
    }

    pub fn get_field(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Set a declared field from any `Serialize` value. Fails when `key` is not
    /// declared or when `value` has no JSON form (e.g. a map with non-string keys).
    pub fn set_serialized<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<Self, SchemaError> {
        if !self.schema.declares(key) {
            return Err(self.undeclared(key));
        }
        let value = serde_json::to_value(value).map_err(|err| SchemaError::Encode {
            key: key.to_string(),
            message: err.to_string(),
        })?;
        Ok(self.put(key, value))
    }

    // Entry point for `schema!` setters. `TypedBuilder::bind` has already checked
    // every generated key against the schema.
    #[doc(hidden)]
    pub fn __typed_put(&self, key: &'static str, value: Value) -> Self {
        assert!(
            self.schema.declares(key),
            "schema \"{}\" has no field \"{key}\"",
            self.schema.name()
        );
        self.put(key, value)
    }

    // Copy-on-write: the parent's map is cloned, never touched.
    pub(crate) fn put(&self, key: &str, value: Value) -> Self {
        tracing::trace!(schema = %self.schema.name(), key, "set field");
        let mut state = (*self.state).clone();
        state.insert(key.to_string(), value);
        Self { schema: Arc::clone(&self.schema), state: Arc::new(state) }
    }

    fn undeclared(&self, key: &str) -> SchemaError {
        SchemaError::UndeclaredField {
            schema: self.schema.name().to_string(),
            key: key.to_string(),
        }
    }
}
