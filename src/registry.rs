//! Schema registry and builder factory.
//!
//! [`SchemaRegistry`] is an owned, name-indexed map of schema definitions. The
//! process-wide registry behind [`register`] and [`get`] wraps one of these in a
//! lazily initialized static; it is meant to be filled once at startup and only
//! read afterwards.
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::builder::Builder;
use crate::error::SchemaError;
use crate::schema::SchemaDefinition;

#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: IndexMap<String, Arc<SchemaDefinition>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` with its field keys.
    ///
    /// A name is registered at most once; on any error the registry is left as it was.
    pub fn register<I>(&mut self, name: impl Into<String>, keys: I) -> Result<(), SchemaError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let name = name.into();
        if self.schemas.contains_key(&name) {
            tracing::warn!(schema = %name, "rejected duplicate schema registration");
            return Err(SchemaError::DuplicateSchema(name));
        }
        let def = SchemaDefinition::new(name, keys)?;
        tracing::debug!(schema = %def.name(), keys = def.keys().len(), "registered schema");
        self.schemas.insert(def.name().to_string(), Arc::new(def));
        Ok(())
    }

    /// A fresh, empty builder for `name`.
    pub fn get(&self, name: &str) -> Result<Builder, SchemaError> {
        self.schemas
            .get(name)
            .map(|def| Builder::new(Arc::clone(def)))
            .ok_or_else(|| SchemaError::UnknownSchema(name.to_string()))
    }

    pub fn definition(&self, name: &str) -> Option<&SchemaDefinition> {
        self.schemas.get(name).map(Arc::as_ref)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &SchemaDefinition> {
        self.schemas.values().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// PROCESS-WIDE REGISTRY
// ————————————————————————————————————————————————————————————————————————————

static GLOBAL: Lazy<RwLock<SchemaRegistry>> = Lazy::new(|| RwLock::new(SchemaRegistry::new()));

/// Register a schema in the process-wide registry.
pub fn register<I>(name: impl Into<String>, keys: I) -> Result<(), SchemaError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    // A panic while holding the lock cannot leave the map half-updated: `register`
    // validates before it inserts.
    let mut registry = GLOBAL.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    registry.register(name, keys)
}

/// A fresh builder from the process-wide registry.
pub fn get(name: &str) -> Result<Builder, SchemaError> {
    let registry = GLOBAL.read().unwrap_or_else(|poisoned| poisoned.into_inner());
    registry.get(name)
}

/// Whether `name` is registered process-wide.
pub fn is_registered(name: &str) -> bool {
    let registry = GLOBAL.read().unwrap_or_else(|poisoned| poisoned.into_inner());
    registry.contains(name)
}
