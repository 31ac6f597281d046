//! Runtime schema registry plus an immutable fluent record builder.
//!
//! ```
//! use schema_builder::{get, register, SchemaError};
//!
//! register("lib-user", ["name", "age"]).unwrap();
//!
//! let record = get("lib-user").unwrap()
//!     .invoke("$name", "Ada").unwrap()
//!     .invoke("$age", 30).unwrap()
//!     .build();
//! assert_eq!(serde_json::Value::Object(record), serde_json::json!({ "name": "Ada", "age": 30 }));
//!
//! assert!(matches!(get("unknown"), Err(SchemaError::UnknownSchema(_))));
//! assert!(matches!(register("lib-user", ["email"]), Err(SchemaError::DuplicateSchema(_))));
//! ```
pub mod builder;
pub mod cli;
pub mod error;
pub mod path_de;
pub mod registry;
pub mod schema;
pub mod typed;

pub use builder::{Builder, Record};
pub use error::SchemaError;
pub use registry::{get, is_registered, register, SchemaRegistry};
pub use schema::{SchemaDefinition, SETTER_SIGIL};
pub use serde_json::Value;
pub use typed::TypedBuilder;

#[doc(hidden)]
pub mod __private {
    pub use serde::de::DeserializeOwned;
}
