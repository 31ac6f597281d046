//! Compile-time layer over [`Builder`]: the [`schema!`](crate::schema!) macro
//! expands one named, typed setter per declared field.
//!
//! ```
//! schema_builder::schema! {
//!     pub struct UserBuilder for "doc-user" {
//!         name: String,
//!         age: u32,
//!     }
//! }
//!
//! UserBuilder::register().unwrap();
//! let record = UserBuilder::get().unwrap().name("Ada".to_string()).age(30).build();
//! assert_eq!(record["name"], "Ada");
//! assert_eq!(record["age"], 30);
//! ```
//!
//! Each field type must convert with `Into<serde_json::Value>` (strings, numbers,
//! `bool`, `Vec`/`Option` of those, `Value` itself). For any other `Serialize`
//! type declare the field as `Value`, or go through the fallible
//! [`Builder::set_serialized`] on [`TypedBuilder::as_builder`].
use crate::builder::Builder;
use crate::error::SchemaError;

/// A typed view over a [`Builder`] for one schema. Implemented by [`schema!`](crate::schema!).
pub trait TypedBuilder: Sized {
    const NAME: &'static str;
    const KEYS: &'static [&'static str];

    /// Wrap a dynamic builder. The builder must be bound to [`Self::NAME`] and
    /// its schema must declare every key in [`Self::KEYS`].
    fn bind(builder: Builder) -> Result<Self, SchemaError>;

    fn as_builder(&self) -> &Builder;

    fn into_builder(self) -> Builder;
}

/// The check behind every generated [`TypedBuilder::bind`].
pub fn check_binding(builder: &Builder, name: &str, keys: &[&str]) -> Result<(), SchemaError> {
    let schema = builder.schema();
    if schema.name() != name {
        return Err(SchemaError::SchemaMismatch {
            expected: name.to_string(),
            actual: schema.name().to_string(),
        });
    }
    if let Some(key) = keys.iter().find(|k| !schema.declares(k)) {
        return Err(SchemaError::UndeclaredField {
            schema: name.to_string(),
            key: (*key).to_string(),
        });
    }
    Ok(())
}

/// Declare a typed builder for one schema.
///
/// Setter arguments must implement `Into<serde_json::Value>`; see the
/// [module docs](crate::typed) for other field types.
#[macro_export]
macro_rules! schema {
    (
        $(#[$meta:meta])*
        $vis:vis struct $builder:ident for $schema:literal {
            $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $builder($crate::Builder);

        impl $crate::TypedBuilder for $builder {
            const NAME: &'static str = $schema;
            const KEYS: &'static [&'static str] = &[$(stringify!($field)),*];

            fn bind(builder: $crate::Builder) -> ::std::result::Result<Self, $crate::SchemaError> {
                $crate::typed::check_binding(&builder, $schema, <Self as $crate::TypedBuilder>::KEYS)?;
                ::std::result::Result::Ok(Self(builder))
            }

            fn as_builder(&self) -> &$crate::Builder {
                &self.0
            }

            fn into_builder(self) -> $crate::Builder {
                self.0
            }
        }

        #[allow(dead_code)]
        impl $builder {
            /// Register this schema in the process-wide registry.
            pub fn register() -> ::std::result::Result<(), $crate::SchemaError> {
                $crate::register($schema, <Self as $crate::TypedBuilder>::KEYS.iter().copied())
            }

            pub fn register_in(
                registry: &mut $crate::SchemaRegistry,
            ) -> ::std::result::Result<(), $crate::SchemaError> {
                registry.register($schema, <Self as $crate::TypedBuilder>::KEYS.iter().copied())
            }

            /// A fresh builder from the process-wide registry.
            pub fn get() -> ::std::result::Result<Self, $crate::SchemaError> {
                <Self as $crate::TypedBuilder>::bind($crate::get($schema)?)
            }

            pub fn get_from(
                registry: &$crate::SchemaRegistry,
            ) -> ::std::result::Result<Self, $crate::SchemaError> {
                <Self as $crate::TypedBuilder>::bind(registry.get($schema)?)
            }

            $(
                $(#[$field_meta])*
                pub fn $field(&self, value: $ty) -> Self {
                    let value: $crate::Value = ::std::convert::Into::into(value);
                    Self(self.0.__typed_put(stringify!($field), value))
                }
            )*

            /// Re-view the accumulated state through another typed builder for the
            /// same schema, e.g. one that declares narrower field types.
            pub fn transform<B: $crate::TypedBuilder>(
                self,
            ) -> ::std::result::Result<B, $crate::SchemaError> {
                B::bind(self.0)
            }

            pub fn build(&self) -> $crate::Record {
                self.0.build()
            }

            pub fn build_into<T: $crate::__private::DeserializeOwned>(
                &self,
            ) -> ::std::result::Result<T, $crate::SchemaError> {
                self.0.build_into()
            }
        }
    };
}
