//! Schema definitions: a name plus the ordered set of field keys a builder may set.
use indexmap::IndexSet;

use crate::error::SchemaError;

/// Prefix that turns a field key into its setter name (`name` → `$name`).
pub const SETTER_SIGIL: char = '$';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDefinition {
    name: String,
    keys: IndexSet<String>, // declaration order
}

impl SchemaDefinition {
    /// Validate a declaration. Nothing is registered here; the registry decides
    /// whether the name is still free.
    pub fn new<I>(name: impl Into<String>, keys: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SchemaError::InvalidName(name));
        }
        let mut set = IndexSet::new();
        for key in keys {
            let key = key.into();
            if set.contains(&key) {
                return Err(SchemaError::DuplicateField { schema: name, key });
            }
            set.insert(key);
        }
        Ok(Self { name, keys: set })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn declares(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Setter names in declaration order, e.g. `["$name", "$age"]`.
    pub fn setter_names(&self) -> Vec<String> {
        self.keys.iter().map(|k| setter_name(k)).collect()
    }

    /// Map a setter name back to the declared key it writes.
    pub fn resolve_setter(&self, method: &str) -> Option<&str> {
        let key = method.strip_prefix(SETTER_SIGIL)?;
        self.keys.get(key).map(String::as_str)
    }
}

pub fn setter_name(key: &str) -> String {
    format!("{SETTER_SIGIL}{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_keep_declaration_order() {
        let def = SchemaDefinition::new("user", ["name", "age", "email"]).unwrap();
        assert_eq!(def.keys().collect::<Vec<_>>(), vec!["name", "age", "email"]);
        assert_eq!(def.setter_names(), vec!["$name", "$age", "$email"]);
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = SchemaDefinition::new("  ", ["a"]).unwrap_err();
        assert_eq!(err, SchemaError::InvalidName("  ".to_string()));
    }

    #[test]
    fn test_repeated_key_rejected() {
        let err = SchemaDefinition::new("user", ["name", "name"]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateField {
                schema: "user".to_string(),
                key: "name".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_setter_requires_sigil() {
        let def = SchemaDefinition::new("user", ["name"]).unwrap();
        assert_eq!(def.resolve_setter("$name"), Some("name"));
        assert_eq!(def.resolve_setter("name"), None);
        assert_eq!(def.resolve_setter("$age"), None);
    }

    #[test]
    fn test_schema_without_keys_is_valid() {
        let def = SchemaDefinition::new("empty", Vec::<String>::new()).unwrap();
        assert_eq!(def.keys().len(), 0);
        assert!(!def.declares(""));
    }
}
