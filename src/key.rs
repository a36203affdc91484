use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SquaresError};

/// Identifies a single entity within the store: a `kind` (the entity category, analogous to a
/// table name) and a `name` (the instance identifier within that kind).
///
/// The `name` is what request payloads call the `key` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreKey {
    kind: String,
    name: String,
}

impl StoreKey {
    /// builds a key from its raw parts, without any validation
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        StoreKey {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// derives a key from the optional `kind` and `key` fields of a request.
    ///
    /// # Errors
    /// returns [`SquaresError::MissingField`] if `key` is absent or empty, and then if `kind`
    /// is absent or empty. `key` is checked first.
    pub fn from_request(kind: Option<&str>, key: Option<&str>) -> Result<StoreKey> {
        let name = non_empty(key).ok_or_else(|| SquaresError::missing("Key", "key"))?;
        let kind = non_empty(kind).ok_or_else(|| SquaresError::missing("Kind", "kind"))?;
        Ok(StoreKey::new(kind, name))
    }

    /// the entity category
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// the identifier of the entity within its kind
    pub fn name(&self) -> &str {
        &self.name
    }

    /// the full key path, `<kind>/<key>`
    pub fn path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// treats an empty string the same as a missing one
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_key_path() {
        let key = StoreKey::from_request(Some("infinityOne"), Some("a@b.com")).unwrap();
        assert_eq!(key.kind(), "infinityOne");
        assert_eq!(key.name(), "a@b.com");
        assert_eq!(key.path(), "infinityOne/a@b.com");
        assert_eq!(key.to_string(), key.path());
    }

    #[test]
    fn key_is_checked_before_kind() {
        let err = StoreKey::from_request(None, None).unwrap_err();
        assert!(err.to_string().starts_with("Key not provided"));

        let err = StoreKey::from_request(None, Some("a@b.com")).unwrap_err();
        assert!(err.to_string().starts_with("Kind not provided"));
    }

    #[test]
    fn empty_fields_count_as_missing() {
        assert!(StoreKey::from_request(Some("infinityOne"), Some("")).is_err());
        assert!(StoreKey::from_request(Some(""), Some("a@b.com")).is_err());
    }

    #[test]
    fn values_are_not_otherwise_constrained() {
        let key = StoreKey::from_request(Some("a/b"), Some(" ")).unwrap();
        assert_eq!(key.path(), "a/b/ ");
    }
}
