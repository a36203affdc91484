use serde::{Deserialize, Serialize};

use crate::error::{Result, SquaresError};
use crate::key::{non_empty, StoreKey};

/// The request payload of the get and delete handlers: the (kind, key) pair of one entity.
///
/// Both fields are optional at the wire level so that a missing field is reported by the
/// adapter's own validation instead of a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRequest {
    /// the entity kind, e.g. "infinityOne"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// the entity key within its kind, e.g. "ownerid@email.com"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl KeyRequest {
    /// builds a request for the given `kind` and `key`
    pub fn new(kind: impl Into<String>, key: impl Into<String>) -> Self {
        KeyRequest {
            kind: Some(kind.into()),
            key: Some(key.into()),
        }
    }

    /// derives the [`StoreKey`] this request addresses
    ///
    /// [`StoreKey`]: ./struct.StoreKey.html
    pub fn store_key(&self) -> Result<StoreKey> {
        StoreKey::from_request(self.kind.as_deref(), self.key.as_deref())
    }
}

/// The request payload of the upsert handler
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertRequest {
    /// the entity being written
    #[serde(flatten)]
    pub target: KeyRequest,
    /// unique id of the square
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squareid: Option<String>,
    /// type of the square
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squaretype: Option<String>,
    /// optional short description of the square
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpsertRequest {
    /// builds a complete upsert request
    pub fn new(
        target: KeyRequest,
        squareid: impl Into<String>,
        squaretype: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        UpsertRequest {
            target,
            squareid: Some(squareid.into()),
            squaretype: Some(squaretype.into()),
            description,
        }
    }

    /// returns the `squareid` and `squaretype` fields, in that order of checking
    ///
    /// # Errors
    /// returns [`SquaresError::MissingField`] if either one is absent or empty
    pub fn square(&self) -> Result<(&str, &str)> {
        let squareid = non_empty(self.squareid.as_deref())
            .ok_or_else(|| SquaresError::missing("Square ID", "squareid"))?;
        let squaretype = non_empty(self.squaretype.as_deref())
            .ok_or_else(|| SquaresError::missing("Square type", "squaretype"))?;
        Ok((squareid, squaretype))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_flat_upsert_body() {
        let req: UpsertRequest = serde_json::from_str(
            r#"{"kind":"infinityOne","key":"a@b.com","squareid":"1001","squaretype":"financial"}"#,
        )
        .unwrap();
        assert_eq!(req.target, KeyRequest::new("infinityOne", "a@b.com"));
        assert_eq!(req.square().unwrap(), ("1001", "financial"));
        assert_eq!(req.description, None);
    }

    #[test]
    fn squareid_is_checked_first() {
        let req: UpsertRequest = serde_json::from_str("{}").unwrap();
        assert!(req
            .square()
            .unwrap_err()
            .to_string()
            .starts_with("Square ID not provided"));

        let req: UpsertRequest = serde_json::from_str(r#"{"squareid":"1001"}"#).unwrap();
        assert!(req
            .square()
            .unwrap_err()
            .to_string()
            .starts_with("Square type not provided"));
    }

    #[test]
    fn encodes_without_absent_fields() {
        let json = serde_json::to_string(&KeyRequest {
            kind: Some("infinityOne".into()),
            key: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"infinityOne"}"#);
    }
}
