use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// The record stored at a [`StoreKey`].
///
/// `squareid`, `squaretype` and `createdDate` are indexed properties; `description` is stored
/// but never indexed. A record is always written as a whole, so `created_date` is re-stamped
/// on every upsert.
///
/// [`StoreKey`]: ./struct.StoreKey.html
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// unique id of the square, e.g. "10010011"
    pub squareid: String,
    /// type of the square, e.g. "financial"
    pub squaretype: String,
    /// short, unindexed description of the square
    pub description: Option<String>,
    /// ISO-8601 UTC timestamp of the last write
    pub created_date: String,
}

impl Entity {
    /// builds a new `Entity` stamped with the current time
    pub fn new(squareid: String, squaretype: String, description: Option<String>) -> Self {
        Entity {
            squareid,
            squaretype,
            description,
            created_date: timestamp(Utc::now()),
        }
    }

    /// parses `created_date` back into a timestamp.
    /// Returns `None` if the stored value is not a valid RFC 3339 timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_date)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}

// millisecond precision with a `Z` suffix, e.g. 2026-10-17T12:00:00.000Z
fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_format() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 17, 12, 30, 5).unwrap();
        assert_eq!(timestamp(ts), "2026-10-17T12:30:05.000Z");
    }

    #[test]
    fn new_entity_is_stamped_now() {
        let before = Utc::now().timestamp_millis();
        let entity = Entity::new("1001".into(), "financial".into(), None);
        let created = entity.created_at().unwrap().timestamp_millis();
        assert!(created >= before);
        assert!(created <= Utc::now().timestamp_millis());
    }

    #[test]
    fn serializes_with_camel_case_date() {
        let entity = Entity {
            squareid: "1001".into(),
            squaretype: "financial".into(),
            description: None,
            created_date: "2026-10-17T12:30:05.000Z".into(),
        };
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "squareid": "1001",
                "squaretype": "financial",
                "description": null,
                "createdDate": "2026-10-17T12:30:05.000Z",
            })
        );
    }
}
