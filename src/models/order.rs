use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle stages in order. `Ord` follows declaration order, which is what
/// the engine uses to reject backward transitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Marketing,
    Packaging,
    Billing,
    Dispatch,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Marketing => "marketing",
            Stage::Packaging => "packaging",
            Stage::Billing => "billing",
            Stage::Dispatch => "dispatch",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub order_number: u64,
    pub party_name: String,
    pub station_name: String,
    pub division: String,
    pub order_by: String,
    pub transport: String,
    pub promotional_material: String,
    pub status: Stage,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_shipper: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packed: Option<String>,
    #[serde(default, with = "timestamp_opt", skip_serializing_if = "Option::is_none")]
    pub packed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billed: Option<String>,
    #[serde(default, with = "timestamp_opt", skip_serializing_if = "Option::is_none")]
    pub billed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispatched: Option<String>,
    #[serde(default, with = "timestamp_opt", skip_serializing_if = "Option::is_none")]
    pub dispatched_at: Option<DateTime<Utc>>,
}

/// Timestamps are stored as UTC and presented in one fixed format,
/// `YYYY-MM-DD HH:MM:SS`.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

pub mod timestamp_opt {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::timestamp::FORMAT;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => NaiveDateTime::parse_from_str(&raw, FORMAT)
                .map(|naive| Some(naive.and_utc()))
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::{Order, Stage};

    fn order() -> Order {
        Order {
            id: Uuid::from_u128(7),
            order_number: 1,
            party_name: "Acme".to_string(),
            station_name: "Pune".to_string(),
            division: "D1".to_string(),
            order_by: "phone".to_string(),
            transport: "Road".to_string(),
            promotional_material: "none".to_string(),
            status: Stage::Marketing,
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            total_shipper: None,
            packed: None,
            packed_at: None,
            billed: None,
            billed_at: None,
            dispatched: None,
            dispatched_at: None,
        }
    }

    #[test]
    fn stages_order_by_lifecycle_position() {
        assert!(Stage::Marketing < Stage::Packaging);
        assert!(Stage::Packaging < Stage::Billing);
        assert!(Stage::Billing < Stage::Dispatch);
    }

    #[test]
    fn timestamps_serialize_in_fixed_format() {
        let value = serde_json::to_value(order()).unwrap();
        assert_eq!(value["created_at"], "2024-01-02 03:04:05");
    }

    #[test]
    fn identity_serializes_as_plain_string() {
        let value = serde_json::to_value(order()).unwrap();
        assert!(value["id"].is_string());
    }

    #[test]
    fn unreached_stage_fields_are_omitted() {
        let value = serde_json::to_value(order()).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("total_shipper"));
        assert!(!object.contains_key("packed_at"));
        assert!(!object.contains_key("dispatched"));
    }

    #[test]
    fn timestamps_round_trip() {
        let json = serde_json::to_string(&order()).unwrap();
        let parsed: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.created_at, order().created_at);
    }
}
