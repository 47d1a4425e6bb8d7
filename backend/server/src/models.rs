//! # Visits
//!
//! One stored document per bowl of noodles. Documents are written by hand
//! (Compass, mongosh), so nothing about their shape is guaranteed:
//!
//! - `_id` is usually an ObjectId
//! - `date` is either a BSON date or an ISO string
//! - `rating`/`price` may be numbers or strings
//!
//! Every field is flattened to text on the way in. Anything missing stays `None`
//! and renders as an empty cell.
use chrono::{DateTime, SecondsFormat, Utc};
use mongodb::bson::Bson;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VisitRecord {
    #[serde(rename = "_id", default, deserialize_with = "flat_text")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "flat_text")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "flat_text")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "flat_text")]
    pub location: Option<String>,

    #[serde(rename = "type", default, deserialize_with = "flat_text")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "flat_text")]
    pub rating: Option<String>,

    #[serde(default, deserialize_with = "flat_text")]
    pub price: Option<String>,

    #[serde(default, deserialize_with = "flat_text")]
    pub notes: Option<String>,
}

fn flat_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Bson>::deserialize(deserializer)?;

    Ok(value.and_then(bson_to_text))
}

/// Plain-text form of a stored value, `None` for null.
pub fn bson_to_text(value: Bson) -> Option<String> {
    match value {
        Bson::Null | Bson::Undefined => None,
        Bson::String(s) => Some(s),
        Bson::ObjectId(oid) => Some(oid.to_hex()),
        Bson::DateTime(dt) => Some(
            DateTime::<Utc>::from_timestamp_millis(dt.timestamp_millis())
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
                .unwrap_or_else(|| dt.to_string()),
        ),
        Bson::Int32(n) => Some(n.to_string()),
        Bson::Int64(n) => Some(n.to_string()),
        Bson::Double(f) if f.is_finite() => Some(f.to_string()),
        Bson::Double(_) => None,
        Bson::Boolean(b) => Some(b.to_string()),
        other => Some(other.into_relaxed_extjson().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{DateTime as BsonDateTime, doc, from_document, oid::ObjectId};

    use super::*;

    #[test]
    fn test_string_fields() {
        let record: VisitRecord = from_document(doc! {
            "_id": "abc",
            "date": "2024-03-01",
            "name": "Pho Hoa",
            "location": "Seattle",
            "type": "pho",
            "rating": "9",
            "price": "$14",
            "notes": "extra tendon",
        })
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("abc"));
        assert_eq!(record.date.as_deref(), Some("2024-03-01"));
        assert_eq!(record.kind.as_deref(), Some("pho"));
        assert_eq!(record.notes.as_deref(), Some("extra tendon"));
    }

    #[test]
    fn test_native_types_flattened() {
        let oid = ObjectId::parse_str("65e1a2b3c4d5e6f708091a2b").unwrap();
        let record: VisitRecord = from_document(doc! {
            "_id": oid,
            "date": BsonDateTime::from_millis(1_704_067_200_000),
            "rating": 8.5,
            "price": 12_i32,
        })
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("65e1a2b3c4d5e6f708091a2b"));
        assert_eq!(record.date.as_deref(), Some("2024-01-01T00:00:00.000Z"));
        assert_eq!(record.rating.as_deref(), Some("8.5"));
        assert_eq!(record.price.as_deref(), Some("12"));
    }

    #[test]
    fn test_missing_and_null_fields() {
        let record: VisitRecord = from_document(doc! {
            "name": "Ramen Danbo",
            "notes": Bson::Null,
        })
        .unwrap();

        assert_eq!(record.name.as_deref(), Some("Ramen Danbo"));
        assert_eq!(record.id, None);
        assert_eq!(record.date, None);
        assert_eq!(record.notes, None);
    }

    #[test]
    fn test_whole_doubles_drop_fraction() {
        assert_eq!(bson_to_text(Bson::Double(5.0)).as_deref(), Some("5"));
        assert_eq!(bson_to_text(Bson::Double(f64::NAN)), None);
        assert_eq!(bson_to_text(Bson::Int64(-3)).as_deref(), Some("-3"));
        assert_eq!(bson_to_text(Bson::Boolean(true)).as_deref(), Some("true"));
    }
}
