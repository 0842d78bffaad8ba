use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::fields::Fields;

/// Store-assigned record identity
///
/// Ids start at 1 within each collection and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// An identifier as supplied by a caller
///
/// Callers may pass a number or a numeric string. Resolution reads an
/// integer prefix: leading whitespace and a sign are accepted, trailing
/// characters are ignored (`"12abc"` is 12), fractions are truncated.
/// Anything that yields no non-negative integer resolves to nothing, which
/// the store reports as "not found".
#[derive(Debug, Clone, PartialEq)]
pub enum RecordKey {
    Id(RecordId),
    Int(i64),
    Float(f64),
    Text(String),
    Invalid,
}

impl RecordKey {
    pub fn resolve(&self) -> Option<RecordId> {
        match self {
            RecordKey::Id(id) => Some(*id),
            RecordKey::Int(n) => u64::try_from(*n).ok().map(RecordId),
            RecordKey::Float(f) => {
                let truncated = f.trunc();
                if truncated.is_finite() && truncated >= 0.0 && truncated <= u64::MAX as f64 {
                    Some(RecordId(truncated as u64))
                } else {
                    None
                }
            }
            RecordKey::Text(s) => parse_integer_prefix(s),
            RecordKey::Invalid => None,
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Id(id) => write!(f, "{}", id),
            RecordKey::Int(n) => write!(f, "{}", n),
            RecordKey::Float(x) => write!(f, "{}", x),
            RecordKey::Text(s) => write!(f, "{:?}", s),
            RecordKey::Invalid => f.write_str("<invalid>"),
        }
    }
}

fn parse_integer_prefix(s: &str) -> Option<RecordId> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let value: u64 = rest[..digits_len].parse().ok()?;
    if negative && value != 0 {
        return None;
    }
    Some(RecordId(value))
}

impl From<RecordId> for RecordKey {
    fn from(id: RecordId) -> Self {
        RecordKey::Id(id)
    }
}

impl From<u64> for RecordKey {
    fn from(raw: u64) -> Self {
        RecordKey::Id(RecordId(raw))
    }
}

impl From<i64> for RecordKey {
    fn from(raw: i64) -> Self {
        RecordKey::Int(raw)
    }
}

impl From<i32> for RecordKey {
    fn from(raw: i32) -> Self {
        RecordKey::Int(raw.into())
    }
}

impl From<&str> for RecordKey {
    fn from(raw: &str) -> Self {
        RecordKey::Text(raw.to_string())
    }
}

impl From<String> for RecordKey {
    fn from(raw: String) -> Self {
        RecordKey::Text(raw)
    }
}

impl From<&Value> for RecordKey {
    fn from(value: &Value) -> Self {
        match value {
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    RecordKey::Id(RecordId(u))
                } else if let Some(i) = n.as_i64() {
                    RecordKey::Int(i)
                } else {
                    n.as_f64().map(RecordKey::Float).unwrap_or(RecordKey::Invalid)
                }
            }
            Value::String(s) => RecordKey::Text(s.clone()),
            _ => RecordKey::Invalid,
        }
    }
}

/// Current time at the precision records are stamped with (milliseconds)
pub fn stamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// ISO-8601 rendering used in serialized records, e.g. `2024-05-01T09:30:00.000Z`
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// One entity instance: system identity and timestamps plus open fields
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RecordId,
    created_date: DateTime<Utc>,
    updated_date: DateTime<Utc>,
    version: u64,
    fields: Fields,
}

impl Record {
    /// Build a freshly created record; system keys in `fields` are dropped
    pub(crate) fn new(id: RecordId, stamp: DateTime<Utc>, mut fields: Fields) -> Self {
        fields.strip_system_fields();
        Self {
            id,
            created_date: stamp,
            updated_date: stamp,
            version: 1,
            fields,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn created_date(&self) -> DateTime<Utc> {
        self.created_date
    }

    pub fn updated_date(&self) -> DateTime<Utc> {
        self.updated_date
    }

    /// Update counter, 1 after creation; not part of the serialized record
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Caller-supplied fields only
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Look up a caller-supplied field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Look up any field as it appears in the serialized record,
    /// including `id`, `created_date` and `updated_date`
    pub fn value(&self, field: &str) -> Option<Cow<'_, Value>> {
        match field {
            "id" => Some(Cow::Owned(Value::from(self.id.0))),
            "created_date" => Some(Cow::Owned(Value::String(format_timestamp(
                &self.created_date,
            )))),
            "updated_date" => Some(Cow::Owned(Value::String(format_timestamp(
                &self.updated_date,
            )))),
            _ => self.fields.get(field).map(Cow::Borrowed),
        }
    }

    /// Shallow-merge `updates`, bump the version and restamp `updated_date`
    ///
    /// `updated_date` never moves backwards even if the wall clock does.
    pub(crate) fn apply_update(&mut self, mut updates: Fields, now: DateTime<Utc>) {
        updates.strip_system_fields();
        self.fields.merge(updates);
        self.updated_date = now.max(self.updated_date);
        self.version += 1;
    }

    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::with_capacity(self.fields.len() + 3);
        map.insert("id".to_string(), Value::from(self.id.0));
        map.insert(
            "created_date".to_string(),
            Value::String(format_timestamp(&self.created_date)),
        );
        map.insert(
            "updated_date".to_string(),
            Value::String(format_timestamp(&self.updated_date)),
        );
        for (key, value) in self.fields.iter() {
            map.insert(key.clone(), value.clone());
        }
        Value::Object(map)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 3))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("created_date", &format_timestamp(&self.created_date))?;
        map.serialize_entry("updated_date", &format_timestamp(&self.updated_date))?;
        for (key, value) in self.fields.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_key_resolution() {
        assert_eq!(RecordKey::from(3u64).resolve(), Some(RecordId::new(3)));
        assert_eq!(RecordKey::from(3i64).resolve(), Some(RecordId::new(3)));
        assert_eq!(RecordKey::from("42").resolve(), Some(RecordId::new(42)));
        assert_eq!(RecordKey::from("  7").resolve(), Some(RecordId::new(7)));
        assert_eq!(RecordKey::from("12abc").resolve(), Some(RecordId::new(12)));
        assert_eq!(RecordKey::from("+5").resolve(), Some(RecordId::new(5)));
        assert_eq!(RecordKey::from(&json!(2.9)).resolve(), Some(RecordId::new(2)));
    }

    #[test]
    fn test_malformed_keys_resolve_to_nothing() {
        assert_eq!(RecordKey::from("abc").resolve(), None);
        assert_eq!(RecordKey::from("").resolve(), None);
        assert_eq!(RecordKey::from("-3").resolve(), None);
        assert_eq!(RecordKey::from(-1i64).resolve(), None);
        assert_eq!(RecordKey::from(&json!(null)).resolve(), None);
        assert_eq!(RecordKey::from(&json!({"id": 1})).resolve(), None);
        assert_eq!(RecordKey::from("99999999999999999999999").resolve(), None);
    }

    #[test]
    fn test_new_record_drops_system_fields() {
        let fields = Fields::new()
            .with("id", 500)
            .with("updated_date", "never")
            .with("title", "t1");
        let record = Record::new(RecordId::new(1), fixed_stamp(), fields);

        assert_eq!(record.id(), RecordId::new(1));
        assert_eq!(record.created_date(), record.updated_date());
        assert_eq!(record.version(), 1);
        assert!(record.get("id").is_none());
        assert_eq!(record.value("id").as_deref(), Some(&json!(1)));
    }

    #[test]
    fn test_serialized_form() {
        let record = Record::new(
            RecordId::new(4),
            fixed_stamp(),
            Fields::new().with("status", "active"),
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            json!({
                "id": 4,
                "created_date": "2024-05-01T09:30:00.000Z",
                "updated_date": "2024-05-01T09:30:00.000Z",
                "status": "active",
            })
        );
        assert_eq!(record.to_json(), json);
    }

    #[test]
    fn test_update_never_moves_backwards() {
        let mut record = Record::new(RecordId::new(1), fixed_stamp(), Fields::new());
        let earlier = fixed_stamp() - chrono::Duration::seconds(10);

        record.apply_update(Fields::new().with("title", "x"), earlier);

        assert_eq!(record.updated_date(), fixed_stamp());
        assert_eq!(record.version(), 2);
    }
}
