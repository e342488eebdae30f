/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates carry no time-of-day and no timezone.
pub type CalendarDate = chrono::NaiveDate;

/// Deserializer for clearable fields in partial updates.
///
/// Paired with `#[serde(default)]` on an `Option<Option<T>>` field: a missing
/// key stays `None` (leave alone), an explicit `null` becomes `Some(None)`
/// (clear) and a value becomes `Some(Some(v))`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    <Option<T> as serde::Deserialize>::deserialize(deserializer).map(Some)
}
