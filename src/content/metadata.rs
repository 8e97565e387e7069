use chrono::{
    DateTime,
    NaiveDate,
    Utc,
};
use serde::de::DeserializeOwned;
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
};

/// Front-matter fields of a post.
///
/// `title`, `date`, `excerpt` and `category` are required; deserialization
/// fails when any of them is missing. The optional fields never fail a load:
/// a value of the wrong type (`featured: "true"`, `tags: rust`) is dropped
/// with a warning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub title: String,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub date: String,
    pub excerpt: String,
    pub category: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Human readable, e.g. "5 min read".
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl Metadata {
    /// Only an explicit `featured: true` counts.
    #[must_use]
    pub fn is_featured(&self) -> bool {
        self.featured == Some(true)
    }

    /// The parsed `date`, or `None` if it is in neither accepted format.
    #[must_use]
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_date(&self.date)
    }
}

/// Deserialize an optional field, turning a value of the wrong type into `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_yaml::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            tracing::warn!("Ignoring optional front matter field: {err}");
            Ok(None)
        }
    }
}

/// Parse a post date as `YYYY-MM-DD` (midnight UTC) or RFC 3339.
#[must_use]
pub fn parse_date(date: &str) -> Option<DateTime<Utc>> {
    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(day.and_hms_opt(0, 0, 0)?.and_utc());
    }
    DateTime::parse_from_rfc3339(date).ok().map(|timestamp| timestamp.with_timezone(&Utc))
}
