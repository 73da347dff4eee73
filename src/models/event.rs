use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Rendering used for `date` in every listing, e.g. `Sat, 15 Jun 2024 00:00:00 GMT`.
pub const DATE_OUTPUT_FORMAT: &str = "%a, %d %b %Y 00:00:00 GMT";

/// Accepted input form for `date` on creation.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields: 'title' and 'date'";
pub const INVALID_DATE_MESSAGE: &str = "Invalid 'date': expected YYYY-MM-DD";

/// A row of the `events` table as stored.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EventRow {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
}

/// An event as it leaves the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            image_url: row.image_url,
            date: row.date.map(format_event_date),
            location: row.location,
        }
    }
}

pub fn format_event_date(date: NaiveDate) -> String {
    date.format(DATE_OUTPUT_FORMAT).to_string()
}

/// Body of `POST /events`. Every field is optional at parse time; presence of
/// `title` and `date` is checked by [`CreateEventRequest::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEventRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
}

/// Strings pass through, numbers and booleans are stringified, anything else is unset.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// A validated event ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub date: NaiveDate,
    pub location: Option<String>,
}

impl CreateEventRequest {
    /// Lenient parse: a missing or malformed body (or one that is not a JSON
    /// object) is an empty request. Field types are coerced one at a time.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_else(|e| {
            if !body.is_empty() {
                tracing::debug!("Unreadable event payload treated as empty: {}", e);
            }
            Self::default()
        })
    }

    pub fn validate(self) -> Result<NewEvent, String> {
        let title = self.title.filter(|v| !v.is_empty());
        let raw_date = self.date.filter(|v| !v.is_empty());

        let (Some(title), Some(raw_date)) = (title, raw_date) else {
            return Err(MISSING_FIELDS_MESSAGE.to_string());
        };

        let date = NaiveDate::parse_from_str(raw_date.trim(), DATE_INPUT_FORMAT)
            .map_err(|_| INVALID_DATE_MESSAGE.to_string())?;

        Ok(NewEvent {
            title,
            description: self.description,
            image_url: self.image_url,
            date,
            location: self.location,
        })
    }
}
