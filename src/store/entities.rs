use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::time::{date_to_api_string, parse_calendar_date};

/// An entry exactly as the entry service sends it. Nothing is validated at this point, dates are
/// parsed only when the record is turned into an [Entry].
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct EntryRecord {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryParseError {
    #[error("entry {id:?} has no date")]
    MissingDate { id: String },
    #[error("entry {id:?} has an unreadable date {value:?}")]
    InvalidDate { id: String, value: String },
}

/// A single daily record with its date already resolved to a calendar day.
#[derive(PartialEq, Eq, Debug, Serialize, Clone)]
pub struct Entry {
    pub id: Arc<str>,
    pub date: NaiveDate,
    pub response: Arc<str>,
}

impl TryFrom<&EntryRecord> for Entry {
    type Error = EntryParseError;

    fn try_from(record: &EntryRecord) -> Result<Self, Self::Error> {
        let Some(raw_date) = record.date.as_deref() else {
            return Err(EntryParseError::MissingDate {
                id: record.id.clone(),
            });
        };
        let date = parse_calendar_date(raw_date).ok_or_else(|| EntryParseError::InvalidDate {
            id: record.id.clone(),
            value: raw_date.to_string(),
        })?;
        Ok(Entry {
            id: record.id.as_str().into(),
            date,
            response: record.response.as_deref().unwrap_or_default().into(),
        })
    }
}

impl EntryRecord {
    pub fn new(id: &str, date: &str, response: &str) -> Self {
        Self {
            id: id.to_string(),
            date: Some(date.to_string()),
            response: Some(response.to_string()),
        }
    }

    pub fn parse(&self) -> Result<Entry, EntryParseError> {
        Entry::try_from(self)
    }
}

/// Body of a create request. The response text is forwarded as typed, empty included.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct NewEntry {
    pub date: String,
    pub response: String,
}

impl NewEntry {
    pub fn for_date(date: NaiveDate, response: String) -> Self {
        Self {
            date: date_to_api_string(date),
            response,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{EntryParseError, EntryRecord, NewEntry};

    #[test]
    fn test_record_accepts_mongo_style_payload() -> anyhow::Result<()> {
        let record: EntryRecord = serde_json::from_str(
            r#"{"_id":"65f1","date":"2024-03-15T00:00:00.000Z","response":"walked","__v":0}"#,
        )?;
        let entry = record.parse()?;
        assert_eq!(&*entry.id, "65f1");
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(&*entry.response, "walked");
        Ok(())
    }

    #[test]
    fn test_record_accepts_plain_id_and_null_response() -> anyhow::Result<()> {
        let record: EntryRecord =
            serde_json::from_str(r#"{"id":"7","date":"2024-03-01","response":null}"#)?;
        let entry = record.parse()?;
        assert_eq!(&*entry.id, "7");
        assert_eq!(&*entry.response, "");
        Ok(())
    }

    #[test]
    fn test_record_with_bad_date_fails_to_parse() -> anyhow::Result<()> {
        let missing: EntryRecord = serde_json::from_str(r#"{"_id":"a"}"#)?;
        assert_eq!(
            missing.parse(),
            Err(EntryParseError::MissingDate { id: "a".into() })
        );

        let invalid = EntryRecord::new("b", "yesterday", "");
        assert_eq!(
            invalid.parse(),
            Err(EntryParseError::InvalidDate {
                id: "b".into(),
                value: "yesterday".into()
            })
        );
        Ok(())
    }

    #[test]
    fn test_new_entry_body() -> anyhow::Result<()> {
        let body = NewEntry::for_date(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(), "".into());
        assert_eq!(
            serde_json::to_value(&body)?,
            serde_json::json!({"date": "2024-03-10", "response": ""})
        );
        Ok(())
    }
}
