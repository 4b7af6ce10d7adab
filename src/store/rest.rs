use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{config::ApiConfig, utils::time::date_to_api_string};

use super::{
    entities::{EntryRecord, NewEntry},
    EntryStore, StoreError,
};

/// The main realization of [EntryStore], talking JSON over HTTP to `{base}/entries`.
pub struct RestEntryStore {
    client: Client,
    entries_url: String,
}

impl RestEntryStore {
    pub fn new(config: &ApiConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .build()
            .map_err(|e| StoreError::Network(format!("Failed to create http client: {e}")))?;
        Ok(Self {
            client,
            entries_url: config.entries_url(),
        })
    }

    fn entry_url(&self, date: NaiveDate) -> String {
        format!("{}/{}", self.entries_url, date_to_api_string(date))
    }

    /// Passes successful responses through and turns everything else into a [StoreError].
    async fn check_status(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(error_from_response(status, &body))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Maps a failed response onto the error taxonomy. A 404 means "nothing stored", every other
/// failure keeps the service's `message` so it can be shown as is.
pub fn error_from_response(status: StatusCode, body: &str) -> StoreError {
    if status == StatusCode::NOT_FOUND {
        return StoreError::NotFound;
    }
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|v| v.message);
    if message.is_none() && !body.is_empty() {
        warn!("Service returned {status} without a message: {body}");
    }
    StoreError::Rejected {
        status: status.as_u16(),
        message,
    }
}

fn network_error(e: reqwest::Error) -> StoreError {
    StoreError::Network(e.to_string())
}

#[async_trait]
impl EntryStore for RestEntryStore {
    #[instrument(skip(self))]
    async fn list_entries(&self) -> Result<Vec<EntryRecord>, StoreError> {
        let response = self
            .client
            .get(&self.entries_url)
            .send()
            .await
            .map_err(network_error)?;
        let response = Self::check_status(response).await?;
        let records = response
            .json::<Vec<EntryRecord>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        debug!("Fetched {} entries", records.len());
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn entry_for(&self, date: NaiveDate) -> Result<EntryRecord, StoreError> {
        let response = self
            .client
            .get(self.entry_url(date))
            .send()
            .await
            .map_err(network_error)?;
        let response = Self::check_status(response).await?;
        response
            .json::<EntryRecord>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    #[instrument(skip(self))]
    async fn create_entry(&self, entry: NewEntry) -> Result<(), StoreError> {
        let response = self
            .client
            .post(&self.entries_url)
            .json(&entry)
            .send()
            .await
            .map_err(network_error)?;
        Self::check_status(response).await?;
        debug!("Created entry for {}", entry.date);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use reqwest::StatusCode;

    use crate::{config::ApiConfig, store::StoreError};

    use super::{error_from_response, RestEntryStore};

    #[test]
    fn test_not_found_is_its_own_error() {
        assert_eq!(
            error_from_response(StatusCode::NOT_FOUND, r#"{"message":"Entry not found"}"#),
            StoreError::NotFound
        );
    }

    #[test]
    fn test_rejection_keeps_service_message() {
        let error = error_from_response(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Entry for this date already exists"}"#,
        );
        assert_eq!(
            error,
            StoreError::Rejected {
                status: 400,
                message: Some("Entry for this date already exists".into())
            }
        );
        assert_eq!(error.user_message(), "Entry for this date already exists");
    }

    #[test]
    fn test_rejection_without_message_falls_back() {
        let error = error_from_response(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(
            error,
            StoreError::Rejected {
                status: 500,
                message: None
            }
        );
        assert_eq!(error.user_message(), "Something went wrong");
    }

    #[test]
    fn test_urls() -> anyhow::Result<()> {
        let store = RestEntryStore::new(&ApiConfig::new("http://localhost:5000/"))?;
        assert_eq!(store.entries_url, "http://localhost:5000/entries");
        assert_eq!(
            store.entry_url(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()),
            "http://localhost:5000/entries/2024-03-10"
        );
        Ok(())
    }
}
