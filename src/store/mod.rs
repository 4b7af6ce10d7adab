//! Access to the remote entry service.
//!
//!  - [EntryStore] is the contract every screen talks to.
//!  - [rest::RestEntryStore] is the HTTP realization of it.
//!  - Entries travel as [entities::EntryRecord] and are parsed into [entities::Entry] only by the
//!    code that needs a calendar date, so one broken record can't spoil a whole response.

pub mod entities;
pub mod rest;

use std::ops::Deref;

use async_trait::async_trait;
use chrono::NaiveDate;
use entities::{EntryRecord, NewEntry};

/// Message shown when the service rejects a request without explaining why.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The request never produced a response.
    #[error("request could not complete: {0}")]
    Network(String),
    /// Nothing is stored for the requested date.
    #[error("no entry found")]
    NotFound,
    /// The service answered with a failure status.
    #[error("service rejected the request with status {status}: {}", .message.as_deref().unwrap_or(FALLBACK_ERROR_MESSAGE))]
    Rejected { status: u16, message: Option<String> },
    /// The response body isn't what the contract promises.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl StoreError {
    /// Text meant for the user. Messages coming from the service are passed through verbatim.
    pub fn user_message(&self) -> &str {
        match self {
            StoreError::Rejected {
                message: Some(message),
                ..
            } => message,
            StoreError::Rejected { message: None, .. }
            | StoreError::Network(_)
            | StoreError::NotFound
            | StoreError::Decode(_) => FALLBACK_ERROR_MESSAGE,
        }
    }
}

/// Interface of the entry service. No ordering or filtering is promised for listed entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Every stored entry, in whatever order the service returns them.
    async fn list_entries(&self) -> Result<Vec<EntryRecord>, StoreError>;

    /// The entry for exactly `date`. [StoreError::NotFound] when there is none.
    async fn entry_for(&self, date: NaiveDate) -> Result<EntryRecord, StoreError>;

    /// Stores a new entry.
    async fn create_entry(&self, entry: NewEntry) -> Result<(), StoreError>;
}

#[async_trait]
impl<T> EntryStore for T
where
    T: Deref + Send + Sync,
    T::Target: EntryStore,
{
    async fn list_entries(&self) -> Result<Vec<EntryRecord>, StoreError> {
        self.deref().list_entries().await
    }

    async fn entry_for(&self, date: NaiveDate) -> Result<EntryRecord, StoreError> {
        self.deref().entry_for(date).await
    }

    async fn create_entry(&self, entry: NewEntry) -> Result<(), StoreError> {
        self.deref().create_entry(entry).await
    }
}
