//! The daily gate of the home screen: find out whether today is already recorded, ask the yes/no
//! question, collect the answer and submit it.

pub mod streak;

use std::fmt::Display;

use chrono::NaiveDate;
use streak::{latest_prior_entry, StreakGap};
use tracing::{debug, info, warn};

use crate::{
    store::{entities::NewEntry, EntryStore, StoreError},
    utils::clock::Clock,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Unknown,
    AlreadySubmittedToday,
    AwaitingFirstAnswer,
    AwaitingDetail,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateEvent {
    /// Result of asking the service whether today has an entry.
    Probed { exists: bool },
    AnsweredYes,
    SubmitStarted,
    SubmitSucceeded,
    SubmitFailed,
}

impl Display for GateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateState::Unknown => write!(f, "unknown"),
            GateState::AlreadySubmittedToday => write!(f, "already submitted today"),
            GateState::AwaitingFirstAnswer => write!(f, "awaiting first answer"),
            GateState::AwaitingDetail => write!(f, "awaiting detail"),
            GateState::Submitting => write!(f, "submitting"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    #[error("{event:?} is not allowed while {from}")]
    InvalidTransition { from: GateState, event: GateEvent },
}

impl GateState {
    /// Applies `event`. Pairs that aren't part of the flow are rejected and the caller keeps the
    /// current state.
    pub fn next(self, event: GateEvent) -> Result<GateState, GateError> {
        match (self, event) {
            (GateState::Unknown, GateEvent::Probed { exists: true }) => {
                Ok(GateState::AlreadySubmittedToday)
            }
            (GateState::Unknown, GateEvent::Probed { exists: false }) => {
                Ok(GateState::AwaitingFirstAnswer)
            }
            (GateState::AwaitingFirstAnswer, GateEvent::AnsweredYes) => Ok(GateState::AwaitingDetail),
            (GateState::AwaitingDetail, GateEvent::SubmitStarted) => Ok(GateState::Submitting),
            (GateState::Submitting, GateEvent::SubmitSucceeded) => {
                Ok(GateState::AlreadySubmittedToday)
            }
            (GateState::Submitting, GateEvent::SubmitFailed) => Ok(GateState::AwaitingDetail),
            (from, event) => Err(GateError::InvalidTransition { from, event }),
        }
    }
}

/// What the home screen needs to show after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub state: GateState,
    /// Present only when a reminder should be shown.
    pub streak_gap: Option<StreakGap>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Done,
    /// The entry wasn't stored. `message` is ready to be shown to the user.
    Rejected { message: String },
}

/// Owns the gate state of the home screen for one day and drives it through the entry service.
pub struct HomeController<S: EntryStore, C: Clock> {
    store: S,
    clock: C,
    state: GateState,
}

impl<S: EntryStore, C: Clock> HomeController<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            state: GateState::Unknown,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    fn apply(&mut self, event: GateEvent) -> Result<GateState, GateError> {
        let next = self.state.next(event)?;
        debug!("Gate {} -> {}", self.state, next);
        self.state = next;
        Ok(next)
    }

    /// Asks whether today is recorded and, at the same time, fetches all entries to check for a
    /// streak gap. Failures of either request are logged and treated as "nothing recorded".
    pub async fn load(&mut self) -> Result<LoadOutcome, GateError> {
        let today = self.today();
        let (probe, entries) = tokio::join!(
            self.store.entry_for(today),
            self.store.list_entries()
        );

        let exists = match probe {
            Ok(_) => true,
            Err(StoreError::NotFound) => false,
            Err(e) => {
                warn!("Couldn't check today's entry, assuming none: {e}");
                false
            }
        };

        let streak_gap = match entries {
            Ok(entries) => latest_prior_entry(&entries, today).filter(|v| v.needs_reminder()),
            Err(e) => {
                warn!("Couldn't fetch entries for streak check: {e}");
                None
            }
        };

        let state = self.apply(GateEvent::Probed { exists })?;
        Ok(LoadOutcome { state, streak_gap })
    }

    pub fn answer_yes(&mut self) -> Result<GateState, GateError> {
        self.apply(GateEvent::AnsweredYes)
    }

    /// Sends today's answer. `response` is forwarded as given, empty text included.
    pub async fn submit(&mut self, response: String) -> Result<SubmitOutcome, GateError> {
        self.apply(GateEvent::SubmitStarted)?;

        let entry = NewEntry::for_date(self.today(), response);
        match self.store.create_entry(entry).await {
            Ok(()) => {
                self.apply(GateEvent::SubmitSucceeded)?;
                info!("Submitted entry for {}", self.today());
                Ok(SubmitOutcome::Done)
            }
            Err(e) => {
                self.apply(GateEvent::SubmitFailed)?;
                warn!("Submission failed: {e}");
                Ok(SubmitOutcome::Rejected {
                    message: e.user_message().to_string(),
                })
            }
        }
    }
}
