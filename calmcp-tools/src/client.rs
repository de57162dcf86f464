//! Seams between the calendar operations and whatever actually talks to the
//! provider. Operations only ever see a `dyn CalendarClient`.

use async_trait::async_trait;
use calmcp_core::ProviderError;
use chrono::{DateTime, Utc};
use google_calendar3::api::Event;

/// Only the caller's primary calendar is ever addressed.
pub const PRIMARY_CALENDAR: &str = "primary";

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// A single-page, start-ordered window over expanded (single) events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub time_min: DateTime<Utc>,
    pub time_max: DateTime<Utc>,
    pub max_results: u32,
}

/// An authenticated handle on the primary calendar.
#[async_trait]
pub trait CalendarClient: Send + Sync {
    async fn insert_event(&self, event: Event) -> ProviderResult<Event>;

    async fn list_events(&self, query: &EventQuery) -> ProviderResult<Vec<Event>>;

    async fn get_event(&self, event_id: &str) -> ProviderResult<Event>;

    async fn update_event(&self, event_id: &str, event: Event) -> ProviderResult<Event>;

    async fn delete_event(&self, event_id: &str) -> ProviderResult<()>;
}

/// Yields a ready-to-use client, or fails outright.
///
/// Called once per operation; implementations must not cache the client.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn acquire(&self) -> ProviderResult<Box<dyn CalendarClient>>;
}
