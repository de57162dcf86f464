//! In-memory stand-ins for the provider.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use calmcp_core::ProviderError;
use google_calendar3::api::Event;

use crate::client::{CalendarClient, CredentialProvider, EventQuery, ProviderResult};

#[derive(Default)]
struct State {
    events: Vec<Event>,
    inserted: Vec<Event>,
    calls: Vec<String>,
    last_query: Option<EventQuery>,
    next_id: u32,
}

/// Shared calendar; every `acquire` hands out a client over the same state.
#[derive(Clone, Default)]
pub struct FakeCalendar {
    state: Arc<Mutex<State>>,
}

impl FakeCalendar {
    /// Store an event directly, bypassing the call log.
    pub fn seed(&self, mut event: Event) -> Event {
        let id = event.id.clone().unwrap_or_default();
        event.html_link.get_or_insert_with(|| link_for(&id));
        self.state.lock().unwrap().events.push(event.clone());
        event
    }

    pub fn get(&self, id: &str) -> Option<Event> {
        let state = self.state.lock().unwrap();
        state.events.iter().find(|e| e.id.as_deref() == Some(id)).cloned()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn inserted(&self) -> Vec<Event> {
        self.state.lock().unwrap().inserted.clone()
    }

    pub fn last_query(&self) -> Option<EventQuery> {
        self.state.lock().unwrap().last_query.clone()
    }
}

fn link_for(id: &str) -> String {
    format!("https://calendar.example/{id}")
}

fn not_found(id: &str) -> ProviderError {
    ProviderError::Api(format!("Not Found: event {id}"))
}

#[async_trait]
impl CalendarClient for FakeCalendar {
    async fn insert_event(&self, mut event: Event) -> ProviderResult<Event> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("insert".into());
        state.inserted.push(event.clone());
        state.next_id += 1;
        let id = format!("evt-{}", state.next_id);
        event.html_link = Some(link_for(&id));
        event.id = Some(id);
        state.events.push(event.clone());
        Ok(event)
    }

    async fn list_events(&self, query: &EventQuery) -> ProviderResult<Vec<Event>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("list".into());
        state.last_query = Some(query.clone());

        let mut hits: Vec<Event> = state
            .events
            .iter()
            .filter(|e| {
                e.start
                    .as_ref()
                    .and_then(|s| s.date_time)
                    .is_some_and(|t| t >= query.time_min && t < query.time_max)
            })
            .cloned()
            .collect();
        hits.sort_by_key(|e| e.start.as_ref().and_then(|s| s.date_time));
        hits.truncate(query.max_results as usize);
        Ok(hits)
    }

    async fn get_event(&self, event_id: &str) -> ProviderResult<Event> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("get:{event_id}"));
        state
            .events
            .iter()
            .find(|e| e.id.as_deref() == Some(event_id))
            .cloned()
            .ok_or_else(|| not_found(event_id))
    }

    async fn update_event(&self, event_id: &str, event: Event) -> ProviderResult<Event> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("update:{event_id}"));
        let slot = state
            .events
            .iter_mut()
            .find(|e| e.id.as_deref() == Some(event_id))
            .ok_or_else(|| not_found(event_id))?;
        *slot = event.clone();
        Ok(event)
    }

    async fn delete_event(&self, event_id: &str) -> ProviderResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("delete:{event_id}"));
        let before = state.events.len();
        state.events.retain(|e| e.id.as_deref() != Some(event_id));
        if state.events.len() == before {
            return Err(not_found(event_id));
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialProvider for FakeCalendar {
    async fn acquire(&self) -> ProviderResult<Box<dyn CalendarClient>> {
        Ok(Box::new(self.clone()))
    }
}

/// Credentials that never work.
pub struct FailingCredentials;

#[async_trait]
impl CredentialProvider for FailingCredentials {
    async fn acquire(&self) -> ProviderResult<Box<dyn CalendarClient>> {
        Err(ProviderError::Credentials("refresh token revoked".into()))
    }
}
