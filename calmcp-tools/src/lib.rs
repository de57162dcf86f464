//! Google Calendar tools: create, list, update and delete events on the
//! primary calendar.

pub mod args;
pub mod calendar;
pub mod client;
pub mod google;
pub mod oauth;
pub mod registry;
pub mod time;

#[cfg(test)]
mod testing;

pub use calendar::CalendarTools;
pub use client::{CalendarClient, CredentialProvider};
pub use google::GoogleCredentials;
pub use oauth::{GoogleConfig, OAuthClient};
pub use registry::CALENDAR_TOOLS;
