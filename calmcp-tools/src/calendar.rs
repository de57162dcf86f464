//! Calendar operations, and the [`ToolSet`] that routes tool names to them.
//!
//! Each operation makes exactly one provider call (update: one read, one
//! write) and returns a single human-readable line or listing.

use async_trait::async_trait;
use calmcp_core::{ArgumentBag, ProviderError, Result, ToolDescriptor, ToolError, ToolSet};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use google_calendar3::api::{Event, EventAttendee};
use tracing::debug;

use crate::{
    args::{self, CreateEventArgs, DeleteEventArgs, ListEventsArgs, UpdateEventArgs},
    client::{CalendarClient, CredentialProvider, EventQuery},
    registry::{CalendarTool, CALENDAR_TOOLS},
    time::{display_time, event_time, parse_instant},
};

pub const NO_EVENTS_FOUND: &str = "No events found.";
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// The four calendar tools bound to a credential source and a fixed zone.
pub struct CalendarTools<P> {
    credentials: P,
    time_zone: Tz,
}

impl<P: CredentialProvider> CalendarTools<P> {
    pub fn new(credentials: P, time_zone: Tz) -> Self {
        Self {
            credentials,
            time_zone,
        }
    }
}

#[async_trait]
impl<P: CredentialProvider> ToolSet for CalendarTools<P> {
    fn descriptors(&self) -> &'static [ToolDescriptor] {
        &CALENDAR_TOOLS
    }

    async fn invoke(&self, name: &'static str, args: ArgumentBag) -> Result<String> {
        let tool = CalendarTool::from_name(name)
            .ok_or_else(|| ToolError::UnknownTool { name: name.to_string() })?;
        let tz = self.time_zone;

        // Arguments are checked before credentials are touched.
        match tool {
            | CalendarTool::CreateEvent => {
                let args = args::parse(name, args)?;
                let client = self.credentials.acquire().await?;
                create_event(client.as_ref(), args, tz).await
            },
            | CalendarTool::ListEvents => {
                let args = args::parse(name, args)?;
                let client = self.credentials.acquire().await?;
                list_events(client.as_ref(), args, tz).await
            },
            | CalendarTool::UpdateEvent => {
                let args = args::parse(name, args)?;
                let client = self.credentials.acquire().await?;
                update_event(client.as_ref(), args, tz).await
            },
            | CalendarTool::DeleteEvent => {
                let args = args::parse(name, args)?;
                let client = self.credentials.acquire().await?;
                delete_event(client.as_ref(), args).await
            },
        }
    }
}

pub async fn create_event(
    client: &dyn CalendarClient,
    args: CreateEventArgs,
    tz: Tz,
) -> Result<String> {
    const TOOL: &str = "create_event";
    let start = instant(TOOL, "start_time", &args.start_time, tz)?;
    let end = instant(TOOL, "end_time", &args.end_time, tz)?;

    let event = Event {
        summary: Some(args.summary),
        description: args.description,
        start: Some(event_time(start, tz)),
        end: Some(event_time(end, tz)),
        attendees: args.attendees.map(attendees),
        ..Default::default()
    };

    let created = client.insert_event(event).await?;
    debug!(event_id = ?created.id, "created event");
    Ok(format!("Event created: {}", written_link(&created)?))
}

pub async fn list_events(client: &dyn CalendarClient, args: ListEventsArgs, tz: Tz) -> Result<String> {
    const TOOL: &str = "list_events";
    let query = EventQuery {
        time_min: instant(TOOL, "time_min", &args.time_min, tz)?,
        time_max: instant(TOOL, "time_max", &args.time_max, tz)?,
        max_results: args.max_results.unwrap_or(DEFAULT_MAX_RESULTS),
    };

    let events = client.list_events(&query).await?;
    debug!(count = events.len(), "listed events");
    if events.is_empty() {
        return Ok(NO_EVENTS_FOUND.to_string());
    }

    let entries: Vec<String> = events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            format!(
                "{}. {}\nID: {}\nStart: {}\nEnd: {}\nLink: {}",
                i + 1,
                event.summary.as_deref().unwrap_or("(untitled)"),
                event.id.as_deref().unwrap_or("(no id)"),
                display_time(event.start.as_ref(), tz),
                display_time(event.end.as_ref(), tz),
                link(event),
            )
        })
        .collect();
    Ok(entries.join("\n\n"))
}

/// Read-before-write: fields absent from `args` keep their stored values.
/// Attendees, when given, replace the stored list outright.
pub async fn update_event(
    client: &dyn CalendarClient,
    args: UpdateEventArgs,
    tz: Tz,
) -> Result<String> {
    const TOOL: &str = "update_event";
    let start = args
        .start_time
        .as_deref()
        .map(|raw| instant(TOOL, "start_time", raw, tz))
        .transpose()?;
    let end = args
        .end_time
        .as_deref()
        .map(|raw| instant(TOOL, "end_time", raw, tz))
        .transpose()?;

    let mut event = client.get_event(&args.event_id).await?;

    if let Some(summary) = args.summary {
        event.summary = Some(summary);
    }
    if let Some(description) = args.description {
        event.description = Some(description);
    }
    if let Some(start) = start {
        event.start = Some(event_time(start, tz));
    }
    if let Some(end) = end {
        event.end = Some(event_time(end, tz));
    }
    if let Some(emails) = args.attendees {
        event.attendees = Some(attendees(emails));
    }

    let updated = client.update_event(&args.event_id, event).await?;
    debug!(event_id = %args.event_id, "updated event");
    Ok(format!("Event updated: {}", written_link(&updated)?))
}

pub async fn delete_event(client: &dyn CalendarClient, args: DeleteEventArgs) -> Result<String> {
    client.delete_event(&args.event_id).await?;
    debug!(event_id = %args.event_id, "deleted event");
    Ok(format!("Event {} deleted successfully.", args.event_id))
}

fn instant(tool: &'static str, field: &str, raw: &str, tz: Tz) -> Result<DateTime<Utc>> {
    parse_instant(raw, tz).map_err(|e| ToolError::invalid(tool, format!("`{field}`: {e}")))
}

fn attendees(emails: Vec<String>) -> Vec<EventAttendee> {
    emails
        .into_iter()
        .map(|email| EventAttendee {
            email: Some(email),
            ..Default::default()
        })
        .collect()
}

fn link(event: &Event) -> &str {
    event.html_link.as_deref().unwrap_or("(no link)")
}

/// Inserts and updates must echo the event's link back.
fn written_link(event: &Event) -> Result<&str> {
    Ok(event
        .html_link
        .as_deref()
        .ok_or(ProviderError::MissingField("htmlLink"))?)
}
