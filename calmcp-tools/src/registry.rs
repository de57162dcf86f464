//! The calendar tool descriptors exposed for discovery.

use calmcp_core::{FieldSpec, FieldType, ToolDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarTool {
    CreateEvent,
    ListEvents,
    UpdateEvent,
    DeleteEvent,
}

impl CalendarTool {
    pub const ALL: [CalendarTool; 4] = [
        Self::CreateEvent,
        Self::ListEvents,
        Self::UpdateEvent,
        Self::DeleteEvent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            | Self::CreateEvent => "create_event",
            | Self::ListEvents => "list_events",
            | Self::UpdateEvent => "update_event",
            | Self::DeleteEvent => "delete_event",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }
}

const CREATE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("summary", FieldType::String, "Event title"),
    FieldSpec::required(
        "start_time",
        FieldType::String,
        "Start time (ISO-8601, e.g. 2024-05-01T10:00:00Z)",
    ),
    FieldSpec::required(
        "end_time",
        FieldType::String,
        "End time (ISO-8601, e.g. 2024-05-01T11:00:00Z)",
    ),
    FieldSpec::optional("description", FieldType::String, "Event description"),
    FieldSpec::optional("attendees", FieldType::StringArray, "Attendee email addresses"),
];

const LIST_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("time_min", FieldType::String, "Start of the time range (ISO-8601)"),
    FieldSpec::required("time_max", FieldType::String, "End of the time range (ISO-8601)"),
    FieldSpec::optional(
        "max_results",
        FieldType::Integer,
        "Maximum number of events to return (default 10)",
    ),
];

const UPDATE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("event_id", FieldType::String, "ID of the event to update"),
    FieldSpec::optional("summary", FieldType::String, "New event title"),
    FieldSpec::optional("start_time", FieldType::String, "New start time (ISO-8601)"),
    FieldSpec::optional("end_time", FieldType::String, "New end time (ISO-8601)"),
    FieldSpec::optional("description", FieldType::String, "New event description"),
    FieldSpec::optional(
        "attendees",
        FieldType::StringArray,
        "New attendee email addresses (replaces the existing list)",
    ),
];

const DELETE_FIELDS: &[FieldSpec] =
    &[FieldSpec::required("event_id", FieldType::String, "ID of the event to delete")];

pub static CALENDAR_TOOLS: [ToolDescriptor; 4] = [
    ToolDescriptor {
        name: "create_event",
        description: "Create a new event on the primary Google Calendar",
        fields: CREATE_FIELDS,
    },
    ToolDescriptor {
        name: "list_events",
        description: "List events on the primary Google Calendar within a time range",
        fields: LIST_FIELDS,
    },
    ToolDescriptor {
        name: "update_event",
        description: "Update an existing event on the primary Google Calendar",
        fields: UPDATE_FIELDS,
    },
    ToolDescriptor {
        name: "delete_event",
        description: "Delete an event from the primary Google Calendar",
        fields: DELETE_FIELDS,
    },
];
