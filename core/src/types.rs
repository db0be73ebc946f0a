//! Domain and wire types for the reminders API.
//!
//! # Design
//! Wire DTOs mirror the remote JSON exactly and stay crate-private where the
//! caller never needs them. The domain types (`CollectionInfo`, `Reminder`)
//! are what the accessor exposes after flattening a startup payload.
//! The mock-server crate defines its own copies; integration tests catch any
//! schema drift between the two.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Fallback parent list used when a draft names no known collection.
pub const DEFAULT_LIST_GUID: &str = "tasks";

/// Identity and version marker of a cached collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub guid: String,
    pub ctag: String,
}

/// A reminder as exposed by the accessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub title: String,
    /// Empty when the server sends none.
    pub description: String,
    pub due: Option<NaiveDateTime>,
    pub guid: String,
    /// Zero when the server sends none.
    pub priority: i64,
}

/// One consistent view of the remote state.
///
/// `collections` and `lists` always share the same key set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub collections: BTreeMap<String, CollectionInfo>,
    pub lists: BTreeMap<String, Vec<Reminder>>,
}

/// Input for creating a reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderDraft {
    /// Sent as `usertz`.
    pub time_zone: String,
    pub title: String,
    pub description: String,
    /// Title of the target collection. Unknown titles fall back to the
    /// default list.
    pub collection: Option<String>,
    pub due_date: Option<NaiveDateTime>,
}

impl ReminderDraft {
    pub fn new(time_zone: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            time_zone: time_zone.into(),
            title: title.into(),
            description: String::new(),
            collection: None,
            due_date: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    pub fn due_date(mut self, due_date: NaiveDateTime) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

// ---------------------------------------------------------------------------
// Wire: GET /rd/startup
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct StartupResponse {
    #[serde(rename = "Collections")]
    pub collections: Vec<WireCollection>,
    #[serde(rename = "Reminders")]
    pub reminders: Vec<WireReminder>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCollection {
    pub title: String,
    pub guid: String,
    pub ctag: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireReminder {
    pub p_guid: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable_array")]
    pub due_date: Option<Vec<i64>>,
    #[serde(default)]
    pub priority: Option<i64>,
    pub guid: String,
}

/// `null` and `[]` both mean "no due date".
fn nullable_array<'de, D>(deserializer: D) -> Result<Option<Vec<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<i64>>::deserialize(deserializer)?;
    Ok(values.filter(|v| !v.is_empty()))
}

// ---------------------------------------------------------------------------
// Wire: POST /rd/reminders/tasks
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct CreateReminderRequest<'a> {
    #[serde(rename = "Reminders")]
    pub reminder: NewReminder<'a>,
    #[serde(rename = "ClientState")]
    pub client_state: ClientState<'a>,
}

/// Full record the server expects; most fields are sent as explicit nulls.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewReminder<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub p_guid: &'a str,
    pub etag: Option<String>,
    pub order: Option<i64>,
    pub priority: i64,
    pub recurrence: Option<serde_json::Value>,
    pub alarms: Vec<serde_json::Value>,
    pub start_date: Option<Vec<i64>>,
    pub start_date_tz: Option<String>,
    pub start_date_is_all_day: bool,
    pub completed_date: Option<Vec<i64>>,
    pub due_date: Option<[i64; 6]>,
    pub due_date_is_all_day: bool,
    pub last_modified_date: Option<Vec<i64>>,
    pub created_date: Option<Vec<i64>>,
    pub is_family: Option<bool>,
    pub created_date_extended: i64,
    pub guid: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ClientState<'a> {
    #[serde(rename = "Collections")]
    pub collections: Vec<&'a CollectionInfo>,
}
