//! Stateless HTTP request builder and response parser for the reminders API.
//!
//! # Design
//! `RemindersClient` holds the service root and the caller's baseline query
//! parameters and nothing else. Each endpoint is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`; `RemindersService` runs the round-trip in between.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::due_date;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    ClientState, CollectionInfo, CreateReminderRequest, NewReminder, Reminder, ReminderDraft,
    Snapshot, StartupResponse, WireReminder, DEFAULT_LIST_GUID,
};

const CLIENT_VERSION: &str = "4.0";
const LANG: &str = "en-us";
const STARTUP_TZ: &str = "UTC";

/// Synchronous, stateless client for the reminders endpoints.
#[derive(Debug, Clone)]
pub struct RemindersClient {
    service_root: String,
    params: BTreeMap<String, String>,
}

impl RemindersClient {
    pub fn new(service_root: &str, params: BTreeMap<String, String>) -> Self {
        Self {
            service_root: service_root.trim_end_matches('/').to_string(),
            params,
        }
    }

    pub fn service_root(&self) -> &str {
        &self.service_root
    }

    pub fn build_startup(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/rd/startup", self.service_root),
            query: self.query(STARTUP_TZ),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Flattens a startup payload into per-collection lists.
    pub fn parse_startup(&self, response: HttpResponse) -> Result<Snapshot> {
        check_status(&response)?;
        let data: StartupResponse = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;

        let mut snapshot = Snapshot::default();
        for collection in &data.collections {
            let reminders = data
                .reminders
                .iter()
                .filter(|r| r.p_guid == collection.guid)
                .map(to_reminder)
                .collect::<Result<Vec<_>>>()?;

            // Duplicate titles: the later collection wins in both maps.
            snapshot.collections.insert(
                collection.title.clone(),
                CollectionInfo {
                    guid: collection.guid.clone(),
                    ctag: collection.ctag.clone(),
                },
            );
            snapshot.lists.insert(collection.title.clone(), reminders);
        }
        Ok(snapshot)
    }

    /// Builds the POST for a new reminder.
    ///
    /// `collections` is the caller's cached view; it picks the parent list
    /// and is echoed back as `ClientState` so the server can check ctags.
    pub fn build_create_reminder(
        &self,
        draft: &ReminderDraft,
        collections: &BTreeMap<String, CollectionInfo>,
    ) -> Result<HttpRequest> {
        let p_guid = resolve_parent(draft.collection.as_deref(), collections);
        let body = CreateReminderRequest {
            reminder: NewReminder {
                title: &draft.title,
                description: &draft.description,
                p_guid,
                etag: None,
                order: None,
                priority: 0,
                recurrence: None,
                alarms: Vec::new(),
                start_date: None,
                start_date_tz: None,
                start_date_is_all_day: false,
                completed_date: None,
                due_date: draft.due_date.as_ref().map(due_date::encode),
                due_date_is_all_day: false,
                last_modified_date: None,
                created_date: None,
                is_family: None,
                created_date_extended: Utc::now().timestamp_millis(),
                guid: Uuid::new_v4().to_string(),
            },
            client_state: ClientState {
                collections: collections.values().collect(),
            },
        };
        let body =
            serde_json::to_string(&body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        debug!(p_guid, title = %draft.title, "built create-reminder request");

        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/rd/reminders/tasks", self.service_root),
            query: self.query(&draft.time_zone),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// The server's answer is only checked for a 2xx status.
    pub fn parse_create_reminder(&self, response: HttpResponse) -> bool {
        if !response.is_success() {
            warn!(status = response.status, "create-reminder rejected");
        }
        response.is_success()
    }

    /// Baseline params merged with the fixed overrides; overrides win.
    fn query(&self, usertz: &str) -> Vec<(String, String)> {
        let mut merged = self.params.clone();
        merged.insert("clientVersion".to_string(), CLIENT_VERSION.to_string());
        merged.insert("lang".to_string(), LANG.to_string());
        merged.insert("usertz".to_string(), usertz.to_string());
        merged.into_iter().collect()
    }
}

fn resolve_parent<'a>(
    collection: Option<&str>,
    collections: &'a BTreeMap<String, CollectionInfo>,
) -> &'a str {
    let Some(title) = collection else {
        return DEFAULT_LIST_GUID;
    };
    match collections.get(title) {
        Some(info) => &info.guid,
        None => {
            warn!(collection = title, "unknown collection, using default list");
            DEFAULT_LIST_GUID
        }
    }
}

fn to_reminder(wire: &WireReminder) -> Result<Reminder> {
    let due = wire.due_date.as_deref().map(due_date::decode).transpose()?;
    Ok(Reminder {
        title: wire.title.clone(),
        description: wire.description.clone().unwrap_or_default(),
        due,
        guid: wire.guid.clone(),
        priority: wire.priority.unwrap_or_default(),
    })
}

fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
