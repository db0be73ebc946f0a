use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};
use uuid::Uuid;

/// Guid of the default list every account has.
pub const DEFAULT_LIST_GUID: &str = "tasks";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub title: String,
    pub guid: String,
    pub ctag: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub p_guid: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    pub guid: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Store {
    #[serde(rename = "Collections")]
    pub collections: Vec<Collection>,
    #[serde(rename = "Reminders")]
    pub reminders: Vec<Reminder>,
}

impl Store {
    /// A fresh account: just the default list, no reminders.
    pub fn seeded() -> Self {
        Self {
            collections: vec![Collection {
                title: "Reminders".to_string(),
                guid: DEFAULT_LIST_GUID.to_string(),
                ctag: new_ctag(),
            }],
            reminders: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
pub struct CreateReminder {
    #[serde(rename = "Reminders")]
    pub reminder: NewReminder,
    #[serde(rename = "ClientState")]
    pub client_state: ClientState,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReminder {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub p_guid: String,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub due_date: Option<Vec<i64>>,
    pub guid: String,
}

#[derive(Deserialize)]
pub struct ClientState {
    #[serde(rename = "Collections")]
    pub collections: Vec<CollectionVersion>,
}

#[derive(Deserialize)]
pub struct CollectionVersion {
    pub guid: String,
    pub ctag: String,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/rd/startup", get(startup))
        .route("/rd/reminders/tasks", post(create_reminder))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn new_ctag() -> String {
    Uuid::new_v4().simple().to_string()
}

fn has_client_version(params: &HashMap<String, String>) -> bool {
    params.contains_key("clientVersion")
}

async fn startup(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Store>, StatusCode> {
    if !has_client_version(&params) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let store = db.read().await;
    Ok(Json(store.clone()))
}

async fn create_reminder(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
    Json(input): Json<CreateReminder>,
) -> Result<Json<Reminder>, StatusCode> {
    if !has_client_version(&params) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = db.write().await;

    let stale = input.client_state.collections.iter().any(|seen| {
        store
            .collections
            .iter()
            .any(|c| c.guid == seen.guid && c.ctag != seen.ctag)
    });
    if stale {
        warn!("client state is stale");
        return Err(StatusCode::CONFLICT);
    }

    let new = input.reminder;
    let parent = store
        .collections
        .iter_mut()
        .find(|c| c.guid == new.p_guid)
        .ok_or(StatusCode::NOT_FOUND)?;
    parent.ctag = new_ctag();

    let reminder = Reminder {
        p_guid: new.p_guid,
        title: new.title,
        description: new.description.filter(|d| !d.is_empty()),
        due_date: new.due_date,
        priority: new.priority.filter(|p| *p != 0),
        guid: new.guid,
    };
    info!(title = %reminder.title, parent = %reminder.p_guid, "reminder created");
    store.reminders.push(reminder.clone());
    Ok(Json(reminder))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_serializes_with_capitalized_keys() {
        let json = serde_json::to_value(Store::seeded()).unwrap();
        assert_eq!(json["Collections"][0]["guid"], "tasks");
        assert_eq!(json["Collections"][0]["title"], "Reminders");
        assert_eq!(json["Reminders"], serde_json::json!([]));
    }

    #[test]
    fn reminder_omits_absent_optionals() {
        let reminder = Reminder {
            p_guid: "G1".to_string(),
            title: "Milk".to_string(),
            description: None,
            due_date: None,
            priority: None,
            guid: "R1".to_string(),
        };
        let json = serde_json::to_value(&reminder).unwrap();
        assert_eq!(json["pGuid"], "G1");
        assert!(json.get("description").is_none());
        assert!(json.get("dueDate").is_none());
        assert!(json.get("priority").is_none());
    }

    #[test]
    fn create_reminder_accepts_explicit_nulls() {
        let input: CreateReminder = serde_json::from_str(
            r#"{"Reminders":{"title":"X","description":"","pGuid":"tasks","etag":null,
                "priority":0,"dueDate":null,"guid":"abc"},
                "ClientState":{"Collections":[]}}"#,
        )
        .unwrap();
        assert_eq!(input.reminder.p_guid, "tasks");
        assert!(input.reminder.due_date.is_none());
    }

    #[test]
    fn create_reminder_rejects_missing_client_state() {
        let result: Result<CreateReminder, _> = serde_json::from_str(
            r#"{"Reminders":{"title":"X","pGuid":"tasks","guid":"abc"}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn seeded_ctags_are_unique() {
        assert_ne!(Store::seeded().collections[0].ctag, Store::seeded().collections[0].ctag);
    }
}
