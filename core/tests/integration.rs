//! Full accessor lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `RemindersService`
//! through `UreqSession` over real HTTP. Validates that request shaping,
//! response parsing and the cache behave end-to-end with the actual server.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use reminders_core::{ApiError, ReminderDraft, RemindersService, UreqSession};

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn params() -> BTreeMap<String, String> {
    BTreeMap::from([("dsid".to_string(), "1001".to_string())])
}

#[test]
fn reminders_lifecycle() {
    let root = start_server();

    // Step 1: construct — initial refresh sees the default list only.
    let mut service = RemindersService::new(&root, UreqSession::new(), params()).unwrap();
    assert_eq!(service.collections().len(), 1);
    assert_eq!(service.collections()["Reminders"].guid, "tasks");
    assert!(service.list("Reminders").unwrap().is_empty());

    // Step 2: post into an unknown collection — lands in the default list.
    let draft = ReminderDraft::new("Europe/Paris", "Buy milk").collection("Groceries");
    assert!(service.post(&draft).unwrap());

    // Step 3: cache is untouched until refresh.
    assert!(service.list("Reminders").unwrap().is_empty());
    service.refresh().unwrap();
    let list = service.list("Reminders").unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].title, "Buy milk");
    assert_eq!(list[0].description, "");
    assert_eq!(list[0].priority, 0);
    assert!(list[0].due.is_none());

    // Step 4: post with a due date and description.
    let due = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    let draft = ReminderDraft::new("UTC", "Dentist")
        .description("bring x-rays")
        .due_date(due);
    assert!(service.post(&draft).unwrap());

    // Step 5: cached ctag is now stale — the server refuses.
    assert!(!service.post(&ReminderDraft::new("UTC", "Too early")).unwrap());

    // Step 6: refresh picks up the second reminder in server order.
    service.refresh().unwrap();
    let list = service.list("Reminders").unwrap();
    let titles: Vec<_> = list.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["Buy milk", "Dentist"]);
    assert_eq!(list[1].description, "bring x-rays");
    assert_eq!(list[1].due, Some(due));

    // Step 7: with a fresh ctag posting works again.
    assert!(service.post(&ReminderDraft::new("UTC", "Now fine")).unwrap());
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();

    let err = RemindersService::new(&format!("http://{addr}"), UreqSession::new(), params())
        .err()
        .unwrap();
    assert!(matches!(err, ApiError::Transport(_)));
}
