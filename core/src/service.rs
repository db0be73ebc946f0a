//! The reminders accessor: a session-scoped cache of the remote lists.
//!
//! # Design
//! `RemindersService` owns one `Snapshot` and replaces it wholesale on every
//! successful `refresh`. The new snapshot is fully parsed before the swap,
//! so a failed refresh leaves the previous one in place. Posting never
//! touches the cache; call `refresh` to see the new reminder.
//!
//! No locking: `refresh` needs `&mut self`, so sharing across threads is the
//! caller's job.

use std::collections::BTreeMap;

use tracing::info;

use crate::client::RemindersClient;
use crate::error::Result;
use crate::session::Session;
use crate::types::{CollectionInfo, Reminder, ReminderDraft, Snapshot};

pub struct RemindersService<S> {
    client: RemindersClient,
    session: S,
    snapshot: Snapshot,
}

impl<S: Session> RemindersService<S> {
    /// Connects and performs the initial refresh. Fails with whatever that
    /// refresh fails with.
    pub fn new(service_root: &str, session: S, params: BTreeMap<String, String>) -> Result<Self> {
        let mut service = Self {
            client: RemindersClient::new(service_root, params),
            session,
            snapshot: Snapshot::default(),
        };
        service.refresh()?;
        Ok(service)
    }

    /// Re-fetches every collection and reminder.
    pub fn refresh(&mut self) -> Result<()> {
        let request = self.client.build_startup();
        let response = self.session.execute(&request)?;
        let snapshot = self.client.parse_startup(response)?;
        info!(
            collections = snapshot.collections.len(),
            reminders = snapshot.lists.values().map(Vec::len).sum::<usize>(),
            "reminders refreshed"
        );
        self.snapshot = snapshot;
        Ok(())
    }

    /// Creates a reminder. Returns whether the server accepted it.
    pub fn post(&self, draft: &ReminderDraft) -> Result<bool> {
        let request = self
            .client
            .build_create_reminder(draft, &self.snapshot.collections)?;
        let response = self.session.execute(&request)?;
        Ok(self.client.parse_create_reminder(response))
    }

    /// Collection title → `{guid, ctag}`.
    pub fn collections(&self) -> &BTreeMap<String, CollectionInfo> {
        &self.snapshot.collections
    }

    /// Collection title → reminders in server order.
    pub fn lists(&self) -> &BTreeMap<String, Vec<Reminder>> {
        &self.snapshot.lists
    }

    pub fn list(&self, title: &str) -> Option<&[Reminder]> {
        self.snapshot.lists.get(title).map(Vec::as_slice)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn session(&self) -> &S {
        &self.session
    }
}
