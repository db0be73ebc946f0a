//! Synchronous client core for the remote reminders service.
//!
//! # Overview
//! Fetches a user's reminder collections, caches them in memory, and posts
//! new reminders. Request shaping and response parsing are pure
//! (`RemindersClient`); a `Session` performs the actual HTTP round-trip, and
//! `RemindersService` ties the two together around a cached `Snapshot`.
//!
//! # Design
//! - `RemindersClient` is stateless apart from the service root and the
//!   caller's baseline query parameters.
//! - Each endpoint is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - `RemindersService` replaces its snapshot wholesale on every refresh.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod due_date;
pub mod error;
pub mod http;
pub mod service;
pub mod session;
pub mod types;

pub use client::RemindersClient;
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::RemindersService;
pub use session::Session;
#[cfg(feature = "ureq")]
pub use session::UreqSession;
pub use types::{CollectionInfo, Reminder, ReminderDraft, Snapshot, DEFAULT_LIST_GUID};
