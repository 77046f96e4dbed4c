//! # retrato-store
//!
//! In-memory data layer for the Retrato photo-feed application.
//!
//! All state lives in an in-memory SQLite database and is gone when the
//! process exits.  The crate exposes a synchronous [`Database`] handle with
//! typed CRUD helpers for every domain model, plus the read-time
//! comment-thread reconstruction consumed by the comment list.

pub mod comments;
pub mod database;
pub mod migrations;
pub mod models;
pub mod posts;
pub mod threads;
pub mod users;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use models::*;
pub use posts::PostPatch;
pub use threads::{build_comment_threads, flatten_threads, CommentThread};
pub use users::{NewUser, UserPatch};
