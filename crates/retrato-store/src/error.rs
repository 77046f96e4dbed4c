use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),

    /// A referenced record does not exist.
    #[error("Record not found")]
    NotFound,

    /// A user may not appear in their own friend list.
    #[error("A user cannot befriend themselves")]
    SelfFriend,

    /// A reply must target a comment on the same post.
    #[error("Parent comment belongs to a different post")]
    ParentMismatch,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
