//! v003 -- Threaded replies.
//!
//! Comments gain an optional `parent_id` link to another comment of the
//! same post.  Storage stays flat; the tree is rebuilt at read time.  When
//! a parent comment disappears (its author was deleted), replies are
//! re-rooted rather than dropped.

use rusqlite::Connection;

const UP_SQL: &str = r#"
ALTER TABLE comments ADD COLUMN parent_id TEXT REFERENCES comments(id) ON DELETE SET NULL;

CREATE INDEX IF NOT EXISTS idx_comments_parent ON comments(parent_id);
"#;

pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
