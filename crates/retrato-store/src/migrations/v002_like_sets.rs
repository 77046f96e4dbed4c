//! v002 -- Per-user like rows replace the bare counter.
//!
//! One row per (content, user) pair; the like count is derived from the row
//! count, and one user can never like the same post or comment twice.

use rusqlite::Connection;

const UP_SQL: &str = r#"
-- Post likes
CREATE TABLE IF NOT EXISTS post_likes (
    post_id    TEXT NOT NULL,              -- FK -> posts(id)
    user_id    TEXT NOT NULL,              -- FK -> users(id)
    created_at TEXT NOT NULL,

    PRIMARY KEY (post_id, user_id),
    FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE CASCADE,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

-- Comment likes
CREATE TABLE IF NOT EXISTS comment_likes (
    comment_id TEXT NOT NULL,              -- FK -> comments(id)
    user_id    TEXT NOT NULL,              -- FK -> users(id)
    created_at TEXT NOT NULL,

    PRIMARY KEY (comment_id, user_id),
    FOREIGN KEY (comment_id) REFERENCES comments(id) ON DELETE CASCADE,
    FOREIGN KEY (user_id)    REFERENCES users(id) ON DELETE CASCADE
);

-- The counter column is no longer read.
ALTER TABLE posts DROP COLUMN likes;
"#;

pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
