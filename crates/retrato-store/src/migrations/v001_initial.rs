//! v001 -- Initial schema creation.
//!
//! Creates the four core tables: `users`, `friendships`, `posts` and
//! `comments`.  Deleting a user removes their friendship edges, posts and
//! comments through the `ON DELETE CASCADE` clauses.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Users
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS users (
    id         TEXT PRIMARY KEY NOT NULL,   -- UUID v4
    username   TEXT NOT NULL,
    email      TEXT NOT NULL,
    password   TEXT NOT NULL,               -- plain text, demo application
    avatar     TEXT,
    cover      TEXT,
    bio        TEXT,
    created_at TEXT NOT NULL,               -- ISO-8601 / RFC-3339
    updated_at TEXT NOT NULL
);

-- ----------------------------------------------------------------
-- Friendships (directed edges; a mutual friendship is two rows)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS friendships (
    user_id    TEXT NOT NULL,               -- FK -> users(id)
    friend_id  TEXT NOT NULL,               -- FK -> users(id)
    created_at TEXT NOT NULL,

    PRIMARY KEY (user_id, friend_id),
    FOREIGN KEY (user_id)   REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (friend_id) REFERENCES users(id) ON DELETE CASCADE
);

-- ----------------------------------------------------------------
-- Posts
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS posts (
    id         TEXT PRIMARY KEY NOT NULL,   -- UUID v4
    owner_id   TEXT NOT NULL,               -- FK -> users(id)
    image_url  TEXT NOT NULL,
    caption    TEXT,
    likes      INTEGER NOT NULL DEFAULT 0,  -- bare counter, superseded in v002
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,

    FOREIGN KEY (owner_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_posts_owner ON posts(owner_id);

-- ----------------------------------------------------------------
-- Comments
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS comments (
    id         TEXT PRIMARY KEY NOT NULL,   -- UUID v4
    post_id    TEXT NOT NULL,               -- FK -> posts(id)
    author_id  TEXT NOT NULL,               -- FK -> users(id)
    content    TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,

    FOREIGN KEY (post_id)   REFERENCES posts(id) ON DELETE CASCADE,
    FOREIGN KEY (author_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_comments_post ON comments(post_id);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
