//! CRUD operations for [`User`] records and their friendship edges.
//!
//! Friendship is stored as directed edges: `add_friend(a, b)` records only
//! that `a` lists `b`.  Keeping the relation mutual is the caller's
//! responsibility, mirrored call included.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use crate::database::{self, Database};
use crate::error::{Result, StoreError};
use crate::models::User;

/// Fields supplied when creating an account.  The store generates the id
/// and timestamps and starts the friend list empty.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub avatar: Option<String>,
    pub cover: Option<String>,
    pub bio: Option<String>,
}

/// Partial update for a [`User`].  `None` fields are left untouched.
///
/// The store does not bump `updated_at` on its own; a caller that wants the
/// bump includes it in the patch.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<String>,
    pub cover: Option<String>,
    pub bio: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

const USER_COLUMNS: &str =
    "id, username, email, password, avatar, cover, bio, created_at, updated_at";

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a new user.
    ///
    /// No e-mail uniqueness check is performed here; registration pre-checks
    /// before calling.
    pub fn create_user(&self, new: NewUser) -> Result<User> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        self.conn().execute(
            "INSERT INTO users (id, username, email, password, avatar, cover, bio, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                id.to_string(),
                new.username,
                new.email,
                new.password,
                new.avatar,
                new.cover,
                new.bio,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )?;

        Ok(User {
            id,
            username: new.username,
            email: new.email,
            password: new.password,
            avatar: new.avatar,
            cover: new.cover,
            bio: new.bio,
            created_at: now,
            updated_at: now,
            friends: Vec::new(),
        })
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Fetch a single user by id.  Absence is `None`, never an error.
    pub fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let user = self
            .conn()
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                params![id.to_string()],
                row_to_user,
            )
            .optional()?;

        match user {
            Some(mut user) => {
                user.friends = self.friends_of(user.id)?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// List all users in insertion order.
    pub fn list_users(&self) -> Result<Vec<User>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY rowid ASC"))?;

        let rows = stmt.query_map([], row_to_user)?;

        let mut users = Vec::new();
        for row in rows {
            let mut user = row?;
            user.friends = self.friends_of(user.id)?;
            users.push(user);
        }
        Ok(users)
    }

    /// Fetch a single user by e-mail address.
    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = self
            .conn()
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
                params![email],
                row_to_user,
            )
            .optional()?;

        match user {
            Some(mut user) => {
                user.friends = self.friends_of(user.id)?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Case-insensitive substring search over username and e-mail, in
    /// insertion order.  Backs the friends screen's search box.
    pub fn search_users(&self, query: &str) -> Result<Vec<User>> {
        let pattern = format!("%{query}%");

        let mut stmt = self.conn().prepare(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE username LIKE ?1 OR email LIKE ?1
             ORDER BY rowid ASC"
        ))?;

        let rows = stmt.query_map(params![pattern], row_to_user)?;

        let mut users = Vec::new();
        for row in rows {
            let mut user = row?;
            user.friends = self.friends_of(user.id)?;
            users.push(user);
        }
        Ok(users)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Merge the given fields into an existing user.
    ///
    /// Returns the updated record, or `None` for an unknown id.  Only the
    /// patched fields change; in particular `updated_at` is left alone
    /// unless the patch carries one.
    pub fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<Option<User>> {
        let Some(mut user) = self.get_user(id)? else {
            return Ok(None);
        };

        if let Some(username) = patch.username {
            user.username = username;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(password) = patch.password {
            user.password = password;
        }
        if let Some(avatar) = patch.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(cover) = patch.cover {
            user.cover = Some(cover);
        }
        if let Some(bio) = patch.bio {
            user.bio = Some(bio);
        }
        if let Some(updated_at) = patch.updated_at {
            user.updated_at = updated_at;
        }

        self.conn().execute(
            "UPDATE users
             SET username = ?2, email = ?3, password = ?4, avatar = ?5, cover = ?6,
                 bio = ?7, updated_at = ?8
             WHERE id = ?1",
            params![
                user.id.to_string(),
                user.username,
                user.email,
                user.password,
                user.avatar,
                user.cover,
                user.bio,
                user.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(Some(user))
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete a user.  Returns `true` if a record was removed.
    ///
    /// Cascade-clean: the user's friendship edges (both directions), posts,
    /// likes and comments go with the record, and replies to the removed
    /// comments are re-rooted.
    pub fn delete_user(&self, id: Uuid) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM users WHERE id = ?1", params![id.to_string()])?;
        Ok(affected > 0)
    }

    // ------------------------------------------------------------------
    // Friendships
    // ------------------------------------------------------------------

    /// Record that `user_id` lists `friend_id` as a friend.  Idempotent.
    ///
    /// Only one direction is written; callers keep the relation mutual by
    /// invoking this symmetrically on both sides.
    pub fn add_friend(&self, user_id: Uuid, friend_id: Uuid) -> Result<()> {
        if user_id == friend_id {
            return Err(StoreError::SelfFriend);
        }

        self.conn().execute(
            "INSERT OR IGNORE INTO friendships (user_id, friend_id, created_at)
             VALUES (?1, ?2, ?3)",
            params![
                user_id.to_string(),
                friend_id.to_string(),
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Remove `friend_id` from `user_id`'s friend list.  Idempotent; the
    /// mirrored edge is untouched.
    pub fn remove_friend(&self, user_id: Uuid, friend_id: Uuid) -> Result<()> {
        self.conn().execute(
            "DELETE FROM friendships WHERE user_id = ?1 AND friend_id = ?2",
            params![user_id.to_string(), friend_id.to_string()],
        )?;
        Ok(())
    }

    /// Friend ids of one user, in the order the friendships were made.
    fn friends_of(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let mut stmt = self.conn().prepare(
            "SELECT friend_id FROM friendships WHERE user_id = ?1 ORDER BY rowid ASC",
        )?;

        let rows = stmt.query_map(params![user_id.to_string()], |row| {
            let id_str: String = row.get(0)?;
            database::uuid_column(0, &id_str)
        })?;

        let mut friends = Vec::new();
        for row in rows {
            friends.push(row?);
        }
        Ok(friends)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a `rusqlite::Row` to a [`User`].  Friends are hydrated separately.
fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let id_str: String = row.get(0)?;
    let created_str: String = row.get(7)?;
    let updated_str: String = row.get(8)?;

    Ok(User {
        id: database::uuid_column(0, &id_str)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
        avatar: row.get(4)?,
        cover: row.get(5)?,
        bio: row.get(6)?,
        created_at: database::timestamp_column(7, &created_str)?,
        updated_at: database::timestamp_column(8, &updated_str)?,
        friends: Vec::new(),
    })
}
