//! Comment operations: creation, chronological reads and per-comment likes.
//!
//! Comments are stored flat.  A reply carries the id of the comment it
//! answers; the nested view is rebuilt at read time by
//! [`crate::threads::build_comment_threads`].

use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use crate::database::{self, Database};
use crate::error::{Result, StoreError};
use crate::models::Comment;

const COMMENT_COLUMNS: &str =
    "id, post_id, author_id, content, parent_id, created_at, updated_at";

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Append a comment to a post.
    ///
    /// A reply names its parent comment, which must already exist on the
    /// same post: an unknown post or parent is [`StoreError::NotFound`], a
    /// parent from another post is [`StoreError::ParentMismatch`].  Because
    /// the parent must pre-exist, the per-post comment graph can never
    /// contain a cycle.
    pub fn add_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        content: &str,
        parent_id: Option<Uuid>,
    ) -> Result<Comment> {
        if !self.post_exists(post_id)? {
            return Err(StoreError::NotFound);
        }

        if let Some(parent) = parent_id {
            match self.comment_post(parent)? {
                None => return Err(StoreError::NotFound),
                Some(owning_post) if owning_post != post_id => {
                    return Err(StoreError::ParentMismatch)
                }
                Some(_) => {}
            }
        }

        let id = Uuid::new_v4();
        let now = Utc::now();

        self.conn().execute(
            "INSERT INTO comments (id, post_id, author_id, content, parent_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                id.to_string(),
                post_id.to_string(),
                author_id.to_string(),
                content,
                parent_id.map(|p| p.to_string()),
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )?;

        Ok(Comment {
            id,
            post_id,
            author_id,
            content: content.to_string(),
            liked_by: Vec::new(),
            parent_id,
            created_at: now,
            updated_at: now,
        })
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// All comments of one post in chronological (insertion) order, like
    /// sets hydrated.
    pub fn comments_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = ?1 ORDER BY rowid ASC"
        ))?;

        let rows = stmt.query_map(params![post_id.to_string()], row_to_comment)?;

        let mut comments = Vec::new();
        for row in rows {
            let mut comment = row?;
            comment.liked_by = self.comment_likers(comment.id)?;
            comments.push(comment);
        }
        Ok(comments)
    }

    // ------------------------------------------------------------------
    // Likes
    // ------------------------------------------------------------------

    /// Flip `user_id`'s membership in one comment's like set, scoped to the
    /// named post: a comment id that does not belong to `post_id` is
    /// [`StoreError::NotFound`].
    ///
    /// Returns whether the user likes the comment after the call.
    pub fn toggle_comment_like(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool> {
        match self.comment_post(comment_id)? {
            Some(owning_post) if owning_post == post_id => {}
            _ => return Err(StoreError::NotFound),
        }

        let removed = self.conn().execute(
            "DELETE FROM comment_likes WHERE comment_id = ?1 AND user_id = ?2",
            params![comment_id.to_string(), user_id.to_string()],
        )?;
        if removed > 0 {
            return Ok(false);
        }

        self.conn().execute(
            "INSERT INTO comment_likes (comment_id, user_id, created_at) VALUES (?1, ?2, ?3)",
            params![
                comment_id.to_string(),
                user_id.to_string(),
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// The post a comment belongs to, or `None` for an unknown comment.
    fn comment_post(&self, comment_id: Uuid) -> Result<Option<Uuid>> {
        let post: Option<String> = self
            .conn()
            .query_row(
                "SELECT post_id FROM comments WHERE id = ?1",
                params![comment_id.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        match post {
            Some(post) => Ok(Some(database::uuid_column(0, &post)?)),
            None => Ok(None),
        }
    }

    /// Ids of users who like one comment, in the order the likes arrived.
    fn comment_likers(&self, comment_id: Uuid) -> Result<Vec<Uuid>> {
        let mut stmt = self.conn().prepare(
            "SELECT user_id FROM comment_likes WHERE comment_id = ?1 ORDER BY rowid ASC",
        )?;

        let rows = stmt.query_map(params![comment_id.to_string()], |row| {
            let id_str: String = row.get(0)?;
            database::uuid_column(0, &id_str)
        })?;

        let mut likers = Vec::new();
        for row in rows {
            likers.push(row?);
        }
        Ok(likers)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a `rusqlite::Row` to a [`Comment`].  Likes are hydrated separately.
fn row_to_comment(row: &rusqlite::Row<'_>) -> rusqlite::Result<Comment> {
    let id_str: String = row.get(0)?;
    let post_str: String = row.get(1)?;
    let author_str: String = row.get(2)?;
    let parent_str: Option<String> = row.get(4)?;
    let created_str: String = row.get(5)?;
    let updated_str: String = row.get(6)?;

    let parent_id = match parent_str {
        Some(parent) => Some(database::uuid_column(4, &parent)?),
        None => None,
    };

    Ok(Comment {
        id: database::uuid_column(0, &id_str)?,
        post_id: database::uuid_column(1, &post_str)?,
        author_id: database::uuid_column(2, &author_str)?,
        content: row.get(3)?,
        liked_by: Vec::new(),
        parent_id,
        created_at: database::timestamp_column(5, &created_str)?,
        updated_at: database::timestamp_column(6, &updated_str)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::NewUser;

    fn open() -> Database {
        Database::new().expect("in-memory database")
    }

    fn sample_user(db: &Database, name: &str) -> Uuid {
        db.create_user(NewUser {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password: "secret".to_string(),
            avatar: None,
            cover: None,
            bio: None,
        })
        .expect("create user")
        .id
    }

    #[test]
    fn comments_append_in_chronological_order() {
        let db = open();
        let ana = sample_user(&db, "ana");
        let bruno = sample_user(&db, "bruno");
        let post = db.create_post(ana, "https://example.com/p.jpg", None).unwrap();

        let first = db.add_comment(post.id, bruno, "nice!", None).unwrap();
        let second = db.add_comment(post.id, ana, "thanks", None).unwrap();

        let comments = db.comments_for_post(post.id).unwrap();
        let ids: Vec<Uuid> = comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);

        // Hydrated reads carry the comments along with the post.
        let post = db.get_post(post.id).unwrap().unwrap();
        assert_eq!(post.comments.len(), 2);
    }

    #[test]
    fn reply_must_name_an_existing_comment_of_the_same_post() {
        let db = open();
        let ana = sample_user(&db, "ana");
        let post = db.create_post(ana, "https://example.com/1.jpg", None).unwrap();
        let other = db.create_post(ana, "https://example.com/2.jpg", None).unwrap();
        let root = db.add_comment(post.id, ana, "first", None).unwrap();

        let reply = db
            .add_comment(post.id, ana, "reply", Some(root.id))
            .unwrap();
        assert_eq!(reply.parent_id, Some(root.id));

        assert!(matches!(
            db.add_comment(other.id, ana, "cross-post", Some(root.id)),
            Err(StoreError::ParentMismatch)
        ));
        assert!(matches!(
            db.add_comment(post.id, ana, "orphan", Some(Uuid::new_v4())),
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            db.add_comment(Uuid::new_v4(), ana, "no post", None),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn toggle_comment_like_is_an_involution() {
        let db = open();
        let ana = sample_user(&db, "ana");
        let bruno = sample_user(&db, "bruno");
        let post = db.create_post(ana, "https://example.com/p.jpg", None).unwrap();
        let comment = db.add_comment(post.id, ana, "first", None).unwrap();

        assert!(db.toggle_comment_like(post.id, comment.id, bruno).unwrap());
        let comments = db.comments_for_post(post.id).unwrap();
        assert_eq!(comments[0].liked_by, vec![bruno]);
        assert_eq!(comments[0].like_count(), 1);

        assert!(!db.toggle_comment_like(post.id, comment.id, bruno).unwrap());
        let comments = db.comments_for_post(post.id).unwrap();
        assert!(comments[0].liked_by.is_empty());
    }

    #[test]
    fn comment_like_is_scoped_to_the_owning_post() {
        let db = open();
        let ana = sample_user(&db, "ana");
        let post = db.create_post(ana, "https://example.com/1.jpg", None).unwrap();
        let other = db.create_post(ana, "https://example.com/2.jpg", None).unwrap();
        let comment = db.add_comment(post.id, ana, "first", None).unwrap();

        assert!(matches!(
            db.toggle_comment_like(other.id, comment.id, ana),
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            db.toggle_comment_like(post.id, Uuid::new_v4(), ana),
            Err(StoreError::NotFound)
        ));
    }
}
