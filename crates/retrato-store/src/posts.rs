//! CRUD operations for [`Post`] records and their like sets.
//!
//! Reads return fully hydrated posts: the like set and the flat comment
//! list come along with every record, so a view never needs a second
//! round-trip before rendering.

use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use crate::database::{self, Database};
use crate::error::{Result, StoreError};
use crate::models::Post;

/// Partial update for a [`Post`].  Only the image and caption are editable;
/// owner, timestamps, likes and comments are never patched.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub image_url: Option<String>,
    pub caption: Option<String>,
}

const POST_COLUMNS: &str = "id, owner_id, image_url, caption, created_at, updated_at";

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a new post for `owner_id`.
    ///
    /// The feed reads in reverse insertion order, so a fresh post lands at
    /// the top without any sort step.
    pub fn create_post(
        &self,
        owner_id: Uuid,
        image_url: &str,
        caption: Option<&str>,
    ) -> Result<Post> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        self.conn().execute(
            "INSERT INTO posts (id, owner_id, image_url, caption, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id.to_string(),
                owner_id.to_string(),
                image_url,
                caption,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )?;

        Ok(Post {
            id,
            owner_id,
            image_url: image_url.to_string(),
            caption: caption.map(str::to_string),
            liked_by: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Fetch a single post by id, likes and comments included.
    pub fn get_post(&self, id: Uuid) -> Result<Option<Post>> {
        let post = self
            .conn()
            .query_row(
                &format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?1"),
                params![id.to_string()],
                row_to_post,
            )
            .optional()?;

        match post {
            Some(post) => Ok(Some(self.hydrate_post(post)?)),
            None => Ok(None),
        }
    }

    /// List all posts, newest first.
    pub fn list_posts(&self) -> Result<Vec<Post>> {
        self.collect_posts(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY rowid DESC"
        ))
    }

    /// Posts by one owner, preserving the overall newest-first ordering.
    pub fn posts_by_owner(&self, owner_id: Uuid) -> Result<Vec<Post>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE owner_id = ?1 ORDER BY rowid DESC"
        ))?;

        let rows = stmt.query_map(params![owner_id.to_string()], row_to_post)?;

        let mut posts = Vec::new();
        for row in rows {
            posts.push(self.hydrate_post(row?)?);
        }
        Ok(posts)
    }

    /// The feed shown to `viewer`: their own posts plus posts whose owner
    /// is a mutual friend (both directed edges present), newest first.
    pub fn feed_for(&self, viewer: Uuid) -> Result<Vec<Post>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {POST_COLUMNS} FROM posts p
             WHERE p.owner_id = ?1
                OR (EXISTS (SELECT 1 FROM friendships
                            WHERE user_id = ?1 AND friend_id = p.owner_id)
                    AND EXISTS (SELECT 1 FROM friendships
                                WHERE user_id = p.owner_id AND friend_id = ?1))
             ORDER BY p.rowid DESC"
        ))?;

        let rows = stmt.query_map(params![viewer.to_string()], row_to_post)?;

        let mut posts = Vec::new();
        for row in rows {
            posts.push(self.hydrate_post(row?)?);
        }
        Ok(posts)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Patch a post's image or caption.  Bumps `updated_at` to now.
    ///
    /// Returns the updated record, or `None` for an unknown id.
    pub fn edit_post(&self, post_id: Uuid, patch: PostPatch) -> Result<Option<Post>> {
        let Some(mut post) = self.get_post(post_id)? else {
            return Ok(None);
        };

        if let Some(image_url) = patch.image_url {
            post.image_url = image_url;
        }
        if let Some(caption) = patch.caption {
            post.caption = Some(caption);
        }
        post.updated_at = Utc::now();

        self.conn().execute(
            "UPDATE posts SET image_url = ?2, caption = ?3, updated_at = ?4 WHERE id = ?1",
            params![
                post.id.to_string(),
                post.image_url,
                post.caption,
                post.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(Some(post))
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete a post and, through the schema's cascades, its likes and
    /// comments.  Returns `true` if a record was removed.
    pub fn delete_post(&self, post_id: Uuid) -> Result<bool> {
        let affected = self.conn().execute(
            "DELETE FROM posts WHERE id = ?1",
            params![post_id.to_string()],
        )?;
        Ok(affected > 0)
    }

    // ------------------------------------------------------------------
    // Likes
    // ------------------------------------------------------------------

    /// Flip `user_id`'s membership in the post's like set.  Two calls with
    /// the same pair restore the original state.
    ///
    /// Returns whether the user likes the post after the call.
    pub fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        if !self.post_exists(post_id)? {
            return Err(StoreError::NotFound);
        }

        let removed = self.conn().execute(
            "DELETE FROM post_likes WHERE post_id = ?1 AND user_id = ?2",
            params![post_id.to_string(), user_id.to_string()],
        )?;
        if removed > 0 {
            return Ok(false);
        }

        self.conn().execute(
            "INSERT INTO post_likes (post_id, user_id, created_at) VALUES (?1, ?2, ?3)",
            params![
                post_id.to_string(),
                user_id.to_string(),
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    pub(crate) fn post_exists(&self, post_id: Uuid) -> Result<bool> {
        let found: Option<u32> = self
            .conn()
            .query_row(
                "SELECT 1 FROM posts WHERE id = ?1",
                params![post_id.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Attach the like set and comment list to a bare post row.
    fn hydrate_post(&self, mut post: Post) -> Result<Post> {
        post.liked_by = self.post_likers(post.id)?;
        post.comments = self.comments_for_post(post.id)?;
        Ok(post)
    }

    fn collect_posts(&self, sql: &str) -> Result<Vec<Post>> {
        let mut stmt = self.conn().prepare(sql)?;
        let rows = stmt.query_map([], row_to_post)?;

        let mut posts = Vec::new();
        for row in rows {
            posts.push(self.hydrate_post(row?)?);
        }
        Ok(posts)
    }

    /// Ids of users who like one post, in the order the likes arrived.
    fn post_likers(&self, post_id: Uuid) -> Result<Vec<Uuid>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT user_id FROM post_likes WHERE post_id = ?1 ORDER BY rowid ASC")?;

        let rows = stmt.query_map(params![post_id.to_string()], |row| {
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

/// Map a `rusqlite::Row` to a [`Post`].  Likes and comments are hydrated
/// separately.
fn row_to_post(row: &rusqlite::Row<'_>) -> rusqlite::Result<Post> {
    let id_str: String = row.get(0)?;
    let owner_str: String = row.get(1)?;
    let created_str: String = row.get(4)?;
    let updated_str: String = row.get(5)?;

    Ok(Post {
        id: database::uuid_column(0, &id_str)?,
        owner_id: database::uuid_column(1, &owner_str)?,
        image_url: row.get(2)?,
        caption: row.get(3)?,
        liked_by: Vec::new(),
        comments: Vec::new(),
        created_at: database::timestamp_column(4, &created_str)?,
        updated_at: database::timestamp_column(5, &updated_str)?,
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
    fn list_is_newest_first() {
        let db = open();
        let ana = sample_user(&db, "ana");
        let bruno = sample_user(&db, "bruno");

        let first = db.create_post(ana, "https://example.com/1.jpg", None).unwrap();
        let second = db.create_post(ana, "https://example.com/2.jpg", None).unwrap();
        let third = db.create_post(bruno, "https://example.com/3.jpg", None).unwrap();

        let ids: Vec<Uuid> = db.list_posts().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);

        let by_ana: Vec<Uuid> = db.posts_by_owner(ana).unwrap().iter().map(|p| p.id).collect();
        assert_eq!(by_ana, vec![second.id, first.id]);
    }

    #[test]
    fn toggle_like_is_an_involution() {
        let db = open();
        let ana = sample_user(&db, "ana");
        let bruno = sample_user(&db, "bruno");
        let post = db.create_post(ana, "https://example.com/p.jpg", None).unwrap();

        assert!(db.toggle_like(post.id, bruno).unwrap());
        assert!(db.toggle_like(post.id, ana).unwrap());
        let liked = db.get_post(post.id).unwrap().unwrap().liked_by;
        assert_eq!(liked, vec![bruno, ana]);

        // Second toggle for the same pair restores the original set.
        assert!(!db.toggle_like(post.id, ana).unwrap());
        let post = db.get_post(post.id).unwrap().unwrap();
        assert_eq!(post.liked_by, vec![bruno]);
        assert_eq!(post.like_count(), 1);
    }

    #[test]
    fn toggle_like_on_unknown_post_is_not_found() {
        let db = open();
        let ana = sample_user(&db, "ana");

        assert!(matches!(
            db.toggle_like(Uuid::new_v4(), ana),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn edit_patches_fields_and_bumps_updated_at() {
        let db = open();
        let ana = sample_user(&db, "ana");
        let post = db.create_post(ana, "https://example.com/p.jpg", None).unwrap();

        let edited = db
            .edit_post(
                post.id,
                PostPatch {
                    caption: Some("golden hour".to_string()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(edited.caption.as_deref(), Some("golden hour"));
        assert_eq!(edited.image_url, post.image_url);
        assert!(edited.updated_at >= post.updated_at);

        assert!(db
            .edit_post(Uuid::new_v4(), PostPatch::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn delete_post_removes_it_from_the_feed() {
        let db = open();
        let ana = sample_user(&db, "ana");
        let post = db.create_post(ana, "https://example.com/p.jpg", None).unwrap();

        assert!(db.delete_post(post.id).unwrap());
        assert!(db.get_post(post.id).unwrap().is_none());
        assert!(db.list_posts().unwrap().is_empty());
        assert!(!db.delete_post(post.id).unwrap());
    }

    #[test]
    fn feed_requires_mutual_friendship() {
        let db = open();
        let alice = sample_user(&db, "alice");
        let bob = sample_user(&db, "bob");
        let carol = sample_user(&db, "carol");

        let alice_post = db.create_post(alice, "https://example.com/a.jpg", None).unwrap();
        let bob_post = db.create_post(bob, "https://example.com/b.jpg", None).unwrap();
        db.create_post(carol, "https://example.com/c.jpg", None).unwrap();

        // One direction only: Bob's posts stay out of Alice's feed.
        db.add_friend(alice, bob).unwrap();
        let ids: Vec<Uuid> = db.feed_for(alice).unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![alice_post.id]);

        db.add_friend(bob, alice).unwrap();
        let ids: Vec<Uuid> = db.feed_for(alice).unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![bob_post.id, alice_post.id]);
    }
}
