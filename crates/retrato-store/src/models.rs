//! Domain model structs held in the in-memory database.
//!
//! Every struct derives `Serialize` and `Deserialize` with camelCase field
//! names so it can be handed directly to the UI layer over IPC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier, opaque to consumers.
    pub id: Uuid,
    /// Display and login name.
    pub username: String,
    /// E-mail address.  Uniqueness is checked at registration, not here.
    pub email: String,
    /// Plain-text password.  Demo application, stored unhashed on purpose.
    pub password: String,
    /// Optional avatar image URL.
    pub avatar: Option<String>,
    /// Optional profile cover image URL.
    pub cover: Option<String>,
    /// Optional free-form profile text.
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Ids of befriended users, in the order the friendships were made.
    /// One direction of the relation only; a mutual friendship means both
    /// sides list each other.  Never contains the user's own id.
    pub friends: Vec<Uuid>,
}

// ---------------------------------------------------------------------------
// Post
// ---------------------------------------------------------------------------

/// A photo post in the feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique identifier.
    pub id: Uuid,
    /// Author of the post.  Immutable after creation.
    pub owner_id: Uuid,
    /// Image URL.
    pub image_url: String,
    /// Optional caption text.
    pub caption: Option<String>,
    /// Ids of users who like this post.  Each id appears at most once;
    /// the displayed like count is always the length of this list.
    pub liked_by: Vec<Uuid>,
    /// Flat, chronological comment list.  The threaded view is rebuilt at
    /// read time from each comment's `parent_id`.
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Number of users who like this post.
    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }
}

// ---------------------------------------------------------------------------
// Comment
// ---------------------------------------------------------------------------

/// A comment on a post, optionally a reply to another comment of the same
/// post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique identifier.
    pub id: Uuid,
    /// The post this comment belongs to.
    pub post_id: Uuid,
    /// Author of the comment.
    pub author_id: Uuid,
    /// Comment text.
    pub content: String,
    /// Ids of users who like this comment.
    pub liked_by: Vec<Uuid>,
    /// Id of the comment this one replies to.  `None` for a root comment.
    /// Always references a comment of the same post.
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Number of users who like this comment.
    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn models_serialize_camel_case_for_the_ui() {
        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            content: "nice!".to_string(),
            liked_by: Vec::new(),
            parent_id: None,
            created_at: now,
            updated_at: now,
        };
        let post = Post {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            image_url: "https://example.com/p.jpg".to_string(),
            caption: None,
            liked_by: vec![comment.author_id],
            comments: vec![comment],
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&post).expect("serializable");
        assert!(value.get("ownerId").is_some());
        assert!(value.get("imageUrl").is_some());
        assert!(value.get("likedBy").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value["comments"][0].get("postId").is_some());
        assert!(value["comments"][0].get("parentId").is_some());
    }
}
