//! Application state shared with the embedding UI shell.
//!
//! The shell constructs one [`AppState`] at startup, wraps it in
//! `Arc<Mutex<_>>` and hands references to every view; nothing here is
//! reachable through a global.

use retrato_store::{Database, StoreError};

use crate::feedback::FeedbackBanner;
use crate::session::AuthSession;

/// Central application state: the store plus the two UI-facing singletons.
pub struct AppState {
    /// The in-memory data store.
    pub db: Database,
    /// The single authenticated identity.
    pub session: AuthSession,
    /// The single-slot status banner.
    pub feedback: FeedbackBanner,
}

impl AppState {
    /// Open a fresh store and start logged out with the banner hidden.
    pub fn new() -> Result<Self, StoreError> {
        Ok(Self {
            db: Database::new()?,
            session: AuthSession::new(),
            feedback: FeedbackBanner::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::FeedbackKind;
    use crate::session::RegisterForm;

    fn form(name: &str) -> RegisterForm {
        RegisterForm {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn feed_and_interaction_scenario() {
        let mut app = AppState::new().unwrap();

        let alice = app.session.register(&app.db, form("alice")).await.unwrap();
        app.session.logout();
        let bob = app.session.register(&app.db, form("bob")).await.unwrap();

        let alice_post = app
            .db
            .create_post(alice.id, "https://example.com/sunset.jpg", Some("Sunset"))
            .unwrap();
        let bob_post = app
            .db
            .create_post(bob.id, "https://example.com/breakfast.jpg", None)
            .unwrap();

        app.db.add_comment(alice_post.id, bob.id, "nice!", None).unwrap();
        app.db.toggle_like(alice_post.id, bob.id).unwrap();

        let post = app.db.get_post(alice_post.id).unwrap().unwrap();
        assert_eq!(post.liked_by, vec![bob.id]);
        assert_eq!(post.comments.len(), 1);
        assert_eq!(post.comments[0].content, "nice!");

        // Bob's posts stay out of Alice's feed until the friendship is
        // mutual.
        let feed: Vec<_> = app.db.feed_for(alice.id).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, alice_post.id);

        app.db.add_friend(alice.id, bob.id).unwrap();
        app.db.add_friend(bob.id, alice.id).unwrap();
        let feed: Vec<_> = app.db.feed_for(alice.id).unwrap();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].id, bob_post.id);

        app.feedback.show(FeedbackKind::Success, "Post liked");
        assert!(app.feedback.current().visible);
    }
}
