//! Demo seed data.
//!
//! The application ships with a couple of accounts and posts so the feed is
//! not empty on first launch.  Nothing in the stores depends on this
//! module.

use retrato_store::{Database, NewUser, StoreError, User};
use tracing::debug;

/// Create the default demo accounts and content.
///
/// Returns the seeded users in creation order.
pub fn seed(db: &Database) -> Result<Vec<User>, StoreError> {
    let ana = db.create_user(NewUser {
        username: "ana".to_string(),
        email: "ana@example.com".to_string(),
        password: "123456".to_string(),
        avatar: Some("https://via.placeholder.com/150".to_string()),
        cover: None,
        bio: Some("Photography and coffee.".to_string()),
    })?;
    let bruno = db.create_user(NewUser {
        username: "bruno".to_string(),
        email: "bruno@example.com".to_string(),
        password: "123456".to_string(),
        avatar: Some("https://via.placeholder.com/150/ff6b6b".to_string()),
        cover: None,
        bio: None,
    })?;

    // The demo pair are mutual friends so both feeds start with content.
    db.add_friend(ana.id, bruno.id)?;
    db.add_friend(bruno.id, ana.id)?;

    let first = db.create_post(
        ana.id,
        "https://via.placeholder.com/400x400",
        Some("First photo!"),
    )?;
    db.create_post(
        bruno.id,
        "https://via.placeholder.com/400x400/ff6b6b",
        Some("Another great day!"),
    )?;

    db.add_comment(first.id, bruno.id, "Very cool!", None)?;
    db.toggle_like(first.id, bruno.id)?;

    debug!(users = 2, posts = 2, "demo data seeded");

    Ok(vec![ana, bruno])
}
