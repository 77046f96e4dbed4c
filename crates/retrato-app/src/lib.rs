//! # retrato-app
//!
//! Application-state layer for the Retrato photo-feed application.
//!
//! The embedding UI shell constructs one [`AppState`] at startup, wraps it
//! in `Arc<Mutex<_>>` and hands references to every view.  This crate owns
//! the authentication session, the single-slot feedback banner and the demo
//! seed data; the data itself lives in [`retrato_store`].

pub mod demo;
pub mod feedback;
pub mod session;
pub mod state;

mod error;

use tracing_subscriber::{fmt, EnvFilter};

pub use error::AuthError;
pub use feedback::{Feedback, FeedbackBanner, FeedbackKind};
pub use session::{AuthSession, RegisterForm};
pub use state::AppState;

/// Initialise the tracing subscriber for the embedding shell.
///
/// Honours `RUST_LOG`; defaults to debug output for the application crates.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("retrato_app=debug,retrato_store=info,warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
