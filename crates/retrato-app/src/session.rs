//! The single authenticated identity.
//!
//! The session never keeps a private copy of the user record: it holds the
//! id and re-fetches from the store on every read, so profile edits and
//! friend-list changes made elsewhere are visible immediately.

use retrato_store::{Database, NewUser, User};
use tracing::info;
use uuid::Uuid;

use crate::error::AuthError;

/// Avatar assigned to accounts created through registration.
const DEFAULT_AVATAR_URL: &str = "https://via.placeholder.com/150";

/// Registration form fields as submitted by the UI.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Process-wide login state: at most one authenticated identity at a time.
#[derive(Debug, Default)]
pub struct AuthSession {
    current_user_id: Option<Uuid>,
    loading: bool,
}

impl AuthSession {
    /// Start logged out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an identity is currently logged in.
    pub fn is_authenticated(&self) -> bool {
        self.current_user_id.is_some()
    }

    /// True while a login or registration call is in flight; drives the
    /// UI's submit spinner.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// The logged-in user's id, if any.
    pub fn current_user_id(&self) -> Option<Uuid> {
        self.current_user_id
    }

    /// Re-fetch the logged-in user from the store.
    ///
    /// `None` when logged out, or when the record was deleted underneath
    /// the session.
    pub fn current_user(&self, db: &Database) -> Result<Option<User>, AuthError> {
        match self.current_user_id {
            Some(id) => Ok(db.get_user(id)?),
            None => Ok(None),
        }
    }

    /// Log in with e-mail and password.
    ///
    /// `async` only so the UI can show its loading indicator across the
    /// call; there is no suspension point and no concurrent-call guard, so
    /// overlapping calls are last-write-wins.
    pub async fn login(
        &mut self,
        db: &Database,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        self.loading = true;
        let outcome = Self::check_credentials(db, email, password);
        self.loading = false;

        match outcome {
            Ok(user) => {
                self.current_user_id = Some(user.id);
                info!(user = %user.id, "login succeeded");
                Ok(user)
            }
            Err(err) => {
                // A failed attempt never leaves a half-authenticated session.
                self.current_user_id = None;
                Err(err)
            }
        }
    }

    /// Create an account and log it in.
    ///
    /// Same async-for-the-spinner convention as [`AuthSession::login`].
    /// The store is untouched when any check fails.
    pub async fn register(&mut self, db: &Database, form: RegisterForm) -> Result<User, AuthError> {
        self.loading = true;
        let outcome = Self::create_account(db, form);
        self.loading = false;

        match outcome {
            Ok(user) => {
                self.current_user_id = Some(user.id);
                info!(user = %user.id, username = %user.username, "registration succeeded");
                Ok(user)
            }
            Err(err) => {
                self.current_user_id = None;
                Err(err)
            }
        }
    }

    /// Log out unconditionally.
    pub fn logout(&mut self) {
        if let Some(id) = self.current_user_id.take() {
            info!(user = %id, "logged out");
        }
    }

    fn check_credentials(db: &Database, email: &str, password: &str) -> Result<User, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation);
        }

        let user = db
            .find_user_by_email(email)?
            .ok_or(AuthError::NotFound)?;

        // Plain-text comparison; the demo stores passwords unhashed.
        if user.password != password {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    fn create_account(db: &Database, form: RegisterForm) -> Result<User, AuthError> {
        if form.username.is_empty()
            || form.email.is_empty()
            || form.password.is_empty()
            || form.confirm_password.is_empty()
        {
            return Err(AuthError::Validation);
        }
        if form.password != form.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        if db.find_user_by_email(&form.email)?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let user = db.create_user(NewUser {
            username: form.username,
            email: form.email,
            password: form.password,
            avatar: Some(DEFAULT_AVATAR_URL.to_string()),
            cover: None,
            bio: None,
        })?;

        Ok(user)
    }
}
