use retrato_store::StoreError;
use thiserror::Error;

/// Errors raised by login and registration.
///
/// Each failure kind is a distinct variant so the caller can tell them
/// apart; the `Display` strings are the messages a view surfaces through
/// the feedback banner.
#[derive(Error, Debug)]
pub enum AuthError {
    /// A required form field was left empty.
    #[error("Please fill in all fields")]
    Validation,

    /// No account matches the given e-mail address.
    #[error("User not found")]
    NotFound,

    /// The password does not match the account's.
    #[error("Incorrect password")]
    InvalidCredentials,

    /// Registration password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// The e-mail address is already registered.
    #[error("Email already registered")]
    DuplicateEmail,

    /// Underlying store failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
