//! User input

use serde::{Deserialize, Serialize};

/// Fields for a new user row.
///
/// Stored verbatim: hashing the password is the caller's job. The email
/// keeps its casing but is unique and matched case-insensitively.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

// Keep passwords out of logs and `instrument` spans.
impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Normalize an email for lookup.
pub fn normalize_email(email: &str) -> String {
    email.to_lowercase()
}
