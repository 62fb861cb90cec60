//! Session model

use serde::{Deserialize, Serialize};

/// The persisted authentication state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub remember_me: bool,
}

impl Session {
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Whether this session may be resumed after a restart
    pub fn is_restorable(&self) -> bool {
        self.has_token() && self.remember_me
    }
}
