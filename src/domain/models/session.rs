//! Session context threaded into every write.
//!
//! Authentication itself lives with the identity provider; the catalog only
//! needs to know whether someone is signed in and who.

use serde::{Deserialize, Serialize};

/// User id assumed in demo mode.
pub const DEMO_USER_ID: &str = "demo-user";

/// Who is acting, if anyone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Bearer token for the record store; the anon key is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default)]
    pub demo: bool,
}

impl SessionContext {
    /// No one signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }

    pub fn demo() -> Self {
        Self {
            user_id: Some(DEMO_USER_ID.to_string()),
            access_token: None,
            demo: true,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn is_signed_in(&self) -> bool {
        self.user_id.as_deref().is_some_and(|id| !id.trim().is_empty())
    }

    /// Current user id, if signed in.
    pub fn current_user(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|id| !id.trim().is_empty())
    }
}
