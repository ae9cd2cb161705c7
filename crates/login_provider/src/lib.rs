//! Minimal contract between the token store and the network login flow.
//!
//! This crate intentionally defines only the validated-session type, the
//! persisted-field bundle handed back for re-authentication, and the failure
//! taxonomy. It excludes transport details, endpoint payloads, and token
//! refresh scheduling.

use thiserror::Error;

/// A validated session, produced either by a fresh password login or by
/// reconstructing previously stored credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub player_name: String,
    pub email: String,
    pub access_token: String,
    pub player_uuid: String,
    pub user_id: String,
    /// Installation-wide token shared by every account in the store.
    pub client_token: String,
}

/// The per-account fields the store persists and hands back to the login
/// flow for re-authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub player_name: String,
    pub email: String,
    pub access_token: String,
    pub player_uuid: String,
    pub user_id: String,
}

impl StoredCredentials {
    /// Pairs these stored fields with the installation client token.
    #[must_use]
    pub fn into_session(self, client_token: impl Into<String>) -> Session {
        Session {
            player_name: self.player_name,
            email: self.email,
            access_token: self.access_token,
            player_uuid: self.player_uuid,
            user_id: self.user_id,
            client_token: client_token.into(),
        }
    }
}

/// Failure reported by a login provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("login endpoint unreachable: {message}")]
    Transport { message: String },

    #[error("stored credentials are no longer valid for re-authentication")]
    Outdated,

    #[error("stored credentials were rejected: {message}")]
    Malformed { message: String },
}

impl LoginError {
    /// Constructs a transport-level failure.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Constructs a rejected-credentials failure.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

/// Capability interface for authenticating accounts against the login server.
pub trait LoginProvider: Send + Sync {
    /// Logs in with username and password, producing a fresh session bound to
    /// `client_token`.
    fn login_with_password(
        &self,
        username: &str,
        password: &str,
        client_token: &str,
    ) -> Result<Session, LoginError>;

    /// Rebuilds a session from previously stored credentials, or reports them
    /// as outdated.
    fn reconstruct(
        &self,
        stored: StoredCredentials,
        client_token: &str,
    ) -> Result<Session, LoginError>;
}

#[cfg(test)]
mod tests {
    use super::{LoginError, StoredCredentials};

    fn stored() -> StoredCredentials {
        StoredCredentials {
            player_name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            access_token: "tok1".to_string(),
            player_uuid: "11112222-3333-4444-5555-666677778888".to_string(),
            user_id: "user-1".to_string(),
        }
    }

    #[test]
    fn into_session_carries_all_stored_fields_and_client_token() {
        let session = stored().into_session("client-token");

        assert_eq!(session.player_name, "Alice");
        assert_eq!(session.email, "alice@example.com");
        assert_eq!(session.access_token, "tok1");
        assert_eq!(session.player_uuid, "11112222-3333-4444-5555-666677778888");
        assert_eq!(session.user_id, "user-1");
        assert_eq!(session.client_token, "client-token");
    }

    #[test]
    fn login_error_messages_name_the_failure() {
        assert_eq!(
            LoginError::transport("connection refused").to_string(),
            "login endpoint unreachable: connection refused"
        );
        assert_eq!(
            LoginError::Outdated.to_string(),
            "stored credentials are no longer valid for re-authentication"
        );
        assert_eq!(
            LoginError::malformed("missing selected profile").to_string(),
            "stored credentials were rejected: missing selected profile"
        );
    }
}
