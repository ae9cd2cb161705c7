//! Deterministic mock implementation of the shared `login_provider` contract.
//!
//! This crate contains no network logic and is intended for local development
//! and contract-level integration testing of the token store.

use std::collections::{HashMap, HashSet};

use login_provider::{LoginError, LoginProvider, Session, StoredCredentials};

#[derive(Debug, Clone, PartialEq, Eq)]
struct MockAccount {
    password: String,
    player_name: String,
    player_uuid: String,
    user_id: String,
}

/// Deterministic mock provider used by `token_store` tests and local runs.
#[derive(Debug, Default)]
pub struct MockLoginProvider {
    accounts: HashMap<String, MockAccount>,
    outdated_tokens: HashSet<String>,
    transport_down: bool,
}

impl MockLoginProvider {
    /// Creates an empty mock provider that accepts any stored credentials.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account that `login_with_password` will accept.
    #[must_use]
    pub fn with_account(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        player_name: impl Into<String>,
        player_uuid: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        self.accounts.insert(
            username.into(),
            MockAccount {
                password: password.into(),
                player_name: player_name.into(),
                player_uuid: player_uuid.into(),
                user_id: user_id.into(),
            },
        );
        self
    }

    /// Marks an access token as outdated for `reconstruct`.
    #[must_use]
    pub fn with_outdated_token(mut self, access_token: impl Into<String>) -> Self {
        self.outdated_tokens.insert(access_token.into());
        self
    }

    /// Makes every provider call fail with a transport error.
    #[must_use]
    pub fn with_transport_down(mut self) -> Self {
        self.transport_down = true;
        self
    }
}

impl LoginProvider for MockLoginProvider {
    fn login_with_password(
        &self,
        username: &str,
        password: &str,
        client_token: &str,
    ) -> Result<Session, LoginError> {
        if self.transport_down {
            return Err(LoginError::transport("mock transport is down"));
        }
        let account = self.accounts.get(username).ok_or_else(|| {
            LoginError::transport(format!("no mock account registered for {username}"))
        })?;
        if account.password != password {
            return Err(LoginError::transport(format!(
                "wrong mock password for {username}"
            )));
        }
        Ok(Session {
            player_name: account.player_name.clone(),
            email: username.to_string(),
            access_token: format!("mock-access-{}", account.user_id),
            player_uuid: account.player_uuid.clone(),
            user_id: account.user_id.clone(),
            client_token: client_token.to_string(),
        })
    }

    fn reconstruct(
        &self,
        stored: StoredCredentials,
        client_token: &str,
    ) -> Result<Session, LoginError> {
        if self.transport_down {
            return Err(LoginError::transport("mock transport is down"));
        }
        if self.outdated_tokens.contains(&stored.access_token) {
            return Err(LoginError::Outdated);
        }
        Ok(stored.into_session(client_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(access_token: &str) -> StoredCredentials {
        StoredCredentials {
            player_name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            access_token: access_token.to_string(),
            player_uuid: "11112222-3333-4444-5555-666677778888".to_string(),
            user_id: "user-1".to_string(),
        }
    }

    #[test]
    fn login_succeeds_for_registered_account() {
        let provider = MockLoginProvider::new().with_account(
            "alice@example.com",
            "hunter2",
            "Alice",
            "11112222-3333-4444-5555-666677778888",
            "user-1",
        );

        let session = provider
            .login_with_password("alice@example.com", "hunter2", "client-token")
            .expect("registered account should log in");
        assert_eq!(session.player_name, "Alice");
        assert_eq!(session.access_token, "mock-access-user-1");
        assert_eq!(session.client_token, "client-token");
    }

    #[test]
    fn login_rejects_unknown_account_and_wrong_password() {
        let provider = MockLoginProvider::new().with_account(
            "alice@example.com",
            "hunter2",
            "Alice",
            "11112222-3333-4444-5555-666677778888",
            "user-1",
        );

        let unknown = provider
            .login_with_password("bob@example.com", "hunter2", "client-token")
            .expect_err("unknown account should fail");
        assert!(matches!(unknown, LoginError::Transport { .. }));

        let wrong = provider
            .login_with_password("alice@example.com", "wrong", "client-token")
            .expect_err("wrong password should fail");
        assert!(matches!(wrong, LoginError::Transport { .. }));
    }

    #[test]
    fn reconstruct_accepts_stored_credentials_by_default() {
        let provider = MockLoginProvider::new();

        let session = provider
            .reconstruct(stored("tok1"), "client-token")
            .expect("reconstruct should accept unknown tokens by default");
        assert_eq!(session.email, "alice@example.com");
        assert_eq!(session.client_token, "client-token");
    }

    #[test]
    fn reconstruct_reports_marked_tokens_as_outdated() {
        let provider = MockLoginProvider::new().with_outdated_token("tok1");

        let error = provider
            .reconstruct(stored("tok1"), "client-token")
            .expect_err("marked token should be outdated");
        assert!(matches!(error, LoginError::Outdated));
    }

    #[test]
    fn transport_down_fails_every_call() {
        let provider = MockLoginProvider::new().with_transport_down();

        assert!(matches!(
            provider.login_with_password("alice@example.com", "hunter2", "client-token"),
            Err(LoginError::Transport { .. })
        ));
        assert!(matches!(
            provider.reconstruct(stored("tok1"), "client-token"),
            Err(LoginError::Transport { .. })
        ));
    }
}
