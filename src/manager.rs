use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use login_provider::{LoginError, LoginProvider, Session};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::codec;
use crate::paths::default_token_path;
use crate::schema::{self, SchemaVariant};

/// Multi-account session manager over one token file.
///
/// The file is re-read at the start of every operation; only the client token
/// and the detected schema variant are cached across calls. Mutations run as
/// one load-modify-save unit under an exclusive lock, so two in-process
/// callers cannot interleave against the same file through one manager.
/// There is no cross-process coordination: last write wins.
///
/// None of the public operations raise. Disk failures degrade to an empty
/// result or a logged no-op, so callers must always check for an absent or
/// empty result.
pub struct SessionManager<P> {
    provider: P,
    state: Mutex<ManagerState>,
}

#[derive(Debug)]
struct ManagerState {
    path: PathBuf,
    client_token: String,
    variant: Option<SchemaVariant>,
}

impl<P: LoginProvider> SessionManager<P> {
    /// Opens a manager over `path`, or the default `angeliaData/tokens.json`
    /// when `None`.
    ///
    /// Reads the file once to seed the client token and schema variant. When
    /// the file is missing or carries no token, a fresh random client token
    /// is generated and kept for the manager's lifetime; the variant stays
    /// undetermined and writes default to the modern shape until a legacy
    /// entry has actually been observed.
    #[must_use]
    pub fn new(provider: P, path: Option<PathBuf>) -> Self {
        let path = path.unwrap_or_else(default_token_path);
        let (client_token, variant) = match codec::load(&path) {
            Some(document) => {
                let (_, variant) = schema::parse_document(&document);
                let client_token = document.client_token.unwrap_or_else(new_client_token);
                (client_token, variant)
            }
            None => (new_client_token(), None),
        };
        Self {
            provider,
            state: Mutex::new(ManagerState {
                path,
                client_token,
                variant,
            }),
        }
    }

    /// The installation-wide client token shared by every stored account.
    #[must_use]
    pub fn client_token(&self) -> String {
        self.lock_state().client_token.clone()
    }

    /// Reloads the file and rebuilds a session for every readable account
    /// entry, in file order.
    ///
    /// A missing file yields an empty list. Entries that fail to parse, or
    /// whose stored credentials the login provider reports as outdated, are
    /// skipped with a log line and never fail the call.
    pub fn list_accounts(&self) -> Vec<Session> {
        let mut state = self.lock_state();
        self.reload(&mut state)
    }

    /// Case-insensitive lookup over [`Self::list_accounts`]; first match wins.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<Session> {
        self.list_accounts()
            .into_iter()
            .find(|session| session.email.eq_ignore_ascii_case(email))
    }

    /// Logs in a new account with the cached client token.
    ///
    /// Returns `None` on any provider failure; no retry is attempted here.
    #[must_use]
    pub fn authenticate_new(&self, username: &str, password: &str) -> Option<Session> {
        let client_token = self.client_token();
        match self
            .provider
            .login_with_password(username, password, &client_token)
        {
            Ok(session) => Some(session),
            Err(error) => {
                error!("failed to authenticate account {username}: {error}");
                None
            }
        }
    }

    /// Inserts or replaces the stored record for `session`, serialized under
    /// the store's current schema variant, and stamps the cached client token
    /// into the file. Disk failures are logged and leave the call without
    /// effect.
    pub fn upsert(&self, session: &Session) {
        info!("updating stored tokens for {}", session.player_name);
        let state = self.lock_state();
        let mut document = codec::load(&state.path).unwrap_or_default();
        document.client_token = Some(state.client_token.clone());
        let variant = state.variant.unwrap_or(SchemaVariant::Modern);
        let identifier = schema::identifier_for(session, variant);
        document
            .accounts
            .insert(identifier, schema::serialize_entry(session, variant));
        if let Err(error) = codec::save(&state.path, &document) {
            error!("{error}");
        }
    }

    /// Deletes the stored record for `session`, if any, and rewrites the file
    /// with the current client token. A missing file is a no-op; deleting an
    /// absent identifier still rewrites the file. Disk failures are logged
    /// and leave the call without effect.
    pub fn remove(&self, session: &Session) {
        info!("deleting stored tokens for {}", session.player_name);
        let state = self.lock_state();
        let Some(mut document) = codec::load(&state.path) else {
            return;
        };
        document.client_token = Some(state.client_token.clone());
        let variant = state.variant.unwrap_or(SchemaVariant::Modern);
        let identifier = schema::identifier_for(session, variant);
        document.accounts.shift_remove(&identifier);
        if let Err(error) = codec::save(&state.path, &document) {
            error!("{error}");
        }
    }

    fn reload(&self, state: &mut ManagerState) -> Vec<Session> {
        let Some(document) = codec::load(&state.path) else {
            return Vec::new();
        };
        state.client_token = document
            .client_token
            .clone()
            .unwrap_or_else(new_client_token);
        let (accounts, variant) = schema::parse_document(&document);
        if let Some(variant) = variant {
            state.variant = Some(variant);
        }
        if document.accounts.is_empty() {
            info!("no account entries in {}", state.path.display());
        }

        let mut sessions = Vec::new();
        for account in accounts {
            let player_name = account.credentials.player_name.clone();
            match self
                .provider
                .reconstruct(account.credentials, &state.client_token)
            {
                Ok(session) => sessions.push(session),
                Err(LoginError::Outdated) => {
                    info!("stored tokens for {player_name} were outdated, skipping");
                }
                Err(error) => {
                    warn!("failed to rebuild session for {player_name}: {error}");
                }
            }
        }
        sessions
    }

    fn lock_state(&self) -> MutexGuard<'_, ManagerState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn new_client_token() -> String {
    Uuid::new_v4().to_string()
}
