//! Persistent multi-account credential/session-token store.
//!
//! Accounts live in one JSON token file shared by the whole installation.
//! Two incompatible on-disk record shapes are supported: a legacy
//! single-profile layout keyed by player UUID and a modern multi-profile
//! layout keyed by user id. The shape in use is detected at load time and
//! preserved on write-back. Corrupt or stale account entries are skipped
//! with a log line, never a crash.
//!
//! Network authentication is not performed here; it is injected through the
//! `login_provider` contract crate.

mod codec;
mod error;
mod manager;
mod paths;
mod schema;

pub use codec::TokenDocument;
pub use error::TokenStoreError;
pub use manager::SessionManager;
pub use paths::{default_token_path, TOKEN_DIR, TOKEN_FILE};
pub use schema::SchemaVariant;
