use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info};

use crate::error::TokenStoreError;

/// The whole on-disk token document.
///
/// Account entries stay opaque [`Value`]s here; interpreting them is the
/// schema layer's job. Unknown top-level fields are captured in `extra` so a
/// hand-edited file survives a write-back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenDocument {
    #[serde(
        rename = "clientToken",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub client_token: Option<String>,

    #[serde(rename = "authenticationDatabase", default)]
    pub accounts: Map<String, Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reads the token document, or `None` when the file is missing, unreadable,
/// or malformed. Callers treat all three identically as an empty store.
pub fn load(path: &Path) -> Option<TokenDocument> {
    if !path.exists() {
        info!("token file {} does not exist yet", path.display());
        return None;
    }
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(source) => {
            error!("{}", TokenStoreError::io("reading token file", path, source));
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(document) => Some(document),
        Err(source) => {
            error!("{}", TokenStoreError::json_parse(path, source));
            None
        }
    }
}

/// Writes the whole document, creating parent directories as needed.
///
/// The write is a plain whole-file replace; a crash mid-write can leave a
/// truncated file.
pub fn save(path: &Path, document: &TokenDocument) -> Result<(), TokenStoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|source| TokenStoreError::io("creating token directory", parent, source))?;
        }
    }
    let raw = serde_json::to_string(document)
        .map_err(|source| TokenStoreError::json_serialize(path, source))?;
    fs::write(path, raw).map_err(|source| TokenStoreError::io("writing token file", path, source))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{load, save, TokenDocument};

    #[test]
    fn load_returns_none_for_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        assert!(load(&dir.path().join("tokens.json")).is_none());
    }

    #[test]
    fn load_returns_none_for_malformed_json() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, "{ this is invalid json").expect("file should be written");

        assert!(load(&path).is_none());
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("angeliaData").join("tokens.json");

        save(&path, &TokenDocument::default()).expect("save should create parents");
        assert!(path.is_file());
    }

    #[test]
    fn unknown_top_level_fields_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("tokens.json");
        std::fs::write(
            &path,
            json!({
                "clientToken": "abc",
                "authenticationDatabase": {},
                "launcherVersion": { "name": "1.6.14" },
            })
            .to_string(),
        )
        .expect("fixture should be written");

        let document = load(&path).expect("fixture should parse");
        assert_eq!(document.client_token.as_deref(), Some("abc"));
        assert_eq!(
            document.extra.get("launcherVersion"),
            Some(&json!({ "name": "1.6.14" }))
        );

        save(&path, &document).expect("save should succeed");
        let reread = load(&path).expect("saved document should parse");
        assert_eq!(reread, document);
    }
}
