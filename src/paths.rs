use std::path::PathBuf;

pub const TOKEN_DIR: &str = "angeliaData";
pub const TOKEN_FILE: &str = "tokens.json";

/// Default location of the token file, relative to the working directory.
#[must_use]
pub fn default_token_path() -> PathBuf {
    PathBuf::from(TOKEN_DIR).join(TOKEN_FILE)
}
