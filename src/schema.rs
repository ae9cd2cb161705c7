use login_provider::{Session, StoredCredentials};
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::codec::TokenDocument;
use crate::error::TokenStoreError;

/// Which of the two incompatible on-disk record shapes a file uses.
///
/// `Legacy` keys accounts by player UUID and keeps the display name at the
/// entry's top level; `Modern` keys accounts by user id and nests the display
/// name under a `profiles` map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    Legacy,
    Modern,
}

impl SchemaVariant {
    /// Detects the shape of one account entry: a top-level `displayName`
    /// field marks it as legacy.
    #[must_use]
    pub fn detect(entry: &Value) -> Self {
        if entry.get("displayName").is_some() {
            Self::Legacy
        } else {
            Self::Modern
        }
    }
}

/// One account entry interpreted into its persisted fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAccount {
    pub identifier: String,
    pub variant: SchemaVariant,
    pub credentials: StoredCredentials,
}

/// Parses every account entry in `document`, skipping unreadable ones with a
/// log line.
///
/// The returned variant is the one detected on the last successfully parsed
/// entry; it governs how records are written back. A file mixing both shapes
/// is therefore not round-tripped faithfully (documented quirk).
pub fn parse_document(document: &TokenDocument) -> (Vec<ParsedAccount>, Option<SchemaVariant>) {
    let mut accounts = Vec::new();
    let mut variant = None;
    for (identifier, entry) in &document.accounts {
        match parse_entry(identifier, entry) {
            Ok(parsed) => {
                variant = Some(parsed.variant);
                accounts.push(parsed);
            }
            Err(error) => warn!("skipping account entry: {error}"),
        }
    }
    (accounts, variant)
}

/// Interprets one entry under whichever shape it carries.
///
/// `identifier` is the entry's own key in the `authenticationDatabase` map:
/// the player UUID under legacy, the user id under modern.
pub fn parse_entry(identifier: &str, entry: &Value) -> Result<ParsedAccount, TokenStoreError> {
    let fields = entry.as_object().ok_or_else(|| TokenStoreError::NotAnObject {
        identifier: identifier.to_string(),
    })?;
    let variant = SchemaVariant::detect(entry);
    let access_token = required_str(identifier, fields, "accessToken")?.to_string();
    let email = required_str(identifier, fields, "username")?.to_string();

    let (player_name, player_uuid, user_id) = match variant {
        SchemaVariant::Legacy => {
            let player_name = required_str(identifier, fields, "displayName")?.to_string();
            let user_id = required_str(identifier, fields, "userid")?.to_string();
            (player_name, dashed_uuid(identifier), user_id)
        }
        SchemaVariant::Modern => {
            let profiles = fields
                .get("profiles")
                .and_then(Value::as_object)
                .filter(|profiles| !profiles.is_empty())
                .ok_or_else(|| TokenStoreError::MissingProfiles {
                    identifier: identifier.to_string(),
                })?;
            // Accounts logically hold one active profile; when several are
            // present the last one encountered wins.
            let mut player_name = String::new();
            let mut player_uuid = String::new();
            for (profile_uuid, profile) in profiles {
                let display_name = profile
                    .get("displayName")
                    .and_then(Value::as_str)
                    .ok_or_else(|| TokenStoreError::missing_field(identifier, "displayName"))?;
                player_name = display_name.to_string();
                player_uuid = dashed_uuid(profile_uuid);
            }
            (player_name, player_uuid, identifier.to_string())
        }
    };

    Ok(ParsedAccount {
        identifier: identifier.to_string(),
        variant,
        credentials: StoredCredentials {
            player_name,
            email,
            access_token,
            player_uuid,
            user_id,
        },
    })
}

/// The map key a session is stored under: compact player UUID for legacy,
/// user id for modern.
#[must_use]
pub fn identifier_for(session: &Session, variant: SchemaVariant) -> String {
    match variant {
        SchemaVariant::Legacy => compact_uuid(&session.player_uuid),
        SchemaVariant::Modern => session.user_id.clone(),
    }
}

/// Serializes a session back into entry form under the given shape.
#[must_use]
pub fn serialize_entry(session: &Session, variant: SchemaVariant) -> Value {
    match variant {
        SchemaVariant::Legacy => json!({
            "displayName": session.player_name,
            "userid": session.user_id,
            "uuid": dashed_uuid(&session.player_uuid),
            "accessToken": session.access_token,
            "username": session.email,
        }),
        SchemaVariant::Modern => {
            let mut profile = Map::new();
            profile.insert(
                "displayName".to_string(),
                Value::String(session.player_name.clone()),
            );
            let mut profiles = Map::new();
            profiles.insert(compact_uuid(&session.player_uuid), Value::Object(profile));
            let mut entry = Map::new();
            entry.insert("profiles".to_string(), Value::Object(profiles));
            entry.insert(
                "accessToken".to_string(),
                Value::String(session.access_token.clone()),
            );
            entry.insert("username".to_string(), Value::String(session.email.clone()));
            Value::Object(entry)
        }
    }
}

/// Inserts hyphens at offsets 8-4-4-4-12 of a raw 32-hex-character UUID.
/// Anything else is returned unchanged.
#[must_use]
pub fn dashed_uuid(raw: &str) -> String {
    if raw.len() != 32 || !raw.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return raw.to_string();
    }
    format!(
        "{}-{}-{}-{}-{}",
        &raw[..8],
        &raw[8..12],
        &raw[12..16],
        &raw[16..20],
        &raw[20..]
    )
}

/// Strips hyphens from a UUID.
#[must_use]
pub fn compact_uuid(uuid: &str) -> String {
    uuid.chars().filter(|c| *c != '-').collect()
}

fn required_str<'a>(
    identifier: &str,
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, TokenStoreError> {
    let value = fields
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| TokenStoreError::missing_field(identifier, field))?;
    if value.is_empty() {
        return Err(TokenStoreError::empty_field(identifier, field));
    }
    Ok(value)
}
