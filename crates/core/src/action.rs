//! Action payloads submitted by players.
//!
//! A payload is an unordered field map. The engine reads only the target
//! field ([`GameConfig::TARGET_FIELD`]); unknown fields are ignored.

use serde_json::{Map, Value};

use crate::config::GameConfig;
use crate::error::MatchError;

pub type ActionPayload = Map<String, Value>;

/// Builds a payload targeting `player`.
pub fn target_payload(player: &str) -> ActionPayload {
    let mut payload = ActionPayload::new();
    payload.insert(
        GameConfig::TARGET_FIELD.to_owned(),
        Value::String(player.to_owned()),
    );
    payload
}

/// Extracts the targeted player name from `payload`.
pub(crate) fn target(payload: &ActionPayload) -> Result<&str, MatchError> {
    let field = GameConfig::TARGET_FIELD;
    match payload.get(field) {
        None | Some(Value::Null) => Err(MatchError::MissingField { field }),
        Some(Value::String(name)) => Ok(name),
        Some(_) => Err(MatchError::WrongType {
            field,
            expected: "string",
        }),
    }
}
