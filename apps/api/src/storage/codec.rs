//! Schema-version envelope for contracts stored as JSONB.
//!
//! Stored shape: `{"schemaVersion": 1, "data": {...contract...}}`. Reads reject
//! unknown or missing versions and re-validate the contract, so a row written
//! by a future schema (or edited by hand) never reaches a pipeline.

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::contracts::{Contract, ContractError};

pub const SCHEMA_VERSION: u64 = 1;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("stored document has no schemaVersion")]
    MissingVersion,

    #[error("stored document has unsupported schemaVersion {found}")]
    UnsupportedVersion { found: u64 },

    #[error("stored document is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Contract(#[from] ContractError),
}

pub fn encode<T: Serialize>(value: &T) -> Result<Value, CodecError> {
    Ok(json!({
        "schemaVersion": SCHEMA_VERSION,
        "data": serde_json::to_value(value)?,
    }))
}

pub fn decode<T: Contract>(mut stored: Value) -> Result<T, CodecError> {
    let version = stored
        .get("schemaVersion")
        .and_then(Value::as_u64)
        .ok_or(CodecError::MissingVersion)?;
    if version != SCHEMA_VERSION {
        return Err(CodecError::UnsupportedVersion { found: version });
    }
    let data = stored
        .get_mut("data")
        .map(Value::take)
        .unwrap_or(Value::Null);
    let value: T = serde_json::from_value(data)?;
    value.validate()?;
    Ok(value)
}
