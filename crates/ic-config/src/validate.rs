//! Configuration validation logic.

use crate::schema::ControllerConfig;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_config(config: &ControllerConfig) -> Result<(), ValidationError> {
    if config.version == 0 || config.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    let params = &config.controller;
    params
        .validate()
        .map_err(|err| ValidationError::InvalidValue {
            field: "controller".to_string(),
            value: format!(
                "reference={}, min={}, max={}, initial={}, k_i={}",
                params.reference, params.min, params.max, params.initial, params.k_i
            ),
            reason: err.to_string(),
        })?;

    if let Some(logging) = &config.logging
        && logging.capacity == 0
        && logging.path.is_some()
    {
        return Err(ValidationError::InvalidValue {
            field: "logging.capacity".to_string(),
            value: "0".to_string(),
            reason: "a log path needs a non-zero capacity".to_string(),
        });
    }

    Ok(())
}
