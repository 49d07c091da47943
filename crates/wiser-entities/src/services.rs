// ── Host service-call mapping ──
//
// Translates the host's loosely-typed service payloads into controller
// commands. The host sends `serde_json::Value` dictionaries; everything
// here is validation and shaping, no I/O.

use serde_json::Value;
use thiserror::Error;

use wiser_core::{ApplianceId, Command, HomeMode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("unknown service: {name}")]
    UnknownService { name: String },

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// Map one host service call onto a [`Command`].
///
/// Known services: `set_appliance_state`, `set_home_mode`.
pub fn parse_service_call(service: &str, payload: &Value) -> Result<Command, ServiceError> {
    match service {
        "set_appliance_state" => parse_set_appliance_state(payload),
        "set_home_mode" => parse_set_home_mode(payload),
        other => Err(ServiceError::UnknownService {
            name: other.to_owned(),
        }),
    }
}

fn parse_set_appliance_state(payload: &Value) -> Result<Command, ServiceError> {
    let appliance = required_str(payload, "appliance_id")?;
    let on = match payload.get("state") {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => parse_boolish(s).ok_or(ServiceError::InvalidValue {
            field: "state",
            value: s.clone(),
        })?,
        Some(other) => {
            return Err(ServiceError::InvalidValue {
                field: "state",
                value: other.to_string(),
            })
        }
        None => return Err(ServiceError::MissingField { field: "state" }),
    };
    Ok(Command::SetApplianceState {
        appliance: ApplianceId::new(appliance),
        on,
    })
}

fn parse_set_home_mode(payload: &Value) -> Result<Command, ServiceError> {
    let raw = required_str(payload, "mode")?;
    let mode = raw
        .parse::<HomeMode>()
        .map_err(|_| ServiceError::InvalidValue {
            field: "mode",
            value: raw.to_owned(),
        })?;

    let come_back_minutes = match payload.get("come_back_minutes") {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.as_u64().and_then(|m| u32::try_from(m).ok()).ok_or(
            ServiceError::InvalidValue {
                field: "come_back_minutes",
                value: value.to_string(),
            },
        )?),
    };

    Ok(Command::SetHomeMode {
        mode,
        come_back_minutes,
    })
}

fn required_str<'a>(payload: &'a Value, field: &'static str) -> Result<&'a str, ServiceError> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .ok_or(ServiceError::MissingField { field })
}

/// The host hands switch states through as strings more often than
/// booleans.
fn parse_boolish(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
