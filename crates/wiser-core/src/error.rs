// ── Core error types ──
//
// User-facing errors from wiser-core. Consumers never see reqwest errors
// or raw response bodies directly -- the `From<wiser_api::Error>` impl
// translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Controller connection timed out after {timeout_secs}s")]
    ConnectionTimeout { timeout_secs: u64 },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Cannot connect to controller: {reason}")]
    ConnectionFailed { reason: String },

    // ── Data errors ──────────────────────────────────────────────────
    /// The controller answered with something that is not the expected
    /// JSON -- usually a wrong address.
    #[error("Malformed controller response: {message}")]
    MalformedResponse { message: String },

    // ── REST errors (wrapped, not exposed raw) ───────────────────────
    #[error("Controller API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Lookup errors ────────────────────────────────────────────────
    #[error("Room not found: {name}")]
    RoomNotFound { name: String },

    #[error("Appliance not found: {name}")]
    ApplianceNotFound { name: String },

    // ── Lifecycle errors ─────────────────────────────────────────────
    /// The first successful poll has not completed yet.
    #[error("Controller not ready -- no data polled yet")]
    NotReady,

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<wiser_api::Error> for CoreError {
    fn from(err: wiser_api::Error) -> Self {
        match err {
            wiser_api::Error::Timeout { timeout_secs } => {
                CoreError::ConnectionTimeout { timeout_secs }
            }
            wiser_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            wiser_api::Error::MalformedResponse { message, body: _ } => {
                CoreError::MalformedResponse { message }
            }
            wiser_api::Error::Transport(ref e) if e.is_timeout() => CoreError::ConnectionTimeout {
                timeout_secs: 0,
            },
            wiser_api::Error::Transport(e) => CoreError::ConnectionFailed {
                reason: e.to_string(),
            },
            wiser_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            wiser_api::Error::Rest { message, status } => CoreError::Api {
                message,
                status: Some(status),
            },
        }
    }
}
