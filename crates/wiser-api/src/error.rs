use thiserror::Error;

/// Top-level error type for the `wiser-api` crate.
///
/// Covers every failure mode of the controller's REST surface.
/// `wiser-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Controller rejected the credentials (HTTP 401/403).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Data ────────────────────────────────────────────────────────
    /// The response body was not the expected JSON. Carries the raw body
    /// for debugging -- a common cause is a misconfigured controller
    /// address answering with an HTML page.
    #[error("Malformed REST response: {message}")]
    MalformedResponse { message: String, body: String },

    // ── REST ────────────────────────────────────────────────────────
    /// Controller answered with a non-success status code.
    #[error("Controller REST error (HTTP {status}): {message}")]
    Rest { message: String, status: u16 },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if the controller rejected our credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}
