// ── Setup-flow support ──
//
// Connection validation and mDNS discovery helpers for the host's
// configuration flow. The flow probes the controller once with the
// candidate credentials and maps failures onto the fixed abort reasons
// the host UI understands.

use tracing::debug;

use crate::api::HubApi;

/// Discovered hubs advertise a service name starting with this prefix.
pub const DISCOVERY_NAME_PREFIX: &str = "WISER";

/// Why a setup attempt could not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("authentication rejected by controller")]
    AuthFailure,
    #[error("controller did not answer in time")]
    Timeout,
    /// Anything else: wrong address, malformed answer, transport fault.
    #[error("could not validate controller: {0}")]
    NotSuccessful(String),
}

impl SetupError {
    /// The abort-reason key reported to the host's setup UI.
    pub fn abort_reason(&self) -> &'static str {
        match self {
            Self::AuthFailure => "auth_failure",
            Self::Timeout => "timeout_error",
            Self::NotSuccessful(_) => "not_successful",
        }
    }
}

impl From<wiser_api::Error> for SetupError {
    fn from(err: wiser_api::Error) -> Self {
        match err {
            wiser_api::Error::Authentication { .. } => Self::AuthFailure,
            wiser_api::Error::Timeout { .. } => Self::Timeout,
            wiser_api::Error::Transport(ref e) if e.is_timeout() => Self::Timeout,
            other => Self::NotSuccessful(other.to_string()),
        }
    }
}

/// Probe the controller once with the candidate credentials.
///
/// Returns the controller's reported name on success; the name doubles
/// as the config entry title and uniqueness key.
pub async fn verify_connection(api: &dyn HubApi) -> Result<String, SetupError> {
    let name = api.controller_name().await?;
    debug!(controller = %name, "setup probe succeeded");
    Ok(name)
}

/// One hub found via zeroconf/mDNS browsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredHub {
    pub name: String,
    pub host: String,
}

impl DiscoveredHub {
    /// Accept an mDNS advertisement if the instance name carries the
    /// Wiser prefix; everything else on the network is ignored.
    ///
    /// The advertised name arrives as `"{instance}.{service_type}"` and
    /// the host with a trailing dot; both get normalized.
    pub fn from_mdns(name: &str, service_type: &str, host: &str) -> Option<Self> {
        if !name.to_ascii_uppercase().starts_with(DISCOVERY_NAME_PREFIX) {
            return None;
        }
        let suffix = format!(".{service_type}");
        let name = name.strip_suffix(&suffix).unwrap_or(name);
        Some(Self {
            name: name.trim_end_matches('.').to_owned(),
            host: host.trim_end_matches('.').to_owned(),
        })
    }
}
