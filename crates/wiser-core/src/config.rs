// ── Runtime connection configuration ──
//
// Describes *how* to reach one Wiser Smart controller. Built by the host
// setup flow and handed to `Controller`; core never reads config files.
// The poll interval is connection-scoped -- there is no module-wide
// interval shared between hubs.

use std::time::Duration;

use secrecy::SecretString;

/// Default poll interval (seconds) when the host does not configure one.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(300);

/// Configuration for connecting to a single controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Controller IP or hostname on the local network.
    pub host: String,
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: SecretString,
    /// How often to poll the controller for fresh data.
    pub poll_interval: Duration,
    /// Per-request transport timeout.
    pub timeout: Duration,
}

impl ControllerConfig {
    pub fn new(host: impl Into<String>, username: impl Into<String>, password: SecretString) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password,
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
