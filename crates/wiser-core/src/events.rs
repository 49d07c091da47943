// ── Hub events ──

use std::fmt;

/// Stable identity of one hub connection, derived from the host the
/// controller was configured with. Distinguishes events when several
/// hubs are bridged at once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HubId(String);

impl HubId {
    pub fn from_host(host: &str) -> Self {
        Self(format!("wiser-{host}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Broadcast to subscribers after controller state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubEvent {
    /// A fresh snapshot was published for the given hub.
    DataUpdated { hub: HubId },
}
