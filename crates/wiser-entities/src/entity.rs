// ── Entity contract ──
//
// The minimal surface the host framework reads from every adapter.
// Adapters never poll on their own (`should_poll` is false across the
// board); the controller's broadcast drives re-rendering.

use serde_json::{Map, Value};

/// Material Design icon names, as the host renders them.
pub mod icons {
    pub const DEVICE_ONLINE: &str = "mdi:remote";
    pub const DEVICE_OFFLINE: &str = "mdi:remote-off";

    pub const MODE_MANUAL: &str = "mdi:gesture-tap";
    pub const MODE_SCHEDULE: &str = "mdi:calendar-clock";
    pub const MODE_ENERGY_SAVER: &str = "mdi:battery-plus";
    pub const MODE_HOLIDAY: &str = "mdi:palm-tree";
    pub const MODE_SELECT: &str = "mdi:form-select";

    pub const CLOUD_UP: &str = "mdi:cloud-check";
    pub const CLOUD_DOWN: &str = "mdi:cloud-alert";

    pub const HEATING: &str = "mdi:radiator";
    pub const IDLE: &str = "mdi:radiator-off";

    pub const PLUG: &str = "mdi:power-socket-uk";
    pub const BATTERY: &str = "mdi:battery";
}

/// Device vendor reported in entity attributes.
pub const MANUFACTURER: &str = "Schneider Electric";

/// One rendered entity: the primary state plus extra attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityState {
    pub state: String,
    pub attributes: Map<String, Value>,
}

impl EntityState {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            attributes: Map::new(),
        }
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_owned(), value.into());
        self
    }
}

/// What every adapter exposes to the host.
pub trait Entity {
    /// Stable identifier, unique across all hubs and platforms.
    fn unique_id(&self) -> String;

    /// Human-readable name.
    fn name(&self) -> String;

    fn icon(&self) -> &'static str;

    /// Render from the current snapshot.
    fn state(&self) -> EntityState;

    /// Adapters are push-driven; the host must not poll them.
    fn should_poll(&self) -> bool {
        false
    }

    /// Whether the backing record exists in the current snapshot.
    fn available(&self) -> bool;
}

pub(crate) fn home_mode_icon(mode: wiser_core::HomeMode) -> &'static str {
    use wiser_core::HomeMode;
    match mode {
        HomeMode::Manual => icons::MODE_MANUAL,
        HomeMode::Schedule => icons::MODE_SCHEDULE,
        HomeMode::EnergySaver => icons::MODE_ENERGY_SAVER,
        HomeMode::Holiday => icons::MODE_HOLIDAY,
    }
}
