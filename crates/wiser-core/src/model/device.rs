// ── Device model ──

use std::fmt;

use serde::{Deserialize, Serialize};

/// Device identifier -- the hub addresses devices by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Device category, derived from the hub's model identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    /// Room thermostat (EH-ZB-RTS).
    Thermostat,
    /// Electric heater actuator (EH-ZB-HACT).
    Heater,
    /// Smart plug (EH-ZB-SPD).
    Plug,
    /// Water heater actuator (EH-ZB-LMACT).
    WaterHeater,
    Unknown,
}

impl DeviceKind {
    /// Static model-id table. Anything the table doesn't know is Unknown.
    pub fn from_model_id(model_id: &str) -> Self {
        match model_id {
            "EH-ZB-RTS" => Self::Thermostat,
            "EH-ZB-HACT" => Self::Heater,
            "EH-ZB-SPD" => Self::Plug,
            "EH-ZB-LMACT" => Self::WaterHeater,
            _ => Self::Unknown,
        }
    }

    /// Display category shown in device attributes. Thermostats measure a
    /// room, hence the compound label.
    pub fn display_category(self) -> &'static str {
        match self {
            Self::Thermostat => "Thermostat/Room",
            Self::Heater => "Heater",
            Self::Plug => "Plug",
            Self::WaterHeater => "WaterHeater",
            Self::Unknown => "Unknown",
        }
    }

    fn grouping_prefix(self) -> Option<&'static str> {
        match self {
            Self::Thermostat => Some("Thermostat"),
            Self::Heater => Some("Heater"),
            Self::Plug => Some("Plug"),
            Self::WaterHeater => Some("WaterHeater"),
            Self::Unknown => None,
        }
    }
}

/// ONLINE/OFFLINE as reported by the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    Online,
    Offline,
}

impl DeviceStatus {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("online") {
            Self::Online
        } else {
            Self::Offline
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "ONLINE",
            Self::Offline => "OFFLINE",
        }
    }
}

/// How a device is powered. Battery devices get a battery sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerType {
    Battery,
    Mains,
}

impl PowerType {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("battery") {
            Self::Battery
        } else {
            Self::Mains
        }
    }
}

/// One device known to the hub.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub model_id: String,
    pub status: DeviceStatus,
    pub battery_level: Option<u8>,
    pub power_consumption: Option<f64>,
    pub power_type: Option<PowerType>,
    pub location: Option<String>,
}

impl Device {
    pub fn kind(&self) -> DeviceKind {
        DeviceKind::from_model_id(&self.model_id)
    }

    /// Stable grouping identifier for the host device registry, keyed on
    /// the device id so repeated calls agree. `None` for unknown models.
    pub fn grouping_id(&self) -> Option<String> {
        self.kind()
            .grouping_prefix()
            .map(|prefix| format!("{prefix}-{}", self.id))
    }

    pub fn is_battery_powered(&self) -> bool {
        self.power_type == Some(PowerType::Battery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thermostat() -> Device {
        Device {
            id: DeviceId::new("Thermostat1"),
            name: "Thermostat1".into(),
            model_id: "EH-ZB-RTS".into(),
            status: DeviceStatus::Online,
            battery_level: Some(8),
            power_consumption: None,
            power_type: Some(PowerType::Battery),
            location: Some("Lounge".into()),
        }
    }

    #[test]
    fn model_id_table() {
        assert_eq!(DeviceKind::from_model_id("EH-ZB-RTS"), DeviceKind::Thermostat);
        assert_eq!(DeviceKind::from_model_id("EH-ZB-HACT"), DeviceKind::Heater);
        assert_eq!(DeviceKind::from_model_id("EH-ZB-SPD"), DeviceKind::Plug);
        assert_eq!(DeviceKind::from_model_id("EH-ZB-LMACT"), DeviceKind::WaterHeater);
        assert_eq!(DeviceKind::from_model_id("EH-ZB-XYZ"), DeviceKind::Unknown);
    }

    #[test]
    fn thermostat_display_category() {
        let device = thermostat();
        assert_eq!(device.kind().display_category(), "Thermostat/Room");
    }

    #[test]
    fn grouping_id_is_stable() {
        let device = thermostat();
        let first = device.grouping_id();
        let second = device.grouping_id();
        assert_eq!(first.as_deref(), Some("Thermostat-Thermostat1"));
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_model_has_no_grouping_id() {
        let mut device = thermostat();
        device.model_id = "EH-ZB-XYZ".into();
        assert_eq!(device.grouping_id(), None);
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(DeviceStatus::parse("online"), DeviceStatus::Online);
        assert_eq!(DeviceStatus::parse("OFFLINE"), DeviceStatus::Offline);
        assert_eq!(DeviceStatus::parse("garbage"), DeviceStatus::Offline);
    }
}
