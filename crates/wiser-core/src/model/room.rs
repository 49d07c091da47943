// ── Room model ──

use std::fmt;

use serde::{Deserialize, Serialize};

/// Room identifier -- the hub addresses rooms by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// One heated room: current and target temperature in degrees Celsius.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub current_temperature: f64,
    pub target_temperature: f64,
}

impl Room {
    /// Whether the room is currently calling for heat.
    pub fn is_heating(&self) -> bool {
        self.current_temperature < self.target_temperature
    }
}
