// ── Hub commands ──
//
// Every write against the hub goes through one of these. The
// controller serializes execution and schedules the follow-up refresh
// so callers never talk to the API client directly.

use crate::model::{ApplianceId, HomeMode, RoomId};

/// A state-changing operation against the hub.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Set a room's target temperature, in celsius.
    SetRoomTemperature { room: RoomId, celsius: f64 },
    /// Switch a smart plug on or off.
    SetApplianceState { appliance: ApplianceId, on: bool },
    /// Change the hub-wide operating mode. `come_back_minutes` only
    /// applies to holiday mode.
    SetHomeMode {
        mode: HomeMode,
        come_back_minutes: Option<u32>,
    },
}

impl Command {
    /// Short label for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetRoomTemperature { .. } => "set_room_temperature",
            Self::SetApplianceState { .. } => "set_appliance_state",
            Self::SetHomeMode { .. } => "set_home_mode",
        }
    }
}
