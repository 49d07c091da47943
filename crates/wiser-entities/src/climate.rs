// ── Room climate adapter ──

use tokio::sync::broadcast;
use tracing::debug;

use wiser_core::{Controller, HubEvent, Room, RoomId};

use crate::entity::{icons, Entity, EntityState};

/// What the heating is doing right now, as the host displays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HvacAction {
    Heating,
    Idle,
}

impl HvacAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heating => "heating",
            Self::Idle => "idle",
        }
    }
}

/// Climate entity for one heated room.
#[derive(Clone)]
pub struct RoomClimate {
    controller: Controller,
    room: RoomId,
}

impl RoomClimate {
    pub fn new(controller: Controller, room: RoomId) -> Self {
        Self { controller, room }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room
    }

    /// Re-render whenever this fires.
    pub fn updates(&self) -> broadcast::Receiver<HubEvent> {
        self.controller.subscribe()
    }

    fn room(&self) -> Option<Room> {
        self.controller
            .snapshot()
            .and_then(|s| s.room(&self.room).cloned())
    }

    pub fn current_temperature(&self) -> Option<f64> {
        self.room().map(|r| r.current_temperature)
    }

    pub fn target_temperature(&self) -> Option<f64> {
        self.room().map(|r| r.target_temperature)
    }

    /// Settable range, from the hub's reported bounds.
    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        self.controller.snapshot().map(|s| (s.min_temp, s.max_temp))
    }

    pub fn hvac_action(&self) -> HvacAction {
        match self.room() {
            Some(room) if room.is_heating() => HvacAction::Heating,
            _ => HvacAction::Idle,
        }
    }

    /// Request a new target temperature, clamped to the hub's bounds.
    pub async fn set_temperature(&self, celsius: f64) {
        let celsius = match self.temperature_range() {
            Some((min, max)) => celsius.clamp(min, max),
            None => celsius,
        };
        debug!(room = %self.room, celsius, "climate set_temperature");
        self.controller
            .set_room_temperature(self.room.clone(), celsius)
            .await;
    }
}

impl Entity for RoomClimate {
    fn unique_id(&self) -> String {
        format!("{}-climate-{}", self.controller.hub_id(), self.room)
    }

    fn name(&self) -> String {
        self.room.to_string()
    }

    fn icon(&self) -> &'static str {
        match self.hvac_action() {
            HvacAction::Heating => icons::HEATING,
            HvacAction::Idle => icons::IDLE,
        }
    }

    fn state(&self) -> EntityState {
        let Some(room) = self.room() else {
            return EntityState::new("unavailable");
        };
        EntityState::new(self.hvac_action().as_str())
            .with_attr("current_temperature", room.current_temperature)
            .with_attr("target_temperature", room.target_temperature)
    }

    fn available(&self) -> bool {
        self.room().is_some()
    }
}
