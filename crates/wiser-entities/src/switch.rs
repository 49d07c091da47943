// ── Appliance switch adapter ──

use tokio::sync::broadcast;
use tracing::debug;

use wiser_core::{Appliance, ApplianceId, Controller, HubEvent};

use crate::entity::{icons, Entity, EntityState};

/// Switch entity for one smart-plug appliance.
#[derive(Clone)]
pub struct ApplianceSwitch {
    controller: Controller,
    appliance: ApplianceId,
}

impl ApplianceSwitch {
    pub fn new(controller: Controller, appliance: ApplianceId) -> Self {
        Self {
            controller,
            appliance,
        }
    }

    pub fn appliance_id(&self) -> &ApplianceId {
        &self.appliance
    }

    pub fn updates(&self) -> broadcast::Receiver<HubEvent> {
        self.controller.subscribe()
    }

    fn appliance(&self) -> Option<Appliance> {
        self.controller
            .snapshot()
            .and_then(|s| s.appliance(&self.appliance).cloned())
    }

    pub fn is_on(&self) -> bool {
        self.appliance().is_some_and(|a| a.is_on)
    }

    pub async fn turn_on(&self) {
        self.set_state(true).await;
    }

    pub async fn turn_off(&self) {
        self.set_state(false).await;
    }

    async fn set_state(&self, on: bool) {
        debug!(appliance = %self.appliance, on, "switch set_state");
        self.controller
            .set_appliance_state(self.appliance.clone(), on)
            .await;
    }
}

impl Entity for ApplianceSwitch {
    fn unique_id(&self) -> String {
        format!("{}-switch-{}", self.controller.hub_id(), self.appliance)
    }

    fn name(&self) -> String {
        self.appliance.to_string()
    }

    fn icon(&self) -> &'static str {
        icons::PLUG
    }

    fn state(&self) -> EntityState {
        let Some(appliance) = self.appliance() else {
            return EntityState::new("unavailable");
        };
        let mut state = EntityState::new(if appliance.is_on { "on" } else { "off" });
        if let Some(power) = appliance.power_consumption {
            state = state.with_attr("power_consumption", power);
        }
        state
    }

    fn available(&self) -> bool {
        self.appliance().is_some()
    }
}
