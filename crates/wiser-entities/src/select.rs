// ── Home mode select adapter ──

use tokio::sync::broadcast;
use tracing::warn;

use wiser_core::{Controller, HomeMode, HubEvent};

use crate::entity::{icons, Entity, EntityState};

/// Writable selector for the hub-wide home mode.
#[derive(Clone)]
pub struct HomeModeSelect {
    controller: Controller,
}

impl HomeModeSelect {
    pub fn new(controller: Controller) -> Self {
        Self { controller }
    }

    pub fn updates(&self) -> broadcast::Receiver<HubEvent> {
        self.controller.subscribe()
    }

    /// The selectable options, in display order.
    pub fn options(&self) -> Vec<String> {
        HomeMode::ALL.iter().map(ToString::to_string).collect()
    }

    pub fn current_option(&self) -> Option<String> {
        self.controller
            .snapshot()
            .map(|s| s.home_mode.to_string())
    }

    /// Apply a user selection. Options outside the known set are
    /// logged and ignored; the selector snaps back on the next render.
    pub async fn select_option(&self, option: &str) {
        let Ok(mode) = option.parse::<HomeMode>() else {
            warn!(option, "ignoring unknown home mode selection");
            return;
        };
        self.controller.set_home_mode(mode, None).await;
    }
}

impl Entity for HomeModeSelect {
    fn unique_id(&self) -> String {
        format!("{}-home-mode", self.controller.hub_id())
    }

    fn name(&self) -> String {
        "Wiser Home Mode".into()
    }

    fn icon(&self) -> &'static str {
        icons::MODE_SELECT
    }

    fn state(&self) -> EntityState {
        match self.current_option() {
            Some(option) => EntityState::new(option),
            None => EntityState::new("unavailable"),
        }
    }

    fn available(&self) -> bool {
        self.controller.snapshot().is_some()
    }
}
