// ── Sensor adapters ──
//
// Read-only views: one per device, a battery sensor for
// battery-powered devices, and hub-wide cloud and operation-mode
// sensors.

use tokio::sync::broadcast;

use wiser_core::{CloudStatus, Controller, Device, DeviceId, DeviceStatus, HubEvent};

use crate::entity::{home_mode_icon, icons, Entity, EntityState, MANUFACTURER};

// ── Device status sensor ─────────────────────────────────────────

/// Reports a device's ONLINE/OFFLINE status with identifying attributes.
#[derive(Clone)]
pub struct DeviceSensor {
    controller: Controller,
    device: DeviceId,
}

impl DeviceSensor {
    pub fn new(controller: Controller, device: DeviceId) -> Self {
        Self { controller, device }
    }

    pub fn updates(&self) -> broadcast::Receiver<HubEvent> {
        self.controller.subscribe()
    }

    fn device(&self) -> Option<Device> {
        self.controller
            .snapshot()
            .and_then(|s| s.device(&self.device).cloned())
    }

    /// Stable registry key shared by this device's sensors.
    pub fn grouping_id(&self) -> Option<String> {
        self.device().and_then(|d| d.grouping_id())
    }
}

impl Entity for DeviceSensor {
    fn unique_id(&self) -> String {
        format!("{}-device-{}", self.controller.hub_id(), self.device)
    }

    fn name(&self) -> String {
        self.device.to_string()
    }

    fn icon(&self) -> &'static str {
        match self.device().map(|d| d.status) {
            Some(DeviceStatus::Online) => icons::DEVICE_ONLINE,
            _ => icons::DEVICE_OFFLINE,
        }
    }

    fn state(&self) -> EntityState {
        let Some(device) = self.device() else {
            return EntityState::new("unavailable");
        };
        let mut state = EntityState::new(device.status.as_str())
            .with_attr("vendor", MANUFACTURER)
            .with_attr("product_category", device.kind().display_category())
            .with_attr("model_identifier", device.model_id.clone());
        if let Some(location) = device.location {
            state = state.with_attr("location", location);
        }
        if let Some(power) = device.power_consumption {
            state = state.with_attr("power_consumption", power);
        }
        state
    }

    fn available(&self) -> bool {
        self.device().is_some()
    }
}

// ── Battery sensor ───────────────────────────────────────────────

/// Battery charge for battery-powered devices. The hub reports a
/// 0..=10 level; the host wants a percentage.
#[derive(Clone)]
pub struct BatterySensor {
    controller: Controller,
    device: DeviceId,
}

impl BatterySensor {
    pub fn new(controller: Controller, device: DeviceId) -> Self {
        Self { controller, device }
    }

    pub fn updates(&self) -> broadcast::Receiver<HubEvent> {
        self.controller.subscribe()
    }

    fn device(&self) -> Option<Device> {
        self.controller
            .snapshot()
            .and_then(|s| s.device(&self.device).cloned())
    }

    /// Percentage of charge, or `None` when the device has not
    /// reported a level.
    pub fn battery_percent(&self) -> Option<u8> {
        self.device()
            .and_then(|d| d.battery_level)
            .map(|level| (u32::from(level) * 10).min(100) as u8)
    }
}

impl Entity for BatterySensor {
    fn unique_id(&self) -> String {
        format!("{}-battery-{}", self.controller.hub_id(), self.device)
    }

    fn name(&self) -> String {
        format!("{} Battery", self.device)
    }

    fn icon(&self) -> &'static str {
        icons::BATTERY
    }

    fn state(&self) -> EntityState {
        match self.battery_percent() {
            Some(percent) => {
                EntityState::new(percent.to_string()).with_attr("unit_of_measurement", "%")
            }
            None => EntityState::new("Unknown"),
        }
    }

    fn available(&self) -> bool {
        self.device().is_some()
    }
}

// ── Cloud connectivity sensor ────────────────────────────────────

/// Whether the hub can reach the Wiser cloud.
#[derive(Clone)]
pub struct CloudSensor {
    controller: Controller,
}

impl CloudSensor {
    pub fn new(controller: Controller) -> Self {
        Self { controller }
    }

    pub fn updates(&self) -> broadcast::Receiver<HubEvent> {
        self.controller.subscribe()
    }

    fn status(&self) -> Option<CloudStatus> {
        self.controller.snapshot().map(|s| s.cloud_status)
    }
}

impl Entity for CloudSensor {
    fn unique_id(&self) -> String {
        format!("{}-cloud", self.controller.hub_id())
    }

    fn name(&self) -> String {
        "Wiser Cloud Status".into()
    }

    fn icon(&self) -> &'static str {
        match self.status() {
            Some(CloudStatus::Up) => icons::CLOUD_UP,
            _ => icons::CLOUD_DOWN,
        }
    }

    fn state(&self) -> EntityState {
        match self.status() {
            Some(status) => EntityState::new(status.as_str()),
            None => EntityState::new("unavailable"),
        }
    }

    fn available(&self) -> bool {
        self.status().is_some()
    }
}

// ── Operation mode sensor ────────────────────────────────────────

/// The hub-wide home mode, read-only. The select adapter is the
/// writable counterpart.
#[derive(Clone)]
pub struct OperationModeSensor {
    controller: Controller,
}

impl OperationModeSensor {
    pub fn new(controller: Controller) -> Self {
        Self { controller }
    }

    pub fn updates(&self) -> broadcast::Receiver<HubEvent> {
        self.controller.subscribe()
    }
}

impl Entity for OperationModeSensor {
    fn unique_id(&self) -> String {
        format!("{}-operation-mode", self.controller.hub_id())
    }

    fn name(&self) -> String {
        "Wiser Operation Mode".into()
    }

    fn icon(&self) -> &'static str {
        match self.controller.snapshot() {
            Some(snapshot) => home_mode_icon(snapshot.home_mode),
            None => icons::MODE_SCHEDULE,
        }
    }

    fn state(&self) -> EntityState {
        match self.controller.snapshot() {
            Some(snapshot) => EntityState::new(snapshot.home_mode.to_string()),
            None => EntityState::new("unavailable"),
        }
    }

    fn available(&self) -> bool {
        self.controller.snapshot().is_some()
    }
}
