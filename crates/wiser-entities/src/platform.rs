// ── Platform setup ──
//
// Builds the full adapter set for one hub once the controller has its
// first snapshot. The host calls this from its setup entry point and
// `unload` when the integration is removed.

use tracing::info;

use wiser_core::{Controller, CoreError};

use crate::climate::RoomClimate;
use crate::select::HomeModeSelect;
use crate::sensor::{BatterySensor, CloudSensor, DeviceSensor, OperationModeSensor};
use crate::switch::ApplianceSwitch;

/// Every adapter for one hub, grouped by platform.
pub struct Platforms {
    pub climates: Vec<RoomClimate>,
    pub device_sensors: Vec<DeviceSensor>,
    pub battery_sensors: Vec<BatterySensor>,
    pub cloud_sensor: CloudSensor,
    pub operation_mode_sensor: OperationModeSensor,
    pub switches: Vec<ApplianceSwitch>,
    pub mode_select: HomeModeSelect,
}

/// Wait for the controller's first snapshot, then build one adapter
/// per room, device, and appliance plus the hub-wide singletons.
///
/// Battery sensors are created only for battery-powered devices.
pub async fn setup_platforms(controller: &Controller) -> Result<Platforms, CoreError> {
    controller.wait_ready().await?;
    let snapshot = controller.snapshot().ok_or(CoreError::NotReady)?;

    let mut climates: Vec<RoomClimate> = snapshot
        .rooms
        .keys()
        .map(|id| RoomClimate::new(controller.clone(), id.clone()))
        .collect();
    climates.sort_by_key(|c| c.room_id().to_string());

    let mut device_sensors = Vec::new();
    let mut battery_sensors = Vec::new();
    let mut device_ids: Vec<_> = snapshot.devices.keys().cloned().collect();
    device_ids.sort_by_key(ToString::to_string);
    for id in device_ids {
        device_sensors.push(DeviceSensor::new(controller.clone(), id.clone()));
        let battery_powered = snapshot
            .device(&id)
            .is_some_and(|d| d.is_battery_powered());
        if battery_powered {
            battery_sensors.push(BatterySensor::new(controller.clone(), id));
        }
    }

    let mut switches: Vec<ApplianceSwitch> = snapshot
        .appliances
        .keys()
        .map(|id| ApplianceSwitch::new(controller.clone(), id.clone()))
        .collect();
    switches.sort_by_key(|s| s.appliance_id().to_string());

    info!(
        hub = %controller.hub_id(),
        climates = climates.len(),
        devices = device_sensors.len(),
        batteries = battery_sensors.len(),
        switches = switches.len(),
        "platforms ready"
    );

    Ok(Platforms {
        climates,
        device_sensors,
        battery_sensors,
        cloud_sensor: CloudSensor::new(controller.clone()),
        operation_mode_sensor: OperationModeSensor::new(controller.clone()),
        switches,
        mode_select: HomeModeSelect::new(controller.clone()),
    })
}

/// Tear down the integration: drop the adapters, stop the controller.
pub async fn unload(platforms: Platforms, controller: &Controller) {
    drop(platforms);
    controller.disconnect().await;
    info!(hub = %controller.hub_id(), "platforms unloaded");
}
