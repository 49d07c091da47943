// ── Wire-to-domain conversion ──
//
// Turns the raw hub document from wiser-api into a typed `Snapshot`.
// Unknown enum strings degrade gracefully rather than failing the poll.

use std::collections::HashMap;

use chrono::Utc;
use tracing::warn;

use wiser_api::{HubData, TEMP_MAXIMUM, TEMP_MINIMUM};

use crate::model::{
    Appliance, ApplianceId, CloudStatus, Device, DeviceId, DeviceStatus, HomeMode, PowerType,
    Room, RoomId,
};
use crate::snapshot::Snapshot;

impl Snapshot {
    /// Build a snapshot from one full poll result.
    pub fn from_hub_data(data: HubData) -> Self {
        let home_mode = match data.home_mode.parse::<HomeMode>() {
            Ok(mode) => mode,
            Err(_) => {
                warn!(mode = %data.home_mode, "unknown home mode reported by hub, treating as schedule");
                HomeMode::Schedule
            }
        };

        let devices: HashMap<DeviceId, Device> = data
            .devices
            .into_iter()
            .map(|record| {
                let id = DeviceId::new(record.name.clone());
                let device = Device {
                    id: id.clone(),
                    name: record.name,
                    model_id: record.model_id,
                    status: DeviceStatus::parse(&record.status),
                    battery_level: record.battery_level,
                    power_consumption: record.power_consump,
                    power_type: record.power_type.as_deref().map(PowerType::parse),
                    location: record.location,
                };
                (id, device)
            })
            .collect();

        let rooms: HashMap<RoomId, Room> = data
            .rooms
            .into_iter()
            .map(|record| {
                let id = RoomId::new(record.room_name);
                let room = Room {
                    id: id.clone(),
                    current_temperature: record.current_value,
                    target_temperature: record.target_value,
                };
                (id, room)
            })
            .collect();

        let appliances: HashMap<ApplianceId, Appliance> = data
            .appliances
            .into_iter()
            .map(|record| {
                let id = ApplianceId::new(record.appliance_name);
                let appliance = Appliance {
                    id: id.clone(),
                    is_on: record.state,
                    power_consumption: record.power_consump,
                };
                (id, appliance)
            })
            .collect();

        Snapshot {
            devices,
            rooms,
            appliances,
            home_mode,
            cloud_status: CloudStatus::parse(data.cloud_connection.as_deref()),
            controller_name: data.controller_name,
            min_temp: data.temp_minimum.unwrap_or(TEMP_MINIMUM),
            max_temp: data.temp_maximum.unwrap_or(TEMP_MAXIMUM),
            fetched_at: Utc::now(),
        }
    }
}
