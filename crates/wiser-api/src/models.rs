// Wire DTOs for the Wiser Smart controller REST API.
//
// Field names mirror the controller's camelCase JSON. These types stay
// raw -- wiser-core converts them into its domain model.

use serde::{Deserialize, Serialize};

/// Lowest target temperature the hub accepts, used when the hub document
/// omits its own bounds.
pub const TEMP_MINIMUM: f64 = 5.0;

/// Highest target temperature the hub accepts.
pub const TEMP_MAXIMUM: f64 = 30.0;

/// One device record from the hub's aggregate document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    pub name: String,
    pub model_id: String,
    pub status: String,
    #[serde(default)]
    pub battery_level: Option<u8>,
    #[serde(default)]
    pub power_consump: Option<f64>,
    #[serde(default)]
    pub power_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// One room record: current and target temperature.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    pub room_name: String,
    pub current_value: f64,
    pub target_value: f64,
}

/// One smart-plug appliance record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceRecord {
    pub appliance_name: String,
    pub state: bool,
    #[serde(default)]
    pub power_consump: Option<f64>,
}

/// The hub's aggregate document -- one full poll result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubData {
    pub controller_name: String,
    pub home_mode: String,
    #[serde(default)]
    pub cloud_connection: Option<String>,
    #[serde(default)]
    pub temp_minimum: Option<f64>,
    #[serde(default)]
    pub temp_maximum: Option<f64>,
    #[serde(default)]
    pub devices: Vec<DeviceRecord>,
    #[serde(default)]
    pub rooms: Vec<RoomRecord>,
    #[serde(default)]
    pub appliances: Vec<ApplianceRecord>,
}

/// Controller identity, fetched during the setup flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerInfo {
    pub name: String,
    #[serde(default)]
    pub cloud_connection: Option<String>,
}
