// wiser-api: Async Rust client for the Wiser Smart controller REST API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::WiserClient;
pub use error::Error;
pub use models::{
    ApplianceRecord, ControllerInfo, DeviceRecord, HubData, RoomRecord, TEMP_MAXIMUM,
    TEMP_MINIMUM,
};
pub use transport::TransportConfig;
