// wiser-core: Reactive data layer between wiser-api and the entity adapters.

pub mod api;
pub mod command;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod events;
pub mod model;
pub mod setup;
pub mod snapshot;

// ── Primary re-exports ──────────────────────────────────────────────
pub use api::HubApi;
pub use command::Command;
pub use config::ControllerConfig;
pub use controller::{ConnectionState, Controller};
pub use error::CoreError;
pub use events::{HubEvent, HubId};
pub use setup::{DiscoveredHub, SetupError};
pub use snapshot::{Snapshot, SnapshotStore};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Appliance, ApplianceId, CloudStatus, Device, DeviceId, DeviceKind, DeviceStatus, HomeMode,
    PowerType, Room, RoomId,
};
