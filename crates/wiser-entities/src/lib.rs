// wiser-entities: Stateless entity adapters the host framework consumes.
//
// Every adapter is a cheap view over a `Controller` clone: rendering
// reads the current snapshot and never touches the network, writes go
// through controller commands. Adapters re-render whenever the
// controller broadcasts a data update.

pub mod climate;
pub mod entity;
pub mod platform;
pub mod select;
pub mod sensor;
pub mod services;
pub mod switch;

pub use climate::{HvacAction, RoomClimate};
pub use entity::{Entity, EntityState};
pub use platform::{setup_platforms, unload, Platforms};
pub use select::HomeModeSelect;
pub use sensor::{BatterySensor, CloudSensor, DeviceSensor, OperationModeSensor};
pub use services::{parse_service_call, ServiceError};
pub use switch::ApplianceSwitch;
