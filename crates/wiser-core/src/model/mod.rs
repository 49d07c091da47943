// ── Domain model ──
//
// Typed views of the hub's device, room, and appliance records. Wire
// DTOs from wiser-api are converted into these via `convert`.

mod appliance;
mod device;
mod home_mode;
mod room;

pub use appliance::{Appliance, ApplianceId};
pub use device::{Device, DeviceId, DeviceKind, DeviceStatus, PowerType};
pub use home_mode::{CloudStatus, HomeMode};
pub use room::{Room, RoomId};
