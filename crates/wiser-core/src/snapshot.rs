// ── Snapshot store ──
//
// The most recent full poll result, replaced wholesale on every
// successful refresh. Readers always see one consistent point-in-time
// snapshot -- there is no per-entity merging, so no cross-snapshot
// tearing is possible.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::model::{Appliance, ApplianceId, CloudStatus, Device, DeviceId, HomeMode, Room, RoomId};

/// One point-in-time view of the hub. Immutable once published.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub devices: HashMap<DeviceId, Device>,
    pub rooms: HashMap<RoomId, Room>,
    pub appliances: HashMap<ApplianceId, Appliance>,
    pub home_mode: HomeMode,
    pub cloud_status: CloudStatus,
    pub controller_name: String,
    pub min_temp: f64,
    pub max_temp: f64,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn device(&self, id: &DeviceId) -> Option<&Device> {
        self.devices.get(id)
    }

    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn appliance(&self, id: &ApplianceId) -> Option<&Appliance> {
        self.appliances.get(id)
    }
}

/// Holder for the current snapshot.
///
/// Reads are wait-free via `arc-swap`; a successful poll swaps in a new
/// `Arc<Snapshot>` atomically. The watch channel records the last
/// replacement time for staleness diagnostics.
pub struct SnapshotStore {
    current: ArcSwapOption<Snapshot>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        let (last_refresh, _) = watch::channel(None);
        Self {
            current: ArcSwapOption::const_empty(),
            last_refresh,
        }
    }

    /// The current snapshot, or `None` before the first successful poll.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.load_full()
    }

    /// Atomically replace the snapshot.
    pub fn replace(&self, snapshot: Snapshot) {
        self.current.store(Some(Arc::new(snapshot)));
        let _ = self.last_refresh.send(Some(Utc::now()));
    }

    /// When the last successful refresh happened, if ever.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    /// How long ago the last successful refresh was, or `None` if never.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_refresh().map(|t| Utc::now() - t)
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(name: &str, mode: HomeMode) -> Snapshot {
        Snapshot {
            devices: HashMap::new(),
            rooms: HashMap::new(),
            appliances: HashMap::new(),
            home_mode: mode,
            cloud_status: CloudStatus::Up,
            controller_name: name.into(),
            min_temp: 5.0,
            max_temp: 30.0,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn starts_empty() {
        let store = SnapshotStore::new();
        assert!(store.current().is_none());
        assert!(store.last_refresh().is_none());
    }

    #[test]
    fn replace_swaps_whole_snapshot() {
        let store = SnapshotStore::new();
        store.replace(snapshot("first", HomeMode::Manual));

        let held = store.current().expect("snapshot");
        assert_eq!(held.controller_name, "first");

        store.replace(snapshot("second", HomeMode::Holiday));

        // The old Arc is still intact for anyone holding it -- readers
        // never observe a half-replaced snapshot.
        assert_eq!(held.controller_name, "first");
        assert_eq!(held.home_mode, HomeMode::Manual);

        let fresh = store.current().expect("snapshot");
        assert_eq!(fresh.controller_name, "second");
        assert_eq!(fresh.home_mode, HomeMode::Holiday);
        assert!(store.last_refresh().is_some());
    }
}
