// ── Controller abstraction ──
//
// Full lifecycle management for a Wiser Smart hub connection.
// Handles the initial-connection retry loop, the background poll
// task, command routing with the post-write refresh, and reactive
// data publication through the SnapshotStore.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot, watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use wiser_api::{TransportConfig, WiserClient};

use crate::api::HubApi;
use crate::command::Command;
use crate::config::ControllerConfig;
use crate::error::CoreError;
use crate::events::{HubEvent, HubId};
use crate::model::HomeMode;
use crate::snapshot::{Snapshot, SnapshotStore};

const EVENT_CHANNEL_SIZE: usize = 64;
const FORCE_CHANNEL_SIZE: usize = 8;

/// How long to wait between attempts while the hub is still booting.
/// After a power cut the hub comes up well after the host does.
const INITIAL_RETRY_INTERVAL: Duration = Duration::from_secs(30);

/// How long the hub needs to apply a write before a read-back returns
/// the new state.
const SETTLE_DELAY: Duration = Duration::from_millis(500);

// ── ConnectionState ──────────────────────────────────────────────

/// Connection state observable by consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    /// The initial poll keeps failing; retrying on a fixed cadence.
    Retrying { attempt: u32 },
    Connected,
}

/// A forced-refresh request routed into the poll task. Replies with
/// whether the poll succeeded.
struct PollRequest {
    ack: oneshot::Sender<bool>,
}

// ── Controller ───────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. Owns the background
/// poll task; all reads go through the atomically-replaced snapshot
/// and all writes go through [`execute()`](Self::execute).
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ControllerConfig,
    api: Arc<dyn HubApi>,
    store: SnapshotStore,
    hub_id: HubId,
    connection_state: watch::Sender<ConnectionState>,
    poll_interval: watch::Sender<Duration>,
    event_tx: broadcast::Sender<HubEvent>,
    force_tx: mpsc::Sender<PollRequest>,
    force_rx: Mutex<Option<mpsc::Receiver<PollRequest>>>,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Controller {
    /// Create a new Controller from configuration. Does NOT connect --
    /// call [`connect()`](Self::connect) to start the poll task.
    pub fn new(config: ControllerConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let client = WiserClient::new(
            &config.host,
            config.username.clone(),
            config.password.clone(),
            &transport,
        )?;
        Ok(Self::with_api(config, Arc::new(client)))
    }

    /// Create a Controller over an arbitrary API implementation.
    /// Tests inject scripted hubs here.
    pub fn with_api(config: ControllerConfig, api: Arc<dyn HubApi>) -> Self {
        let (connection_state, _) = watch::channel(ConnectionState::Disconnected);
        let (poll_interval, _) = watch::channel(config.poll_interval);
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_SIZE);
        let (force_tx, force_rx) = mpsc::channel(FORCE_CHANNEL_SIZE);
        let hub_id = HubId::from_host(&config.host);

        Self {
            inner: Arc::new(ControllerInner {
                config,
                api,
                store: SnapshotStore::new(),
                hub_id,
                connection_state,
                poll_interval,
                event_tx,
                force_tx,
                force_rx: Mutex::new(Some(force_rx)),
                cancel: CancellationToken::new(),
                task: Mutex::new(None),
            }),
        }
    }

    /// Access the controller configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    /// Stable identity of this hub connection.
    pub fn hub_id(&self) -> &HubId {
        &self.inner.hub_id
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Start the background poll task.
    ///
    /// Returns immediately; the task keeps attempting the first poll
    /// every [`INITIAL_RETRY_INTERVAL`] until the hub answers. Use
    /// [`wait_ready()`](Self::wait_ready) to block until the first
    /// snapshot lands.
    pub async fn connect(&self) -> Result<(), CoreError> {
        let Some(force_rx) = self.inner.force_rx.lock().await.take() else {
            // Already connected once; the poll task owns the receiver.
            return Ok(());
        };

        let _ = self
            .inner
            .connection_state
            .send(ConnectionState::Connecting);

        let ctrl = self.clone();
        *self.inner.task.lock().await = Some(tokio::spawn(poll_task(ctrl, force_rx)));
        Ok(())
    }

    /// Stop the poll task and mark the connection closed.
    pub async fn disconnect(&self) {
        self.inner.cancel.cancel();

        if let Some(handle) = self.inner.task.lock().await.take() {
            let _ = handle.await;
        }

        let _ = self
            .inner
            .connection_state
            .send(ConnectionState::Disconnected);
        debug!(hub = %self.inner.hub_id, "disconnected");
    }

    /// Wait until the first snapshot has been published.
    pub async fn wait_ready(&self) -> Result<(), CoreError> {
        let mut rx = self.inner.connection_state.subscribe();
        loop {
            if *rx.borrow_and_update() == ConnectionState::Connected {
                return Ok(());
            }
            tokio::select! {
                _ = self.inner.cancel.cancelled() => return Err(CoreError::NotReady),
                changed = rx.changed() => {
                    if changed.is_err() {
                        return Err(CoreError::NotReady);
                    }
                }
            }
        }
    }

    // ── Refresh ──────────────────────────────────────────────────

    /// Force an immediate poll, ahead of the schedule.
    ///
    /// The pending scheduled poll is abandoned and the next one is a
    /// full interval after this refresh completes. Returns whether the
    /// poll succeeded.
    pub async fn refresh(&self) -> bool {
        let (ack, done) = oneshot::channel();
        if self.inner.force_tx.send(PollRequest { ack }).await.is_err() {
            return false;
        }
        done.await.unwrap_or(false)
    }

    /// Change the poll cadence for this connection. Takes effect when
    /// the next poll timer is armed.
    pub fn set_poll_interval(&self, interval: Duration) {
        let _ = self.inner.poll_interval.send(interval);
        debug!(secs = interval.as_secs(), "poll interval updated");
    }

    // ── Command execution ────────────────────────────────────────

    /// Execute a write against the hub.
    ///
    /// Failures are logged and swallowed -- entity state simply stays
    /// at the last snapshot. After a successful write the hub gets
    /// [`SETTLE_DELAY`] to apply it, then a forced refresh pulls the
    /// new state into the snapshot.
    pub async fn execute(&self, cmd: Command) {
        let name = cmd.name();
        if let Err(e) = self.try_execute(cmd).await {
            warn!(command = name, error = %e, "hub command failed");
            return;
        }
        tokio::time::sleep(SETTLE_DELAY).await;
        self.refresh().await;
    }

    async fn try_execute(&self, cmd: Command) -> Result<(), CoreError> {
        match cmd {
            Command::SetRoomTemperature { room, celsius } => {
                let snapshot = self.inner.store.current().ok_or(CoreError::NotReady)?;
                if snapshot.room(&room).is_none() {
                    return Err(CoreError::RoomNotFound {
                        name: room.to_string(),
                    });
                }
                self.inner
                    .api
                    .set_room_temperature(room.as_str(), celsius)
                    .await?;
            }
            Command::SetApplianceState { appliance, on } => {
                let snapshot = self.inner.store.current().ok_or(CoreError::NotReady)?;
                if snapshot.appliance(&appliance).is_none() {
                    return Err(CoreError::ApplianceNotFound {
                        name: appliance.to_string(),
                    });
                }
                self.inner
                    .api
                    .set_appliance_state(appliance.as_str(), on)
                    .await?;
            }
            Command::SetHomeMode {
                mode,
                come_back_minutes,
            } => {
                self.inner
                    .api
                    .set_home_mode(mode.hub_mode(), &mode.to_string(), come_back_minutes)
                    .await?;
            }
        }
        Ok(())
    }

    // ── Command convenience wrappers ─────────────────────────────

    pub async fn set_room_temperature(&self, room: impl Into<crate::model::RoomId>, celsius: f64) {
        self.execute(Command::SetRoomTemperature {
            room: room.into(),
            celsius,
        })
        .await;
    }

    pub async fn set_appliance_state(
        &self,
        appliance: impl Into<crate::model::ApplianceId>,
        on: bool,
    ) {
        self.execute(Command::SetApplianceState {
            appliance: appliance.into(),
            on,
        })
        .await;
    }

    pub async fn set_home_mode(&self, mode: HomeMode, come_back_minutes: Option<u32>) {
        self.execute(Command::SetHomeMode {
            mode,
            come_back_minutes,
        })
        .await;
    }

    // ── State observation ────────────────────────────────────────

    /// The current snapshot, or `None` before the first successful poll.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.inner.store.current()
    }

    /// Access the snapshot store directly.
    pub fn store(&self) -> &SnapshotStore {
        &self.inner.store
    }

    /// Subscribe to connection state changes.
    pub fn connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.connection_state.subscribe()
    }

    /// Subscribe to the event broadcast stream.
    pub fn subscribe(&self) -> broadcast::Receiver<HubEvent> {
        self.inner.event_tx.subscribe()
    }

    // ── Poll internals ───────────────────────────────────────────

    /// One poll cycle: fetch, convert, publish, notify.
    async fn run_poll(&self) -> bool {
        match self.inner.api.fetch_all().await {
            Ok(data) => {
                let snapshot = Snapshot::from_hub_data(data);
                debug!(
                    devices = snapshot.devices.len(),
                    rooms = snapshot.rooms.len(),
                    appliances = snapshot.appliances.len(),
                    "hub data refresh complete"
                );
                self.inner.store.replace(snapshot);
                let _ = self.inner.event_tx.send(HubEvent::DataUpdated {
                    hub: self.inner.hub_id.clone(),
                });
                true
            }
            Err(e) => {
                let err = CoreError::from(e);
                warn!(hub = %self.inner.hub_id, error = %err, "hub poll failed");
                false
            }
        }
    }
}

// ── Background poll task ─────────────────────────────────────────

async fn poll_task(controller: Controller, mut force_rx: mpsc::Receiver<PollRequest>) {
    let cancel = controller.inner.cancel.clone();

    // Initial connection: retry on a fixed cadence until the hub
    // answers once. Forced-refresh requests arriving in this phase are
    // serviced immediately so callers never park on the ack; a failed
    // forced attempt does not reset the retry timer.
    let mut attempt: u32 = 1;
    'startup: loop {
        if controller.run_poll().await {
            break 'startup;
        }

        let _ = controller
            .inner
            .connection_state
            .send(ConnectionState::Retrying { attempt });
        warn!(
            attempt,
            retry_secs = INITIAL_RETRY_INTERVAL.as_secs(),
            "hub not answering, will retry"
        );

        let retry = tokio::time::sleep(INITIAL_RETRY_INTERVAL);
        tokio::pin!(retry);
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return,
                req = force_rx.recv() => {
                    let Some(req) = req else { return };
                    let ok = controller.run_poll().await;
                    let _ = req.ack.send(ok);
                    if ok {
                        break 'startup;
                    }
                }
                _ = &mut retry => break,
            }
        }
        attempt += 1;
    }

    let _ = controller
        .inner
        .connection_state
        .send(ConnectionState::Connected);
    info!(hub = %controller.inner.hub_id, "connected to hub");

    // Steady state. The sleep is re-armed from the watch value on every
    // iteration, so a forced refresh pushes the next scheduled poll a
    // full interval out, and interval changes apply at the next re-arm.
    loop {
        let interval = *controller.inner.poll_interval.borrow();

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            req = force_rx.recv() => {
                let Some(req) = req else { return };
                let ok = controller.run_poll().await;
                let _ = req.ack.send(ok);
            }
            _ = tokio::time::sleep(interval) => {
                controller.run_poll().await;
            }
        }
    }
}
