// Controller lifecycle tests against a scripted in-process hub.
//
// All tests run with a paused tokio clock, so the 30s retry cadence and
// the multi-minute poll intervals complete instantly and timing
// assertions are deterministic.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::time::Instant;

use wiser_api::{ApplianceRecord, DeviceRecord, Error as ApiError, HubData, RoomRecord};
use wiser_core::{
    Command, ConnectionState, Controller, ControllerConfig, HomeMode, HubApi, HubEvent,
};

// ── Scripted hub ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Call {
    FetchAll,
    SetRoomTemperature {
        room: String,
        celsius: f64,
    },
    SetApplianceState {
        appliance: String,
        on: bool,
    },
    SetHomeMode {
        hub_mode: String,
        mode: String,
        come_back_minutes: Option<u32>,
    },
}

/// In-process hub double. Polls and writes succeed unless a script
/// entry says otherwise; every call is recorded with its timestamp.
#[derive(Default)]
struct MockHub {
    poll_script: Mutex<VecDeque<Result<(), ApiError>>>,
    write_script: Mutex<VecDeque<Result<(), ApiError>>>,
    calls: Mutex<Vec<(Instant, Call)>>,
}

impl MockHub {
    fn fail_next_polls(&self, n: usize) {
        let mut script = self.poll_script.lock().expect("lock");
        for _ in 0..n {
            script.push_back(Err(ApiError::Timeout { timeout_secs: 10 }));
        }
    }

    fn script_poll(&self, result: Result<(), ApiError>) {
        self.poll_script.lock().expect("lock").push_back(result);
    }

    fn fail_next_write(&self) {
        self.write_script
            .lock()
            .expect("lock")
            .push_back(Err(ApiError::Rest {
                message: "room unknown".into(),
                status: 404,
            }));
    }

    fn record(&self, call: Call) {
        self.calls
            .lock()
            .expect("lock")
            .push((Instant::now(), call));
    }

    fn calls(&self) -> Vec<(Instant, Call)> {
        self.calls.lock().expect("lock").clone()
    }

    fn fetch_times(&self) -> Vec<Instant> {
        self.calls()
            .into_iter()
            .filter(|(_, c)| *c == Call::FetchAll)
            .map(|(t, _)| t)
            .collect()
    }

    fn next_write_result(&self) -> Result<(), ApiError> {
        self.write_script
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

#[async_trait]
impl HubApi for MockHub {
    async fn fetch_all(&self) -> Result<HubData, ApiError> {
        self.record(Call::FetchAll);
        match self.poll_script.lock().expect("lock").pop_front() {
            Some(Err(e)) => Err(e),
            _ => Ok(hub_data()),
        }
    }

    async fn controller_name(&self) -> Result<String, ApiError> {
        Ok("WISER-TEST".into())
    }

    async fn set_room_temperature(&self, room: &str, celsius: f64) -> Result<(), ApiError> {
        self.record(Call::SetRoomTemperature {
            room: room.into(),
            celsius,
        });
        self.next_write_result()
    }

    async fn set_appliance_state(&self, appliance: &str, on: bool) -> Result<(), ApiError> {
        self.record(Call::SetApplianceState {
            appliance: appliance.into(),
            on,
        });
        self.next_write_result()
    }

    async fn set_home_mode(
        &self,
        hub_mode: &str,
        mode: &str,
        come_back_minutes: Option<u32>,
    ) -> Result<(), ApiError> {
        self.record(Call::SetHomeMode {
            hub_mode: hub_mode.into(),
            mode: mode.into(),
            come_back_minutes,
        });
        self.next_write_result()
    }
}

fn hub_data() -> HubData {
    HubData {
        controller_name: "WISER-TEST".into(),
        home_mode: "schedule".into(),
        cloud_connection: Some("up".into()),
        temp_minimum: Some(5.0),
        temp_maximum: Some(30.0),
        devices: vec![DeviceRecord {
            name: "Thermostat1".into(),
            model_id: "EH-ZB-RTS".into(),
            status: "ONLINE".into(),
            battery_level: Some(9),
            power_consump: None,
            power_type: Some("Battery".into()),
            location: Some("Lounge".into()),
        }],
        rooms: vec![RoomRecord {
            room_name: "Lounge".into(),
            current_value: 19.0,
            target_value: 21.0,
        }],
        appliances: vec![ApplianceRecord {
            appliance_name: "Dryer".into(),
            state: false,
            power_consump: Some(0.0),
        }],
    }
}

fn controller_with(hub: &Arc<MockHub>, poll_interval: Duration) -> Controller {
    let config = ControllerConfig::new("hub.local", "admin", SecretString::from("admin"))
        .with_poll_interval(poll_interval);
    Controller::with_api(config, hub.clone())
}

// ── Connection lifecycle ─────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn first_poll_publishes_snapshot_and_event() {
    let hub = Arc::new(MockHub::default());
    let controller = controller_with(&hub, Duration::from_secs(300));
    let mut events = controller.subscribe();

    assert!(controller.snapshot().is_none());

    controller.connect().await.expect("connect");
    controller.wait_ready().await.expect("ready");

    let snapshot = controller.snapshot().expect("snapshot");
    assert_eq!(snapshot.controller_name, "WISER-TEST");
    assert_eq!(snapshot.rooms.len(), 1);

    let event = events.recv().await.expect("event");
    assert_eq!(
        event,
        HubEvent::DataUpdated {
            hub: controller.hub_id().clone()
        }
    );
    assert_eq!(controller.hub_id().as_str(), "wiser-hub.local");

    controller.disconnect().await;
}

#[tokio::test(start_paused = true)]
async fn initial_connection_retries_every_30s() {
    let hub = Arc::new(MockHub::default());
    hub.fail_next_polls(2);
    let controller = controller_with(&hub, Duration::from_secs(300));
    let state = controller.connection_state();

    controller.connect().await.expect("connect");

    // First attempt fails straight away; the task is now waiting out
    // the fixed retry interval.
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(*state.borrow(), ConnectionState::Retrying { attempt: 1 });
    assert!(controller.snapshot().is_none());

    controller.wait_ready().await.expect("ready");
    assert_eq!(*state.borrow(), ConnectionState::Connected);

    let times = hub.fetch_times();
    assert_eq!(times.len(), 3);
    assert_eq!(times[1] - times[0], Duration::from_secs(30));
    assert_eq!(times[2] - times[1], Duration::from_secs(30));

    controller.disconnect().await;
}

#[tokio::test(start_paused = true)]
async fn refresh_during_startup_is_serviced_immediately() {
    let hub = Arc::new(MockHub::default());
    hub.fail_next_polls(1);
    let controller = controller_with(&hub, Duration::from_secs(300));

    controller.connect().await.expect("connect");
    tokio::time::sleep(Duration::from_secs(5)).await;

    // The hub answers now; the forced refresh must not park until the
    // 30s retry fires.
    assert!(controller.refresh().await);
    assert_eq!(*controller.connection_state().borrow(), ConnectionState::Connected);
    assert!(controller.snapshot().is_some());

    let times = hub.fetch_times();
    assert_eq!(times.len(), 2);
    assert_eq!(times[1] - times[0], Duration::from_secs(5));

    controller.disconnect().await;
}

#[tokio::test(start_paused = true)]
async fn failed_startup_refresh_keeps_retry_cadence() {
    let hub = Arc::new(MockHub::default());
    hub.fail_next_polls(2);
    let controller = controller_with(&hub, Duration::from_secs(300));

    controller.connect().await.expect("connect");
    tokio::time::sleep(Duration::from_secs(5)).await;

    // Still down: the forced attempt is acked as failed and the retry
    // timer armed at t0 keeps its original deadline.
    assert!(!controller.refresh().await);
    assert!(controller.snapshot().is_none());

    controller.wait_ready().await.expect("ready");

    let times = hub.fetch_times();
    assert_eq!(times.len(), 3);
    assert_eq!(times[1] - times[0], Duration::from_secs(5));
    assert_eq!(times[2] - times[0], Duration::from_secs(30));

    controller.disconnect().await;
}

#[tokio::test(start_paused = true)]
async fn scheduled_polls_follow_configured_interval() {
    let hub = Arc::new(MockHub::default());
    let controller = controller_with(&hub, Duration::from_secs(100));

    controller.connect().await.expect("connect");
    controller.wait_ready().await.expect("ready");

    tokio::time::sleep(Duration::from_secs(250)).await;

    let times = hub.fetch_times();
    assert_eq!(times.len(), 3);
    assert_eq!(times[1] - times[0], Duration::from_secs(100));
    assert_eq!(times[2] - times[1], Duration::from_secs(100));

    controller.disconnect().await;
}

#[tokio::test(start_paused = true)]
async fn forced_refresh_rearms_full_interval() {
    let hub = Arc::new(MockHub::default());
    let controller = controller_with(&hub, Duration::from_secs(100));

    controller.connect().await.expect("connect");
    controller.wait_ready().await.expect("ready");

    tokio::time::sleep(Duration::from_secs(50)).await;
    assert!(controller.refresh().await);
    assert_eq!(hub.fetch_times().len(), 2);

    // The poll that was due 50s out got abandoned; nothing happens
    // until a full interval after the forced refresh.
    tokio::time::sleep(Duration::from_secs(99)).await;
    assert_eq!(hub.fetch_times().len(), 2);

    tokio::time::sleep(Duration::from_secs(2)).await;
    let times = hub.fetch_times();
    assert_eq!(times.len(), 3);
    assert_eq!(times[2] - times[1], Duration::from_secs(100));

    controller.disconnect().await;
}

#[tokio::test(start_paused = true)]
async fn poll_interval_change_applies_at_next_rearm() {
    let hub = Arc::new(MockHub::default());
    let controller = controller_with(&hub, Duration::from_secs(300));

    controller.connect().await.expect("connect");
    controller.wait_ready().await.expect("ready");

    controller.set_poll_interval(Duration::from_secs(60));
    // Forcing a refresh re-arms the timer with the new interval.
    assert!(controller.refresh().await);

    tokio::time::sleep(Duration::from_secs(61)).await;

    let times = hub.fetch_times();
    assert_eq!(times.len(), 3);
    assert_eq!(times[2] - times[1], Duration::from_secs(60));

    controller.disconnect().await;
}

#[tokio::test(start_paused = true)]
async fn poll_failure_keeps_last_snapshot() {
    let hub = Arc::new(MockHub::default());
    hub.script_poll(Ok(()));
    hub.script_poll(Err(ApiError::Timeout { timeout_secs: 10 }));
    let controller = controller_with(&hub, Duration::from_secs(100));

    controller.connect().await.expect("connect");
    controller.wait_ready().await.expect("ready");
    let first = controller.snapshot().expect("snapshot");

    tokio::time::sleep(Duration::from_secs(101)).await;
    assert_eq!(hub.fetch_times().len(), 2);

    // The failed poll must not tear down the published data.
    let held = controller.snapshot().expect("snapshot");
    assert_eq!(held.fetched_at, first.fetched_at);

    controller.disconnect().await;
}

#[tokio::test(start_paused = true)]
async fn disconnect_stops_polling() {
    let hub = Arc::new(MockHub::default());
    let controller = controller_with(&hub, Duration::from_secs(100));

    controller.connect().await.expect("connect");
    controller.wait_ready().await.expect("ready");
    controller.disconnect().await;

    tokio::time::sleep(Duration::from_secs(500)).await;
    assert_eq!(hub.fetch_times().len(), 1);

    let state = controller.connection_state();
    assert_eq!(*state.borrow(), ConnectionState::Disconnected);
}

// ── Command execution ────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn command_waits_settle_delay_then_refreshes() {
    let hub = Arc::new(MockHub::default());
    let controller = controller_with(&hub, Duration::from_secs(300));

    controller.connect().await.expect("connect");
    controller.wait_ready().await.expect("ready");

    controller.set_room_temperature("Lounge", 22.5).await;

    let calls = hub.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(
        calls[1].1,
        Call::SetRoomTemperature {
            room: "Lounge".into(),
            celsius: 22.5,
        }
    );
    assert_eq!(calls[2].1, Call::FetchAll);
    // Read-back happens only after the hub had time to apply the write.
    assert!(calls[2].0 - calls[1].0 >= Duration::from_millis(500));

    controller.disconnect().await;
}

#[tokio::test(start_paused = true)]
async fn failed_command_skips_refresh() {
    let hub = Arc::new(MockHub::default());
    hub.fail_next_write();
    let controller = controller_with(&hub, Duration::from_secs(300));

    controller.connect().await.expect("connect");
    controller.wait_ready().await.expect("ready");

    // Swallowed: the call returns normally and no refresh follows.
    controller.set_appliance_state("Dryer", true).await;

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(hub.fetch_times().len(), 1);

    controller.disconnect().await;
}

#[tokio::test(start_paused = true)]
async fn unknown_room_never_reaches_the_hub() {
    let hub = Arc::new(MockHub::default());
    let controller = controller_with(&hub, Duration::from_secs(300));

    controller.connect().await.expect("connect");
    controller.wait_ready().await.expect("ready");

    controller.set_room_temperature("Attic", 22.0).await;

    // Validation failed against the snapshot, so no write and no
    // follow-up refresh happened.
    assert_eq!(hub.calls().len(), 1);

    controller.disconnect().await;
}

#[tokio::test(start_paused = true)]
async fn home_mode_command_collapses_hub_mode() {
    let hub = Arc::new(MockHub::default());
    let controller = controller_with(&hub, Duration::from_secs(300));

    controller.connect().await.expect("connect");
    controller.wait_ready().await.expect("ready");

    controller
        .execute(Command::SetHomeMode {
            mode: HomeMode::EnergySaver,
            come_back_minutes: Some(120),
        })
        .await;

    let calls = hub.calls();
    assert_eq!(
        calls[1].1,
        Call::SetHomeMode {
            hub_mode: "schedule".into(),
            mode: "energysaver".into(),
            come_back_minutes: Some(120),
        }
    );

    controller.disconnect().await;
}
