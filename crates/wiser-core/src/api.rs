// ── Device API client seam ──
//
// The controller talks to the hub through this trait rather than the
// concrete HTTP client, so tests can script poll results and the
// transport can evolve independently.

use async_trait::async_trait;

use wiser_api::{Error, HubData, WiserClient};

/// The contract the controller consumes from the device API client.
#[async_trait]
pub trait HubApi: Send + Sync {
    /// One full poll: the hub's aggregate document.
    async fn fetch_all(&self) -> Result<HubData, Error>;

    /// The controller's identity (setup-flow validation).
    async fn controller_name(&self) -> Result<String, Error>;

    async fn set_room_temperature(&self, room: &str, celsius: f64) -> Result<(), Error>;

    async fn set_appliance_state(&self, appliance: &str, on: bool) -> Result<(), Error>;

    async fn set_home_mode(
        &self,
        hub_mode: &str,
        mode: &str,
        come_back_minutes: Option<u32>,
    ) -> Result<(), Error>;
}

#[async_trait]
impl HubApi for WiserClient {
    async fn fetch_all(&self) -> Result<HubData, Error> {
        WiserClient::fetch_all(self).await
    }

    async fn controller_name(&self) -> Result<String, Error> {
        WiserClient::controller_name(self).await
    }

    async fn set_room_temperature(&self, room: &str, celsius: f64) -> Result<(), Error> {
        WiserClient::set_room_temperature(self, room, celsius).await
    }

    async fn set_appliance_state(&self, appliance: &str, on: bool) -> Result<(), Error> {
        WiserClient::set_appliance_state(self, appliance, on).await
    }

    async fn set_home_mode(
        &self,
        hub_mode: &str,
        mode: &str,
        come_back_minutes: Option<u32>,
    ) -> Result<(), Error> {
        WiserClient::set_home_mode(self, hub_mode, mode, come_back_minutes).await
    }
}
