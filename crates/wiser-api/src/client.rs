// Wiser Smart REST client
//
// Wraps `reqwest::Client` with hub-specific URL construction and response
// decoding. Every call carries HTTP basic credentials -- the controller
// has no session concept.

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{ControllerInfo, HubData};
use crate::transport::TransportConfig;

/// HTTP client for a single Wiser Smart controller.
pub struct WiserClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
    timeout_secs: u64,
}

impl WiserClient {
    /// Create a client for the controller at `host` (IP or hostname).
    pub fn new(
        host: &str,
        username: String,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("http://{host}/"))?;
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            username,
            password,
            timeout_secs: transport.timeout.as_secs(),
        })
    }

    /// Create a client from a pre-built base URL and `reqwest::Client`.
    ///
    /// Used by tests to point at a mock server.
    pub fn from_parts(
        base_url: Url,
        username: String,
        password: SecretString,
        http: reqwest::Client,
    ) -> Self {
        Self {
            http,
            base_url,
            username,
            password,
            timeout_secs: 10,
        }
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Read operations ──────────────────────────────────────────────

    /// Fetch the hub's full aggregate document: devices, rooms,
    /// appliances, home mode, cloud status, and temperature bounds.
    ///
    /// `GET /rest/hub`
    pub async fn fetch_all(&self) -> Result<HubData, Error> {
        let url = self.api_url("rest/hub")?;
        debug!("fetching full hub document");
        self.get(url).await
    }

    /// Fetch the controller's identity. Used by the setup flow to both
    /// validate credentials and derive the entity name prefix.
    ///
    /// `GET /rest/controller`
    pub async fn controller_name(&self) -> Result<String, Error> {
        let url = self.api_url("rest/controller")?;
        let info: ControllerInfo = self.get(url).await?;
        Ok(info.name)
    }

    // ── Write operations ─────────────────────────────────────────────

    /// Set a room's target temperature (degrees Celsius).
    ///
    /// `POST /rest/rooms/{room}/target`
    pub async fn set_room_temperature(&self, room: &str, celsius: f64) -> Result<(), Error> {
        let url = self.api_url(&format!("rest/rooms/{room}/target"))?;
        debug!(room, celsius, "setting room target temperature");
        self.post(url, &json!({ "targetValue": celsius })).await
    }

    /// Switch a smart-plug appliance on or off.
    ///
    /// `POST /rest/appliances/{appliance}/state`
    pub async fn set_appliance_state(&self, appliance: &str, on: bool) -> Result<(), Error> {
        let url = self.api_url(&format!("rest/appliances/{appliance}/state"))?;
        debug!(appliance, on, "setting appliance state");
        self.post(url, &json!({ "state": on })).await
    }

    /// Set the hub-wide home mode.
    ///
    /// The hub only distinguishes `manual` and `schedule` at the HVAC
    /// level (`hub_mode`); the richer `mode` string and the come-back
    /// time (minutes, for holiday/energy-saver modes) ride along.
    ///
    /// `POST /rest/mode`
    pub async fn set_home_mode(
        &self,
        hub_mode: &str,
        mode: &str,
        come_back_minutes: Option<u32>,
    ) -> Result<(), Error> {
        let url = self.api_url("rest/mode")?;
        debug!(hub_mode, mode, ?come_back_minutes, "setting home mode");
        self.post(
            url,
            &json!({
                "hcMode": hub_mode,
                "mode": mode,
                "comeBackTime": come_back_minutes,
            }),
        )
        .await
    }

    // ── Request plumbing ─────────────────────────────────────────────

    fn api_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;
        self.decode(resp).await
    }

    async fn post(&self, url: Url, body: &impl Serialize) -> Result<(), Error> {
        debug!("POST {}", url);
        let resp = self
            .http
            .post(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;
        self.check_status(resp).await?;
        Ok(())
    }

    fn map_transport(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }

    async fn check_status(&self, resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(Error::Authentication {
                message: "controller rejected credentials".into(),
            });
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(Error::Rest {
                message: if message.is_empty() {
                    status.to_string()
                } else {
                    message
                },
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }

    /// Decode a JSON body, keeping the raw text for diagnostics when the
    /// controller answers with something that is not the expected shape.
    async fn decode<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let resp = self.check_status(resp).await?;
        let body = resp.text().await.map_err(|e| self.map_transport(e))?;
        serde_json::from_str(&body).map_err(|e| Error::MalformedResponse {
            message: e.to_string(),
            body,
        })
    }
}
