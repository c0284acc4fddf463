use std::time::Duration;

use reqwest::blocking::Response;
use reqwest::header::TRANSFER_ENCODING;

use crate::error::AppError;
use crate::models::LightPayload;

/// Socket timeout for every bridge round trip. A request that does not
/// answer within this window is reported as a transport failure.
const BRIDGE_TIMEOUT: Duration = Duration::from_secs(2);

/// Blocking HTTP client for the deCONZ/Hue-style lights REST API.
///
/// One request per call, no retries. Connections are not pooled so the
/// socket is closed on every exit path, success or error.
pub struct BridgeClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl BridgeClient {
    pub fn new(host: &str, api_key: &str) -> Result<Self, AppError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(BRIDGE_TIMEOUT)
            .pool_max_idle_per_host(0)
            .build()?;

        // Accept a full URL for test servers, otherwise assume a bare host.
        let base = if host.starts_with("http") {
            host.to_string()
        } else {
            format!("http://{}", host)
        };

        Ok(Self {
            http,
            base_url: format!("{}/api/{}", base, api_key),
        })
    }

    /// Enumerate all lights, in the order the bridge reports them.
    pub fn get_lights(&self) -> Result<Vec<(String, LightPayload)>, AppError> {
        let url = format!("{}/lights", self.base_url);
        log::debug!("GET {}", url);
        let response = self.http.get(&url).send()?;
        let response = check_response(response)?;

        let map: serde_json::Map<String, serde_json::Value> = response.json()?;
        let mut lights = Vec::with_capacity(map.len());
        for (id, value) in map {
            lights.push((id, serde_json::from_value(value)?));
        }
        Ok(lights)
    }

    /// Fetch a single light's payload.
    pub fn get_light(&self, id: &str) -> Result<LightPayload, AppError> {
        let url = format!("{}/lights/{}", self.base_url, id);
        log::debug!("GET {}", url);
        let response = self.http.get(&url).send()?;
        let response = check_response(response)?;
        Ok(response.json()?)
    }

    /// PUT a state-change body (subset of `{on, bri, ct, xy}`) to one light.
    pub fn put_state(&self, id: &str, body: &serde_json::Value) -> Result<(), AppError> {
        let url = format!("{}/lights/{}/state", self.base_url, id);
        log::debug!("PUT {} {}", url, body);
        let response = self.http.put(&url).json(body).send()?;
        check_response(response)?;
        Ok(())
    }
}

/// Reject chunked responses and non-success statuses.
fn check_response(response: Response) -> Result<Response, AppError> {
    if let Some(te) = response.headers().get(TRANSFER_ENCODING) {
        if te.to_str().unwrap_or("").contains("chunked") {
            return Err(AppError::UnsupportedResponse(
                "chunked transfer-encoding".into(),
            ));
        }
    }
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Api {
            status: status.as_u16(),
        });
    }
    Ok(response)
}
