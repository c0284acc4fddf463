use std::rc::Rc;

use log::warn;
use serde_json::json;

use crate::api::BridgeClient;
use crate::color;
use crate::models::light_state::{ColorMode, LightState};
use crate::models::payload::LightPayload;

/// One controllable light: identity, capabilities, and the locally cached
/// state.
///
/// Every mutator updates the local cache first (optimistically), then
/// issues the remote PUT and reports success as a bool. A failed commit is
/// logged but the local cache is NOT rolled back: the panel shows "last
/// requested" rather than "last confirmed" state.
pub struct LightDevice {
    client: Rc<BridgeClient>,
    pub id: String,
    pub name: String,
    pub supports_color: bool,
    pub ct_range: Option<(u16, u16)>,
    pub state: LightState,
}

impl LightDevice {
    /// Build a device from a registry-refresh payload. Entries whose state
    /// has no `on` field are not controllable lights and yield `None`.
    pub fn from_payload(
        client: Rc<BridgeClient>,
        id: String,
        payload: &LightPayload,
    ) -> Option<Self> {
        payload.state.on?;
        let name = payload.name.clone().unwrap_or_else(|| id.clone());
        let ct_range = match (payload.ctmin, payload.ctmax) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        };
        Some(Self {
            client,
            id,
            name,
            supports_color: payload.hascolor.unwrap_or(false),
            ct_range,
            state: LightState::from_remote(&payload.state),
        })
    }

    #[cfg(test)]
    pub(crate) fn for_tests(
        client: Rc<BridgeClient>,
        id: &str,
        name: &str,
        state: LightState,
    ) -> Self {
        Self {
            client,
            id: id.into(),
            name: name.into(),
            supports_color: true,
            ct_range: None,
            state,
        }
    }

    pub fn turn_on(&mut self) -> bool {
        self.state.on = true;
        self.set_remote(json!({"on": true}))
    }

    pub fn turn_off(&mut self) -> bool {
        self.state.on = false;
        self.set_remote(json!({"on": false}))
    }

    pub fn set_ctemp(&mut self, on: bool, ct: u16, bri: u8) -> bool {
        self.state.on = on;
        self.state.ct = Some(ct);
        self.state.bri = Some(bri);
        self.state.mode = Some(ColorMode::ColorTemp);
        self.set_remote(json!({"on": on, "ct": ct, "bri": bri}))
    }

    pub fn set_color(&mut self, on: bool, hue: f64, sat: f64, bri: u8) -> bool {
        let (x, y) = color::hsv_to_xy(hue, sat, bri as f64);
        self.state.on = on;
        self.state.bri = Some(bri);
        self.state.hue = Some(hue);
        self.state.sat = Some(sat);
        self.state.mode = Some(ColorMode::Color);
        self.set_remote(json!({"on": on, "xy": [x, y], "bri": bri}))
    }

    /// Send a saved payload verbatim, without touching the local cache.
    /// Fallback for preset snapshots with no recognized mode.
    pub fn set_raw(&self, payload: &serde_json::Value) -> bool {
        match self.client.put_state(&self.id, payload) {
            Ok(()) => true,
            Err(err) => {
                warn!("set_raw failed for light {}: {}", self.id, err);
                false
            }
        }
    }

    /// Re-read the remote state and replace the local cache wholesale.
    pub fn refresh(&mut self) -> bool {
        match self.client.get_light(&self.id) {
            Ok(payload) => {
                self.state = LightState::from_remote(&payload.state);
                true
            }
            Err(err) => {
                warn!("refresh failed for light {}: {}", self.id, err);
                false
            }
        }
    }

    fn set_remote(&self, body: serde_json::Value) -> bool {
        match self.client.put_state(&self.id, &body) {
            Ok(()) => true,
            Err(err) => {
                warn!("set state failed for light {}: {}", self.id, err);
                false
            }
        }
    }
}
