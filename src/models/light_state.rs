use serde::{Deserialize, Serialize};

use crate::color;
use crate::models::payload::StatePayload;

/// How the light currently derives its color. The bridge infers this from
/// which fields were last set; it is not directly settable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorMode {
    #[serde(rename = "ctemp")]
    ColorTemp,
    #[serde(rename = "color")]
    Color,
}

/// Local cache of one light's state; the unit of optimistic editing.
///
/// With `mode == ColorTemp` the `hue`/`sat` values are stale and ignored,
/// with `mode == Color` the `ct` value is. A light with `bri == None` is
/// on/off-only and has no sliders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightState {
    pub on: bool,
    #[serde(default)]
    pub mode: Option<ColorMode>,
    #[serde(default)]
    pub bri: Option<u8>,
    #[serde(default)]
    pub ct: Option<u16>,
    /// Hue 0.0..=1.0.
    #[serde(default)]
    pub hue: Option<f64>,
    /// Saturation 0.0..=1.0.
    #[serde(default)]
    pub sat: Option<f64>,
}

impl LightState {
    /// Build the local representation from a raw bridge state payload.
    ///
    /// `hue`/`sat` fields take priority; otherwise `xy` + `bri` are
    /// converted; a light reporting neither carries no color.
    pub fn from_remote(state: &StatePayload) -> Self {
        let (hue, sat) = if let Some(hue) = state.hue {
            (
                Some(hue as f64 / 65535.0),
                state.sat.map(|s| s as f64 / 255.0),
            )
        } else if let Some([x, y]) = state.xy {
            let (h, s, _) = color::xyb_to_hsv(x, y, state.bri.unwrap_or(255) as f64);
            (Some(h), Some(s))
        } else {
            (None, None)
        };

        let mode = match state.colormode.as_deref() {
            Some("hs") | Some("xy") => Some(ColorMode::Color),
            Some("ct") => Some(ColorMode::ColorTemp),
            _ => None,
        };

        Self {
            on: state.on.unwrap_or(false),
            mode,
            bri: state.bri,
            ct: state.ct,
            hue,
            sat,
        }
    }
}
