use serde::Deserialize;

/// One light as enumerated by `GET /lights`.
///
/// Everything is optional: the bridge also lists entries that are not
/// controllable lights (no `state.on`), and those are skipped at registry
/// level rather than treated as parse errors.
#[derive(Debug, Clone, Deserialize)]
pub struct LightPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub hascolor: Option<bool>,
    #[serde(default)]
    pub state: StatePayload,
    #[serde(default)]
    pub ctmin: Option<u16>,
    #[serde(default)]
    pub ctmax: Option<u16>,
}

/// Raw light state as reported by the bridge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatePayload {
    #[serde(default)]
    pub on: Option<bool>,
    #[serde(default)]
    pub bri: Option<u8>,
    /// Hue in the bridge's 0..=65535 scale.
    #[serde(default)]
    pub hue: Option<u16>,
    /// Saturation in the bridge's 0..=255 scale.
    #[serde(default)]
    pub sat: Option<u8>,
    #[serde(default)]
    pub ct: Option<u16>,
    #[serde(default)]
    pub xy: Option<[f64; 2]>,
    #[serde(default)]
    pub colormode: Option<String>,
}
