use std::time::{Duration, Instant};

use log::warn;

use crate::hw::{Display, Key, Keypad};
use crate::models::light_state::ColorMode;
use crate::models::{LightRegistry, LightState};
use crate::presets::PresetStore;

/// After the red key, a numeric key pressed within this window turns the
/// preset's lights off instead of applying it.
const MODIFIER_WINDOW: Duration = Duration::from_secs(5);

/// Handle one polled key frame from the idle screen. Returns true when a
/// preset key was consumed (the caller should redraw).
pub fn key_pressed(
    store: &PresetStore,
    registry: &mut LightRegistry,
    display: &mut dyn Display,
    keypad: &mut dyn Keypad,
) -> bool {
    if keypad.pressed(Key::Red) {
        let deadline = Instant::now() + MODIFIER_WINDOW;
        while Instant::now() < deadline {
            keypad.poll();
            if preset_keys(store, registry, display, keypad, true) {
                return true;
            }
        }
    }
    preset_keys(store, registry, display, keypad, false)
}

fn preset_keys(
    store: &PresetStore,
    registry: &mut LightRegistry,
    display: &mut dyn Display,
    keypad: &dyn Keypad,
    turn_off_only: bool,
) -> bool {
    for digit in 1..=9u8 {
        if keypad.pressed(Key::Digit(digit)) {
            apply(store, registry, display, &digit.to_string(), turn_off_only);
            return true;
        }
    }
    false
}

/// Send one preset's state to every light it names. Lights missing from
/// the registry are skipped; a failed commit on one light does not stop
/// the rest.
pub fn apply(
    store: &PresetStore,
    registry: &mut LightRegistry,
    display: &mut dyn Display,
    slot: &str,
    turn_off_only: bool,
) {
    let Some(preset) = store.get(slot) else {
        warn!("no preset in slot {}", slot);
        return;
    };
    display.clear();
    display.print_at("Applying...", 5, 1);

    for (light_id, state) in &preset.entries {
        let Some(device) = registry.find_by_id(light_id) else {
            warn!("preset {} names unknown light {}", slot, light_id);
            continue;
        };
        let committed = if turn_off_only {
            device.turn_off()
        } else {
            match state.mode {
                Some(ColorMode::Color) => match (state.hue, state.sat, state.bri) {
                    (Some(hue), Some(sat), Some(bri)) => {
                        device.set_color(state.on, hue, sat, bri)
                    }
                    _ => device.set_raw(&raw_payload(state)),
                },
                Some(ColorMode::ColorTemp) => match (state.ct, state.bri) {
                    (Some(ct), Some(bri)) => device.set_ctemp(state.on, ct, bri),
                    _ => device.set_raw(&raw_payload(state)),
                },
                None => device.set_raw(&raw_payload(state)),
            }
        };
        if !committed {
            warn!("preset {} failed for light {}", slot, light_id);
        }
    }
}

/// Wire-format body for snapshots without a usable mode. Hue and sat are
/// rescaled from the local 0..1 range.
fn raw_payload(state: &LightState) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    body.insert("on".to_string(), state.on.into());
    if let Some(bri) = state.bri {
        body.insert("bri".to_string(), bri.into());
    }
    if let Some(ct) = state.ct {
        body.insert("ct".to_string(), ct.into());
    }
    if let Some(hue) = state.hue {
        body.insert("hue".to_string(), ((hue * 65535.0).round() as u64).into());
    }
    if let Some(sat) = state.sat {
        body.insert("sat".to_string(), ((sat * 255.0).round() as u64).into());
    }
    serde_json::Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::api::BridgeClient;
    use crate::color;
    use crate::hw::fake::{FakeDisplay, ScriptedKeypad};
    use crate::presets::Preset;

    fn scene_store(slot: &str, light_id: &str, state: LightState) -> PresetStore {
        let dir = tempfile::tempdir().unwrap();
        let mut store = PresetStore::load(&dir.path().join("presets.json")).unwrap();
        let mut entries = BTreeMap::new();
        entries.insert(light_id.to_string(), state);
        store.set(
            slot,
            Preset {
                name: "Scene".to_string(),
                entries,
            },
        );
        store
    }

    fn registry_with_two_lights() -> (tokio::runtime::Runtime, MockServer, LightRegistry) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let server = rt.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/api/KEY/lights"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "1": {"name": "Lamp", "state": {"on": false, "bri": 10, "hue": 0, "sat": 0, "colormode": "hs"}},
                    "2": {"name": "Strip", "state": {"on": false, "bri": 10, "ct": 300, "colormode": "ct"}}
                })))
                .mount(&server)
                .await;
            Mock::given(method("PUT"))
                .respond_with(ResponseTemplate::new(200))
                .mount(&server)
                .await;
            server
        });
        let client = Rc::new(BridgeClient::new(&server.uri(), "KEY").unwrap());
        let mut registry = LightRegistry::new(client);
        registry.refresh().unwrap();
        (rt, server, registry)
    }

    fn put_bodies(rt: &tokio::runtime::Runtime, server: &MockServer) -> Vec<(String, serde_json::Value)> {
        rt.block_on(server.received_requests())
            .unwrap()
            .iter()
            .filter(|r| r.method.as_str() == "PUT")
            .map(|r| {
                (
                    r.url.path().to_string(),
                    serde_json::from_slice(&r.body).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_numeric_key_applies_color_preset_to_named_light_only() {
        let (rt, server, mut registry) = registry_with_two_lights();
        let store = scene_store(
            "3",
            "1",
            LightState {
                on: true,
                mode: Some(ColorMode::Color),
                bri: Some(128),
                ct: None,
                hue: Some(0.5),
                sat: Some(1.0),
            },
        );
        let mut display = FakeDisplay::new();
        let mut keypad = ScriptedKeypad::of_keys(&[Key::Digit(3)]);
        keypad.poll();

        assert!(key_pressed(&store, &mut registry, &mut display, &mut keypad));
        assert!(display.row(1).contains("Applying..."));

        let puts = put_bodies(&rt, &server);
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].0, "/api/KEY/lights/1/state");
        let (x, y) = color::hsv_to_xy(0.5, 1.0, 128.0);
        assert_eq!(puts[0].1, json!({"on": true, "xy": [x, y], "bri": 128}));
    }

    #[test]
    fn test_red_then_digit_turns_preset_lights_off() {
        let (rt, server, mut registry) = registry_with_two_lights();
        let store = scene_store(
            "2",
            "2",
            LightState {
                on: true,
                mode: Some(ColorMode::ColorTemp),
                bri: Some(60),
                ct: Some(400),
                hue: None,
                sat: None,
            },
        );
        let mut display = FakeDisplay::new();
        let mut keypad = ScriptedKeypad::of_keys(&[Key::Red, Key::Digit(2)]);
        keypad.poll();

        assert!(key_pressed(&store, &mut registry, &mut display, &mut keypad));

        let puts = put_bodies(&rt, &server);
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].1, json!({"on": false}));
    }

    #[test]
    fn test_ctemp_preset_sends_ct_body() {
        let (rt, server, mut registry) = registry_with_two_lights();
        let store = scene_store(
            "1",
            "2",
            LightState {
                on: true,
                mode: Some(ColorMode::ColorTemp),
                bri: Some(60),
                ct: Some(400),
                hue: None,
                sat: None,
            },
        );
        let mut display = FakeDisplay::new();

        apply(&store, &mut registry, &mut display, "1", false);

        let puts = put_bodies(&rt, &server);
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].0, "/api/KEY/lights/2/state");
        assert_eq!(puts[0].1, json!({"on": true, "ct": 400, "bri": 60}));
    }

    #[test]
    fn test_modeless_preset_falls_back_to_raw_body() {
        let (rt, server, mut registry) = registry_with_two_lights();
        let store = scene_store(
            "1",
            "1",
            LightState {
                on: true,
                mode: None,
                bri: Some(10),
                ct: None,
                hue: Some(0.5),
                sat: Some(1.0),
            },
        );
        let mut display = FakeDisplay::new();

        apply(&store, &mut registry, &mut display, "1", false);

        let puts = put_bodies(&rt, &server);
        assert_eq!(puts.len(), 1);
        assert_eq!(
            puts[0].1,
            json!({"on": true, "bri": 10, "hue": 32768, "sat": 255})
        );
    }

    #[test]
    fn test_unknown_light_is_skipped() {
        let (rt, server, mut registry) = registry_with_two_lights();
        let store = scene_store(
            "1",
            "99",
            LightState {
                on: true,
                mode: Some(ColorMode::ColorTemp),
                bri: Some(60),
                ct: Some(400),
                hue: None,
                sat: None,
            },
        );
        let mut display = FakeDisplay::new();

        apply(&store, &mut registry, &mut display, "1", false);
        assert!(put_bodies(&rt, &server).is_empty());
    }

    #[test]
    fn test_empty_slot_is_ignored() {
        let (rt, server, mut registry) = registry_with_two_lights();
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::load(&dir.path().join("presets.json")).unwrap();
        let mut display = FakeDisplay::new();
        let mut keypad = ScriptedKeypad::of_keys(&[Key::Digit(5)]);
        keypad.poll();

        // Consumed as a preset key even when the slot is empty.
        assert!(key_pressed(&store, &mut registry, &mut display, &mut keypad));
        assert!(put_bodies(&rt, &server).is_empty());
    }

    #[test]
    fn test_non_preset_key_is_not_consumed() {
        let (_rt, _server, mut registry) = registry_with_two_lights();
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::load(&dir.path().join("presets.json")).unwrap();
        let mut display = FakeDisplay::new();
        let mut keypad = ScriptedKeypad::of_keys(&[Key::Up]);
        keypad.poll();

        assert!(!key_pressed(&store, &mut registry, &mut display, &mut keypad));
    }
}
