use std::time::Duration;

use log::warn;

use crate::config::Settings;
use crate::error::AppError;
use crate::hw::{Display, Key, Keypad};
use crate::models::LightRegistry;
use crate::presets::menu::PresetsListMenu;
use crate::presets::PresetStore;
use crate::ui::menu::MenuList;

const NOTICE_PAUSE: Duration = Duration::from_secs(3);

/// One service-menu row. Actions run in place; submenus take over the
/// screen until they return.
enum ServiceEntry {
    Action(ServiceAction),
    Submenu(ServiceSubmenu),
}

enum ServiceAction {
    RefreshLights,
    NetworkInfo,
}

enum ServiceSubmenu {
    Presets,
}

impl ServiceEntry {
    fn label(&self) -> &'static str {
        match self {
            ServiceEntry::Submenu(ServiceSubmenu::Presets) => "Presets",
            ServiceEntry::Action(ServiceAction::RefreshLights) => "Refresh lights",
            ServiceEntry::Action(ServiceAction::NetworkInfo) => "Network info",
        }
    }
}

/// Maintenance menu behind the dashboard's 0 key.
pub struct ServiceMenu {
    entries: Vec<ServiceEntry>,
}

impl ServiceMenu {
    pub fn new() -> Self {
        Self {
            entries: vec![
                ServiceEntry::Submenu(ServiceSubmenu::Presets),
                ServiceEntry::Action(ServiceAction::RefreshLights),
                ServiceEntry::Action(ServiceAction::NetworkInfo),
            ],
        }
    }

    pub fn run(
        &self,
        settings: &Settings,
        store: &mut PresetStore,
        registry: &mut LightRegistry,
        display: &mut dyn Display,
        keypad: &mut dyn Keypad,
    ) -> Result<(), AppError> {
        let labels = self.entries.iter().map(|e| e.label().to_string()).collect();
        let mut menu = MenuList::new(labels);
        menu.draw(display);

        loop {
            keypad.poll();

            if keypad.pressed(Key::Cancel) {
                return Ok(());
            }
            if keypad.pressed(Key::Confirm) {
                match &self.entries[menu.selected] {
                    ServiceEntry::Submenu(ServiceSubmenu::Presets) => {
                        PresetsListMenu::run(store, registry, display, keypad)?;
                    }
                    ServiceEntry::Action(ServiceAction::RefreshLights) => {
                        display.clear();
                        display.print_at("Loading...", 5, 1);
                        match registry.refresh() {
                            Ok(()) => {
                                display.clear();
                                display.print_at(
                                    &format!("{} lights found", registry.len()),
                                    0,
                                    1,
                                );
                            }
                            Err(err) => {
                                warn!("light list refresh failed: {}", err);
                                display.clear();
                                display.print_at("Refresh failed", 0, 1);
                            }
                        }
                        std::thread::sleep(NOTICE_PAUSE);
                    }
                    ServiceEntry::Action(ServiceAction::NetworkInfo) => {
                        display.clear();
                        display.print_at("Bridge:", 0, 0);
                        match settings.bridge_host() {
                            Ok(host) => {
                                let host: String = host.chars().take(20).collect();
                                display.print_at(&host, 0, 1);
                            }
                            Err(_) => display.print_at("not configured", 0, 1),
                        }
                        if let Some(ssid) = settings.wifi_ssid() {
                            display.print_at("WiFi:", 0, 2);
                            let ssid: String = ssid.chars().take(14).collect();
                            display.print_at(&ssid, 6, 2);
                        }
                        std::thread::sleep(NOTICE_PAUSE);
                    }
                }
                menu.draw(display);
            }
            if keypad.pressed(Key::Up) {
                menu.move_up();
                menu.draw(display);
            }
            if keypad.pressed(Key::Down) {
                menu.move_down();
                menu.draw(display);
            }
        }
    }
}

impl Default for ServiceMenu {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::api::BridgeClient;
    use crate::hw::fake::{FakeDisplay, ScriptedKeypad};

    fn fixtures() -> (
        tokio::runtime::Runtime,
        MockServer,
        LightRegistry,
        Settings,
        PresetStore,
        tempfile::TempDir,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let server = rt.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/api/KEY/lights"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "1": {"name": "Lamp", "state": {"on": true, "bri": 200}}
                })))
                .mount(&server)
                .await;
            server
        });
        let client = Rc::new(BridgeClient::new(&server.uri(), "KEY").unwrap());
        let registry = LightRegistry::new(client);

        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("system.cfg");
        std::fs::write(&cfg_path, "bridge_host=bridge.lan\napi_key=KEY\nwifi_ssid=attic\n")
            .unwrap();
        let settings = Settings::load(&cfg_path).unwrap();
        let store = PresetStore::load(&dir.path().join("presets.json")).unwrap();
        (rt, server, registry, settings, store, dir)
    }

    #[test]
    fn test_menu_lists_all_entries() {
        let (_rt, _server, mut registry, settings, mut store, _dir) = fixtures();
        let mut display = FakeDisplay::new();
        let mut keypad = ScriptedKeypad::of_keys(&[Key::Cancel]);

        ServiceMenu::new()
            .run(&settings, &mut store, &mut registry, &mut display, &mut keypad)
            .unwrap();
        assert!(display.row(1).starts_with("> Presets"));
        assert!(display.row(2).contains("Refresh lights"));
        assert!(display.row(3).contains("Network info"));
    }

    #[test]
    fn test_refresh_action_reloads_registry() {
        let (_rt, _server, mut registry, settings, mut store, _dir) = fixtures();
        let mut display = FakeDisplay::new();
        let mut keypad = ScriptedKeypad::of_keys(&[Key::Down, Key::Confirm, Key::Cancel]);

        ServiceMenu::new()
            .run(&settings, &mut store, &mut registry, &mut display, &mut keypad)
            .unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_network_info_shows_bridge_and_ssid() {
        let (_rt, _server, mut registry, settings, mut store, _dir) = fixtures();
        let mut display = FakeDisplay::new();
        let mut keypad = ScriptedKeypad::of_keys(&[Key::Up, Key::Confirm, Key::Cancel]);

        ServiceMenu::new()
            .run(&settings, &mut store, &mut registry, &mut display, &mut keypad)
            .unwrap();
        // The menu redraws after the action; the info screen itself was
        // shown in between, so just check the final state is the menu.
        assert!(display.row(1).starts_with("> Presets"));
    }

    #[test]
    fn test_presets_submenu_with_empty_store_returns() {
        let (_rt, _server, mut registry, settings, mut store, _dir) = fixtures();
        let mut display = FakeDisplay::new();
        let mut keypad = ScriptedKeypad::of_keys(&[Key::Confirm, Key::Cancel]);

        ServiceMenu::new()
            .run(&settings, &mut store, &mut registry, &mut display, &mut keypad)
            .unwrap();
    }
}
