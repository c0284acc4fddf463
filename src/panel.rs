use std::path::Path;
use std::rc::Rc;

use crate::api::calendar::{CalendarSource, HttpCalendar, NoCalendar};
use crate::api::BridgeClient;
use crate::config::Settings;
use crate::error::AppError;
use crate::hw::{Display, Key, Keypad, TempSensor};
use crate::models::LightRegistry;
use crate::presets::{engine, PresetStore};
use crate::ui::dashboard::Dashboard;
use crate::ui::lights::LightsMenu;
use crate::ui::service::ServiceMenu;

/// Boot the panel and run its poll loop.
///
/// Confirm opens the light list, key 0 the service menu, numeric keys
/// recall presets; everything else is the dashboard idling. Cancel on the
/// dashboard shuts the panel down. A registry refresh failure here is
/// fatal: a panel without lights has nothing to control.
pub fn run(
    settings: &Settings,
    presets_path: &Path,
    display: &mut dyn Display,
    keypad: &mut dyn Keypad,
    sensor: Box<dyn TempSensor>,
) -> Result<(), AppError> {
    display.clear();
    display.print_at("Starting", 6, 1);

    let calendar: Box<dyn CalendarSource> = match settings.calendar_url() {
        Some(url) => Box::new(HttpCalendar::new(url)?),
        None => Box::new(NoCalendar),
    };
    let mut dash = Dashboard::new(calendar, sensor);
    dash.load_bar(display, 2);

    let client = Rc::new(BridgeClient::new(
        settings.bridge_host()?,
        settings.api_key()?,
    )?);
    dash.load_bar(display, 4);

    let mut registry = LightRegistry::new(client);
    registry.refresh()?;
    dash.load_bar(display, 6);

    let mut store = PresetStore::load(presets_path)?;
    dash.load_bar(display, 4);

    dash.refresh_calendar();
    dash.load_bar(display, 4);

    dash.draw(display);
    let service = ServiceMenu::new();

    loop {
        keypad.poll();

        if keypad.any_pressed() {
            dash.wake(display, keypad);
            if engine::key_pressed(&store, &mut registry, display, keypad) {
                dash.draw(display);
            }
        }
        if keypad.pressed(Key::Cancel) {
            return Ok(());
        }
        if keypad.pressed(Key::Confirm) {
            display.clear();
            display.print_at("Loading...", 5, 1);
            registry.refresh()?;
            LightsMenu::all(&registry).run(&mut registry, display, keypad);
            dash.draw(display);
        }
        if keypad.pressed(Key::Digit(0)) {
            service.run(settings, &mut store, &mut registry, display, keypad)?;
            dash.draw(display);
        }

        dash.tick(display, keypad);
    }
}
