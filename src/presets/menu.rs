use std::collections::BTreeMap;

use log::warn;

use crate::error::AppError;
use crate::hw::{Display, Key, Keypad};
use crate::models::{LightRegistry, LightState};
use crate::presets::{Preset, PresetStore};
use crate::ui::editor::ColorEditor;
use crate::ui::lights::LightsMenu;
use crate::ui::menu::MenuList;
use crate::ui::text_input::text_input;

const ADD_LABEL: &str = "[ ADD ]";
const SAVE_LABEL: &str = "[ SAVE ]";

/// Pick a preset slot to edit. Saving a changed preset asks for a new name
/// (prefilled with the old one), rewrites the preset file and returns.
pub struct PresetsListMenu;

impl PresetsListMenu {
    pub fn run(
        store: &mut PresetStore,
        registry: &mut LightRegistry,
        display: &mut dyn Display,
        keypad: &mut dyn Keypad,
    ) -> Result<(), AppError> {
        let slots = store.slots();
        let labels = slots
            .iter()
            .map(|slot| match store.get(slot) {
                Some(preset) => format!("{}: {}", slot, preset.name),
                None => slot.clone(),
            })
            .collect();
        let mut menu = MenuList::new(labels);
        if menu.show_if_empty(display) {
            return Ok(());
        }
        menu.draw(display);

        loop {
            keypad.poll();

            if keypad.pressed(Key::Cancel) {
                return Ok(());
            }
            if keypad.pressed(Key::Confirm) {
                let slot = &slots[menu.selected];
                if let Some(preset) = store.get(slot).cloned() {
                    if let Some(entries) =
                        PresetMenu::run(preset.entries, registry, display, keypad)
                    {
                        let name = match text_input(display, keypad, "Name", &preset.name, true)
                        {
                            Some(name) if !name.is_empty() => name,
                            _ => preset.name,
                        };
                        store.set(slot, Preset { name, entries });
                        store.save()?;
                        return Ok(());
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

/// Edit the lights of one preset. Confirm on a light re-edits its saved
/// state through the color editor, the red key removes it, ADD picks one
/// of the lights not yet in the preset, SAVE hands the changed entries
/// back to the caller. Cancel discards everything.
pub struct PresetMenu;

impl PresetMenu {
    pub fn run(
        mut entries: BTreeMap<String, LightState>,
        registry: &mut LightRegistry,
        display: &mut dyn Display,
        keypad: &mut dyn Keypad,
    ) -> Option<BTreeMap<String, LightState>> {
        // Outer loop rebuilds the menu after structural changes.
        loop {
            let ids: Vec<String> = entries.keys().cloned().collect();
            let mut labels: Vec<String> = ids
                .iter()
                .map(|id| match registry.find_by_id(id) {
                    Some(device) => device.name.clone(),
                    None => id.clone(),
                })
                .collect();
            labels.push(ADD_LABEL.to_string());
            labels.push(SAVE_LABEL.to_string());
            let mut menu = MenuList::new(labels);
            menu.draw(display);

            'input: loop {
                keypad.poll();

                if keypad.pressed(Key::Cancel) {
                    return None;
                }
                if keypad.pressed(Key::Confirm) {
                    if menu.selected == ids.len() + 1 {
                        return Some(entries);
                    }
                    if menu.selected == ids.len() {
                        display.clear();
                        display.print_at("Loading...", 5, 1);
                        if let Err(err) = registry.refresh() {
                            warn!("light list refresh failed: {}", err);
                        }
                        let unused: Vec<String> = registry
                            .ids()
                            .into_iter()
                            .filter(|id| !entries.contains_key(id))
                            .collect();
                        if let Some(id) =
                            LightsMenu::pick_from(unused).run(registry, display, keypad)
                        {
                            if let Some(device) = registry.find_by_id(&id) {
                                entries.insert(id, device.state);
                            }
                        }
                        break 'input;
                    }
                    // Re-edit a light already in the preset.
                    let id = &ids[menu.selected];
                    let applied = match registry.find_by_id(id) {
                        Some(device) => ColorEditor::new(device).run(display, keypad),
                        None => false,
                    };
                    if applied {
                        if let Some(device) = registry.find_by_id(id) {
                            entries.insert(id.clone(), device.state);
                        }
                    }
                    menu.draw(display);
                }
                if keypad.pressed(Key::Red) {
                    if menu.selected < ids.len() {
                        entries.remove(&ids[menu.selected]);
                        break 'input;
                    }
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
}
