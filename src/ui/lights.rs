use crate::hw::{Display, Key, Keypad};
use crate::models::LightRegistry;
use crate::ui::editor::ColorEditor;
use crate::ui::menu::MenuList;

/// Scrollable list of lights with per-row on/off toggle glyphs.
///
/// Confirm opens the color editor on the selected light; the Revize key
/// flips power directly from the list and repaints only the selected row.
/// In pick mode (used when building presets) an applied edit returns the
/// light's id to the caller instead of staying in the list.
pub struct LightsMenu {
    ids: Vec<String>,
    pick_mode: bool,
}

impl LightsMenu {
    /// Menu over every light in the registry.
    pub fn all(registry: &LightRegistry) -> Self {
        Self {
            ids: registry.ids(),
            pick_mode: false,
        }
    }

    /// Menu over a subset of lights, returning the picked one.
    pub fn pick_from(ids: Vec<String>) -> Self {
        Self {
            ids,
            pick_mode: true,
        }
    }

    /// Returns the picked light id in pick mode, otherwise `None`.
    pub fn run(
        &self,
        registry: &mut LightRegistry,
        display: &mut dyn Display,
        keypad: &mut dyn Keypad,
    ) -> Option<String> {
        let mut menu = self.build_menu(registry);
        if menu.show_if_empty(display) {
            return None;
        }
        menu.draw(display);

        loop {
            keypad.poll();

            if keypad.pressed(Key::Cancel) {
                return None;
            }
            if keypad.pressed(Key::Confirm) {
                let id = self.ids[menu.selected].clone();
                let applied = match registry.find_by_id(&id) {
                    Some(device) => ColorEditor::new(device).run(display, keypad),
                    None => false,
                };
                if applied && self.pick_mode {
                    return Some(id);
                }
                // The editor may have toggled power; re-read before redraw.
                if let Some(device) = registry.find_by_id(&id) {
                    menu.set_toggle(menu.selected, Some(device.state.on));
                }
                menu.draw(display);
            }
            if keypad.pressed(Key::Revise) {
                let id = &self.ids[menu.selected];
                if let Some(device) = registry.find_by_id(id) {
                    let committed = if device.state.on {
                        device.turn_off().then_some(false)
                    } else {
                        device.turn_on().then_some(true)
                    };
                    if let Some(on) = committed {
                        menu.set_toggle(menu.selected, Some(on));
                    }
                }
                menu.draw_row(display, 1);
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

    fn build_menu(&self, registry: &mut LightRegistry) -> MenuList {
        let mut labels = Vec::with_capacity(self.ids.len());
        let mut toggles = Vec::with_capacity(self.ids.len());
        for id in &self.ids {
            match registry.find_by_id(id) {
                Some(device) => {
                    labels.push(device.name.clone());
                    toggles.push(Some(device.state.on));
                }
                None => {
                    labels.push(id.clone());
                    toggles.push(None);
                }
            }
        }
        MenuList::with_toggles(labels, toggles)
    }
}
