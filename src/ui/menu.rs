use std::time::Duration;

use crate::hw::{
    Display, GLYPH_TOGGLE_OFF, GLYPH_TOGGLE_ON, TOGGLE_OFF_BITMAP, TOGGLE_ON_BITMAP,
};

/// How long the "Empty menu" notice stays on screen before the menu
/// returns to its caller.
const EMPTY_MENU_PAUSE: Duration = Duration::from_secs(3);

/// Labels longer than this are cut before the 2-character prefix is added,
/// leaving the last columns free for the toggle glyph.
const LABEL_WIDTH: usize = 16;

/// Generic scrollable menu over a 4-row window.
///
/// The selected item is pinned to screen row 1 (second row) with a "> "
/// prefix; rows 0, 2 and 3 show the neighbors when they exist. Selection
/// moves with modulo wraparound; rendering does not wrap.
pub struct MenuList {
    labels: Vec<String>,
    toggles: Vec<Option<bool>>,
    show_toggles: bool,
    pub selected: usize,
}

impl MenuList {
    pub fn new(labels: Vec<String>) -> Self {
        let toggles = vec![None; labels.len()];
        Self {
            labels,
            toggles,
            show_toggles: false,
            selected: 0,
        }
    }

    pub fn with_toggles(labels: Vec<String>, toggles: Vec<Option<bool>>) -> Self {
        debug_assert_eq!(labels.len(), toggles.len());
        Self {
            labels,
            toggles,
            show_toggles: true,
            selected: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, index: usize) -> &str {
        &self.labels[index]
    }

    pub fn set_toggle(&mut self, index: usize, value: Option<bool>) {
        self.toggles[index] = value;
    }

    pub fn move_up(&mut self) {
        if self.selected == 0 {
            self.selected = self.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        self.selected += 1;
        if self.selected == self.len() {
            self.selected = 0;
        }
    }

    /// Show the empty-menu notice and pause. Returns true when the caller
    /// should bail out without entering its input loop.
    pub fn show_if_empty(&self, display: &mut dyn Display) -> bool {
        if !self.is_empty() {
            return false;
        }
        display.clear();
        display.print("Empty menu");
        std::thread::sleep(EMPTY_MENU_PAUSE);
        true
    }

    /// Full redraw of the 4-row window around the selection.
    pub fn draw(&self, display: &mut dyn Display) {
        display.custom_char(GLYPH_TOGGLE_OFF, TOGGLE_OFF_BITMAP);
        display.custom_char(GLYPH_TOGGLE_ON, TOGGLE_ON_BITMAP);
        display.clear();
        if self.selected != 0 {
            self.draw_row(display, 0);
        }
        self.draw_row(display, 1);
        if self.selected + 1 < self.len() {
            self.draw_row(display, 2);
        }
        if self.selected + 2 < self.len() {
            self.draw_row(display, 3);
        }
    }

    /// Repaint a single screen row (0..4); row 1 is the selection.
    pub fn draw_row(&self, display: &mut dyn Display, row: usize) {
        let index = self.selected + row - 1;
        let label: String = self.labels[index].chars().take(LABEL_WIDTH).collect();
        let prefix = if row == 1 { "> " } else { "  " };
        display.print_at(prefix, 0, row);
        display.print(&label);

        if self.show_toggles {
            if let Some(on) = self.toggles[index] {
                display.move_to(19, row);
                display.put_glyph(if on { GLYPH_TOGGLE_ON } else { GLYPH_TOGGLE_OFF });
            }
        }
    }
}
