//! Hardware collaborators. The real GPIO/LCD and keypad drivers live
//! outside this crate; the panel logic only sees these traits.

pub mod console;
#[cfg(test)]
pub mod fake;

pub const COLS: usize = 20;
pub const ROWS: usize = 4;

/// CGRAM slot used for the "light is off" toggle glyph (hollow box).
pub const GLYPH_TOGGLE_OFF: u8 = 0;
/// CGRAM slot used for the "light is on" toggle glyph (filled pattern).
pub const GLYPH_TOGGLE_ON: u8 = 1;
/// CGRAM slot used for slider bar segments. Shares slot 0 with the toggle
/// glyph; whichever view is active uploads its own bitmap.
pub const GLYPH_BAR: u8 = 0;

pub const TOGGLE_OFF_BITMAP: [u8; 8] = [0x00, 0x1F, 0x11, 0x11, 0x11, 0x1F, 0x00, 0x00];
pub const TOGGLE_ON_BITMAP: [u8; 8] = [0x00, 0x1F, 0x15, 0x1F, 0x15, 0x1F, 0x00, 0x00];
pub const BAR_BITMAP: [u8; 8] = [0x00, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x00, 0x00];

/// Logical keys of the panel's matrix keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Digit(u8),
    Up,
    Down,
    Left,
    Right,
    /// "Potvrz" — confirm/enter.
    Confirm,
    /// "Zrusit" — cancel/back.
    Cancel,
    /// "Revize" — toggle/mode-switch.
    Revise,
    /// "Straight" — apply in place.
    Straight,
    /// Red — preset modifier / delete.
    Red,
}

/// 20x4 character display.
pub trait Display {
    fn clear(&mut self);
    fn move_to(&mut self, col: usize, row: usize);
    fn put_char(&mut self, ch: char);
    /// Write one of the custom CGRAM characters at the cursor.
    fn put_glyph(&mut self, slot: u8);
    /// Upload an 8-byte bitmap to one of the 8 CGRAM slots.
    fn custom_char(&mut self, slot: u8, bitmap: [u8; 8]);

    fn print(&mut self, text: &str) {
        for ch in text.chars() {
            self.put_char(ch);
        }
    }

    fn print_at(&mut self, text: &str, col: usize, row: usize) {
        self.move_to(col, row);
        self.print(text);
    }

    fn show_cursor(&mut self) {}
    fn hide_cursor(&mut self) {}
    fn blink_cursor_on(&mut self) {}
    fn blink_cursor_off(&mut self) {}
    fn backlight_on(&mut self) {}
    fn backlight_off(&mut self) {}
}

/// Matrix keypad. `poll` samples all keys once; `pressed` reports whether a
/// key went down during the last poll. The driver is responsible for
/// debouncing and for pacing the poll loop.
pub trait Keypad {
    fn poll(&mut self);
    fn pressed(&self, key: Key) -> bool;
    fn any_pressed(&self) -> bool;
    fn backlight_on(&mut self) {}
    fn backlight_off(&mut self) {}
}

/// Local temperature probe shown on the dashboard.
pub trait TempSensor {
    /// Latest reading, already formatted (e.g. "21.3"), or `None` when the
    /// sensor has nothing yet.
    fn read(&mut self) -> Option<String>;
}

/// Used when no probe is wired up.
pub struct NoTempSensor;

impl TempSensor for NoTempSensor {
    fn read(&mut self) -> Option<String> {
        None
    }
}
