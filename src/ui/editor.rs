use crate::hw::{Display, Key, Keypad, BAR_BITMAP, GLYPH_BAR};
use crate::models::{ColorMode, LightDevice, LightState};

/// Inner width of a slider bar, between the brackets.
const SLIDER_CELLS: usize = 11;
/// Column of the `[` bracket.
const SLIDER_COL: usize = 7;
/// Gutter column for the row cursor.
const CURSOR_COL: usize = 5;

/// Fallback color temperature when switching a light into ct mode that has
/// never reported one.
const DEFAULT_CT: u16 = 350;
/// Fallback hue/sat when switching a light into color mode.
const DEFAULT_HUE: f64 = 0.5;
const DEFAULT_SAT: f64 = 1.0;

/// The four editable fields, in fixed screen-row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Ct,
    Bri,
    Sat,
    Hue,
}

const FIELDS: [Field; 4] = [Field::Ct, Field::Bri, Field::Sat, Field::Hue];

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::Ct => "CT",
            Field::Bri => "Bri",
            Field::Sat => "Sat",
            Field::Hue => "Hue",
        }
    }

    /// (min, max, step) editing policy.
    fn limits(self) -> (f64, f64, f64) {
        match self {
            Field::Ct => (140.0, 650.0, 25.0),
            Field::Bri => (0.0, 255.0, 12.0),
            Field::Sat => (0.0, 1.0, 0.05),
            Field::Hue => (0.0, 1.0, 0.05),
        }
    }

    /// Whether the field participates in the given color mode. Brightness
    /// always does.
    fn relevant(self, mode: Option<ColorMode>) -> bool {
        match self {
            Field::Bri => true,
            Field::Ct => mode != Some(ColorMode::Color),
            Field::Sat | Field::Hue => mode != Some(ColorMode::ColorTemp),
        }
    }
}

fn field_value(state: &LightState, field: Field) -> Option<f64> {
    match field {
        Field::Ct => state.ct.map(f64::from),
        Field::Bri => state.bri.map(f64::from),
        Field::Sat => state.sat,
        Field::Hue => state.hue,
    }
}

fn set_field(state: &mut LightState, field: Field, value: f64) {
    match field {
        Field::Ct => state.ct = Some(value.round() as u16),
        Field::Bri => state.bri = Some(value.round() as u8),
        Field::Sat => state.sat = Some(value),
        Field::Hue => state.hue = Some(value),
    }
}

/// One Left/Right edit: the field's value stepped and clamped to its range.
fn step_value(field: Field, current: f64, increase: bool) -> f64 {
    let (min, max, step) = field.limits();
    let next = if increase {
        current + step
    } else {
        current - step
    };
    next.clamp(min, max)
}

/// Number of filled slider cells for a value: the count of 2x-step
/// multiples between min and the value, with a value at max always filling
/// the bar completely.
fn filled_cells(field: Field, value: f64) -> usize {
    let (min, max, step) = field.limits();
    if value >= max {
        return SLIDER_CELLS;
    }
    if value <= min {
        return 0;
    }
    let cells = ((value - min) / (step * 2.0) - 1e-9).ceil() as usize;
    cells.min(SLIDER_CELLS)
}

/// Commit a snapshot through the setter matching its mode. Used for both
/// apply and cancel-revert.
fn commit_state(device: &mut LightDevice, state: &LightState) -> bool {
    match state.mode {
        Some(ColorMode::Color) => device.set_color(
            state.on,
            state.hue.unwrap_or(DEFAULT_HUE),
            state.sat.unwrap_or(DEFAULT_SAT),
            state.bri.unwrap_or(0),
        ),
        _ => device.set_ctemp(
            state.on,
            state.ct.unwrap_or(DEFAULT_CT),
            state.bri.unwrap_or(0),
        ),
    }
}

/// Slider-based editor for one light's color temperature, brightness,
/// saturation and hue.
///
/// Keeps three state copies: the entry snapshot (for cancel), the working
/// copy (live edit buffer) and the device's own cache (updated by commits).
/// Mode is not directly settable on the bridge; the mode-switch key commits
/// a nudge of the opposite field instead and re-syncs from the result.
pub struct ColorEditor<'a> {
    device: &'a mut LightDevice,
    original: LightState,
    working: LightState,
    selected: usize,
    on_off_only: bool,
    edited: bool,
}

impl<'a> ColorEditor<'a> {
    pub fn new(device: &'a mut LightDevice) -> Self {
        let original = device.state;
        let on_off_only = device.state.bri.is_none();
        Self {
            device,
            original,
            working: original,
            selected: 0,
            on_off_only,
            edited: false,
        }
    }

    /// Run the editor until Confirm or Cancel. Returns true when the edit
    /// was applied (the caller gets the light), false when cancelled.
    pub fn run(mut self, display: &mut dyn Display, keypad: &mut dyn Keypad) -> bool {
        self.draw_base(display);
        let mut dirty = true;
        loop {
            if dirty {
                self.draw(display);
            }
            dirty = false;

            keypad.poll();
            let field = FIELDS[self.selected];

            if keypad.pressed(Key::Cancel) {
                self.cancel();
                return false;
            }
            if keypad.pressed(Key::Confirm) {
                if self.device.state != self.working {
                    self.apply();
                }
                return true;
            }
            if keypad.pressed(Key::Up) {
                if self.selected != 0 {
                    self.selected -= 1;
                }
                dirty = true;
            }
            if keypad.pressed(Key::Down) {
                if self.selected != FIELDS.len() - 1 {
                    self.selected += 1;
                }
                dirty = true;
            }
            if keypad.pressed(Key::Left) && !self.on_off_only {
                dirty |= self.nudge(field, false);
            }
            if keypad.pressed(Key::Right) && !self.on_off_only {
                dirty |= self.nudge(field, true);
            }
            if keypad.pressed(Key::Digit(0)) {
                self.toggle_power();
            }
            if keypad.pressed(Key::Revise) && !self.on_off_only {
                self.draw_base(display);
                self.switch_mode();
                self.working = self.device.state;
                dirty = true;
            }
            if keypad.pressed(Key::Straight) && !self.on_off_only {
                self.apply();
                self.working = self.device.state;
                dirty = true;
            }
        }
    }

    /// Step the active field. Fields without a current value (irrelevant to
    /// the light's mode) ignore the edit.
    fn nudge(&mut self, field: Field, increase: bool) -> bool {
        let Some(current) = field_value(&self.working, field) else {
            return false;
        };
        set_field(&mut self.working, field, step_value(field, current, increase));
        self.edited = true;
        true
    }

    fn toggle_power(&mut self) {
        if self.working.on {
            self.device.turn_off();
        } else {
            self.device.turn_on();
        }
        self.working.on = !self.working.on;
        self.edited = true;
    }

    fn switch_mode(&mut self) {
        if self.device.state.mode == Some(ColorMode::ColorTemp) {
            // Going to color mode: nudge hue and commit as color.
            let (_, max, step) = Field::Hue.limits();
            let mut hue = self.working.hue.unwrap_or(DEFAULT_HUE);
            if hue <= max - step {
                hue += 0.01;
            } else {
                hue -= 0.01;
            }
            self.device.set_color(
                self.working.on,
                hue,
                self.working.sat.unwrap_or(DEFAULT_SAT),
                self.working.bri.unwrap_or(0),
            );
        } else {
            // Going to ct mode: nudge ct and commit as color temperature.
            let (_, max, _) = Field::Ct.limits();
            let mut ct = self.working.ct.unwrap_or(DEFAULT_CT);
            if f64::from(ct) < max {
                ct += 1;
            } else {
                ct -= 1;
            }
            self.device
                .set_ctemp(self.working.on, ct, self.working.bri.unwrap_or(0));
        }
        self.edited = true;
    }

    fn apply(&mut self) {
        if self.on_off_only {
            return;
        }
        commit_state(self.device, &self.working);
        self.edited = true;
    }

    /// Revert the device to the entry snapshot, but only if something was
    /// actually edited or committed meanwhile.
    fn cancel(&mut self) {
        if self.on_off_only || !self.edited {
            return;
        }
        commit_state(self.device, &self.original);
    }

    fn draw_base(&self, display: &mut dyn Display) {
        display.clear();
        if self.on_off_only {
            display.print_at("On/Off only", 5, 1);
            return;
        }
        display.custom_char(GLYPH_BAR, BAR_BITMAP);
        for (row, field) in FIELDS.iter().enumerate() {
            display.print_at(field.label(), 0, row);
        }
    }

    fn draw(&self, display: &mut dyn Display) {
        if self.on_off_only {
            return;
        }
        // Blank all cursor positions, then draw the active one.
        for row in 0..FIELDS.len() {
            display.print_at(" ", CURSOR_COL, row);
        }
        display.print_at(">", CURSOR_COL, self.selected);

        for (row, &field) in FIELDS.iter().enumerate() {
            self.draw_slider(display, row, field);
        }
    }

    fn draw_slider(&self, display: &mut dyn Display, row: usize, field: Field) {
        let value = match field_value(&self.working, field) {
            Some(value) if field.relevant(self.working.mode) => value,
            _ => {
                display.print_at(&" ".repeat(SLIDER_CELLS + 2), SLIDER_COL, row);
                return;
            }
        };

        let filled = filled_cells(field, value);
        display.print_at("[", SLIDER_COL, row);
        for _ in 0..filled {
            display.put_glyph(GLYPH_BAR);
        }
        for _ in filled..SLIDER_CELLS {
            display.put_char(' ');
        }
        display.put_char(']');
    }
}
