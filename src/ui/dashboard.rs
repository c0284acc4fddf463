use std::time::{Duration, Instant};

use chrono::{Local, Timelike};
use log::warn;

use crate::api::calendar::CalendarSource;
use crate::hw::{Display, Keypad, TempSensor, BAR_BITMAP, COLS, GLYPH_BAR};

/// Backlights go dark after this long without a key press.
const BACKLIGHT_TIMEOUT: Duration = Duration::from_secs(30);
const TEMP_INTERVAL: Duration = Duration::from_secs(60);
const CALENDAR_INTERVAL: Duration = Duration::from_secs(600);

/// Clock text for the bottom-right corner: hour space-padded, minute
/// zero-padded.
pub(crate) fn format_clock(hour: u32, minute: u32) -> String {
    format!("{:2}:{:02}", hour, minute)
}

/// Idle screen: calendar text on the top rows, temperature and clock on
/// the bottom row. Everything is driven by wall-clock deadlines checked
/// once per poll-loop iteration.
pub struct Dashboard {
    calendar: Box<dyn CalendarSource>,
    sensor: Box<dyn TempSensor>,
    calendar_lines: Vec<String>,
    temp: Option<String>,
    shown_time: Option<(u32, u32)>,
    progress: usize,
    backlight: bool,
    backlight_off_at: Instant,
    temp_due: Instant,
    calendar_due: Instant,
}

impl Dashboard {
    pub fn new(calendar: Box<dyn CalendarSource>, sensor: Box<dyn TempSensor>) -> Self {
        let now = Instant::now();
        Self {
            calendar,
            sensor,
            calendar_lines: Vec::new(),
            temp: None,
            shown_time: None,
            progress: 0,
            backlight: true,
            backlight_off_at: now + BACKLIGHT_TIMEOUT,
            temp_due: now + TEMP_INTERVAL,
            calendar_due: now + CALENDAR_INTERVAL,
        }
    }

    /// Extend the boot progress bar on row 2 by `steps` segments.
    pub fn load_bar(&mut self, display: &mut dyn Display, steps: usize) {
        if self.progress == 0 {
            display.custom_char(GLYPH_BAR, BAR_BITMAP);
        }
        display.move_to(self.progress, 2);
        for _ in 0..steps.min(COLS - self.progress) {
            display.put_glyph(GLYPH_BAR);
            self.progress += 1;
        }
    }

    /// Fetch the calendar text. Fetch failures leave the rows empty.
    pub fn refresh_calendar(&mut self) {
        self.calendar_lines = match self.calendar.fetch() {
            Ok(lines) => lines,
            Err(err) => {
                warn!("calendar fetch failed: {}", err);
                Vec::new()
            }
        };
    }

    /// Full redraw, used whenever a menu hands the screen back.
    pub fn draw(&mut self, display: &mut dyn Display) {
        display.clear();
        for (row, line) in self.calendar_lines.iter().take(2).enumerate() {
            let line: String = line.chars().take(COLS).collect();
            display.print_at(&line, 0, row);
        }
        self.temp = self.sensor.read();
        self.draw_temp(display);
        self.draw_clock(display);
    }

    /// Reset the idle timer and light the backlights.
    pub fn wake(&mut self, display: &mut dyn Display, keypad: &mut dyn Keypad) {
        self.backlight_off_at = Instant::now() + BACKLIGHT_TIMEOUT;
        if !self.backlight {
            self.backlight = true;
            display.backlight_on();
            keypad.backlight_on();
        }
    }

    /// One idle-loop step: check every deadline once, repaint what is due.
    pub fn tick(&mut self, display: &mut dyn Display, keypad: &mut dyn Keypad) {
        let now = Instant::now();

        if self.backlight && now >= self.backlight_off_at {
            self.backlight = false;
            display.backlight_off();
            keypad.backlight_off();
        }

        let t = Local::now();
        if self.shown_time != Some((t.hour(), t.minute())) {
            self.draw_clock(display);
        }

        if now >= self.temp_due {
            self.temp_due = now + TEMP_INTERVAL;
            let reading = self.sensor.read();
            if reading != self.temp {
                self.temp = reading;
                self.draw_temp(display);
            }
        }

        if now >= self.calendar_due {
            self.calendar_due = now + CALENDAR_INTERVAL;
            self.refresh_calendar();
            self.draw(display);
        }
    }

    fn draw_clock(&mut self, display: &mut dyn Display) {
        let t = Local::now();
        self.shown_time = Some((t.hour(), t.minute()));
        display.print_at(&format_clock(t.hour(), t.minute()), 15, 3);
    }

    fn draw_temp(&self, display: &mut dyn Display) {
        if let Some(temp) = &self.temp {
            display.print_at(&format!("{}C", temp), 0, 3);
        }
    }
}
