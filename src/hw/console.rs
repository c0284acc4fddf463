//! Terminal-backed stand-ins for the LCD and keypad, so the panel can be
//! exercised on a development machine without the GPIO drivers.

use std::io::{self, BufRead, Write};

use crate::hw::{Display, Key, Keypad, COLS, ROWS};

/// Renders the 20x4 character grid to stdout after every change.
pub struct ConsoleDisplay {
    grid: [[char; COLS]; ROWS],
    col: usize,
    row: usize,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self {
            grid: [[' '; COLS]; ROWS],
            col: 0,
            row: 0,
        }
    }

    fn flush(&self) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "+{}+", "-".repeat(COLS));
        for row in &self.grid {
            let line: String = row.iter().collect();
            let _ = writeln!(out, "|{}|", line);
        }
        let _ = writeln!(out, "+{}+", "-".repeat(COLS));
    }

    fn advance(&mut self) {
        self.col += 1;
        if self.col >= COLS {
            self.col = 0;
            self.row = (self.row + 1) % ROWS;
        }
    }
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

const GLYPH_CHARS: [char; 8] = ['#', '@', '%', '&', '*', '+', '=', '-'];

impl Display for ConsoleDisplay {
    fn clear(&mut self) {
        self.grid = [[' '; COLS]; ROWS];
        self.col = 0;
        self.row = 0;
        self.flush();
    }

    fn move_to(&mut self, col: usize, row: usize) {
        self.col = col.min(COLS - 1);
        self.row = row.min(ROWS - 1);
    }

    fn put_char(&mut self, ch: char) {
        self.grid[self.row][self.col] = ch;
        self.advance();
        self.flush();
    }

    fn put_glyph(&mut self, slot: u8) {
        self.grid[self.row][self.col] = GLYPH_CHARS[(slot & 0x7) as usize];
        self.advance();
        self.flush();
    }

    fn custom_char(&mut self, _slot: u8, _bitmap: [u8; 8]) {}

    fn print(&mut self, text: &str) {
        for ch in text.chars() {
            self.grid[self.row][self.col] = ch;
            self.advance();
        }
        self.flush();
    }
}

/// Reads one line from stdin per poll; each character maps to a key.
///
/// u/d/l/r = navigation, o = confirm, x = cancel, m = revise, s = straight,
/// e = red, 0-9 = digits. An empty line is a tick with no key pressed.
pub struct ConsoleKeypad {
    pressed: Vec<Key>,
}

impl ConsoleKeypad {
    pub fn new() -> Self {
        Self {
            pressed: Vec::new(),
        }
    }
}

impl Default for ConsoleKeypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad for ConsoleKeypad {
    fn poll(&mut self) {
        self.pressed.clear();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return;
        }
        for ch in line.trim().chars() {
            let key = match ch {
                'u' => Key::Up,
                'd' => Key::Down,
                'l' => Key::Left,
                'r' => Key::Right,
                'o' => Key::Confirm,
                'x' => Key::Cancel,
                'm' => Key::Revise,
                's' => Key::Straight,
                'e' => Key::Red,
                '0'..='9' => Key::Digit(ch as u8 - b'0'),
                _ => continue,
            };
            self.pressed.push(key);
        }
    }

    fn pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn any_pressed(&self) -> bool {
        !self.pressed.is_empty()
    }
}
