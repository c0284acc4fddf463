//! Test doubles for the display and keypad.

use std::collections::VecDeque;

use crate::hw::{Display, Key, Keypad, COLS, ROWS};

/// Captures the character grid. Glyph cells are stored as the raw slot
/// number ('\u{0}'..'\u{7}'); `row()` renders them as the digit characters
/// '0'..'7' so assertions stay readable.
pub struct FakeDisplay {
    pub grid: [[char; COLS]; ROWS],
    col: usize,
    row: usize,
    pub clears: usize,
    pub uploaded: Vec<u8>,
}

impl FakeDisplay {
    pub fn new() -> Self {
        Self {
            grid: [[' '; COLS]; ROWS],
            col: 0,
            row: 0,
            clears: 0,
            uploaded: Vec::new(),
        }
    }

    /// Row contents with glyph slots rendered as '0'..'7'.
    pub fn row(&self, row: usize) -> String {
        self.grid[row]
            .iter()
            .map(|&ch| match ch as u32 {
                slot @ 0..=7 => char::from_digit(slot, 10).unwrap(),
                _ => ch,
            })
            .collect()
    }

    /// Glyph slot at a cell, if that cell holds a custom character.
    pub fn glyph_at(&self, col: usize, row: usize) -> Option<u8> {
        let ch = self.grid[row][col] as u32;
        (ch <= 7).then_some(ch as u8)
    }

    fn advance(&mut self) {
        self.col += 1;
        if self.col >= COLS {
            self.col = 0;
            self.row = (self.row + 1) % ROWS;
        }
    }
}

impl Default for FakeDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for FakeDisplay {
    fn clear(&mut self) {
        self.grid = [[' '; COLS]; ROWS];
        self.col = 0;
        self.row = 0;
        self.clears += 1;
    }

    fn move_to(&mut self, col: usize, row: usize) {
        self.col = col.min(COLS - 1);
        self.row = row.min(ROWS - 1);
    }

    fn put_char(&mut self, ch: char) {
        self.grid[self.row][self.col] = ch;
        self.advance();
    }

    fn put_glyph(&mut self, slot: u8) {
        self.grid[self.row][self.col] = char::from(slot & 0x7);
        self.advance();
    }

    fn custom_char(&mut self, slot: u8, _bitmap: [u8; 8]) {
        self.uploaded.push(slot);
    }
}

/// Replays a scripted sequence of key frames, one frame per poll.
pub struct ScriptedKeypad {
    frames: VecDeque<Vec<Key>>,
    current: Vec<Key>,
    pub polls: usize,
}

impl ScriptedKeypad {
    pub fn new(frames: Vec<Vec<Key>>) -> Self {
        Self {
            frames: frames.into(),
            current: Vec::new(),
            polls: 0,
        }
    }

    /// One key per frame, the common case.
    pub fn of_keys(keys: &[Key]) -> Self {
        Self::new(keys.iter().map(|&key| vec![key]).collect())
    }
}

impl Keypad for ScriptedKeypad {
    fn poll(&mut self) {
        self.polls += 1;
        self.current = self.frames.pop_front().unwrap_or_default();
    }

    fn pressed(&self, key: Key) -> bool {
        self.current.contains(&key)
    }

    fn any_pressed(&self) -> bool {
        !self.current.is_empty()
    }
}
