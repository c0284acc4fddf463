use crate::hw::{Display, Key, Keypad, COLS};

const CHARS_MIN: &str = " abcdefghijklmnopqrstuvwxyz";
const CHARS_ALL: &str =
    " abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789,.;:-_=+!@#$%&*";

/// Single-line text editor on row 2 with a blinking LCD cursor.
///
/// Up/Down cycle the character bank at the cursor cell, Left/Right move
/// (Right extends the answer up to 20 characters), Red blanks the cell and
/// steps left. Returns the trimmed answer, or `None` on cancel.
pub fn text_input(
    display: &mut dyn Display,
    keypad: &mut dyn Keypad,
    title: &str,
    prefill: &str,
    min_chars: bool,
) -> Option<String> {
    display.clear();
    display.print_at(&format!("{}:", title), 0, 1);
    display.print_at(prefill, 0, 2);
    display.move_to(0, 2);
    display.show_cursor();
    display.blink_cursor_on();

    let mut answer: Vec<char> = if prefill.is_empty() {
        vec![' ']
    } else {
        prefill.chars().collect()
    };
    let bank: Vec<char> = if min_chars { CHARS_MIN } else { CHARS_ALL }
        .chars()
        .collect();
    let mut bank_pos = 0usize;
    let mut pos = 0usize;
    let mut cancelled = false;

    loop {
        keypad.poll();

        if keypad.pressed(Key::Cancel) {
            cancelled = true;
            break;
        }
        if keypad.pressed(Key::Confirm) {
            break;
        }
        // Blank the selected cell and step back.
        if keypad.pressed(Key::Red) {
            answer[pos] = ' ';
            display.put_char(' ');
            if pos > 0 {
                pos -= 1;
            }
            display.move_to(pos, 2);
        }
        // Cycle the character bank at the cursor.
        if keypad.pressed(Key::Up) {
            bank_pos = if bank_pos + 1 < bank.len() {
                bank_pos + 1
            } else {
                0
            };
            answer[pos] = bank[bank_pos];
            display.put_char(bank[bank_pos]);
            display.move_to(pos, 2);
        }
        if keypad.pressed(Key::Down) {
            bank_pos = if bank_pos > 0 {
                bank_pos - 1
            } else {
                bank.len() - 1
            };
            answer[pos] = bank[bank_pos];
            display.put_char(bank[bank_pos]);
            display.move_to(pos, 2);
        }
        // Move within the answer; Right grows it up to the screen width.
        if keypad.pressed(Key::Right) {
            if pos == answer.len() - 1 && pos < COLS - 1 {
                answer.push(' ');
            }
            if pos < answer.len() - 1 {
                pos += 1;
            }
            display.move_to(pos, 2);
        }
        if keypad.pressed(Key::Left) {
            if pos > 0 {
                pos -= 1;
            }
            display.move_to(pos, 2);
        }
    }

    display.blink_cursor_off();
    display.hide_cursor();

    if cancelled {
        None
    } else {
        Some(answer.iter().collect::<String>().trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hw::fake::{FakeDisplay, ScriptedKeypad};

    #[test]
    fn test_confirm_returns_trimmed_prefill() {
        let mut display = FakeDisplay::new();
        let mut keypad = ScriptedKeypad::of_keys(&[Key::Confirm]);
        let answer = text_input(&mut display, &mut keypad, "Name", "Scene one ", true);
        assert_eq!(answer.as_deref(), Some("Scene one"));
        assert!(display.row(1).starts_with("Name:"));
    }

    #[test]
    fn test_cancel_returns_none() {
        let mut display = FakeDisplay::new();
        let mut keypad = ScriptedKeypad::of_keys(&[Key::Cancel]);
        assert_eq!(
            text_input(&mut display, &mut keypad, "Name", "x", true),
            None
        );
    }

    #[test]
    fn test_up_cycles_bank_and_edits_cell() {
        let mut display = FakeDisplay::new();
        // Up turns the first cell into 'a' (bank " abc..."), confirm.
        let mut keypad = ScriptedKeypad::of_keys(&[Key::Up, Key::Confirm]);
        let answer = text_input(&mut display, &mut keypad, "Name", "", true);
        assert_eq!(answer.as_deref(), Some("a"));
    }

    #[test]
    fn test_right_extends_and_red_erases() {
        let mut display = FakeDisplay::new();
        // "ab" prefilled; move right past the end (extends), set 'a' there,
        // then Red erases it and steps back; confirm -> "ab".
        let mut keypad = ScriptedKeypad::of_keys(&[
            Key::Right,
            Key::Right,
            Key::Up,
            Key::Red,
            Key::Confirm,
        ]);
        let answer = text_input(&mut display, &mut keypad, "Name", "ab", true);
        assert_eq!(answer.as_deref(), Some("ab"));
    }
}
