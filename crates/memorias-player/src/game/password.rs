//! Numeric keypad password puzzle
//!
//! The state machine is independent of drawing: the scene controller feeds
//! it [`KeypadKey`]s (from clicks on the keypad or from the keyboard) and
//! reacts to the returned [`PasswordOutcome`]. Exiting the puzzle is the
//! controller's business; no callback fires on exit.

use crate::engine::font;
use crate::engine::{Rect, SCREEN_HEIGHT, SCREEN_WIDTH};

use super::behavior::Command;
use super::i18n::{t, Language};

/// Callback run on success or failure; returns follow-up scene commands
pub type PuzzleCallback = Box<dyn FnMut() -> Vec<Command>>;

pub const BUTTON_WIDTH: i32 = 30;
pub const BUTTON_HEIGHT: i32 = 25;
pub const BUTTON_SPACING: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadKey {
    Digit(char),
    Clear,
    Ok,
}

/// What a key press did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordOutcome {
    /// Digit appended
    Typed,
    /// Buffer already full, digit dropped
    MaxDigits,
    Cleared,
    /// Correct code; commands returned by the success callback
    Correct(Vec<Command>),
    /// Wrong code; buffer reset, commands returned by the failure callback
    Wrong(Vec<Command>),
    /// Not a digit
    Ignored,
}

pub struct PasswordPuzzle {
    password: String,
    input: String,
    on_success: PuzzleCallback,
    on_failure: PuzzleCallback,
}

impl std::fmt::Debug for PasswordPuzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordPuzzle")
            .field("len", &self.password.len())
            .field("input", &self.input)
            .finish_non_exhaustive()
    }
}

impl PasswordPuzzle {
    pub fn start(password: &str, on_success: PuzzleCallback, on_failure: PuzzleCallback) -> Self {
        tracing::info!("Password puzzle started ({} digits)", password.chars().count());
        Self {
            password: password.to_string(),
            input: String::new(),
            on_success,
            on_failure,
        }
    }

    #[cfg(test)]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn max_digits(&self) -> usize {
        self.password.chars().count()
    }

    /// Typed digits padded with underscores to the password length
    pub fn display(&self) -> String {
        let mut shown = self.input.clone();
        for _ in self.input.chars().count()..self.max_digits() {
            shown.push('_');
        }
        shown
    }

    pub fn press(&mut self, key: KeypadKey) -> PasswordOutcome {
        match key {
            KeypadKey::Digit(d) if d.is_ascii_digit() => {
                if self.input.chars().count() < self.max_digits() {
                    self.input.push(d);
                    PasswordOutcome::Typed
                } else {
                    PasswordOutcome::MaxDigits
                }
            }
            KeypadKey::Digit(_) => PasswordOutcome::Ignored,
            KeypadKey::Clear => {
                self.input.clear();
                PasswordOutcome::Cleared
            }
            KeypadKey::Ok => {
                if self.input == self.password {
                    tracing::info!("Password accepted");
                    PasswordOutcome::Correct((self.on_success)())
                } else {
                    tracing::debug!("Password rejected");
                    self.input.clear();
                    PasswordOutcome::Wrong((self.on_failure)())
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Keypad layout
// ---------------------------------------------------------------------------

/// One keypad button, centered on (cx, cy)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadButton {
    pub key: KeypadKey,
    pub cx: i32,
    pub cy: i32,
}

impl KeypadButton {
    pub fn rect(&self) -> Rect {
        Rect::centered(self.cx, self.cy, BUTTON_WIDTH as u32, BUTTON_HEIGHT as u32)
    }
}

/// 1-9 in a 3×3 grid, then CLR / 0 / OK on the bottom row
pub fn keypad_layout() -> Vec<KeypadButton> {
    let step_x = BUTTON_WIDTH + BUTTON_SPACING;
    let step_y = BUTTON_HEIGHT + BUTTON_SPACING;
    let start_x = SCREEN_WIDTH as i32 / 2 - (BUTTON_WIDTH * 3 / 2 + BUTTON_SPACING);
    let start_y = SCREEN_HEIGHT as i32 / 2;

    let mut buttons = Vec::with_capacity(12);
    for row in 0..3 {
        for col in 0..3 {
            let digit = char::from(b'1' + (row * 3 + col) as u8);
            buttons.push(KeypadButton {
                key: KeypadKey::Digit(digit),
                cx: start_x + col * step_x,
                cy: start_y + row * step_y,
            });
        }
    }
    let bottom = start_y + 3 * step_y;
    buttons.push(KeypadButton { key: KeypadKey::Clear, cx: start_x - step_x, cy: bottom });
    buttons.push(KeypadButton { key: KeypadKey::Digit('0'), cx: start_x + step_x, cy: bottom });
    buttons.push(KeypadButton { key: KeypadKey::Ok, cx: start_x + 3 * step_x, cy: bottom });
    buttons
}

pub fn key_at(mx: i32, my: i32) -> Option<KeypadKey> {
    keypad_layout()
        .into_iter()
        .find(|b| b.rect().contains(mx, my))
        .map(|b| b.key)
}

/// Draw the digit display and the keypad
pub fn draw(fb: &mut [u32], puzzle: &PasswordPuzzle, lang: Language) {
    let display = puzzle.display();
    let scale = 2;
    let w = font::text_width_scaled(&display, scale) + 20;
    let h = font::GLYPH_HEIGHT * scale + 10;
    let cx = SCREEN_WIDTH as i32 / 2;
    let cy = SCREEN_HEIGHT as i32 / 2 - 40;
    font::draw_rect(fb, cx - w / 2, cy - h / 2, w, h, 0xFF333333);
    font::draw_text_scaled(fb, cx - w / 2 + 10, cy - h / 2 + 5, &display, 0xFF00FF00, scale);

    for button in keypad_layout() {
        let r = button.rect();
        let (label, color, bg) = match button.key {
            KeypadKey::Digit(d) => (d.to_string(), 0xFFFFFFFF, 0xFF666666),
            KeypadKey::Clear => (t(lang, "key_clear").to_string(), 0xFFFFDD00, 0xFF666666),
            KeypadKey::Ok => (t(lang, "key_ok").to_string(), 0xFF00FF00, 0xFF444444),
        };
        font::draw_rect(fb, r.x, r.y, r.width as i32, r.height as i32, bg);
        let tx = button.cx - font::text_width(&label) / 2;
        let ty = button.cy - font::GLYPH_HEIGHT / 2;
        font::draw_text(fb, tx, ty, &label, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting(counter: &Rc<Cell<u32>>, cmds: Vec<Command>) -> PuzzleCallback {
        let c = Rc::clone(counter);
        Box::new(move || {
            c.set(c.get() + 1);
            cmds.clone()
        })
    }

    fn puzzle(ok: &Rc<Cell<u32>>, fail: &Rc<Cell<u32>>) -> PasswordPuzzle {
        PasswordPuzzle::start(
            "124",
            counting(ok, vec![Command::AddItem("pincel")]),
            counting(fail, vec![]),
        )
    }

    fn type_code(p: &mut PasswordPuzzle, code: &str) {
        for d in code.chars() {
            p.press(KeypadKey::Digit(d));
        }
    }

    #[test]
    fn wrong_code_resets_and_calls_failure() {
        let (ok, fail) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        let mut p = puzzle(&ok, &fail);
        type_code(&mut p, "123");
        assert_eq!(p.press(KeypadKey::Ok), PasswordOutcome::Wrong(vec![]));
        assert_eq!(p.input(), "");
        assert_eq!(p.display(), "___");
        assert_eq!((ok.get(), fail.get()), (0, 1));
    }

    #[test]
    fn right_code_calls_success_once() {
        let (ok, fail) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        let mut p = puzzle(&ok, &fail);
        type_code(&mut p, "124");
        assert_eq!(
            p.press(KeypadKey::Ok),
            PasswordOutcome::Correct(vec![Command::AddItem("pincel")])
        );
        assert_eq!((ok.get(), fail.get()), (1, 0));
    }

    #[test]
    fn extra_digit_is_dropped() {
        let (ok, fail) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        let mut p = puzzle(&ok, &fail);
        type_code(&mut p, "124");
        assert_eq!(p.press(KeypadKey::Digit('9')), PasswordOutcome::MaxDigits);
        assert_eq!(p.input(), "124");
    }

    #[test]
    fn clear_empties_buffer() {
        let (ok, fail) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        let mut p = puzzle(&ok, &fail);
        type_code(&mut p, "12");
        assert_eq!(p.display(), "12_");
        assert_eq!(p.press(KeypadKey::Clear), PasswordOutcome::Cleared);
        assert_eq!(p.display(), "___");
        assert_eq!((ok.get(), fail.get()), (0, 0));
    }

    #[test]
    fn short_input_is_wrong() {
        let (ok, fail) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        let mut p = puzzle(&ok, &fail);
        type_code(&mut p, "12");
        assert!(matches!(p.press(KeypadKey::Ok), PasswordOutcome::Wrong(_)));
        assert_eq!(fail.get(), 1);
    }

    #[test]
    fn non_digits_are_ignored() {
        let (ok, fail) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        let mut p = puzzle(&ok, &fail);
        assert_eq!(p.press(KeypadKey::Digit('x')), PasswordOutcome::Ignored);
        assert_eq!(p.input(), "");
    }

    #[test]
    fn keypad_matches_reference_layout() {
        let layout = keypad_layout();
        assert_eq!(layout.len(), 12);
        let find = |k| layout.iter().find(|b| b.key == k).copied().unwrap();
        assert_eq!((find(KeypadKey::Digit('1')).cx, find(KeypadKey::Digit('1')).cy), (163, 120));
        assert_eq!((find(KeypadKey::Digit('9')).cx, find(KeypadKey::Digit('9')).cy), (233, 180));
        assert_eq!((find(KeypadKey::Digit('0')).cx, find(KeypadKey::Digit('0')).cy), (198, 210));
        assert_eq!(find(KeypadKey::Clear).cx, 128);
        assert_eq!(find(KeypadKey::Ok).cx, 268);
    }

    #[test]
    fn buttons_do_not_overlap() {
        let layout = keypad_layout();
        for b in &layout {
            assert_eq!(key_at(b.cx, b.cy), Some(b.key));
        }
        assert_eq!(key_at(5, 5), None);
    }
}
