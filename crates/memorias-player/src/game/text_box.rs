//! Dialog text box
//!
//! A panel along the bottom of the screen with one wrapped message and,
//! optionally, the "[Abrir]" / "[Fechar]" choice buttons. Messages are i18n
//! keys resolved at draw time, so switching language updates an open box.
//!
//! Choice actions are one-shot: clicking either button hands back its
//! command list and hides the whole box.

use crate::engine::font;
use crate::engine::{Rect, SCREEN_HEIGHT, SCREEN_WIDTH};

use super::behavior::Command;
use super::i18n::{t, Language};

pub const PANEL_HEIGHT: i32 = 60;
const PANEL_COLOR: u32 = 0xCC000000;
const TEXT_COLOR: u32 = 0xFFFFFFFF;
const TEXT_X: i32 = 10;
/// Text baseline below the panel top
const TEXT_OFFSET_Y: i32 = 5;
/// Distance of the choice buttons from the bottom edge
const BUTTON_OFFSET_Y: i32 = 25;

/// A clickable text label with a padded hit box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextButton {
    pub x: i32,
    pub y: i32,
    /// i18n key of the label
    pub label: &'static str,
    pub color: u32,
    pub pad_x: i32,
    pub pad_y: i32,
}

impl TextButton {
    pub const fn new(x: i32, y: i32, label: &'static str, color: u32) -> Self {
        Self {
            x,
            y,
            label,
            color,
            pad_x: 5,
            pad_y: 2,
        }
    }

    pub fn rect(&self, lang: Language) -> Rect {
        let text = t(lang, self.label);
        Rect::new(
            self.x,
            self.y,
            (font::text_width(text) + 2 * self.pad_x) as u32,
            (font::GLYPH_HEIGHT + 2 * self.pad_y) as u32,
        )
    }

    pub fn hit(&self, lang: Language, mx: i32, my: i32) -> bool {
        self.rect(lang).contains(mx, my)
    }

    pub fn draw(&self, fb: &mut [u32], lang: Language) {
        font::draw_text_shadow(fb, self.x + self.pad_x, self.y + self.pad_y, t(lang, self.label), self.color);
    }
}

/// "[Sair]" in the top-right corner, shared by both puzzles
pub fn exit_button() -> TextButton {
    TextButton::new(SCREEN_WIDTH as i32 - 70, 20, "btn_exit", 0xFFFFFF00)
}

/// Font size of the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSize {
    #[default]
    Normal,
    Large,
}

impl TextSize {
    fn scale(self) -> i32 {
        match self {
            TextSize::Normal => 1,
            TextSize::Large => 2,
        }
    }
}

#[derive(Debug)]
struct Choices {
    open: Vec<Command>,
    close: Vec<Command>,
}

#[derive(Debug, Default)]
pub struct TextBox {
    message: Option<&'static str>,
    size: TextSize,
    choices: Option<Choices>,
}

impl TextBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_button() -> TextButton {
        TextButton::new(10, SCREEN_HEIGHT as i32 - BUTTON_OFFSET_Y, "btn_open", 0xFF00FF00)
    }

    pub fn close_button() -> TextButton {
        TextButton::new(90, SCREEN_HEIGHT as i32 - BUTTON_OFFSET_Y, "btn_close", 0xFFFF0000)
    }

    /// Show a message; choice buttons are hidden
    pub fn show(&mut self, message: &'static str) {
        self.message = Some(message);
        self.choices = None;
    }

    /// Show a message with "[Abrir]" / "[Fechar]" wired to one-shot actions
    pub fn show_with_choices(&mut self, message: &'static str, open: Vec<Command>, close: Vec<Command>) {
        self.message = Some(message);
        self.choices = Some(Choices { open, close });
    }

    /// Hide text, panel and both buttons
    pub fn hide(&mut self) {
        self.message = None;
        self.choices = None;
    }

    pub fn set_size(&mut self, size: TextSize) {
        self.size = size;
    }

    #[cfg(test)]
    pub fn size(&self) -> TextSize {
        self.size
    }

    #[cfg(test)]
    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    #[cfg(test)]
    pub fn has_choices(&self) -> bool {
        self.choices.is_some()
    }

    #[cfg(test)]
    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    /// Handle a click on the choice buttons. Returns the chosen action's
    /// commands when a button was hit; the box is hidden in that case.
    pub fn on_click(&mut self, lang: Language, mx: i32, my: i32) -> Option<Vec<Command>> {
        if self.choices.is_none() {
            return None;
        }
        let open_hit = Self::open_button().hit(lang, mx, my);
        let close_hit = !open_hit && Self::close_button().hit(lang, mx, my);
        if !open_hit && !close_hit {
            return None;
        }
        let choices = self.choices.take()?;
        self.hide();
        Some(if open_hit { choices.open } else { choices.close })
    }

    /// True if a visible button is under the pointer
    pub fn button_at(&self, lang: Language, mx: i32, my: i32) -> bool {
        self.choices.is_some()
            && (Self::open_button().hit(lang, mx, my) || Self::close_button().hit(lang, mx, my))
    }

    pub fn draw(&self, fb: &mut [u32], lang: Language) {
        let Some(key) = self.message else { return };
        let top = SCREEN_HEIGHT as i32 - PANEL_HEIGHT;
        font::draw_rect(fb, 0, top, SCREEN_WIDTH as i32, PANEL_HEIGHT, PANEL_COLOR);

        let scale = self.size.scale();
        let max_w = SCREEN_WIDTH as i32 - 2 * TEXT_X;
        for (i, line) in font::wrap_text(t(lang, key), max_w, scale).iter().enumerate() {
            let y = top + TEXT_OFFSET_Y + i as i32 * font::LINE_HEIGHT * scale;
            font::draw_text_scaled(fb, TEXT_X, y, line, TEXT_COLOR, scale);
        }

        if self.choices.is_some() {
            Self::open_button().draw(fb, lang);
            Self::close_button().draw(fb, lang);
        }
    }
}
