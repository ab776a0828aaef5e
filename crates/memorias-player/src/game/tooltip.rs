//! Hover tooltip for hotspots

use crate::engine::font;
use crate::engine::{Rect, SCREEN_WIDTH};

/// Horizontal padding on each side of the label
pub const PAD_X: i32 = 5;
pub const PAD_Y: i32 = 3;
/// Offset from the zone's top-left corner
const OFFSET_X: i32 = 10;
const OFFSET_Y: i32 = -20;
/// Margin kept from the left and right screen edges
const EDGE_MARGIN: i32 = 10;

/// Placement for a tooltip of width `tooltip_w` next to a zone anchored at
/// (zone_x, zone_y), kept on a screen `screen_w` wide.
pub fn tooltip_position(zone_x: i32, zone_y: i32, tooltip_w: i32, screen_w: i32) -> (i32, i32) {
    let mut x = zone_x + OFFSET_X;
    let mut y = zone_y + OFFSET_Y;
    if y < 0 {
        y = zone_y - OFFSET_Y;
    }
    if x + tooltip_w > screen_w {
        x = screen_w - tooltip_w - EDGE_MARGIN;
    }
    if x < 0 {
        x = EDGE_MARGIN;
    }
    (x, y)
}

pub fn tooltip_size(text: &str) -> (i32, i32) {
    (font::text_width(text) + 2 * PAD_X, font::GLYPH_HEIGHT + 2 * PAD_Y)
}

#[derive(Debug, Default)]
pub struct Tooltip {
    text: Option<String>,
    x: i32,
    y: i32,
}

impl Tooltip {
    pub fn show_for(&mut self, text: &str, zone: Rect) {
        let (w, _) = tooltip_size(text);
        let (x, y) = tooltip_position(zone.x, zone.y, w, SCREEN_WIDTH as i32);
        self.text = Some(text.to_string());
        self.x = x;
        self.y = y;
    }

    pub fn hide(&mut self) {
        self.text = None;
    }

    #[cfg(test)]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[cfg(test)]
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn draw(&self, fb: &mut [u32]) {
        let Some(text) = &self.text else { return };
        let (w, h) = tooltip_size(text);
        font::draw_rect(fb, self.x, self.y, w, h, 0xCC000000);
        font::draw_text(fb, self.x + PAD_X, self.y + PAD_Y, text, 0xFFFFFFFF);
    }
}
