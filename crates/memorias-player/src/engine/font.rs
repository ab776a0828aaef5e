//! Built-in 5×7 bitmap font and rectangle primitives for the 426×240 framebuffer.
//!
//! The font is uppercase-only; lowercase letters are drawn as capitals and
//! Portuguese accented letters fall back to their base letter. Each glyph
//! advances 6 px at scale 1 (5 px glyph + 1 px spacing).

use super::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub const GLYPH_WIDTH: i32 = 5;
pub const GLYPH_HEIGHT: i32 = 7;
pub const ADVANCE: i32 = GLYPH_WIDTH + 1;
/// Vertical distance between wrapped lines at scale 1
pub const LINE_HEIGHT: i32 = GLYPH_HEIGHT + 3;

/// Rows of a glyph, top to bottom; bit 4 is the leftmost column.
fn glyph(ch: char) -> [u8; 7] {
    match ch {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ' ' => [0; 7],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b00100, 0b01000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        ';' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b00100, 0b01000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '_' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111],
        '[' => [0b01110, 0b01000, 0b01000, 0b01000, 0b01000, 0b01000, 0b01110],
        ']' => [0b01110, 0b00010, 0b00010, 0b00010, 0b00010, 0b00010, 0b01110],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '/' => [0b00000, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b00000],
        '\'' => [0b00100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000],
        '"' => [0b01010, 0b01010, 0b01010, 0b00000, 0b00000, 0b00000, 0b00000],
        '>' => [0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000],
        '<' => [0b00010, 0b00100, 0b01000, 0b10000, 0b01000, 0b00100, 0b00010],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '=' => [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000],
        '#' => [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010],
        '*' => [0b00000, 0b00100, 0b10101, 0b01110, 0b10101, 0b00100, 0b00000],
        '%' => [0b11000, 0b11001, 0b00010, 0b00100, 0b01000, 0b10011, 0b00011],
        // Unknown glyph: hollow box
        _ => [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111],
    }
}

/// Map a character onto the glyph set (uppercase, accents stripped)
fn fold(ch: char) -> char {
    let base = match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'É' | 'È' | 'Ê' => 'E',
        'í' | 'ì' | 'Í' | 'Ì' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'ü' | 'Ú' | 'Ù' | 'Ü' => 'U',
        'ç' | 'Ç' => 'C',
        other => other,
    };
    base.to_ascii_uppercase()
}

/// Width in pixels of `text` at scale 1
pub fn text_width(text: &str) -> i32 {
    text_width_scaled(text, 1)
}

pub fn text_width_scaled(text: &str, scale: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 {
        0
    } else {
        (n * ADVANCE - 1) * scale
    }
}

#[inline]
fn blend(dst: u32, color: u32) -> u32 {
    let a = color >> 24;
    if a >= 0xFF {
        return color;
    }
    let inv = 255 - a;
    let ch = |shift: u32| {
        let s = (color >> shift) & 0xFF;
        let d = (dst >> shift) & 0xFF;
        (s * a + d * inv) / 255
    };
    0xFF000000 | (ch(16) << 16) | (ch(8) << 8) | ch(0)
}

#[inline]
fn put(fb: &mut [u32], x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 || x >= SCREEN_WIDTH as i32 || y >= SCREEN_HEIGHT as i32 {
        return;
    }
    let idx = y as usize * SCREEN_WIDTH + x as usize;
    if let Some(px) = fb.get_mut(idx) {
        *px = blend(*px, color);
    }
}

/// Filled rectangle; colors with alpha < 0xFF are blended.
pub fn draw_rect(fb: &mut [u32], x: i32, y: i32, w: i32, h: i32, color: u32) {
    for py in y.max(0)..(y + h).min(SCREEN_HEIGHT as i32) {
        for px in x.max(0)..(x + w).min(SCREEN_WIDTH as i32) {
            put(fb, px, py, color);
        }
    }
}

pub fn draw_rect_outline(fb: &mut [u32], x: i32, y: i32, w: i32, h: i32, color: u32) {
    if w <= 0 || h <= 0 {
        return;
    }
    for px in x..x + w {
        put(fb, px, y, color);
        put(fb, px, y + h - 1, color);
    }
    for py in y + 1..y + h - 1 {
        put(fb, x, py, color);
        put(fb, x + w - 1, py, color);
    }
}

pub fn draw_text(fb: &mut [u32], x: i32, y: i32, text: &str, color: u32) {
    draw_text_scaled(fb, x, y, text, color, 1);
}

pub fn draw_text_scaled(fb: &mut [u32], x: i32, y: i32, text: &str, color: u32, scale: i32) {
    let scale = scale.max(1);
    let mut cx = x;
    for ch in text.chars() {
        let rows = glyph(fold(ch));
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (0b10000 >> col) == 0 {
                    continue;
                }
                let gx = cx + col * scale;
                let gy = y + row as i32 * scale;
                for sy in 0..scale {
                    for sx in 0..scale {
                        put(fb, gx + sx, gy + sy, color);
                    }
                }
            }
        }
        cx += ADVANCE * scale;
    }
}

/// Text with a 1px black drop shadow (stroke stand-in)
pub fn draw_text_shadow(fb: &mut [u32], x: i32, y: i32, text: &str, color: u32) {
    draw_text(fb, x + 1, y + 1, text, 0xFF000000);
    draw_text(fb, x, y, text, color);
}

/// Greedy word wrap to `max_width` pixels at `scale`. Words longer than a
/// line are hard-split.
pub fn wrap_text(text: &str, max_width: i32, scale: i32) -> Vec<String> {
    let max_chars = ((max_width / scale.max(1) + 1) / ADVANCE).max(1) as usize;
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_chars_not_bytes() {
        assert_eq!(text_width(""), 0);
        assert_eq!(text_width("A"), 5);
        assert_eq!(text_width("AB"), 11);
        assert_eq!(text_width("é"), text_width("e"));
        assert_eq!(text_width_scaled("AB", 2), 22);
    }

    #[test]
    fn accents_fold_to_base_letters() {
        assert_eq!(fold('ã'), 'A');
        assert_eq!(fold('ç'), 'C');
        assert_eq!(fold('q'), 'Q');
        assert_eq!(glyph(fold('õ')), glyph('O'));
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap_text("Nossa.. tantas memórias da Clara por aqui..", 60, 1);
        for line in &lines {
            assert!(text_width(line) <= 60, "line too wide: {:?}", line);
        }
        assert_eq!(lines.join(" "), "Nossa.. tantas memórias da Clara por aqui..");
    }

    #[test]
    fn wrap_splits_long_words() {
        let lines = wrap_text("ABCDEFGHIJ", 29, 1); // 5 chars per line
        assert_eq!(lines, vec!["ABCDE", "FGHIJ"]);
    }

    #[test]
    fn rect_blends_translucent_color() {
        let mut fb = vec![0xFFFFFFFF; SCREEN_WIDTH * SCREEN_HEIGHT];
        draw_rect(&mut fb, 0, 0, 1, 1, 0x80000000);
        let px = fb[0];
        assert!(px & 0xFF < 0xFF && px & 0xFF > 0x00);
        assert_eq!(fb[1], 0xFFFFFFFF);
    }

    #[test]
    fn drawing_off_screen_is_clipped() {
        let mut fb = vec![0u32; SCREEN_WIDTH * SCREEN_HEIGHT];
        draw_text(&mut fb, -100, -100, "CLIPPED", 0xFFFFFFFF);
        draw_rect(&mut fb, 500, 300, 10, 10, 0xFFFFFFFF);
        assert!(fb.iter().all(|&p| p == 0));
    }
}
