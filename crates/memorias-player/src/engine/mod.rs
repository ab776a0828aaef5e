//! Game engine: minifb-based renderer, input, and game loop.
//!
//! Uses a 426×240 pixel framebuffer with 32-bit ARGB pixels, scaled to the
//! window with nearest-neighbor sampling.

pub mod font;

use anyhow::Result;
use minifb::{CursorStyle, Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use memorias_common::{GameConfig, LOGICAL_HEIGHT, LOGICAL_WIDTH};

use crate::assets::AssetStore;
use crate::game::cursor::CursorType;
use crate::game::i18n::t;
use crate::game::GameState;

pub const SCREEN_WIDTH: usize = LOGICAL_WIDTH as usize;
pub const SCREEN_HEIGHT: usize = LOGICAL_HEIGHT as usize;
pub const FPS: u64 = 30;
/// Milliseconds per game tick at `FPS`
pub const FRAME_MS: u32 = 33;

/// Engine display state
#[derive(Clone, Copy)]
enum EngineState {
    Playing,
    PauseMenu { selected: usize },
}

const PAUSE_ITEMS: [&str; 4] = ["menu_resume", "menu_language", "menu_fullscreen", "menu_quit"];
const PAUSE_BOX_W: i32 = 200;
const PAUSE_BOX_H: i32 = 120;
const PAUSE_ROW_H: i32 = 16;
const PAUSE_FIRST_ROW: i32 = 30;

/// Axis-aligned rectangle in logical screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of size `w`×`h` centered on (cx, cy) (origin 0.5)
    pub fn centered(cx: i32, cy: i32, width: u32, height: u32) -> Self {
        Self {
            x: cx - width as i32 / 2,
            y: cy - height as i32 / 2,
            width,
            height,
        }
    }

    /// Left/top edges inclusive, right/bottom exclusive
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x
            && py >= self.y
            && px < self.x + self.width as i32
            && py < self.y + self.height as i32
    }
}

/// Sprite rendered by the engine
#[derive(Clone, Debug)]
pub struct Sprite {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub visible: bool,
    pub z_order: i32,
    /// Name for debugging / hover logging
    pub name: String,
}

impl Sprite {
    pub fn from_bitmap(name: &str, bmp: &crate::assets::bitmap::DecodedBitmap, x: i32, y: i32, z_order: i32) -> Self {
        Self {
            x,
            y,
            width: bmp.width,
            height: bmp.height,
            pixels: bmp.pixels.clone(),
            visible: true,
            z_order,
            name: name.to_string(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Check if a point is within the bounding box (ignoring alpha)
    pub fn bbox_hit(&self, px: i32, py: i32) -> bool {
        self.visible && self.bounds().contains(px, py)
    }
}

/// Scale the logical framebuffer to any target size using per-axis
/// nearest-neighbor sampling.
fn scale_to_size(src: &[u32], dst: &mut [u32], dst_w: usize, dst_h: usize) {
    for dy in 0..dst_h {
        let sy = (dy * SCREEN_HEIGHT) / dst_h;
        let dst_row = dy * dst_w;
        let src_row = sy * SCREEN_WIDTH;
        for dx in 0..dst_w {
            let sx = (dx * SCREEN_WIDTH) / dst_w;
            dst[dst_row + dx] = src[src_row + sx];
        }
    }
}

fn pause_box_origin() -> (i32, i32) {
    (
        (SCREEN_WIDTH as i32 - PAUSE_BOX_W) / 2,
        (SCREEN_HEIGHT as i32 - PAUSE_BOX_H) / 2,
    )
}

/// Pause-menu row under the pointer, if any
fn pause_item_at(mx: i32, my: i32) -> Option<usize> {
    let (box_x, box_y) = pause_box_origin();
    if mx < box_x + 6 || mx >= box_x + PAUSE_BOX_W - 6 {
        return None;
    }
    let rel_y = my - (box_y + PAUSE_FIRST_ROW - 2);
    if rel_y < 0 {
        return None;
    }
    let idx = (rel_y / PAUSE_ROW_H) as usize;
    (idx < PAUSE_ITEMS.len()).then_some(idx)
}

/// Draw semi-transparent pause menu overlay onto the framebuffer
fn draw_pause_menu(fb: &mut [u32], selected: usize, game: &GameState) {
    for pixel in fb.iter_mut() {
        let r = (*pixel >> 16) & 0xFF;
        let g = (*pixel >> 8) & 0xFF;
        let b = *pixel & 0xFF;
        *pixel = 0xFF000000 | ((r / 3) << 16) | ((g / 3) << 8) | (b / 3);
    }

    let (box_x, box_y) = pause_box_origin();
    font::draw_rect(fb, box_x, box_y, PAUSE_BOX_W, PAUSE_BOX_H, 0xFF1a1a2e);
    font::draw_rect_outline(fb, box_x, box_y, PAUSE_BOX_W, PAUSE_BOX_H, 0xFF6666CC);

    let lang = game.language;
    let title = t(lang, "pause_title");
    font::draw_text_shadow(fb, box_x + (PAUSE_BOX_W - font::text_width(title)) / 2, box_y + 10, title, 0xFFFFFF00);

    for (i, key) in PAUSE_ITEMS.iter().enumerate() {
        let iy = box_y + PAUSE_FIRST_ROW + i as i32 * PAUSE_ROW_H;
        let color = if i == selected { 0xFFFFFF00 } else { 0xFFBBBBBB };
        if i == selected {
            font::draw_rect(fb, box_x + 6, iy - 3, PAUSE_BOX_W - 12, PAUSE_ROW_H - 2, 0xFF333366);
        }
        let prefix = if i == selected { "> " } else { "  " };
        let suffix = if *key == "menu_language" { format!(" [{}]", lang.code()) } else { String::new() };
        let text = format!("{}{}{}", prefix, t(lang, key), suffix);
        font::draw_text(fb, box_x + 12, iy, &text, color);
    }

    font::draw_text(fb, box_x + 10, box_y + PAUSE_BOX_H - 14, t(lang, "pause_hint"), 0xFF777799);
}

fn cursor_style(ct: CursorType) -> CursorStyle {
    match ct {
        CursorType::Standard => CursorStyle::Arrow,
        CursorType::Click => CursorStyle::OpenHand,
        CursorType::Grab => CursorStyle::ClosedHand,
    }
}

/// Run the game engine
pub fn run(assets: AssetStore, config: &GameConfig) -> Result<()> {
    let mut game = GameState::new(assets, config);
    let mut fullscreen = config.fullscreen;
    let mut engine_state = EngineState::Playing;
    let mut prev_mouse_down = false;
    let mut frame_count: u64 = 0;
    let scale = config.window_scale.max(1) as usize;

    tracing::info!("Engine initialized, entering game loop");
    tracing::info!("Controls: Mouse | 0-9/Enter/Backspace = keypad | Left/Right = rooms | Esc = menu | F11 = fullscreen");

    // Outer loop: window (re)creation on fullscreen toggle
    loop {
        let (win_w, win_h) = if fullscreen {
            (1920usize, 1080usize)
        } else {
            (SCREEN_WIDTH * scale, SCREEN_HEIGHT * scale)
        };

        let options = WindowOptions {
            resize: !fullscreen,
            borderless: fullscreen,
            scale_mode: minifb::ScaleMode::AspectRatioStretch,
            ..Default::default()
        };

        let mut window = Window::new("Memórias", win_w, win_h, options)
            .map_err(|e| anyhow::anyhow!("Window creation failed: {}", e))?;
        window.set_target_fps(FPS as usize);

        let mut framebuffer = vec![0u32; SCREEN_WIDTH * SCREEN_HEIGHT];
        let mut out_w = win_w;
        let mut out_h = win_h;
        let mut scaled_buf = vec![0u32; out_w * out_h];
        let mut toggle_fs = false;
        let mut last_cursor = CursorType::Standard;

        while window.is_open() {
            let (actual_w, actual_h) = window.get_size();
            if actual_w > 0 && actual_h > 0 && (actual_w != out_w || actual_h != out_h) {
                out_w = actual_w;
                out_h = actual_h;
                scaled_buf.resize(out_w * out_h, 0);
            }

            // Mouse → logical 426×240
            let (mouse_x, mouse_y) = window
                .get_mouse_pos(MouseMode::Clamp)
                .unwrap_or((0.0, 0.0));
            let mx = ((mouse_x as usize) * SCREEN_WIDTH / out_w.max(1)) as i32;
            let my = ((mouse_y as usize) * SCREEN_HEIGHT / out_h.max(1)) as i32;
            let mx = mx.clamp(0, SCREEN_WIDTH as i32 - 1);
            let my = my.clamp(0, SCREEN_HEIGHT as i32 - 1);

            if window.is_key_pressed(Key::F11, KeyRepeat::No) {
                toggle_fs = true;
                break;
            }

            let esc_pressed = window.is_key_pressed(Key::Escape, KeyRepeat::No);
            let mouse_down = window.get_mouse_down(MouseButton::Left);
            let mouse_clicked = mouse_down && !prev_mouse_down;

            match engine_state {
                EngineState::Playing => {
                    if esc_pressed {
                        engine_state = EngineState::PauseMenu { selected: 0 };
                    } else {
                        if mouse_clicked {
                            game.on_click(mx, my);
                        }
                        game.on_mouse_state(mx, my, mouse_down);

                        for key in window.get_keys_pressed(KeyRepeat::No) {
                            if let Some(ch) = key_to_char(key) {
                                game.on_char_input(ch);
                            }
                            game.on_key_down(key);
                        }

                        game.update();
                    }
                }
                EngineState::PauseMenu { selected } => {
                    if esc_pressed {
                        engine_state = EngineState::Playing;
                    } else {
                        let mut sel = selected;
                        if window.is_key_pressed(Key::Up, KeyRepeat::Yes) && sel > 0 {
                            sel -= 1;
                        }
                        if window.is_key_pressed(Key::Down, KeyRepeat::Yes) && sel < PAUSE_ITEMS.len() - 1 {
                            sel += 1;
                        }
                        if let Some(idx) = pause_item_at(mx, my) {
                            sel = idx;
                        }
                        engine_state = EngineState::PauseMenu { selected: sel };

                        let mut action: Option<usize> = None;
                        if window.is_key_pressed(Key::Enter, KeyRepeat::No) {
                            action = Some(sel);
                        }
                        if mouse_clicked {
                            if let Some(idx) = pause_item_at(mx, my) {
                                action = Some(idx);
                            }
                        }

                        match action {
                            Some(0) => engine_state = EngineState::Playing,
                            Some(1) => {
                                game.language = game.language.next();
                                tracing::info!("Language → {}", game.language.code());
                            }
                            Some(2) => toggle_fs = true,
                            Some(3) => {
                                tracing::info!("Engine shutdown (menu)");
                                return Ok(());
                            }
                            _ => {}
                        }
                    }
                }
            }

            if toggle_fs {
                break;
            }
            prev_mouse_down = mouse_down;

            // Render
            framebuffer.fill(0xFF000000);
            for sprite in &game.get_all_sprites() {
                if !sprite.visible || sprite.width == 0 || sprite.height == 0 {
                    continue;
                }
                blit_sprite(&mut framebuffer, sprite);
            }
            game.draw_ui(&mut framebuffer);

            if let EngineState::PauseMenu { selected } = engine_state {
                draw_pause_menu(&mut framebuffer, selected, &game);
            }

            let cursor = game.cursor.current();
            if cursor != last_cursor {
                window.set_cursor_style(cursor_style(cursor));
                last_cursor = cursor;
            }

            frame_count += 1;
            if frame_count % 5 == 0 {
                let hover = game.get_hover_info(mx, my);
                let title = format!(
                    "Memórias – {} | ({},{}) | {}",
                    game.location_label(),
                    mx,
                    my,
                    if hover.is_empty() { "-" } else { hover.as_str() },
                );
                window.set_title(&title);
            }

            scale_to_size(&framebuffer, &mut scaled_buf, out_w, out_h);
            window
                .update_with_buffer(&scaled_buf, out_w, out_h)
                .map_err(|e| anyhow::anyhow!("Display error: {}", e))?;
        }

        if toggle_fs {
            fullscreen = !fullscreen;
            tracing::info!("Fullscreen → {}", if fullscreen { "ON" } else { "OFF" });
            engine_state = EngineState::Playing;
            continue;
        }

        break; // Window was closed
    }

    tracing::info!("Engine shutdown");
    Ok(())
}

/// Blit an RGBA sprite onto the ARGB framebuffer with alpha blending
pub fn blit_sprite(fb: &mut [u32], sprite: &Sprite) {
    let sw = sprite.width as i32;
    let sh = sprite.height as i32;

    for sy in 0..sh {
        let dy = sprite.y + sy;
        if dy < 0 || dy >= SCREEN_HEIGHT as i32 {
            continue;
        }
        for sx in 0..sw {
            let dx = sprite.x + sx;
            if dx < 0 || dx >= SCREEN_WIDTH as i32 {
                continue;
            }

            let src_idx = (sy * sw + sx) as usize * 4;
            if src_idx + 3 >= sprite.pixels.len() {
                continue;
            }

            let r = sprite.pixels[src_idx] as u32;
            let g = sprite.pixels[src_idx + 1] as u32;
            let b = sprite.pixels[src_idx + 2] as u32;
            let a = sprite.pixels[src_idx + 3] as u32;

            if a == 0 {
                continue;
            }

            let dst_idx = (dy as usize) * SCREEN_WIDTH + dx as usize;

            if a >= 255 {
                fb[dst_idx] = 0xFF000000 | (r << 16) | (g << 8) | b;
            } else {
                let dst = fb[dst_idx];
                let dr = (dst >> 16) & 0xFF;
                let dg = (dst >> 8) & 0xFF;
                let db = dst & 0xFF;
                let inv_a = 255 - a;
                let out_r = (r * a + dr * inv_a) / 255;
                let out_g = (g * a + dg * inv_a) / 255;
                let out_b = (b * a + db * inv_a) / 255;
                fb[dst_idx] = 0xFF000000 | (out_r << 16) | (out_g << 8) | out_b;
            }
        }
    }
}

/// Digit keys (top row and numpad) → char for keypad input
fn key_to_char(key: Key) -> Option<char> {
    let ch = match key {
        Key::Key0 | Key::NumPad0 => '0',
        Key::Key1 | Key::NumPad1 => '1',
        Key::Key2 | Key::NumPad2 => '2',
        Key::Key3 | Key::NumPad3 => '3',
        Key::Key4 | Key::NumPad4 => '4',
        Key::Key5 | Key::NumPad5 => '5',
        Key::Key6 | Key::NumPad6 => '6',
        Key::Key7 | Key::NumPad7 => '7',
        Key::Key8 | Key::NumPad8 => '8',
        Key::Key9 | Key::NumPad9 => '9',
        _ => return None,
    };
    Some(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let r = Rect::new(10, 20, 30, 40);
        assert!(r.contains(10, 20));
        assert!(r.contains(39, 59));
        assert!(!r.contains(40, 20));
        assert!(!r.contains(10, 60));
        assert!(!r.contains(9, 20));
    }

    #[test]
    fn centered_rect_uses_half_extent() {
        let r = Rect::centered(20, 120, 25, 25);
        assert_eq!(r, Rect::new(8, 108, 25, 25));
        assert!(r.contains(20, 120));
    }

    #[test]
    fn pause_rows_hit_test() {
        let (box_x, box_y) = pause_box_origin();
        let x = box_x + 20;
        assert_eq!(pause_item_at(x, box_y + PAUSE_FIRST_ROW), Some(0));
        assert_eq!(pause_item_at(x, box_y + PAUSE_FIRST_ROW + PAUSE_ROW_H), Some(1));
        assert_eq!(pause_item_at(x, box_y + 2), None);
        assert_eq!(pause_item_at(0, box_y + PAUSE_FIRST_ROW), None);
    }

    #[test]
    fn blit_respects_alpha() {
        let mut fb = vec![0xFF000000u32; SCREEN_WIDTH * SCREEN_HEIGHT];
        let sprite = Sprite {
            x: 0,
            y: 0,
            width: 2,
            height: 1,
            pixels: vec![255, 0, 0, 255, 0, 255, 0, 0],
            visible: true,
            z_order: 0,
            name: "t".into(),
        };
        blit_sprite(&mut fb, &sprite);
        assert_eq!(fb[0], 0xFFFF0000);
        assert_eq!(fb[1], 0xFF000000);
    }

    #[test]
    fn digit_keys_map_to_chars() {
        assert_eq!(key_to_char(Key::Key4), Some('4'));
        assert_eq!(key_to_char(Key::NumPad0), Some('0'));
        assert_eq!(key_to_char(Key::A), None);
    }
}
