//! Left/right room navigation arrows

use crate::assets::bitmap::DecodedBitmap;
use crate::assets::AssetStore;
use crate::engine::{Rect, Sprite, SCREEN_HEIGHT, SCREEN_WIDTH};

pub const ARROW_SIZE: u32 = 25;
/// Arrow centers sit this far from the side edges
const ARROW_INSET: i32 = 20;
const ARROW_Z: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowSide {
    Left,
    Right,
}

#[derive(Debug)]
pub struct NavArrows {
    left: Sprite,
    right: Sprite,
    visible: bool,
}

impl NavArrows {
    /// Uses the `seta` image (pointing right) when present, a drawn
    /// triangle otherwise. The left arrow is the right one turned 180°.
    pub fn new(assets: &AssetStore) -> Self {
        let right_bmp = match assets.image("seta") {
            Some(bmp) => bmp.resized(ARROW_SIZE, ARROW_SIZE),
            None => triangle(ARROW_SIZE),
        };
        let left_bmp = rotate_180(&right_bmp);
        let cy = SCREEN_HEIGHT as i32 / 2;
        let left_rect = Rect::centered(ARROW_INSET, cy, ARROW_SIZE, ARROW_SIZE);
        let right_rect = Rect::centered(SCREEN_WIDTH as i32 - ARROW_INSET, cy, ARROW_SIZE, ARROW_SIZE);
        Self {
            left: Sprite::from_bitmap("seta_esquerda", &left_bmp, left_rect.x, left_rect.y, ARROW_Z),
            right: Sprite::from_bitmap("seta_direita", &right_bmp, right_rect.x, right_rect.y, ARROW_Z),
            visible: false,
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.left.visible = visible;
        self.right.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hit(&self, mx: i32, my: i32) -> Option<ArrowSide> {
        if !self.visible {
            None
        } else if self.left.bbox_hit(mx, my) {
            Some(ArrowSide::Left)
        } else if self.right.bbox_hit(mx, my) {
            Some(ArrowSide::Right)
        } else {
            None
        }
    }

    pub fn sprites(&self) -> [&Sprite; 2] {
        [&self.left, &self.right]
    }
}

/// White right-pointing triangle with a dark outline
fn triangle(size: u32) -> DecodedBitmap {
    let mut pixels = vec![0u8; (size * size * 4) as usize];
    let half = size as i32 / 2;
    for y in 0..size as i32 {
        // rightmost filled column; the tip is on the middle row
        let reach = size as i32 - 1 - (y - half).abs() * 2;
        for x in 0..size as i32 {
            if x > reach {
                continue;
            }
            let edge = x == 0 || x >= reach - 1;
            let c = if edge { 40 } else { 240 };
            let i = ((y as u32 * size + x as u32) * 4) as usize;
            pixels[i..i + 4].copy_from_slice(&[c, c, c, 255]);
        }
    }
    DecodedBitmap { width: size, height: size, pixels }
}

fn rotate_180(bmp: &DecodedBitmap) -> DecodedBitmap {
    let mut pixels = Vec::with_capacity(bmp.pixels.len());
    for px in bmp.pixels.chunks_exact(4).rev() {
        pixels.extend_from_slice(px);
    }
    DecodedBitmap {
        width: bmp.width,
        height: bmp.height,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_are_centered_at_the_sides() {
        let arrows = NavArrows::new(&AssetStore::default());
        let [l, r] = arrows.sprites();
        assert_eq!(l.bounds(), Rect::centered(20, 120, 25, 25));
        assert_eq!(r.bounds(), Rect::centered(406, 120, 25, 25));
    }

    #[test]
    fn hidden_arrows_do_not_hit() {
        let mut arrows = NavArrows::new(&AssetStore::default());
        assert_eq!(arrows.hit(20, 120), None);
        arrows.set_visible(true);
        assert_eq!(arrows.hit(20, 120), Some(ArrowSide::Left));
        assert_eq!(arrows.hit(406, 120), Some(ArrowSide::Right));
        assert_eq!(arrows.hit(213, 120), None);
    }

    #[test]
    fn rotation_reverses_pixels() {
        let bmp = DecodedBitmap {
            width: 2,
            height: 1,
            pixels: vec![1, 1, 1, 255, 2, 2, 2, 255],
        };
        assert_eq!(rotate_180(&bmp).pixels, vec![2, 2, 2, 255, 1, 1, 1, 255]);
    }
}
