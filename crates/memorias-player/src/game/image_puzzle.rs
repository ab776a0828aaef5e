//! Drag & drop image puzzle
//!
//!   - Mouse down on a piece → start drag (record grab offset, raise piece)
//!   - Mouse move → piece follows the pointer
//!   - Mouse up → piece stays where it was dropped
//!
//! There is no snapping and no completion check; the player leaves through
//! the "[Sair]" button.

use crate::assets::bitmap::DecodedBitmap;
use crate::assets::AssetStore;
use crate::engine::{Rect, Sprite, SCREEN_HEIGHT, SCREEN_WIDTH};

pub const PIECE_COUNT: usize = 4;
pub const PIECE_SIZE: u32 = 50;
/// Gap between pieces in the starting row
const PIECE_GAP: i32 = 10;
const BASE_Z: i32 = 100;

const PLACEHOLDER_COLORS: [[u8; 3]; PIECE_COUNT] = [
    [170, 70, 70],
    [70, 150, 80],
    [70, 90, 170],
    [180, 160, 60],
];

pub fn piece_image_key(n: usize) -> String {
    format!("puzzle_piece_{}", n)
}

/// A draggable piece; (x, y) is its center
#[derive(Debug, Clone)]
pub struct PuzzlePiece {
    /// 1-based piece number
    pub number: usize,
    pub x: i32,
    pub y: i32,
    pub z_order: i32,
    sprite: Sprite,
}

impl PuzzlePiece {
    fn new(number: usize, x: i32, y: i32, bmp: DecodedBitmap) -> Self {
        let mut piece = Self {
            number,
            x,
            y,
            z_order: BASE_Z,
            sprite: Sprite::from_bitmap(&piece_image_key(number), &bmp, 0, 0, BASE_Z),
        };
        piece.sync_sprite();
        piece
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.x, self.y, PIECE_SIZE, PIECE_SIZE)
    }

    fn sync_sprite(&mut self) {
        let r = self.rect();
        self.sprite.x = r.x;
        self.sprite.y = r.y;
        self.sprite.z_order = self.z_order;
    }

    pub fn as_sprite(&self) -> &Sprite {
        &self.sprite
    }
}

/// Piece release report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropResult {
    Dropped { number: usize, x: i32, y: i32 },
    Nothing,
}

#[derive(Debug)]
pub struct ImagePuzzle {
    pieces: Vec<PuzzlePiece>,
    dragging_idx: Option<usize>,
    grab_offset_x: i32,
    grab_offset_y: i32,
}

impl ImagePuzzle {
    /// Lay out the four pieces in a row above the screen center
    pub fn new(assets: &AssetStore) -> Self {
        let start_x = SCREEN_WIDTH as i32 / 2 - 100;
        let start_y = SCREEN_HEIGHT as i32 / 2 - 50;
        let pieces = (1..=PIECE_COUNT)
            .map(|n| {
                let key = piece_image_key(n);
                let bmp = match assets.image(&key) {
                    Some(bmp) => bmp.resized(PIECE_SIZE, PIECE_SIZE),
                    None => {
                        tracing::warn!("Piece '{}' missing, using placeholder", key);
                        DecodedBitmap::placeholder(PIECE_SIZE, PIECE_SIZE, PLACEHOLDER_COLORS[n - 1])
                    }
                };
                let x = start_x + (n as i32 - 1) * (PIECE_SIZE as i32 + PIECE_GAP);
                PuzzlePiece::new(n, x, start_y, bmp)
            })
            .collect();
        tracing::info!("Image puzzle started");
        Self {
            pieces,
            dragging_idx: None,
            grab_offset_x: 0,
            grab_offset_y: 0,
        }
    }

    pub fn pieces(&self) -> &[PuzzlePiece] {
        &self.pieces
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging_idx.is_some()
    }

    /// Topmost piece under the pointer
    pub fn piece_at(&self, px: i32, py: i32) -> Option<usize> {
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_, p)| p.rect().contains(px, py))
            .max_by_key(|(_, p)| p.z_order)
            .map(|(i, _)| i)
    }

    /// Call on mouse down. Returns true if drag started.
    pub fn on_mouse_down(&mut self, mx: i32, my: i32) -> bool {
        if self.dragging_idx.is_some() {
            return false;
        }
        let Some(idx) = self.piece_at(mx, my) else {
            return false;
        };
        let max_z = self.pieces.iter().map(|p| p.z_order).max().unwrap_or(BASE_Z);
        let piece = &mut self.pieces[idx];
        piece.z_order = max_z + 1;
        piece.sync_sprite();
        self.grab_offset_x = piece.x - mx;
        self.grab_offset_y = piece.y - my;
        self.dragging_idx = Some(idx);
        tracing::debug!("Drag start: piece {} at ({}, {})", piece.number, mx, my);
        true
    }

    /// Call on mouse move while button is held.
    pub fn on_mouse_move(&mut self, mx: i32, my: i32) {
        if let Some(idx) = self.dragging_idx {
            let piece = &mut self.pieces[idx];
            piece.x = mx + self.grab_offset_x;
            piece.y = my + self.grab_offset_y;
            piece.sync_sprite();
        }
    }

    /// Call on mouse up.
    pub fn on_mouse_up(&mut self) -> DropResult {
        let Some(idx) = self.dragging_idx.take() else {
            return DropResult::Nothing;
        };
        let piece = &self.pieces[idx];
        tracing::debug!("Drag end: piece {} at ({}, {})", piece.number, piece.x, piece.y);
        DropResult::Dropped {
            number: piece.number,
            x: piece.x,
            y: piece.y,
        }
    }

    pub fn sprites(&self) -> Vec<Sprite> {
        self.pieces.iter().map(|p| p.as_sprite().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puzzle() -> ImagePuzzle {
        ImagePuzzle::new(&AssetStore::default())
    }

    #[test]
    fn starting_row() {
        let p = puzzle();
        let centers: Vec<(i32, i32)> = p.pieces().iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(centers, vec![(113, 70), (173, 70), (233, 70), (293, 70)]);
        assert_eq!(p.pieces()[0].rect(), Rect::new(88, 45, 50, 50));
        assert_eq!(p.sprites()[0].x, 88);
    }

    #[test]
    fn drag_keeps_grab_offset() {
        let mut p = puzzle();
        assert!(p.on_mouse_down(100, 60));
        p.on_mouse_move(200, 150);
        assert_eq!(
            p.on_mouse_up(),
            DropResult::Dropped { number: 1, x: 213, y: 160 }
        );
        assert!(!p.is_dragging());
        assert_eq!(p.on_mouse_up(), DropResult::Nothing);
    }

    #[test]
    fn grabbed_piece_is_raised() {
        let mut p = puzzle();
        p.on_mouse_down(173, 70);
        p.on_mouse_move(113, 70);
        p.on_mouse_up();
        // piece 2 now lies on top of piece 1
        assert_eq!(p.piece_at(113, 70), Some(1));
        assert!(p.pieces()[1].z_order > p.pieces()[0].z_order);
    }

    #[test]
    fn empty_space_starts_nothing() {
        let mut p = puzzle();
        assert!(!p.on_mouse_down(5, 230));
        p.on_mouse_move(50, 50);
        assert_eq!(p.pieces()[0].x, 113);
    }

    #[test]
    fn uses_piece_images_when_present() {
        let mut assets = AssetStore::default();
        assets.insert_image("puzzle_piece_2", DecodedBitmap::placeholder(10, 10, [1, 2, 3]));
        let p = ImagePuzzle::new(&assets);
        let sprite = p.pieces()[1].as_sprite();
        assert_eq!((sprite.width, sprite.height), (50, 50));
        assert_eq!(&sprite.pixels[0..4], &[0, 1, 1, 255]);
    }
}
