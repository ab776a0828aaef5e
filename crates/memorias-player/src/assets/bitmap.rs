//! Bitmap decoding for backgrounds and puzzle pieces
//!
//! PNG files are decoded to RGBA8. Any bit depth / color type the `png`
//! crate can expand is accepted. Missing art is replaced by generated
//! placeholder bitmaps so a room stays playable without its images.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BitmapError {
    #[error("PNG decode failed: {0}")]
    Png(#[from] png::DecodingError),

    #[error("Unsupported PNG color type: {0:?}")]
    UnsupportedColor(png::ColorType),
}

/// Decoded bitmap in RGBA format, ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
}

impl DecodedBitmap {
    /// Solid bitmap with a darker 1px frame and a diagonal stripe pattern,
    /// so placeholder art is recognizable as such.
    pub fn placeholder(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let edge = x == 0 || y == 0 || x + 1 == width || y + 1 == height;
                let stripe = (x + y) % 16 < 2;
                let [r, g, b] = if edge {
                    [rgb[0] / 2, rgb[1] / 2, rgb[2] / 2]
                } else if stripe {
                    [
                        rgb[0].saturating_add(16),
                        rgb[1].saturating_add(16),
                        rgb[2].saturating_add(16),
                    ]
                } else {
                    rgb
                };
                pixels.extend_from_slice(&[r, g, b, 255]);
            }
        }
        Self { width, height, pixels }
    }

    /// Nearest-neighbor resample to an exact size
    pub fn resized(&self, width: u32, height: u32) -> Self {
        if width == self.width && height == self.height {
            return self.clone();
        }
        let mut pixels = vec![0u8; (width * height * 4) as usize];
        if self.width == 0 || self.height == 0 {
            return Self { width, height, pixels };
        }
        for dy in 0..height {
            let sy = dy * self.height / height.max(1);
            for dx in 0..width {
                let sx = dx * self.width / width.max(1);
                let si = ((sy * self.width + sx) * 4) as usize;
                let di = ((dy * width + dx) * 4) as usize;
                pixels[di..di + 4].copy_from_slice(&self.pixels[si..si + 4]);
            }
        }
        Self { width, height, pixels }
    }
}

/// Decode PNG bytes into an RGBA bitmap
pub fn decode_png(data: &[u8]) -> Result<DecodedBitmap, BitmapError> {
    let mut decoder = png::Decoder::new(std::io::Cursor::new(data));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let raw = &buf[..info.buffer_size()];

    let pixel_count = (info.width * info.height) as usize;
    let mut pixels = Vec::with_capacity(pixel_count * 4);
    match info.color_type {
        png::ColorType::Rgba => pixels.extend_from_slice(raw),
        png::ColorType::Rgb => {
            for px in raw.chunks_exact(3) {
                pixels.extend_from_slice(&[px[0], px[1], px[2], 255]);
            }
        }
        png::ColorType::GrayscaleAlpha => {
            for px in raw.chunks_exact(2) {
                pixels.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
            }
        }
        png::ColorType::Grayscale => {
            for &v in raw {
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        other => return Err(BitmapError::UnsupportedColor(other)),
    }

    Ok(DecodedBitmap {
        width: info.width,
        height: info.height,
        pixels,
    })
}
