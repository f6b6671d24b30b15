//! Screenshots of container content.

use std::io::Cursor;

use turbo_common::{Color, Orientation, Size};

/// An RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Wrap raw RGBA rows. Returns `None` if the buffer length does not match.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let pixels = [color.r, color.g, color.b, color.a]
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.pixels[i..i + 4];
        Some(Color::from_rgba(p[0], p[1], p[2], p[3]))
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, png::EncodingError> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.pixels)?;
        }
        Ok(buf.into_inner())
    }
}

/// A captured bitmap and the orientation the container had when captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    pub bitmap: Bitmap,
    pub orientation: Orientation,
}

/// Draws a container's visible content into a bitmap.
pub trait ContentRenderer {
    fn render(&self, size: Size) -> Bitmap;
}

/// Renders a flat fill, used when the real surface cannot be read back.
#[derive(Debug, Clone, Copy)]
pub struct SolidRenderer(pub Color);

impl ContentRenderer for SolidRenderer {
    fn render(&self, size: Size) -> Bitmap {
        Bitmap::filled(size.width.max(0) as u32, size.height.max(0) as u32, self.0)
    }
}

impl<F> ContentRenderer for F
where
    F: Fn(Size) -> Bitmap,
{
    fn render(&self, size: Size) -> Bitmap {
        self(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgba_checks_length() {
        assert!(Bitmap::from_rgba(2, 2, vec![0; 16]).is_some());
        assert!(Bitmap::from_rgba(2, 2, vec![0; 15]).is_none());
    }

    #[test]
    fn filled_bitmap_has_color_everywhere() {
        let red = Color::from_rgba(255, 0, 0, 255);
        let bitmap = Bitmap::filled(3, 2, red);
        assert_eq!(bitmap.pixels().len(), 24);
        assert_eq!(bitmap.pixel(2, 1), Some(red));
        assert_eq!(bitmap.pixel(3, 0), None);
    }

    #[test]
    fn png_has_signature() {
        let png = Bitmap::filled(4, 4, Color::WHITE).to_png().unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn closures_render() {
        let renderer = |size: Size| Bitmap::filled(size.width as u32, 1, Color::WHITE);
        assert_eq!(renderer.render(Size::new(5, 9)).width(), 5);
    }
}
