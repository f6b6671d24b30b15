use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color, written in config as `#rgb`, `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::from_rgba(255, 255, 255, 255);

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();

        match digits.len() {
            3 => {
                // #rgb doubles each nibble: #f80 == #ff8800
                let mut nibbles = digits.chars().filter_map(|c| c.to_digit(16));
                let mut next = || nibbles.next().map(|n| (n * 17) as u8);
                Some(Self::from_rgba(next()?, next()?, next()?, 255))
            }
            6 => Some(Self::from_rgba(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Some(Self::from_rgba(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)?,
            )),
            _ => None,
        }
    }

    /// Lowercase hex, omitting alpha when the color is opaque.
    pub fn to_hex(&self) -> String {
        let rgb = format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b);
        if self.is_opaque() {
            rgb
        } else {
            format!("{rgb}{:02x}", self.a)
        }
    }

    /// A solid fill, as opposed to a translucent one.
    pub fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }
}
