//! Colors as they travel through tool configuration and drawing entries.
//!
//! Tool colors are stored as free-form text, the way a color text field holds them. Painting
//! parses that text leniently and falls back to opaque black for anything unparseable, so a
//! half-typed value never aborts a redraw. Only the custom-color prompt validates strictly.

/// Swatches offered by the preset palette, in display order.
pub const PRESET_COLORS: [&str; 6] = [
    "#FF3C00", "#FFD700", "#FFFFFF", "#0066FF", "#00FF00", "#FF0000",
];

/// Preset selected when a session starts.
pub const DEFAULT_PRESET: &str = "#FF3C00";

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (case-insensitive).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        match hex.len() {
            3 => Some(Self::opaque(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Some(Self::opaque(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => None,
        }
    }

    /// Strict `#RRGGBB`: exactly six hex digits, nothing else.
    pub fn parse_strict(s: &str) -> Option<Self> {
        if s.len() != 7 || s.trim() != s {
            return None;
        }
        Self::parse_hex(s)
    }

    /// Lenient parse used while painting; unparseable text paints black.
    pub fn from_text(s: &str) -> Self {
        Self::parse_hex(s).unwrap_or(Self::BLACK)
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Shift each RGB channel by `amount`, clamped to `[0, 255]`. Alpha is kept.
    pub fn adjust_brightness(self, amount: i16) -> Self {
        let shift = |c: u8| (i16::from(c) + amount).clamp(0, 255) as u8;
        Self {
            r: shift(self.r),
            g: shift(self.g),
            b: shift(self.b),
            a: self.a,
        }
    }

    /// `#RRGGBB` in upper case; alpha is dropped.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// One tool color with a swatch view and a text view over the same value.
///
/// Both views read the single stored string, so they cannot drift apart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorField {
    value: String,
}

impl ColorField {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            value: initial.into(),
        }
    }

    /// Pick a color from a swatch. The text view becomes its `#RRGGBB` form.
    pub fn select_swatch(&mut self, color: Rgba8) {
        self.value = color.to_hex();
    }

    /// Type into the text view. Any string is accepted as-is.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.value = text.into();
    }

    /// Custom entry path: only strict `#RRGGBB` is taken, anything else is ignored.
    pub fn enter_custom(&mut self, text: &str) -> bool {
        match Rgba8::parse_strict(text) {
            Some(_) => {
                self.value = text.to_string();
                true
            }
            None => false,
        }
    }

    pub fn text(&self) -> &str {
        &self.value
    }

    /// The swatch view; `None` while the text does not describe a color.
    pub fn swatch(&self) -> Option<Rgba8> {
        Rgba8::parse_hex(&self.value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/drawing/color.rs"]
mod tests;
