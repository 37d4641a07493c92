//! CSS colors.

use serde::{Deserialize, Serialize};

/// Color representation.
///
/// Colors are (de)serialized as CSS color strings: `#RRGGBB`, `#RRGGBBAA` or one of the basic CSS color names.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from_css(&value).ok_or_else(|| format!("invalid color '{value}'"))
    }
}

impl From<Color> for String {
    fn from(val: Color) -> Self {
        val.to_css()
    }
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::BLACK),
    ("white", Color::WHITE),
    ("red", Color::RED),
    ("green", Color::rgba(0, 128, 0, 255)),
    ("blue", Color::BLUE),
    ("lightblue", Color::LIGHT_BLUE),
    ("gray", Color::rgba(128, 128, 128, 255)),
    ("grey", Color::rgba(128, 128, 128, 255)),
    ("darkslategray", Color::DARK_SLATE_GRAY),
    ("orange", Color::rgba(255, 165, 0, 255)),
    ("purple", Color::rgba(128, 0, 128, 255)),
    ("yellow", Color::rgba(255, 255, 0, 255)),
    ("transparent", Color::TRANSPARENT),
];

impl Color {
    /// Transparent color: `#00000000`
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    /// Red color: `#FF0000FF`
    pub const RED: Color = Color::rgba(255, 0, 0, 255);
    /// Blue color: `#0000FFFF`
    pub const BLUE: Color = Color::rgba(0, 0, 255, 255);
    /// Light blue color: `#ADD8E6FF`
    pub const LIGHT_BLUE: Color = Color::rgba(173, 216, 230, 255);
    /// Dark slate gray color: `#2F4F4FFF`
    pub const DARK_SLATE_GRAY: Color = Color::rgba(47, 79, 79, 255);
    /// White color: `#FFFFFFFF`
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    /// Black color: `#000000FF`
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);

    /// Constructs color from its RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Converts the color into HEX8 string: `#RRGGBBAA`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    /// Converts the color into a CSS value: `#RRGGBB` for opaque colors, `#RRGGBBAA` otherwise.
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            self.to_hex()
        }
    }

    /// Parses a color from the hex string. Hex string can be either HEX6 (`#RRGGBB`) or HEX8 (`#RRGGBBAA`).
    pub fn try_from_hex(hex_string: &str) -> Option<Self> {
        if hex_string.len() != 7 && hex_string.len() != 9 || !hex_string.starts_with('#') {
            return None;
        }

        let r = u8::from_str_radix(hex_string.get(1..3)?, 16).ok()?;
        let g = u8::from_str_radix(hex_string.get(3..5)?, 16).ok()?;
        let b = u8::from_str_radix(hex_string.get(5..7)?, 16).ok()?;
        let a = if hex_string.len() == 9 {
            u8::from_str_radix(hex_string.get(7..9)?, 16).ok()?
        } else {
            255
        };

        Some(Self { r, g, b, a })
    }

    /// Parses a hex string or a basic CSS color name (case-insensitive).
    pub fn try_from_css(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.starts_with('#') {
            return Self::try_from_hex(value);
        }

        NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(value))
            .map(|(_, color)| *color)
    }

    /// Returns true if the color is fully transparent (`a == 0`).
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex() {
        assert_eq!(
            Color::try_from_hex("#2F4F4F"),
            Some(Color::DARK_SLATE_GRAY)
        );
        assert_eq!(
            Color::try_from_hex("#FF000080"),
            Some(Color::rgba(255, 0, 0, 128))
        );
        assert_eq!(Color::try_from_hex("2F4F4F"), None);
        assert_eq!(Color::try_from_hex("#2F4F4"), None);
        assert_eq!(Color::try_from_hex("#GGGGGG"), None);
    }

    #[test]
    fn parse_names() {
        assert_eq!(Color::try_from_css("lightblue"), Some(Color::LIGHT_BLUE));
        assert_eq!(Color::try_from_css(" Blue "), Some(Color::BLUE));
        assert_eq!(Color::try_from_css("chartreuse-ish"), None);
    }

    #[test]
    fn css_output() {
        assert_eq!(Color::LIGHT_BLUE.to_css(), "#ADD8E6");
        assert_eq!(Color::rgba(0, 0, 255, 0).to_css(), "#0000FF00");
        assert!(Color::TRANSPARENT.is_transparent());
    }

    #[test]
    fn serde_round_trip() {
        let json = serde_json::to_string(&Color::DARK_SLATE_GRAY).expect("serializable");
        assert_eq!(json, "\"#2F4F4F\"");

        let color: Color = serde_json::from_str("\"lightblue\"").expect("valid color");
        assert_eq!(color, Color::LIGHT_BLUE);
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
