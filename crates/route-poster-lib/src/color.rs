//! RGB colors as exchanged with UI controls and export backends (`#rrggbb`)

use crate::TrackError;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = TrackError;

    /// Accepts `#rrggbb` and the `#rgb` shorthand, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TrackError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::from_rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // #abc == #aabbcc
                let short = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
                Ok(Self::from_rgb(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(invalid()),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_forms() {
        assert_eq!("#ff8000".parse::<Color>().unwrap(), Color::from_rgb(255, 128, 0));
        assert_eq!("#FF8000".parse::<Color>().unwrap(), Color::from_rgb(255, 128, 0));
        assert_eq!("#fff".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!(" #000 ".parse::<Color>().unwrap(), Color::BLACK);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "#", "ff8000", "#ff80", "#gg0000", "#ff80000", "#é00"] {
            assert!(bad.parse::<Color>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        assert_eq!(Color::from_rgb(171, 205, 239).to_string(), "#abcdef");
        assert_eq!(Color::BLACK.to_string(), "#000000");
    }
}
