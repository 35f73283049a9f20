//! Color value parsing for stylesheets.
//!
//! Supports the formats a terminal can actually show:
//!
//! - Named colors: `red`, `green`, `blue`, etc. (8 ANSI colors)
//! - Bright variants: `bright_red`, `bright_green`, etc.
//! - 256-color palette: `0` through `255`
//! - RGB hex: `"#ff6b35"` or `"#fff"` (3 or 6 digit), mapped onto the 256-color cube
//! - RGB tuple: `[255, 107, 53]`
//!
//! # Example
//!
//! ```rust
//! use mdcolor_render::style::ColorDef;
//!
//! let red = ColorDef::parse_value(&serde_yaml::Value::String("red".into())).unwrap();
//! let hex = ColorDef::parse_string("#ff6b35").unwrap();
//! let palette = ColorDef::parse_value(&serde_yaml::Value::Number(208.into())).unwrap();
//! assert_eq!(palette, ColorDef::Color256(208));
//! ```

use console::Color;

use crate::util::rgb_to_ansi256;

/// Parsed color definition from a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorDef {
    /// Named ANSI color.
    Named(Color),
    /// 256-color palette index.
    Color256(u8),
    /// RGB color, downsampled to the palette when applied.
    Rgb(u8, u8, u8),
}

impl ColorDef {
    /// Parses a color definition from a YAML value.
    ///
    /// Strings are named colors or hex codes, numbers are palette indices,
    /// and sequences are `[r, g, b]` tuples.
    pub fn parse_value(value: &serde_yaml::Value) -> Result<Self, String> {
        match value {
            serde_yaml::Value::String(s) => Self::parse_string(s),
            serde_yaml::Value::Number(n) => {
                let index = n
                    .as_u64()
                    .ok_or_else(|| format!("Invalid color palette index: {}", n))?;
                u8::try_from(index)
                    .map(ColorDef::Color256)
                    .map_err(|_| format!("Color palette index {} out of range (0-255)", index))
            }
            serde_yaml::Value::Sequence(seq) => Self::parse_rgb_tuple(seq),
            _ => Err(format!("Invalid color value: {:?}", value)),
        }
    }

    /// Parses a color from a string value.
    pub fn parse_string(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        Self::parse_named(s)
    }

    /// Parses a hex color code (without the # prefix).
    fn parse_hex(hex: &str) -> Result<Self, String> {
        let digit = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|part| u8::from_str_radix(part, 16).ok())
                .ok_or_else(|| format!("Invalid hex: {}", hex))
        };
        match hex.len() {
            // #rgb -> #rrggbb
            3 => Ok(ColorDef::Rgb(
                digit(0..1)? * 17,
                digit(1..2)? * 17,
                digit(2..3)? * 17,
            )),
            6 => Ok(ColorDef::Rgb(digit(0..2)?, digit(2..4)?, digit(4..6)?)),
            _ => Err(format!(
                "Invalid hex color: #{} (must be 3 or 6 digits)",
                hex
            )),
        }
    }

    /// Parses a named color (including bright variants).
    fn parse_named(name: &str) -> Result<Self, String> {
        let name_lower = name.to_lowercase();

        if let Some(base) = name_lower.strip_prefix("bright_") {
            return Self::parse_bright_color(base);
        }

        let color = match name_lower.as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" | "gray" | "grey" => Color::White,
            _ => return Err(format!("Unknown color name: {}", name)),
        };

        Ok(ColorDef::Named(color))
    }

    /// Bright colors live at palette indices 8-15.
    fn parse_bright_color(base: &str) -> Result<Self, String> {
        let index = match base {
            "black" => 8,
            "red" => 9,
            "green" => 10,
            "yellow" => 11,
            "blue" => 12,
            "magenta" => 13,
            "cyan" => 14,
            "white" => 15,
            _ => return Err(format!("Unknown bright color: bright_{}", base)),
        };

        Ok(ColorDef::Color256(index))
    }

    fn parse_rgb_tuple(seq: &[serde_yaml::Value]) -> Result<Self, String> {
        if seq.len() != 3 {
            return Err(format!(
                "RGB tuple must have exactly 3 values, got {}",
                seq.len()
            ));
        }

        let mut components = [0u8; 3];
        for (i, val) in seq.iter().enumerate() {
            let n = val
                .as_u64()
                .ok_or_else(|| format!("RGB component {} is not a number", i))?;
            components[i] = u8::try_from(n)
                .map_err(|_| format!("RGB component {} out of range (0-255): {}", i, n))?;
        }

        Ok(ColorDef::Rgb(components[0], components[1], components[2]))
    }

    /// Converts this color definition to a `console::Color`.
    pub fn to_console_color(&self) -> Color {
        match self {
            ColorDef::Named(c) => *c,
            ColorDef::Color256(n) => Color::Color256(*n),
            ColorDef::Rgb(r, g, b) => Color::Color256(rgb_to_ansi256((*r, *g, *b))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    // =========================================================================
    // Named colors
    // =========================================================================

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(
            ColorDef::parse_string("red").unwrap(),
            ColorDef::Named(Color::Red)
        );
        assert_eq!(
            ColorDef::parse_string("Magenta").unwrap(),
            ColorDef::Named(Color::Magenta)
        );
        assert_eq!(
            ColorDef::parse_string("grey").unwrap(),
            ColorDef::Named(Color::White)
        );
    }

    #[test]
    fn test_parse_bright_colors() {
        assert_eq!(
            ColorDef::parse_string("bright_blue").unwrap(),
            ColorDef::Color256(12)
        );
        assert_eq!(
            ColorDef::parse_string("bright_yellow").unwrap(),
            ColorDef::Color256(11)
        );
    }

    #[test]
    fn test_parse_unknown_color() {
        assert!(ColorDef::parse_string("purple").is_err());
        assert!(ColorDef::parse_string("bright_purple").is_err());
    }

    // =========================================================================
    // Hex colors
    // =========================================================================

    #[test]
    fn test_parse_hex() {
        assert_eq!(
            ColorDef::parse_string("#ff6b35").unwrap(),
            ColorDef::Rgb(255, 107, 53)
        );
        assert_eq!(
            ColorDef::parse_string("#f80").unwrap(),
            ColorDef::Rgb(255, 136, 0)
        );
    }

    #[test]
    fn test_parse_hex_invalid() {
        assert!(ColorDef::parse_string("#ff").is_err());
        assert!(ColorDef::parse_string("#gggggg").is_err());
        assert!(ColorDef::parse_string("#ffé").is_err());
    }

    // =========================================================================
    // YAML values
    // =========================================================================

    #[test]
    fn test_parse_value_number() {
        assert_eq!(
            ColorDef::parse_value(&Value::Number(208.into())).unwrap(),
            ColorDef::Color256(208)
        );
        assert!(ColorDef::parse_value(&Value::Number(256.into())).is_err());
    }

    #[test]
    fn test_parse_value_sequence() {
        let val = Value::Sequence(vec![
            Value::Number(255.into()),
            Value::Number(107.into()),
            Value::Number(53.into()),
        ]);
        assert_eq!(
            ColorDef::parse_value(&val).unwrap(),
            ColorDef::Rgb(255, 107, 53)
        );

        let short = Value::Sequence(vec![Value::Number(255.into())]);
        assert!(ColorDef::parse_value(&short).is_err());
    }

    #[test]
    fn test_rgb_maps_onto_palette() {
        assert_eq!(
            ColorDef::Rgb(255, 0, 0).to_console_color(),
            Color::Color256(196)
        );
        assert_eq!(ColorDef::Color256(9).to_console_color(), Color::Color256(9));
    }
}
