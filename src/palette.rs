//! Brand colours for the hero overlay and the logo strip.

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn parse(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(hex.to_string()));
        }
        let channel = |at: usize| {
            u8::from_str_radix(&digits[at..at + 2], 16).map_err(|_| Error::InvalidColor(hex.to_string()))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub background: Rgb,
    pub primary: Rgb,
    pub primary_hover: Rgb,
    pub secondary: Rgb,
    pub secondary_hover: Rgb,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            background: Rgb { r: 0xf2, g: 0xf2, b: 0xf2 },
            primary: Rgb { r: 0x01, g: 0x49, b: 0x87 },
            primary_hover: Rgb { r: 0x23, g: 0x6a, b: 0xa9 },
            secondary: Rgb { r: 0x66, g: 0x00, b: 0x33 },
            secondary_hover: Rgb { r: 0x99, g: 0x0a, b: 0x58 },
        }
    }
}

/// Partial palette update as written in the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaletteOverrides {
    pub background: Option<String>,
    pub primary: Option<String>,
    pub primary_hover: Option<String>,
    pub secondary: Option<String>,
    pub secondary_hover: Option<String>,
}

impl ColorPalette {
    /// Merges `overrides` into the palette. Nothing changes if any colour is malformed.
    pub fn apply(&mut self, overrides: &PaletteOverrides) -> Result<()> {
        let pick = |value: &Option<String>, current: Rgb| match value {
            Some(hex) => Rgb::parse(hex),
            None => Ok(current),
        };

        let merged = Self {
            background: pick(&overrides.background, self.background)?,
            primary: pick(&overrides.primary, self.primary)?,
            primary_hover: pick(&overrides.primary_hover, self.primary_hover)?,
            secondary: pick(&overrides.secondary, self.secondary)?,
            secondary_hover: pick(&overrides.secondary_hover, self.secondary_hover)?,
        };
        *self = merged;
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
