use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// An RGBA colour with components in [0, 1]. The engine attaches colours to
/// draw primitives; the rendering collaborator decides what to do with them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
    pub fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }
    /// Parses a `#rrggbb` hex code (the format the UI palette uses) into an
    /// opaque colour.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = match hex.strip_prefix('#') {
            Some(rest) if rest.len() == 6 && rest.is_ascii() => rest,
            _ => bail!("invalid hex colour: {hex:?}"),
        };
        let r = u8::from_str_radix(&digits[0..2], 16)?;
        let g = u8::from_str_radix(&digits[2..4], 16)?;
        let b = u8::from_str_radix(&digits[4..6], 16)?;
        Ok(Self::from_bytes(r, g, b, u8::MAX))
    }

    pub fn white() -> Self {
        Self {
            r: 1.0,
            g: 1.0,
            b: 1.0,
            a: 1.0,
        }
    }
    pub fn black() -> Self {
        Self {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        }
    }
    pub fn red() -> Self {
        Self {
            r: 1.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        }
    }
    pub fn green() -> Self {
        Self {
            r: 0.0,
            g: 1.0,
            b: 0.0,
            a: 1.0,
        }
    }
    pub fn blue() -> Self {
        Self {
            r: 0.0,
            g: 0.0,
            b: 1.0,
            a: 1.0,
        }
    }
    /// Fully transparent.
    pub fn empty() -> Self {
        Self::default()
    }
}
