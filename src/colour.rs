//! Packed RGBA colour values.

use std::fmt;
use std::str::FromStr;
use rgb::{RGB8, RGBA8};
use crate::error::Error;

/// An RGBA colour packed into a single `u32`.
///
/// The alpha channel occupies the most significant byte (bits 24–31),
/// followed by red, green and blue.  This is *not* the usual RGBA wire
/// order; the layout is kept because 3D consumers of the packed value
/// expect it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Colour {
    value: u32,
}

#[inline]
fn pack(r: i32, g: i32, b: i32, a: i32) -> u32 {
    ((a & 0xFF) as u32) << 24 | ((r & 0xFF) as u32) << 16
        | ((g & 0xFF) as u32) << 8 | (b & 0xFF) as u32
}

/// Convert a float in \[0, 1\] to an integer channel, rounding half up.
/// Out of range values wrap once masked, like the integer constructor.
#[inline]
fn channel_from_float(x: f64) -> i32 {
    (255. * x + 0.5).floor() as i64 as i32
}

impl Colour {
    /// Create a colour from integer channels in \[0, 255\].
    ///
    /// Channels are not validated: only their low 8 bits are kept, so
    /// `256` becomes `0` and `-1` becomes `255`.
    ///
    /// # Example
    ///
    /// ```
    /// use colour_map::Colour;
    /// let c = Colour::from_rgba(255, 128, 0, 255);
    /// assert_eq!(c.value(), 0xFFFF8000);
    /// ```
    pub fn from_rgba(r: i32, g: i32, b: i32, a: i32) -> Self {
        Colour { value: pack(r, g, b, a) }
    }

    /// Create an opaque colour from integer channels in \[0, 255\].
    #[inline]
    pub fn from_rgb(r: i32, g: i32, b: i32) -> Self {
        Self::from_rgba(r, g, b, 255)
    }

    /// Create a colour from float channels in \[0, 1\].
    pub fn from_rgba_float(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::from_rgba(channel_from_float(r), channel_from_float(g),
                        channel_from_float(b), channel_from_float(a))
    }

    /// Create an opaque colour from float channels in \[0, 1\].
    #[inline]
    pub fn from_rgb_float(r: f64, g: f64, b: f64) -> Self {
        Self::from_rgba_float(r, g, b, 1.)
    }

    /// Wrap an already packed value (alpha in the high byte).
    #[inline]
    pub const fn from_value(value: u32) -> Self { Colour { value } }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (the leading
    /// `#` is optional).  A missing alpha is taken as `FF`.  Returns
    /// `None` for anything else, including the empty string.
    ///
    /// # Example
    ///
    /// ```
    /// use colour_map::Colour;
    /// let c = Colour::from_hex_string("#03F").unwrap();
    /// assert_eq!(c.rgba(), [0x00, 0x33, 0xFF, 0xFF]);
    /// assert!(Colour::from_hex_string("#12345").is_none());
    /// ```
    pub fn from_hex_string(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        // Reorder to the packed layout: alpha first.
        let argb = match hex.len() {
            3 => {
                let d: Vec<char> = hex.chars().collect();
                format!("FF{0}{0}{1}{1}{2}{2}", d[0], d[1], d[2])
            }
            4 => {
                let d: Vec<char> = hex.chars().collect();
                format!("{3}{3}{0}{0}{1}{1}{2}{2}", d[0], d[1], d[2], d[3])
            }
            6 => format!("FF{hex}"),
            8 => format!("{}{}", &hex[6..], &hex[..6]),
            _ => return None,
        };
        u32::from_str_radix(&argb, 16).ok().map(Self::from_value)
    }

    /// The raw packed value.
    #[inline]
    pub fn value(&self) -> u32 { self.value }

    /// Replace the whole packed value.
    pub fn set_value(&mut self, value: u32) -> &mut Self {
        self.value = value;
        self
    }

    #[inline]
    pub fn red(&self) -> u8 { (self.value >> 16) as u8 }

    #[inline]
    pub fn green(&self) -> u8 { (self.value >> 8) as u8 }

    #[inline]
    pub fn blue(&self) -> u8 { self.value as u8 }

    /// Alpha in \[0, 255\].
    #[inline]
    pub fn alpha(&self) -> u8 { (self.value >> 24) as u8 }

    /// `[r, g, b]` with channels in \[0, 255\].
    #[inline]
    pub fn rgb(&self) -> [u8; 3] { [self.red(), self.green(), self.blue()] }

    /// `[r, g, b, a]` with channels in \[0, 255\].
    #[inline]
    pub fn rgba(&self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }

    /// `rgba(r, g, b, a)` string.  Note that alpha is written in
    /// \[0, 255\], not in \[0, 1\] as CSS would expect.
    pub fn css(&self) -> String {
        let [r, g, b, a] = self.rgba();
        format!("rgba({r}, {g}, {b}, {a})")
    }

    /// `#rrggbb`, or `#rrggbbaa` when `include_alpha` is set.
    ///
    /// ```
    /// use colour_map::Colour;
    /// let c = Colour::from_rgba(1, 2, 255, 128);
    /// assert_eq!(c.hex_string(false), "#0102ff");
    /// assert_eq!(c.hex_string(true), "#0102ff80");
    /// ```
    pub fn hex_string(&self, include_alpha: bool) -> String {
        let rgb = self.value & 0x00FF_FFFF;
        if include_alpha {
            format!("#{:06x}{:02x}", rgb, self.alpha())
        } else {
            format!("#{:06x}", rgb)
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.rgba();
        write!(f, "[{r}, {g}, {b}, {a}]")
    }
}

impl FromStr for Colour {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_string(s.trim())
            .ok_or_else(|| Error::InvalidHex(s.to_string()))
    }
}

impl From<RGB8> for Colour {
    #[inline]
    fn from(c: RGB8) -> Self {
        Self::from_rgb(c.r as i32, c.g as i32, c.b as i32)
    }
}

impl From<RGBA8> for Colour {
    #[inline]
    fn from(c: RGBA8) -> Self {
        Self::from_rgba(c.r as i32, c.g as i32, c.b as i32, c.a as i32)
    }
}

impl From<Colour> for RGB8 {
    #[inline]
    fn from(c: Colour) -> Self { RGB8::new(c.red(), c.green(), c.blue()) }
}

impl From<Colour> for RGBA8 {
    #[inline]
    fn from(c: Colour) -> Self {
        RGBA8::new(c.red(), c.green(), c.blue(), c.alpha())
    }
}
