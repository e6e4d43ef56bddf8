//! Hue/saturation/brightness conversions and colour blending.

use rgb::RGB;
use crate::colour::Colour;

/// A colour in the HSB (a.k.a. HSV) cylinder.  All three components
/// are in \[0, 1\]; the hue may exceed 1 while interpolating across
/// the red wrap point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsb {
    pub h: f64,
    pub s: f64,
    pub b: f64,
}

impl Hsb {
    /// Convert channels in \[0, 255\].
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Hsb {
        let (r, g, b) = (r as f64, g as f64, b as f64);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let brightness = max / 255.;
        let saturation = if max != 0. { (max - min) / max } else { 0. };
        let hue = if saturation == 0. { 0. } else {
            let rc = (max - r) / (max - min);
            let gc = (max - g) / (max - min);
            let bc = (max - b) / (max - min);
            let h = { if r == max { bc - gc }
                      else if g == max { 2. + rc - bc }
                      else { 4. + gc - rc } } / 6.;
            if h < 0. { h + 1. } else { h }
        };
        Hsb { h: hue, s: saturation, b: brightness }
    }

    /// Convert to an opaque packed colour.  Only the fractional part
    /// of the hue is used.
    pub fn to_colour(&self) -> Colour {
        let to_channel = |x: f64| (x * 255. + 0.5) as i32;
        let Hsb { h, s, b } = *self;
        let (r, g, bl) = if s == 0. {
            (b, b, b)
        } else {
            let h6 = (h - h.floor()) * 6.;
            let f = h6 - h6.floor();
            let p = b * (1. - s);
            let q = b * (1. - s * f);
            let t = b * (1. - s * (1. - f));
            match h6.trunc() as u8 {
                0 => (b, t, p),
                1 => (q, b, p),
                2 => (p, b, t),
                3 => (p, q, b),
                4 => (t, p, b),
                _ => (b, p, q),
            }
        };
        Colour::from_rgb(to_channel(r), to_channel(g), to_channel(bl))
    }
}

/// Linear interpolation `a + (b - a) t`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 { a + (b - a) * t }

#[inline]
fn rgb_f64(c: &Colour) -> RGB<f64> {
    let [r, g, b] = c.rgb();
    RGB::new(r as f64, g as f64, b as f64)
}

/// Blend `c0` into `c1` by `mixer` ∈ \[0, 1\] and return the RGB
/// channels in \[0, 255\].
///
/// A missing colour yields the other one unchanged; two missing colours
/// yield black.  With `use_hue`, the blend runs along the shortest hue
/// arc in HSB space and the result is quantised to integer channels;
/// otherwise each RGB channel is interpolated linearly and may be
/// fractional.
///
/// # Example
///
/// ```
/// use colour_map::{Colour, interpolate_color};
/// let black = Colour::from_rgb(0, 0, 0);
/// let white = Colour::from_rgb(255, 255, 255);
/// let grey = interpolate_color(Some(&black), Some(&white), 0.5, false);
/// assert_eq!(grey.r, 127.5);
/// ```
pub fn interpolate_color(c0: Option<&Colour>, c1: Option<&Colour>,
                         mixer: f64, use_hue: bool) -> RGB<f64> {
    let (c0, c1) = match (c0, c1) {
        (None, None) => return RGB::new(0., 0., 0.),
        (Some(c0), None) => return rgb_f64(c0),
        (None, Some(c1)) => return rgb_f64(c1),
        (Some(c0), Some(c1)) => (c0, c1),
    };
    if mixer <= 0. { return rgb_f64(c0) }
    if mixer >= 1. { return rgb_f64(c1) }
    if use_hue {
        let [r, g, b] = c0.rgb();
        let hsb0 = Hsb::from_rgb(r, g, b);
        let [r, g, b] = c1.rgb();
        let hsb1 = Hsb::from_rgb(r, g, b);
        let (mut h0, mut h1) = (hsb0.h, hsb1.h);
        // Unwrap so the blend follows the short arc.
        if h1 < h0 { h1 += 1. }
        if h1 - h0 > 0.5 { h0 += 1. }
        let hsb = Hsb { h: lerp(h0, h1, mixer),
                        s: lerp(hsb0.s, hsb1.s, mixer),
                        b: lerp(hsb0.b, hsb1.b, mixer) };
        rgb_f64(&hsb.to_colour())
    } else {
        let (a, b) = (rgb_f64(c0), rgb_f64(c1));
        RGB::new(lerp(a.r, b.r, mixer), lerp(a.g, b.g, mixer),
                 lerp(a.b, b.b, mixer))
    }
}
