//! Colour maps turning scalar data values into colours.
//!
//! - [`Colour`]: packed RGBA value (alpha in the high byte).
//! - [`ColourMap`]: key → colour table with hue or RGB interpolation,
//!   clipping, inversion and an optional logarithmic companion.
//! - [`ColourMap::create_color_buffer`]: flat normalised RGB buffers
//!   for point clouds.
//! - [`ColourMapDefinition`]: JSON form of a colour map.
//! - [`Preset`]s: a few built-in ramps.
//!
//! A typical set up fills a map, optionally switches it to a
//! logarithmic scale, then queries it per value:
//!
//! ```
//! use colour_map::{Colour, ColourMap};
//! let mut map = ColourMap::new();
//! map.set(0., Colour::from_rgb(44, 18, 0));
//! map.set(0.5, Colour::from_rgb(199, 145, 65));
//! map.set(1., Colour::from_rgb(199, 234, 229));
//! map.value_percentages = true;
//! let rgb = map.map_value(250., 0., 1000.);
//! assert!(rgb.r > 44. && rgb.r < 199.);
//! ```

use std::marker::PhantomData;
use rgb::RGB;

mod buffer;
mod colour;
mod colourmap;
mod definition;
mod error;
mod hsb;
mod presets;

pub use buffer::{create_color_buffer_from_colour_map, normalise_rgb,
                 MISSING_ENTRY};
pub use colour::Colour;
pub use colourmap::{ColourMap, ValueId};
pub use definition::{ColourMapDefinition, EntryDefinition};
pub use error::{Error, Result};
pub use hsb::{interpolate_color, lerp, Hsb};
pub use presets::Preset;

/// A “continuous” range of colors parametrized by reals in \[0, 1\].
pub trait ColorRange<Color> {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\].
    fn rgb(&self, t: f64) -> Color;

    /// Return an iterator yielding uniform sampling of `n` points
    /// between `a` and `b` (with the bounds `a` and `b` included in
    /// the list of points) together with colors.  It is not required
    /// that `a <= b`.
    fn range(self, mut a: f64, mut b: f64, n: usize) -> Range<Self, Color>
    where Self: Sized {
        a = a.clamp(f64::MIN, f64::MAX);
        b = b.clamp(f64::MIN, f64::MAX);
        // An empty iterator has `i > j`.
        let (last, i) = if n == 0 { (0, 1) } else { (n - 1, 0) };
        Range { range: self, color: PhantomData, a, b, last, i, j: last }
    }
}

/// An iterator yielding `f64` in a given range together with colors.
///
/// Created by [`ColorRange::range`].
pub struct Range<R, Color> {
    range: R,
    color: PhantomData<Color>,
    a: f64, // finite or NaN
    b: f64, // finite or NaN
    last: usize,
    i: usize, // first position to be consumed (i ≤ j)
    j: usize, // last position to be consumed
}

impl<R, Color> Range<R, Color> where R: ColorRange<Color> {
    /// The abscissa and color of the position `k` ∈ `0 ..= last`.
    fn sample(&self, k: usize) -> (f64, Color) {
        if k == 0 { return (self.a, self.range.rgb(0.)) }
        if k == self.last { return (self.b, self.range.rgb(1.)) }
        let t = k as f64 / self.last as f64;
        let mut x = ((self.last - k) as f64 * self.a + k as f64 * self.b)
            / self.last as f64;
        if x.is_infinite() { x = (1. - t) * self.a + t * self.b }
        (x, self.range.rgb(t))
    }
}

impl<R, Color> Iterator for Range<R, Color>
where R: ColorRange<Color> {
    type Item = (f64, Color);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i > self.j { return None }
        let item = self.sample(self.i);
        self.i += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = (self.j + 1).saturating_sub(self.i);
        (len, Some(len))
    }
}

impl<R, Color> ExactSizeIterator for Range<R, Color>
where R: ColorRange<Color> {}

impl<R, Color> DoubleEndedIterator for Range<R, Color>
where R: ColorRange<Color> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.i > self.j { return None }
        let item = self.sample(self.j);
        if self.j == 0 { self.i = 1 } else { self.j -= 1 }
        Some(item)
    }
}

/// Sample a colour map over its keys: `t = 0` is the smallest key and
/// `t = 1` the largest.
///
/// # Example
///
/// ```
/// use colour_map::{ColorRange, ColourMap, Preset};
/// let map = ColourMap::preset(Preset::Greys);
/// let greys: Vec<_> = map.range(0., 100., 5).map(|(_, c)| c.r).collect();
/// assert_eq!(greys, [0., 63.75, 127.5, 191.25, 255.]);
/// ```
impl ColorRange<RGB<f64>> for ColourMap<Colour> {
    fn rgb(&self, t: f64) -> RGB<f64> {
        match (self.min_key(), self.max_key()) {
            (Some(min), Some(max)) =>
                self.calculate_color(lerp(min, max, t.clamp(0., 1.))),
            _ => RGB::new(0., 0., 0.),
        }
    }
}

impl<'a> ColorRange<RGB<f64>> for &'a ColourMap<Colour> {
    #[inline]
    fn rgb(&self, t: f64) -> RGB<f64> { (*self).rgb(t) }
}
