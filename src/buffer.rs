//! Flat RGB vertex-colour buffers.
//!
//! Positions come as interleaved `x, y, value` triplets; the third
//! component of each triplet drives the colour and the output holds
//! three normalised floats per coloured triplet, ready for upload as a
//! vertex attribute.

use rgb::RGB;
use tracing::{trace, warn};
use crate::colour::Colour;
use crate::colourmap::ColourMap;
use crate::error::{Error, Result};

/// Colour used in logarithmic mode when no entry matches a value.
pub const MISSING_ENTRY: [f32; 3] = [1., 0., 0.];

/// Scale channels to \[0, 1\].  A channel is divided by 255 only if it
/// exceeds 1, so already normalised input passes through unchanged.
pub fn normalise_rgb(c: RGB<f64>) -> [f32; 3] {
    let n = |x: f64| (if x > 1. { x / 255. } else { x }) as f32;
    [n(c.r), n(c.g), n(c.b)]
}

fn triplets(positions: &[f64]) -> std::slice::ChunksExact<'_, f64> {
    let chunks = positions.chunks_exact(3);
    if !chunks.remainder().is_empty() {
        warn!(len = positions.len(),
              "position buffer length is not a multiple of 3, \
               ignoring trailing values");
    }
    chunks
}

impl ColourMap<Colour> {
    fn fill_buffer(&self, log: Option<&ColourMap<f64>>, positions: &[f64],
                   min: f64, max: f64) -> Vec<f32> {
        let mut buffer = Vec::with_capacity(positions.len());
        let mut skipped = 0usize;
        match log {
            Some(log) => {
                for p in triplets(positions) {
                    let colour = log.closest_entry(p[2])
                        .and_then(|key| self.get(key));
                    match colour {
                        Some(c) => {
                            let [r, g, b] = c.rgb();
                            buffer.extend(normalise_rgb(
                                RGB::new(r as f64, g as f64, b as f64)));
                        }
                        None => buffer.extend(MISSING_ENTRY),
                    }
                }
            }
            None => {
                let (min, max) = (min.trunc(), max.trunc());
                for p in triplets(positions) {
                    // A NaN x coordinate marks a point without data.
                    if p[0].is_nan() {
                        skipped += 1;
                        continue;
                    }
                    let c = self.map_value(p[2].trunc(), min, max);
                    buffer.extend(normalise_rgb(c));
                }
            }
        }
        trace!(points = positions.len() / 3, skipped,
               logarithmic = log.is_some(), "filled colour buffer");
        buffer
    }

    /// Colour every `x, y, value` triplet of `positions`.
    ///
    /// In linear mode (`log_scale == false`) triplets whose `x` is NaN
    /// are skipped; the others are coloured with
    /// [`ColourMap::map_value`] after truncating the value, `min` and
    /// `max` to integers.  In logarithmic mode each value picks the
    /// entry whose logarithmic value is closest; the companion must
    /// have been built beforehand (see
    /// [`ColourMap::ensure_log_colour_map`]), otherwise
    /// [`Error::LogScaleNotInitialised`] is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use colour_map::{Colour, ColourMap};
    /// let mut map = ColourMap::new();
    /// map.set(0., Colour::from_rgb(0, 0, 0));
    /// map.set(1., Colour::from_rgb(255, 255, 255));
    /// let buffer = map.create_color_buffer(&[0., 0., 1., f64::NAN, 0., 0.],
    ///                                      0., 1., false).unwrap();
    /// assert_eq!(buffer, vec![1., 1., 1.]);
    /// ```
    pub fn create_color_buffer(&self, positions: &[f64], min: f64, max: f64,
                               log_scale: bool) -> Result<Vec<f32>> {
        let log = if log_scale {
            Some(self.logarithmic_values().ok_or(Error::LogScaleNotInitialised)?)
        } else {
            None
        };
        Ok(self.fill_buffer(log, positions, min, max))
    }
}

/// Like [`ColourMap::create_color_buffer`] but builds the logarithmic
/// companion of `colour_map` for `min`..`max` first when `log_scale`
/// is requested and none exists yet.
pub fn create_color_buffer_from_colour_map(
    positions: &[f64], colour_map: &mut ColourMap, min: f64, max: f64,
    log_scale: bool) -> Vec<f32>
{
    if log_scale { colour_map.ensure_log_colour_map(min, max); }
    let log = if log_scale { colour_map.logarithmic_values() } else { None };
    colour_map.fill_buffer(log, positions, min, max)
}
