//! Key → value tables with interpolated colour lookup.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use rgb::RGB;
use tracing::debug;
use crate::colour::Colour;
use crate::hsb::interpolate_color;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a value stored in a [`ColourMap`].
///
/// Every call to [`ColourMap::set`] hands out a fresh id.  Ids travel
/// with their values through [`Clone`] and
/// [`ColourMap::invert_colours`], so two maps holding the same id at
/// different keys hold *the same* stored value, not merely an equal one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ValueId(u64);

impl ValueId {
    fn fresh() -> Self { ValueId(NEXT_ID.fetch_add(1, Ordering::Relaxed)) }
}

#[derive(Clone, Debug)]
struct Entry<T> {
    key: f64,
    id: ValueId,
    value: T,
}

/// Two keys are the same if they compare equal or are both NaN.
#[inline]
fn same_key(k0: f64, k1: f64) -> bool {
    k0 == k1 || (k0.is_nan() && k1.is_nan())
}

#[inline]
fn is_float_equal(x: f64, y: f64) -> bool { (x - y).abs() < f64::EPSILON }

const BLACK: RGB<f64> = RGB { r: 0., g: 0., b: 0. };

/// A table mapping numeric keys to values, by default [`Colour`]s.
///
/// Entries remember their insertion order (clipping returns the first
/// or last *inserted* colour) but every ordered query works on the
/// keys sorted in ascending order.
///
/// A `ColourMap<f64>` is used as the logarithmic companion of a colour
/// map: same keys, log-spaced values.
#[derive(Clone, Debug)]
pub struct ColourMap<T = Colour> {
    entries: Vec<Entry<T>>,
    /// Blend in HSB space (`true`) or per RGB channel (`false`).
    pub interpolate_hue: bool,
    /// Whether values passed to [`ColourMap::map_value`] must first be
    /// normalised to \[0, 1\] using the given minimum and maximum.
    pub value_percentages: bool,
    clip_low: Option<f64>,
    clip_high: Option<f64>,
    no_data_value: Option<f64>,
    logarithmic_values: Option<Arc<ColourMap<f64>>>,
}

impl<T> Default for ColourMap<T> {
    fn default() -> Self {
        ColourMap { entries: vec![],
                    interpolate_hue: true,
                    value_percentages: false,
                    clip_low: None,
                    clip_high: None,
                    no_data_value: None,
                    logarithmic_values: None }
    }
}

impl<T> FromIterator<(f64, T)> for ColourMap<T> {
    fn from_iter<I: IntoIterator<Item = (f64, T)>>(iter: I) -> Self {
        let mut map = ColourMap::new();
        map.extend(iter);
        map
    }
}

impl<T> Extend<(f64, T)> for ColourMap<T> {
    fn extend<I: IntoIterator<Item = (f64, T)>>(&mut self, iter: I) {
        for (key, value) in iter { self.set(key, value); }
    }
}

/// # Table access
impl<T> ColourMap<T> {
    /// Create an empty map (hue interpolation on, raw values).
    pub fn new() -> Self { Self::default() }

    fn entry(&self, key: f64) -> Option<&Entry<T>> {
        self.entries.iter().find(|e| same_key(e.key, key))
    }

    fn put(&mut self, key: f64, id: ValueId, value: T) {
        match self.entries.iter_mut().find(|e| same_key(e.key, key)) {
            Some(e) => { e.id = id; e.value = value; }
            None => self.entries.push(Entry { key, id, value }),
        }
    }

    /// Store `value` at `key`, replacing (in place) any previous value
    /// for that key.  Returns the identity of the stored value.
    pub fn set(&mut self, key: f64, value: T) -> ValueId {
        let id = ValueId::fresh();
        self.put(key, id, value);
        id
    }

    pub fn get(&self, key: f64) -> Option<&T> {
        self.entry(key).map(|e| &e.value)
    }

    /// Identity of the value stored at `key`.
    pub fn id(&self, key: f64) -> Option<ValueId> {
        self.entry(key).map(|e| e.id)
    }

    pub fn has(&self, key: f64) -> bool { self.entry(key).is_some() }

    /// Reverse lookup: the first key (in insertion order) holding the
    /// value identified by `id`.
    pub fn key(&self, id: ValueId) -> Option<f64> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.key).collect()
    }

    /// Keys in ascending order.
    pub fn sorted_keys(&self) -> Vec<f64> {
        let mut keys = self.keys();
        keys.sort_by(f64::total_cmp);
        keys
    }

    /// `(key, value)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (f64, &T)> + '_ {
        self.entries.iter().map(|e| (e.key, &e.value))
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Remove all entries.  Flags, clip thresholds, the no-data value
    /// and the logarithmic companion are kept.
    pub fn clear(&mut self) { self.entries.clear() }

    /// Smallest key, `None` if the map is empty.
    pub fn min_key(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.key).reduce(f64::min)
    }

    /// Largest key, `None` if the map is empty.
    pub fn max_key(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.key).reduce(f64::max)
    }

    /// The entry with the closest key at or below `key`.
    ///
    /// When both `key` and a candidate are ≤ 0 the comparison is
    /// mirrored: the search then looks for the closest key at or
    /// *above* `key`, i.e. towards zero.
    pub fn floor_entry(&self, key: f64) -> Option<(f64, &T)> {
        self.entries.iter()
            .filter(|e| if key <= 0. && e.key <= 0. { e.key >= key }
                        else { e.key <= key })
            .min_by(|e0, e1| (e0.key - key).abs().total_cmp(&(e1.key - key).abs()))
            .map(|e| (e.key, &e.value))
    }

    /// The entry with the closest key at or above `key`, mirrored like
    /// [`ColourMap::floor_entry`] when both `key` and a candidate are
    /// negative.  Mirrored candidates win over non-negative ones.
    pub fn ceiling_entry(&self, key: f64) -> Option<(f64, &T)> {
        let mirrored = |k: f64| key < 0. && k < 0.;
        let closest = |e0: &&Entry<T>, e1: &&Entry<T>|
            (e0.key - key).abs().total_cmp(&(e1.key - key).abs());
        let candidates: Vec<&Entry<T>> = self.entries.iter()
            .filter(|e| if mirrored(e.key) { e.key <= key } else { e.key >= key })
            .collect();
        candidates.iter().copied().filter(|e| mirrored(e.key)).min_by(closest)
            .or_else(|| candidates.iter().copied().min_by(closest))
            .map(|e| (e.key, &e.value))
    }

    pub fn set_clip_low(&mut self, value: f64) { self.clip_low = Some(value) }

    pub fn set_clip_high(&mut self, value: f64) { self.clip_high = Some(value) }

    pub fn clip_low(&self) -> Option<f64> { self.clip_low }

    pub fn clip_high(&self) -> Option<f64> { self.clip_high }

    pub fn set_no_data_value(&mut self, value: f64) {
        self.no_data_value = Some(value)
    }

    pub fn no_data_value(&self) -> Option<f64> { self.no_data_value }

    fn is_no_data(&self, key: f64) -> bool {
        self.no_data_value.is_some_and(|nd| is_float_equal(key, nd))
    }

    /// The logarithmic companion, if one was built.
    pub fn logarithmic_values(&self) -> Option<&ColourMap<f64>> {
        self.logarithmic_values.as_deref()
    }

    /// Build the logarithmic companion: a map with the same keys whose
    /// values are spaced logarithmically between `min` and `max`.
    ///
    /// The i-th key in ascending order maps to
    /// `10^(lmin + i (lmax - lmin) / (n - 1))` with `lmin = log10(min)`
    /// (or `0` if `min ≤ 0`) and `lmax = log10(max)`.  The no-data key
    /// maps to itself.  Any previous companion is replaced.
    ///
    /// # Example
    ///
    /// ```
    /// use colour_map::{Colour, ColourMap};
    /// let mut map = ColourMap::new();
    /// map.set(0., Colour::from_rgb(0, 0, 0));
    /// map.set(0.5, Colour::from_rgb(128, 128, 128));
    /// map.set(1., Colour::from_rgb(255, 255, 255));
    /// map.init_log_colour_map(1., 100.);
    /// let log = map.logarithmic_values().unwrap();
    /// assert_eq!(log.get(0.5), Some(&10.));
    /// ```
    pub fn init_log_colour_map(&mut self, min: f64, max: f64) {
        let keys = self.sorted_keys();
        let n = keys.len();
        let step = if n > 1 { 1. / (n - 1) as f64 } else { 0. };
        let lmin = if min > 0. { min.log10() } else { 0. };
        let lmax = max.log10();
        let mut log = ColourMap::<f64>::new();
        log.value_percentages = self.value_percentages;
        log.no_data_value = self.no_data_value;
        for (i, key) in keys.into_iter().enumerate() {
            if self.is_no_data(key) {
                log.set(key, key);
            } else {
                let power = lmin + i as f64 * step * (lmax - lmin);
                log.set(key, 10f64.powf(power));
            }
        }
        debug!(keys = n, min, max, "initialised logarithmic colour map");
        self.logarithmic_values = Some(Arc::new(log));
    }

    /// Build the logarithmic companion unless one already exists.
    /// Returns `true` if it was built by this call.
    pub fn ensure_log_colour_map(&mut self, min: f64, max: f64) -> bool {
        if self.logarithmic_values.is_some() { return false }
        self.init_log_colour_map(min, max);
        true
    }

    /// Drop the logarithmic companion, returning to linear lookups.
    pub fn clear_logarithmic_colour_map(&mut self) {
        if self.logarithmic_values.take().is_some() {
            debug!("cleared logarithmic colour map");
        }
    }

    /// Switch the map to logarithmic (building the companion for
    /// `min`..`max`) or to linear lookups.
    pub fn transform(&mut self, min: f64, max: f64, logarithmic: bool)
                     -> &mut Self {
        if logarithmic { self.init_log_colour_map(min, max) }
        else { self.clear_logarithmic_colour_map() }
        self
    }
}

impl<T: Clone> ColourMap<T> {
    /// Return a copy of the map with the order of the values reversed
    /// over the ascending keys; the keys themselves do not move.  The
    /// no-data entry is left in place.  Applying it twice gives back
    /// the starting values (same [`ValueId`]s).
    ///
    /// # Example
    ///
    /// ```
    /// use colour_map::ColourMap;
    /// let map: ColourMap<&str> = [(0., "low"), (0.5, "mid"), (1., "high")]
    ///     .into_iter().collect();
    /// let inverted = map.invert_colours();
    /// assert_eq!(inverted.get(0.), Some(&"high"));
    /// assert_eq!(inverted.get(1.), Some(&"low"));
    /// ```
    pub fn invert_colours(&self) -> Self {
        let mut inverted = self.clone();
        let keys: Vec<f64> = self.sorted_keys().into_iter()
            .filter(|&k| !self.is_no_data(k))
            .collect();
        let n = keys.len();
        for j in 0 .. n {
            let i = n - 1 - j;
            if i != j {
                if let Some(e) = self.entry(keys[i]) {
                    inverted.put(keys[j], e.id, e.value.clone());
                }
            }
        }
        inverted
    }
}

impl ColourMap<f64> {
    /// Key of the entry whose absolute value is closest to `search`
    /// (an exact match stops the scan), `None` if the map is empty.
    ///
    /// ```
    /// use colour_map::ColourMap;
    /// let map: ColourMap<f64> = [(0., 10.), (1., 75.), (2., 150.)]
    ///     .into_iter().collect();
    /// assert_eq!(map.closest_entry(50.), Some(1.));
    /// ```
    pub fn closest_entry(&self, search: f64) -> Option<f64> {
        let mut closest = None;
        let mut lowest_diff = f64::MAX;
        for e in &self.entries {
            let value = e.value.abs();
            if value == search { return Some(e.key) }
            let diff = (value - search).abs();
            if diff < lowest_diff {
                lowest_diff = diff;
                closest = Some(e.key);
            }
        }
        closest
    }
}

#[inline]
fn rgb_of(c: &Colour) -> RGB<f64> {
    let [r, g, b] = c.rgb();
    RGB::new(r as f64, g as f64, b as f64)
}

/// # Colour lookup
impl ColourMap<Colour> {
    /// Colour for `value` in the key domain, channels in \[0, 255\].
    ///
    /// The value is clamped to \[`min_key`, `max_key`\] and the colours
    /// of the floor and ceiling entries are blended in proportion to
    /// the position of the value between their keys.  An empty map (or
    /// a NaN value) gives black.
    ///
    /// # Example
    ///
    /// ```
    /// use colour_map::{Colour, ColourMap};
    /// let mut map = ColourMap::new();
    /// map.interpolate_hue = false;
    /// map.set(0., Colour::from_rgb(0, 0, 0));
    /// map.set(10., Colour::from_rgb(200, 100, 50));
    /// let c = map.calculate_color(2.5);
    /// assert_eq!((c.r, c.g, c.b), (50., 25., 12.5));
    /// ```
    pub fn calculate_color(&self, value: f64) -> RGB<f64> {
        let (min, max) = match (self.min_key(), self.max_key()) {
            (Some(min), Some(max)) => (min, max),
            _ => return BLACK,
        };
        if value.is_nan() { return BLACK }
        let clamped = value.max(min).min(max);
        let floor = self.floor_entry(clamped);
        let ceiling = self.ceiling_entry(clamped);
        let mut mixer = 0.;
        if let (Some((k0, _)), Some((k1, _))) = (floor, ceiling) {
            let difference = k1.abs() - k0.abs();
            if difference > 0. { mixer = (clamped - k0) / difference }
        }
        interpolate_color(floor.map(|e| e.1), ceiling.map(|e| e.1),
                          mixer.abs(), self.interpolate_hue)
    }

    /// Colour for `value` once normalised to \[0, 1\] between
    /// `minimum` and `maximum`.
    pub fn calculate_color_as_percentage(&self, value: f64, minimum: f64,
                                         maximum: f64) -> RGB<f64> {
        self.calculate_color((value - minimum) / (maximum - minimum))
    }

    /// Colour for a raw data value.
    ///
    /// With a logarithmic companion, the key whose log value is closest
    /// to `value` is looked up and its colour returned as is (no
    /// blending).  Otherwise this is [`ColourMap::map_value_linear`].
    pub fn map_value(&self, value: f64, minimum: f64, maximum: f64)
                     -> RGB<f64> {
        match &self.logarithmic_values {
            Some(log) => log.closest_entry(value)
                .and_then(|key| self.get(key))
                .map_or(BLACK, rgb_of),
            None => self.map_value_linear(value, minimum, maximum),
        }
    }

    /// Colour for a raw data value, ignoring any logarithmic companion.
    ///
    /// If [`value_percentages`](ColourMap::value_percentages) is set
    /// the value is normalised with `minimum` and `maximum` first.
    /// Otherwise the value is taken to be in the key domain; values
    /// above the high clip get the last inserted colour and values
    /// below the low clip the first inserted one.
    pub fn map_value_linear(&self, value: f64, minimum: f64, maximum: f64)
                            -> RGB<f64> {
        if self.value_percentages {
            return self.calculate_color_as_percentage(value, minimum, maximum)
        }
        if self.clip_high.is_some_and(|h| value > h) {
            if let Some(e) = self.entries.last() { return rgb_of(&e.value) }
        }
        if self.clip_low.is_some_and(|l| value < l) {
            if let Some(e) = self.entries.first() { return rgb_of(&e.value) }
        }
        self.calculate_color(value)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn earth() -> ColourMap {
        let mut map = ColourMap::new();
        map.set(0., Colour::from_rgba(44, 18, 0, 255));
        map.set(0.25, Colour::from_rgba(101, 58, 7, 255));
        map.set(0.5, Colour::from_rgba(199, 145, 65, 255));
        map.set(0.75, Colour::from_rgba(238, 219, 172, 255));
        map.set(1., Colour::from_rgba(199, 234, 229, 255));
        map
    }

    fn rgb(c: RGB<f64>) -> [f64; 3] { [c.r, c.g, c.b] }

    #[test]
    fn keys_in_insertion_order() {
        assert_eq!(earth().keys(), vec![0., 0.25, 0.5, 0.75, 1.]);
        let map: ColourMap<u8> = [(2., 0), (-1., 1), (0.5, 2)]
            .into_iter().collect();
        assert_eq!(map.keys(), vec![2., -1., 0.5]);
        assert_eq!(map.sorted_keys(), vec![-1., 0.5, 2.]);
    }

    #[test]
    fn set_replaces_in_place() {
        let mut map = earth();
        let id = map.set(0.25, Colour::from_rgb(1, 2, 3));
        assert_eq!(map.len(), 5);
        assert_eq!(map.keys()[1], 0.25);
        assert_eq!(map.id(0.25), Some(id));
        assert_eq!(map.get(0.25).map(Colour::rgb), Some([1, 2, 3]));
    }

    #[test]
    fn nan_key_is_a_single_entry() {
        let mut map = ColourMap::new();
        map.set(f64::NAN, 1);
        map.set(f64::NAN, 2);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(f64::NAN), Some(&2));
    }

    #[test]
    fn reverse_lookup_uses_identity() {
        let mut map = earth();
        let white = Colour::from_rgba(255, 255, 255, 255);
        let id0 = map.set(0., white);
        let id1 = map.set(1., white);
        assert_eq!(map.key(id0), Some(0.));
        assert_eq!(map.key(id1), Some(1.));
        assert_eq!(ColourMap::<Colour>::new().key(id0), None);
    }

    #[test]
    fn min_max_keys() {
        let map = earth();
        assert_eq!(map.min_key(), Some(0.));
        assert_eq!(map.max_key(), Some(1.));
        let empty = ColourMap::<Colour>::new();
        assert_eq!(empty.min_key(), None);
        assert_eq!(empty.max_key(), None);
    }

    #[test]
    fn floor_entry_is_entry_or_next_lowest() {
        let map = earth();
        let (key, c) = map.floor_entry(0.75).unwrap();
        assert_eq!(key, 0.75);
        assert_eq!(c.rgb(), [238, 219, 172]);
        let (key, c) = map.floor_entry(0.65).unwrap();
        assert_eq!(key, 0.5);
        assert_eq!(c.rgb(), [199, 145, 65]);
    }

    #[test]
    fn ceiling_entry_is_entry_or_next_highest() {
        let map = earth();
        let (key, c) = map.ceiling_entry(0.75).unwrap();
        assert_eq!(key, 0.75);
        assert_eq!(c.rgb(), [238, 219, 172]);
        let (key, c) = map.ceiling_entry(0.85).unwrap();
        assert_eq!(key, 1.);
        assert_eq!(c.rgb(), [199, 234, 229]);
        let (key, _) = map.ceiling_entry(0.65).unwrap();
        assert_eq!(key, 0.75);
    }

    #[test]
    fn negative_keys_are_mirrored() {
        let map: ColourMap<u8> = [(-1., 0), (-0.5, 1), (0., 2)]
            .into_iter().collect();
        assert_eq!(map.floor_entry(-0.7).map(|e| e.0), Some(-0.5));
        assert_eq!(map.ceiling_entry(-0.7).map(|e| e.0), Some(-1.));
        assert_eq!(map.floor_entry(-0.2).map(|e| e.0), Some(0.));
        assert_eq!(map.ceiling_entry(-0.2).map(|e| e.0), Some(-0.5));
        assert_eq!(map.floor_entry(-0.5).map(|e| e.0), Some(-0.5));
        assert_eq!(map.ceiling_entry(-0.5).map(|e| e.0), Some(-0.5));
    }

    #[test]
    fn calculate_color_at_keys() {
        let map = earth();
        for (key, c) in map.entries() {
            let [r, g, b] = c.rgb();
            assert_eq!(rgb(map.calculate_color(key)),
                       [r as f64, g as f64, b as f64]);
        }
    }

    #[test]
    fn calculate_color_clamps() {
        let map = earth();
        assert_eq!(map.calculate_color(-3.), map.calculate_color(0.));
        assert_eq!(map.calculate_color(7.), map.calculate_color(1.));
    }

    #[test]
    fn calculate_color_on_empty_or_nan_is_black() {
        let empty = ColourMap::<Colour>::new();
        assert_eq!(empty.calculate_color(0.5), BLACK);
        assert_eq!(earth().calculate_color(f64::NAN), BLACK);
    }

    #[test]
    fn calculate_color_linear_blend() {
        let mut map = earth();
        map.interpolate_hue = false;
        // Midway between 0.5 → (199, 145, 65) and 0.75 → (238, 219, 172).
        let c = map.calculate_color(0.625);
        assert_eq!(rgb(c), [218.5, 182., 118.5]);
    }

    #[test]
    fn calculate_color_hue_blend() {
        // 40% of the way from 0.5 → (199, 145, 65) to 0.75 → (238, 219, 172)
        // in HSB space, quantised to integer channels.
        let map = earth();
        assert_eq!(rgb(map.calculate_color(0.6)), [215., 175., 104.]);
    }

    #[test]
    fn calculate_color_negative_domain() {
        let mut map = ColourMap::new();
        map.interpolate_hue = false;
        map.set(-1., Colour::from_rgb(0, 0, 0));
        map.set(-0.5, Colour::from_rgb(100, 100, 100));
        map.set(0., Colour::from_rgb(200, 200, 200));
        // -0.75 lies halfway between -0.5 and -1.
        assert_eq!(rgb(map.calculate_color(-0.75)), [50., 50., 50.]);
        // -0.2 lies 40% of the way from 0 to -0.5.
        let c = map.calculate_color(-0.2);
        assert!((c.r - 160.).abs() < 1e-9, "{c:?}");
    }

    #[test]
    fn invert_swaps_values_around_midpoint() {
        let map = earth();
        let inverted = map.invert_colours();
        for (k, k_inv) in [(0., 1.), (0.25, 0.75), (0.5, 0.5)] {
            assert_eq!(map.id(k), inverted.id(k_inv));
            assert_eq!(map.id(k_inv), inverted.id(k));
        }
        assert_eq!(inverted.keys(), map.keys());
    }

    #[test]
    fn invert_twice_is_identity() {
        let map = earth();
        let back = map.invert_colours().invert_colours();
        for k in map.keys() {
            assert_eq!(map.id(k), back.id(k));
        }
    }

    #[test]
    fn invert_keeps_no_data_in_place() {
        let mut map = earth();
        map.set(-9999., Colour::from_rgb(0, 0, 0));
        map.set_no_data_value(-9999.);
        let inverted = map.invert_colours();
        assert_eq!(inverted.id(-9999.), map.id(-9999.));
        assert_eq!(inverted.id(0.), map.id(1.));
        assert_eq!(inverted.id(1.), map.id(0.));
    }

    #[test]
    fn clone_copies_flags_and_shares_values() {
        let mut map = earth();
        map.interpolate_hue = false;
        map.value_percentages = true;
        map.set_clip_low(0.1);
        map.set_clip_high(0.9);
        map.set_no_data_value(-1.);
        map.init_log_colour_map(1., 100.);
        let clone = map.clone();
        assert!(!clone.interpolate_hue);
        assert!(clone.value_percentages);
        assert_eq!(clone.clip_low(), Some(0.1));
        assert_eq!(clone.clip_high(), Some(0.9));
        assert_eq!(clone.no_data_value(), Some(-1.));
        assert!(std::ptr::eq(clone.logarithmic_values().unwrap(),
                             map.logarithmic_values().unwrap()));
        for k in map.keys() { assert_eq!(clone.id(k), map.id(k)); }
    }

    #[test]
    fn closest_entry() {
        let map: ColourMap<f64> = [(0., 10.), (1., 75.), (2., 150.)]
            .into_iter().collect();
        assert_eq!(map.closest_entry(50.), Some(1.));
        assert_eq!(map.closest_entry(150.), Some(2.));
        assert_eq!(map.closest_entry(1e9), Some(2.));
        assert_eq!(ColourMap::<f64>::new().closest_entry(1.), None);
    }

    #[test]
    fn closest_entry_compares_absolute_values() {
        let map: ColourMap<f64> = [(0., -100.), (1., 10.)]
            .into_iter().collect();
        assert_eq!(map.closest_entry(90.), Some(0.));
    }

    #[test]
    fn log_colour_map_values() {
        let mut map = earth();
        map.init_log_colour_map(1., 100.);
        let log = map.logarithmic_values().unwrap();
        assert_eq!(log.sorted_keys(), map.sorted_keys());
        let expected = [1., 10f64.sqrt(), 10., 10f64.powf(1.5), 100.];
        for (k, e) in log.sorted_keys().into_iter().zip(expected) {
            let v = *log.get(k).unwrap();
            assert!((v - e).abs() < 1e-9, "{k}: {v} ≠ {e}");
        }
    }

    #[test]
    fn log_colour_map_no_data_is_identity() {
        let mut map = earth();
        map.set_no_data_value(0.5);
        map.init_log_colour_map(1., 100.);
        let log = map.logarithmic_values().unwrap();
        assert_eq!(log.get(0.5), Some(&0.5));
        assert_eq!(log.len(), map.len());
    }

    #[test]
    fn log_colour_map_no_data_keeps_its_step() {
        // The no-data key still counts as a position in the ascending
        // keys, so the real keys are spaced over the remaining steps.
        let mut map = earth();
        map.set(-9999., Colour::from_rgb(0, 0, 0));
        map.set_no_data_value(-9999.);
        map.init_log_colour_map(1., 100.);
        let log = map.logarithmic_values().unwrap();
        assert_eq!(log.get(-9999.), Some(&-9999.));
        let step = 2. / 5.;
        for (i, k) in [0., 0.25, 0.5, 0.75, 1.].into_iter().enumerate() {
            let expected = 10f64.powf((i + 1) as f64 * step);
            let v = *log.get(k).unwrap();
            assert!((v - expected).abs() < 1e-9, "{k}: {v} ≠ {expected}");
        }
        assert!((log.get(1.).unwrap() - 100.).abs() < 1e-9);
    }

    #[test]
    fn log_colour_map_non_positive_min() {
        let mut map = earth();
        map.init_log_colour_map(0., 1000.);
        let log = map.logarithmic_values().unwrap();
        assert_eq!(log.get(0.), Some(&1.));
        assert!((log.get(1.).unwrap() - 1000.).abs() < 1e-9);
    }

    #[test]
    fn log_colour_map_single_key() {
        let mut map = ColourMap::new();
        map.set(3., Colour::from_rgb(1, 1, 1));
        map.init_log_colour_map(10., 100.);
        assert_eq!(map.logarithmic_values().unwrap().get(3.), Some(&10.));
    }

    #[test]
    fn ensure_and_transform() {
        let mut map = earth();
        assert!(map.ensure_log_colour_map(1., 100.));
        assert!(!map.ensure_log_colour_map(1., 100.));
        map.transform(1., 100., false);
        assert!(map.logarithmic_values().is_none());
        assert!(map.transform(1., 100., true).logarithmic_values().is_some());
    }

    #[test]
    fn map_value_percentages() {
        let mut map = earth();
        map.value_percentages = true;
        assert_eq!(map.map_value(50., 0., 100.), map.calculate_color(0.5));
        assert_eq!(map.map_value_linear(100., 0., 100.),
                   map.calculate_color(1.));
    }

    #[test]
    fn map_value_clips() {
        let mut map = ColourMap::new();
        map.set(1., Colour::from_rgb(10, 10, 10));
        map.set(0., Colour::from_rgb(20, 20, 20));
        map.set(0.5, Colour::from_rgb(30, 30, 30));
        map.set_clip_high(0.8);
        map.set_clip_low(0.2);
        // Last and first inserted, not highest and lowest key.
        assert_eq!(rgb(map.map_value(0.9, 0., 1.)), [30., 30., 30.]);
        assert_eq!(rgb(map.map_value(0.1, 0., 1.)), [10., 10., 10.]);
        assert_eq!(map.map_value(0.5, 0., 1.), map.calculate_color(0.5));
    }

    #[test]
    fn map_value_logarithmic_picks_closest_entry() {
        let mut map = earth();
        map.init_log_colour_map(1., 100.);
        assert_eq!(rgb(map.map_value(9., 1., 100.)), [199., 145., 65.]);
        assert_eq!(rgb(map.map_value(1000., 1., 100.)), [199., 234., 229.]);
        assert_eq!(map.map_value_linear(0.5, 1., 100.),
                   map.calculate_color(0.5));
    }

    #[test]
    fn clear_keeps_settings() {
        let mut map = earth();
        map.set_no_data_value(2.);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.no_data_value(), Some(2.));
    }
}
