//! Serialisable colour map definitions.
//!
//! A definition lists the entries of a ramp together with its lookup
//! flags, e.g.
//!
//! ```json
//! { "interpolateHue": true, "percentages": true,
//!   "entries": [ { "value": 0, "red": 44, "green": 18, "blue": 0 },
//!                { "value": 1, "colour": "#C7EAE5" } ] }
//! ```

use std::str::FromStr;
use serde::{Deserialize, Serialize};
use tracing::warn;
use crate::colour::Colour;
use crate::colourmap::ColourMap;
use crate::error::{Error, Result};

fn opaque() -> f64 { 255. }

/// One entry of a [`ColourMapDefinition`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryDefinition {
    /// Channels in \[0, 255\].  Fractional channels are truncated and
    /// every channel is masked to its low 8 bits.
    Channels {
        value: f64,
        red: f64,
        green: f64,
        blue: f64,
        #[serde(default = "opaque")]
        alpha: f64,
    },
    /// A hex string accepted by [`Colour::from_hex_string`].
    Hex {
        value: f64,
        colour: String,
    },
}

impl EntryDefinition {
    pub fn value(&self) -> f64 {
        match self {
            EntryDefinition::Channels { value, .. }
            | EntryDefinition::Hex { value, .. } => *value,
        }
    }

    pub fn colour(&self) -> Result<Colour> {
        // Like JavaScript's ToInt32: NaN becomes 0, wrapping modulo 2³².
        let int = |x: f64| x as i64 as i32;
        match self {
            EntryDefinition::Channels { red, green, blue, alpha, .. } =>
                Ok(Colour::from_rgba(int(*red), int(*green), int(*blue),
                                     int(*alpha))),
            EntryDefinition::Hex { colour, .. } => colour.parse(),
        }
    }
}

/// The persistent form of a [`ColourMap`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColourMapDefinition {
    #[serde(default)]
    pub interpolate_hue: bool,
    #[serde(default)]
    pub percentages: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_data_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_high: Option<f64>,
    #[serde(default)]
    pub entries: Vec<EntryDefinition>,
}

impl ColourMapDefinition {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl ColourMap<Colour> {
    /// Build a colour map from its definition.  Entries are inserted in
    /// the order they are listed.
    ///
    /// # Example
    ///
    /// ```
    /// use colour_map::{ColourMap, ColourMapDefinition};
    /// let def = ColourMapDefinition::from_json(r##"{
    ///     "percentages": true,
    ///     "entries": [ { "value": 0, "colour": "#000" },
    ///                  { "value": 1, "red": 255, "green": 255, "blue": 255 } ]
    /// }"##).unwrap();
    /// let map = ColourMap::from_definition(&def).unwrap();
    /// assert!(map.value_percentages);
    /// assert!(!map.interpolate_hue);
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn from_definition(def: &ColourMapDefinition) -> Result<Self> {
        if def.entries.is_empty() { return Err(Error::EmptyDefinition) }
        let mut map = ColourMap::new();
        map.interpolate_hue = def.interpolate_hue;
        map.value_percentages = def.percentages;
        if let Some(v) = def.no_data_value { map.set_no_data_value(v) }
        if let Some(v) = def.clip_low { map.set_clip_low(v) }
        if let Some(v) = def.clip_high { map.set_clip_high(v) }
        for entry in &def.entries {
            let colour = entry.colour().map_err(|e| {
                warn!(value = entry.value(), "bad colour map entry: {e}");
                e
            })?;
            map.set(entry.value(), colour);
        }
        Ok(map)
    }

    /// The definition of this map, entries in insertion order and in
    /// channel form.
    pub fn to_definition(&self) -> ColourMapDefinition {
        let entries = self.entries().map(|(value, c)| {
            let [r, g, b, a] = c.rgba();
            EntryDefinition::Channels { value, red: r as f64, green: g as f64,
                                        blue: b as f64, alpha: a as f64 }
        }).collect();
        ColourMapDefinition { interpolate_hue: self.interpolate_hue,
                              percentages: self.value_percentages,
                              no_data_value: self.no_data_value(),
                              clip_low: self.clip_low(),
                              clip_high: self.clip_high(),
                              entries }
    }
}

/// Parse a JSON [`ColourMapDefinition`].
impl FromStr for ColourMap<Colour> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ColourMap::from_definition(&ColourMapDefinition::from_json(s)?)
    }
}
