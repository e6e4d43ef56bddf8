//! Built-in colour ramps.

use lazy_static::lazy_static;
use crate::colour::Colour;
use crate::colourmap::ColourMap;

/// The stops of a built-in ramp, keys in \[0, 1\].
pub(crate) struct PresetData {
    pub(crate) stops: Vec<(f64, Colour)>, // Invariant: length ≥ 2, sorted
    pub(crate) interpolate_hue: bool,
}

lazy_static! {
    static ref EARTH: PresetData = PresetData {
        stops: vec![(0., Colour::from_rgb(44, 18, 0)),
                    (0.25, Colour::from_rgb(101, 58, 7)),
                    (0.5, Colour::from_rgb(199, 145, 65)),
                    (0.75, Colour::from_rgb(238, 219, 172)),
                    (1., Colour::from_rgb(199, 234, 229))],
        interpolate_hue: true,
    };

    static ref GREYS: PresetData = PresetData {
        stops: vec![(0., Colour::from_rgb(0, 0, 0)),
                    (1., Colour::from_rgb(255, 255, 255))],
        interpolate_hue: false,
    };

    static ref HEAT: PresetData = PresetData {
        stops: vec![(0., Colour::from_rgb(0, 0, 0)),
                    (0.35, Colour::from_rgb(230, 0, 0)),
                    (0.7, Colour::from_rgb(255, 210, 0)),
                    (1., Colour::from_rgb(255, 255, 255))],
        interpolate_hue: true,
    };
}

/// Names of the built-in ramps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Dark brown through ochre and sand to pale aqua, suited to
    /// grade and geochemistry data.
    Earth,
    /// Black to white, blended per RGB channel.
    Greys,
    /// Black, red, yellow, white.
    Heat,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Earth, Preset::Greys, Preset::Heat];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Earth => "earth",
            Preset::Greys => "greys",
            Preset::Heat => "heat",
        }
    }

    fn data(&self) -> &'static PresetData {
        match self {
            Preset::Earth => &*EARTH,
            Preset::Greys => &*GREYS,
            Preset::Heat => &*HEAT,
        }
    }

    /// A fresh colour map holding the ramp, keys in \[0, 1\].
    pub fn colour_map(&self) -> ColourMap {
        let data = self.data();
        let mut map: ColourMap = data.stops.iter().copied().collect();
        map.interpolate_hue = data.interpolate_hue;
        map
    }
}

impl ColourMap<Colour> {
    /// Shorthand for [`Preset::colour_map`].
    #[inline]
    pub fn preset(preset: Preset) -> Self { preset.colour_map() }
}
