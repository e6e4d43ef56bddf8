use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use rgb::RGB;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use colour_map::{ColorRange, Colour, ColourMap, Preset,
                 create_color_buffer_from_colour_map};

type Err = Box<dyn Error>;

fn css_string(c: RGB<f64>) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r as u8, c.g as u8, c.b as u8)
}

fn table_of_colors(fh: &mut impl Write, colors: &[RGB<f64>],
                   width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for &c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      background-color: {}\"></td>",
                 css_string(c))?;
    }
    writeln!(fh, "<td style=\"padding-left: 7px\">{comment}</td>\
                  </tr></table><br/>")?;
    Ok(())
}

fn ramp(fh: &mut impl Write, map: &ColourMap, n: usize,
        width: u32, comment: &str) -> Result<(), Err> {
    let colors: Vec<_> = map.range(0., 1., n).map(|(_, c)| c).collect();
    table_of_colors(fh, &colors, width, comment)
}

/// Colour `n` values spread over `1 ..= 1000` through the point buffer
/// path, linearly or on a log scale.
fn buffer(fh: &mut impl Write, map: &ColourMap, n: usize, log_scale: bool,
          comment: &str) -> Result<(), Err> {
    let mut map = map.clone();
    map.value_percentages = true;
    let positions: Vec<f64> = (0 .. n)
        .flat_map(|i| [i as f64, 0., 1. + 999. * i as f64 / (n - 1) as f64])
        .collect();
    let rgb = create_color_buffer_from_colour_map(&positions, &mut map,
                                                  1., 1000., log_scale);
    let colors: Vec<_> = rgb.chunks_exact(3)
        .map(|c| RGB::new(c[0] as f64 * 255., c[1] as f64 * 255.,
                          c[2] as f64 * 255.))
        .collect();
    table_of_colors(fh, &colors, 4, comment)
}

fn main() -> Result<(), Err> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let out = env::args().nth(1).unwrap_or_else(|| "ramp.html".into());
    let mut fh = BufWriter::new(File::create(&out)?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>colour_map: presets</title>\n\
                  </head>\n\
                  <body>")?;

    writeln!(fh, "<h3>Presets</h3>")?;
    for p in Preset::ALL {
        let map = p.colour_map();
        ramp(&mut fh, &map, 10, 43, p.name())?;
        ramp(&mut fh, &map, 150, 3, "")?;
        let inverted = map.invert_colours();
        ramp(&mut fh, &inverted, 150, 3, &format!("{} (inverted)", p.name()))?;
    }

    writeln!(fh, "<h3>Hue versus RGB blending</h3>")?;
    let mut map: ColourMap = [(0., Colour::from_rgb(255, 0, 0)),
                              (1., Colour::from_rgb(0, 0, 255))]
        .into_iter().collect();
    ramp(&mut fh, &map, 150, 3, "hue")?;
    map.interpolate_hue = false;
    ramp(&mut fh, &map, 150, 3, "rgb")?;

    writeln!(fh, "<h3>Linear versus logarithmic scale (1 to 1000)</h3>")?;
    let earth = ColourMap::preset(Preset::Earth);
    buffer(&mut fh, &earth, 120, false, "linear")?;
    buffer(&mut fh, &earth, 120, true, "logarithmic")?;

    writeln!(fh, "</body>\n\
                  </html>")?;
    info!(path = %out, "wrote ramp preview");
    Ok(())
}
