//! Named color palettes.

use super::{HsbColor, RgbColor};
use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

const fn hue(hue: f64) -> HsbColor {
    HsbColor::new(hue, 1.0, 1.0)
}

pub(crate) const WARM: HsbColor = HsbColor::new(0.127, 0.886, 1.0);
pub(crate) const COLD: HsbColor = HsbColor::new(0.733, 0.307, 1.0);

/// Named HSB colors accepted by the `color` command.
pub static HSB_COLORS: [(&str, HsbColor); 11] = [
    ("default", HsbColor::new(0.149, 0.551, 1.0)),
    ("white", HsbColor::new(0.0, 0.0, 1.0)),
    ("warm", WARM),
    ("cold", COLD),
    ("black", HsbColor::new(0.0, 0.0, 0.0)),
    ("red", hue(0.0)),
    ("orange", hue(0.08)),
    ("yellow", hue(0.17)),
    ("green", hue(0.45)),
    ("blue", hue(0.82)),
    ("purple", hue(0.88)),
];

/// Reference RGB colors, used to check HSB conversions.
pub static RGB_COLORS: [(&str, RgbColor); 9] = [
    ("white", RgbColor::new(1.0, 1.0, 1.0)),
    ("gray", RgbColor::new(0.5, 0.5, 0.5)),
    ("black", RgbColor::new(0.0, 0.0, 0.0)),
    ("red", RgbColor::new(1.0, 0.0, 0.0)),
    ("green", RgbColor::new(0.0, 1.0, 0.0)),
    ("blue", RgbColor::new(0.0, 0.0, 1.0)),
    ("magenta", RgbColor::new(1.0, 0.0, 1.0)),
    ("cyan", RgbColor::new(0.0, 1.0, 1.0)),
    ("yellow", RgbColor::new(1.0, 1.0, 0.0)),
];

/// Look up a named HSB color.
///
/// # Examples
///
/// ```
/// use lights_rs::{HsbColor, hsb_color};
///
/// assert_eq!(hsb_color("white").unwrap(), HsbColor::new(0.0, 0.0, 1.0));
/// assert!(hsb_color("chartreuse").is_err());
/// ```
pub fn hsb_color(name: &str) -> Result<HsbColor> {
    lookup(&HSB_COLORS, name)
}

/// Look up a named reference RGB color.
pub fn rgb_color(name: &str) -> Result<RgbColor> {
    lookup(&RGB_COLORS, name)
}

fn lookup<C: Copy>(palette: &[(&str, C)], name: &str) -> Result<C> {
    palette
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, color)| *color)
        .ok_or_else(|| Error::UnknownColor {
            name: name.to_string(),
            valid: palette
                .iter()
                .map(|(known, _)| *known)
                .collect::<Vec<_>>()
                .join(", "),
        })
}
