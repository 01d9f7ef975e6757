//! Scale bar shown in the corner of the map.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// Minimal width of the scale bar in pixels.
const MIN_WIDTH: f64 = 64.0;
const LEADING_DIGITS: [f64; 3] = [1.0, 2.0, 5.0];
const METERS_PER_DEGREE: f64 = 6_378_137.0 * std::f64::consts::PI / 180.0;

/// Units of the scale bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleUnits {
    /// Degrees, minutes and seconds of arc.
    Degrees,
    /// Inches, feet and miles.
    Imperial,
    /// Nautical miles.
    Nautical,
    /// Millimeters, meters and kilometers.
    #[default]
    Metric,
    /// US survey inches, feet and miles.
    Us,
}

impl FromStr for ScaleUnits {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "degrees" => Ok(Self::Degrees),
            "imperial" => Ok(Self::Imperial),
            "nautical" => Ok(Self::Nautical),
            "metric" => Ok(Self::Metric),
            "us" => Ok(Self::Us),
            _ => Err(MapError::InvalidArgument(format!("unknown units: {s}"))),
        }
    }
}

/// Rendered state of the scale bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleLine {
    /// Text shown above the bar, e.g. `500 m`.
    pub label: String,
    /// Width of the bar in pixels.
    pub width_px: f64,
}

/// Computes the scale bar for a view.
///
/// `resolution` is in meters of the spherical mercator per pixel, `latitude` is the latitude of
/// the view center in degrees, used to correct the mercator scale distortion.
pub fn scale_line(units: ScaleUnits, resolution: f64, latitude: f64) -> ScaleLine {
    let ground_resolution = resolution * latitude.to_radians().cos();
    let nominal = MIN_WIDTH * ground_resolution;

    let (suffix, factor) = match units {
        ScaleUnits::Degrees => {
            let degrees = nominal / METERS_PER_DEGREE;
            if degrees < 1.0 / 60.0 {
                ("\u{2033}", 3600.0 / METERS_PER_DEGREE)
            } else if degrees < 1.0 {
                ("\u{2032}", 60.0 / METERS_PER_DEGREE)
            } else {
                ("\u{b0}", 1.0 / METERS_PER_DEGREE)
            }
        }
        ScaleUnits::Imperial => {
            if nominal < 0.9144 {
                ("in", 1.0 / 0.0254)
            } else if nominal < 1609.344 {
                ("ft", 1.0 / 0.3048)
            } else {
                ("mi", 1.0 / 1609.344)
            }
        }
        ScaleUnits::Nautical => ("nm", 1.0 / 1852.0),
        ScaleUnits::Metric => {
            if nominal < 0.001 {
                ("\u{3bc}m", 1_000_000.0)
            } else if nominal < 1.0 {
                ("mm", 1000.0)
            } else if nominal < 1000.0 {
                ("m", 1.0)
            } else {
                ("km", 0.001)
            }
        }
        ScaleUnits::Us => {
            if nominal < 0.9144 {
                ("in", 39.37)
            } else if nominal < 1609.3472 {
                ("ft", 39.37 / 12.0)
            } else {
                ("mi", 1.0 / 1609.3472)
            }
        }
    };

    let units_per_pixel = ground_resolution * factor;
    if !units_per_pixel.is_finite() || units_per_pixel <= 0.0 {
        return ScaleLine {
            label: String::new(),
            width_px: 0.0,
        };
    }

    let mut exponent = (MIN_WIDTH * units_per_pixel).log10().floor() as i32;
    loop {
        let magnitude = 10f64.powi(exponent);
        for digit in LEADING_DIGITS {
            let count = digit * magnitude;
            let width_px = count / units_per_pixel;
            if width_px >= MIN_WIDTH {
                return ScaleLine {
                    label: format!("{} {suffix}", format_count(count)),
                    width_px,
                };
            }
        }
        exponent += 1;
    }
}

fn format_count(count: f64) -> String {
    if count >= 1.0 {
        format!("{count:.0}")
    } else {
        let decimals = (-count.log10()).ceil() as usize;
        format!("{count:.decimals$}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    #[test]
    fn parses_units() {
        assert_eq!("metric".parse::<ScaleUnits>().unwrap(), ScaleUnits::Metric);
        assert_eq!("nautical".parse::<ScaleUnits>().unwrap(), ScaleUnits::Nautical);
        assert_matches!(
            "furlongs".parse::<ScaleUnits>(),
            Err(MapError::InvalidArgument(_))
        );
    }

    #[test]
    fn metric_at_equator() {
        // 64 px * 20 m = 1.28 km, next nice number is 2 km.
        let line = scale_line(ScaleUnits::Metric, 20.0, 0.0);
        assert_eq!(line.label, "2 km");
        assert_abs_diff_eq!(line.width_px, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn metric_small_scale() {
        // 64 px * 1 m = 64 m -> 100 m.
        let line = scale_line(ScaleUnits::Metric, 1.0, 0.0);
        assert_eq!(line.label, "100 m");
        assert_abs_diff_eq!(line.width_px, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn latitude_correction() {
        let line = scale_line(ScaleUnits::Metric, 2.0, 60.0);
        assert_eq!(line.label, "100 m");
        assert_abs_diff_eq!(line.width_px, 100.0, epsilon = 1e-6);
    }

    #[test]
    fn nautical_and_imperial() {
        let line = scale_line(ScaleUnits::Nautical, 100.0, 0.0);
        assert!(line.label.ends_with(" nm"));
        assert!(line.width_px >= MIN_WIDTH);

        let line = scale_line(ScaleUnits::Imperial, 100.0, 0.0);
        assert!(line.label.ends_with(" mi"));
        assert!(line.width_px >= MIN_WIDTH);
    }

    #[test]
    fn fractional_counts() {
        assert_eq!(format_count(0.5), "0.5");
        assert_eq!(format_count(0.02), "0.02");
        assert_eq!(format_count(200.0), "200");
    }
}
