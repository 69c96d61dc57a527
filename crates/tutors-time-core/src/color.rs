//! Background colour scale for time cells
//!
//! Cells are shaded on a three-stop gradient over minutes:
//! white at zero, light green at one minute, deep green at thirty minutes
//! and beyond.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn lerp(from: Rgb, to: Rgb, t: f64) -> Rgb {
        let channel = |a: u8, b: u8| -> u8 {
            let value = f64::from(a) + t * (f64::from(b) - f64::from(a));
            value.round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: channel(from.r, to.r),
            g: channel(from.g, to.g),
            b: channel(from.b, to.b),
        }
    }
}

/// CSS form, e.g. `rgb(200, 255, 200)`
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

pub const WHITE: Rgb = Rgb::new(255, 255, 255);
pub const LIGHT_GREEN: Rgb = Rgb::new(200, 255, 200);
pub const DEEP_GREEN: Rgb = Rgb::new(0, 120, 0);

/// Minutes at which the scale reaches [`DEEP_GREEN`]
pub const DEEP_GREEN_MINUTES: f64 = 30.0;

/// Colour for a duration expressed in minutes
///
/// # Examples
/// ```
/// use tutors_time_core::color::{color_for_minutes, DEEP_GREEN, LIGHT_GREEN, WHITE};
///
/// assert_eq!(color_for_minutes(0.0), WHITE);
/// assert_eq!(color_for_minutes(1.0), LIGHT_GREEN);
/// assert_eq!(color_for_minutes(30.0), DEEP_GREEN);
/// assert_eq!(color_for_minutes(45.0), DEEP_GREEN);
/// ```
pub fn color_for_minutes(minutes: f64) -> Rgb {
    if minutes.is_nan() || minutes <= 0.0 {
        return WHITE;
    }
    if minutes <= 1.0 {
        return Rgb::lerp(WHITE, LIGHT_GREEN, minutes);
    }
    let t = ((minutes - 1.0) / (DEEP_GREEN_MINUTES - 1.0)).clamp(0.0, 1.0);
    Rgb::lerp(LIGHT_GREEN, DEEP_GREEN, t)
}

/// Background colour for a cell holding seconds; absent cells are white
pub fn cell_color(seconds: Option<f64>) -> Rgb {
    color_for_minutes(seconds.unwrap_or(0.0) / 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_colours() {
        assert_eq!(cell_color(None), WHITE);
        assert_eq!(cell_color(Some(0.0)), WHITE);
        assert_eq!(cell_color(Some(60.0)), LIGHT_GREEN);
        assert_eq!(cell_color(Some(30.0 * 60.0)), DEEP_GREEN);
    }

    #[test]
    fn test_ceiling() {
        assert_eq!(cell_color(Some(45.0 * 60.0)), cell_color(Some(30.0 * 60.0)));
        assert_eq!(cell_color(Some(1_000_000.0)), DEEP_GREEN);
    }

    #[test]
    fn test_negative_and_nan_are_white() {
        assert_eq!(cell_color(Some(-120.0)), WHITE);
        assert_eq!(color_for_minutes(f64::NAN), WHITE);
    }

    #[test]
    fn test_first_segment_midpoint() {
        // Half a minute: halfway from white to light green, 227.5 rounds up
        assert_eq!(color_for_minutes(0.5), Rgb::new(228, 255, 228));
    }

    #[test]
    fn test_second_segment_midpoint() {
        // 15.5 minutes is t = 0.5 between light green and deep green
        assert_eq!(color_for_minutes(15.5), Rgb::new(100, 188, 100));
    }

    #[test]
    fn test_monotonic_within_segments() {
        let mut previous = color_for_minutes(0.01);
        let mut m = 0.01;
        while m <= 30.0 {
            let current = color_for_minutes(m);
            assert!(current.r <= previous.r, "red rose at {m}");
            assert!(current.b <= previous.b, "blue rose at {m}");
            previous = current;
            m += 0.25;
        }
    }

    #[test]
    fn test_css_display() {
        assert_eq!(LIGHT_GREEN.to_string(), "rgb(200, 255, 200)");
    }
}
