//! Color policy
//!
//! Maps signal-quality figures to semantic color classes.

use lodestar_display::ColorClass;

/// HDOP quality band
///
/// Bands are half-open: `[0,1)`, `[1,2)`, `[2,5)`, `[5,inf)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HdopClass {
    Ideal,
    Excellent,
    Good,
    Moderate,
}

impl HdopClass {
    /// Band for an HDOP value; NaN lands in the worst band
    pub fn classify(hdop: f32) -> Self {
        if hdop < 1.0 {
            HdopClass::Ideal
        } else if hdop < 2.0 {
            HdopClass::Excellent
        } else if hdop < 5.0 {
            HdopClass::Good
        } else {
            HdopClass::Moderate
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HdopClass::Ideal => "IDEAL",
            HdopClass::Excellent => "EXCELLENT",
            HdopClass::Good => "GOOD",
            HdopClass::Moderate => "MODERATE",
        }
    }

    pub fn color(self) -> ColorClass {
        match self {
            HdopClass::Ideal => ColorClass::Ideal,
            HdopClass::Excellent => ColorClass::Excellent,
            HdopClass::Good => ColorClass::Good,
            HdopClass::Moderate => ColorClass::Moderate,
        }
    }
}

/// Color for a satellites-in-use count
pub fn satellite_color(count: u8) -> ColorClass {
    match count {
        8.. => ColorClass::Ideal,
        5..=7 => ColorClass::Good,
        1..=4 => ColorClass::Moderate,
        0 => ColorClass::Alert,
    }
}

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// 8-point compass label for a course in degrees true
pub fn compass_point(course_deg: f32) -> &'static str {
    let sector = ((course_deg + 22.5) as i32).rem_euclid(360) / 45;
    COMPASS_POINTS[sector as usize]
}
