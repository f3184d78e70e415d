//! GGA position-fix sentence
//!
//! Wire layout (14 fields after the talker):
//!
//! ```text
//! $GPGGA,hhmmss.sss,ddmm.mmmmmm,N,dddmm.mmmmmm,E,q,ss,h.h,a.a,M,0.0,M,,*CS\r\n
//! ```
//!
//! Every field has a fixed fallback so the sentence parses cleanly even
//! before the receiver has a fix.

use crate::sentence::{Sentence, SentenceError, SentenceWriter, SENTENCE_CAPACITY};

/// Talker and sentence identifier for the position fix
pub const POSITION_TALKER: &str = "GPGGA";

/// Worst-case encoded length with every field at its widest clamp
///
/// `$GPGGA` (6) + 14 separators + time (10) + lat (11) + hemisphere (1)
/// + lon (12) + hemisphere (1) + quality (1) + satellites (2) + HDOP (4)
/// + altitude (7) + `M` + `0.0` + `M` (5) + trailer (5)
pub const MAX_POSITION_SENTENCE_LEN: usize = 79;

const _: () = assert!(MAX_POSITION_SENTENCE_LEN <= SENTENCE_CAPACITY);

/// HDOP written when the receiver has not reported one
pub const FALLBACK_HDOP: f32 = 99.9;

const MAX_SATELLITES: u8 = 99;
const MIN_ALTITUDE_M: f32 = -9999.9;
const MAX_ALTITUDE_M: f32 = 99999.9;
const MAX_QUALITY_CODE: u8 = 8;

/// UTC time of day as reported by the receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UtcTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub centisecond: u8,
}

impl UtcTime {
    pub const fn new(hour: u8, minute: u8, second: u8, centisecond: u8) -> Self {
        Self {
            hour,
            minute,
            second,
            centisecond,
        }
    }
}

/// Encoder input: every quantity the sentence carries, `None` when unknown
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionFix {
    pub time: Option<UtcTime>,
    /// (latitude, longitude) in signed decimal degrees
    pub coordinates: Option<(f64, f64)>,
    /// GGA quality indicator, 0 = no fix
    pub quality_code: u8,
    pub satellites: Option<u8>,
    pub hdop: Option<f32>,
    pub altitude_m: Option<f32>,
}

/// Encode a position fix into a GGA sentence
pub fn encode_position(fix: &PositionFix) -> Result<Sentence, SentenceError> {
    let mut writer = SentenceWriter::new(POSITION_TALKER)?;

    match fix.time {
        Some(t) => writer.field_fmt(format_args!(
            "{:02}{:02}{:02}.{:03}",
            t.hour.min(23),
            t.minute.min(59),
            t.second.min(60),
            u16::from(t.centisecond.min(99)) * 10
        ))?,
        None => writer.field("000000.000")?,
    };

    match fix
        .coordinates
        .filter(|(lat, lon)| lat.is_finite() && lon.is_finite())
    {
        Some((lat, lon)) => {
            let (lat_value, lat_hemisphere) = split_coordinate(lat, 90.0, 'N', 'S');
            writer.field_fmt(format_args!(
                "{:02}{:02}.{:06}",
                lat_value.degrees, lat_value.minutes, lat_value.micro_minutes
            ))?;
            writer.field_fmt(format_args!("{}", lat_hemisphere))?;

            let (lon_value, lon_hemisphere) = split_coordinate(lon, 180.0, 'E', 'W');
            writer.field_fmt(format_args!(
                "{:03}{:02}.{:06}",
                lon_value.degrees, lon_value.minutes, lon_value.micro_minutes
            ))?;
            writer.field_fmt(format_args!("{}", lon_hemisphere))?;
        }
        None => {
            for _ in 0..4 {
                writer.empty_field()?;
            }
        }
    }

    writer.field_fmt(format_args!("{}", fix.quality_code.min(MAX_QUALITY_CODE)))?;
    writer.field_fmt(format_args!(
        "{:02}",
        fix.satellites.unwrap_or(0).min(MAX_SATELLITES)
    ))?;

    let hdop = fix
        .hdop
        .filter(|h| h.is_finite())
        .map(|h| h.clamp(0.0, FALLBACK_HDOP))
        .unwrap_or(FALLBACK_HDOP);
    writer.field_fmt(format_args!("{:.1}", hdop))?;

    let altitude = fix
        .altitude_m
        .filter(|a| a.is_finite())
        .map(|a| a.clamp(MIN_ALTITUDE_M, MAX_ALTITUDE_M))
        .unwrap_or(0.0);
    writer.field_fmt(format_args!("{:.1}", altitude))?;

    // Altitude units, geoid separation and its units, then empty
    // differential age and station id
    writer
        .field("M")?
        .field("0.0")?
        .field("M")?
        .empty_field()?
        .empty_field()?;

    writer.finish()
}

/// Degrees plus minutes, with minutes held as whole + millionths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DegreesMinutes {
    degrees: u32,
    minutes: u32,
    micro_minutes: u32,
}

/// Split signed decimal degrees into `DDMM.mmmmmm` parts and a hemisphere
///
/// Minutes are rounded to the nearest millionth; a round-up to 60 carries
/// into the degrees.
fn split_coordinate(
    value: f64,
    limit: f64,
    positive: char,
    negative: char,
) -> (DegreesMinutes, char) {
    let hemisphere = if value < 0.0 { negative } else { positive };
    let magnitude = if value < 0.0 { -value } else { value };
    let magnitude = magnitude.min(limit);

    let mut degrees = magnitude as u32;
    let fraction = magnitude - f64::from(degrees);
    let mut total_micro = (fraction * 60.0 * 1_000_000.0 + 0.5) as u32;
    if total_micro >= 60_000_000 {
        degrees += 1;
        total_micro -= 60_000_000;
    }

    (
        DegreesMinutes {
            degrees,
            minutes: total_micro / 1_000_000,
            micro_minutes: total_micro % 1_000_000,
        },
        hemisphere,
    )
}
