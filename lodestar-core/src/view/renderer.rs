//! View renderer
//!
//! Builds the draw list for each display mode. Every line is a pure
//! function of the snapshot and the last known position, so the same
//! inputs always give the same frame.
//!
//! The display has 8 rows of 21 characters. Row 0 is the status line.

use core::fmt::{self, Write};

use heapless::String;
use lodestar_display::{ColorClass, DrawCommand, DrawList, FontClass, LINE_LEN};

use super::policy::{compass_point, satellite_color, HdopClass};
use super::DisplayMode;
use crate::feed::FaultKind;
use crate::fix::{Coordinates, FixSnapshot};
use crate::persist::LastKnownPosition;

/// Placeholder for a quantity with no usable value
const PLACEHOLDER: &str = "---";

/// Everything a view reads in one tick
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub snapshot: &'a FixSnapshot,
    pub last_known: LastKnownPosition,
    /// Radio peer connected
    pub connected: bool,
}

/// Screen renderer for the display modes
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Course is hidden at or below this ground speed (km/h)
    heading_min_speed_kmh: f32,
}

impl Renderer {
    pub fn new(heading_min_speed_kmh: f32) -> Self {
        Self {
            heading_min_speed_kmh,
        }
    }

    /// Render the given mode
    pub fn render(&self, mode: DisplayMode, ctx: &ViewContext<'_>) -> DrawList {
        let mut frame = DrawList::new();
        frame.line(0, &status_line(mode, ctx.connected), ColorClass::Title);

        match mode {
            DisplayMode::Main => self.render_main(&mut frame, ctx),
            DisplayMode::Satellites => self.render_satellites(&mut frame, ctx),
            DisplayMode::SpeedAltitude => self.render_motion(&mut frame, ctx),
        }

        frame
    }

    /// Render the sensor fault screen that replaces every mode
    pub fn render_fault(&self, fault: FaultKind, bytes_processed: u32) -> DrawList {
        let mut frame = DrawList::new();
        let headline = match fault {
            FaultKind::NoSensorData => "NO GPS DATA",
            FaultKind::SensorSilent => "GPS SILENT",
        };
        frame.push(DrawCommand::new(
            1,
            0,
            headline,
            ColorClass::Alert,
            FontClass::Large,
        ));
        frame.line(4, "Check GPS wiring", ColorClass::Normal);
        frame.line(5, "TX->RX, power, GND", ColorClass::Muted);
        frame.line(7, &line(format_args!("Bytes: {}", bytes_processed)), ColorClass::Muted);
        frame
    }

    fn render_main(&self, frame: &mut DrawList, ctx: &ViewContext<'_>) {
        let snapshot = ctx.snapshot;

        // Live fix first, then the stored position greyed out
        let (coords, color) = match (snapshot.position(), ctx.last_known.get()) {
            (Some(live), _) => (Some(live), ColorClass::Normal),
            (None, Some(stale)) => (Some(stale), ColorClass::Muted),
            (None, None) => (None, ColorClass::Alert),
        };
        match coords {
            Some(Coordinates {
                latitude,
                longitude,
            }) => {
                frame.line(1, &line(format_args!("Lat {:.6}", latitude)), color);
                frame.line(2, &line(format_args!("Lon {:.6}", longitude)), color);
            }
            None => {
                frame.line(1, &line(format_args!("Lat {}", PLACEHOLDER)), color);
                frame.line(2, &line(format_args!("Lon {}", PLACEHOLDER)), color);
            }
        }

        let quality = snapshot.quality().get();
        match snapshot.satellites().get() {
            Some(sats) => frame.line(
                3,
                &line(format_args!(
                    "{} Sats {}",
                    quality.map_or(PLACEHOLDER, |q| q.label()),
                    sats
                )),
                satellite_color(sats),
            ),
            None => frame.line(
                3,
                &line(format_args!(
                    "{} Sats {}",
                    quality.map_or(PLACEHOLDER, |q| q.label()),
                    PLACEHOLDER
                )),
                ColorClass::Muted,
            ),
        }

        hdop_line(frame, 4, snapshot);

        match snapshot.time().get() {
            Some(t) => frame.line(
                5,
                &line(format_args!(
                    "UTC {:02}:{:02}:{:02}",
                    t.hour, t.minute, t.second
                )),
                ColorClass::Normal,
            ),
            None => frame.line(5, "UTC --:--:--", ColorClass::Muted),
        }
    }

    fn render_satellites(&self, frame: &mut DrawList, ctx: &ViewContext<'_>) {
        let snapshot = ctx.snapshot;

        match snapshot.satellites().get() {
            Some(sats) => frame.line(
                1,
                &line(format_args!("In use: {:02}", sats)),
                satellite_color(sats),
            ),
            None => frame.line(
                1,
                &line(format_args!("In use: {}", PLACEHOLDER)),
                ColorClass::Muted,
            ),
        }

        hdop_line(frame, 2, snapshot);

        match snapshot.quality().get() {
            Some(q) => frame.line(
                3,
                &line(format_args!("Fix: {}", q.label())),
                if q.has_fix() {
                    ColorClass::Normal
                } else {
                    ColorClass::Alert
                },
            ),
            None => frame.line(
                3,
                &line(format_args!("Fix: {}", PLACEHOLDER)),
                ColorClass::Muted,
            ),
        }

        frame.line(
            5,
            &line(format_args!("Bytes: {}", snapshot.bytes_processed())),
            ColorClass::Muted,
        );
        let failures = snapshot.checksum_failures();
        frame.line(
            6,
            &line(format_args!("Bad sum: {}", failures)),
            if failures > 0 {
                ColorClass::Moderate
            } else {
                ColorClass::Muted
            },
        );
    }

    fn render_motion(&self, frame: &mut DrawList, ctx: &ViewContext<'_>) {
        let snapshot = ctx.snapshot;
        let speed = snapshot.speed_kmh().get();

        match speed {
            Some(kmh) => frame.push(DrawCommand::new(
                1,
                0,
                &line(format_args!("{:.1} km/h", kmh)),
                ColorClass::Normal,
                FontClass::Large,
            )),
            None => frame.push(DrawCommand::new(
                1,
                0,
                &line(format_args!("{} km/h", PLACEHOLDER)),
                ColorClass::Muted,
                FontClass::Large,
            )),
        }

        match self.heading(snapshot) {
            Some(course) => frame.line(
                4,
                &line(format_args!(
                    "Hdg {:03} {}",
                    whole_degrees(course),
                    compass_point(course)
                )),
                ColorClass::Normal,
            ),
            None => frame.line(
                4,
                &line(format_args!("Hdg {}", PLACEHOLDER)),
                ColorClass::Muted,
            ),
        }

        match snapshot.altitude_m().get() {
            Some(alt) => frame.line(
                5,
                &line(format_args!("Alt {:.1} m", alt)),
                ColorClass::Normal,
            ),
            None => frame.line(
                5,
                &line(format_args!("Alt {}", PLACEHOLDER)),
                ColorClass::Muted,
            ),
        }
    }

    /// Course, only when it can be trusted
    fn heading(&self, snapshot: &FixSnapshot) -> Option<f32> {
        let speed = snapshot.speed_kmh().get()?;
        let course = snapshot.course_deg().get()?;
        if speed > self.heading_min_speed_kmh {
            Some(course)
        } else {
            None
        }
    }
}

/// Course rounded to whole degrees in 0..=359
fn whole_degrees(course_deg: f32) -> i32 {
    // Offset by a full turn so truncation rounds half up for negative input
    ((course_deg + 360.5) as i32).rem_euclid(360)
}

fn status_line(mode: DisplayMode, connected: bool) -> String<LINE_LEN> {
    line(format_args!(
        "{:<12}{}/{} {}",
        mode.name(),
        mode.index() + 1,
        DisplayMode::COUNT,
        if connected { "LINK" } else { "ADV" }
    ))
}

fn hdop_line(frame: &mut DrawList, row: u8, snapshot: &FixSnapshot) {
    match snapshot.hdop().get() {
        Some(hdop) => {
            let class = HdopClass::classify(hdop);
            frame.line(
                row,
                &line(format_args!("HDOP {:.1} {}", hdop, class.label())),
                class.color(),
            );
        }
        None => frame.line(
            row,
            &line(format_args!("HDOP {}", PLACEHOLDER)),
            ColorClass::Muted,
        ),
    }
}

/// Format one display line; output past the line width is dropped
fn line(args: fmt::Arguments<'_>) -> String<LINE_LEN> {
    let mut out = Truncating(String::new());
    let _ = out.write_fmt(args);
    out.0
}

struct Truncating(String<LINE_LEN>);

impl Write for Truncating {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.0.push(ch).is_err() {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{FeedReconciler, FieldUpdate};
    use crate::fix::{FixField, FixQuality, UtcTime};

    fn ctx(snapshot: &FixSnapshot, last_known: LastKnownPosition) -> ViewContext<'_> {
        ViewContext {
            snapshot,
            last_known,
            connected: false,
        }
    }

    fn with(updates: &[FieldUpdate]) -> FixSnapshot {
        let mut snapshot = FixSnapshot::new();
        for update in updates {
            FeedReconciler::apply(&mut snapshot, *update);
        }
        snapshot
    }

    #[test]
    fn test_status_line() {
        let renderer = Renderer::new(1.0);
        let snapshot = FixSnapshot::new();
        let mut context = ctx(&snapshot, LastKnownPosition::empty());
        context.connected = true;

        let frame = renderer.render(DisplayMode::Satellites, &context);
        let title = frame.at_row(0).unwrap();
        assert_eq!(title.text(), "SATELLITES  2/3 LINK");
        assert_eq!(title.color, ColorClass::Title);
    }

    #[test]
    fn test_live_position_normal_color() {
        let renderer = Renderer::new(1.0);
        let snapshot = with(&[FieldUpdate::Location(FixField::valid(Coordinates::new(
            37.422, -122.084,
        )))]);
        let frame = renderer.render(DisplayMode::Main, &ctx(&snapshot, LastKnownPosition::empty()));

        let lat = frame.at_row(1).unwrap();
        assert_eq!(lat.text(), "Lat 37.422000");
        assert_eq!(lat.color, ColorClass::Normal);
        assert_eq!(frame.at_row(2).unwrap().text(), "Lon -122.084000");
    }

    #[test]
    fn test_stale_position_is_muted() {
        let renderer = Renderer::new(1.0);
        let snapshot = FixSnapshot::new();
        let stored = LastKnownPosition::from_coordinates(Coordinates::new(51.5, -0.125));
        let frame = renderer.render(DisplayMode::Main, &ctx(&snapshot, stored));

        let lat = frame.at_row(1).unwrap();
        assert_eq!(lat.text(), "Lat 51.500000");
        assert_eq!(lat.color, ColorClass::Muted);
        assert_eq!(frame.at_row(2).unwrap().color, ColorClass::Muted);
    }

    #[test]
    fn test_no_position_placeholder() {
        let renderer = Renderer::new(1.0);
        let snapshot = FixSnapshot::new();
        let frame = renderer.render(DisplayMode::Main, &ctx(&snapshot, LastKnownPosition::empty()));
        assert_eq!(frame.at_row(1).unwrap().text(), "Lat ---");
        assert_eq!(frame.at_row(5).unwrap().text(), "UTC --:--:--");
    }

    #[test]
    fn test_main_quality_and_time() {
        let renderer = Renderer::new(1.0);
        let snapshot = with(&[
            FieldUpdate::Quality(FixField::valid(FixQuality::Dgps)),
            FieldUpdate::Satellites(FixField::valid(9)),
            FieldUpdate::Hdop(FixField::valid(0.9)),
            FieldUpdate::Time(FixField::valid(UtcTime::new(12, 35, 19, 0))),
        ]);
        let frame = renderer.render(DisplayMode::Main, &ctx(&snapshot, LastKnownPosition::empty()));

        let sats = frame.at_row(3).unwrap();
        assert_eq!(sats.text(), "DGPS Sats 9");
        assert_eq!(sats.color, ColorClass::Ideal);
        let hdop = frame.at_row(4).unwrap();
        assert_eq!(hdop.text(), "HDOP 0.9 IDEAL");
        assert_eq!(hdop.color, ColorClass::Ideal);
        assert_eq!(frame.at_row(5).unwrap().text(), "UTC 12:35:19");
    }

    #[test]
    fn test_heading_hidden_at_low_speed() {
        let renderer = Renderer::new(1.0);
        let snapshot = with(&[
            FieldUpdate::Speed(FixField::valid(0.8)),
            FieldUpdate::Course(FixField::valid(90.0)),
        ]);
        let frame = renderer.render(
            DisplayMode::SpeedAltitude,
            &ctx(&snapshot, LastKnownPosition::empty()),
        );
        assert_eq!(frame.at_row(4).unwrap().text(), "Hdg ---");
    }

    #[test]
    fn test_heading_hidden_without_valid_course() {
        let renderer = Renderer::new(1.0);
        let snapshot = with(&[FieldUpdate::Speed(FixField::valid(20.0))]);
        let frame = renderer.render(
            DisplayMode::SpeedAltitude,
            &ctx(&snapshot, LastKnownPosition::empty()),
        );
        assert_eq!(frame.at_row(4).unwrap().text(), "Hdg ---");
    }

    #[test]
    fn test_heading_shown_when_moving() {
        let renderer = Renderer::new(1.0);
        let snapshot = with(&[
            FieldUpdate::Speed(FixField::valid(12.34)),
            FieldUpdate::Course(FixField::valid(45.0)),
            FieldUpdate::Altitude(FixField::valid(545.4)),
        ]);
        let frame = renderer.render(
            DisplayMode::SpeedAltitude,
            &ctx(&snapshot, LastKnownPosition::empty()),
        );
        let speed = frame.at_row(1).unwrap();
        assert_eq!(speed.text(), "12.3 km/h");
        assert_eq!(speed.font, FontClass::Large);
        assert_eq!(frame.at_row(4).unwrap().text(), "Hdg 045 NE");
        assert_eq!(frame.at_row(5).unwrap().text(), "Alt 545.4 m");
    }

    #[test]
    fn test_heading_wraps_to_north() {
        let renderer = Renderer::new(1.0);
        let snapshot = with(&[
            FieldUpdate::Speed(FixField::valid(10.0)),
            FieldUpdate::Course(FixField::valid(359.6)),
        ]);
        let frame = renderer.render(
            DisplayMode::SpeedAltitude,
            &ctx(&snapshot, LastKnownPosition::empty()),
        );
        assert_eq!(frame.at_row(4).unwrap().text(), "Hdg 000 N");
    }

    #[test]
    fn test_whole_degrees() {
        assert_eq!(whole_degrees(0.0), 0);
        assert_eq!(whole_degrees(44.6), 45);
        assert_eq!(whole_degrees(359.4), 359);
        assert_eq!(whole_degrees(359.6), 0);
        assert_eq!(whole_degrees(360.0), 0);
    }

    #[test]
    fn test_satellite_diagnostics() {
        let renderer = Renderer::new(1.0);
        let mut snapshot = with(&[
            FieldUpdate::Satellites(FixField::valid(3)),
            FieldUpdate::Hdop(FixField::valid(6.5)),
            FieldUpdate::Quality(FixField::valid(FixQuality::NoFix)),
        ]);
        snapshot.sync_counters(4096, 2);
        let frame = renderer.render(
            DisplayMode::Satellites,
            &ctx(&snapshot, LastKnownPosition::empty()),
        );

        let sats = frame.at_row(1).unwrap();
        assert_eq!(sats.text(), "In use: 03");
        assert_eq!(sats.color, ColorClass::Moderate);
        assert_eq!(frame.at_row(2).unwrap().color, ColorClass::Moderate);
        assert_eq!(frame.at_row(3).unwrap().color, ColorClass::Alert);
        assert_eq!(frame.at_row(5).unwrap().text(), "Bytes: 4096");
        assert_eq!(frame.at_row(6).unwrap().text(), "Bad sum: 2");
    }

    #[test]
    fn test_fault_screen() {
        let renderer = Renderer::new(1.0);
        let frame = renderer.render_fault(FaultKind::NoSensorData, 3);
        let headline = frame.find("NO GPS DATA").unwrap();
        assert_eq!(headline.color, ColorClass::Alert);
        assert!(frame.find("Bytes: 3").is_some());

        let frame = renderer.render_fault(FaultKind::SensorSilent, 900);
        assert!(frame.find("GPS SILENT").is_some());
    }

    #[test]
    fn test_line_truncates() {
        let text = line(format_args!("{}", "abcdefghijklmnopqrstuvwxyz"));
        assert_eq!(text.len(), LINE_LEN);
    }
}
