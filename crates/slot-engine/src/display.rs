//! Clock rendering for a zone at an instant.
//!
//! These helpers produce the strings a zone card or slot list shows: the
//! wall-clock time, the local date, the zone abbreviation and numeric
//! offset, and a short note on how far an hour sits from the working window.

use chrono::{DateTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::error::SlotError;
use crate::oracle::parse_timezone;
use crate::window::WorkingHoursWindow;
use crate::zone::Zone;

/// How to render a wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClockStyle {
    /// `14:05` instead of `02:05 PM`.
    pub use_24_hour: bool,
    /// Append `:ss`.
    pub show_seconds: bool,
}

/// Everything a zone card shows for one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneClock {
    pub zone_id: String,
    pub label: String,
    /// Wall-clock time, e.g. `"09:30 AM"`.
    pub time: String,
    /// Local date, e.g. `"Thu, Jan 15"`.
    pub date: String,
    /// Zone abbreviation at this instant, e.g. `"EST"`.
    pub abbreviation: String,
    /// Numeric UTC offset, e.g. `"-05:00"`.
    pub utc_offset: String,
    /// Last segment of the identifier, e.g. `"New York"`.
    pub city: String,
}

/// Render the wall-clock time of `zone_id` at `instant`.
pub fn format_clock(
    instant: DateTime<Utc>,
    zone_id: &str,
    style: ClockStyle,
) -> Result<String, SlotError> {
    let tz = parse_timezone(zone_id)?;
    let pattern = match (style.use_24_hour, style.show_seconds) {
        (true, false) => "%H:%M",
        (true, true) => "%H:%M:%S",
        (false, false) => "%I:%M %p",
        (false, true) => "%I:%M:%S %p",
    };
    Ok(instant.with_timezone(&tz).format(pattern).to_string())
}

/// Render the local date of `zone_id` at `instant` (`"Thu, Jan 15"`).
pub fn format_date(instant: DateTime<Utc>, zone_id: &str) -> Result<String, SlotError> {
    let tz = parse_timezone(zone_id)?;
    Ok(instant.with_timezone(&tz).format("%a, %b %-d").to_string())
}

/// The zone's abbreviation in effect at `instant` (`"EST"`, `"CEST"`, or a
/// numeric form like `"+0545"` for zones without one).
pub fn offset_label(instant: DateTime<Utc>, zone_id: &str) -> Result<String, SlotError> {
    let tz = parse_timezone(zone_id)?;
    Ok(instant.with_timezone(&tz).format("%Z").to_string())
}

/// Format the UTC offset as a string (e.g., "-05:00", "+05:45").
pub fn format_utc_offset<T: TimeZone>(dt: &DateTime<T>) -> String {
    let offset_secs = dt.offset().fix().local_minus_utc();
    let sign = if offset_secs >= 0 { "+" } else { "-" };
    let abs_secs = offset_secs.unsigned_abs();
    let hours = abs_secs / 3600;
    let minutes = (abs_secs % 3600) / 60;
    format!("{sign}{hours:02}:{minutes:02}")
}

/// Where an hour sits relative to the window: `"Working hours"`,
/// `"3h before"` or `"2h after"`.
pub fn describe_hour(hour: u32, window: &WorkingHoursWindow) -> String {
    if window.contains(hour) {
        "Working hours".to_string()
    } else if hour < window.start() {
        format!("{}h before", window.distance(hour))
    } else {
        format!("{}h after", window.distance(hour))
    }
}

/// Build the card for `zone` at `instant`.
pub fn zone_clock(
    instant: DateTime<Utc>,
    zone: &Zone,
    style: ClockStyle,
) -> Result<ZoneClock, SlotError> {
    let tz = parse_timezone(&zone.zone_id)?;
    let local = instant.with_timezone(&tz);

    Ok(ZoneClock {
        zone_id: zone.zone_id.clone(),
        label: zone.label.clone(),
        time: format_clock(instant, &zone.zone_id, style)?,
        date: format_date(instant, &zone.zone_id)?,
        abbreviation: offset_label(instant, &zone.zone_id)?,
        utc_offset: format_utc_offset(&local),
        city: catalog::short_name(&zone.zone_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, h, m, s).unwrap()
    }

    #[test]
    fn test_format_clock_12_hour() {
        let style = ClockStyle::default();
        assert_eq!(format_clock(at(14, 30, 0), "America/New_York", style).unwrap(), "09:30 AM");
        assert_eq!(format_clock(at(5, 0, 0), "UTC", style).unwrap(), "05:00 AM");
        assert_eq!(format_clock(at(0, 0, 0), "UTC", style).unwrap(), "12:00 AM");
        assert_eq!(format_clock(at(13, 5, 0), "UTC", style).unwrap(), "01:05 PM");
    }

    #[test]
    fn test_format_clock_24_hour_with_seconds() {
        let style = ClockStyle {
            use_24_hour: true,
            show_seconds: true,
        };
        assert_eq!(format_clock(at(14, 30, 9), "Asia/Tokyo", style).unwrap(), "23:30:09");
    }

    #[test]
    fn test_format_date_crosses_midnight() {
        // 20:00 UTC on Thu Jan 15 is Fri Jan 16 in Tokyo
        assert_eq!(format_date(at(20, 0, 0), "Asia/Tokyo").unwrap(), "Fri, Jan 16");
        assert_eq!(format_date(at(20, 0, 0), "America/New_York").unwrap(), "Thu, Jan 15");
    }

    #[test]
    fn test_offset_label() {
        assert_eq!(offset_label(at(12, 0, 0), "America/New_York").unwrap(), "EST");
        assert_eq!(offset_label(at(12, 0, 0), "Asia/Tokyo").unwrap(), "JST");
    }

    #[test]
    fn test_format_utc_offset_quarter_hour() {
        let tz = parse_timezone("Asia/Kathmandu").unwrap();
        assert_eq!(format_utc_offset(&at(0, 0, 0).with_timezone(&tz)), "+05:45");
        let tz = parse_timezone("America/St_Johns").unwrap();
        assert_eq!(format_utc_offset(&at(0, 0, 0).with_timezone(&tz)), "-03:30");
    }

    #[test]
    fn test_describe_hour() {
        let window = WorkingHoursWindow::default();
        assert_eq!(describe_hour(9, &window), "Working hours");
        assert_eq!(describe_hour(2, &window), "5h before");
        assert_eq!(describe_hour(17, &window), "1h after");
        assert_eq!(describe_hour(23, &window), "7h after");
    }

    #[test]
    fn test_zone_clock() {
        let zone = Zone::new("America/New_York", "New York");
        let card = zone_clock(at(14, 30, 0), &zone, ClockStyle::default()).unwrap();
        assert_eq!(card.time, "09:30 AM");
        assert_eq!(card.date, "Thu, Jan 15");
        assert_eq!(card.abbreviation, "EST");
        assert_eq!(card.utc_offset, "-05:00");
        assert_eq!(card.city, "New York");
        assert_eq!(card.label, "New York");
    }

    #[test]
    fn test_zone_clock_unknown_zone() {
        let zone = Zone::new("Nowhere/Special", "?");
        assert!(zone_clock(at(0, 0, 0), &zone, ClockStyle::default()).is_err());
    }
}
