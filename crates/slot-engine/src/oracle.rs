//! Civil-time resolution: which wall-clock hour a zone shows at an instant.
//!
//! The search engine never reads a time-zone database directly. It asks a
//! [`CivilTimeOracle`] for one hour at a time and treats zone identifiers as
//! opaque strings. [`TzdbOracle`] answers from the IANA database bundled by
//! `chrono-tz`, which covers DST rules and the `Etc/GMT±N` fixed offsets used
//! for UTC pseudo-zones.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::SlotError;

/// Resolves the local civil hour of a zone at an absolute instant.
pub trait CivilTimeOracle {
    /// The zone's wall-clock hour (0-23) at `instant`.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidTimezone`] when `zone_id` cannot be
    /// resolved.
    fn local_hour_at(&self, instant: DateTime<Utc>, zone_id: &str) -> Result<u32, SlotError>;
}

impl<O: CivilTimeOracle + ?Sized> CivilTimeOracle for &O {
    fn local_hour_at(&self, instant: DateTime<Utc>, zone_id: &str) -> Result<u32, SlotError> {
        (**self).local_hour_at(instant, zone_id)
    }
}

/// Oracle backed by the IANA time-zone database.
#[derive(Debug, Clone, Copy, Default)]
pub struct TzdbOracle;

impl CivilTimeOracle for TzdbOracle {
    fn local_hour_at(&self, instant: DateTime<Utc>, zone_id: &str) -> Result<u32, SlotError> {
        let tz = parse_timezone(zone_id)?;
        Ok(instant.with_timezone(&tz).hour())
    }
}

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(s: &str) -> Result<Tz, SlotError> {
    s.parse::<Tz>()
        .map_err(|_| SlotError::InvalidTimezone(format!("'{}'", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_new_york_winter_hour() {
        // Jan 15 is EST (UTC-5)
        let hour = TzdbOracle
            .local_hour_at(at(2026, 1, 15, 14, 0), "America/New_York")
            .unwrap();
        assert_eq!(hour, 9);
    }

    #[test]
    fn test_new_york_summer_hour() {
        // Jul 15 is EDT (UTC-4)
        let hour = TzdbOracle
            .local_hour_at(at(2026, 7, 15, 14, 0), "America/New_York")
            .unwrap();
        assert_eq!(hour, 10);
    }

    #[test]
    fn test_tokyo_crosses_calendar_day() {
        // 20:00 UTC on the 15th is 05:00 on the 16th in Tokyo
        let hour = TzdbOracle
            .local_hour_at(at(2026, 1, 15, 20, 0), "Asia/Tokyo")
            .unwrap();
        assert_eq!(hour, 5);
    }

    #[test]
    fn test_quarter_hour_offset() {
        // Kathmandu is UTC+5:45; 03:30 UTC is 09:15 local
        let hour = TzdbOracle
            .local_hour_at(at(2026, 1, 15, 3, 30), "Asia/Kathmandu")
            .unwrap();
        assert_eq!(hour, 9);
    }

    #[test]
    fn test_etc_gmt_sign_is_inverted() {
        // Etc/GMT-5 is five hours *ahead* of UTC
        let hour = TzdbOracle
            .local_hour_at(at(2026, 1, 15, 10, 0), "Etc/GMT-5")
            .unwrap();
        assert_eq!(hour, 15);
    }

    #[test]
    fn test_unknown_zone_is_error() {
        let err = TzdbOracle
            .local_hour_at(at(2026, 1, 15, 10, 0), "Mars/Olympus_Mons")
            .unwrap_err()
            .to_string();
        assert!(err.contains("Invalid timezone"), "got: {err}");
        assert!(err.contains("Mars/Olympus_Mons"), "got: {err}");
    }

    #[test]
    fn test_oracle_by_reference() {
        let oracle = TzdbOracle;
        let by_ref: &dyn CivilTimeOracle = &oracle;
        assert_eq!(
            by_ref.local_hour_at(at(2026, 1, 15, 0, 0), "UTC").unwrap(),
            0
        );
    }
}
