//! The working-hours window: a half-open civil-hour interval `[start, end)`.

use serde::{Deserialize, Serialize};

use crate::error::SlotError;

/// Default first working hour (07:00).
pub const DEFAULT_START_HOUR: u32 = 7;
/// Default end of the working day (17:00, exclusive).
pub const DEFAULT_END_HOUR: u32 = 17;

/// A half-open interval of civil hours on a 24-hour clock.
///
/// An hour `h` is inside the window iff `start <= h < end`. The bounds are
/// validated on construction (and on deserialization), so a window value is
/// always well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct WorkingHoursWindow {
    start: u32,
    end: u32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWindow {
    start: u32,
    end: u32,
}

impl TryFrom<RawWindow> for WorkingHoursWindow {
    type Error = SlotError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        WorkingHoursWindow::new(raw.start, raw.end)
    }
}

impl Default for WorkingHoursWindow {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_HOUR,
            end: DEFAULT_END_HOUR,
        }
    }
}

impl WorkingHoursWindow {
    /// Build a window, rejecting `start >= end` and bounds past 24.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidWindow`] for a malformed interval. Nothing
    /// is clamped.
    pub fn new(start: u32, end: u32) -> Result<Self, SlotError> {
        if start >= 24 {
            return Err(SlotError::InvalidWindow(format!(
                "start hour {start} is outside 0..24"
            )));
        }
        if end > 24 {
            return Err(SlotError::InvalidWindow(format!(
                "end hour {end} is past 24"
            )));
        }
        if start >= end {
            return Err(SlotError::InvalidWindow(format!(
                "start hour {start} must be before end hour {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Whether a civil hour falls inside the window.
    pub fn contains(&self, hour: u32) -> bool {
        hour >= self.start && hour < self.end
    }

    /// Hours between `hour` and the nearest window boundary, 0 when inside.
    ///
    /// The clock is read linearly within one day: an hour before the window
    /// measures up to `start`, an hour at or after `end` measures past it
    /// (`hour - end + 1`). There is no wrap-around, so 23:00 against
    /// `[7, 17)` scores 7, not the 8 hours to the next morning.
    pub fn distance(&self, hour: u32) -> u32 {
        if hour < self.start {
            self.start - hour
        } else if hour >= self.end {
            hour - self.end + 1
        } else {
            0
        }
    }
}

impl std::fmt::Display for WorkingHoursWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:00-{:02}:00", self.start, self.end)
    }
}
