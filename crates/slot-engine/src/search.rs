//! Best-meeting-time search across a set of zones.
//!
//! For one UTC calendar day the engine walks a fixed grid of candidate
//! instants, asks the [`CivilTimeOracle`] for every zone's local hour at each
//! one, and scores the candidate by how many zones land inside the
//! [`WorkingHoursWindow`]. The result is a short ranked list:
//!
//! 1. Candidates covering every zone, or at least 75% of them (rounded up),
//!    are *qualified*. If any exist they are ranked by coverage, highest
//!    first, then by time of day.
//! 2. Otherwise every candidate is a *fallback*, ranked by total distance
//!    from the window, then coverage, then time of day.
//!
//! The search is a pure function of its inputs: no clock reads, no caching
//! across calls, and identical inputs always produce identical output.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use slot_engine::{find_best_slots, TzdbOracle, WorkingHoursWindow, Zone};
//!
//! let zones = vec![
//!     Zone::new("Europe/London", "London"),
//!     Zone::new("Europe/Berlin", "Berlin"),
//! ];
//! let day = Utc.with_ymd_and_hms(2026, 1, 15, 18, 45, 0).unwrap();
//!
//! let slots = find_best_slots(&TzdbOracle, &zones, day, WorkingHoursWindow::default()).unwrap();
//! assert_eq!(slots.len(), 3);
//! assert!(slots[0].is_perfect());
//! // 07:00 UTC is 07:00 in London and 08:00 in Berlin
//! assert_eq!(slots[0].instant.to_rfc3339(), "2026-01-15T07:00:00+00:00");
//! ```

use std::cmp::Ordering;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SlotError;
use crate::oracle::CivilTimeOracle;
use crate::window::WorkingHoursWindow;
use crate::zone::Zone;

/// Minutes between consecutive candidates unless configured otherwise.
pub const DEFAULT_GRANULARITY_MINUTES: u32 = 30;
/// How many ranked slots a search returns unless configured otherwise.
pub const DEFAULT_MAX_RESULTS: usize = 3;

const MINUTES_PER_DAY: u32 = 24 * 60;

// ── Options ─────────────────────────────────────────────────────────────────

/// Tuning for [`find_best_slots_with_options`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchOptions {
    /// Civil hours that count as acceptable meeting time.
    pub window: WorkingHoursWindow,
    /// Step between candidate instants. Must divide a day evenly.
    pub granularity_minutes: u32,
    /// Upper bound on the number of returned slots.
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            window: WorkingHoursWindow::default(),
            granularity_minutes: DEFAULT_GRANULARITY_MINUTES,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl SearchOptions {
    /// Default options with a different window.
    pub fn with_window(window: WorkingHoursWindow) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), SlotError> {
        let g = self.granularity_minutes;
        if g == 0 || MINUTES_PER_DAY % g != 0 {
            return Err(SlotError::InvalidGranularity(format!(
                "{g} minutes does not divide a day evenly"
            )));
        }
        Ok(())
    }
}

// ── Results ─────────────────────────────────────────────────────────────────

/// One zone's view of a candidate instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneHour {
    pub zone_id: String,
    pub label: String,
    /// Local civil hour (0-23) at the candidate instant.
    pub hour: u32,
    /// Whether `hour` falls inside the working-hours window.
    pub in_window: bool,
}

/// An evaluated candidate instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedSlot {
    /// The candidate instant in UTC.
    pub instant: DateTime<Utc>,
    /// Per-zone breakdown, in the same order as the input zones.
    pub zones: Vec<ZoneHour>,
    /// Number of zones inside the window.
    pub match_count: usize,
    /// Sum of the linear distances of out-of-window zones to the window.
    pub distance_score: u32,
    /// Whether the candidate met the coverage threshold.
    pub is_qualified: bool,
}

impl RankedSlot {
    /// Every zone is inside the window.
    pub fn is_perfect(&self) -> bool {
        self.match_count == self.zones.len()
    }
}

/// How a presentation layer should badge the top of a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotLabel {
    /// The first slot is qualified and covers every zone.
    BestMatch,
    /// Nothing reached the coverage threshold; the first slot is only the
    /// closest fallback.
    ClosestMatch,
}

/// Label for the first entry of a ranked list, if it deserves one.
pub fn headline(slots: &[RankedSlot]) -> Option<SlotLabel> {
    let first = slots.first()?;
    if first.is_qualified && first.is_perfect() {
        Some(SlotLabel::BestMatch)
    } else if !slots.iter().any(|s| s.is_qualified) {
        Some(SlotLabel::ClosestMatch)
    } else {
        None
    }
}

// ── Search ──────────────────────────────────────────────────────────────────

/// Find the best meeting slots on the UTC day of `reference` with the default
/// 30-minute grid and 3 results.
///
/// # Errors
///
/// Propagates the first oracle failure (e.g., [`SlotError::InvalidTimezone`]
/// for an unknown zone). No partial results are returned.
pub fn find_best_slots<O>(
    oracle: &O,
    zones: &[Zone],
    reference: DateTime<Utc>,
    window: WorkingHoursWindow,
) -> Result<Vec<RankedSlot>, SlotError>
where
    O: CivilTimeOracle + ?Sized,
{
    find_best_slots_with_options(oracle, zones, reference, &SearchOptions::with_window(window))
}

/// Find the best meeting slots on the UTC day of `reference`.
///
/// Fewer than two zones yields an empty list without consulting the oracle.
///
/// # Errors
///
/// Returns [`SlotError::InvalidGranularity`] for a step that does not divide
/// a day, and propagates the first oracle failure.
pub fn find_best_slots_with_options<O>(
    oracle: &O,
    zones: &[Zone],
    reference: DateTime<Utc>,
    options: &SearchOptions,
) -> Result<Vec<RankedSlot>, SlotError>
where
    O: CivilTimeOracle + ?Sized,
{
    options.validate()?;
    if zones.len() < 2 {
        return Ok(Vec::new());
    }

    let threshold = qualify_threshold(zones.len());
    let mut qualified = Vec::new();
    let mut fallback = Vec::new();

    for instant in candidate_instants(reference, options.granularity_minutes) {
        let slot = evaluate(oracle, zones, instant, &options.window, threshold)?;
        if slot.is_qualified {
            qualified.push(slot);
        } else {
            fallback.push(slot);
        }
    }

    tracing::debug!(
        zones = zones.len(),
        candidates = qualified.len() + fallback.len(),
        qualified = qualified.len(),
        "evaluated meeting slot candidates"
    );

    let mut ranked = if qualified.is_empty() {
        fallback.sort_by(rank_fallback);
        fallback
    } else {
        qualified.sort_by(rank_qualified);
        qualified
    };
    ranked.truncate(options.max_results);
    Ok(ranked)
}

/// Matches needed to qualify: all zones, or `ceil(0.75 * n)`.
fn qualify_threshold(zone_count: usize) -> usize {
    (zone_count * 3).div_ceil(4)
}

/// Grid instants from UTC midnight of `reference`'s date, `step` minutes apart.
fn candidate_instants(reference: DateTime<Utc>, step: u32) -> impl Iterator<Item = DateTime<Utc>> {
    let midnight = reference
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc();
    (0..MINUTES_PER_DAY / step).map(move |i| midnight + Duration::minutes(i64::from(i * step)))
}

fn evaluate<O>(
    oracle: &O,
    zones: &[Zone],
    instant: DateTime<Utc>,
    window: &WorkingHoursWindow,
    threshold: usize,
) -> Result<RankedSlot, SlotError>
where
    O: CivilTimeOracle + ?Sized,
{
    let mut breakdown = Vec::with_capacity(zones.len());
    let mut match_count = 0;
    let mut distance_score = 0;

    for zone in zones {
        let hour = oracle.local_hour_at(instant, &zone.zone_id)?;
        let in_window = window.contains(hour);
        if in_window {
            match_count += 1;
        } else {
            distance_score += window.distance(hour);
        }
        breakdown.push(ZoneHour {
            zone_id: zone.zone_id.clone(),
            label: zone.label.clone(),
            hour,
            in_window,
        });
    }

    let is_qualified = match_count == zones.len() || match_count >= threshold;
    Ok(RankedSlot {
        instant,
        zones: breakdown,
        match_count,
        distance_score,
        is_qualified,
    })
}

fn rank_qualified(a: &RankedSlot, b: &RankedSlot) -> Ordering {
    b.match_count
        .cmp(&a.match_count)
        .then_with(|| a.instant.cmp(&b.instant))
}

fn rank_fallback(a: &RankedSlot, b: &RankedSlot) -> Ordering {
    a.distance_score
        .cmp(&b.distance_score)
        .then_with(|| b.match_count.cmp(&a.match_count))
        .then_with(|| a.instant.cmp(&b.instant))
}

// ── Reference parsing ───────────────────────────────────────────────────────

/// Parse a search reference: an RFC 3339 instant, or a bare `YYYY-MM-DD`
/// date read as UTC midnight.
///
/// # Errors
///
/// Returns [`SlotError::InvalidDatetime`] if neither form parses.
pub fn parse_reference(s: &str) -> Result<DateTime<Utc>, SlotError> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|e| SlotError::InvalidDatetime(format!("'{}': {}", s, e)))
}

// ── Tests ───────────────────────────────────────────────────────────────────
