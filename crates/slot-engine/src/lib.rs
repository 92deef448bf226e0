//! # slot-engine
//!
//! Deterministic best-meeting-time search across time zones.
//!
//! Given a set of zones and a reference day, the engine scans the day on a
//! fixed grid, checks which zones are inside working hours at each candidate
//! instant, and returns a short ranked list of the best slots, falling back
//! to the closest slots when no acceptable overlap exists.
//!
//! ## Modules
//!
//! - [`search`] — Candidate grid, scoring, qualification and ranking
//! - [`oracle`] — Civil-hour lookup for a zone at an instant (tz database)
//! - [`window`] — Half-open working-hours window
//! - [`zone`] — Zones and the duplicate-free zone list
//! - [`catalog`] — Popular cities, UTC-offset pseudo-zones, full tz listing
//! - [`store`] — Key-value persistence, usage counts, preferences
//! - [`display`] — Clock, date and offset rendering for zone cards
//! - [`error`] — Error types

pub mod catalog;
pub mod display;
pub mod error;
pub mod oracle;
pub mod search;
pub mod store;
pub mod window;
pub mod zone;

pub use catalog::CatalogEntry;
pub use display::{describe_hour, zone_clock, ClockStyle, ZoneClock};
pub use error::SlotError;
pub use oracle::{CivilTimeOracle, TzdbOracle};
pub use search::{
    find_best_slots, find_best_slots_with_options, headline, parse_reference, RankedSlot,
    SearchOptions, SlotLabel, ZoneHour,
};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, Preferences, UsageTracker};
pub use window::WorkingHoursWindow;
pub use zone::{Zone, ZoneList};
