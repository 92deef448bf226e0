//! Static catalog of zones a user can pick from.
//!
//! Four views over the same tz database:
//!
//! - [`popular`] — a curated city list, including half- and quarter-hour
//!   offset zones
//! - [`utc_offsets`] — `UTC-12` … `UTC+12` pseudo-zones backed by `Etc/GMT`
//!   identifiers
//! - [`all_zones`] — every canonical identifier `chrono-tz` knows, with
//!   readable labels
//! - [`region_zones`] — one representative zone per region
//!
//! plus helpers to search and to order by how often a zone has been picked.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::error::SlotError;

/// A pickable zone: the identifier handed to the oracle and a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub zone_id: String,
    pub label: String,
}

impl CatalogEntry {
    fn new(zone_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            zone_id: zone_id.into(),
            label: label.into(),
        }
    }
}

const POPULAR: &[(&str, &str)] = &[
    ("America/New_York", "New York"),
    ("America/Los_Angeles", "Los Angeles"),
    ("America/Chicago", "Chicago"),
    ("Europe/London", "London"),
    ("Asia/Tokyo", "Tokyo"),
    ("Europe/Paris", "Paris"),
    ("Asia/Shanghai", "Shanghai"),
    ("America/Denver", "Denver"),
    ("Europe/Berlin", "Berlin"),
    ("Asia/Dubai", "Dubai"),
    ("Australia/Sydney", "Sydney"),
    ("America/Toronto", "Toronto"),
    ("Asia/Singapore", "Singapore"),
    ("Asia/Kolkata", "New Delhi (India)"),
    ("Asia/Seoul", "Seoul"),
    ("Asia/Hong_Kong", "Hong Kong"),
    ("Europe/Moscow", "Moscow"),
    ("America/Mexico_City", "Mexico City"),
    ("America/Sao_Paulo", "São Paulo"),
    ("America/Argentina/Buenos_Aires", "Buenos Aires"),
    ("Africa/Cairo", "Cairo"),
    ("Asia/Bangkok", "Bangkok"),
    ("Europe/Rome", "Rome"),
    ("Europe/Madrid", "Madrid"),
    ("America/Vancouver", "Vancouver"),
    ("America/Phoenix", "Phoenix"),
    ("Europe/Amsterdam", "Amsterdam"),
    ("Europe/Brussels", "Brussels"),
    ("Europe/Dublin", "Dublin"),
    ("Europe/Lisbon", "Lisbon"),
    ("Europe/Stockholm", "Stockholm"),
    ("Europe/Vienna", "Vienna"),
    ("Europe/Zurich", "Zurich"),
    ("Europe/Athens", "Athens"),
    ("Europe/Prague", "Prague"),
    ("Europe/Warsaw", "Warsaw"),
    ("Asia/Jakarta", "Jakarta"),
    ("Asia/Manila", "Manila"),
    ("Asia/Kuala_Lumpur", "Kuala Lumpur"),
    ("Asia/Taipei", "Taipei"),
    ("Asia/Dhaka", "Dhaka"),
    ("Asia/Karachi", "Karachi"),
    ("Asia/Tehran", "Tehran (Iran)"),
    ("Asia/Jerusalem", "Jerusalem"),
    ("Asia/Riyadh", "Riyadh"),
    ("Asia/Ho_Chi_Minh", "Ho Chi Minh City"),
    ("Australia/Melbourne", "Melbourne"),
    ("Australia/Perth", "Perth"),
    ("Australia/Brisbane", "Brisbane"),
    ("Pacific/Auckland", "Auckland"),
    ("Pacific/Honolulu", "Honolulu"),
    ("America/Santiago", "Santiago"),
    ("America/Bogota", "Bogotá"),
    ("America/Lima", "Lima"),
    ("America/Caracas", "Caracas"),
    ("Africa/Johannesburg", "Johannesburg"),
    ("Africa/Lagos", "Lagos"),
    ("Africa/Nairobi", "Nairobi"),
    // Half- and quarter-hour offsets
    ("Asia/Colombo", "Colombo (Sri Lanka)"),
    ("Asia/Kabul", "Kabul (Afghanistan)"),
    ("Asia/Kathmandu", "Kathmandu (Nepal)"),
    ("Asia/Yangon", "Yangon (Myanmar)"),
    ("America/St_Johns", "St. John's (Canada)"),
    ("Australia/Adelaide", "Adelaide"),
    ("Australia/Darwin", "Darwin"),
    ("Australia/Eucla", "Eucla (Australia)"),
    ("Pacific/Chatham", "Chatham Islands (NZ)"),
];

/// Labels for zones whose last path segment reads poorly on its own.
const KNOWN_LABELS: &[(&str, &str)] = &[
    ("Asia/Kolkata", "Kolkata (India)"),
    ("Asia/Calcutta", "Calcutta (India)"),
    ("Asia/Colombo", "Colombo (Sri Lanka)"),
    ("Asia/Kabul", "Kabul (Afghanistan)"),
    ("Asia/Kathmandu", "Kathmandu (Nepal)"),
    ("Asia/Yangon", "Yangon (Myanmar)"),
    ("Asia/Tehran", "Tehran (Iran)"),
    ("America/St_Johns", "St. John's (Canada)"),
    ("Australia/Adelaide", "Adelaide (Australia)"),
    ("Australia/Darwin", "Darwin (Australia)"),
    ("Australia/Eucla", "Eucla (Australia)"),
    ("Pacific/Chatham", "Chatham Islands (New Zealand)"),
];

/// Cities preferred as the representative of their region in [`region_zones`].
const MAJOR_CITIES: &[&str] = &[
    // America
    "washington", "new_york", "los_angeles", "chicago", "toronto", "vancouver", "miami",
    "mexico_city", "lima", "bogota", "buenos_aires", "santiago", "sao_paulo", "caracas",
    "rio_de_janeiro",
    // Europe
    "london", "paris", "berlin", "rome", "madrid", "amsterdam", "brussels", "vienna",
    "stockholm", "warsaw", "athens", "prague", "dublin", "lisbon", "zurich", "oslo",
    "copenhagen", "helsinki", "budapest", "bucharest", "sofia", "belgrade", "zagreb", "kyiv",
    "minsk",
    // Asia
    "tokyo", "beijing", "shanghai", "seoul", "hong_kong", "singapore", "bangkok", "mumbai",
    "kolkata", "delhi", "jakarta", "manila", "kuala_lumpur", "taipei", "dhaka", "karachi",
    "tehran", "riyadh", "dubai", "jerusalem", "baghdad", "ankara", "tashkent", "almaty",
    "ulaanbaatar", "phnom_penh", "vientiane", "yangon", "kathmandu", "colombo",
    // Africa
    "cairo", "lagos", "johannesburg", "nairobi", "addis_ababa", "dar_es_salaam", "kinshasa",
    "casablanca", "tunis", "algiers", "dakar", "abidjan", "accra", "kampala", "khartoum",
    // Oceania and Pacific
    "sydney", "melbourne", "adelaide", "darwin", "perth", "brisbane", "auckland", "wellington",
    "honolulu", "fiji", "papua_new_guinea", "noumea",
];

/// Areas whose `Area/City` identifiers make up the browsable tz listing.
const CANONICAL_AREAS: &[&str] = &[
    "Africa", "America", "Antarctica", "Arctic", "Asia", "Atlantic", "Australia", "Europe",
    "Indian", "Pacific",
];

/// Backward-compatibility links that live inside the canonical areas.
const LEGACY_LINKS: &[&str] = &[
    "Africa/Asmera", "Africa/Timbuktu",
    "America/Argentina/ComodRivadavia", "America/Atka", "America/Buenos_Aires",
    "America/Catamarca", "America/Coral_Harbour", "America/Cordoba", "America/Ensenada",
    "America/Fort_Wayne", "America/Godthab", "America/Indianapolis", "America/Jujuy",
    "America/Knox_IN", "America/Louisville", "America/Mendoza", "America/Montreal",
    "America/Nipigon", "America/Pangnirtung", "America/Porto_Acre", "America/Rainy_River",
    "America/Rosario", "America/Santa_Isabel", "America/Shiprock", "America/Thunder_Bay",
    "America/Virgin", "America/Yellowknife",
    "Antarctica/South_Pole",
    "Asia/Ashkhabad", "Asia/Calcutta", "Asia/Chongqing", "Asia/Chungking", "Asia/Dacca",
    "Asia/Harbin", "Asia/Istanbul", "Asia/Kashgar", "Asia/Katmandu", "Asia/Macao",
    "Asia/Rangoon", "Asia/Saigon", "Asia/Tel_Aviv", "Asia/Thimbu", "Asia/Ujung_Pandang",
    "Asia/Ulan_Bator",
    "Atlantic/Faeroe", "Atlantic/Jan_Mayen",
    "Australia/ACT", "Australia/Canberra", "Australia/Currie", "Australia/LHI",
    "Australia/NSW", "Australia/North", "Australia/Queensland", "Australia/South",
    "Australia/Tasmania", "Australia/Victoria", "Australia/West", "Australia/Yancowinna",
    "Europe/Belfast", "Europe/Kiev", "Europe/Nicosia", "Europe/Tiraspol", "Europe/Uzhgorod",
    "Europe/Zaporozhye",
    "Pacific/Enderbury", "Pacific/Johnston", "Pacific/Ponape", "Pacific/Samoa", "Pacific/Truk",
    "Pacific/Yap",
];

/// Range of whole-hour offsets offered as pseudo-zones.
pub const UTC_OFFSET_RANGE: std::ops::RangeInclusive<i32> = -12..=12;

// ── Catalog views ───────────────────────────────────────────────────────────

/// The curated popular-city list, in its fixed order.
pub fn popular() -> Vec<CatalogEntry> {
    POPULAR
        .iter()
        .map(|(id, label)| CatalogEntry::new(*id, *label))
        .collect()
}

/// `UTC-12` through `UTC+12`, each mapped to its `Etc/GMT` identifier.
pub fn utc_offsets() -> Vec<CatalogEntry> {
    UTC_OFFSET_RANGE
        .map(|hours| CatalogEntry::new(etc_zone_id(hours), utc_offset_label(hours)))
        .collect()
}

/// Every canonical zone in the tz database, labelled for display.
///
/// Keeps `UTC` and `Area/City` identifiers under the geographic areas.
/// Legacy names (`US/Eastern`, `GB`, `EST5EDT`), `Etc/` offsets and known
/// backward links (`Asia/Calcutta`) are left out.
pub fn all_zones() -> Vec<CatalogEntry> {
    chrono_tz::TZ_VARIANTS
        .iter()
        .map(|tz| tz.name())
        .filter(|name| is_canonical(name))
        .map(|name| CatalogEntry::new(name, derived_label(name)))
        .collect()
}

fn is_canonical(zone_id: &str) -> bool {
    if zone_id == "UTC" {
        return true;
    }
    match zone_id.split_once('/') {
        Some((area, _)) => CANONICAL_AREAS.contains(&area) && !LEGACY_LINKS.contains(&zone_id),
        None => false,
    }
}

/// One zone per region, preferring a capital or major city.
///
/// The region key is the area for `Area/City` identifiers and `Area/Sub` for
/// three-segment ones (`America/Argentina/Salta`). `UTC` stands for itself. Regions keep the order in which they
/// are first seen.
pub fn region_zones() -> Vec<CatalogEntry> {
    let major: HashSet<&str> = MAJOR_CITIES.iter().copied().collect();
    let mut chosen: Vec<(CatalogEntry, bool)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in all_zones() {
        let parts: Vec<&str> = entry.zone_id.split('/').collect();
        let (key, important) = if parts.len() >= 2 {
            let city = parts[parts.len() - 1].to_lowercase();
            let key = if parts.len() > 2 {
                format!("{}/{}", parts[0], parts[1])
            } else {
                parts[0].to_string()
            };
            let important = major.contains(city.as_str()) || city.contains("capit");
            (key, important)
        } else {
            (entry.zone_id.clone(), true)
        };

        match index.get(&key) {
            Some(&i) => {
                if important && !chosen[i].1 {
                    chosen[i] = (entry, important);
                }
            }
            None => {
                index.insert(key, chosen.len());
                chosen.push((entry, important));
            }
        }
    }

    chosen.into_iter().map(|(entry, _)| entry).collect()
}

// ── Search and ordering ─────────────────────────────────────────────────────

/// Entries whose label or identifier contains `term`, ignoring case.
pub fn filter(entries: &[CatalogEntry], term: &str) -> Vec<CatalogEntry> {
    let needle = term.to_lowercase();
    entries
        .iter()
        .filter(|e| {
            e.label.to_lowercase().contains(&needle) || e.zone_id.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Sort by usage count (highest first), then by label.
pub fn sort_by_usage(entries: &mut [CatalogEntry], counts: &BTreeMap<String, u64>) {
    let uses = |e: &CatalogEntry| counts.get(&e.zone_id).copied().unwrap_or(0);
    entries.sort_by(|a, b| uses(b).cmp(&uses(a)).then_with(|| a.label.cmp(&b.label)));
}

// ── UTC pseudo-zones ────────────────────────────────────────────────────────

/// The `Etc/GMT` identifier for a whole-hour UTC offset.
///
/// POSIX-style `Etc/GMT` names carry the inverted sign: UTC+5 is
/// `Etc/GMT-5`. Zero maps to `Etc/UTC`.
pub fn etc_zone_id(hours: i32) -> String {
    match hours {
        0 => "Etc/UTC".to_string(),
        h if h > 0 => format!("Etc/GMT-{h}"),
        h => format!("Etc/GMT+{}", -h),
    }
}

fn utc_offset_label(hours: i32) -> String {
    if hours < 0 {
        format!("UTC{hours}")
    } else {
        format!("UTC+{hours}")
    }
}

/// Resolve a `UTC±N` label (e.g., `"UTC+5"`, `"utc-3"`, `"UTC+0"`) to its
/// pseudo-zone entry.
///
/// # Errors
///
/// Returns [`SlotError::InvalidTimezone`] for malformed text or an offset
/// outside [`UTC_OFFSET_RANGE`].
pub fn parse_utc_offset(s: &str) -> Result<CatalogEntry, SlotError> {
    let invalid = || SlotError::InvalidTimezone(format!("'{}'", s));
    let trimmed = s.trim();
    let rest = trimmed
        .get(..3)
        .filter(|p| p.eq_ignore_ascii_case("utc"))
        .map(|_| &trimmed[3..])
        .ok_or_else(invalid)?;
    if !rest.starts_with('+') && !rest.starts_with('-') {
        return Err(invalid());
    }
    let hours: i32 = rest.parse().map_err(|_| invalid())?;
    if !UTC_OFFSET_RANGE.contains(&hours) {
        return Err(invalid());
    }
    Ok(CatalogEntry::new(etc_zone_id(hours), utc_offset_label(hours)))
}

/// Whether an identifier is one of the `Etc/` fixed-offset zones.
pub fn is_pseudo_zone(zone_id: &str) -> bool {
    zone_id.starts_with("Etc/")
}

// ── Labels ──────────────────────────────────────────────────────────────────

/// Best display label for an identifier.
///
/// Popular-list labels win, then `UTC±N` for pseudo-zones, then the
/// known-label overrides, then the last path segment.
pub fn label_for(zone_id: &str) -> String {
    if let Some((_, label)) = POPULAR.iter().find(|(id, _)| *id == zone_id) {
        return (*label).to_string();
    }
    if let Some(hours) = UTC_OFFSET_RANGE.find(|h| etc_zone_id(*h) == zone_id) {
        return utc_offset_label(hours);
    }
    derived_label(zone_id)
}

fn derived_label(zone_id: &str) -> String {
    if let Some((_, label)) = KNOWN_LABELS.iter().find(|(id, _)| *id == zone_id) {
        return (*label).to_string();
    }
    short_name(zone_id)
}

/// Last path segment with underscores as spaces (`"America/St_Johns"` →
/// `"St Johns"`).
pub fn short_name(zone_id: &str) -> String {
    zone_id
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(zone_id)
        .replace('_', " ")
}
