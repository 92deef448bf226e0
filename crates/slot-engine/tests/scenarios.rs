//! End-to-end searches against the real tz database.

use chrono::{DateTime, TimeZone, Utc};
use slot_engine::catalog::{self, parse_utc_offset};
use slot_engine::{
    find_best_slots, headline, parse_reference, SlotLabel, TzdbOracle, WorkingHoursWindow, Zone,
    ZoneList,
};

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn instants(slots: &[slot_engine::RankedSlot]) -> Vec<DateTime<Utc>> {
    slots.iter().map(|s| s.instant).collect()
}

fn city_list(ids: &[&str]) -> ZoneList {
    let mut list = ZoneList::new();
    for id in ids {
        list.add(*id, catalog::label_for(id));
    }
    list
}

#[test]
fn new_york_london_tokyo_winter_has_no_perfect_slot() {
    let zones = city_list(&["America/New_York", "Europe/London", "Asia/Tokyo"]);
    let reference = parse_reference("2026-01-15T16:42:00Z").unwrap();

    let slots = find_best_slots(
        &TzdbOracle,
        zones.as_slice(),
        reference,
        WorkingHoursWindow::default(),
    )
    .unwrap();

    assert_eq!(
        instants(&slots),
        vec![
            utc(2026, 1, 15, 7, 0),
            utc(2026, 1, 15, 7, 30),
            utc(2026, 1, 15, 12, 0),
        ]
    );
    for slot in &slots {
        assert!(!slot.is_qualified);
        assert_eq!(slot.match_count, 2);
        assert_eq!(slot.distance_score, 5);
    }
    assert_eq!(headline(&slots), Some(SlotLabel::ClosestMatch));

    // 07:00 UTC: 02:00 in New York, 07:00 in London, 16:00 in Tokyo
    let hours: Vec<u32> = slots[0].zones.iter().map(|z| z.hour).collect();
    assert_eq!(hours, vec![2, 7, 16]);
    assert_eq!(slots[0].zones[0].label, "New York");
}

#[test]
fn new_york_london_tokyo_summer_follows_dst() {
    // EDT (UTC-4) and BST (UTC+1) shift the fallback slots
    let zones = city_list(&["America/New_York", "Europe/London", "Asia/Tokyo"]);
    let slots = find_best_slots(
        &TzdbOracle,
        zones.as_slice(),
        parse_reference("2026-07-15").unwrap(),
        WorkingHoursWindow::default(),
    )
    .unwrap();

    assert_eq!(
        instants(&slots),
        vec![
            utc(2026, 7, 15, 7, 0),
            utc(2026, 7, 15, 7, 30),
            utc(2026, 7, 15, 11, 0),
        ]
    );
    assert!(slots.iter().all(|s| s.distance_score == 4));
}

#[test]
fn london_berlin_prefers_earliest_perfect_slot() {
    let zones = city_list(&["Europe/London", "Europe/Berlin"]);
    let slots = find_best_slots(
        &TzdbOracle,
        zones.as_slice(),
        parse_reference("2026-01-15").unwrap(),
        WorkingHoursWindow::default(),
    )
    .unwrap();

    assert_eq!(
        instants(&slots),
        vec![
            utc(2026, 1, 15, 7, 0),
            utc(2026, 1, 15, 7, 30),
            utc(2026, 1, 15, 8, 0),
        ]
    );
    assert!(slots.iter().all(|s| s.is_perfect()));
    assert_eq!(headline(&slots), Some(SlotLabel::BestMatch));
}

#[test]
fn us_coasts_overlap_in_the_afternoon() {
    let zones = city_list(&["America/New_York", "America/Los_Angeles"]);
    let slots = find_best_slots(
        &TzdbOracle,
        zones.as_slice(),
        parse_reference("2026-01-15").unwrap(),
        WorkingHoursWindow::default(),
    )
    .unwrap();

    // Los Angeles reaches 07:00 at 15:00 UTC
    assert_eq!(slots[0].instant, utc(2026, 1, 15, 15, 0));
    assert_eq!(slots[0].zones[1].hour, 7);
}

#[test]
fn utc_offset_pseudo_zones_search_like_cities() {
    let minus5 = parse_utc_offset("UTC-5").unwrap();
    let plus5 = parse_utc_offset("UTC+5").unwrap();
    let zones = vec![
        Zone::new(minus5.zone_id, minus5.label),
        Zone::new(plus5.zone_id, plus5.label),
    ];

    let slots = find_best_slots(
        &TzdbOracle,
        &zones,
        parse_reference("2026-01-15").unwrap(),
        WorkingHoursWindow::default(),
    )
    .unwrap();

    assert_eq!(
        instants(&slots),
        vec![
            utc(2026, 1, 15, 11, 0),
            utc(2026, 1, 15, 11, 30),
            utc(2026, 1, 15, 12, 0),
        ]
    );
    assert!(slots.iter().all(|s| s.distance_score == 1 && s.match_count == 1));
}

#[test]
fn unknown_zone_fails_the_whole_search() {
    let zones = vec![
        Zone::new("Europe/London", "London"),
        Zone::new("Europe/Atlantis", "Atlantis"),
    ];
    let err = find_best_slots(
        &TzdbOracle,
        &zones,
        parse_reference("2026-01-15").unwrap(),
        WorkingHoursWindow::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Europe/Atlantis"));
}

#[test]
fn single_local_zone_gives_no_suggestion() {
    let zones = ZoneList::with_local("Europe/London");
    let slots = find_best_slots(
        &TzdbOracle,
        zones.as_slice(),
        parse_reference("2026-01-15").unwrap(),
        WorkingHoursWindow::default(),
    )
    .unwrap();
    assert!(slots.is_empty());
    assert_eq!(headline(&slots), None);
}

#[test]
fn repeated_searches_are_identical() {
    let zones = city_list(&[
        "America/New_York",
        "Europe/London",
        "Asia/Kolkata",
        "Australia/Sydney",
    ]);
    let reference = parse_reference("2026-03-10T09:00:00Z").unwrap();
    let run = || {
        find_best_slots(
            &TzdbOracle,
            zones.as_slice(),
            reference,
            WorkingHoursWindow::default(),
        )
        .unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn results_serialize_to_json() {
    let zones = city_list(&["Europe/London", "Europe/Berlin"]);
    let slots = find_best_slots(
        &TzdbOracle,
        zones.as_slice(),
        parse_reference("2026-01-15").unwrap(),
        WorkingHoursWindow::default(),
    )
    .unwrap();

    let json = serde_json::to_value(&slots).unwrap();
    assert_eq!(json[0]["instant"], "2026-01-15T07:00:00Z");
    assert_eq!(json[0]["match_count"], 2);
    assert_eq!(json[0]["zones"][1]["zone_id"], "Europe/Berlin");
    assert_eq!(json[0]["zones"][1]["hour"], 8);
}
