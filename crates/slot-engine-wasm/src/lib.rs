//! Browser bindings for the meeting-time search.
//!
//! Payloads cross the boundary as JSON strings; errors become JS exceptions
//! carrying the error message.

use serde::Deserialize;
use slot_engine::{
    headline, parse_reference, CivilTimeOracle, RankedSlot, SlotLabel, TzdbOracle,
    WorkingHoursWindow, Zone,
};
use wasm_bindgen::prelude::*;

/// Zone as sent by the page: `{"timeZone": "...", "label": "..."}`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ZoneInput {
    time_zone: String,
    #[serde(default)]
    label: Option<String>,
}

#[derive(serde::Serialize)]
struct SearchOutput {
    headline: Option<SlotLabel>,
    slots: Vec<RankedSlot>,
}

/// Rank meeting slots for the UTC day of `reference`.
///
/// `zones_json` is an array of `{"timeZone", "label"}` objects; `reference`
/// is an RFC 3339 instant or `YYYY-MM-DD`. Returns `{"headline", "slots"}`.
#[wasm_bindgen(js_name = findBestSlots)]
pub fn find_best_slots(
    zones_json: &str,
    reference: &str,
    start: u32,
    end: u32,
) -> Result<String, JsError> {
    search(zones_json, reference, start, end).map_err(|e| JsError::new(&e))
}

/// Local civil hour of `zone_id` at `reference`.
#[wasm_bindgen(js_name = localHourAt)]
pub fn local_hour_at(reference: &str, zone_id: &str) -> Result<u32, JsError> {
    local_hour(reference, zone_id).map_err(|e| JsError::new(&e))
}

fn search(zones_json: &str, reference: &str, start: u32, end: u32) -> Result<String, String> {
    let inputs: Vec<ZoneInput> =
        serde_json::from_str(zones_json).map_err(|e| format!("Invalid zones: {e}"))?;
    let zones: Vec<Zone> = inputs
        .into_iter()
        .map(|z| {
            let label = z
                .label
                .unwrap_or_else(|| slot_engine::catalog::label_for(&z.time_zone));
            Zone::new(z.time_zone, label)
        })
        .collect();
    let reference = parse_reference(reference).map_err(|e| e.to_string())?;
    let window = WorkingHoursWindow::new(start, end).map_err(|e| e.to_string())?;

    let slots = slot_engine::find_best_slots(&TzdbOracle, &zones, reference, window)
        .map_err(|e| e.to_string())?;
    let output = SearchOutput {
        headline: headline(&slots),
        slots,
    };
    serde_json::to_string(&output).map_err(|e| e.to_string())
}

fn local_hour(reference: &str, zone_id: &str) -> Result<u32, String> {
    let instant = parse_reference(reference).map_err(|e| e.to_string())?;
    TzdbOracle
        .local_hour_at(instant, zone_id)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_returns_json() {
        let zones = r#"[{"timeZone":"Europe/London","label":"London"},{"timeZone":"Europe/Berlin"}]"#;
        let out = search(zones, "2026-01-15", 7, 17).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["headline"], "best_match");
        assert_eq!(json["slots"][0]["instant"], "2026-01-15T07:00:00Z");
        assert_eq!(json["slots"][0]["zones"][1]["label"], "Berlin");
    }

    #[test]
    fn test_search_rejects_bad_window() {
        let zones = r#"[{"timeZone":"Europe/London"},{"timeZone":"Europe/Berlin"}]"#;
        let err = search(zones, "2026-01-15", 17, 7).unwrap_err();
        assert!(err.contains("Invalid working-hours window"), "got: {err}");
    }

    #[test]
    fn test_search_rejects_bad_json() {
        let err = search("{", "2026-01-15", 7, 17).unwrap_err();
        assert!(err.starts_with("Invalid zones"), "got: {err}");
    }

    #[test]
    fn test_search_single_zone_is_empty() {
        let out = search(r#"[{"timeZone":"Asia/Tokyo"}]"#, "2026-01-15", 7, 17).unwrap();
        assert_eq!(out, r#"{"headline":null,"slots":[]}"#);
    }

    #[test]
    fn test_local_hour() {
        assert_eq!(local_hour("2026-01-15T14:00:00Z", "America/New_York").unwrap(), 9);
        assert!(local_hour("2026-01-15T14:00:00Z", "Bad/Zone").is_err());
    }
}
