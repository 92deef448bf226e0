//! Zones the user is converting into, and the ordered list that holds them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label given to the zone a list is seeded with.
pub const LOCAL_ZONE_LABEL: &str = "My Location";

/// One location to convert into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Handle used to remove this entry from a [`ZoneList`].
    pub id: Uuid,
    /// Identifier handed to the civil-time oracle (e.g., `"Europe/London"`).
    pub zone_id: String,
    /// Display label (e.g., `"London"`).
    pub label: String,
}

impl Zone {
    pub fn new(zone_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            zone_id: zone_id.into(),
            label: label.into(),
        }
    }
}

/// Ordered zones with no two entries sharing an identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneList {
    zones: Vec<Zone>,
}

impl ZoneList {
    pub fn new() -> Self {
        Self::default()
    }

    /// A list holding only the user's own zone, labelled "My Location".
    pub fn with_local(zone_id: impl Into<String>) -> Self {
        let mut list = Self::new();
        list.add(zone_id, LOCAL_ZONE_LABEL);
        list
    }

    /// Append a zone. Returns `None` and leaves the list unchanged when the
    /// identifier is already present.
    pub fn add(&mut self, zone_id: impl Into<String>, label: impl Into<String>) -> Option<&Zone> {
        let zone_id = zone_id.into();
        if self.contains_zone_id(&zone_id) {
            tracing::debug!(zone_id = %zone_id, "zone already listed, not adding");
            return None;
        }
        self.zones.push(Zone::new(zone_id, label));
        self.zones.last()
    }

    /// Remove the zone with handle `id`.
    pub fn remove(&mut self, id: Uuid) -> Option<Zone> {
        let pos = self.zones.iter().position(|z| z.id == id)?;
        Some(self.zones.remove(pos))
    }

    pub fn contains_zone_id(&self, zone_id: &str) -> bool {
        self.zones.iter().any(|z| z.zone_id == zone_id)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Zone> {
        self.zones.iter()
    }

    pub fn as_slice(&self) -> &[Zone] {
        &self.zones
    }
}

impl<'a> IntoIterator for &'a ZoneList {
    type Item = &'a Zone;
    type IntoIter = std::slice::Iter<'a, Zone>;

    fn into_iter(self) -> Self::IntoIter {
        self.zones.iter()
    }
}
