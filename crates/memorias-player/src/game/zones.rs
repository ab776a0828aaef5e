//! Interactive zones of the live room
//!
//! The registry owns every hotspot created from the current map document.
//! Clearing it bumps a generation counter, so a [`ZoneId`] taken before a
//! room change never resolves to a zone of the next room.

use crate::assets::map::MapDocument;
use crate::engine::Rect;

use super::behavior::ZoneBehavior;

/// Handle to a live zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneId {
    generation: u32,
    index: usize,
}

/// A rectangular hotspot created from one map object
#[derive(Debug, Clone)]
pub struct Zone {
    /// Tooltip text, verbatim from the map
    pub name: String,
    pub rect: Rect,
    pub behavior: ZoneBehavior,
}

/// Result of feeding a pointer position to [`ZoneRegistry::update_hover`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverChange {
    Entered(ZoneId),
    Left,
    Unchanged,
}

#[derive(Debug, Default)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
    generation: u32,
    hovered: Option<ZoneId>,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroy every live zone. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.len();
        self.zones.clear();
        self.hovered = None;
        self.generation = self.generation.wrapping_add(1);
        dropped
    }

    /// Create one zone per object in every object group of `doc`.
    /// Existing zones are cleared first.
    pub fn populate(&mut self, doc: &MapDocument, resolve: impl Fn(&str) -> ZoneBehavior) -> usize {
        self.clear();
        for layer in doc.object_groups() {
            tracing::trace!("Layer '{}': {} objects", layer.name, layer.objects.len());
            for obj in &layer.objects {
                self.zones.push(Zone {
                    name: obj.name.clone(),
                    rect: obj.rect(),
                    behavior: resolve(&obj.name),
                });
            }
        }
        self.len()
    }

    pub fn get(&self, id: ZoneId) -> Option<&Zone> {
        if id.generation != self.generation {
            return None;
        }
        self.zones.get(id.index)
    }

    /// Topmost zone under the point (later objects sit above earlier ones)
    pub fn zone_at(&self, x: i32, y: i32) -> Option<ZoneId> {
        self.zones
            .iter()
            .rposition(|z| z.rect.contains(x, y))
            .map(|index| ZoneId {
                generation: self.generation,
                index,
            })
    }

    /// Track the pointer; reports enter/leave transitions
    pub fn update_hover(&mut self, x: i32, y: i32) -> HoverChange {
        let now = self.zone_at(x, y);
        if now == self.hovered {
            return HoverChange::Unchanged;
        }
        self.hovered = now;
        match now {
            Some(id) => HoverChange::Entered(id),
            None => HoverChange::Left,
        }
    }

    pub fn hovered(&self) -> Option<ZoneId> {
        self.hovered
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|z| z.name.as_str()).collect()
    }
}
