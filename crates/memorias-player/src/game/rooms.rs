//! Room manager: current room, room cycle and map loading
//!
//! Standard rooms are numbered 1..=4 and use the map `mapa{n}` with the
//! background `bg{n}`. Custom maps (e.g. `caixaclara`) can be shown on top
//! of the room cycle without changing the current room number.

use thiserror::Error;

use crate::assets::AssetStore;

use super::behavior;
use super::zones::ZoneRegistry;

/// Number of rooms in the next/prev cycle
pub const MAX_ROOMS: u8 = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    #[error("Room {room} out of range 1..={max}")]
    OutOfRange { room: u8, max: u8 },

    #[error("Map '{0}' not found")]
    MissingMap(String),
}

/// What the scene controller needs after a map was loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedMap {
    pub map_key: String,
    /// Background to swap in, if any
    pub background: Option<String>,
    pub zone_count: usize,
}

pub fn room_map_key(room: u8) -> String {
    format!("mapa{}", room)
}

pub fn room_background_key(room: u8) -> String {
    format!("bg{}", room)
}

#[derive(Debug)]
pub struct RoomManager {
    current_room: u8,
    total_rooms: u8,
    current_map: Option<String>,
    zones: ZoneRegistry,
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomManager {
    pub fn new() -> Self {
        Self {
            current_room: 1,
            total_rooms: MAX_ROOMS,
            current_map: None,
            zones: ZoneRegistry::new(),
        }
    }

    pub fn current(&self) -> u8 {
        self.current_room
    }

    pub fn total(&self) -> u8 {
        self.total_rooms
    }

    /// Key of the map whose zones are live (None before the first load
    /// and while a puzzle owns the screen)
    pub fn current_map(&self) -> Option<&str> {
        self.current_map.as_deref()
    }

    pub fn zones(&self) -> &ZoneRegistry {
        &self.zones
    }

    pub fn zones_mut(&mut self) -> &mut ZoneRegistry {
        &mut self.zones
    }

    /// True if the live map is one of the standard rooms
    pub fn is_standard(&self) -> bool {
        match &self.current_map {
            Some(key) => (1..=self.total_rooms).any(|n| *key == room_map_key(n)),
            None => false,
        }
    }

    /// Tear down the previous room's zones and instantiate room `n`.
    /// Fails without touching any state if `n` is out of range or its map
    /// is missing.
    pub fn load_room(&mut self, n: u8, assets: &AssetStore) -> Result<LoadedMap, RoomError> {
        if n == 0 || n > self.total_rooms {
            return Err(RoomError::OutOfRange {
                room: n,
                max: self.total_rooms,
            });
        }
        let map_key = room_map_key(n);
        let doc = assets
            .map(&map_key)
            .ok_or_else(|| RoomError::MissingMap(map_key.clone()))?;

        let dropped = self.zones.clear();
        let zone_count = self.zones.populate(doc, behavior::resolve);
        self.current_room = n;
        self.current_map = Some(map_key.clone());
        tracing::info!("Room {} loaded ({} zones, {} dropped)", n, zone_count, dropped);
        tracing::debug!("Zones: {:?}", self.zones.names());

        Ok(LoadedMap {
            map_key,
            background: Some(room_background_key(n)),
            zone_count,
        })
    }

    /// `(current mod total) + 1`
    pub fn next_room(&mut self, assets: &AssetStore) -> Result<LoadedMap, RoomError> {
        let next = (self.current_room % self.total_rooms) + 1;
        self.load_room(next, assets)
    }

    /// `((current - 2 + total) mod total) + 1`
    pub fn prev_room(&mut self, assets: &AssetStore) -> Result<LoadedMap, RoomError> {
        let total = self.total_rooms as i32;
        let prev = ((self.current_room as i32 - 2 + total).rem_euclid(total)) + 1;
        self.load_room(prev as u8, assets)
    }

    /// Load a map outside the room cycle. The current room number is kept,
    /// so leaving the custom map returns to it.
    pub fn load_custom_map(
        &mut self,
        map_key: &str,
        background: Option<&str>,
        assets: &AssetStore,
    ) -> Result<LoadedMap, RoomError> {
        let doc = assets
            .map(map_key)
            .ok_or_else(|| RoomError::MissingMap(map_key.to_string()))?;

        self.zones.clear();
        let zone_count = self.zones.populate(doc, behavior::resolve);
        self.current_map = Some(map_key.to_string());
        tracing::info!("Custom map '{}' loaded ({} zones)", map_key, zone_count);

        Ok(LoadedMap {
            map_key: map_key.to_string(),
            background: background.map(str::to_string),
            zone_count,
        })
    }

    /// Drop all zones without loading anything (puzzle start)
    pub fn clear_zones(&mut self) -> usize {
        self.current_map = None;
        self.zones.clear()
    }
}
