//! Map documents: Tiled-style JSON describing the hotspots of one room
//!
//! Only `objectgroup` layers matter; every object in them becomes one
//! interactive zone. Tile layers and unknown fields are ignored.

use serde::Deserialize;
use thiserror::Error;

use crate::engine::Rect;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("Failed to read map file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed map document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Layer kind used for hotspot objects
pub const OBJECT_GROUP: &str = "objectgroup";

/// A whole map document (one per room or custom map)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MapDocument {
    #[serde(default)]
    pub layers: Vec<MapLayer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapLayer {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub objects: Vec<MapObject>,
}

/// One rectangular object, in 426×240 logical coordinates
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MapObject {
    #[serde(default)]
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl MapObject {
    /// Rectangle anchored at the object's top-left corner
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x.round() as i32,
            y: self.y.round() as i32,
            width: self.width.max(0.0).round() as u32,
            height: self.height.max(0.0).round() as u32,
        }
    }
}

impl MapDocument {
    pub fn parse(text: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &std::path::Path) -> Result<Self, MapError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// The object groups of this map, in document order
    pub fn object_groups(&self) -> impl Iterator<Item = &MapLayer> {
        self.layers.iter().filter(|l| l.kind == OBJECT_GROUP)
    }

    /// Every hotspot object across all object groups
    pub fn objects(&self) -> impl Iterator<Item = &MapObject> {
        self.object_groups().flat_map(|g| g.objects.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "height": 15, "width": 27, "tilewidth": 16,
        "layers": [
            { "type": "tilelayer", "name": "fundo", "data": [1, 2, 3] },
            { "type": "objectgroup", "name": "objetos", "objects": [
                { "id": 1, "name": "cofre_trancado", "x": 40, "y": 120.6, "width": 48, "height": 40, "rotation": 0 },
                { "id": 2, "name": "janela", "x": 200, "y": 10, "width": 60, "height": 50 }
            ]},
            { "type": "objectgroup", "name": "extra", "objects": [
                { "id": 3, "name": "voltar", "x": 0, "y": 200, "width": 40, "height": 40 }
            ]}
        ]
    }"#;

    #[test]
    fn only_object_groups_produce_objects() {
        let doc = MapDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.layers.len(), 3);
        assert_eq!(doc.object_groups().count(), 2);
        let names: Vec<&str> = doc.objects().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["cofre_trancado", "janela", "voltar"]);
    }

    #[test]
    fn rect_rounds_float_coordinates() {
        let doc = MapDocument::parse(SAMPLE).unwrap();
        let vault = doc.objects().next().unwrap();
        assert_eq!(vault.rect(), Rect { x: 40, y: 121, width: 48, height: 40 });
    }

    #[test]
    fn malformed_document_is_an_error() {
        let err = MapDocument::parse(r#"{ "layers": [ { "name": "x" } ] }"#).unwrap_err();
        assert!(matches!(err, MapError::Json(_)));
    }

    #[test]
    fn document_without_layers_is_empty() {
        let doc = MapDocument::parse("{}").unwrap();
        assert_eq!(doc.objects().count(), 0);
    }
}
