//! Collected items and the HUD hint listing them

use crate::engine::font;

use super::i18n::{t, Language};

#[derive(Debug, Default, Clone)]
pub struct Inventory {
    items: Vec<String>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item once; returns false if it was already held
    pub fn add_item(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        tracing::info!("Item collected: {}", id);
        self.items.push(id.to_string());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|i| i == id)
    }

    #[cfg(test)]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// "Itens: Pincel, ..." or None while empty
    pub fn hint(&self, lang: Language) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let names: Vec<&str> = self
            .items
            .iter()
            .map(|id| match t(lang, &format!("item_{}", id)) {
                "???" => id.as_str(),
                name => name,
            })
            .collect();
        Some(format!("{} {}", t(lang, "hud_inventory"), names.join(", ")))
    }

    pub fn draw(&self, fb: &mut [u32], lang: Language) {
        if let Some(hint) = self.hint(lang) {
            let w = font::text_width(&hint) + 8;
            font::draw_rect(fb, 2, 2, w, font::GLYPH_HEIGHT + 6, 0xAA000000);
            font::draw_text(fb, 6, 5, &hint, 0xFFFFDD66);
        }
    }
}
