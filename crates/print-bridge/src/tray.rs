use std::collections::{BTreeSet, HashMap};

/// Recommends an input tray for a paper size from a `"<W>x<H>"` mapping
#[derive(Debug, Clone, Default)]
pub struct TrayRecommender {
    mapping: HashMap<String, String>,
}

impl TrayRecommender {
    pub fn new<K, V>(mapping: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            mapping: mapping
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Key for a size, each dimension rounded to the nearest millimeter
    pub fn size_key(width_mm: f32, height_mm: f32) -> String {
        format!("{}x{}", width_mm.round() as i64, height_mm.round() as i64)
    }

    /// Tray mapped to this size in either orientation. The as-given
    /// orientation wins when both are mapped.
    pub fn recommend(&self, width_mm: f32, height_mm: f32) -> Option<String> {
        [
            Self::size_key(width_mm, height_mm),
            Self::size_key(height_mm, width_mm),
        ]
        .iter()
        .filter_map(|key| self.mapping.get(key))
        .find(|tray| !tray.is_empty())
        .cloned()
    }

    /// Distinct tray names in the mapping, sorted
    pub fn all_trays(&self) -> Vec<String> {
        self.mapping
            .values()
            .filter(|tray| !tray.is_empty())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
