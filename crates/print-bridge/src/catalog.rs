use crate::types::PaperProduct;
use crate::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Read-only view of the product configuration: paper products by key and
/// the default tray mapping (`"<W>x<H>"` → tray).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductCatalog {
    paper_sizes: BTreeMap<String, PaperProduct>,
    default_tray_mapping: BTreeMap<String, String>,
}

impl ProductCatalog {
    pub fn new(
        products: impl IntoIterator<Item = (String, PaperProduct)>,
        tray_mapping: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let mut catalog = Self {
            paper_sizes: products.into_iter().collect(),
            default_tray_mapping: tray_mapping.into_iter().collect(),
        };
        catalog.assign_ids();
        catalog
    }

    /// Load a catalog from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path).await?;
        Self::from_json(&text).map_err(|e| {
            BridgeError::Config(format!("Failed to parse catalog {}: {}", path.display(), e))
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let mut catalog: Self = serde_json::from_str(json)?;
        catalog.assign_ids();
        Ok(catalog)
    }

    fn assign_ids(&mut self) {
        for (key, product) in self.paper_sizes.iter_mut() {
            product.id = key.clone();
        }
    }

    pub fn product(&self, key: &str) -> Option<&PaperProduct> {
        self.paper_sizes.get(key)
    }

    /// Products in key order
    pub fn products(&self) -> impl Iterator<Item = &PaperProduct> {
        self.paper_sizes.values()
    }

    pub fn tray_mapping(&self) -> &BTreeMap<String, String> {
        &self.default_tray_mapping
    }
}
