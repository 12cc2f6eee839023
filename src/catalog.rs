use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{BnplError, Result};
use crate::types::{CatalogItemId, Rarity};

/// an in-game item offered for sale
///
/// Both prices are supplied pre-computed; nothing here converts between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: CatalogItemId,
    pub name: String,
    pub game: String,
    /// price in native token units
    pub price: Money,
    /// price in the fiat reference unit (USD)
    pub price_usd: Money,
    pub rarity: Rarity,
    #[serde(default)]
    pub stats: BTreeMap<String, u32>,
}

impl CatalogItem {
    pub fn new(
        id: CatalogItemId,
        name: impl Into<String>,
        game: impl Into<String>,
        price: Money,
        price_usd: Money,
        rarity: Rarity,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            game: game.into(),
            price,
            price_usd,
            rarity,
            stats: BTreeMap::new(),
        }
    }

    pub fn with_stat(mut self, name: impl Into<String>, value: u32) -> Self {
        self.stats.insert(name.into(), value);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.price.is_negative() {
            return Err(BnplError::InvalidPrice { price: self.price });
        }
        if self.price_usd.is_negative() {
            return Err(BnplError::InvalidPrice {
                price: self.price_usd,
            });
        }
        Ok(())
    }
}

/// read-only item list supplied at construction
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// build a catalog, rejecting negative prices and repeated ids
    pub fn new(items: Vec<CatalogItem>) -> Result<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            item.validate()?;
            if !seen.insert(item.id) {
                return Err(BnplError::DuplicateCatalogItem { id: item.id });
            }
        }
        Ok(Self { items })
    }

    /// load from a json array of items
    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<CatalogItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    pub fn get(&self, id: CatalogItemId) -> Result<&CatalogItem> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or(BnplError::CatalogItemNotFound { id })
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn by_game<'a>(&'a self, game: &'a str) -> impl Iterator<Item = &'a CatalogItem> + 'a {
        self.items.iter().filter(move |item| item.game == game)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
