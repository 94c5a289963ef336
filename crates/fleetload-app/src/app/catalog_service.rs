//! Catalog item management

use fleetload_domain::model::CatalogItem;
use fleetload_domain::repository::CatalogRepository;
use fleetload_types::{Error, ItemKind, Result};
use tracing::info;

use crate::id::{generate_id, ITEM_PREFIX};

pub struct CatalogService<'a, C: CatalogRepository + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: CatalogRepository + ?Sized> CatalogService<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Add an item type to the catalog
    pub fn add(
        &self,
        unit_weight: f64,
        price_per_kg: f64,
        kind: ItemKind,
        id: Option<String>,
    ) -> Result<CatalogItem> {
        let id = match id {
            Some(id) if self.catalog.find_by_id(&id)?.is_some() => {
                return Err(Error::InvalidInput(format!(
                    "Item with ID {} already exists",
                    id
                )));
            }
            Some(id) => id,
            None => generate_id(ITEM_PREFIX),
        };

        let item = CatalogItem::new(id, unit_weight, price_per_kg, kind)?;
        self.catalog.save(&item)?;
        info!(item_id = %item.id, unit_weight, %kind, "Catalog item added");
        Ok(item)
    }

    pub fn list(&self) -> Result<Vec<CatalogItem>> {
        self.catalog.find_all()
    }

    pub fn remove(&self, id: &str) -> Result<()> {
        if !self.catalog.remove(id)? {
            return Err(Error::ItemNotFound(id.to_string()));
        }
        info!(item_id = %id, "Catalog item removed");
        Ok(())
    }
}
