//! CSV-backed catalog repository

use std::cell::RefCell;
use std::path::PathBuf;

use fleetload_domain::model::CatalogItem;
use fleetload_domain::repository::CatalogRepository;
use fleetload_types::{ItemKind, Result};
use serde::{Deserialize, Serialize};

use crate::csv_table::CsvTable;

pub const ITEM_HEADERS: &[&str] = &["ID", "Price per kg", "Weight", "Type"];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Price per kg")]
    price_per_kg: f64,
    #[serde(rename = "Weight")]
    unit_weight: f64,
    #[serde(rename = "Type")]
    kind: ItemKind,
}

impl TryFrom<ItemRow> for CatalogItem {
    type Error = fleetload_types::Error;

    fn try_from(row: ItemRow) -> Result<Self> {
        CatalogItem::new(row.id, row.unit_weight, row.price_per_kg, row.kind)
    }
}

impl From<&CatalogItem> for ItemRow {
    fn from(item: &CatalogItem) -> Self {
        ItemRow {
            id: item.id.clone(),
            price_per_kg: item.price_per_kg,
            unit_weight: item.unit_weight,
            kind: item.kind,
        }
    }
}

/// Catalog repository stored in `items.csv`
pub struct CsvCatalogRepository {
    table: CsvTable,
    items: RefCell<Vec<CatalogItem>>,
}

impl CsvCatalogRepository {
    /// Create or load the catalog table in `store_dir`.
    ///
    /// Rows with a non-positive weight are rejected as invalid input.
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        let table = CsvTable::new(store_dir.join("items.csv"), ITEM_HEADERS);
        let rows: Vec<ItemRow> = table.read_rows()?;
        let items = rows
            .into_iter()
            .map(CatalogItem::try_from)
            .collect::<Result<Vec<_>>>()?;

        let repo = Self {
            table,
            items: RefCell::new(items),
        };
        if !repo.table.path().exists() {
            repo.persist()?;
        }
        Ok(repo)
    }

    fn persist(&self) -> Result<()> {
        let rows: Vec<ItemRow> = self.items.borrow().iter().map(ItemRow::from).collect();
        self.table.write_rows(&rows)
    }

    pub fn count(&self) -> usize {
        self.items.borrow().len()
    }
}

impl CatalogRepository for CsvCatalogRepository {
    fn find_all(&self) -> Result<Vec<CatalogItem>> {
        Ok(self.items.borrow().clone())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<CatalogItem>> {
        Ok(self.items.borrow().iter().find(|i| i.id == id).cloned())
    }

    fn save(&self, item: &CatalogItem) -> Result<()> {
        let mut items = self.items.borrow_mut();
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => items.push(item.clone()),
        }
        drop(items);
        self.persist()
    }

    fn remove(&self, id: &str) -> Result<bool> {
        let mut items = self.items.borrow_mut();
        let before = items.len();
        items.retain(|i| i.id != id);
        let removed = items.len() != before;
        drop(items);
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }
}
