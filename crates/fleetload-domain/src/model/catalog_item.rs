//! Catalog item definitions

use fleetload_types::{Error, ItemKind, Result};
use serde::{Deserialize, Serialize};

/// A shippable item type with its per-unit weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    /// Weight of one unit in kg
    pub unit_weight: f64,
    pub price_per_kg: f64,
    pub kind: ItemKind,
}

impl CatalogItem {
    pub fn new(
        id: impl Into<String>,
        unit_weight: f64,
        price_per_kg: f64,
        kind: ItemKind,
    ) -> Result<Self> {
        // NaN fails both checks
        if !(unit_weight > 0.0) {
            return Err(Error::InvalidInput(format!(
                "Item weight must be positive, got {}",
                unit_weight
            )));
        }
        if !(price_per_kg >= 0.0) {
            return Err(Error::InvalidInput(format!(
                "Price per kg must not be negative, got {}",
                price_per_kg
            )));
        }
        Ok(Self {
            id: id.into(),
            unit_weight,
            price_per_kg,
            kind,
        })
    }

    pub fn is_fragile(&self) -> bool {
        self.kind == ItemKind::Fragile
    }

    /// Total weight of `quantity` units
    pub fn weight_of(&self, quantity: u32) -> f64 {
        quantity as f64 * self.unit_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_weight() {
        assert!(CatalogItem::new("I1", 0.0, 1.0, ItemKind::Solid).is_err());
        assert!(CatalogItem::new("I1", -2.0, 1.0, ItemKind::Solid).is_err());
        assert!(CatalogItem::new("I1", f64::NAN, 1.0, ItemKind::Solid).is_err());
    }

    #[test]
    fn test_rejects_negative_price() {
        assert!(CatalogItem::new("I1", 1.0, -0.5, ItemKind::Solid).is_err());
    }

    #[test]
    fn test_weight_of() {
        let item = CatalogItem::new("I1", 2.5, 3.0, ItemKind::Fragile).unwrap();
        assert!((item.weight_of(4) - 10.0).abs() < f64::EPSILON);
        assert!(item.is_fragile());
    }
}
