//! Order, request line, and allocation record types

use std::collections::HashSet;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use fleetload_types::{Error, Location, OrderStatus, Priority, VehicleKind, VehicleStatus};
use serde::{Deserialize, Serialize};

use super::vehicle::VehicleUpdate;

/// One (item, quantity) demand entry of an item-addition call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestLine {
    pub item_id: String,
    /// Units still waiting for a vehicle
    pub quantity: u32,
}

impl RequestLine {
    pub fn new(item_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }

    /// Parse the `ITEM:QTY` form used on the command line
    pub fn parse(s: &str) -> Result<Self, Error> {
        s.parse()
    }
}

impl FromStr for RequestLine {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (item_id, quantity) = s
            .rsplit_once(':')
            .ok_or_else(|| Error::InvalidInput(format!("Expected ITEM:QTY, got '{}'", s)))?;
        let item_id = item_id.trim();
        if item_id.is_empty() {
            return Err(Error::InvalidInput(format!("Missing item ID in '{}'", s)));
        }
        let quantity: u32 = quantity
            .trim()
            .parse()
            .map_err(|_| Error::InvalidInput(format!("Invalid quantity in '{}'", s)))?;
        if quantity == 0 {
            return Err(Error::InvalidInput(format!(
                "Quantity must be positive in '{}'",
                s
            )));
        }
        Ok(RequestLine::new(item_id, quantity))
    }
}

/// Capacity mutation for one vehicle, produced by the allocator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub vehicle_id: String,
    pub vehicle_kind: VehicleKind,
    pub status: VehicleStatus,
    pub remaining_weight: f64,
    pub remaining_items: u32,
}

impl AllocationRecord {
    pub fn to_update(&self) -> VehicleUpdate {
        VehicleUpdate {
            status: Some(self.status),
            remaining_weight: Some(self.remaining_weight),
            remaining_items: Some(self.remaining_items),
            position: None,
        }
    }
}

/// An item line as recorded on the order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: String,
    pub quantity: u32,
    /// Total weight of the line in kg
    pub weight: f64,
    pub price_per_kg: f64,
}

impl OrderLine {
    pub fn amount(&self) -> f64 {
        self.weight * self.price_per_kg
    }
}

/// A shipment order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub priority: Priority,
    pub delivery_location: Location,
    pub delivery_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    #[serde(default)]
    pub lines: Vec<OrderLine>,
    #[serde(default)]
    pub total_weight: f64,
    /// Every allocation record from every item-addition call, flat
    #[serde(default)]
    pub allocations: Vec<AllocationRecord>,
}

impl Order {
    pub fn new(
        id: impl Into<String>,
        priority: Priority,
        delivery_location: Location,
        delivery_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            priority,
            delivery_location,
            delivery_date,
            created_at: Utc::now(),
            status: OrderStatus::Processing,
            lines: Vec::new(),
            total_weight: 0.0,
            allocations: Vec::new(),
        }
    }

    /// Distinct vehicle IDs referenced by the order, first-seen order
    pub fn vehicle_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.allocations
            .iter()
            .filter(|r| seen.insert(r.vehicle_id.as_str()))
            .map(|r| r.vehicle_id.clone())
            .collect()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn total_amount(&self) -> f64 {
        self.lines.iter().map(OrderLine::amount).sum()
    }
}
