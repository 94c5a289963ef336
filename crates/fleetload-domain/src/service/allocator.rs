//! Vehicle allocation service
//!
//! Greedy first-fit over the fleet: vehicles are visited smallest first
//! (by item-count capacity, then weight capacity) and each one takes as many
//! units of every request line as its remaining capacity, the order's
//! remaining totals and the fragile-item rule allow. Units nothing can carry
//! are reported as the remainder; the allocator itself never fails.

use std::collections::HashMap;

use fleetload_types::{Error, VehicleKind, VehicleStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{AllocationRecord, CatalogItem, RequestLine, Vehicle};

/// Resolves item IDs against a catalog snapshot
pub trait CatalogLookup {
    fn lookup(&self, item_id: &str) -> Option<&CatalogItem>;
}

impl CatalogLookup for [CatalogItem] {
    fn lookup(&self, item_id: &str) -> Option<&CatalogItem> {
        self.iter().find(|item| item.id == item_id)
    }
}

impl CatalogLookup for Vec<CatalogItem> {
    fn lookup(&self, item_id: &str) -> Option<&CatalogItem> {
        self.as_slice().lookup(item_id)
    }
}

impl CatalogLookup for HashMap<String, CatalogItem> {
    fn lookup(&self, item_id: &str) -> Option<&CatalogItem> {
        self.get(item_id)
    }
}

/// Units of one item placed on one vehicle in a single assignment step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadEntry {
    pub vehicle_id: String,
    pub vehicle_kind: VehicleKind,
    pub item_id: String,
    pub units: u32,
    /// Weight of the loaded units in kg
    pub weight: f64,
}

/// Non-fatal observations made while allocating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllocationDiagnostic {
    /// Request line references an item missing from the catalog; it was skipped
    UnknownItem { item_id: String },
    /// Fragile line passed over by a two-wheeled vehicle
    FragileExcluded { vehicle_id: String, item_id: String },
}

/// Result of one allocation call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationOutcome {
    /// One terminal record per vehicle that received at least one unit
    pub records: Vec<AllocationRecord>,
    pub loads: Vec<LoadEntry>,
    /// Requested units no eligible vehicle could take
    pub remainder: u32,
    pub diagnostics: Vec<AllocationDiagnostic>,
}

impl AllocationOutcome {
    pub fn is_fully_allocated(&self) -> bool {
        self.remainder == 0
    }

    pub fn loaded_units(&self) -> u32 {
        self.loads.iter().map(|l| l.units).sum()
    }

    pub fn loaded_weight(&self) -> f64 {
        self.loads.iter().map(|l| l.weight).sum()
    }

    pub fn unknown_items(&self) -> Vec<&str> {
        self.diagnostics
            .iter()
            .filter_map(|d| match d {
                AllocationDiagnostic::UnknownItem { item_id } => Some(item_id.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Total weight and unit count of the resolvable request lines.
///
/// Fails with [`Error::InvalidInput`] when the unit count does not fit in
/// a `u32`.
pub fn request_totals<C>(
    lines: &[RequestLine],
    catalog: &C,
) -> fleetload_types::Result<(f64, u32)>
where
    C: CatalogLookup + ?Sized,
{
    let mut weight = 0.0;
    let mut count: u32 = 0;
    for line in lines {
        let Some(item) = catalog.lookup(&line.item_id) else {
            continue;
        };
        count = count.checked_add(line.quantity).ok_or_else(|| {
            Error::InvalidInput(format!(
                "Total quantity exceeds {} units at item {}",
                u32::MAX,
                line.item_id
            ))
        })?;
        weight += item.weight_of(line.quantity);
    }
    Ok((weight, count))
}

/// Assign request line units to vehicles.
///
/// `vehicles` is a snapshot and is left untouched; the returned records
/// carry the new remaining capacities. Each line's `quantity` is decremented
/// by the units that found a vehicle, so whatever is left on the lines is
/// the unfulfilled demand.
pub fn allocate<C>(
    total_weight: f64,
    total_items: u32,
    lines: &mut [RequestLine],
    vehicles: &[Vehicle],
    catalog: &C,
) -> AllocationOutcome
where
    C: CatalogLookup + ?Sized,
{
    let mut outcome = AllocationOutcome::default();

    for line in lines.iter() {
        if catalog.lookup(&line.item_id).is_none() {
            warn!(item_id = %line.item_id, "Request line references unknown item, skipping");
            outcome.diagnostics.push(AllocationDiagnostic::UnknownItem {
                item_id: line.item_id.clone(),
            });
        }
    }

    let mut fleet: Vec<&Vehicle> = vehicles.iter().collect();
    fleet.sort_by(|a, b| {
        a.max_items
            .cmp(&b.max_items)
            .then(a.max_weight.total_cmp(&b.max_weight))
    });

    let mut remaining_weight = total_weight;
    let mut remaining_items = total_items;

    for vehicle in fleet {
        if remaining_weight <= 0.0 && remaining_items == 0 {
            break;
        }
        if !vehicle.is_eligible() {
            continue;
        }

        let mut weight_capacity = vehicle.remaining_weight;
        let mut item_capacity = vehicle.remaining_items;
        let mut touched = false;

        for line in lines.iter_mut() {
            let Some(item) = catalog.lookup(&line.item_id) else {
                continue;
            };
            if !vehicle.kind.accepts(item.kind) {
                if line.quantity > 0 {
                    outcome.diagnostics.push(AllocationDiagnostic::FragileExcluded {
                        vehicle_id: vehicle.id.clone(),
                        item_id: item.id.clone(),
                    });
                }
                continue;
            }

            let units = loadable_units(
                line.quantity,
                remaining_items,
                item_capacity,
                remaining_weight.min(weight_capacity),
                item.unit_weight,
            );
            if units == 0 {
                continue;
            }

            let weight = item.weight_of(units);
            line.quantity -= units;
            remaining_weight -= weight;
            remaining_items -= units;
            weight_capacity = (weight_capacity - weight).max(0.0);
            item_capacity -= units;
            touched = true;

            debug!(
                vehicle_id = %vehicle.id,
                vehicle_kind = %vehicle.kind,
                item_id = %item.id,
                units,
                weight,
                "Loaded items"
            );
            outcome.loads.push(LoadEntry {
                vehicle_id: vehicle.id.clone(),
                vehicle_kind: vehicle.kind,
                item_id: item.id.clone(),
                units,
                weight,
            });
        }

        if touched {
            outcome.records.push(AllocationRecord {
                vehicle_id: vehicle.id.clone(),
                vehicle_kind: vehicle.kind,
                status: VehicleStatus::InUse,
                remaining_weight: weight_capacity,
                remaining_items: item_capacity,
            });
        }
    }

    outcome.remainder = remaining_items;
    if remaining_items > 0 {
        warn!(
            remainder = remaining_items,
            "Not enough vehicle capacity to load all items"
        );
    }
    outcome
}

/// min(quantity, order items left, vehicle items left, floor(weight room / unit weight))
fn loadable_units(
    quantity: u32,
    order_items: u32,
    vehicle_items: u32,
    weight_room: f64,
    unit_weight: f64,
) -> u32 {
    let by_count = quantity.min(order_items).min(vehicle_items);
    let by_weight = (weight_room / unit_weight).floor();
    // Negative room or NaN loads nothing; huge values saturate
    if !(by_weight >= 1.0) {
        return 0;
    }
    if by_weight >= by_count as f64 {
        by_count
    } else {
        by_weight as u32
    }
}
