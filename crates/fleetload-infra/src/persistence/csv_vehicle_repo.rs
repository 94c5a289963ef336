//! CSV-backed vehicle repository

use std::cell::RefCell;
use std::path::PathBuf;

use fleetload_domain::model::{Vehicle, VehicleUpdate};
use fleetload_domain::repository::VehicleRepository;
use fleetload_types::{Error, Location, Result, VehicleKind, VehicleStatus};
use serde::{Deserialize, Serialize};

use crate::csv_table::CsvTable;

pub const VEHICLE_HEADERS: &[&str] = &[
    "Vehicle ID",
    "Type",
    "Max Capacity (Weight)",
    "Max Capacity (Item Count)",
    "Remaining Capacity (Weight)",
    "Remaining Capacity (Item Count)",
    "Current Position",
    "Status",
];

/// One line of vehicles.csv
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VehicleRow {
    #[serde(rename = "Vehicle ID")]
    id: String,
    #[serde(rename = "Type")]
    kind: VehicleKind,
    #[serde(rename = "Max Capacity (Weight)")]
    max_weight: f64,
    #[serde(rename = "Max Capacity (Item Count)")]
    max_items: u32,
    #[serde(rename = "Remaining Capacity (Weight)")]
    remaining_weight: f64,
    #[serde(rename = "Remaining Capacity (Item Count)")]
    remaining_items: u32,
    #[serde(rename = "Current Position")]
    position: Location,
    #[serde(rename = "Status")]
    status: VehicleStatus,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Vehicle {
            id: row.id,
            kind: row.kind,
            max_weight: row.max_weight,
            max_items: row.max_items,
            remaining_weight: row.remaining_weight,
            remaining_items: row.remaining_items,
            position: row.position,
            status: row.status,
        }
    }
}

impl From<&Vehicle> for VehicleRow {
    fn from(v: &Vehicle) -> Self {
        VehicleRow {
            id: v.id.clone(),
            kind: v.kind,
            max_weight: v.max_weight,
            max_items: v.max_items,
            remaining_weight: v.remaining_weight,
            remaining_items: v.remaining_items,
            position: v.position.clone(),
            status: v.status,
        }
    }
}

/// Vehicle repository stored in `vehicles.csv`.
///
/// Rows keep their file order, which is also the tie-break order when the
/// allocator sorts vehicles of equal capacity.
pub struct CsvVehicleRepository {
    table: CsvTable,
    vehicles: RefCell<Vec<Vehicle>>,
}

impl CsvVehicleRepository {
    /// Create or load the fleet table in `store_dir`
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        let table = CsvTable::new(store_dir.join("vehicles.csv"), VEHICLE_HEADERS);
        let rows: Vec<VehicleRow> = table.read_rows()?;
        let repo = Self {
            table,
            vehicles: RefCell::new(rows.into_iter().map(Vehicle::from).collect()),
        };
        if !repo.table.path().exists() {
            repo.persist()?;
        }
        Ok(repo)
    }

    fn persist(&self) -> Result<()> {
        let rows: Vec<VehicleRow> = self.vehicles.borrow().iter().map(VehicleRow::from).collect();
        self.table.write_rows(&rows)
    }

    /// Get total vehicle count
    pub fn count(&self) -> usize {
        self.vehicles.borrow().len()
    }
}

impl VehicleRepository for CsvVehicleRepository {
    fn find_all(&self) -> Result<Vec<Vehicle>> {
        Ok(self.vehicles.borrow().clone())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Vehicle>> {
        Ok(self.vehicles.borrow().iter().find(|v| v.id == id).cloned())
    }

    fn save(&self, vehicle: &Vehicle) -> Result<()> {
        let mut vehicles = self.vehicles.borrow_mut();
        match vehicles.iter_mut().find(|v| v.id == vehicle.id) {
            Some(existing) => *existing = vehicle.clone(),
            None => vehicles.push(vehicle.clone()),
        }
        drop(vehicles);
        self.persist()
    }

    fn remove(&self, id: &str) -> Result<bool> {
        let mut vehicles = self.vehicles.borrow_mut();
        let before = vehicles.len();
        vehicles.retain(|v| v.id != id);
        let removed = vehicles.len() != before;
        drop(vehicles);
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    fn apply_update(&self, id: &str, update: &VehicleUpdate) -> Result<()> {
        let mut vehicles = self.vehicles.borrow_mut();
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| Error::VehicleNotFound(id.to_string()))?;
        vehicle.apply(update);
        drop(vehicles);
        self.persist()
    }
}
