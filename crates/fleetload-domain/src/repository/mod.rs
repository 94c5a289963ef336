//! Repository trait definitions for data persistence

use fleetload_types::Error;

use crate::model::{CatalogItem, Order, Vehicle, VehicleUpdate};

/// Repository for fleet vehicles
pub trait VehicleRepository {
    /// Load the whole fleet
    fn find_all(&self) -> Result<Vec<Vehicle>, Error>;

    /// Find a vehicle by ID
    fn find_by_id(&self, id: &str) -> Result<Option<Vehicle>, Error>;

    /// Insert or replace a vehicle
    fn save(&self, vehicle: &Vehicle) -> Result<(), Error>;

    /// Remove a vehicle, returning whether it existed
    fn remove(&self, id: &str) -> Result<bool, Error>;

    /// Overwrite selected fields of one vehicle.
    ///
    /// Fails with [`Error::VehicleNotFound`] if the ID is absent.
    fn apply_update(&self, id: &str, update: &VehicleUpdate) -> Result<(), Error>;
}

/// Repository for catalog items
pub trait CatalogRepository {
    fn find_all(&self) -> Result<Vec<CatalogItem>, Error>;

    fn find_by_id(&self, id: &str) -> Result<Option<CatalogItem>, Error>;

    fn save(&self, item: &CatalogItem) -> Result<(), Error>;

    fn remove(&self, id: &str) -> Result<bool, Error>;
}

/// Repository for shipment orders
pub trait OrderRepository {
    fn find_all(&self) -> Result<Vec<Order>, Error>;

    fn find_by_id(&self, id: &str) -> Result<Option<Order>, Error>;

    /// Insert or replace an order
    fn save(&self, order: &Order) -> Result<(), Error>;
}
