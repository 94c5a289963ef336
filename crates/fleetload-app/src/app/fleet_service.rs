//! Fleet management: registering, importing and retiring vehicles

use std::collections::HashSet;
use std::path::Path;

use fleetload_domain::model::{CapacityPreset, Vehicle};
use fleetload_domain::repository::VehicleRepository;
use fleetload_infra::fleet_loader::FleetLoader;
use fleetload_types::{Error, Location, Result, VehicleKind};
use tracing::info;

use crate::config::CapacityPresets;
use crate::id::generate_id;

pub struct FleetService<'a, V: VehicleRepository + ?Sized> {
    vehicles: &'a V,
    presets: CapacityPresets,
}

impl<'a, V: VehicleRepository + ?Sized> FleetService<'a, V> {
    pub fn new(vehicles: &'a V, presets: CapacityPresets) -> Self {
        Self { vehicles, presets }
    }

    /// Register a free, empty vehicle with the preset capacities for `kind`
    pub fn register(
        &self,
        kind: VehicleKind,
        position: Location,
        id: Option<String>,
    ) -> Result<Vehicle> {
        self.register_with(kind, self.presets.for_kind(kind), position, id)
    }

    fn register_with(
        &self,
        kind: VehicleKind,
        capacity: CapacityPreset,
        position: Location,
        id: Option<String>,
    ) -> Result<Vehicle> {
        let id = match id {
            Some(id) => {
                if self.vehicles.find_by_id(&id)?.is_some() {
                    return Err(Error::InvalidInput(format!(
                        "Vehicle with ID {} already exists",
                        id
                    )));
                }
                id
            }
            None => generate_id(kind.id_prefix()),
        };

        let vehicle = Vehicle::from_preset(id, kind, capacity, position);
        self.vehicles.save(&vehicle)?;
        info!(
            vehicle_id = %vehicle.id,
            kind = %kind,
            max_weight = vehicle.max_weight,
            max_items = vehicle.max_items,
            "Vehicle registered"
        );
        Ok(vehicle)
    }

    /// Register every vehicle in a fleet TOML file.
    ///
    /// IDs are checked against the fleet before anything is saved.
    pub fn import(&self, path: &Path) -> Result<Vec<Vehicle>> {
        let loader = FleetLoader::load_from_file(path)?;

        let existing: HashSet<String> = self
            .vehicles
            .find_all()?
            .into_iter()
            .map(|v| v.id)
            .collect();
        if let Some(id) = loader
            .entries()
            .iter()
            .filter_map(|e| e.id.as_ref())
            .find(|id| existing.contains(id.as_str()))
        {
            return Err(Error::InvalidInput(format!(
                "Vehicle with ID {} already exists",
                id
            )));
        }

        let mut imported = Vec::with_capacity(loader.count());
        for entry in loader.into_entries() {
            let capacity = entry.capacity(self.presets.for_kind(entry.kind));
            let position = entry.location();
            imported.push(self.register_with(entry.kind, capacity, position, entry.id)?);
        }
        Ok(imported)
    }

    pub fn list(&self) -> Result<Vec<Vehicle>> {
        self.vehicles.find_all()
    }

    /// Remove a vehicle. Vehicles carrying an order cannot be removed.
    pub fn remove(&self, id: &str) -> Result<Vehicle> {
        let vehicle = self
            .vehicles
            .find_by_id(id)?
            .ok_or_else(|| Error::VehicleNotFound(id.to_string()))?;
        if vehicle.is_in_use() {
            return Err(Error::VehicleInUse(id.to_string()));
        }

        self.vehicles.remove(id)?;
        info!(vehicle_id = %id, "Vehicle removed");
        Ok(vehicle)
    }
}
