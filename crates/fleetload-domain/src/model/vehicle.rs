//! Fleet vehicle type definitions

use fleetload_types::{Location, VehicleKind, VehicleStatus};
use serde::{Deserialize, Serialize};

/// Maximum load a vehicle is registered with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityPreset {
    /// Maximum weight in kg
    pub max_weight: f64,
    /// Maximum number of item units
    pub max_items: u32,
}

impl CapacityPreset {
    /// Standard capacities per vehicle kind
    pub fn default_for(kind: VehicleKind) -> Self {
        match kind {
            VehicleKind::TwoWheeled => CapacityPreset {
                max_weight: 10.0,
                max_items: 2,
            },
            VehicleKind::MediumGround => CapacityPreset {
                max_weight: 3000.0,
                max_items: 100,
            },
            VehicleKind::BulkMarine => CapacityPreset {
                max_weight: 100_000.0,
                max_items: 10_000,
            },
        }
    }
}

/// A delivery vehicle and its current load state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub kind: VehicleKind,
    /// Maximum weight capacity in kg, fixed at creation
    pub max_weight: f64,
    /// Maximum item-count capacity, fixed at creation
    pub max_items: u32,
    /// Remaining weight capacity in kg
    pub remaining_weight: f64,
    /// Remaining item-count capacity
    pub remaining_items: u32,
    pub position: Location,
    pub status: VehicleStatus,
}

impl Vehicle {
    /// Create an empty, free vehicle
    pub fn new(
        id: impl Into<String>,
        kind: VehicleKind,
        max_weight: f64,
        max_items: u32,
        position: Location,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            max_weight,
            max_items,
            remaining_weight: max_weight,
            remaining_items: max_items,
            position,
            status: VehicleStatus::Free,
        }
    }

    pub fn from_preset(
        id: impl Into<String>,
        kind: VehicleKind,
        preset: CapacityPreset,
        position: Location,
    ) -> Self {
        Self::new(id, kind, preset.max_weight, preset.max_items, position)
    }

    pub fn is_in_use(&self) -> bool {
        self.status == VehicleStatus::InUse
    }

    /// Free, with room left for both weight and item count
    pub fn is_eligible(&self) -> bool {
        !self.is_in_use() && self.remaining_weight > 0.0 && self.remaining_items > 0
    }

    /// Apply a partial field update
    pub fn apply(&mut self, update: &VehicleUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(weight) = update.remaining_weight {
            self.remaining_weight = weight;
        }
        if let Some(items) = update.remaining_items {
            self.remaining_items = items;
        }
        if let Some(ref position) = update.position {
            self.position = position.clone();
        }
    }
}

/// Partial set of vehicle fields to overwrite
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleUpdate {
    #[serde(default)]
    pub status: Option<VehicleStatus>,
    #[serde(default)]
    pub remaining_weight: Option<f64>,
    #[serde(default)]
    pub remaining_items: Option<u32>,
    #[serde(default)]
    pub position: Option<Location>,
}

impl VehicleUpdate {
    /// Update that empties the vehicle and frees it.
    ///
    /// Resets to the maximum rather than adding back what was loaded, so
    /// applying it twice leaves the same state.
    pub fn reset(vehicle: &Vehicle) -> Self {
        Self {
            status: Some(VehicleStatus::Free),
            remaining_weight: Some(vehicle.max_weight),
            remaining_items: Some(vehicle.max_items),
            position: None,
        }
    }

    pub fn with_position(mut self, position: Location) -> Self {
        self.position = Some(position);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bike() -> Vehicle {
        Vehicle::from_preset(
            "B1",
            VehicleKind::TwoWheeled,
            CapacityPreset::default_for(VehicleKind::TwoWheeled),
            Location::new("Oslo", "Norway"),
        )
    }

    #[test]
    fn test_new_vehicle_is_empty_and_free() {
        let v = bike();
        assert_eq!(v.max_weight, 10.0);
        assert_eq!(v.max_items, 2);
        assert_eq!(v.remaining_weight, 10.0);
        assert_eq!(v.remaining_items, 2);
        assert!(v.is_eligible());
    }

    #[test]
    fn test_in_use_is_not_eligible() {
        let mut v = bike();
        v.status = VehicleStatus::InUse;
        assert!(!v.is_eligible());
    }

    #[test]
    fn test_full_vehicle_is_not_eligible() {
        let mut v = bike();
        v.remaining_items = 0;
        assert!(!v.is_eligible());

        let mut v = bike();
        v.remaining_weight = 0.0;
        assert!(!v.is_eligible());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut v = bike();
        v.apply(&VehicleUpdate {
            status: Some(VehicleStatus::InUse),
            remaining_weight: Some(4.0),
            remaining_items: Some(1),
            position: None,
        });
        assert!(v.is_in_use());

        let reset = VehicleUpdate::reset(&v);
        v.apply(&reset);
        let once = v.clone();
        v.apply(&VehicleUpdate::reset(&v));
        assert_eq!(v, once);
        assert_eq!(v.remaining_weight, 10.0);
        assert_eq!(v.remaining_items, 2);
        assert_eq!(v.status, VehicleStatus::Free);
    }

    #[test]
    fn test_reset_update_with_position() {
        let mut v = bike();
        v.status = VehicleStatus::InUse;
        v.remaining_items = 0;
        let update = VehicleUpdate::reset(&v).with_position(Location::new("Rome", "Italy"));
        v.apply(&update);
        assert_eq!(v.position.to_string(), "Rome/Italy");
        assert_eq!(v.remaining_items, 2);
        assert!(!v.is_in_use());
    }
}
