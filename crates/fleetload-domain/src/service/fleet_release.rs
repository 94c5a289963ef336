//! Returning vehicles to the free pool when an order ends

use std::collections::HashSet;

use fleetload_types::{Error, Location, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::model::VehicleUpdate;
use crate::repository::VehicleRepository;

/// How the order ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseMode {
    /// Vehicles end up at the delivery location
    Delivered(Location),
    /// Vehicles stay where they are
    Canceled,
}

/// Vehicles that were reset, and IDs that no longer exist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseReport {
    pub released: Vec<String>,
    pub missing: Vec<String>,
}

/// Reset every referenced vehicle to full capacity and `free`.
///
/// Each distinct ID is reset once. A vehicle that cannot be found is
/// recorded in [`ReleaseReport::missing`] and the rest still go through;
/// earlier resets are not rolled back.
pub fn release_vehicles<R>(
    repo: &R,
    vehicle_ids: &[String],
    mode: &ReleaseMode,
) -> Result<ReleaseReport>
where
    R: VehicleRepository + ?Sized,
{
    let mut report = ReleaseReport::default();
    let mut seen = HashSet::new();

    for id in vehicle_ids {
        if !seen.insert(id.as_str()) {
            continue;
        }

        let Some(vehicle) = repo.find_by_id(id)? else {
            warn!(vehicle_id = %id, "No vehicle found, skipping reset");
            report.missing.push(id.clone());
            continue;
        };

        let mut update = VehicleUpdate::reset(&vehicle);
        if let ReleaseMode::Delivered(location) = mode {
            update = update.with_position(location.clone());
        }

        let position = update.position.as_ref().unwrap_or(&vehicle.position);
        match repo.apply_update(id, &update) {
            Ok(()) => {
                info!(vehicle_id = %id, %position, "Vehicle freed and capacities reset");
                report.released.push(id.clone());
            }
            Err(Error::VehicleNotFound(_)) => {
                warn!(vehicle_id = %id, "Vehicle disappeared before reset");
                report.missing.push(id.clone());
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}
