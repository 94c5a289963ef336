//! Fleet import from TOML
//!
//! ```toml
//! [[vehicles]]
//! kind = "truck"
//! city = "Lisbon"
//! country = "Portugal"
//! max_weight = 2500.0   # optional, overrides the preset
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use fleetload_domain::model::CapacityPreset;
use fleetload_types::{ConfigError, Error, Location, Result, VehicleKind};
use serde::Deserialize;

/// Container for parsing a fleet file
#[derive(Debug, Deserialize)]
struct FleetFile {
    #[serde(default)]
    vehicles: Vec<FleetEntry>,
}

/// One `[[vehicles]]` table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FleetEntry {
    pub kind: VehicleKind,
    /// Explicit ID; generated on import when absent
    #[serde(default)]
    pub id: Option<String>,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub max_weight: Option<f64>,
    #[serde(default)]
    pub max_items: Option<u32>,
}

impl FleetEntry {
    pub fn location(&self) -> Location {
        Location::new(self.city.trim(), self.country.trim())
    }

    /// Capacities for this entry, falling back to `preset` per field
    pub fn capacity(&self, preset: CapacityPreset) -> CapacityPreset {
        CapacityPreset {
            max_weight: self.max_weight.unwrap_or(preset.max_weight),
            max_items: self.max_items.unwrap_or(preset.max_items),
        }
    }

    fn validate(&self, index: usize) -> std::result::Result<(), String> {
        if self.city.trim().is_empty() || self.country.trim().is_empty() {
            return Err(format!("vehicles[{}]: city and country are required", index));
        }
        if self.city.contains('/') || self.country.contains('/') {
            return Err(format!("vehicles[{}]: '/' is not allowed in a location", index));
        }
        if let Some(w) = self.max_weight {
            if !(w > 0.0) {
                return Err(format!("vehicles[{}]: max_weight must be positive", index));
            }
        }
        if self.max_items == Some(0) {
            return Err(format!("vehicles[{}]: max_items must be positive", index));
        }
        Ok(())
    }
}

/// Vehicles parsed from a fleet TOML file, in file order
#[derive(Debug)]
pub struct FleetLoader {
    entries: Vec<FleetEntry>,
}

impl FleetLoader {
    /// Load a fleet definition from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to read fleet file {}: {}",
                path.display(),
                e
            )))
        })?;

        Self::load_from_str(&content)
    }

    /// Load a fleet definition from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let file: FleetFile = toml::from_str(toml_content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse fleet TOML: {}",
                e
            )))
        })?;

        let mut ids = HashSet::new();
        for (index, entry) in file.vehicles.iter().enumerate() {
            entry
                .validate(index)
                .map_err(|msg| Error::Config(ConfigError::ParseError(msg)))?;
            if let Some(ref id) = entry.id {
                if !ids.insert(id.as_str()) {
                    return Err(Error::Config(ConfigError::ParseError(format!(
                        "Duplicate vehicle ID {} in fleet file",
                        id
                    ))));
                }
            }
        }

        Ok(Self {
            entries: file.vehicles,
        })
    }

    pub fn entries(&self) -> &[FleetEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<FleetEntry> {
        self.entries
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }
}
