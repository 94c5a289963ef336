//! Configuration management for fleetload
//!
//! Config stored at: ~/.config/fleetload/config.json

use std::fs;
use std::path::{Path, PathBuf};

use fleetload_domain::model::CapacityPreset;
use fleetload_types::{ConfigError, OutputFormat, Result, VehicleKind};
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "fleetload";

/// Capacities new vehicles are registered with, per kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityPresets {
    #[serde(default = "default_bike")]
    pub bike: CapacityPreset,
    #[serde(default = "default_truck")]
    pub truck: CapacityPreset,
    #[serde(default = "default_ship")]
    pub ship: CapacityPreset,
}

fn default_bike() -> CapacityPreset {
    CapacityPreset::default_for(VehicleKind::TwoWheeled)
}

fn default_truck() -> CapacityPreset {
    CapacityPreset::default_for(VehicleKind::MediumGround)
}

fn default_ship() -> CapacityPreset {
    CapacityPreset::default_for(VehicleKind::BulkMarine)
}

impl Default for CapacityPresets {
    fn default() -> Self {
        Self {
            bike: default_bike(),
            truck: default_truck(),
            ship: default_ship(),
        }
    }
}

impl CapacityPresets {
    pub fn for_kind(&self, kind: VehicleKind) -> CapacityPreset {
        match kind {
            VehicleKind::TwoWheeled => self.bike,
            VehicleKind::MediumGround => self.truck,
            VehicleKind::BulkMarine => self.ship,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding vehicles.csv, items.csv and orders.json
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    #[serde(default)]
    pub presets: CapacityPresets,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            output_format: OutputFormat::Table,
            presets: CapacityPresets::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Directory the repositories live in
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(data_dir)
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)).into())
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveError(format!("{}: {}", parent.display(), e)))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .map_err(|e| ConfigError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Fleetload Configuration")?;
        writeln!(f, "=======================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Data dir:       {}",
            self.store_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f)?;
        writeln!(f, "Capacity presets:")?;
        for kind in VehicleKind::ALL {
            let preset = self.presets.for_kind(kind);
            writeln!(
                f,
                "  {:<6} {:>10} kg  {:>6} items",
                kind.label(),
                preset.max_weight,
                preset.max_items
            )?;
        }

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}
