//! Repository adapters for persistence layer

use std::path::PathBuf;

use fleetload_infra::persistence::{
    CsvCatalogRepository, CsvVehicleRepository, FileOrderRepository,
};
use fleetload_types::Result;

use crate::config::Config;

/// Every repository the services need, opened on one data directory
pub struct Repositories {
    pub vehicles: CsvVehicleRepository,
    pub catalog: CsvCatalogRepository,
    pub orders: FileOrderRepository,
}

impl Repositories {
    pub fn open(config: &Config) -> Result<Self> {
        Self::open_at(config.store_dir()?)
    }

    pub fn open_at(store_dir: PathBuf) -> Result<Self> {
        Ok(Self {
            vehicles: CsvVehicleRepository::open(store_dir.clone())?,
            catalog: CsvCatalogRepository::open(store_dir.clone())?,
            orders: FileOrderRepository::open(store_dir)?,
        })
    }
}

/// Open CSV vehicle repository
pub fn open_vehicle_repo(config: &Config) -> Result<CsvVehicleRepository> {
    CsvVehicleRepository::open(config.store_dir()?)
}

/// Open CSV catalog repository
pub fn open_catalog_repo(config: &Config) -> Result<CsvCatalogRepository> {
    CsvCatalogRepository::open(config.store_dir()?)
}

/// Open file-based order repository
pub fn open_order_repo(config: &Config) -> Result<FileOrderRepository> {
    FileOrderRepository::open(config.store_dir()?)
}
