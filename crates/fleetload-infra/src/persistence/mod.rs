//! Persistence layer implementations

pub mod csv_catalog_repo;
pub mod csv_vehicle_repo;
pub mod file_order_repo;

pub use csv_catalog_repo::CsvCatalogRepository;
pub use csv_vehicle_repo::CsvVehicleRepository;
pub use file_order_repo::FileOrderRepository;
