//! Application use cases

pub mod catalog_service;
pub mod fleet_service;
pub mod order_service;

pub use catalog_service::CatalogService;
pub use fleet_service::FleetService;
pub use order_service::{AddItemsReport, NewOrder, OrderService, StatusChange};
