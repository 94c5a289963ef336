//! Domain model types

pub mod catalog_item;
pub mod order;
pub mod vehicle;

pub use catalog_item::CatalogItem;
pub use order::{AllocationRecord, Order, OrderLine, RequestLine};
pub use vehicle::{CapacityPreset, Vehicle, VehicleUpdate};
