//! Domain layer: fleet and catalog models, the vehicle allocator, and the
//! repository traits the persistence layer implements.

pub mod model;
pub mod repository;
pub mod service;

pub use model::*;
pub use repository::{CatalogRepository, OrderRepository, VehicleRepository};
