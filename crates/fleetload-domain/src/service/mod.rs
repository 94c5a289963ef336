//! Domain services

pub mod allocator;
pub mod fleet_release;

pub use allocator::{
    allocate, request_totals, AllocationDiagnostic, AllocationOutcome, CatalogLookup, LoadEntry,
};
pub use fleet_release::{release_vehicles, ReleaseMode, ReleaseReport};
