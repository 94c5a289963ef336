//! Infrastructure layer
//!
//! Concrete implementations of the domain repository traits (CSV tables for
//! the fleet and catalog, a JSON file for orders) and the TOML fleet loader.

pub mod csv_table;
pub mod fleet_loader;
pub mod persistence;
