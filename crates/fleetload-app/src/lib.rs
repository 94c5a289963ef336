//! Application service layer - use cases, config, repository wiring

pub mod app;
pub mod config;
pub mod id;
pub mod repository;
