//! Shared enums and value types

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Vehicle type, generalized from the bike / truck / ship fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum VehicleKind {
    /// Two-wheeled courier (bike)
    #[serde(rename = "Bike", alias = "bike")]
    #[value(name = "bike", alias = "two-wheeled")]
    TwoWheeled,
    /// Medium ground vehicle (truck)
    #[serde(rename = "Truck", alias = "truck")]
    #[value(name = "truck", alias = "medium-ground")]
    MediumGround,
    /// Bulk marine carrier (ship)
    #[serde(rename = "Ship", alias = "ship")]
    #[value(name = "ship", alias = "bulk-marine")]
    BulkMarine,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 3] = [
        VehicleKind::TwoWheeled,
        VehicleKind::MediumGround,
        VehicleKind::BulkMarine,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            VehicleKind::TwoWheeled => "Bike",
            VehicleKind::MediumGround => "Truck",
            VehicleKind::BulkMarine => "Ship",
        }
    }

    /// Prefix letter used for generated vehicle IDs
    pub fn id_prefix(&self) -> &'static str {
        match self {
            VehicleKind::TwoWheeled => "B",
            VehicleKind::MediumGround => "T",
            VehicleKind::BulkMarine => "S",
        }
    }

    /// Fragile goods never travel on two-wheeled vehicles
    pub fn accepts(&self, item: ItemKind) -> bool {
        !(*self == VehicleKind::TwoWheeled && item == ItemKind::Fragile)
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Catalog item handling class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Fragile,
    Solid,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Fragile => write!(f, "fragile"),
            ItemKind::Solid => write!(f, "solid"),
        }
    }
}

/// Vehicle availability
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Free,
    InUse,
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleStatus::Free => write!(f, "free"),
            VehicleStatus::InUse => write!(f, "in_use"),
        }
    }
}

/// Order progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Processing,
    Delivered,
    Canceled,
}

impl OrderStatus {
    /// Delivered and canceled orders no longer hold vehicles
    pub fn is_final(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Canceled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Processing => write!(f, "processing"),
            OrderStatus::Delivered => write!(f, "delivered"),
            OrderStatus::Canceled => write!(f, "canceled"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// City / country pair, stored as `City/Country`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location {
    pub city: String,
    pub country: String,
}

impl Location {
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.city, self.country)
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (city, country) = s
            .split_once('/')
            .ok_or_else(|| Error::InvalidInput(format!("Location must be City/Country: {}", s)))?;
        let (city, country) = (city.trim(), country.trim());
        if city.is_empty() || country.is_empty() {
            return Err(Error::InvalidInput(format!(
                "Location must be City/Country: {}",
                s
            )));
        }
        Ok(Location::new(city, country))
    }
}

impl TryFrom<String> for Location {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.to_string()
    }
}
