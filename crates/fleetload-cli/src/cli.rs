//! CLI definition using clap

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fleetload_domain::model::RequestLine;
use fleetload_types::{ItemKind, OrderStatus, OutputFormat, Priority, VehicleKind};

#[derive(Parser)]
#[command(name = "fleetload")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Load shipment orders onto a bike / truck / ship fleet")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory override (vehicles.csv, items.csv, orders.json)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output (debug logs on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the vehicle fleet
    Vehicle {
        #[command(subcommand)]
        action: VehicleAction,
    },

    /// Manage the item catalog
    Item {
        #[command(subcommand)]
        action: ItemAction,
    },

    /// Create orders, add items and track status
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum VehicleAction {
    /// Register a vehicle with the preset capacities for its kind
    Add {
        #[arg(long, short = 'k', value_enum)]
        kind: VehicleKind,

        #[arg(long)]
        city: String,

        #[arg(long)]
        country: String,

        /// Explicit vehicle ID (generated if omitted)
        #[arg(long)]
        id: Option<String>,
    },

    /// List the fleet
    List,

    /// Remove a vehicle (refused while it is in use)
    Remove { id: String },

    /// Register every vehicle in a fleet TOML file
    Import { file: PathBuf },
}

#[derive(Subcommand)]
pub enum ItemAction {
    /// Add an item type to the catalog
    Add {
        /// Weight of one unit in kg
        #[arg(long, short = 'w')]
        weight: f64,

        #[arg(long, short = 'p')]
        price_per_kg: f64,

        #[arg(long, short = 'k', value_enum)]
        kind: ItemKind,

        /// Explicit item ID (generated if omitted)
        #[arg(long)]
        id: Option<String>,
    },

    /// List the catalog
    List,

    /// Remove an item type
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum OrderAction {
    /// Create an order, optionally with items
    Create {
        #[arg(long)]
        city: String,

        #[arg(long)]
        country: String,

        /// Delivery date (YYYY-MM-DD)
        #[arg(long, short = 'd')]
        delivery_date: NaiveDate,

        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,

        /// Item and quantity as ITEM:QTY (repeatable)
        #[arg(long = "item", short = 'i', value_parser = parse_request_line)]
        items: Vec<RequestLine>,
    },

    /// Add items to a processing order and load them onto free vehicles
    AddItems {
        order: String,

        /// Item and quantity as ITEM:QTY (repeatable)
        #[arg(long = "item", short = 'i', required = true, value_parser = parse_request_line)]
        items: Vec<RequestLine>,
    },

    /// Change order status; delivered or canceled frees its vehicles
    Status {
        order: String,

        #[arg(value_enum)]
        status: OrderStatus,
    },

    /// Show one order
    Show { order: String },

    /// List all orders
    List,
}

fn parse_request_line(s: &str) -> Result<RequestLine, String> {
    RequestLine::parse(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_items() {
        let cli = Cli::try_parse_from([
            "fleetload",
            "order",
            "add-items",
            "O12ab34cd",
            "--item",
            "I1:3",
            "-i",
            "I2:10",
        ])
        .unwrap();

        match cli.command {
            Commands::Order {
                action: OrderAction::AddItems { order, items },
            } => {
                assert_eq!(order, "O12ab34cd");
                assert_eq!(items, vec![RequestLine::new("I1", 3), RequestLine::new("I2", 10)]);
            }
            _ => panic!("expected order add-items"),
        }
    }

    #[test]
    fn test_add_items_requires_item() {
        assert!(Cli::try_parse_from(["fleetload", "order", "add-items", "O1"]).is_err());
        assert!(
            Cli::try_parse_from(["fleetload", "order", "add-items", "O1", "--item", "I1:0"])
                .is_err()
        );
    }

    #[test]
    fn test_parse_vehicle_add_aliases() {
        let cli = Cli::try_parse_from([
            "fleetload",
            "-f",
            "json",
            "vehicle",
            "add",
            "--kind",
            "two-wheeled",
            "--city",
            "Turin",
            "--country",
            "Italy",
        ])
        .unwrap();

        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Commands::Vehicle {
                action: VehicleAction::Add { kind, city, .. },
            } => {
                assert_eq!(kind, VehicleKind::TwoWheeled);
                assert_eq!(city, "Turin");
            }
            _ => panic!("expected vehicle add"),
        }
    }

    #[test]
    fn test_parse_order_create_defaults() {
        let cli = Cli::try_parse_from([
            "fleetload",
            "order",
            "create",
            "--city",
            "Basel",
            "--country",
            "Switzerland",
            "--delivery-date",
            "2026-11-30",
        ])
        .unwrap();

        match cli.command {
            Commands::Order {
                action:
                    OrderAction::Create {
                        priority,
                        items,
                        delivery_date,
                        ..
                    },
            } => {
                assert_eq!(priority, Priority::Medium);
                assert!(items.is_empty());
                assert_eq!(delivery_date, NaiveDate::from_ymd_opt(2026, 11, 30).unwrap());
            }
            _ => panic!("expected order create"),
        }
    }

    #[test]
    fn test_parse_status() {
        let cli =
            Cli::try_parse_from(["fleetload", "order", "status", "O1", "delivered"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Order {
                action: OrderAction::Status {
                    status: OrderStatus::Delivered,
                    ..
                }
            }
        ));
    }
}
