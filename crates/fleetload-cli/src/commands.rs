//! Command handlers

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use fleetload_app::app::{CatalogService, FleetService, NewOrder, OrderService};
use fleetload_app::config::Config;
use fleetload_app::repository::{open_catalog_repo, open_vehicle_repo, Repositories};
use fleetload_types::{Error, Location, OutputFormat, Result};
use tracing::warn;

use crate::cli::{Cli, Commands, ItemAction, OrderAction, VehicleAction};
use crate::output::{
    output_add_items, output_item, output_items, output_order, output_orders,
    output_status_change, output_vehicle, output_vehicles,
};

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if cli.data_dir.is_some() {
        config.data_dir = cli.data_dir.clone();
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Vehicle { action } => cmd_vehicle(&config, action, output_format),
        Commands::Item { action } => cmd_item(&config, action, output_format),
        Commands::Order { action } => cmd_order(&config, action, output_format),
        Commands::Config {
            show,
            set_data_dir,
            set_output,
            reset,
        } => cmd_config(show, set_data_dir, set_output, reset),
    }
}

fn cmd_vehicle(config: &Config, action: VehicleAction, format: OutputFormat) -> Result<()> {
    let repo = open_vehicle_repo(config)?;
    let fleet = FleetService::new(&repo, config.presets);

    match action {
        VehicleAction::Add {
            kind,
            city,
            country,
            id,
        } => {
            let vehicle = fleet.register(kind, location(&city, &country)?, id)?;
            output_vehicle(format, "Registered", &vehicle)
        }
        VehicleAction::List => output_vehicles(format, &fleet.list()?),
        VehicleAction::Remove { id } => {
            let removed = fleet.remove(&id)?;
            output_vehicle(format, "Removed", &removed)
        }
        VehicleAction::Import { file } => {
            let imported = fleet.import(&file)?;
            if format == OutputFormat::Table {
                println!("Imported {} vehicle(s) from {}\n", imported.len(), file.display());
            }
            output_vehicles(format, &imported)
        }
    }
}

fn cmd_item(config: &Config, action: ItemAction, format: OutputFormat) -> Result<()> {
    let repo = open_catalog_repo(config)?;
    let catalog = CatalogService::new(&repo);

    match action {
        ItemAction::Add {
            weight,
            price_per_kg,
            kind,
            id,
        } => {
            let item = catalog.add(weight, price_per_kg, kind, id)?;
            output_item(format, &item)
        }
        ItemAction::List => output_items(format, &catalog.list()?),
        ItemAction::Remove { id } => {
            catalog.remove(&id)?;
            if format == OutputFormat::Table {
                println!("Removed item {}", id);
            }
            Ok(())
        }
    }
}

fn cmd_order(config: &Config, action: OrderAction, format: OutputFormat) -> Result<()> {
    let repos = Repositories::open(config)?;
    let mut orders = OrderService::new(&repos.vehicles, &repos.catalog, &repos.orders);

    match action {
        OrderAction::Create {
            city,
            country,
            delivery_date,
            priority,
            items,
        } => {
            warn_if_past(delivery_date, Local::now().date_naive());
            let new = NewOrder {
                priority,
                delivery_location: location(&city, &country)?,
                delivery_date,
            };
            if items.is_empty() {
                return output_order(format, &orders.create_order(new)?);
            }
            let report = orders.create_order_with_items(new, &items)?;
            output_add_items(format, &report)
        }
        OrderAction::AddItems { order, items } => {
            let report = orders.add_items(&order, &items)?;
            output_add_items(format, &report)
        }
        OrderAction::Status { order, status } => {
            let change = orders.update_status(&order, status)?;
            output_status_change(format, &change)
        }
        OrderAction::Show { order } => output_order(format, &orders.find(&order)?),
        OrderAction::List => output_orders(format, &orders.list()?),
    }
}

fn cmd_config(
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(dir) = set_data_dir {
        config.data_dir = Some(dir);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

/// City and country as given on the command line; `/` is the stored separator
fn location(city: &str, country: &str) -> Result<Location> {
    let (city, country) = (city.trim(), country.trim());
    if city.is_empty() || country.is_empty() {
        return Err(Error::InvalidInput("City and country are required".to_string()));
    }
    if city.contains('/') || country.contains('/') {
        return Err(Error::InvalidInput(format!(
            "'/' is not allowed in a location: {}/{}",
            city, country
        )));
    }
    Ok(Location::new(city, country))
}

fn warn_if_past(date: NaiveDate, today: NaiveDate) {
    if date < today {
        warn!(%date, %today, "Delivery date is in the past");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_validation() {
        assert_eq!(
            location(" Ghent ", "Belgium").unwrap(),
            Location::new("Ghent", "Belgium")
        );
        assert!(location("", "Belgium").is_err());
        assert!(location("Ghent/Nord", "Belgium").is_err());
    }
}
