//! Output formatting module

use fleetload_app::app::{AddItemsReport, StatusChange};
use fleetload_domain::model::{CatalogItem, Order, Vehicle};
use fleetload_types::{OutputFormat, Result};
use serde::Serialize;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn output_vehicles(format: OutputFormat, vehicles: &[Vehicle]) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(vehicles);
    }

    if vehicles.is_empty() {
        println!("No vehicles registered.");
        return Ok(());
    }

    println!(
        "{:<12} {:<6} {:>12} {:>9} {:>12} {:>9}  {:<24} {}",
        "ID", "Type", "Max kg", "Max items", "Free kg", "Free items", "Position", "Status"
    );
    println!("{}", "-".repeat(104));
    for v in vehicles {
        println!(
            "{:<12} {:<6} {:>12.2} {:>9} {:>12.2} {:>9}  {:<24} {}",
            v.id,
            v.kind.label(),
            v.max_weight,
            v.max_items,
            v.remaining_weight,
            v.remaining_items,
            v.position.to_string(),
            v.status
        );
    }
    println!("\n{} vehicle(s)", vehicles.len());
    Ok(())
}

pub fn output_vehicle(format: OutputFormat, action: &str, vehicle: &Vehicle) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(vehicle);
    }
    println!(
        "{} {} {} ({} kg / {} items) at {}",
        action,
        vehicle.kind.label(),
        vehicle.id,
        vehicle.max_weight,
        vehicle.max_items,
        vehicle.position
    );
    Ok(())
}

pub fn output_items(format: OutputFormat, items: &[CatalogItem]) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(items);
    }

    if items.is_empty() {
        println!("No items in catalog.");
        return Ok(());
    }

    println!("{:<12} {:>10} {:>12}  {}", "ID", "Weight kg", "Price/kg", "Type");
    println!("{}", "-".repeat(46));
    for item in items {
        println!(
            "{:<12} {:>10.2} {:>12.2}  {}",
            item.id, item.unit_weight, item.price_per_kg, item.kind
        );
    }
    Ok(())
}

pub fn output_item(format: OutputFormat, item: &CatalogItem) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(item);
    }
    println!(
        "Added {} item {} ({} kg, {} per kg)",
        item.kind, item.id, item.unit_weight, item.price_per_kg
    );
    Ok(())
}

pub fn output_orders(format: OutputFormat, orders: &[Order]) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(orders);
    }

    if orders.is_empty() {
        println!("No orders.");
        return Ok(());
    }

    println!(
        "{:<12} {:<8} {:<11} {:<24} {:>7} {:>12} {:>9}",
        "ID", "Priority", "Status", "Destination", "Units", "Weight kg", "Vehicles"
    );
    println!("{}", "-".repeat(89));
    for o in orders {
        println!(
            "{:<12} {:<8} {:<11} {:<24} {:>7} {:>12.2} {:>9}",
            o.id,
            o.priority.to_string(),
            o.status.to_string(),
            o.delivery_location.to_string(),
            o.item_count(),
            o.total_weight,
            o.vehicle_ids().len()
        );
    }
    Ok(())
}

pub fn output_order(format: OutputFormat, order: &Order) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(order);
    }
    print_order_detail(order);
    Ok(())
}

fn print_order_detail(order: &Order) {
    println!("\nOrder {}", order.id);
    println!("=================");
    println!("Status:          {}", order.status);
    println!("Priority:        {}", order.priority);
    println!("Destination:     {}", order.delivery_location);
    println!("Delivery date:   {}", order.delivery_date);
    println!("Created:         {}", order.created_at.format("%Y-%m-%d %H:%M:%S"));
    println!("Total weight:    {:.2} kg", order.total_weight);
    println!("Total amount:    {:.2}", order.total_amount());

    if !order.lines.is_empty() {
        println!("\n--- Items ---");
        for line in &order.lines {
            println!(
                "  {:<12} x{:<6} {:>10.2} kg  {:>10.2}",
                line.item_id,
                line.quantity,
                line.weight,
                line.amount()
            );
        }
    }

    let vehicle_ids = order.vehicle_ids();
    if !vehicle_ids.is_empty() {
        println!("\n--- Vehicles ---");
        println!("  {}", vehicle_ids.join(", "));
    }
}

pub fn output_add_items(format: OutputFormat, report: &AddItemsReport) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(report);
    }

    println!("\nLoading");
    println!("=======");
    if report.outcome.loads.is_empty() {
        println!("Nothing was loaded.");
    }
    for load in &report.outcome.loads {
        println!(
            "  {:<6} {:<12} <- {:<12} x{:<6} {:>10.2} kg",
            load.vehicle_kind.label(),
            load.vehicle_id,
            load.item_id,
            load.units,
            load.weight
        );
    }

    if !report.outcome.loads.is_empty() {
        println!(
            "  Loaded {} unit(s), {:.2} kg",
            report.outcome.loaded_units(),
            report.outcome.loaded_weight()
        );
    }

    for item_id in report.outcome.unknown_items() {
        println!("  Skipped unknown item {}", item_id);
    }
    for vehicle_id in &report.missing_vehicles {
        println!("  Vehicle {} was removed before it could be loaded", vehicle_id);
    }

    if report.has_shortfall() {
        println!("\nNot enough vehicle capacity to load all items!");
        println!("Units left unloaded: {}", report.outcome.remainder);
        for line in &report.unloaded {
            println!("  {:<12} x{}", line.item_id, line.quantity);
        }
    }

    print_order_detail(&report.order);
    Ok(())
}

pub fn output_status_change(format: OutputFormat, change: &StatusChange) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(change);
    }

    println!(
        "Order {}: {} -> {}",
        change.order.id, change.from, change.order.status
    );
    if let Some(ref release) = change.release {
        if !release.released.is_empty() {
            println!("Freed vehicles: {}", release.released.join(", "));
        }
        if !release.missing.is_empty() {
            println!("Vehicles no longer in fleet: {}", release.missing.join(", "));
        }
    }
    Ok(())
}
