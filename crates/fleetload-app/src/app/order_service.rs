//! Order Service - shipment orders and their vehicles
//!
//! Adding items to an order runs the allocator against a snapshot of the
//! fleet and writes the resulting capacities back vehicle by vehicle.
//! Finishing an order (delivered or canceled) frees every vehicle it used.

use std::collections::HashMap;

use chrono::NaiveDate;
use fleetload_domain::model::{CatalogItem, Order, OrderLine, RequestLine};
use fleetload_domain::repository::{CatalogRepository, OrderRepository, VehicleRepository};
use fleetload_domain::service::{
    allocate, release_vehicles, request_totals, AllocationOutcome, ReleaseMode, ReleaseReport,
};
use fleetload_types::{Error, Location, OrderStatus, Priority, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::id::{generate_id, ORDER_PREFIX};

/// Fields of a new order
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub priority: Priority,
    pub delivery_location: Location,
    pub delivery_date: NaiveDate,
}

/// Result of one item-addition call
#[derive(Debug, Clone, Serialize)]
pub struct AddItemsReport {
    pub outcome: AllocationOutcome,
    /// Request lines with the units no vehicle could take
    pub unloaded: Vec<RequestLine>,
    /// Vehicles that disappeared before their load could be written back
    pub missing_vehicles: Vec<String>,
    pub order: Order,
}

impl AddItemsReport {
    pub fn has_shortfall(&self) -> bool {
        !self.outcome.is_fully_allocated()
    }
}

/// Result of an order status change
#[derive(Debug, Clone, Serialize)]
pub struct StatusChange {
    pub from: OrderStatus,
    pub order: Order,
    /// Present when the change freed vehicles
    pub release: Option<ReleaseReport>,
}

pub struct OrderService<'a, V, C, O>
where
    V: VehicleRepository + ?Sized,
    C: CatalogRepository + ?Sized,
    O: OrderRepository + ?Sized,
{
    vehicles: &'a V,
    catalog: &'a C,
    orders: &'a O,
}

impl<'a, V, C, O> OrderService<'a, V, C, O>
where
    V: VehicleRepository + ?Sized,
    C: CatalogRepository + ?Sized,
    O: OrderRepository + ?Sized,
{
    pub fn new(vehicles: &'a V, catalog: &'a C, orders: &'a O) -> Self {
        Self {
            vehicles,
            catalog,
            orders,
        }
    }

    /// Create an empty order in `processing`
    pub fn create_order(&mut self, new: NewOrder) -> Result<Order> {
        let order = Order::new(
            generate_id(ORDER_PREFIX),
            new.priority,
            new.delivery_location,
            new.delivery_date,
        );
        self.orders.save(&order)?;
        info!(
            order_id = %order.id,
            destination = %order.delivery_location,
            date = %order.delivery_date,
            "Order created"
        );
        Ok(order)
    }

    /// Create an order and load `lines` onto it.
    ///
    /// The lines are checked against the catalog first, so a bad item ID
    /// leaves no empty order behind.
    pub fn create_order_with_items(
        &mut self,
        new: NewOrder,
        lines: &[RequestLine],
    ) -> Result<AddItemsReport> {
        if lines.is_empty() {
            return Err(Error::InvalidInput("No items given".to_string()));
        }
        self.prepare(lines)?;

        let order = self.create_order(new)?;
        self.add_items(&order.id, lines)
    }

    pub fn find(&self, order_id: &str) -> Result<Order> {
        self.orders
            .find_by_id(order_id)?
            .ok_or_else(|| Error::OrderNotFound(order_id.to_string()))
    }

    pub fn list(&self) -> Result<Vec<Order>> {
        self.orders.find_all()
    }

    /// Add items to a processing order and load them onto free vehicles.
    ///
    /// Takes `&mut self` so one service instance never interleaves two
    /// allocations against the same fleet snapshot. A shortfall is not an
    /// error: the lines are recorded and the remainder is reported.
    pub fn add_items(&mut self, order_id: &str, lines: &[RequestLine]) -> Result<AddItemsReport> {
        let mut order = self.find(order_id)?;
        if order.status != OrderStatus::Processing {
            return Err(Error::InvalidInput(format!(
                "Order {} is {}; items can only be added while processing",
                order.id, order.status
            )));
        }
        if lines.is_empty() {
            return Err(Error::InvalidInput("No items given".to_string()));
        }

        let (catalog, total_weight, total_items) = self.prepare(lines)?;

        let fleet = self.vehicles.find_all()?;
        let mut pending = lines.to_vec();
        let outcome = allocate(total_weight, total_items, &mut pending, &fleet, &catalog);

        let mut missing_vehicles = Vec::new();
        for record in &outcome.records {
            match self.vehicles.apply_update(&record.vehicle_id, &record.to_update()) {
                Ok(()) => {
                    info!(
                        order_id = %order.id,
                        vehicle_id = %record.vehicle_id,
                        remaining_weight = record.remaining_weight,
                        remaining_items = record.remaining_items,
                        "Vehicle loaded"
                    );
                    order.allocations.push(record.clone());
                }
                Err(Error::VehicleNotFound(_)) => {
                    warn!(
                        order_id = %order.id,
                        vehicle_id = %record.vehicle_id,
                        "Vehicle vanished before its load could be recorded"
                    );
                    missing_vehicles.push(record.vehicle_id.clone());
                }
                Err(e) => return Err(e),
            }
        }

        for line in lines {
            if let Some(item) = catalog.get(&line.item_id) {
                order.lines.push(OrderLine {
                    item_id: item.id.clone(),
                    quantity: line.quantity,
                    weight: item.weight_of(line.quantity),
                    price_per_kg: item.price_per_kg,
                });
            }
        }
        order.total_weight += total_weight;
        self.orders.save(&order)?;

        let unloaded = pending.into_iter().filter(|l| l.quantity > 0).collect();
        Ok(AddItemsReport {
            outcome,
            unloaded,
            missing_vehicles,
            order,
        })
    }

    /// Move an order to `status`, freeing its vehicles when it ends.
    ///
    /// `processing -> processing` changes nothing. Delivered and canceled
    /// orders are final.
    pub fn update_status(&mut self, order_id: &str, status: OrderStatus) -> Result<StatusChange> {
        let mut order = self.find(order_id)?;
        let from = order.status;

        if from.is_final() {
            return Err(Error::InvalidTransition {
                from: from.to_string(),
                to: status.to_string(),
            });
        }

        let release = match status {
            OrderStatus::Processing => None,
            OrderStatus::Delivered => {
                let mode = ReleaseMode::Delivered(order.delivery_location.clone());
                Some(release_vehicles(self.vehicles, &order.vehicle_ids(), &mode)?)
            }
            OrderStatus::Canceled => Some(release_vehicles(
                self.vehicles,
                &order.vehicle_ids(),
                &ReleaseMode::Canceled,
            )?),
        };

        if status != from {
            order.status = status;
            self.orders.save(&order)?;
            info!(order_id = %order.id, %from, to = %status, "Order status changed");
        }

        Ok(StatusChange {
            from,
            order,
            release,
        })
    }

    /// Look up every requested item, failing on the first unknown ID, and
    /// total the request
    fn prepare(
        &self,
        lines: &[RequestLine],
    ) -> Result<(HashMap<String, CatalogItem>, f64, u32)> {
        let mut items = HashMap::new();
        for line in lines {
            if items.contains_key(&line.item_id) {
                continue;
            }
            let item = self
                .catalog
                .find_by_id(&line.item_id)?
                .ok_or_else(|| Error::ItemNotFound(line.item_id.clone()))?;
            items.insert(item.id.clone(), item);
        }
        let (total_weight, total_items) = request_totals(lines, &items)?;
        Ok((items, total_weight, total_items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repositories;
    use fleetload_domain::model::{Vehicle, VehicleUpdate};
    use fleetload_infra::persistence::CsvVehicleRepository;
    use fleetload_types::{ItemKind, VehicleKind, VehicleStatus};
    use tempfile::{tempdir, TempDir};

    /// Fleet whose `gone` vehicle is listed but can no longer be updated,
    /// as when another process removes it mid-allocation
    struct VanishingFleet<'a> {
        inner: &'a CsvVehicleRepository,
        gone: &'static str,
    }

    impl VehicleRepository for VanishingFleet<'_> {
        fn find_all(&self) -> Result<Vec<Vehicle>> {
            self.inner.find_all()
        }

        fn find_by_id(&self, id: &str) -> Result<Option<Vehicle>> {
            self.inner.find_by_id(id)
        }

        fn save(&self, vehicle: &Vehicle) -> Result<()> {
            self.inner.save(vehicle)
        }

        fn remove(&self, id: &str) -> Result<bool> {
            self.inner.remove(id)
        }

        fn apply_update(&self, id: &str, update: &VehicleUpdate) -> Result<()> {
            if id == self.gone {
                return Err(Error::VehicleNotFound(id.to_string()));
            }
            self.inner.apply_update(id, update)
        }
    }

    fn setup() -> (TempDir, Repositories) {
        let dir = tempdir().unwrap();
        let repos = Repositories::open_at(dir.path().to_path_buf()).unwrap();
        repos
            .vehicles
            .save(&Vehicle::new(
                "B1",
                VehicleKind::TwoWheeled,
                10.0,
                2,
                Location::new("Vienna", "Austria"),
            ))
            .unwrap();
        repos
            .vehicles
            .save(&Vehicle::new(
                "S1",
                VehicleKind::BulkMarine,
                100_000.0,
                10_000,
                Location::new("Vienna", "Austria"),
            ))
            .unwrap();
        repos
            .catalog
            .save(&CatalogItem::new("BOX", 2.0, 1.0, ItemKind::Solid).unwrap())
            .unwrap();
        repos
            .catalog
            .save(&CatalogItem::new("VASE", 1.0, 8.0, ItemKind::Fragile).unwrap())
            .unwrap();
        (dir, repos)
    }

    fn new_order() -> NewOrder {
        NewOrder {
            priority: Priority::High,
            delivery_location: Location::new("Prague", "Czechia"),
            delivery_date: NaiveDate::from_ymd_opt(2026, 11, 20).unwrap(),
        }
    }

    #[test]
    fn test_add_items_applies_records() {
        let (_dir, repos) = setup();
        let mut service = OrderService::new(&repos.vehicles, &repos.catalog, &repos.orders);
        let order = service.create_order(new_order()).unwrap();

        let report = service
            .add_items(&order.id, &[RequestLine::new("BOX", 3)])
            .unwrap();

        assert!(!report.has_shortfall());
        assert!(report.unloaded.is_empty());
        assert_eq!(report.order.total_weight, 6.0);
        assert_eq!(report.order.vehicle_ids(), vec!["B1", "S1"]);

        let bike = repos.vehicles.find_by_id("B1").unwrap().unwrap();
        assert_eq!(bike.remaining_items, 0);
        assert_eq!(bike.remaining_weight, 6.0);
        assert_eq!(bike.status, VehicleStatus::InUse);

        let saved = service.find(&order.id).unwrap();
        assert_eq!(saved.lines.len(), 1);
        assert_eq!(saved.allocations.len(), 2);
    }

    #[test]
    fn test_unknown_item_rejected_at_entry() {
        let (_dir, repos) = setup();
        let mut service = OrderService::new(&repos.vehicles, &repos.catalog, &repos.orders);
        let order = service.create_order(new_order()).unwrap();

        let err = service
            .add_items(&order.id, &[RequestLine::new("BOX", 1), RequestLine::new("NOPE", 1)])
            .unwrap_err();
        assert!(matches!(err, Error::ItemNotFound(id) if id == "NOPE"));

        // Nothing was loaded
        let bike = repos.vehicles.find_by_id("B1").unwrap().unwrap();
        assert_eq!(bike.status, VehicleStatus::Free);
    }

    #[test]
    fn test_cancel_frees_vehicles_in_place() {
        let (_dir, repos) = setup();
        let mut service = OrderService::new(&repos.vehicles, &repos.catalog, &repos.orders);
        let order = service.create_order(new_order()).unwrap();
        service
            .add_items(&order.id, &[RequestLine::new("VASE", 2)])
            .unwrap();
        assert!(repos.vehicles.find_by_id("S1").unwrap().unwrap().is_in_use());

        let change = service
            .update_status(&order.id, OrderStatus::Canceled)
            .unwrap();
        assert_eq!(change.release.unwrap().released, vec!["S1"]);

        let ship = repos.vehicles.find_by_id("S1").unwrap().unwrap();
        assert_eq!(ship.status, VehicleStatus::Free);
        assert_eq!(ship.remaining_items, 10_000);
        assert_eq!(ship.position, Location::new("Vienna", "Austria"));
    }

    #[test]
    fn test_final_orders_reject_changes() {
        let (_dir, repos) = setup();
        let mut service = OrderService::new(&repos.vehicles, &repos.catalog, &repos.orders);
        let order = service.create_order(new_order()).unwrap();
        service
            .update_status(&order.id, OrderStatus::Delivered)
            .unwrap();

        assert!(matches!(
            service.update_status(&order.id, OrderStatus::Canceled),
            Err(Error::InvalidTransition { .. })
        ));
        assert!(matches!(
            service.add_items(&order.id, &[RequestLine::new("BOX", 1)]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_processing_to_processing_is_noop() {
        let (_dir, repos) = setup();
        let mut service = OrderService::new(&repos.vehicles, &repos.catalog, &repos.orders);
        let order = service.create_order(new_order()).unwrap();

        let change = service
            .update_status(&order.id, OrderStatus::Processing)
            .unwrap();
        assert_eq!(change.from, OrderStatus::Processing);
        assert!(change.release.is_none());
    }

    #[test]
    fn test_missing_order() {
        let (_dir, repos) = setup();
        let mut service = OrderService::new(&repos.vehicles, &repos.catalog, &repos.orders);
        assert!(matches!(
            service.update_status("O-none", OrderStatus::Delivered),
            Err(Error::OrderNotFound(_))
        ));
    }

    #[test]
    fn test_vanished_vehicle_is_not_recorded() {
        let (_dir, repos) = setup();
        let fleet = VanishingFleet {
            inner: &repos.vehicles,
            gone: "S1",
        };
        let mut service = OrderService::new(&fleet, &repos.catalog, &repos.orders);
        let order = service.create_order(new_order()).unwrap();

        let report = service
            .add_items(&order.id, &[RequestLine::new("BOX", 3)])
            .unwrap();

        assert_eq!(report.missing_vehicles, vec!["S1"]);
        assert_eq!(report.outcome.records.len(), 2);
        assert_eq!(report.order.vehicle_ids(), vec!["B1"]);

        // The bike was still loaded
        let bike = repos.vehicles.find_by_id("B1").unwrap().unwrap();
        assert_eq!(bike.status, VehicleStatus::InUse);
        assert_eq!(bike.remaining_items, 0);

        let ship = repos.vehicles.find_by_id("S1").unwrap().unwrap();
        assert_eq!(ship.status, VehicleStatus::Free);

        let saved = service.find(&order.id).unwrap();
        assert_eq!(saved.allocations.len(), 1);
        assert_eq!(saved.vehicle_ids(), vec!["B1"]);
    }

    #[test]
    fn test_add_items_rejects_unit_overflow() {
        let (_dir, repos) = setup();
        let mut service = OrderService::new(&repos.vehicles, &repos.catalog, &repos.orders);
        let order = service.create_order(new_order()).unwrap();

        let err = service
            .add_items(
                &order.id,
                &[RequestLine::new("BOX", u32::MAX), RequestLine::new("BOX", 1)],
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        for id in ["B1", "S1"] {
            let vehicle = repos.vehicles.find_by_id(id).unwrap().unwrap();
            assert_eq!(vehicle.status, VehicleStatus::Free);
        }
        let saved = service.find(&order.id).unwrap();
        assert!(saved.lines.is_empty());
        assert_eq!(saved.total_weight, 0.0);
    }

    #[test]
    fn test_create_with_unknown_item_leaves_no_order() {
        let (_dir, repos) = setup();
        let mut service = OrderService::new(&repos.vehicles, &repos.catalog, &repos.orders);

        let err = service
            .create_order_with_items(new_order(), &[RequestLine::new("NOPE", 1)])
            .unwrap_err();
        assert!(matches!(err, Error::ItemNotFound(id) if id == "NOPE"));
        assert!(service.list().unwrap().is_empty());

        let err = service
            .create_order_with_items(new_order(), &[])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_create_with_items() {
        let (_dir, repos) = setup();
        let mut service = OrderService::new(&repos.vehicles, &repos.catalog, &repos.orders);

        let report = service
            .create_order_with_items(new_order(), &[RequestLine::new("BOX", 2)])
            .unwrap();
        assert_eq!(report.order.vehicle_ids(), vec!["B1"]);
        assert_eq!(report.outcome.loaded_units(), 2);
        assert!(report.missing_vehicles.is_empty());

        let orders = service.list().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, report.order.id);
    }
}
