//! File-based order repository implementation

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use fleetload_domain::model::Order;
use fleetload_domain::repository::OrderRepository;
use fleetload_types::Result;

/// Stores orders in `orders.json`, keyed by order ID
pub struct FileOrderRepository {
    store_path: PathBuf,
    orders: RefCell<HashMap<String, Order>>,
}

impl FileOrderRepository {
    /// Create or load an order repository
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("orders.json");

        let orders = if store_path.exists() {
            let reader = BufReader::new(File::open(&store_path)?);
            serde_json::from_reader(reader)?
        } else {
            HashMap::new()
        };

        Ok(Self {
            store_path,
            orders: RefCell::new(orders),
        })
    }

    fn persist(&self) -> Result<()> {
        let writer = BufWriter::new(File::create(&self.store_path)?);
        serde_json::to_writer_pretty(writer, &*self.orders.borrow())?;
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.orders.borrow().len()
    }
}

impl OrderRepository for FileOrderRepository {
    /// All orders, oldest first
    fn find_all(&self) -> Result<Vec<Order>> {
        let mut orders: Vec<_> = self.orders.borrow().values().cloned().collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(orders)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Order>> {
        Ok(self.orders.borrow().get(id).cloned())
    }

    fn save(&self, order: &Order) -> Result<()> {
        self.orders
            .borrow_mut()
            .insert(order.id.clone(), order.clone());
        self.persist()
    }
}
