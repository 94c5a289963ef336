//! Short record identifiers

use uuid::Uuid;

/// Prefix for generated catalog item IDs
pub const ITEM_PREFIX: &str = "I";
/// Prefix for generated order IDs
pub const ORDER_PREFIX: &str = "O";

/// `prefix` followed by the first 8 hex digits of a random UUID
pub fn generate_id(prefix: &str) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{}{}", prefix, &uuid[..8])
}
