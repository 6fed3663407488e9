use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Proof of a successful booking of one seat. Never mutated or deleted.
///
/// `price` and `consumer_name` are snapshots taken at purchase time, not
/// live references into the catalog or session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub event_id: Uuid,
    pub category: String,
    pub seat_number: u32,
    pub price: Decimal,
    pub consumer_id: String,
    pub consumer_name: String,
    pub purchased_at: DateTime<Utc>,
}
