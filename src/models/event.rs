use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named seating tier within one event. Seats are numbered 1..=capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketCategory {
    pub name: String,
    pub price: Decimal,
    pub capacity: u32,
}

/// An organizer-published event. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub organizer_id: String,
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub venue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub categories: Vec<TicketCategory>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn category(&self, name: &str) -> Option<&TicketCategory> {
        self.categories.iter().find(|c| c.name == name)
    }
}

/// Organizer input for a new event, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDraft {
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub venue: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategoryDraft>,
}

/// Category input as submitted; invalid entries are silently dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    pub price: Decimal,
    pub capacity: u32,
}
