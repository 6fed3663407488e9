//! Scannable-code payload for issued tickets.
//!
//! The payload is the string a QR renderer or PDF generator consumes
//! downstream. It must be deterministic for identical inputs, and building
//! it is a presentation-time concern: a failure here never touches the
//! committed booking.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Event, Ticket};

/// Bump on any incompatible change to the payload fields.
pub const PAYLOAD_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TicketPayload<'a> {
    version: u32,
    ticket_id: Uuid,
    event_id: Uuid,
    event_name: &'a str,
    date: String,
    time: String,
    venue: &'a str,
    category: &'a str,
    seat_number: u32,
    price: Decimal,
    consumer_name: &'a str,
    purchased_at: DateTime<Utc>,
}

/// Serializes ticket and event details into the scannable-code content.
/// A ticket whose event has since vanished still renders, with placeholder
/// event fields.
pub fn build_ticket_payload(ticket: &Ticket, event: Option<&Event>) -> serde_json::Result<String> {
    let payload = TicketPayload {
        version: PAYLOAD_VERSION,
        ticket_id: ticket.id,
        event_id: ticket.event_id,
        event_name: event.map_or("Unknown Event", |e| e.name.as_str()),
        date: event.map_or_else(String::new, |e| e.date.to_string()),
        time: event.map_or_else(String::new, |e| e.time.format("%H:%M").to_string()),
        venue: event.map_or("", |e| e.venue.as_str()),
        category: &ticket.category,
        seat_number: ticket.seat_number,
        price: ticket.price,
        consumer_name: &ticket.consumer_name,
        purchased_at: ticket.purchased_at,
    };
    serde_json::to_string(&payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids;
    use chrono::{NaiveDate, NaiveTime};

    fn sample_ticket() -> Ticket {
        Ticket {
            id: ids::ticket_id(),
            event_id: ids::event_id(),
            category: "Standard".into(),
            seat_number: 4,
            price: Decimal::from(80),
            consumer_id: "con_bob".into(),
            consumer_name: "Bob Consumer".into(),
            purchased_at: Utc::now(),
        }
    }

    fn sample_event(id: Uuid) -> Event {
        Event {
            id,
            organizer_id: "org_alice".into(),
            name: "Launch Night".into(),
            date: NaiveDate::from_ymd_opt(2025, 10, 3).expect("valid date"),
            time: NaiveTime::from_hms_opt(19, 30, 0).expect("valid time"),
            venue: "Main Stage".into(),
            description: None,
            categories: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn identical_inputs_produce_identical_payloads() {
        let ticket = sample_ticket();
        let event = sample_event(ticket.event_id);

        let first = build_ticket_payload(&ticket, Some(&event)).expect("payload");
        let second = build_ticket_payload(&ticket, Some(&event)).expect("payload");
        assert_eq!(first, second);
    }

    #[test]
    fn payload_carries_versioned_ticket_and_event_fields() {
        let ticket = sample_ticket();
        let event = sample_event(ticket.event_id);

        let payload = build_ticket_payload(&ticket, Some(&event)).expect("payload");
        let value: serde_json::Value = serde_json::from_str(&payload).expect("valid json");
        assert_eq!(value["version"], 1);
        assert_eq!(value["eventName"], "Launch Night");
        assert_eq!(value["date"], "2025-10-03");
        assert_eq!(value["time"], "19:30");
        assert_eq!(value["seatNumber"], 4);
        assert_eq!(value["consumerName"], "Bob Consumer");
    }

    #[test]
    fn missing_event_renders_placeholders() {
        let ticket = sample_ticket();
        let payload = build_ticket_payload(&ticket, None).expect("payload");
        let value: serde_json::Value = serde_json::from_str(&payload).expect("valid json");
        assert_eq!(value["eventName"], "Unknown Event");
        assert_eq!(value["date"], "");
        assert_eq!(value["venue"], "");
    }
}
