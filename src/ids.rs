//! Fresh opaque identifiers for events and tickets.

use uuid::Uuid;

pub fn event_id() -> Uuid {
    Uuid::new_v4()
}

pub fn ticket_id() -> Uuid {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_unique() {
        let ids: HashSet<Uuid> = (0..1000).map(|_| ticket_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
