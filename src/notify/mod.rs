use serde::Serialize;

use crate::models::order::Order;
use crate::state::AppState;

/// The single event type pushed to connected clients. Restore carries the
/// whole restored list in one event.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateEvent {
    pub event: &'static str,
    pub payload: UpdatePayload,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum UpdatePayload {
    Order(Box<Order>),
    Orders(Vec<Order>),
}

impl UpdateEvent {
    pub fn order(order: Order) -> Self {
        Self {
            event: "update",
            payload: UpdatePayload::Order(Box::new(order)),
        }
    }

    pub fn orders(orders: Vec<Order>) -> Self {
        Self {
            event: "update",
            payload: UpdatePayload::Orders(orders),
        }
    }
}

/// Fire-and-forget broadcast. A send error just means nobody is connected;
/// it never fails the persistence path.
pub fn publish(state: &AppState, event: UpdateEvent) {
    let _ = state.events_tx.send(event);
    state.metrics.events_published_total.inc();
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::UpdateEvent;
    use crate::models::order::{Order, Stage};

    fn order() -> Order {
        Order {
            id: Uuid::new_v4(),
            order_number: 1,
            party_name: "Acme".to_string(),
            station_name: "Pune".to_string(),
            division: "D1".to_string(),
            order_by: "phone".to_string(),
            transport: "Road".to_string(),
            promotional_material: "none".to_string(),
            status: Stage::Marketing,
            created_at: Utc::now(),
            total_shipper: None,
            packed: None,
            packed_at: None,
            billed: None,
            billed_at: None,
            dispatched: None,
            dispatched_at: None,
        }
    }

    #[test]
    fn single_order_event_serializes_with_flat_payload() {
        let value = serde_json::to_value(UpdateEvent::order(order())).unwrap();
        assert_eq!(value["event"], "update");
        assert_eq!(value["payload"]["party_name"], "Acme");
    }

    #[test]
    fn restore_event_carries_the_list() {
        let value = serde_json::to_value(UpdateEvent::orders(vec![order(), order()])).unwrap();
        assert_eq!(value["event"], "update");
        assert_eq!(value["payload"].as_array().unwrap().len(), 2);
    }
}
