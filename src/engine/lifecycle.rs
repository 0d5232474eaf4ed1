use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::order::{Order, Stage};
use crate::notify::{self, UpdateEvent};
use crate::state::AppState;

/// The only token that counts as a completed stage. Any other value is stored
/// as given but leaves the stage timestamp unset.
pub const AFFIRMATIVE: &str = "yes";

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrder {
    pub party_name: String,
    pub station_name: String,
    #[serde(default)]
    pub division: String,
    #[serde(default)]
    pub order_by: String,
    #[serde(default)]
    pub transport: String,
    #[serde(default)]
    pub promotional_material: String,
}

/// Fieldset merged into an order when a downstream role submits its stage.
#[derive(Debug, Clone)]
pub enum StageUpdate {
    Packaging { total_shipper: String, packed: String },
    Billing { billed: String },
    Dispatch { dispatched: String },
}

impl StageUpdate {
    pub fn stage(&self) -> Stage {
        match self {
            StageUpdate::Packaging { .. } => Stage::Packaging,
            StageUpdate::Billing { .. } => Stage::Billing,
            StageUpdate::Dispatch { .. } => Stage::Dispatch,
        }
    }

    /// Merges this update into `order` in place. Creation-time fields are
    /// never touched; re-applying the same stage re-sets the same fields.
    /// The status never moves backward.
    pub fn apply(&self, order: &mut Order) -> Result<(), AppError> {
        let requested = self.stage();
        if requested < order.status {
            return Err(AppError::StageRegression {
                order_number: order.order_number,
                current: order.status,
                requested,
            });
        }

        let now = Utc::now();
        match self {
            StageUpdate::Packaging {
                total_shipper,
                packed,
            } => {
                order.total_shipper = Some(total_shipper.clone());
                order.packed = Some(packed.clone());
                order.packed_at = is_affirmative(packed).then_some(now);
            }
            StageUpdate::Billing { billed } => {
                order.billed = Some(billed.clone());
                order.billed_at = is_affirmative(billed).then_some(now);
            }
            StageUpdate::Dispatch { dispatched } => {
                order.dispatched = Some(dispatched.clone());
                order.dispatched_at = is_affirmative(dispatched).then_some(now);
            }
        }

        order.status = requested;
        Ok(())
    }
}

fn is_affirmative(flag: &str) -> bool {
    flag == AFFIRMATIVE
}

pub async fn create_order(state: &AppState, request: CreateOrder) -> Result<Order, AppError> {
    if request.party_name.trim().is_empty() {
        return Err(AppError::Validation("party_name is required".to_string()));
    }

    if request.station_name.trim().is_empty() {
        return Err(AppError::Validation("station_name is required".to_string()));
    }

    let order = Order {
        id: Uuid::new_v4(),
        order_number: state.repo.next_order_number().await?,
        party_name: request.party_name,
        station_name: request.station_name,
        division: request.division,
        order_by: request.order_by,
        transport: request.transport,
        promotional_material: request.promotional_material,
        status: Stage::Marketing,
        created_at: Utc::now(),
        total_shipper: None,
        packed: None,
        packed_at: None,
        billed: None,
        billed_at: None,
        dispatched: None,
        dispatched_at: None,
    };

    state.repo.insert(order.clone()).await?;
    state.metrics.orders_created_total.inc();
    state.metrics.active_orders.inc();
    notify::publish(state, UpdateEvent::order(order.clone()));

    info!(order_number = order.order_number, party_name = %order.party_name, "order created");
    Ok(order)
}

pub async fn advance_order(
    state: &AppState,
    order_number: u64,
    update: StageUpdate,
) -> Result<Order, AppError> {
    let stage = update.stage();
    let updated = state.repo.update_fields(order_number, update).await?;

    state
        .metrics
        .stage_updates_total
        .with_label_values(&[stage.as_str()])
        .inc();
    notify::publish(state, UpdateEvent::order(updated.clone()));

    info!(order_number, stage = %stage, "order advanced");
    Ok(updated)
}

pub async fn clear_orders(state: &AppState) -> Result<usize, AppError> {
    let cleared = state.repo.clear_all_to_trash().await?;

    state
        .metrics
        .trash_operations_total
        .with_label_values(&["clear"])
        .inc();
    state.metrics.active_orders.set(0);

    info!(cleared, "active orders moved to trash");
    Ok(cleared)
}

pub async fn restore_orders(state: &AppState) -> Result<Vec<Order>, AppError> {
    let restored = state.repo.restore_all_from_trash().await?;

    state
        .metrics
        .trash_operations_total
        .with_label_values(&["restore"])
        .inc();
    state.metrics.active_orders.add(restored.len() as i64);
    notify::publish(state, UpdateEvent::orders(restored.clone()));

    info!(restored = restored.len(), "orders restored from trash");
    Ok(restored)
}
