pub mod memory;

use async_trait::async_trait;

use crate::engine::lifecycle::StageUpdate;
use crate::error::AppError;
use crate::models::order::Order;

/// Owner of the active and trashed order collections. Backends must apply
/// `update_fields` as one atomic read-merge-write per record; callers never
/// fetch and write in two steps.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Allocates the next order number. Numbers increase monotonically and
    /// are never reused, so active order numbers stay unique.
    async fn next_order_number(&self) -> Result<u64, AppError>;

    async fn insert(&self, order: Order) -> Result<(), AppError>;

    /// Looks up an active order. Trashed orders are not found.
    async fn find_by_number(&self, order_number: u64) -> Result<Option<Order>, AppError>;

    /// Merges the stage update into the matching active order under the
    /// backend's per-record lock and returns the merged record.
    async fn update_fields(
        &self,
        order_number: u64,
        update: StageUpdate,
    ) -> Result<Order, AppError>;

    async fn list_active(&self) -> Result<Vec<Order>, AppError>;

    async fn list_trash(&self) -> Result<Vec<Order>, AppError>;

    /// Purges whatever is already in trash, then moves every active order
    /// there. Returns the number of orders moved.
    async fn clear_all_to_trash(&self) -> Result<usize, AppError>;

    /// Moves every trashed order back to the active set and empties trash.
    /// Fails with `EmptyTrash` when there is nothing to restore.
    async fn restore_all_from_trash(&self) -> Result<Vec<Order>, AppError>;
}
