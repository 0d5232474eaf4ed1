use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::engine::lifecycle::StageUpdate;
use crate::error::AppError;
use crate::models::order::Order;
use crate::repo::OrderRepository;

struct Record {
    order: Order,
    trashed: bool,
}

/// In-memory backend. Trash is a tag on the stored record, not a second
/// collection, so clear and restore are single flips per record.
pub struct MemoryRepository {
    records: DashMap<u64, Record>,
    next_number: AtomicU64,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_number: AtomicU64::new(1),
        }
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for MemoryRepository {
    async fn next_order_number(&self) -> Result<u64, AppError> {
        Ok(self.next_number.fetch_add(1, Ordering::SeqCst))
    }

    async fn insert(&self, order: Order) -> Result<(), AppError> {
        self.records.insert(
            order.order_number,
            Record {
                order,
                trashed: false,
            },
        );
        Ok(())
    }

    async fn find_by_number(&self, order_number: u64) -> Result<Option<Order>, AppError> {
        let found = self.records.get(&order_number).and_then(|record| {
            if record.trashed {
                None
            } else {
                Some(record.order.clone())
            }
        });
        Ok(found)
    }

    async fn update_fields(
        &self,
        order_number: u64,
        update: StageUpdate,
    ) -> Result<Order, AppError> {
        // get_mut holds the shard lock for the whole merge, so concurrent
        // submissions for the same order serialize here.
        let mut record = self
            .records
            .get_mut(&order_number)
            .ok_or(AppError::OrderNotFound(order_number))?;

        if record.trashed {
            return Err(AppError::OrderNotFound(order_number));
        }

        update.apply(&mut record.order)?;
        Ok(record.order.clone())
    }

    async fn list_active(&self) -> Result<Vec<Order>, AppError> {
        let mut orders: Vec<Order> = self
            .records
            .iter()
            .filter(|record| !record.trashed)
            .map(|record| record.order.clone())
            .collect();
        orders.sort_by_key(|order| order.order_number);
        Ok(orders)
    }

    async fn list_trash(&self) -> Result<Vec<Order>, AppError> {
        let mut orders: Vec<Order> = self
            .records
            .iter()
            .filter(|record| record.trashed)
            .map(|record| record.order.clone())
            .collect();
        orders.sort_by_key(|order| order.order_number);
        Ok(orders)
    }

    async fn clear_all_to_trash(&self) -> Result<usize, AppError> {
        self.records.retain(|_, record| !record.trashed);

        let mut moved = 0;
        for mut record in self.records.iter_mut() {
            record.trashed = true;
            moved += 1;
        }
        Ok(moved)
    }

    async fn restore_all_from_trash(&self) -> Result<Vec<Order>, AppError> {
        let mut restored = Vec::new();
        for mut record in self.records.iter_mut() {
            if record.trashed {
                record.trashed = false;
                restored.push(record.order.clone());
            }
        }

        if restored.is_empty() {
            return Err(AppError::EmptyTrash);
        }

        restored.sort_by_key(|order| order.order_number);
        Ok(restored)
    }
}
