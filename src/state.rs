use std::sync::Arc;

use tokio::sync::broadcast;

use crate::notify::UpdateEvent;
use crate::observability::metrics::Metrics;
use crate::repo::memory::MemoryRepository;
use crate::repo::OrderRepository;

pub struct AppState {
    pub repo: Arc<dyn OrderRepository>,
    pub events_tx: broadcast::Sender<UpdateEvent>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(event_buffer_size: usize) -> Self {
        Self::with_repo(Arc::new(MemoryRepository::new()), event_buffer_size)
    }

    pub fn with_repo(repo: Arc<dyn OrderRepository>, event_buffer_size: usize) -> Self {
        let (events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        Self {
            repo,
            events_tx,
            metrics: Metrics::new(),
        }
    }
}
