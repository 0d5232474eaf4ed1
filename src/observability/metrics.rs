use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub orders_created_total: IntCounter,
    pub stage_updates_total: IntCounterVec,
    pub trash_operations_total: IntCounterVec,
    pub events_published_total: IntCounter,
    pub active_orders: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let orders_created_total =
            IntCounter::new("orders_created_total", "Total orders created")
                .expect("valid orders_created_total metric");

        let stage_updates_total = IntCounterVec::new(
            Opts::new("stage_updates_total", "Total stage updates by stage"),
            &["stage"],
        )
        .expect("valid stage_updates_total metric");

        let trash_operations_total = IntCounterVec::new(
            Opts::new("trash_operations_total", "Total trash operations by kind"),
            &["operation"],
        )
        .expect("valid trash_operations_total metric");

        let events_published_total = IntCounter::new(
            "events_published_total",
            "Total update events published to subscribers",
        )
        .expect("valid events_published_total metric");

        let active_orders = IntGauge::new("active_orders", "Current number of active orders")
            .expect("valid active_orders metric");

        registry
            .register(Box::new(orders_created_total.clone()))
            .expect("register orders_created_total");
        registry
            .register(Box::new(stage_updates_total.clone()))
            .expect("register stage_updates_total");
        registry
            .register(Box::new(trash_operations_total.clone()))
            .expect("register trash_operations_total");
        registry
            .register(Box::new(events_published_total.clone()))
            .expect("register events_published_total");
        registry
            .register(Box::new(active_orders.clone()))
            .expect("register active_orders");

        Self {
            registry,
            orders_created_total,
            stage_updates_total,
            trash_operations_total,
            events_published_total,
            active_orders,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
