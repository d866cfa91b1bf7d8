use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use shared::protocol::{OrderReceipt, OrderSubmission};
use tracing::info;
use uuid::Uuid;

/// External order-creation collaborator. One call per accepted submit; the
/// wizard never retries on its own.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    async fn submit_order(&self, order: &OrderSubmission) -> Result<OrderReceipt>;
}

/// Accepts every order without touching the network. Stands in for the real
/// backend in the mock configuration.
pub struct SimulatedOrderSubmitter;

#[async_trait]
impl OrderSubmitter for SimulatedOrderSubmitter {
    async fn submit_order(&self, order: &OrderSubmission) -> Result<OrderReceipt> {
        info!(
            client_id = order.client_id.0,
            lines = order.items.len(),
            "simulated order accepted"
        );
        Ok(OrderReceipt {
            order_id: Uuid::new_v4().to_string(),
            accepted_at: Utc::now(),
        })
    }
}
