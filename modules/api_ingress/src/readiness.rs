use async_trait::async_trait;

/// Backing-service check consulted by `GET /ready`.
#[async_trait]
pub trait ReadinessCheck: Send + Sync {
    /// Whether the document store answers right now.
    async fn store_ready(&self) -> bool;
}

/// For hosts with nothing to check, e.g. the in-memory repository.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysReady;

#[async_trait]
impl ReadinessCheck for AlwaysReady {
    async fn store_ready(&self) -> bool {
        true
    }
}
