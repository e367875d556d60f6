pub mod http;

use async_trait::async_trait;

use crate::models::{BookingSubmission, Service};

#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn submit(&self, submission: &BookingSubmission) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    async fn services(&self) -> anyhow::Result<Vec<Service>>;
}
