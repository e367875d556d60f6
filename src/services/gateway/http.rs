use anyhow::Context;
use async_trait::async_trait;

use super::{BookingGateway, ServiceCatalog};
use crate::models::{BookingSubmission, Service};

pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl BookingGateway for HttpGateway {
    async fn submit(&self, submission: &BookingSubmission) -> anyhow::Result<()> {
        self.client
            .post(self.url("/api/booking"))
            .json(submission)
            .send()
            .await
            .context("failed to reach booking endpoint")?
            .error_for_status()
            .context("booking endpoint returned error")?;

        Ok(())
    }
}

#[async_trait]
impl ServiceCatalog for HttpGateway {
    async fn services(&self) -> anyhow::Result<Vec<Service>> {
        let services = self
            .client
            .get(self.url("/api/services"))
            .send()
            .await
            .context("failed to reach services endpoint")?
            .error_for_status()
            .context("services endpoint returned error")?
            .json()
            .await
            .context("malformed services response")?;

        Ok(services)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let gateway = HttpGateway::new("http://localhost:3000/");
        assert_eq!(gateway.url("/api/booking"), "http://localhost:3000/api/booking");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error() {
        // Port 9 (discard) is not expected to run an HTTP server.
        let gateway = HttpGateway::new("http://127.0.0.1:9");
        assert!(gateway.services().await.is_err());
    }
}
