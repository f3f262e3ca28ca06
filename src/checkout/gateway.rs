use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::error::GatewayError;
use crate::domain::{Branch, Category, OrderPayload, PlacedOrder, Product};

pub const PRODUCTS_PATH: &str = "/pastries";
pub const CATEGORIES_PATH: &str = "/productcategories";
pub const BRANCHES_PATH: &str = "/stores";
pub const ORDERS_PATH: &str = "/orderplaceds";

/// Read side of the catalog as seen by the order builder.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>, GatewayError>;
    async fn fetch_categories(&self) -> Result<Vec<Category>, GatewayError>;
    async fn fetch_branches(&self) -> Result<Vec<Branch>, GatewayError>;
}

/// Order persistence as seen by the checkout submitter.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn submit(&self, payload: &OrderPayload) -> Result<PlacedOrder, GatewayError>;
}

#[async_trait]
impl<T: OrderGateway + ?Sized> OrderGateway for Arc<T> {
    async fn submit(&self, payload: &OrderPayload) -> Result<PlacedOrder, GatewayError> {
        (**self).submit(payload).await
    }
}

/// REST client for the bakery API.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[instrument(skip(self))]
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        debug!("Sending request");
        let response = self.client.get(self.url(path)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Catalog request failed");
            return Err(GatewayError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl CatalogSource for HttpGateway {
    async fn fetch_products(&self) -> Result<Vec<Product>, GatewayError> {
        self.get_json(PRODUCTS_PATH).await
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, GatewayError> {
        self.get_json(CATEGORIES_PATH).await
    }

    async fn fetch_branches(&self) -> Result<Vec<Branch>, GatewayError> {
        self.get_json(BRANCHES_PATH).await
    }
}

#[async_trait]
impl OrderGateway for HttpGateway {
    /// Only `201 Created` counts as success.
    #[instrument(skip(self, payload), fields(branch = %payload.branch))]
    async fn submit(&self, payload: &OrderPayload) -> Result<PlacedOrder, GatewayError> {
        debug!("Sending request");
        let response = self
            .client
            .post(self.url(ORDERS_PATH))
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}
