use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use super::seed::{CatalogSeed, SeedError};
use crate::checkout::{CatalogSource, GatewayError, OrderGateway};
use crate::clients::{BranchClient, CategoryClient, OrderClient, ProductClient};
use crate::domain::{Branch, Category, OrderPayload, PlacedOrder, Product};
use crate::{branch_actor, category_actor, order_actor, product_actor};

/// The main application system that orchestrates all actors.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct BakerySystem {
    pub product_client: ProductClient,
    pub category_client: CategoryClient,
    pub branch_client: BranchClient,
    pub order_client: OrderClient,
    handles: Vec<JoinHandle<()>>,
}

impl BakerySystem {
    /// Spawns one actor per resource. Must be called inside a tokio runtime.
    pub fn start(channel_capacity: usize) -> Self {
        let (product_actor, product_client) = product_actor::new(channel_capacity);
        let (category_actor, category_client) = category_actor::new(channel_capacity);
        let (branch_actor, branch_client) = branch_actor::new(channel_capacity);
        let (order_actor, order_resource_client) = order_actor::new(channel_capacity);
        let order_client = OrderClient::new(order_resource_client, branch_client.clone());

        let handles = vec![
            tokio::spawn(product_actor.run()),
            tokio::spawn(category_actor.run()),
            tokio::spawn(branch_actor.run()),
            tokio::spawn(order_actor.run()),
        ];
        info!(channel_capacity, "Bakery system started");

        Self {
            product_client,
            category_client,
            branch_client,
            order_client,
            handles,
        }
    }

    /// Loads categories, branches and products, in that order.
    #[instrument(skip(self, seed), fields(records = seed.len()))]
    pub async fn seed(&self, seed: CatalogSeed) -> Result<(), SeedError> {
        for category in seed.categories {
            self.category_client.create_category(category).await?;
        }
        for branch in seed.branches {
            self.branch_client.create_branch(branch).await?;
        }
        for product in seed.products {
            self.product_client.create_product(product).await?;
        }
        info!("Catalog seeded");
        Ok(())
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // Actors stop once every client is dropped and their channels close.
        drop(self.order_client);
        drop(self.branch_client);
        drop(self.category_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

/// In-process catalog reads, bypassing HTTP.
#[async_trait]
impl CatalogSource for BakerySystem {
    async fn fetch_products(&self) -> Result<Vec<Product>, GatewayError> {
        self.product_client
            .list_products()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, GatewayError> {
        self.category_client
            .list_categories()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))
    }

    async fn fetch_branches(&self) -> Result<Vec<Branch>, GatewayError> {
        self.branch_client
            .list_branches()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))
    }
}

/// In-process order placement with the same validation as the HTTP endpoint.
#[async_trait]
impl OrderGateway for BakerySystem {
    async fn submit(&self, payload: &OrderPayload) -> Result<PlacedOrder, GatewayError> {
        self.order_client
            .place_order(payload.clone())
            .await
            .map_err(|e| GatewayError::Rejected(e.to_string()))
    }
}
