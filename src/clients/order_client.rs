use tracing::{error, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::clients::BranchClient;
use crate::domain::{OrderFilter, OrderPayload, OrderResponse, OrderSubmission, PlacedOrder};
use crate::order_actor::{OrderAction, OrderError};

/// Totals closer than this are considered equal.
const TOTAL_TOLERANCE: f64 = 0.005;

/// Client for interacting with the Order actor.
///
/// This client orchestrates branch validation before an order is persisted.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<PlacedOrder>,
    branch_client: BranchClient,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<PlacedOrder>, branch_client: BranchClient) -> Self {
        Self {
            inner,
            branch_client,
        }
    }

    #[instrument(
        fields(branch = %payload.branch, lines = payload.products.len(), stock_order = payload.is_stock_order),
        skip(self, payload)
    )]
    pub async fn place_order(&self, payload: OrderPayload) -> Result<PlacedOrder, OrderError> {
        info!("Processing place_order request");

        // Step 1: Validate shape
        if payload.branch.trim().is_empty() {
            warn!("Order rejected: no branch");
            return Err(OrderError::ValidationError("Branch is required".to_string()));
        }
        if payload.products.is_empty() {
            warn!("Order rejected: no products");
            return Err(OrderError::ValidationError("Order has no products".to_string()));
        }

        // Step 2: Validate branch
        match self.branch_client.find_branch(payload.branch.clone()).await {
            Ok(Some(branch)) => info!(branch_name = %branch.name, "Branch validation successful"),
            Ok(None) => {
                error!("Branch not found");
                return Err(OrderError::InvalidBranch(payload.branch));
            }
            Err(e) => {
                error!(error = %e, "Branch validation failed");
                return Err(OrderError::ActorCommunicationError(format!(
                    "Branch validation failed: {}",
                    e
                )));
            }
        }

        // Step 3: Totals are captured as submitted
        let line_total = payload.line_total();
        if (line_total - payload.total_amount).abs() > TOTAL_TOLERANCE {
            warn!(submitted = payload.total_amount, computed = line_total, "Order total mismatch");
        }

        // Step 4: Persist
        let order = self.inner.create(OrderSubmission::from(payload)).await?;
        info!(order_id = %order.id, total = order.total_amount, "Order placed successfully");
        Ok(order)
    }

    /// Order history, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<PlacedOrder>, OrderError> {
        let mut orders: Vec<PlacedOrder> = self
            .inner
            .list()
            .await?
            .into_iter()
            .filter(|order| filter.matches(order))
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn set_response(&self, id: String, response: OrderResponse) -> Result<PlacedOrder, OrderError> {
        let order = self
            .inner
            .perform_action(id, OrderAction::SetResponse(response))
            .await?;
        info!(order_id = %order.id, response = %order.response, "Order response recorded");
        Ok(order)
    }
}

impl_client_methods!(OrderClient, PlacedOrder, OrderError, order);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Branch, OrderLine};
    use crate::mock_framework::{create_mock_client, expect_create, expect_get, expect_list};

    fn payload(branch: &str) -> OrderPayload {
        OrderPayload {
            products: vec![OrderLine {
                name: "Baguette".into(),
                quantity: 2,
                price: 30.0,
                in_stock_quantity: 1,
            }],
            total_amount: 60.0,
            is_stock_order: false,
            delivery_date: None,
            delivery_time: None,
            branch: branch.into(),
        }
    }

    fn clients() -> (
        OrderClient,
        tokio::sync::mpsc::Receiver<crate::actor_framework::ResourceRequest<Branch>>,
        tokio::sync::mpsc::Receiver<crate::actor_framework::ResourceRequest<PlacedOrder>>,
    ) {
        let (branch_inner, branch_rx) = create_mock_client::<Branch>(10);
        let (order_inner, order_rx) = create_mock_client::<PlacedOrder>(10);
        let client = OrderClient::new(order_inner, BranchClient::new(branch_inner));
        (client, branch_rx, order_rx)
    }

    #[tokio::test]
    async fn test_place_order_resolves_branch_by_name() {
        let (client, mut branch_rx, mut order_rx) = clients();

        let task = tokio::spawn(async move { client.place_order(payload("Main")).await });

        // Lookup by id misses, so the client falls back to listing branches.
        let (id, responder) = expect_get(&mut branch_rx).await.expect("Expected Branch Get");
        assert_eq!(id, "Main");
        responder.send(Ok(None)).unwrap();

        let responder = expect_list(&mut branch_rx).await.expect("Expected Branch List");
        let main = Branch {
            id: "branch_1".into(),
            name: "Main".into(),
            address: String::new(),
        };
        responder.send(Ok(vec![main])).unwrap();

        let (submission, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        assert_eq!(submission.branch, "Main");
        assert_eq!(submission.total, 60.0);
        let placed = PlacedOrder::new("order_1", submission, chrono::Utc::now());
        responder.send(Ok(placed)).unwrap();

        let order = task.await.unwrap().unwrap();
        assert_eq!(order.id, "order_1");
    }

    #[tokio::test]
    async fn test_unknown_branch_is_rejected_without_persisting() {
        let (client, mut branch_rx, mut order_rx) = clients();

        let task = tokio::spawn(async move { client.place_order(payload("Nowhere")).await });

        let (_, responder) = expect_get(&mut branch_rx).await.expect("Expected Branch Get");
        responder.send(Ok(None)).unwrap();
        let responder = expect_list(&mut branch_rx).await.expect("Expected Branch List");
        responder.send(Ok(vec![])).unwrap();

        let result = task.await.unwrap();
        assert_eq!(result, Err(OrderError::InvalidBranch("Nowhere".into())));
        assert!(order_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_blank_branch_fails_before_any_lookup() {
        let (client, mut branch_rx, _order_rx) = clients();

        let result = client.place_order(payload("  ")).await;
        assert!(matches!(result, Err(OrderError::ValidationError(_))));
        assert!(branch_rx.try_recv().is_err());
    }
}
