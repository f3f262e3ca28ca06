//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_get`] to answer the
//! requests the client under test sends.

use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends to a channel the test controls instead of a running
/// `ResourceActor`, so each reply (success, failure or missing item) is
/// chosen by the test.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<oneshot::Sender<Result<Vec<T>, FrameworkError>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, oneshot::Sender<Result<T::ActionResult, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{OrderClient, ProductClient};
    use crate::domain::{Branch, OrderResponse, PlacedOrder, Product, ProductCreate};
    use crate::order_actor::{OrderAction, OrderError};

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let create_task = tokio::spawn(async move {
            let params = ProductCreate {
                name: "Baguette".to_string(),
                price: 30.0,
                category: "Bread".to_string(),
                active: true,
            };
            client.create_product(params).await
        });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(params.name, "Baguette");
        responder
            .send(Ok(Product::new("product_1", params.name, params.price, params.category)))
            .unwrap();

        let created = create_task.await.unwrap().unwrap();
        assert_eq!(created.id, "product_1");
    }

    #[tokio::test]
    async fn test_set_response_maps_missing_order() {
        let (branch_inner, _branch_rx) = create_mock_client::<Branch>(10);
        let (order_inner, mut order_rx) = create_mock_client::<PlacedOrder>(10);
        let client = OrderClient::new(order_inner, crate::clients::BranchClient::new(branch_inner));

        let task = tokio::spawn(async move {
            client
                .set_response("order_9".to_string(), OrderResponse::Accepted)
                .await
        });

        let (id, action, responder) = expect_action(&mut order_rx).await.expect("Expected Order Action");
        assert_eq!(id, "order_9");
        assert!(matches!(action, OrderAction::SetResponse(OrderResponse::Accepted)));
        responder.send(Err(FrameworkError::NotFound(id))).unwrap();

        assert_eq!(task.await.unwrap(), Err(OrderError::NotFound("order_9".into())));
    }
}
