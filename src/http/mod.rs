//! REST surface: catalog reads and writes, order placement and order history.

use std::future::Future;
use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, patch},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

pub mod error;
pub mod routes;

pub use error::ApiError;

use crate::app_system::BakerySystem;
use crate::checkout::gateway::{BRANCHES_PATH, CATEGORIES_PATH, ORDERS_PATH, PRODUCTS_PATH};
use crate::clients::{BranchClient, CategoryClient, OrderClient, ProductClient};
use routes::*;

/// Handles shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductClient,
    pub categories: CategoryClient,
    pub branches: BranchClient,
    pub orders: OrderClient,
}

impl From<&BakerySystem> for AppState {
    fn from(system: &BakerySystem) -> Self {
        Self {
            products: system.product_client.clone(),
            categories: system.category_client.clone(),
            branches: system.branch_client.clone(),
            orders: system.order_client.clone(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(PRODUCTS_PATH, get(list_products).post(create_product))
        .route(CATEGORIES_PATH, get(list_categories).post(create_category))
        .route(BRANCHES_PATH, get(list_branches).post(create_branch))
        .route(ORDERS_PATH, get(list_orders).post(place_order))
        .route(&format!("{ORDERS_PATH}/{{id}}"), get(get_order))
        .route(&format!("{ORDERS_PATH}/{{id}}/response"), patch(set_order_response))
        .layer(cors)
        .with_state(state)
}

/// Serves until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(address) = listener.local_addr() {
        info!("Server running on {address}");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolves on Ctrl-C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::app_system::CatalogSeed;

    async fn seeded_app() -> Router {
        let system = BakerySystem::start(8);
        let seed = CatalogSeed::from_json(
            r#"{
                "categories": [{ "name": "Bread" }],
                "branches": [{ "name": "Main", "address": "1 High St" }],
                "products": [{ "name": "Rye Loaf", "price": 90, "category": "Bread" }]
            }"#,
        )
        .unwrap();
        system.seed(seed).await.unwrap();
        router(AppState::from(&system))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn order(branch: &str) -> Value {
        json!({
            "products": [{ "name": "Rye Loaf", "quantity": 2, "price": 90, "inStockQuantity": 1 }],
            "totalAmount": 180,
            "isStockOrder": false,
            "deliveryDate": null,
            "deliveryTime": null,
            "branch": branch
        })
    }

    #[tokio::test]
    async fn catalog_endpoints_list_seeded_records() {
        let app = seeded_app().await;

        let (status, products) = send(&app, "GET", "/pastries", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(products[0]["name"], "Rye Loaf");
        assert_eq!(products[0]["active"], true);

        let (_, stores) = send(&app, "GET", "/stores", None).await;
        assert_eq!(stores[0]["name"], "Main");

        let (status, created) = send(&app, "POST", "/productcategories", Some(json!({ "name": "Cakes" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], "category_2");
    }

    #[tokio::test]
    async fn invalid_product_is_a_bad_request() {
        let app = seeded_app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/pastries",
            Some(json!({ "name": "", "price": 1, "category": "Bread" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn order_placement_status_codes() {
        let app = seeded_app().await;

        let (status, placed) = send(&app, "POST", "/orderplaceds", Some(order("Main"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(placed["id"], "order_1");
        assert_eq!(placed["response"], "pending");
        assert!(placed["deliveryDate"].is_null());

        let (status, _) = send(&app, "POST", "/orderplaceds", Some(order("Harbour"))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(&app, "POST", "/orderplaceds", Some(order(" "))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut empty = order("Main");
        empty["products"] = json!([]);
        let (status, _) = send(&app, "POST", "/orderplaceds", Some(empty)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn order_history_and_responses() {
        let app = seeded_app().await;
        send(&app, "POST", "/orderplaceds", Some(order("Main"))).await;
        send(&app, "POST", "/orderplaceds", Some(order("branch_1"))).await;

        let (status, updated) = send(
            &app,
            "PATCH",
            "/orderplaceds/order_2/response",
            Some(json!({ "response": "accepted" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["response"], "accepted");

        let (_, accepted) = send(&app, "GET", "/orderplaceds?response=accepted", None).await;
        assert_eq!(accepted.as_array().unwrap().len(), 1);
        assert_eq!(accepted[0]["id"], "order_2");

        let (_, all) = send(&app, "GET", "/orderplaceds", None).await;
        assert_eq!(all.as_array().unwrap().len(), 2);

        let (_, none) = send(&app, "GET", "/orderplaceds?to=2000-01-01", None).await;
        assert_eq!(none, json!([]));

        let (status, single) = send(&app, "GET", "/orderplaceds/order_1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(single["branch"], "Main");

        let (status, _) = send(&app, "GET", "/orderplaceds/order_9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "PATCH",
            "/orderplaceds/order_9/response",
            Some(json!({ "response": "rejected" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
