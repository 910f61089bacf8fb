//! Axum router for subscription endpoints.

use axum::{
    routing::{delete, get},
    Router,
};

use super::handlers::{
    delete_subscription, list_subscriptions, save_subscription, sync_status, sync_subscriptions,
    upcoming_payments, SubscriptionAppState,
};

/// Create the subscription router, mounted at `/subscriptions`.
///
/// # Routes
/// - `GET /` - List subscriptions
/// - `POST /` - Upsert one subscription
/// - `GET /sync` - Stored record count
/// - `POST /sync` - Replace the stored list
/// - `GET /upcoming` - Next payments
/// - `DELETE /:id` - Remove one subscription
pub fn subscription_routes() -> Router<SubscriptionAppState> {
    Router::new()
        .route("/", get(list_subscriptions).post(save_subscription))
        .route("/sync", get(sync_status).post(sync_subscriptions))
        .route("/upcoming", get(upcoming_payments))
        .route("/:id", delete(delete_subscription))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::adapters::clock::FixedClock;
    use crate::adapters::storage::InMemorySubscriptionStore;

    fn app(store: InMemorySubscriptionStore) -> Router {
        let store = Arc::new(store);
        let state = SubscriptionAppState {
            reader: store.clone(),
            repository: store,
            clock: Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 2, 12).unwrap())),
        };
        Router::new()
            .nest("/subscriptions", subscription_routes())
            .with_state(state)
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn sync_stores_valid_records_and_counts_rejects() {
        let store = InMemorySubscriptionStore::new();
        let response = app(store.clone())
            .oneshot(post(
                "/subscriptions/sync",
                json!({ "subscriptions": [
                    { "id": "a", "name": "A", "amount": 5, "start_date": "2024-01-01" },
                    { "id": "b", "name": "B", "amount": 5, "startDate": "nope" }
                ]}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "success": true, "count": 1, "rejected": 1 })
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn sync_rejects_non_array() {
        let response = app(InMemorySubscriptionStore::new())
            .oneshot(post("/subscriptions/sync", json!({ "subscriptions": "x" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upsert_without_id_is_bad_request() {
        let response = app(InMemorySubscriptionStore::new())
            .oneshot(post(
                "/subscriptions",
                json!({ "name": "A", "amount": 5, "startDate": "2024-01-01" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_returns_canonical_shape() {
        let store = InMemorySubscriptionStore::with_raw(vec![json!({
            "id": "a", "name": "A", "amount": "5.5", "billing_interval": "yearly",
            "start_date": "2024-01-01"
        })]);
        let response = app(store)
            .oneshot(Request::get("/subscriptions").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = body_json(response).await;
        let first = &body["subscriptions"][0];
        assert_eq!(first["billingInterval"], "Yearly");
        assert_eq!(first["startDate"], "2024-01-01");
        assert_eq!(first["amount"], 5.5);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let response = app(InMemorySubscriptionStore::new())
            .oneshot(
                Request::delete("/subscriptions/ghost")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn upcoming_respects_window() {
        let store = InMemorySubscriptionStore::with_raw(vec![
            json!({ "id": "a", "name": "A", "amount": 1, "startDate": "2024-01-14" }),
            json!({ "id": "b", "name": "B", "amount": 1, "startDate": "2024-01-30" }),
        ]);
        let response = app(store)
            .oneshot(
                Request::get("/subscriptions/upcoming?within_days=5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = body_json(response).await;
        let payments = body["payments"].as_array().unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0]["dueDate"], "2024-02-14");
        assert_eq!(payments[0]["daysUntilDue"], 2);
    }
}
