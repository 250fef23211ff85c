//! Tests for the REST routes
//!
//! Drives the router directly with `oneshot`, without binding a socket.

#[cfg(test)]
mod tests {
    use crate::{
        api::Server,
        config::{Config, StoreConfig},
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt; // for `oneshot`
    use uuid::Uuid;

    /// Helper function to build a router over a fresh store
    fn app(max_capacity: usize, max_batch_size: usize) -> Router {
        let config = Config {
            store: StoreConfig {
                max_capacity,
                max_batch_size,
            },
            ..Default::default()
        };
        Server::new(config).router()
    }

    /// Send a request and return the status and the parsed JSON body (Null if empty)
    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(serde_json::to_string(&value).unwrap())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = app(10, 5);
        let (status, body) = send(&app, "GET", "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "OK" }));
    }

    #[tokio::test]
    async fn test_create_and_fetch_hospital() {
        let app = app(10, 5);

        let (status, created) = send(
            &app,
            "POST",
            "/hospitals/",
            Some(json!({
                "name": "Hospital \"Quotes\"",
                "address": "123 'Apostrophe' St",
                "phone": "555-123-4567 ext. 123"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["id"], 1);
        assert_eq!(created["name"], "Hospital \"Quotes\"");
        assert_eq!(created["active"], true);
        assert_eq!(created["creation_batch_id"], Value::Null);
        assert!(created["created_at"].is_string());

        let (status, fetched) = send(&app, "GET", "/hospitals/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, all) = send(&app, "GET", "/hospitals", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all, json!([created]));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_and_missing_fields() {
        let app = app(10, 5);

        let (status, body) = send(
            &app,
            "POST",
            "/hospitals/",
            Some(json!({ "name": "   ", "address": "123 Valid St" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("name"));

        let (status, body) = send(
            &app,
            "POST",
            "/hospitals/",
            Some(json!({ "name": "No Address" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("address"));

        let (status, body) = send(
            &app,
            "POST",
            "/hospitals/",
            Some(json!({ "name": "Bad", "address": "1 Road", "creation_batch_id": "not-a-uuid" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());

        let (_, all) = send(&app, "GET", "/hospitals/", None).await;
        assert_eq!(all, json!([]));
    }

    #[tokio::test]
    async fn test_missing_hospital_returns_404() {
        let app = app(10, 5);

        let (status, body) = send(&app, "GET", "/hospitals/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Hospital not found" }));

        let (status, _) = send(&app, "PUT", "/hospitals/99", Some(json!({ "name": "X" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", "/hospitals/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_path_answers_with_detail() {
        let app = app(10, 5);

        let (status, body) = send(&app, "GET", "/hospitals/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());

        let (status, body) = send(&app, "GET", "/hospitals/batch/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());

        let (status, body) = send(&app, "PATCH", "/hospitals/batch/12345/activate", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_update_rejects_null_name() {
        let app = app(10, 5);
        send(
            &app,
            "POST",
            "/hospitals/",
            Some(json!({ "name": "Kept", "address": "1 Road" })),
        )
        .await;

        let (status, body) = send(&app, "PUT", "/hospitals/1", Some(json!({ "name": null }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, json!({ "detail": "name: field cannot be null" }));

        let (_, fetched) = send(&app, "GET", "/hospitals/1", None).await;
        assert_eq!(fetched["name"], "Kept");
    }

    #[tokio::test]
    async fn test_partial_update_and_delete() {
        let app = app(10, 5);
        send(
            &app,
            "POST",
            "/hospitals/",
            Some(json!({ "name": "Old", "address": "1 Road", "phone": "555" })),
        )
        .await;

        let (status, updated) = send(
            &app,
            "PUT",
            "/hospitals/1",
            Some(json!({ "address": "2 Road" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Old");
        assert_eq!(updated["address"], "2 Road");
        assert_eq!(updated["phone"], "555");

        let (status, updated) = send(&app, "PUT", "/hospitals/1", Some(json!({ "phone": null }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["phone"], Value::Null);

        let (status, body) = send(&app, "DELETE", "/hospitals/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = send(&app, "GET", "/hospitals/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_store_evicts_oldest_over_capacity() {
        let app = app(3, 5);

        for name in ["A", "B", "C", "D"] {
            send(
                &app,
                "POST",
                "/hospitals/",
                Some(json!({ "name": name, "address": "1 Road" })),
            )
            .await;
        }

        let (_, all) = send(&app, "GET", "/hospitals/", None).await;
        let ids: Vec<u64> = all
            .as_array()
            .unwrap()
            .iter()
            .map(|h| h["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![2, 3, 4]);

        let (status, _) = send(&app, "GET", "/hospitals/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_batch_lifecycle() {
        let app = app(100, 2);
        let batch_id = Uuid::new_v4();

        for name in ["One", "Two"] {
            let (status, created) = send(
                &app,
                "POST",
                "/hospitals/",
                Some(json!({ "name": name, "address": "1 Road", "creation_batch_id": batch_id })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(created["active"], false);
            assert_eq!(created["creation_batch_id"], batch_id.to_string());
        }

        let (status, body) = send(
            &app,
            "POST",
            "/hospitals/",
            Some(json!({ "name": "Three", "address": "1 Road", "creation_batch_id": batch_id })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": "Batch cannot exceed 2 hospitals" }));

        let uri = format!("/hospitals/batch/{}", batch_id);
        let (status, members) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(members.as_array().unwrap().len(), 2);

        let activate = format!("/hospitals/batch/{}/activate", batch_id);
        let (status, body) = send(&app, "PATCH", &activate, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["activated_count"], 2);
        assert_eq!(
            body["message"],
            format!("Activated 2 hospital(s) with batch ID {}", batch_id)
        );

        let (status, body) = send(&app, "PATCH", &activate, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["detail"],
            "Cannot activate batch: one or more hospitals in the batch are already active"
        );

        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted_count"], 2);

        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "detail": "No hospitals found with the specified batch ID" })
        );
    }

    #[tokio::test]
    async fn test_unknown_batch_returns_404() {
        let app = app(10, 5);
        let batch_id = Uuid::new_v4();

        let uri = format!("/hospitals/batch/{}", batch_id);
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "PATCH", &format!("{}/activate", uri), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
