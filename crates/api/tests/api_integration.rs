//! Integration tests for the API server.

use std::sync::{Arc, OnceLock};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Duration;
use domain::{TokenConfig, TokenService};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use store::InMemoryStore;
use tower::ServiceExt;

const SECRET: &str = "api-integration-secret-that-is-long-enough";

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> axum::Router {
    let tokens = TokenService::new(TokenConfig::new(SECRET, Duration::hours(168)).unwrap());
    let state = Arc::new(api::AppState::new(InMemoryStore::new(), tokens));
    api::create_app(state, get_metrics_handle(), api::cors_layer(&[]))
}

/// Sends one request and returns the status with the JSON body (`Null` when empty).
async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn register(app: &axum::Router, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/customers",
        None,
        Some(json!({
            "email": email,
            "password": "geheim123",
            "firstName": "Fatma",
            "city": "Utrecht"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

async fn login(app: &axum::Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

/// Registers and logs in; returns (customer id, token).
async fn customer(app: &axum::Router, email: &str) -> (String, String) {
    let id = register(app, email).await;
    let (status, body) = login(app, email, "geheim123").await;
    assert_eq!(status, StatusCode::OK);
    (id, body["token"].as_str().unwrap().to_string())
}

fn checkout_body(customer_id: &str) -> Value {
    json!({
        "customerId": customer_id,
        "orderItems": [{ "productId": 1, "quantity": 3, "unitPrice": 2.50 }],
        "totalAmount": 7.50,
        "deliveryAddress": "Dorpsstraat 1",
        "deliveryPostalCode": "1234 AB",
        "deliveryCity": "Utrecht",
        "notes": "Achterdeur"
    })
}

async fn place_order(app: &axum::Router, customer_id: &str, token: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/orders",
        Some(token),
        Some(checkout_body(customer_id)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

mod operational {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let app = setup();
        let (status, body) = send(&app, "GET", "/health", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let app = setup();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));
    }
}

mod authentication {
    use super::*;

    #[tokio::test]
    async fn test_unregistered_login_is_unauthorized() {
        let app = setup();
        let (status, body) = login(&app, "niemand@example.nl", "geheim123").await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "message": "Ongeldige inloggegevens." }));
    }

    #[tokio::test]
    async fn test_wrong_password_looks_like_unknown_account() {
        let app = setup();
        register(&app, "fatma@example.nl").await;

        let (status, body) = login(&app, "fatma@example.nl", "fout").await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Ongeldige inloggegevens.");
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let app = setup();
        let (status, body) = send(
            &app,
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "fatma@example.nl" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "E-mailadres en wachtwoord zijn verplicht.");
    }

    #[tokio::test]
    async fn test_login_returns_account_without_hash() {
        let app = setup();
        let id = register(&app, "fatma@example.nl").await;

        let (status, body) = login(&app, "fatma@example.nl", "geheim123").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["userId"], id.as_str());
        assert_eq!(body["user"]["email"], "fatma@example.nl");
        assert_eq!(body["user"]["firstName"], "Fatma");
        assert!(body["user"].get("passwordHash").is_none());
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn test_refresh_token() {
        let app = setup();
        let (_, token) = customer(&app, "fatma@example.nl").await;

        let (status, body) = send(
            &app,
            "POST",
            "/auth/refresh-token",
            None,
            Some(json!({ "token": token })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].as_str().is_some());

        let (status, body) = send(
            &app,
            "POST",
            "/auth/refresh-token",
            None,
            Some(json!({ "token": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Token is verplicht.");

        let (status, body) = send(
            &app,
            "POST",
            "/auth/refresh-token",
            None,
            Some(json!({ "token": "not-a-token" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Ongeldige of verlopen token.");
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let app = setup();
        let (id, token) = customer(&app, "fatma@example.nl").await;

        let (status, _) = send(
            &app,
            "POST",
            "/auth/logout",
            None,
            Some(json!({ "token": token })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", &format!("/customers/{id}"), Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            "POST",
            "/auth/refresh-token",
            None,
            Some(json!({ "token": token })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_protected_routes_need_bearer() {
        let app = setup();
        let (status, body) = send(&app, "GET", "/orders", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["message"].is_string());

        let (status, _) = send(&app, "GET", "/customers", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

mod customers {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let app = setup();
        register(&app, "fatma@example.nl").await;

        let (status, body) = send(
            &app,
            "POST",
            "/customers",
            None,
            Some(json!({ "email": "fatma@example.nl", "password": "anders" })),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_reads() {
        let app = setup();
        let (id, token) = customer(&app, "fatma@example.nl").await;

        let (status, body) =
            send(&app, "GET", &format!("/customers/{id}"), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["city"], "Utrecht");

        let (status, body) = send(
            &app,
            "GET",
            "/customers/email/fatma@example.nl",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id.as_str());

        let (status, _) = send(
            &app,
            "GET",
            "/customers/email/niemand@example.nl",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "GET", "/customers", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = send(&app, "GET", "/customers/not-a-uuid", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_without_password_keeps_it() {
        let app = setup();
        let (id, token) = customer(&app, "fatma@example.nl").await;

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/customers/{id}"),
            Some(&token),
            Some(json!({
                "id": id,
                "email": "fatma@example.nl",
                "firstName": "Fatma",
                "lastName": "Yilmaz",
                "password": ""
            })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = login(&app, "fatma@example.nl", "geheim123").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["lastName"], "Yilmaz");
        // Fields left out of a full replacement are cleared.
        assert!(body["user"]["city"].is_null());
    }

    #[tokio::test]
    async fn test_update_with_new_password() {
        let app = setup();
        let (id, token) = customer(&app, "fatma@example.nl").await;

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/customers/{id}"),
            Some(&token),
            Some(json!({ "id": id, "email": "fatma@example.nl", "password": "nieuw456" })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        assert_eq!(
            login(&app, "fatma@example.nl", "geheim123").await.0,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            login(&app, "fatma@example.nl", "nieuw456").await.0,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_update_checks_ids() {
        let app = setup();
        let (id, token) = customer(&app, "fatma@example.nl").await;
        let other = register(&app, "jan@example.nl").await;

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/customers/{id}"),
            Some(&token),
            Some(json!({ "id": other, "email": "fatma@example.nl" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/customers/{other}"),
            Some(&token),
            Some(json!({ "id": other, "email": "jan@example.nl" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body["message"].is_string());

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/customers/{id}"),
            Some(&token),
            Some(json!({ "id": id, "email": "jan@example.nl" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_delete_own_account_only() {
        let app = setup();
        let (id, token) = customer(&app, "fatma@example.nl").await;
        let other = register(&app, "jan@example.nl").await;
        place_order(&app, &id, &token).await;

        let (status, _) =
            send(&app, "DELETE", &format!("/customers/{other}"), Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) =
            send(&app, "DELETE", &format!("/customers/{id}"), Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, jan) = login(&app, "jan@example.nl", "geheim123").await;
        let jan_token = jan["token"].as_str().unwrap();
        let (status, body) = send(&app, "GET", "/orders", Some(jan_token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }
}

mod orders {
    use super::*;

    #[tokio::test]
    async fn test_checkout_scenario() {
        let app = setup();
        let (id, token) = customer(&app, "fatma@example.nl").await;

        let (status, order) = send(
            &app,
            "POST",
            "/orders",
            Some(&token),
            Some(checkout_body(&id)),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(order["status"], "Pending");
        assert_eq!(order["totalAmount"], 7.5);
        assert_eq!(order["customerId"], id.as_str());
        assert_eq!(order["deliveryCity"], "Utrecht");
        assert_eq!(order["notes"], "Achterdeur");
        assert_eq!(order["orderItems"][0]["productId"], 1);
        assert_eq!(order["orderItems"][0]["quantity"], 3);
        assert_eq!(order["orderItems"][0]["unitPrice"], 2.5);
        assert!(order["orderItems"][0]["product"].is_null());
        assert_eq!(order["customer"]["email"], "fatma@example.nl");

        let order_id = order["id"].as_str().unwrap();
        let (status, fetched) =
            send(&app, "GET", &format!("/orders/{order_id}"), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, order);

        let (status, history) = send(
            &app,
            "GET",
            &format!("/orders/customer/{id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(history.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_checkout_for_someone_else_is_forbidden() {
        let app = setup();
        let (_, token) = customer(&app, "fatma@example.nl").await;
        let other = register(&app, "jan@example.nl").await;

        let (status, _) = send(
            &app,
            "POST",
            "/orders",
            Some(&token),
            Some(checkout_body(&other)),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_invalid_checkouts_are_rejected() {
        let app = setup();
        let (id, token) = customer(&app, "fatma@example.nl").await;

        let mut wrong_total = checkout_body(&id);
        wrong_total["totalAmount"] = json!(9.99);
        let mut no_items = checkout_body(&id);
        no_items["orderItems"] = json!([]);
        let mut zero_quantity = checkout_body(&id);
        zero_quantity["orderItems"][0]["quantity"] = json!(0);
        let mut no_city = checkout_body(&id);
        no_city["deliveryCity"] = json!("  ");
        let mut overflowing = checkout_body(&id);
        overflowing["orderItems"][0]["unitPrice"] = json!(1e16);
        overflowing["orderItems"][0]["quantity"] = json!(10);
        overflowing["totalAmount"] = json!(1e17);

        for body in [wrong_total, no_items, zero_quantity, no_city, overflowing] {
            let (status, response) = send(&app, "POST", "/orders", Some(&token), Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{response}");
            assert!(response["message"].is_string());
        }

        let (status, body) = send(&app, "GET", "/orders", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = setup();
        let (_, token) = customer(&app, "fatma@example.nl").await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/orders")
                    .header("authorization", format!("Bearer {token}"))
                    .header("content-type", "application/json")
                    .body(Body::from("{ not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_status_transitions() {
        let app = setup();
        let (id, token) = customer(&app, "fatma@example.nl").await;
        let order_id = place_order(&app, &id, &token).await;
        let uri = format!("/orders/{order_id}/status");

        let set_status = |body: &'static str| {
            let app = app.clone();
            let uri = uri.clone();
            let token = token.clone();
            async move {
                app.oneshot(
                    Request::builder()
                        .method("PUT")
                        .uri(uri)
                        .header("authorization", format!("Bearer {token}"))
                        .header("content-type", "application/json")
                        .body(Body::from(body))
                        .unwrap(),
                )
                .await
                .unwrap()
                .status()
            }
        };

        assert_eq!(set_status("\"Processing\"").await, StatusCode::NO_CONTENT);
        assert_eq!(set_status("Shipped").await, StatusCode::NO_CONTENT);
        assert_eq!(set_status("\"Cancelled\"").await, StatusCode::CONFLICT);
        assert_eq!(set_status("\"Lost\"").await, StatusCode::BAD_REQUEST);
        assert_eq!(set_status("\"Shipped\"").await, StatusCode::NO_CONTENT);

        let (_, order) = send(&app, "GET", &format!("/orders/{order_id}"), Some(&token), None).await;
        assert_eq!(order["status"], "Shipped");

        let missing = format!("/orders/{}/status", common::OrderId::new());
        let (status, _) = send(&app, "PUT", &missing, Some(&token), Some(json!("Shipped"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_replace_order() {
        let app = setup();
        let (id, token) = customer(&app, "fatma@example.nl").await;
        let order_id = place_order(&app, &id, &token).await;
        let uri = format!("/orders/{order_id}");

        let replacement = json!({
            "id": order_id,
            "orderItems": [
                { "productId": 2, "quantity": 1, "unitPrice": 4.99 },
                { "productId": 3, "quantity": 2, "unitPrice": 1.00 }
            ],
            "totalAmount": 6.99,
            "deliveryAddress": "Kerkstraat 5",
            "deliveryPostalCode": "4321 BA",
            "deliveryCity": "Amersfoort"
        });
        let (status, _) = send(&app, "PUT", &uri, Some(&token), Some(replacement.clone())).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, order) = send(&app, "GET", &uri, Some(&token), None).await;
        assert_eq!(order["orderItems"].as_array().unwrap().len(), 2);
        assert_eq!(order["totalAmount"], 6.99);
        assert_eq!(order["deliveryCity"], "Amersfoort");
        assert!(order["notes"].is_null());
        assert_eq!(order["status"], "Pending");

        let mut mismatched = replacement;
        mismatched["id"] = json!(common::OrderId::new());
        let (status, _) = send(&app, "PUT", &uri, Some(&token), Some(mismatched)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_order() {
        let app = setup();
        let (id, token) = customer(&app, "fatma@example.nl").await;
        let order_id = place_order(&app, &id, &token).await;
        let uri = format!("/orders/{order_id}");

        let (status, _) = send(&app, "DELETE", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].is_string());

        let (status, _) = send(&app, "DELETE", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

/// Drives a real server over TCP with the storefront client library.
mod storefront_client {
    use super::*;
    use client::{
        ApiClient, CartAction, CartStore, ClientError, MemoryCartStorage, checkout,
    };
    use common::api::RegisterRequest;
    use common::{DeliveryInfo, Money, OrderStatus, Product, ProductId};

    async fn spawn_server() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = setup();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn bread() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Brood".to_string(),
            price: Money::from_cents(250),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_cart_to_order() {
        let base_url = spawn_server().await;
        let api = ApiClient::new(base_url).unwrap();

        let err = api.login("fatma@example.nl", "geheim123").await.unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized(ref m) if m == "Ongeldige inloggegevens."));

        api.register(&RegisterRequest {
            email: "fatma@example.nl".to_string(),
            password: "geheim123".to_string(),
            ..RegisterRequest::default()
        })
        .await
        .unwrap();
        let mut session = api.start_session("fatma@example.nl", "geheim123").await.unwrap();

        let mut cart = CartStore::open(MemoryCartStorage::new());
        cart.dispatch(CartAction::Add {
            product: bread(),
            quantity: 1,
        })
        .unwrap();
        cart.dispatch(CartAction::Add {
            product: bread(),
            quantity: 2,
        })
        .unwrap();
        assert_eq!(cart.cart().lines().len(), 1);
        assert_eq!(cart.cart().total(), Money::from_cents(750));

        let receipt = checkout(
            &api,
            &mut session,
            &mut cart,
            DeliveryInfo::new("Dorpsstraat 1", "1234 AB", "Utrecht"),
        )
        .await
        .unwrap();
        assert!(receipt.cart_saved());
        let order = receipt.order;

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, Money::from_cents(750));
        assert_eq!(order.order_items[0].quantity, 3);
        assert_eq!(order.order_items[0].unit_price, Money::from_cents(250));
        assert!(cart.cart().is_empty());

        let token = session.token().unwrap().to_string();
        let customer_id = session.customer_id().unwrap();
        let history = api.get_customer_orders(&token, customer_id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(api.get_order(&token, order.id).await.unwrap(), order);
        assert_eq!(
            api.get_customer(&token, customer_id).await.unwrap().email,
            "fatma@example.nl"
        );
    }

    #[tokio::test]
    async fn test_revoked_session_keeps_cart() {
        let base_url = spawn_server().await;
        let api = ApiClient::new(base_url).unwrap();
        api.register(&RegisterRequest {
            email: "jan@example.nl".to_string(),
            password: "geheim123".to_string(),
            ..RegisterRequest::default()
        })
        .await
        .unwrap();
        let mut session = api.start_session("jan@example.nl", "geheim123").await.unwrap();

        api.refresh_session(&mut session).await.unwrap();
        api.logout(session.token().unwrap()).await.unwrap();

        let mut cart = CartStore::open(MemoryCartStorage::new());
        cart.dispatch(CartAction::Add {
            product: bread(),
            quantity: 2,
        })
        .unwrap();

        let err = checkout(
            &api,
            &mut session,
            &mut cart,
            DeliveryInfo::new("Dorpsstraat 1", "1234 AB", "Utrecht"),
        )
        .await
        .unwrap_err();

        assert!(err.is_unauthorized());
        assert!(!session.is_logged_in());
        assert_eq!(cart.cart().item_count(), 2);
    }
}
