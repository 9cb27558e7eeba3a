//! End-to-end aggregation against mocked product and user services.
//!
//! Wires the real gateway adapter, in-memory order store and policy registry
//! from YAML configuration, with the services behind a `wiremock` server.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use order_api::config::load_config_from_string;
use order_api::domain::ordering::CreateOrderCommand;
use order_api::{
    AggregationError, ClientId, Dependency, GatewayServiceClient, InMemoryOrderRepository, Money,
    Order, OrderAggregator, OrderDetailDto, OrderId, ProductId, RequestContext, Timestamp,
};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type Aggregator = OrderAggregator<InMemoryOrderRepository, GatewayServiceClient, GatewayServiceClient>;

fn order(id: i64, product_id: i64, client_id: i64, quantity: u32, ordered_at: &str) -> Order {
    Order::new(CreateOrderCommand {
        id: OrderId::new(id),
        product_id: ProductId::new(product_id),
        client_id: ClientId::new(client_id),
        purchase_quantity: quantity,
        price: Money::new(dec!(20.00)),
        ordered_at: Some(Timestamp::parse(ordered_at).unwrap()),
    })
    .unwrap()
}

fn aggregator(server: &MockServer) -> Aggregator {
    let yaml = format!(
        r"
gateway:
  base_url: {}
  timeout_ms: 2000
resilience:
  policies:
    retry:
      max_attempts: 3
      initial_backoff_ms: 5
      max_backoff_ms: 20
aggregation:
  request_timeout_ms: 5000
",
        server.uri()
    );
    let config = load_config_from_string(&yaml).unwrap();
    let registry = config.resilience.build_registry().unwrap();
    let client = Arc::new(GatewayServiceClient::new(&config.gateway.to_gateway_config()).unwrap());
    let orders = Arc::new(InMemoryOrderRepository::with_orders([
        order(7, 3, 9, 2, "2024-05-01T10:00:00Z"),
        order(8, 4, 9, 1, "2024-04-01T10:00:00Z"),
    ]));

    OrderAggregator::new(orders, Arc::clone(&client), client, &registry)
        .unwrap()
        .with_default_deadline(config.aggregation.request_timeout())
}

fn keyboard() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": 3,
        "name": "Keyboard",
        "quantity": 40,
        "price": "25.00"
    }))
}

fn ada() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": 9,
        "name": "Ada",
        "telephoneNumber": "555-0101",
        "address": "12 Analytical Row",
        "email": "ada@example.com",
        "role": "Customer"
    }))
}

#[tokio::test]
async fn assembles_order_detail_through_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/3"))
        .and(header("Api-Gateway", "SignedByApiGateway"))
        .and(header("ClientId", "order-api"))
        .respond_with(keyboard())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/authentication/9"))
        .and(header("Api-Gateway", "SignedByApiGateway"))
        .and(header("ClientId", "order-api"))
        .respond_with(ada())
        .expect(1)
        .mount(&server)
        .await;

    let detail = aggregator(&server)
        .get_order_details(OrderId::new(7))
        .await
        .unwrap();

    assert_eq!(detail.order_id(), OrderId::new(7));
    assert_eq!(detail.client_name(), "Ada");
    assert_eq!(detail.product_name(), "Keyboard");
    assert_eq!(detail.total_price().amount(), dec!(50.00));

    let json = serde_json::to_value(OrderDetailDto::from(&detail)).unwrap();
    assert_eq!(json["total_price"], "50.00");
    assert_eq!(json["unit_price"], "25.00");
    assert_eq!(json["client_email"], "ada@example.com");
}

#[tokio::test]
async fn absent_order_never_reaches_the_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = aggregator(&server)
        .get_order_details(OrderId::new(999))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AggregationError::OrderNotFound {
            order_id: OrderId::new(999)
        }
    );
}

#[tokio::test]
async fn missing_product_fails_after_one_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/3"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/authentication/9"))
        .respond_with(ada())
        .mount(&server)
        .await;

    let err = aggregator(&server)
        .get_order_details(OrderId::new(7))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AggregationError::DependencyNotFound {
            dependency: Dependency::Product,
            id: 3
        }
    );
}

#[tokio::test]
async fn transient_product_failures_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/3"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products/3"))
        .respond_with(keyboard())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/authentication/9"))
        .respond_with(ada())
        .expect(1)
        .mount(&server)
        .await;

    let detail = aggregator(&server)
        .get_order_details(OrderId::new(7))
        .await
        .unwrap();

    assert_eq!(detail.total_price().amount(), dec!(50.00));
}

#[tokio::test]
async fn user_service_down_exhausts_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/3"))
        .respond_with(keyboard())
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/authentication/9"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let err = aggregator(&server)
        .get_order_details(OrderId::new(7))
        .await
        .unwrap_err();

    match err {
        AggregationError::UpstreamUnavailable {
            dependency,
            attempts,
            reason,
        } => {
            assert_eq!(dependency, Dependency::User);
            assert_eq!(attempts, 3);
            assert!(reason.contains("HTTP 500"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_user_payload_is_retried_then_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/3"))
        .respond_with(keyboard())
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/authentication/9"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(3)
        .mount(&server)
        .await;

    let err = aggregator(&server)
        .get_order_details(OrderId::new(7))
        .await
        .unwrap_err();

    assert_eq!(err.code(), "UPSTREAM_UNAVAILABLE");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn caller_deadline_bounds_slow_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/3"))
        .respond_with(keyboard().set_delay(Duration::from_secs(1)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/authentication/9"))
        .respond_with(ada())
        .mount(&server)
        .await;

    let ctx = RequestContext::new().with_deadline(Duration::from_millis(100));
    let err = aggregator(&server)
        .get_order_details_with(OrderId::new(7), &ctx)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AggregationError::DeadlineExceeded {
            elapsed: Duration::from_millis(100)
        }
    );
}

#[tokio::test]
async fn lists_client_orders_without_remote_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let aggregator = aggregator(&server);

    let orders = aggregator
        .get_orders_by_client_id(ClientId::new(9))
        .await
        .unwrap();
    let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![8, 7]);

    let err = aggregator
        .get_orders_by_client_id(ClientId::new(10))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AggregationError::NoOrdersFound {
            client_id: ClientId::new(10)
        }
    );
}
