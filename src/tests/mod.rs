use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::json;

use crate::api::{ApiClient, ApiError};
use crate::catalog::{self, clean, Catalog};
use crate::model::{Paint, PaintInput};
use crate::output;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/pinturas")
}

fn paint(id: u64, brand: &str, price: f64) -> Paint {
    Paint {
        id,
        brand: brand.to_string(),
        price,
        color: "#ffffff".to_string(),
        quantity: 1,
    }
}

#[tokio::test]
async fn refresh_cleans_and_orders_the_fetched_catalog() {
    let router = Router::new().route(
        "/pinturas",
        get(|| async {
            Json(json!([
                { "id": 1, "marca": "Rex", "precio": 120, "color": "#fff", "cantidad": 3 },
                { "id": 2, "marca": "Alba", "precio": "999", "color": "#fff", "cantidad": 1 },
                { "id": 3, "marca": "", "precio": 100, "color": "#fff", "cantidad": 1 },
                { "id": 4, "marca": "Sherwin", "precio": "250.5", "color": "#0f0", "cantidad": 2 }
            ]))
        }),
    );
    let endpoint = serve(router).await;

    let client = ApiClient::new(&endpoint, 5).unwrap();
    let mut catalog = Catalog::new();
    let count = catalog::refresh(&client, &mut catalog).await.unwrap();

    assert_eq!(count, 2);
    let ids: Vec<u64> = catalog.snapshot().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![4, 1]);
    assert_eq!(catalog.find(4).map(|p| p.price), Some(250.5));
}

#[tokio::test]
async fn failed_fetch_leaves_the_previous_snapshot_untouched() {
    let router = Router::new().route(
        "/pinturas",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let endpoint = serve(router).await;

    let client = ApiClient::new(&endpoint, 5).unwrap();
    let mut catalog = Catalog::new();
    catalog.replace(vec![paint(1, "Rex", 100.0), paint(2, "Alba", 200.0)]);

    let err = catalog::refresh(&client, &mut catalog).await.unwrap_err();
    match err {
        ApiError::Status { status, .. } => assert_eq!(status, 500),
        other => panic!("expected a status error, got {other:?}"),
    }
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.find(2).map(|p| p.brand.as_str()), Some("Alba"));
}

#[tokio::test]
async fn delete_success_is_distinguishable_without_a_body() {
    let router = Router::new().route(
        "/pinturas/:id",
        delete(|Path(id): Path<u64>| async move {
            if id == 7 {
                StatusCode::NO_CONTENT
            } else {
                StatusCode::NOT_FOUND
            }
        }),
    );
    let endpoint = serve(router).await;

    let client = ApiClient::new(&endpoint, 5).unwrap();
    assert!(client.delete(7).await.is_ok());

    let err = client.delete(8).await.unwrap_err();
    match err {
        ApiError::Status { status, reason } => {
            assert_eq!(status, 404);
            assert!(!reason.is_empty());
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_sends_wire_field_names_and_reads_the_assigned_id() {
    let router = Router::new().route(
        "/pinturas",
        post(|Json(body): Json<serde_json::Value>| async move {
            (
                StatusCode::CREATED,
                Json(json!({
                    "id": 41,
                    "marca": body["marca"],
                    "precio": body["precio"],
                    "color": body["color"],
                    "cantidad": body["cantidad"]
                })),
            )
        }),
    );
    let endpoint = serve(router).await;

    let client = ApiClient::new(&endpoint, 5).unwrap();
    let input = PaintInput {
        brand: "Rex".to_string(),
        price: 120.5,
        color: "#ff0000".to_string(),
        quantity: 4,
    };
    let created = client.create(&input).await.unwrap();
    assert_eq!(created.id, 41);
    assert_eq!(created.marca.as_deref(), Some("Rex"));
    assert_eq!(created.parsed_price(), Some(120.5));
}

#[tokio::test]
async fn update_puts_the_full_replacement_to_the_id_path() {
    let router = Router::new().route(
        "/pinturas/:id",
        put(
            |Path(id): Path<u64>, Json(body): Json<serde_json::Value>| async move {
                Json(json!({
                    "id": id,
                    "marca": body["marca"],
                    "precio": body["precio"],
                    "color": body["color"],
                    "cantidad": body["cantidad"]
                }))
            },
        ),
    );
    let endpoint = serve(router).await;

    let client = ApiClient::new(&endpoint, 5).unwrap();
    let input = PaintInput {
        brand: "Alba".to_string(),
        price: 300.0,
        color: "#00ff00".to_string(),
        quantity: 9,
    };
    let updated = client.update(12, &input).await.unwrap();
    assert_eq!(updated.id, 12);
    assert_eq!(updated.marca.as_deref(), Some("Alba"));
    assert_eq!(updated.cantidad, Some(9));
}

#[tokio::test]
async fn network_refusal_maps_to_a_transport_error() {
    // Bind to grab a free port, then drop the listener so connects are refused.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{addr}/pinturas"), 2).unwrap();
    let err = client.fetch_all().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }));
}

#[test]
fn csv_export_of_one_record_is_exactly_two_lines() {
    let records = vec![Paint {
        id: 1,
        brand: "X".to_string(),
        price: 99.5,
        color: "#fff".to_string(),
        quantity: 3,
    }];
    let csv = output::render_csv(&records);
    assert_eq!(csv, "ID,Marca,Precio,Color,Cantidad\n1,X,99.5,#fff,3\n");
}

#[test]
fn cleaning_and_aggregation_compose_over_one_payload() {
    let raw = serde_json::from_value(json!([
        { "id": 10, "marca": "Rex", "precio": 100, "color": "#fff", "cantidad": 1 },
        { "id": 11, "marca": "Rex", "precio": 200, "color": "#fff", "cantidad": 1 },
        { "id": 12, "marca": "Alba", "precio": 300, "color": "#fff", "cantidad": 1 },
        { "id": 13, "marca": "Alba", "precio": 5000, "color": "#fff", "cantidad": 1 }
    ]))
    .unwrap();
    let cleaned = clean(raw);
    assert_eq!(cleaned.len(), 3);

    let summary = crate::stats::summarize(&cleaned).unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.average_price, 200.0);
    assert_eq!(summary.most_common_brand, "Rex");
    assert_eq!(summary.priciest.id, 12);
}
