use super::*;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::{
    domain::{SortDirection, SortField, SortSpec},
    error::FailureKind,
};
use tokio::{net::TcpListener, sync::Mutex};

type SeenQueries = Arc<Mutex<Vec<(&'static str, HashMap<String, String>)>>>;

fn page_body(total_pages: u32) -> serde_json::Value {
    serde_json::json!({
        "pagination": { "total": 1, "limit": 30, "total_pages": total_pages },
        "data": [{
            "title": "Whistler and Nature",
            "is_featured": true,
            "description": null,
            "gallery_title": "Gallery 124",
            "type": "AIC Only",
            "status": "Closed"
        }]
    })
}

async fn listing(
    State(seen): State<SeenQueries>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<serde_json::Value> {
    seen.lock().await.push(("listing", query));
    Json(page_body(4))
}

async fn search(
    State(seen): State<SeenQueries>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<serde_json::Value> {
    seen.lock().await.push(("search", query));
    Json(page_body(2))
}

async fn spawn_index_server() -> std::io::Result<(String, SeenQueries)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let seen: SeenQueries = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/api/v1/exhibitions", get(listing))
        .route("/api/v1/exhibitions/search", get(search))
        .route(
            "/broken/exhibitions/search",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/garbled/exhibitions", get(|| async { "not json" }))
        .with_state(seen.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), seen))
}

#[test]
fn rejects_unparseable_base_url() {
    assert!(matches!(
        HttpSearchClient::new("not a url"),
        Err(RemoteSetupError::InvalidUrl { .. })
    ));
    assert!(matches!(
        HttpSearchClient::new("mailto:someone@example.com"),
        Err(RemoteSetupError::NotHierarchical(_))
    ));
}

#[test]
fn search_endpoint_is_appended_to_base_path() {
    let client =
        HttpSearchClient::new("https://api.artic.edu/api/v1/exhibitions/").expect("client");

    let listing = SearchRequest::new(1, "", None);
    assert_eq!(
        client.endpoint(&listing).as_str(),
        "https://api.artic.edu/api/v1/exhibitions/"
    );

    let searching = SearchRequest::new(1, "monet", None);
    assert_eq!(
        client.endpoint(&searching).as_str(),
        "https://api.artic.edu/api/v1/exhibitions/search"
    );
}

#[tokio::test]
async fn plain_listing_uses_base_endpoint() {
    let (server_url, seen) = spawn_index_server().await.expect("spawn server");
    let client =
        HttpSearchClient::new(&format!("{server_url}/api/v1/exhibitions")).expect("client");

    let response = client
        .search(&SearchRequest::new(3, "", None))
        .await
        .expect("listing");

    assert_eq!(response.pagination.total_pages, 4);
    assert_eq!(response.data[0].title.as_deref(), Some("Whistler and Nature"));

    let seen = seen.lock().await;
    assert_eq!(seen.len(), 1);
    let (route, query) = &seen[0];
    assert_eq!(*route, "listing");
    assert_eq!(query.get("page").map(String::as_str), Some("3"));
    assert_eq!(query.get("limit").map(String::as_str), Some("30"));
    assert_eq!(
        query.get("fields").map(String::as_str),
        Some("title,is_featured,description,gallery_title,type,status")
    );
    assert!(!query.contains_key("q"));
}

#[tokio::test]
async fn sorted_search_sends_query_and_sort_clause() {
    let (server_url, seen) = spawn_index_server().await.expect("spawn server");
    let client =
        HttpSearchClient::new(&format!("{server_url}/api/v1/exhibitions")).expect("client");
    let request = SearchRequest::new(
        1,
        "van gogh",
        Some(SortSpec {
            field: SortField::Title,
            direction: SortDirection::Desc,
        }),
    );

    let response = client.search(&request).await.expect("search");
    assert_eq!(response.pagination.total_pages, 2);

    let seen = seen.lock().await;
    let (route, query) = &seen[0];
    assert_eq!(*route, "search");
    assert_eq!(query.get("q").map(String::as_str), Some("van gogh"));
    assert_eq!(
        query.get("sort[title.keyword][order]").map(String::as_str),
        Some("desc")
    );
}

#[tokio::test]
async fn http_error_status_is_a_status_failure() {
    let (server_url, _seen) = spawn_index_server().await.expect("spawn server");
    let client =
        HttpSearchClient::new(&format!("{server_url}/broken/exhibitions")).expect("client");

    let failure = client
        .search(&SearchRequest::new(1, "monet", None))
        .await
        .expect_err("server error");
    assert_eq!(failure.kind, FailureKind::Status);
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let (server_url, _seen) = spawn_index_server().await.expect("spawn server");
    let client =
        HttpSearchClient::new(&format!("{server_url}/garbled/exhibitions")).expect("client");

    let failure = client
        .search(&SearchRequest::new(1, "", None))
        .await
        .expect_err("garbled body");
    assert_eq!(failure.kind, FailureKind::Decode);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = HttpSearchClient::new(&format!("http://{addr}/exhibitions")).expect("client");
    let failure = client
        .search(&SearchRequest::new(1, "", None))
        .await
        .expect_err("connection refused");
    assert_eq!(failure.kind, FailureKind::Transport);
}
