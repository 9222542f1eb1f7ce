use ::http::{Method, Request, StatusCode};
use griddle_grid::*;
use griddle_source_memory::MemorySource;
use serde_json::json;

fn seed_source() -> MemorySource {
    MemorySource::from_value(&json!([
        { "id": 1, "name": "Acme Corp", "status": "active" },
        { "id": 2, "name": "Globex", "status": "rejected" },
        { "id": 3, "name": "Initech", "status": "active" },
    ]))
    .unwrap()
}

fn test_config() -> GridConfig {
    GridConfig {
        searchable: vec!["name".into()],
        orderable: [("name".to_string(), "name".to_string())].into(),
    }
}

fn build_handler(source: MemorySource) -> GridHttp<MemorySource> {
    GridHttp::new(GridService::new(test_config()), source)
}

fn get(handler: &GridHttp<MemorySource>, uri: &str) -> ::http::Response<Vec<u8>> {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Vec::new())
        .unwrap();
    handler.handle(req)
}

// ── GET /data ───────────────────────────────────────────────────

#[test]
fn data_returns_the_success_envelope() {
    let handler = build_handler(seed_source());

    let resp = get(&handler, "/data?draw=5&length=10");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("success"));
    assert_eq!(body["errors"], json!(null));
    assert_eq!(body["data"]["draw"], json!(5));
    assert_eq!(body["data"]["recordsTotal"], json!(3));
    assert_eq!(body["data"]["recordsFiltered"], json!(3));
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 3);
}

#[test]
fn data_applies_search_and_order_from_the_query_string() {
    let handler = build_handler(seed_source());

    let resp = get(
        &handler,
        "/data?search%5Bvalue%5D=corp&order%5B0%5D%5Bcolumn%5D=name&order%5B0%5D%5Bdir%5D=desc",
    );
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body["data"]["recordsFiltered"], json!(1));
    assert_eq!(body["data"]["data"][0]["name"], json!("Acme Corp"));
}

#[test]
fn data_includes_the_index_column() {
    let handler = build_handler(seed_source());

    let resp = get(&handler, "/data?start=10&length=-1");
    let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body["data"]["data"][0][DEFAULT_INDEX_COLUMN], json!(11));
}

#[test]
fn validation_failure_maps_to_bad_request_envelope() {
    let source = seed_source();
    let config = GridConfig {
        searchable: vec!["name; DROP TABLE users--".into()],
        orderable: Default::default(),
    };
    let handler = GridHttp::new(GridService::new(config), source);

    let resp = get(&handler, "/data");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["data"], json!(null));
    assert!(
        body["errors"]
            .as_str()
            .unwrap()
            .contains("invalid characters")
    );
}

// ── GET /config ─────────────────────────────────────────────────

#[test]
fn config_round_trips_as_json() {
    let handler = build_handler(seed_source());

    let resp = get(&handler, "/config");
    assert_eq!(resp.status(), StatusCode::OK);

    let config: GridConfig = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(config, test_config());
}

// ── Routing ─────────────────────────────────────────────────────

#[test]
fn unknown_route_is_not_found() {
    let handler = build_handler(seed_source());
    let resp = get(&handler, "/nope");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[test]
fn post_to_data_is_not_found() {
    let handler = build_handler(seed_source());
    let req = Request::builder()
        .method(Method::POST)
        .uri("/data")
        .body(Vec::new())
        .unwrap();
    assert_eq!(handler.handle(req).status(), StatusCode::NOT_FOUND);
}
