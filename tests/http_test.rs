use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use graph_lens::http::{HttpConfig, HttpServer};
use graph_lens::store::{
    Record, ScriptedStore, StoreError, StoreNode, StoreRelationship, StoreValue,
};
use graph_lens::QueryDispatcher;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn router(store: &ScriptedStore) -> Router {
    router_with(store, HttpConfig::default())
}

fn router_with(store: &ScriptedStore, config: HttpConfig) -> Router {
    let dispatcher = Arc::new(QueryDispatcher::new(Arc::new(store.clone())));
    HttpServer::new(config, dispatcher).router()
}

async fn send(router: Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = send(router, Method::GET, uri).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn triple(n: StoreNode, rel_type: &str, m: StoreNode) -> Record {
    let r = StoreRelationship::new(0, n.identity, m.identity, rel_type);
    Record::new()
        .with("n", StoreValue::Node(n))
        .with("r", StoreValue::Relationship(r))
        .with("m", StoreValue::Node(m))
}

fn social_store() -> ScriptedStore {
    let alice = StoreNode::new(1, &["Person"]).with_property("name", "Alice");
    let bob = StoreNode::new(2, &["Person"]).with_property("name", "Bob");
    let carol = StoreNode::new(3, &["Person"]).with_property("name", "Carol");

    ScriptedStore::new()
        .respond(
            "db.labels()",
            vec![Record::new().with("label", StoreValue::Scalar(json!("Person")))],
        )
        .respond(
            "MATCH (n)-[r]->(m)",
            vec![
                triple(alice.clone(), "KNOWS", bob.clone()),
                triple(alice.clone(), "KNOWS", carol),
            ],
        )
        .respond(
            "MATCH (n:`Person`)",
            vec![Record::new().with("n", StoreValue::Node(alice.clone()))],
        )
        .respond("$query", vec![triple(alice, "KNOWS", bob)])
}

#[tokio::test]
async fn test_labels() {
    let (status, body) = get_json(router(&social_store()), "/graph?op=labels").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Person"]));
}

#[tokio::test]
async fn test_labels_empty_store() {
    let (status, body) = get_json(router(&ScriptedStore::new()), "/graph?op=labels").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_full_graph_body() {
    let (status, body) = get_json(router(&social_store()), "/graph?op=full").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "nodes": [
                { "id": "1", "labels": ["Person"], "properties": { "name": "Alice" } },
                { "id": "2", "labels": ["Person"], "properties": { "name": "Bob" } },
                { "id": "3", "labels": ["Person"], "properties": { "name": "Carol" } }
            ],
            "edges": [
                { "from": "1", "to": "2", "label": "KNOWS" },
                { "from": "1", "to": "3", "label": "KNOWS" }
            ]
        })
    );
}

#[tokio::test]
async fn test_by_label_body_is_node_list() {
    let (status, body) = get_json(router(&social_store()), "/graph?op=byLabel&label=Person").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "id": "1", "labels": ["Person"], "properties": { "name": "Alice" } }])
    );
}

#[tokio::test]
async fn test_label_injection_is_rejected() {
    let store = social_store();
    let (status, body) = get_json(
        router(&store),
        "/graph?op=byLabel&label=Foo%60)%20DETACH%20DELETE%20(n",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "InvalidParameter");
    assert_eq!(store.sessions_opened(), 0);
}

#[tokio::test]
async fn test_search_without_query() {
    let store = social_store();

    for uri in ["/graph?op=search", "/graph?op=search&query="] {
        let (status, body) = get_json(router(&store), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "MissingParameter");
    }
    assert!(store.executed().is_empty());
}

#[tokio::test]
async fn test_expand_unknown_node() {
    let (status, body) = get_json(router(&social_store()), "/graph?op=expand&nodeId=424242").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "nodes": [], "edges": [] }));
}

#[tokio::test]
async fn test_unknown_and_missing_op() {
    let store = social_store();

    let (status, body) = get_json(router(&store), "/graph?op=truncate").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "UnknownOperation");

    let (status, body) = get_json(router(&store), "/graph").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "MissingParameter");

    assert_eq!(store.sessions_opened(), 0);
}

#[tokio::test]
async fn test_non_get_methods_are_rejected() {
    let store = social_store();

    for method in [Method::POST, Method::PUT, Method::DELETE] {
        let request = Request::builder()
            .method(method)
            .uri("/graph?op=labels")
            .body(Body::empty())
            .unwrap();
        let response = router(&store).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET, HEAD");
    }
    assert_eq!(store.sessions_opened(), 0);
}

#[tokio::test]
async fn test_undecodable_query_string_gets_json_error() {
    let store = social_store();

    let (status, body) = get_json(router(&store), "/graph?op=expand&nodeId=1&nodeId=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "InvalidParameter");
    assert!(body["error"].as_str().unwrap().contains("query string"));

    let (status, body) = get_json(router(&store), "/api/graph/expand?nodeId=1&nodeId=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "InvalidParameter");

    let (status, bytes) = send(router(&store), Method::POST, "/graph?op=full&op=labels").await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["kind"], "MethodNotAllowed");

    assert_eq!(store.sessions_opened(), 0);
}

#[tokio::test]
async fn test_store_failure_body() {
    let store = ScriptedStore::new().fail(
        "MATCH (n)-[r]->(m)",
        StoreError::QueryFailure("Neo.DatabaseError.General.UnknownError".to_string()),
    );

    let (status, body) = get_json(router(&store), "/graph?op=full").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal server error");
    assert_eq!(body["kind"], "QueryFailure");
    assert_eq!(body["detail"], "Neo.DatabaseError.General.UnknownError");
    assert!(!body.to_string().contains("MATCH"));
    assert_eq!(store.open_sessions(), 0);
}

#[tokio::test]
async fn test_store_failure_detail_can_be_hidden() {
    let store = ScriptedStore::new().refuse_sessions();
    let config = HttpConfig {
        expose_error_detail: false,
        ..HttpConfig::default()
    };

    let (status, body) = get_json(router_with(&store, config), "/graph?op=labels").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "internal server error", "kind": "ConnectionFailure" }));
}

#[tokio::test]
async fn test_action_alias_and_legacy_names() {
    let store = social_store();

    let (status, body) = get_json(router(&store), "/api/graph?action=initial").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["edges"].as_array().unwrap().len(), 2);

    let (status, body) =
        get_json(router(&store), "/api/graph?action=nodesByLabel&label=Person").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_path_segment_routes() {
    let store = social_store();

    let (status, body) = get_json(router(&store), "/api/graph/labels").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Person"]));

    let (status, body) = get_json(router(&store), "/api/graph/nodesByLabel/Person").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], "1");

    let (status, _) = get_json(router(&store), "/api/graph/search?query=ali").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_json(router(&store), "/api/graph/expand/7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "nodes": [], "edges": [] }));

    let last = store.executed().pop().unwrap();
    assert!(last.cypher.contains("toInteger($nodeId)"));
}

#[tokio::test]
async fn test_repeated_requests_are_byte_identical() {
    let store = social_store();

    let (_, first) = send(router(&store), Method::GET, "/graph?op=full").await;
    let (_, second) = send(router(&store), Method::GET, "/graph?op=full").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_status_does_not_touch_store() {
    let store = ScriptedStore::new().refuse_sessions();

    let (status, body) = get_json(router(&store), "/api/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], graph_lens::VERSION);
}
