use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use serde_json::{Value, json};
use tower::ServiceExt;

use webshot::application::ports::CaptureError;
use webshot::domain::JobId;
use webshot::infrastructure::renderer::{MockOutcome, MockRenderer};
use webshot::presentation::{AppState, SERVER_NAME, create_router};

use crate::helpers::{TEST_QUEUE_DEPTH, TestPipeline, test_pool_config};

fn app(pipeline: &TestPipeline) -> Router {
    create_router(AppState::new(pipeline.dispatcher.clone()))
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn get(app: &Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn submit(app: &Router, url: &str) -> String {
    let response = post_json(app, "/v1/add", json!({ "url": url })).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn given_root_when_requested_then_redirects_to_help() {
    let pipeline = TestPipeline::with_defaults();

    let response = get(&app(&pipeline), "/").await;

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers()[header::LOCATION], "/v1");
}

#[tokio::test]
async fn given_help_route_when_requested_then_plain_text_route_map() {
    let pipeline = TestPipeline::with_defaults();

    let response = get(&app(&pipeline), "/v1").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
    let routes = body_json(response).await;
    assert!(routes.get("/v1/add").is_some());
    assert!(routes.get("/v1/check").is_some());
    assert!(routes.get("/v1/info").is_some());
}

#[tokio::test]
async fn given_valid_url_when_posting_add_then_accepted_with_id() {
    let pipeline = TestPipeline::with_defaults();
    let app = app(&pipeline);

    let id = submit(&app, "https://example.com").await;

    assert!(uuid::Uuid::parse_str(&id).is_ok());
    assert_eq!(pipeline.repository.len(), 1);
}

#[tokio::test]
async fn given_url_in_query_when_getting_add_then_accepted() {
    let pipeline = TestPipeline::with_defaults();

    let response = get(&app(&pipeline), "/v1/add?url=https%3A%2F%2Fexample.com").await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert!(body_json(response).await["id"].is_string());
}

#[tokio::test]
async fn given_invalid_url_when_adding_then_bad_request_and_no_record() {
    let pipeline = TestPipeline::with_defaults();

    let response = post_json(&app(&pipeline), "/v1/add", json!({ "url": "not a url" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "error": "invalid url" }));
    assert!(pipeline.repository.is_empty());
}

#[tokio::test]
async fn given_malformed_body_when_adding_then_bad_request() {
    let pipeline = TestPipeline::with_defaults();
    let request = Request::post("/v1/add")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"link\":"))
        .unwrap();

    let response = send(&app(&pipeline), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "invalid request body" })
    );
}

#[tokio::test]
async fn given_full_queue_when_adding_then_too_many_requests() {
    let pipeline = TestPipeline::new(MockRenderer::new(Duration::ZERO), test_pool_config(1), 1);
    let app = app(&pipeline);
    submit(&app, "https://a.example").await;

    let response = post_json(&app, "/v1/add", json!({ "url": "https://b.example" })).await;

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body_json(response).await, json!({ "error": "queue full" }));
    assert_eq!(pipeline.repository.len(), 1);
}

#[tokio::test]
async fn given_queued_job_when_checking_then_state_is_queued() {
    let pipeline = TestPipeline::with_defaults();
    let app = app(&pipeline);
    let id = submit(&app, "https://example.com").await;

    let response = get(&app, &format!("/v1/check?id={id}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "id": id, "state": "queued" }));
}

#[tokio::test]
async fn given_unknown_or_garbage_id_when_checking_then_not_found() {
    let pipeline = TestPipeline::with_defaults();
    let app = app(&pipeline);

    let unknown = get(&app, &format!("/v1/check?id={}", JobId::new())).await;
    let garbage = get(&app, "/v1/check?id=definitely-not-a-job").await;

    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(unknown).await, json!({ "error": "not found" }));
    assert_eq!(garbage.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_missing_id_when_checking_then_bad_request() {
    let pipeline = TestPipeline::with_defaults();

    let response = get(&app(&pipeline), "/v1/check").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "error": "missing id" }));
}

#[tokio::test]
async fn given_pending_job_when_requesting_info_then_accepted_without_result() {
    let pipeline = TestPipeline::with_defaults();
    let app = app(&pipeline);
    let id = submit(&app, "https://example.com").await;

    let response = get(&app, &format!("/v1/info?id={id}")).await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let info = body_json(response).await;
    assert_eq!(info["state"], "queued");
    assert_eq!(info["url"], "https://example.com/");
    assert!(info.get("result").is_none());
    assert!(info.get("error").is_none());
}

#[tokio::test(start_paused = true)]
async fn given_done_job_when_requesting_info_and_image_then_result_and_bytes() {
    let pipeline = TestPipeline::with_defaults();
    let pool = pipeline.start();
    let app = app(&pipeline);
    let id = submit(&app, "https://example.com").await;
    pipeline
        .wait_for_terminal(JobId::from_uuid(uuid::Uuid::parse_str(&id).unwrap()))
        .await;

    let response = get(&app, &format!("/v1/info?id={id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let info = body_json(response).await;
    assert_eq!(info["state"], "done");
    assert_eq!(info["attempt"], 1);
    assert_eq!(info["result"]["format"], "png");
    assert_eq!(info["result"]["image_url"], format!("/v1/image?id={id}"));
    let size = info["result"]["size"].as_u64().unwrap();
    assert!(size > 0);
    assert!(info.get("error").is_none());

    let image = get(&app, &format!("/v1/image?id={id}")).await;
    assert_eq!(image.status(), StatusCode::OK);
    assert_eq!(image.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(body_bytes(image).await.len() as u64, size);

    pool.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn given_failed_job_when_requesting_info_then_error_kind_reported() {
    let renderer = MockRenderer::new(Duration::ZERO)
        .with_default(MockOutcome::Fail(CaptureError::Render("blank page".into())));
    let pipeline = TestPipeline::new(renderer, test_pool_config(1), TEST_QUEUE_DEPTH);
    let pool = pipeline.start();
    let app = app(&pipeline);
    let id = submit(&app, "https://broken.example").await;
    pipeline
        .wait_for_terminal(JobId::from_uuid(uuid::Uuid::parse_str(&id).unwrap()))
        .await;

    let response = get(&app, &format!("/v1/info?id={id}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let info = body_json(response).await;
    assert_eq!(info["state"], "failed");
    assert_eq!(info["error"]["kind"], "render_error");
    assert!(info.get("result").is_none());

    pool.shutdown().await;
}

#[tokio::test]
async fn given_pending_job_when_requesting_image_then_conflict() {
    let pipeline = TestPipeline::with_defaults();
    let app = app(&pipeline);
    let id = submit(&app, "https://example.com").await;

    let response = get(&app, &format!("/v1/image?id={id}")).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await, json!({ "error": "not ready" }));
}

#[tokio::test]
async fn given_health_route_when_requested_then_reports_queue_depth() {
    let pipeline = TestPipeline::with_defaults();
    let app = app(&pipeline);
    submit(&app, "https://example.com").await;

    let response = get(&app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "status": "healthy", "queue_depth": 1 })
    );
}

#[tokio::test]
async fn given_unknown_route_when_requested_then_json_not_found() {
    let pipeline = TestPipeline::with_defaults();

    let response = get(&app(&pipeline), "/v2/nothing").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "Not Found" }));
}

#[tokio::test]
async fn given_wrong_method_when_requested_then_json_method_not_allowed() {
    let pipeline = TestPipeline::with_defaults();
    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/v1/check")
        .body(Body::empty())
        .unwrap();

    let response = send(&app(&pipeline), request).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Method Not Allowed" })
    );
}

#[tokio::test]
async fn given_any_response_when_returned_then_server_header_set() {
    let pipeline = TestPipeline::with_defaults();
    let app = app(&pipeline);

    let ok = get(&app, "/v1").await;
    let missing = get(&app, "/nope").await;

    assert_eq!(ok.headers()[header::SERVER], SERVER_NAME);
    assert_eq!(missing.headers()[header::SERVER], SERVER_NAME);
}

#[tokio::test]
async fn given_caller_request_id_when_requesting_then_echoed() {
    let pipeline = TestPipeline::with_defaults();
    let request = Request::get("/health")
        .header("x-request-id", "trace-me-123")
        .body(Body::empty())
        .unwrap();

    let response = send(&app(&pipeline), request).await;

    assert_eq!(response.headers()["x-request-id"], "trace-me-123");
}
