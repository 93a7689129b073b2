//! End-to-end API tests against in-memory backends.

use chrono::{Duration, Utc};
use reqwest::StatusCode;
use serde_json::{json, Value};
use stratus_core::cost::cost_record_id;
use stratus_core::ports::{CostStore, ResourceStore};
use stratus_tests::memory::MockCloud;
use stratus_tests::{init_test_logging, start_test_server, ApiTestClient, TestBackend};

async fn spawn(backend: &TestBackend) -> ApiTestClient {
    init_test_logging();
    let (addr, _handle) = start_test_server(backend.state())
        .await
        .expect("Failed to start server");
    ApiTestClient::new(addr)
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let backend = TestBackend::new();
    let client = spawn(&backend).await;

    let resp = client.get("/health").await.expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn ec2_listing_is_never_cached() {
    let backend = TestBackend::new();
    let client = spawn(&backend).await;

    for _ in 0..2 {
        let resp = client
            .get("/api/resources/ec2")
            .await
            .expect("Request failed");
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await.expect("Failed to parse JSON");
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"][0]["id"], "i-0abc123def456");
        assert_eq!(body["data"][0]["type"], "t3.medium");
    }
}

#[tokio::test]
async fn cost_summary_fetches_once_then_serves_from_database() {
    let backend = TestBackend::new();
    let client = spawn(&backend).await;

    let resp = client.get("/api/costs/summary").await.expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["source"], "aws");
    assert_eq!(backend.cloud.cost_fetch_count(), 1);

    // The fetched row lands under the period-derived id.
    let end = Utc::now().date_naive();
    let start = end - Duration::days(30);
    let id = cost_record_id(
        &start.format("%Y-%m-%d").to_string(),
        &end.format("%Y-%m-%d").to_string(),
    );
    let stored = backend.costs.get(&id).await.expect("store read failed");
    assert!(stored.is_some());

    let resp = client.get("/api/costs/summary").await.expect("Request failed");
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["source"], "database");
    assert_eq!(body["data"]["granularity"], "DAILY");
    assert_eq!(backend.cloud.cost_fetch_count(), 1);
}

#[tokio::test]
async fn tag_inventory_uses_cache_and_fresh_labels() {
    let backend = TestBackend::new();
    let client = spawn(&backend).await;

    let resp = client.get("/api/tags/resources").await.expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "success");
    assert_eq!(body["source"], "fresh");
    assert_eq!(body["data"]["ec2"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["s3"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["rds"].as_array().unwrap().len(), 1);
    assert_eq!(backend.cloud.tag_fetch_count(), 1);

    let resp = client.get("/api/tags/resources").await.expect("Request failed");
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["source"], "cache");
    assert_eq!(backend.cloud.tag_fetch_count(), 1);
}

#[tokio::test]
async fn advisor_details_are_filtered_and_cached() {
    let backend = TestBackend::new();
    let client = spawn(&backend).await;

    let resp = client.get("/api/advisor/details").await.expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["source"], "aws");
    // The "ok" entry never reaches the response.
    assert_eq!(body["data"]["cost_optimizing"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["security"].as_array().unwrap().len(), 1);

    let resp = client.get("/api/advisor/details").await.expect("Request failed");
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["source"], "database");
    assert_eq!(backend.cloud.advisor_fetch_count(), 1);
}

#[tokio::test]
async fn advisor_recommendations_only_cover_cost_optimizing() {
    let backend = TestBackend::new();
    let client = spawn(&backend).await;

    let resp = client
        .get("/api/advisor/recommendations")
        .await
        .expect("Request failed");
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert!(body["data"]["cost_optimizing"].is_array());
    assert!(body["data"].get("security").is_none());
}

#[tokio::test]
async fn agent_chat_answers_from_cached_context() {
    let backend = TestBackend::new();
    backend
        .resources
        .insert_many(&stratus_tests::fixtures::sample_inventory())
        .await
        .expect("seed failed");
    let client = spawn(&backend).await;

    let resp = client
        .post("/api/agent/chat", &json!({"query": "What drives my bill?"}))
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["response"], "Your largest cost driver is EC2.");

    let context = backend.bridge.last_context.lock().unwrap().clone().unwrap();
    assert!(context.contains("ec2: 1"));
    assert!(context.contains("3 resources"));
}

#[tokio::test]
async fn agent_chat_rejects_empty_query() {
    let backend = TestBackend::new();
    let client = spawn(&backend).await;

    let resp = client
        .post("/api/agent/chat", &json!({"query": "   "}))
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert!(body["detail"].as_str().unwrap().contains("query"));
}

#[tokio::test]
async fn diagram_save_overwrites_by_name() {
    let backend = TestBackend::new();
    let client = spawn(&backend).await;

    let first: Value = client
        .post(
            "/api/diagrams/save",
            &json!({"name": "prod", "user_id": "alice", "diagram_data": {"nodes": [], "edges": []}}),
        )
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Failed to parse JSON");

    let second: Value = client
        .post(
            "/api/diagrams/save",
            &json!({"name": "prod", "user_id": "alice", "diagram_data": stratus_tests::fixtures::sample_diagram()}),
        )
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Failed to parse JSON");

    // Same logical diagram: the second save updates the first row.
    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["diagram_data"]["nodes"].as_array().unwrap().len(), 3);

    let list: Value = client
        .get("/api/diagrams/list/alice")
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(list["count"], 1);
}

#[tokio::test]
async fn diagram_lookup_and_delete() {
    let backend = TestBackend::new();
    let client = spawn(&backend).await;

    let saved: Value = client
        .post(
            "/api/diagrams/save",
            &json!({"name": "staging", "diagram_data": {"nodes": [], "edges": []}}),
        )
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Failed to parse JSON");
    let id = saved["id"].as_i64().unwrap();
    assert_eq!(saved["user_id"], "anonymous");

    let resp = client
        .get(&format!("/api/diagrams/{id}"))
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client.get("/api/diagrams/999999").await.expect("Request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .delete(&format!("/api/diagrams/{id}"))
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["message"], "Diagram deleted successfully");

    let resp = client
        .delete(&format!("/api/diagrams/{id}"))
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn diagram_generation_persists_a_timestamped_diagram() {
    let backend = TestBackend::new();
    let client = spawn(&backend).await;

    let resp = client
        .post("/api/diagrams/generate", &json!({}))
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert!(body["name"].as_str().unwrap().starts_with("generated-"));
    assert_eq!(body["user_id"], "anonymous");
    assert_eq!(body["diagram_data"]["edges"].as_array().unwrap().len(), 2);

    let list: Value = client
        .get("/api/diagrams/list/anonymous")
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(list["count"], 1);
}

#[tokio::test]
async fn image_analysis_accepts_data_urls() {
    let backend = TestBackend::new();
    let client = spawn(&backend).await;

    // 1x1 transparent PNG.
    let png = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";
    let resp = client
        .post(
            "/api/images/analyze",
            &json!({"image_data": format!("data:image/png;base64,{png}")}),
        )
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert!(body["response"].as_str().unwrap().contains("two-tier"));
}

#[tokio::test]
async fn image_analysis_rejects_garbage_base64() {
    let backend = TestBackend::new();
    let client = spawn(&backend).await;

    let resp = client
        .post(
            "/api/images/analyze",
            &json!({"image_data": "%%% not base64 %%%"}),
        )
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn credential_validation_round_trip() {
    let backend = TestBackend::new();
    let client = spawn(&backend).await;

    let resp = client
        .post(
            "/api/auth/validate",
            &json!({"accessKeyId": "AKIAEXAMPLE", "secretAccessKey": "secret"}),
        )
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "success");
    assert_eq!(body["user"]["account"], "123456789012");
}

#[tokio::test]
async fn bad_credentials_yield_401() {
    let mut cloud = MockCloud::new();
    cloud.identity = None;
    let backend = TestBackend::with_cloud(cloud);
    let client = spawn(&backend).await;

    let resp = client
        .post(
            "/api/auth/validate",
            &json!({"accessKeyId": "AKIAEXAMPLE", "secretAccessKey": "wrong"}),
        )
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert!(body["detail"].as_str().unwrap().contains("validation failed"));
}

#[tokio::test]
async fn analysis_requires_errors() {
    let backend = TestBackend::new();
    let client = spawn(&backend).await;

    let resp = client
        .post("/api/analysis/analyze-with-chatgpt", &json!({"errors": []}))
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analysis_counts_and_analyzes_findings() {
    let backend = TestBackend::new();
    let client = spawn(&backend).await;

    let errors = json!({"errors": [
        {
            "checkName": "Low Utilization Amazon EC2 Instances",
            "category": "cost_optimizing",
            "resources": ["i-0abc123def456", "i-0fed654cba321"],
            "details": "Average CPU below 10% for 14 days."
        },
        {
            "checkName": "Security Groups - Unrestricted Access",
            "category": "security",
            "resources": ["sg-12345"],
            "details": "Port 22 open to 0.0.0.0/0."
        }
    ]});
    let resp = client
        .post("/api/analysis/analyze-with-chatgpt", &errors)
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error_count"], 2);
    assert!(body["analysis"].as_str().unwrap().contains("Rightsize"));
}

#[tokio::test]
async fn presentation_structure_returns_an_outline() {
    let backend = TestBackend::new();
    let client = spawn(&backend).await;

    let resp = client
        .post(
            "/api/presentation/structure-ppt",
            &json!({"analysis": "EC2 dominates spend; several instances idle."}),
        )
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["title"], "AWS Cost Optimization Review");
    assert_eq!(body["key_findings"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn ppt_generation_streams_a_pptx_attachment() {
    let backend = TestBackend::new();
    let client = spawn(&backend).await;

    let resp = client
        .post("/api/ppt/generate", &stratus_tests::fixtures::sample_outline())
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()["content-type"],
        "application/vnd.openxmlformats-officedocument.presentationml.presentation"
    );
    let disposition = resp.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"aws_analysis_"));

    let bytes = resp.bytes().await.expect("Failed to read body");
    assert_eq!(&bytes[..4], b"PK\x03\x04");
}
