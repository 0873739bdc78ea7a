// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the complete Memoria pipeline.
//!
//! Each test wires a real `MemoryService` against temp SQLite and a wiremock
//! server standing in for the OpenAI API, then drives the public surface:
//! ingest, search, purge. Tests are independent and order-insensitive.

use memoria::MemoryService;
use memoria_config::MemoriaConfig;
use memoria_core::OwnerKey;
use memoria_memory::{SourceArtifact, SourceType};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DIMENSIONS: usize = 3;

/// Service wired against a temp database and a mock OpenAI server.
async fn service_with_mocks(dir: &TempDir, server: &MockServer) -> MemoryService {
    let mut config = MemoriaConfig::default();
    config.storage.database_path = dir.path().join("e2e.db").to_string_lossy().into_owned();
    config.openai.api_key = "test-key".to_string();
    config.openai.base_url = server.uri();
    config.openai.embedding_dimensions = DIMENSIONS;
    MemoryService::connect(&config).await.unwrap()
}

/// Every embedding request gets the same vector, so any query matches any
/// stored memory with similarity 1.0.
async fn mount_embeddings(server: &MockServer) {
    let body = serde_json::json!({
        "data": [{"index": 0, "embedding": [0.1, 0.2, 0.3]}],
        "model": "text-embedding-3-small"
    });
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_generation(server: &MockServer, narrative: &str) {
    let body = serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": narrative}}]
    });
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn birthday_letter() -> SourceArtifact {
    SourceArtifact::Letter {
        text: "아빠, 생일 축하해요. 보고 싶어요.".to_string(),
        reply: "편지 고맙다. 네 생일에 끓여 주던 미역국이 생각나는구나.".to_string(),
        date: "2024-05-01".to_string(),
    }
}

// ---- Ingest-then-search round trip ----

#[tokio::test]
async fn ingested_letter_is_recalled_with_relative_date() {
    let server = MockServer::start().await;
    mount_embeddings(&server).await;
    mount_generation(
        &server,
        "생일 편지: 엄마가 아빠의 편지를 받고 눈물을 흘렸다.\n태그: 편지, 생일",
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let service = service_with_mocks(&dir, &server).await;
    let owner = OwnerKey::from("U1");

    let record = service.ingest(&owner, &birthday_letter()).await.unwrap();
    assert_eq!(record.tags, vec!["편지", "생일"]);
    assert_eq!(record.occurred_date, "2024-05-01");
    assert!(record.item_id.starts_with("letter_2024-05-01_"));
    // The stored narrative carries no tag prefix.
    assert!(!record.content.starts_with('['));

    let results = service.search(&owner, "생일 편지 기억나?", Some(5)).await;
    assert_eq!(results.len(), 1);
    let hit = &results[0];
    assert_eq!(hit.record.id, record.id);
    // Exact matches on both tags: 1.0 + 0.10 + 0.10.
    assert!((hit.similarity - 1.0).abs() < 1e-4, "got {}", hit.similarity);
    assert!((hit.boosted - 1.20).abs() < 1e-4, "got {}", hit.boosted);
    // 2024-05-01 is in a past year relative to any current date.
    assert_eq!(hit.occurred_date_display, "on May 1, 2024");

    service.close().await.unwrap();
}

// ---- Tenant isolation ----

#[tokio::test]
async fn other_owners_never_see_the_memory() {
    let server = MockServer::start().await;
    mount_embeddings(&server).await;
    mount_generation(&server, "생일 편지의 기억.\n태그: 편지, 생일").await;

    let dir = tempfile::tempdir().unwrap();
    let service = service_with_mocks(&dir, &server).await;

    service
        .ingest(&OwnerKey::from("U1"), &birthday_letter())
        .await
        .unwrap();

    let results = service
        .search(&OwnerKey::from("U2"), "생일 편지 기억나?", Some(5))
        .await;
    assert!(results.is_empty(), "U2 must not see U1's memories");

    service.close().await.unwrap();
}

// ---- Gate and cache behavior over the real pipeline ----

#[tokio::test]
async fn filler_turn_never_touches_the_api() {
    let server = MockServer::start().await;
    // No mocks mounted: any request would 404 and the search would degrade,
    // but a gated turn must not send one at all.

    let dir = tempfile::tempdir().unwrap();
    let service = service_with_mocks(&dir, &server).await;

    let results = service.search(&OwnerKey::from("U1"), "고마워", None).await;
    assert!(results.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());

    service.close().await.unwrap();
}

#[tokio::test]
async fn repeated_question_is_served_from_cache() {
    let server = MockServer::start().await;
    mount_embeddings(&server).await;
    mount_generation(&server, "바닷가의 기억.\n태그: 바다").await;

    let dir = tempfile::tempdir().unwrap();
    let service = service_with_mocks(&dir, &server).await;
    let owner = OwnerKey::from("U1");

    service
        .ingest(
            &owner,
            &SourceArtifact::Photo {
                title: "바닷가".to_string(),
                date: "2024-08-15".to_string(),
                description: "여름 휴가".to_string(),
            },
        )
        .await
        .unwrap();

    let first = service.search(&owner, "그 바다 사진 기억나?", Some(5)).await;
    let embeds_after_first = embedding_requests(&server).await;

    let second = service.search(&owner, "그 바다 사진 기억나?", Some(5)).await;
    let embeds_after_second = embedding_requests(&server).await;

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), first.len());
    assert_eq!(second[0].record.id, first[0].record.id);
    assert_eq!(
        embeds_after_second, embeds_after_first,
        "cached search must not embed again"
    );

    service.close().await.unwrap();
}

async fn embedding_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/embeddings")
        .count()
}

// ---- Purge scoping ----

#[tokio::test]
async fn purge_removes_only_the_owners_item() {
    let server = MockServer::start().await;
    mount_embeddings(&server).await;
    mount_generation(&server, "유품의 기억.\n태그: 목도리").await;

    let dir = tempfile::tempdir().unwrap();
    let service = service_with_mocks(&dir, &server).await;
    let owner = OwnerKey::from("U1");

    let keepsake = SourceArtifact::Keepsake {
        name: "목도리".to_string(),
        description: String::new(),
        story: String::new(),
        acquired: "2024-12-25".to_string(),
    };
    let mine = service.ingest(&owner, &keepsake).await.unwrap();
    let theirs = service
        .ingest(&OwnerKey::from("U2"), &keepsake)
        .await
        .unwrap();

    // Wrong owner with the right item id removes nothing.
    let removed = service
        .purge(&OwnerKey::from("U2"), SourceType::Keepsake, &mine.item_id)
        .await
        .unwrap();
    assert_eq!(removed, 0);

    let removed = service
        .purge(&owner, SourceType::Keepsake, &mine.item_id)
        .await
        .unwrap();
    assert_eq!(removed, 1);

    assert!(service.search(&owner, "목도리 기억나?", Some(5)).await.is_empty());
    let others = service
        .search(&OwnerKey::from("U2"), "목도리 기억나?", Some(5))
        .await;
    assert_eq!(others.len(), 1);
    assert_eq!(others[0].record.id, theirs.id);

    service.close().await.unwrap();
}

// ---- Stored-artifact ingestion ----

#[tokio::test]
async fn stored_artifact_is_ingested_by_id() {
    let server = MockServer::start().await;
    mount_embeddings(&server).await;
    mount_generation(&server, "그 목도리를 뜨던 겨울이 생각나.\n태그: 목도리, 겨울").await;

    let dir = tempfile::tempdir().unwrap();
    let service = service_with_mocks(&dir, &server).await;
    let owner = OwnerKey::from("U1");

    let stored = memoria_storage::Artifact {
        id: "art-1".to_string(),
        owner_key: "U1".to_string(),
        kind: "keepsake".to_string(),
        title: "빨간 목도리".to_string(),
        description: Some("겨울마다 두르던 목도리".to_string()),
        story: Some("마지막 겨울에 떠 주셨다".to_string()),
        occurred_date: Some("2024-12-25".to_string()),
        created_at: "2026-01-01T00:00:00.000Z".to_string(),
    };
    memoria_storage::queries::artifacts::insert_artifact(service.database(), &stored)
        .await
        .unwrap();

    let record = service.ingest_stored(&owner, "art-1").await.unwrap();
    assert_eq!(record.tags, vec!["목도리", "겨울"]);
    assert!(record.item_id.starts_with("keepsake_2024-12-25_"));

    // The artifact belongs to U1; another owner cannot ingest it.
    let err = service
        .ingest_stored(&OwnerKey::from("U2"), "art-1")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not found"), "got: {err}");

    service.close().await.unwrap();
}

// ---- Generation failure fails ingestion loudly ----

#[tokio::test]
async fn ingest_surfaces_generation_failure() {
    let server = MockServer::start().await;
    mount_embeddings(&server).await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {"type": "invalid_request_error", "message": "bad prompt"}
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let service = service_with_mocks(&dir, &server).await;

    let err = service
        .ingest(&OwnerKey::from("U1"), &birthday_letter())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("invalid_request_error"), "got: {err}");

    service.close().await.unwrap();
}
