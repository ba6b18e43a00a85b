//! End-to-end workflow over a real HTTP client talking to a mock API.

#![cfg(feature = "anthropic")]

use std::collections::BTreeMap;
use std::sync::Arc;

use deckgen_core::{ErrorCode, OrchestrationService, ProviderConfig, RequestContext};
use deckgen_extractors::TextDocument;
use deckgen_llm::ProviderFactory;
use mockito::Matcher;
use secrecy::SecretString;

fn claude_config(base_url: String) -> BTreeMap<String, ProviderConfig> {
    BTreeMap::from([(
        "claude".to_string(),
        ProviderConfig {
            enabled: true,
            kind: Some("anthropic".to_string()),
            api_key: Some(SecretString::new("ak-test".to_string())),
            model: "claude-sonnet-4-5".to_string(),
            base_url: Some(base_url),
            ..Default::default()
        },
    )])
}

fn text_reply(text: &str) -> String {
    serde_json::json!({"content": [{"type": "text", "text": text}]}).to_string()
}

#[tokio::test]
async fn test_extract_and_adapt_through_anthropic() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/messages")
        .match_body(Matcher::Regex("raw text of a job advertisement".to_string()))
        .with_status(200)
        .with_body(text_reply(r#"{"title": "Backend Engineer", "company_name": "Acme"}"#))
        .create_async()
        .await;
    server
        .mock("POST", "/messages")
        .match_body(Matcher::Regex("raw text of a resume".to_string()))
        .with_status(200)
        .with_body(text_reply(
            "```json\n{\"full_name\": \"A. Dupont\", \"skills\": [\"Rust\"]}\n```",
        ))
        .create_async()
        .await;
    server
        .mock("POST", "/messages")
        .match_body(Matcher::Regex("Candidate Resume 1".to_string()))
        .with_status(200)
        .with_body(text_reply(
            r#"{"full_name": "A. Dupont", "short_description": "Rust backend engineer"}"#,
        ))
        .create_async()
        .await;

    let registry = ProviderFactory::registry(&claude_config(server.url())).unwrap();
    let service = OrchestrationService::new(Arc::new(registry));
    let ctx = RequestContext::new();

    let job_ad = service
        .extract_and_store_job_ad(&ctx, &TextDocument::new("ad.txt", "Acme hires a Backend Engineer"), "claude")
        .await
        .unwrap();
    assert_eq!(job_ad.id, 1);
    assert_eq!(job_ad.raw_text, "Acme hires a Backend Engineer");

    let candidate = service
        .extract_and_store_candidate(&ctx, &TextDocument::new("cv.txt", "A. Dupont, Rust"), "claude")
        .await
        .unwrap();
    assert_eq!(candidate.skills, vec!["Rust"]);

    let adapted = service
        .adapt_candidates(&ctx, job_ad.id, &[candidate.id], "claude")
        .await
        .unwrap();
    assert_eq!(adapted.job_ad, job_ad);
    assert_eq!(adapted.resume.short_description, "Rust backend engineer");
}

#[tokio::test]
async fn test_garbage_reply_persists_nothing() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/messages")
        .with_status(200)
        .with_body(text_reply("I am unable to read this document."))
        .create_async()
        .await;

    let registry = ProviderFactory::registry(&claude_config(server.url())).unwrap();
    let service = OrchestrationService::new(Arc::new(registry));

    let err = service
        .extract_and_store_candidate(&RequestContext::new(), &TextDocument::new("cv.txt", "text"), "claude")
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::UpsInvalidResponse);
    assert!(service.list_candidates().is_empty());
}
