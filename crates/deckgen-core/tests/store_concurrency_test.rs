//! Concurrency tests for entity stores and workflows.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use deckgen_core::{
    AdaptedResume, Candidate, DeckgenResult, EntityStore, ExtractionProvider, JobAd,
    OrchestrationService, ProviderRegistry, RequestContext,
};
use deckgen_extractors::{ParsedDocument, TextDocument};
use futures::future::join_all;

const TASKS: u64 = 100;
const CREATES_PER_TASK: u64 = 10;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_creates_get_unique_ids() {
    let store = Arc::new(EntityStore::<Candidate>::new());

    let handles = (0..TASKS).map(|task| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            (0..CREATES_PER_TASK)
                .map(|i| store.create(Candidate::new(format!("{}-{}", task, i))).id)
                .collect::<Vec<_>>()
        })
    });

    let mut seen = BTreeSet::new();
    for result in join_all(handles).await {
        let ids = result.unwrap();
        // Ids handed to a single task must increase.
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        seen.extend(ids);
    }

    let total = TASKS * CREATES_PER_TASK;
    assert_eq!(seen, (1..=total).collect::<BTreeSet<_>>());
    let listed: Vec<_> = store.list().iter().map(|c| c.id).collect();
    assert_eq!(listed, (1..=total).collect::<Vec<_>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_and_writers_interleave() {
    let store = Arc::new(EntityStore::<JobAd>::new());
    for i in 0..50 {
        store.create(JobAd::new(format!("job {}", i)));
    }

    let writers = (0..10).map(|_| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for _ in 0..20 {
                store.create(JobAd::new("new"));
            }
        })
    });
    let readers = (0..10).map(|_| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for _ in 0..20 {
                let snapshot = store.list();
                assert!(snapshot.windows(2).all(|w| w[0].id < w[1].id));
                assert!(snapshot.len() >= 50);
            }
        })
    });

    for result in join_all(writers.chain(readers)).await {
        result.unwrap();
    }
    assert_eq!(store.len(), 250);
}

/// Echoes inputs back; used to drive workflows in parallel.
struct EchoProvider;

#[async_trait]
impl ExtractionProvider for EchoProvider {
    async fn extract_candidate(&self, document: &ParsedDocument) -> DeckgenResult<Candidate> {
        tokio::task::yield_now().await;
        Ok(Candidate::new(document.text.clone()))
    }

    async fn extract_job_ad(&self, document: &ParsedDocument) -> DeckgenResult<JobAd> {
        Ok(JobAd::new(document.text.clone()))
    }

    async fn adapt(&self, job_ad: &JobAd, candidates: &[Candidate]) -> DeckgenResult<AdaptedResume> {
        tokio::task::yield_now().await;
        Ok(AdaptedResume::new(job_ad.clone(), candidates[0].clone()))
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_parallel_workflows() {
    let registry = ProviderRegistry::builder()
        .provider("echo", Arc::new(EchoProvider))
        .build();
    let service = Arc::new(OrchestrationService::new(Arc::new(registry)));
    let ctx = RequestContext::new();

    service
        .extract_and_store_job_ad(&ctx, &TextDocument::new("ad.txt", "Backend Engineer"), "echo")
        .await
        .unwrap();

    let handles = (0..TASKS).map(|i| {
        let service = Arc::clone(&service);
        let ctx = ctx.clone();
        tokio::spawn(async move {
            let doc = TextDocument::new("cv.txt", format!("candidate {}", i));
            let candidate = service
                .extract_and_store_candidate(&ctx, &doc, "echo")
                .await
                .unwrap();
            let adapted = service
                .adapt_candidates(&ctx, 1, &[candidate.id], "echo")
                .await
                .unwrap();
            assert_eq!(adapted.resume.full_name, format!("candidate {}", i));
            adapted.id
        })
    });

    let ids: BTreeSet<_> = join_all(handles)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(ids, (1..=TASKS).collect::<BTreeSet<_>>());
    assert_eq!(service.counts(), (1, TASKS as usize, TASKS as usize));
}
