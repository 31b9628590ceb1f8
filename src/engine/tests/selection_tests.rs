//! Engine selection probe-order tests.

use crate::engine::adapters::InMemoryEngine;
use crate::engine::ports::ContainerEngine;
use crate::engine::services::first_available;
use rstest::rstest;
use std::sync::Arc;

fn candidate(available: bool) -> Arc<dyn ContainerEngine> {
    Arc::new(InMemoryEngine::with_availability(available))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn first_available_takes_candidates_in_priority_order() {
    let unavailable = candidate(false);
    let available = candidate(true);
    let also_available = candidate(true);

    let selected = first_available(vec![
        unavailable,
        Arc::clone(&available),
        also_available,
    ])
    .await
    .expect("a candidate should be available");

    assert!(Arc::ptr_eq(&selected, &available));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn first_available_returns_none_when_all_probes_fail() {
    let selected = first_available(vec![candidate(false), candidate(false)]).await;
    assert!(selected.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn first_available_handles_no_candidates() {
    assert!(first_available(Vec::new()).await.is_none());
}
