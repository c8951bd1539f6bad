//! Background illustration scheduling tests.

mod test_utils;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use storyteller_core::{AssetState, PageNumber, SessionId, StoryConfig};
use storyteller_story::{PrefetchOutcome, PrefetchReference, PrefetchScheduler, SessionStore};
use test_utils::{Drawing, StubIllustrator, StubSpeech, producer, quick_config};

fn page(n: u32) -> PageNumber {
    PageNumber::new(n).expect("non-zero page")
}

fn pages(count: u32) -> BTreeMap<PageNumber, String> {
    (1..=count).map(|n| (page(n), format!("Page {n}."))).collect()
}

fn scheduler(
    illustrator: Arc<StubIllustrator>,
    config: &StoryConfig,
) -> (PrefetchScheduler, SessionStore) {
    let (producer, _) = producer(illustrator, StubSpeech::working(), config);
    let store = SessionStore::new();
    (
        PrefetchScheduler::new(Arc::new(producer), store.clone(), config),
        store,
    )
}

async fn session(store: &SessionStore) -> anyhow::Result<SessionId> {
    Ok(store.create("topic", pages(3), false).await?)
}

#[tokio::test]
async fn test_records_result_on_session() -> anyhow::Result<()> {
    let (scheduler, store) = scheduler(StubIllustrator::instant(), &quick_config());
    let id = session(&store).await?;

    let handle = scheduler
        .schedule(&id, page(2), "Page 2.".to_string(), PrefetchReference::None)
        .expect("scheduled");
    assert_eq!(handle.page(), page(2));

    let outcome = handle.wait().await;
    let PrefetchOutcome::Recorded(AssetState::Ready(url)) = outcome else {
        panic!("expected a recorded illustration, got {outcome:?}");
    };
    assert_eq!(store.asset(&id, page(2)).await?, AssetState::Ready(url));
    assert_eq!(scheduler.in_flight(), 0);
    Ok(())
}

#[tokio::test]
async fn test_failure_recorded_as_failed() -> anyhow::Result<()> {
    let illustrator = StubIllustrator::new(Drawing::Fail, Duration::ZERO);
    let (scheduler, store) = scheduler(illustrator, &quick_config());
    let id = session(&store).await?;

    let outcome = scheduler
        .schedule(&id, page(2), "Page 2.".to_string(), PrefetchReference::None)
        .expect("scheduled")
        .wait()
        .await;
    assert_eq!(outcome, PrefetchOutcome::Recorded(AssetState::Failed));
    assert_eq!(store.asset(&id, page(2)).await?, AssetState::Failed);
    Ok(())
}

#[tokio::test]
async fn test_beyond_story_length_is_ignored() -> anyhow::Result<()> {
    let illustrator = StubIllustrator::instant();
    let (scheduler, store) = scheduler(illustrator.clone(), &quick_config());
    let id = session(&store).await?;

    let handle = scheduler.schedule(&id, page(4), "Page 4.".to_string(), PrefetchReference::None);
    assert!(handle.is_none());
    tokio::task::yield_now().await;
    assert_eq!(illustrator.call_count(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_schedule_is_ignored() -> anyhow::Result<()> {
    let illustrator = StubIllustrator::new(Drawing::Succeed, Duration::from_secs(3));
    let (scheduler, store) = scheduler(illustrator.clone(), &quick_config());
    let id = session(&store).await?;

    let first = scheduler
        .schedule(&id, page(2), "Page 2.".to_string(), PrefetchReference::None)
        .expect("scheduled");
    let second = scheduler.schedule(&id, page(2), "Page 2.".to_string(), PrefetchReference::None);
    assert!(second.is_none());
    assert_eq!(scheduler.in_flight(), 1);

    assert!(matches!(first.wait().await, PrefetchOutcome::Recorded(_)));
    assert_eq!(illustrator.call_count(), 1);

    // Once finished, the page may be scheduled again.
    let again = scheduler.schedule(&id, page(2), "Page 2.".to_string(), PrefetchReference::None);
    assert!(again.is_some());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_removed_session_discards_result() -> anyhow::Result<()> {
    let illustrator = StubIllustrator::new(Drawing::Succeed, Duration::from_secs(3));
    let (scheduler, store) = scheduler(illustrator.clone(), &quick_config());
    let id = session(&store).await?;

    let handle = scheduler
        .schedule(&id, page(2), "Page 2.".to_string(), PrefetchReference::None)
        .expect("scheduled");
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(store.remove(&id).await);

    let outcome = handle.wait().await;
    assert!(matches!(
        outcome,
        PrefetchOutcome::Discarded(AssetState::Ready(_))
    ));
    assert!(store.is_empty().await);
    assert_eq!(illustrator.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_removed_before_start_skips_production() -> anyhow::Result<()> {
    let illustrator = StubIllustrator::instant();
    let (scheduler, store) = scheduler(illustrator.clone(), &quick_config());
    let id = session(&store).await?;

    let handle = scheduler
        .schedule(&id, page(2), "Page 2.".to_string(), PrefetchReference::None)
        .expect("scheduled");
    store.remove(&id).await;

    assert_eq!(
        handle.wait().await,
        PrefetchOutcome::Discarded(AssetState::Pending)
    );
    assert_eq!(illustrator.call_count(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_after_page_waits_for_reference() -> anyhow::Result<()> {
    let illustrator = StubIllustrator::new(Drawing::Succeed, Duration::from_secs(2));
    let (scheduler, store) = scheduler(illustrator.clone(), &quick_config());
    let id = session(&store).await?;

    let second = scheduler
        .schedule(&id, page(2), "Page 2.".to_string(), PrefetchReference::None)
        .expect("scheduled");
    let third = scheduler
        .schedule(
            &id,
            page(3),
            "Page 3.".to_string(),
            PrefetchReference::AfterPage(page(2)),
        )
        .expect("scheduled");

    assert!(matches!(second.wait().await, PrefetchOutcome::Recorded(AssetState::Ready(_))));
    assert!(matches!(third.wait().await, PrefetchOutcome::Recorded(AssetState::Ready(_))));

    let calls = illustrator.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].reference.as_deref(), Some(b"image-1".as_slice()));
    assert!(calls[1].prompt.contains("Page 3."));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_reference_survives_queueing_behind_other_sessions() -> anyhow::Result<()> {
    // Each drawing takes most of the asset timeout, and only one runs at a time.
    let illustrator = StubIllustrator::new(Drawing::Succeed, Duration::from_secs(50));
    let config = quick_config().with_max_concurrent_assets(1);
    let (scheduler, store) = scheduler(illustrator.clone(), &config);
    let busy = session(&store).await?;
    let reader = session(&store).await?;

    let other = scheduler
        .schedule(&busy, page(2), "Busy page 2.".to_string(), PrefetchReference::None)
        .expect("scheduled");
    let second = scheduler
        .schedule(&reader, page(2), "Reader page 2.".to_string(), PrefetchReference::None)
        .expect("scheduled");
    let third = scheduler
        .schedule(
            &reader,
            page(3),
            "Reader page 3.".to_string(),
            PrefetchReference::AfterPage(page(2)),
        )
        .expect("scheduled");

    assert!(matches!(other.wait().await, PrefetchOutcome::Recorded(AssetState::Ready(_))));
    assert!(matches!(second.wait().await, PrefetchOutcome::Recorded(AssetState::Ready(_))));
    assert!(matches!(third.wait().await, PrefetchOutcome::Recorded(AssetState::Ready(_))));

    let calls = illustrator.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls[1].prompt.contains("Reader page 2."));
    assert!(calls[2].prompt.contains("Reader page 3."));
    assert_eq!(calls[2].reference.as_deref(), Some(b"image-2".as_slice()));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_after_page_wait_ends_when_session_removed() -> anyhow::Result<()> {
    let illustrator = StubIllustrator::instant();
    let (scheduler, store) = scheduler(illustrator.clone(), &quick_config());
    let id = session(&store).await?;

    // Nothing ever resolves page 2, so only removal can end the wait.
    let third = scheduler
        .schedule(
            &id,
            page(3),
            "Page 3.".to_string(),
            PrefetchReference::AfterPage(page(2)),
        )
        .expect("scheduled");
    tokio::time::sleep(Duration::from_secs(600)).await;
    assert_eq!(scheduler.in_flight(), 1);

    assert!(store.remove(&id).await);
    assert_eq!(
        third.wait().await,
        PrefetchOutcome::Discarded(AssetState::Pending)
    );
    assert_eq!(illustrator.call_count(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_after_failed_page_draws_without_reference()-> anyhow::Result<()> {
    let illustrator = StubIllustrator::new(Drawing::FailFirst(1), Duration::from_secs(1));
    let (scheduler, store) = scheduler(illustrator.clone(), &quick_config());
    let id = session(&store).await?;

    let second = scheduler
        .schedule(&id, page(2), "Page 2.".to_string(), PrefetchReference::None)
        .expect("scheduled");
    let third = scheduler
        .schedule(
            &id,
            page(3),
            "Page 3.".to_string(),
            PrefetchReference::AfterPage(page(2)),
        )
        .expect("scheduled");

    assert_eq!(second.wait().await, PrefetchOutcome::Recorded(AssetState::Failed));
    assert!(matches!(third.wait().await, PrefetchOutcome::Recorded(AssetState::Ready(_))));
    assert_eq!(illustrator.calls()[1].reference, None);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_concurrency_is_bounded() -> anyhow::Result<()> {
    let illustrator = StubIllustrator::new(Drawing::Succeed, Duration::from_secs(1));
    let config = quick_config().with_max_concurrent_assets(1);
    let (scheduler, store) = scheduler(illustrator.clone(), &config);

    let mut handles = Vec::new();
    for _ in 0..3 {
        let id = session(&store).await?;
        handles.push(
            scheduler
                .schedule(&id, page(2), "Page 2.".to_string(), PrefetchReference::None)
                .expect("scheduled"),
        );
    }
    for handle in handles {
        assert!(matches!(handle.wait().await, PrefetchOutcome::Recorded(_)));
    }

    assert_eq!(illustrator.call_count(), 3);
    assert_eq!(illustrator.peak_running(), 1);
    Ok(())
}

#[test]
fn test_reference_from_state() {
    assert_eq!(
        PrefetchReference::from_state(&AssetState::Ready("memory://a.png".to_string())),
        PrefetchReference::Url("memory://a.png".to_string())
    );
    assert_eq!(
        PrefetchReference::from_state(&AssetState::Failed),
        PrefetchReference::None
    );
    assert_eq!(
        PrefetchReference::from_state(&AssetState::Pending),
        PrefetchReference::None
    );
}
