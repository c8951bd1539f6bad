//! Asset production tests.

mod test_utils;

use std::sync::Arc;
use std::time::Duration;
use storyteller_core::{ReferenceFallback, StoryConfig};
use storyteller_error::AssetErrorKind;
use storyteller_storage::{MediaMetadata, MediaStorage, MediaType};
use storyteller_story::{AssetProducer, STYLE_DIRECTIVE};
use test_utils::{BrokenStorage, Drawing, StubIllustrator, StubSpeech, producer, quick_config};

#[tokio::test]
async fn test_image_stored_under_scene_key() -> anyhow::Result<()> {
    let illustrator = StubIllustrator::instant();
    let (producer, storage) = producer(illustrator.clone(), StubSpeech::working(), &quick_config());

    let url = producer.produce_image("The rabbit finds a carrot.", None).await?;

    assert!(url.starts_with("memory://story-images/story_scene_"));
    assert!(url.ends_with(".png"));
    assert_eq!(storage.retrieve(&url).await?, b"image-1");

    let call = &illustrator.calls()[0];
    assert!(call.prompt.contains("The rabbit finds a carrot."));
    assert!(call.prompt.contains(STYLE_DIRECTIVE));
    assert!(call.reference.is_none());
    Ok(())
}

#[tokio::test]
async fn test_reference_bytes_are_attached() -> anyhow::Result<()> {
    let illustrator = StubIllustrator::instant();
    let (producer, storage) = producer(illustrator.clone(), StubSpeech::working(), &quick_config());
    let reference = storage
        .store(b"previous-page", &MediaMetadata::new(MediaType::Image, "image/png"))
        .await?;

    producer
        .produce_image("Next scene.", Some(&reference.url))
        .await?;

    let call = &illustrator.calls()[0];
    assert_eq!(call.reference.as_deref(), Some(b"previous-page".as_slice()));
    assert!(call.prompt.contains("previous page"));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_reference_fails_by_default() -> anyhow::Result<()> {
    let illustrator = StubIllustrator::instant();
    let (producer, _) = producer(illustrator.clone(), StubSpeech::working(), &quick_config());

    let err = producer
        .produce_image("Next scene.", Some("memory://story-images/gone.png"))
        .await
        .expect_err("reference missing");

    assert!(matches!(err.kind, AssetErrorKind::ReferenceFetch(_)));
    assert_eq!(illustrator.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_unreachable_reference_standalone_policy() -> anyhow::Result<()> {
    let illustrator = StubIllustrator::instant();
    let config = quick_config().with_reference_fallback(ReferenceFallback::Standalone);
    let (producer, _) = producer(illustrator.clone(), StubSpeech::working(), &config);

    let url = producer
        .produce_image("Next scene.", Some("memory://story-images/gone.png"))
        .await?;

    assert!(url.starts_with("memory://"));
    assert!(illustrator.calls()[0].reference.is_none());
    Ok(())
}

#[tokio::test]
async fn test_generation_failure() -> anyhow::Result<()> {
    let illustrator = StubIllustrator::new(Drawing::Fail, Duration::ZERO);
    let (producer, storage) = producer(illustrator, StubSpeech::working(), &quick_config());

    let err = producer.produce_image("scene", None).await.expect_err("fails");
    assert!(matches!(err.kind, AssetErrorKind::Generation(_)));
    assert_eq!(storage.object_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_empty_image_rejected() -> anyhow::Result<()> {
    let illustrator = StubIllustrator::new(Drawing::Empty, Duration::ZERO);
    let (producer, storage) = producer(illustrator, StubSpeech::working(), &quick_config());

    let err = producer.produce_image("scene", None).await.expect_err("empty");
    assert_eq!(err.kind, AssetErrorKind::EmptyResponse);
    assert_eq!(storage.object_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_upload_failure() -> anyhow::Result<()> {
    let config = quick_config();
    let producer = AssetProducer::new(
        StubIllustrator::instant(),
        StubSpeech::working(),
        Arc::new(BrokenStorage),
        &config,
    );

    let err = producer.produce_image("scene", None).await.expect_err("upload");
    assert!(matches!(err.kind, AssetErrorKind::Upload(_)));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_slow_generation_times_out() -> anyhow::Result<()> {
    let illustrator = StubIllustrator::new(Drawing::Succeed, Duration::from_secs(30));
    let config = StoryConfig::default().with_asset_timeout_secs(10);
    let (producer, storage) = producer(illustrator, StubSpeech::working(), &config);

    let err = producer.produce_image("scene", None).await.expect_err("timeout");
    assert_eq!(err.kind, AssetErrorKind::Timeout(10_000));
    assert_eq!(storage.object_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_audio_clip() -> anyhow::Result<()> {
    let (producer, storage) = producer(
        StubIllustrator::instant(),
        StubSpeech::working(),
        &quick_config(),
    );

    let clip = producer.produce_audio("0123456789", "en").await?;
    assert!(clip.audio_url.starts_with("memory://story-audio/story_audio_"));
    assert!(clip.audio_url.ends_with(".mp3"));
    assert_eq!(clip.language, "en");
    assert!((clip.duration_estimate_secs - 1.0).abs() < 1e-4);
    assert_eq!(storage.retrieve(&clip.audio_url).await?, b"mp3-bytes");
    Ok(())
}

#[tokio::test]
async fn test_audio_failure() -> anyhow::Result<()> {
    let (producer, storage) = producer(
        StubIllustrator::instant(),
        StubSpeech::failing(),
        &quick_config(),
    );

    let err = producer.produce_audio("hello", "en").await.expect_err("speech");
    assert!(matches!(err.kind, AssetErrorKind::Generation(_)));
    assert_eq!(storage.object_count().await, 0);
    Ok(())
}
