use serde_json::json;
use storyteller_core::{AdvanceOutcome, AssetState, PageNumber, PageView, SessionId};

fn page(n: u32, text: &str) -> PageView {
    PageView {
        page_number: PageNumber::new(n).unwrap(),
        text: text.to_string(),
        image_url: None,
        is_final_page: n == 3,
    }
}

#[test]
fn test_page_outcome_is_tagged() -> anyhow::Result<()> {
    let outcome = AdvanceOutcome::Page(page(2, "B."));
    let value = serde_json::to_value(&outcome)?;
    assert_eq!(value["status"], "page");
    assert_eq!(value["page_number"], 2);
    assert_eq!(value["text"], "B.");
    assert_eq!(value["image_url"], serde_json::Value::Null);
    Ok(())
}

#[test]
fn test_complete_outcome_is_tagged() -> anyhow::Result<()> {
    let outcome = AdvanceOutcome::StoryComplete {
        session_id: SessionId::from("s-1"),
        total_pages: PageNumber::new(3).unwrap(),
    };
    let value = serde_json::to_value(&outcome)?;
    assert_eq!(
        value,
        json!({"status": "complete", "session_id": "s-1", "total_pages": 3})
    );
    let back: AdvanceOutcome = serde_json::from_value(value)?;
    assert!(back.is_complete());
    assert!(back.page().is_none());
    Ok(())
}

#[test]
fn test_page_zero_does_not_deserialize() {
    let result: Result<PageNumber, _> = serde_json::from_str("0");
    assert!(result.is_err());
}

#[test]
fn test_asset_state_helpers() {
    assert!(!AssetState::Pending.is_resolved());
    assert!(AssetState::Failed.is_resolved());
    assert!(AssetState::Failed.url().is_none());

    let ready = AssetState::Ready("memory://a.png".to_string());
    assert!(ready.is_ready());
    assert_eq!(ready.url(), Some("memory://a.png"));
    assert_eq!(
        AssetState::from_result::<()>(Err(())),
        AssetState::Failed
    );
}

#[test]
fn test_page_number_navigation() {
    let first = PageNumber::FIRST;
    assert_eq!(PageNumber::new(1), Some(first));
    assert_eq!(first.next().get(), 2);
    assert_eq!(first.next().to_string(), "2");
    assert!(PageNumber::try_from(0u32).is_err());
}
