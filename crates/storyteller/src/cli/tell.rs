//! Terminal story reading.

use storyteller::{
    AdvanceOutcome, PageView, StoryController, StorytellerConfig, StorytellerResult,
    build_controller, build_offline_controller,
};
use tracing::warn;

/// How a terminal story is told.
#[derive(Debug, Clone, Default)]
pub struct TellOptions {
    /// Narrate each page as well
    pub audio: bool,
    /// Skip the Google APIs
    pub offline: bool,
}

/// Tell a story on `topic`, printing every page until the end.
pub async fn tell_story(
    config: &StorytellerConfig,
    topic: &str,
    options: &TellOptions,
) -> StorytellerResult<()> {
    let controller = if options.offline {
        build_offline_controller(config)
    } else {
        build_controller(config)?
    };

    let started = controller.start(topic).await?;
    let session_id = started.session_id;
    print_page(&controller, &started.page, options.audio).await;

    loop {
        match controller.advance(&session_id).await? {
            AdvanceOutcome::Page(page) => print_page(&controller, &page, options.audio).await,
            AdvanceOutcome::StoryComplete { total_pages, .. } => {
                println!("\n~ The End ({} pages) ~", total_pages.get());
                break;
            }
        }
    }

    controller.end(&session_id).await;
    Ok(())
}

async fn print_page(controller: &StoryController, page: &PageView, audio: bool) {
    println!("\n--- Page {} ---", page.page_number.get());
    println!("{}", page.text);
    match &page.image_url {
        Some(url) => println!("[illustration] {url}"),
        None => println!("[illustration unavailable]"),
    }

    if audio {
        match controller.synthesize_audio(&page.text, None).await {
            Ok(clip) => println!(
                "[narration] {} (~{:.1}s)",
                clip.audio_url, clip.duration_estimate_secs
            ),
            Err(e) => warn!(error = %e, page = page.page_number.get(), "Narration failed"),
        }
    }
}
