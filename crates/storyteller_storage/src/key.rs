//! Object key scheme.
//!
//! Keys look like `story-images/story_scene_20250101_120000_1a2b3c4d.png`: a
//! second-resolution timestamp plus eight random hex digits.

use crate::MediaType;
use chrono::{DateTime, Utc};

/// Key for a new object stored now.
pub fn new_object_key(media_type: MediaType, mime_type: &str) -> String {
    object_key(media_type, mime_type, Utc::now())
}

/// Key for an object stored at `at`.
pub fn object_key(media_type: MediaType, mime_type: &str, at: DateTime<Utc>) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{}/{}_{}_{}.{}",
        media_type.folder(),
        media_type.stem(),
        at.format("%Y%m%d_%H%M%S"),
        &suffix[..8],
        media_type.extension(mime_type)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use strum::IntoEnumIterator;

    #[test]
    fn test_key_layout() {
        let at = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        let key = object_key(MediaType::Image, "image/png", at);
        assert!(key.starts_with("story-images/story_scene_20250304_050607_"));
        assert!(key.ends_with(".png"));
        assert_eq!(key.len(), "story-images/story_scene_20250304_050607_".len() + 8 + 4);
    }

    #[test]
    fn test_keys_do_not_collide_within_a_second() {
        let at = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        let a = object_key(MediaType::Audio, "audio/mpeg", at);
        let b = object_key(MediaType::Audio, "audio/mpeg", at);
        assert_ne!(a, b);
        assert!(a.starts_with("story-audio/story_audio_"));
        assert!(a.ends_with(".mp3"));
    }

    #[test]
    fn test_unknown_mime_falls_back_per_type() {
        for media_type in MediaType::iter() {
            let key = new_object_key(media_type, "application/octet-stream");
            let expected = match media_type {
                MediaType::Image => ".png",
                MediaType::Audio => ".mp3",
            };
            assert!(key.ends_with(expected), "{key}");
        }
    }
}
