//! Media type classification.

use serde::{Deserialize, Serialize};

/// Type of stored media.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Page illustrations
    #[display("image")]
    Image,
    /// Narration clips
    #[display("audio")]
    Audio,
}

impl MediaType {
    /// Top-level folder objects of this type are stored under.
    pub fn folder(&self) -> &'static str {
        match self {
            MediaType::Image => "story-images",
            MediaType::Audio => "story-audio",
        }
    }

    /// File name stem for objects of this type.
    pub fn stem(&self) -> &'static str {
        match self {
            MediaType::Image => "story_scene",
            MediaType::Audio => "story_audio",
        }
    }

    /// File extension for a MIME type of this media type.
    pub fn extension(&self, mime_type: &str) -> &'static str {
        match mime_type {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "image/svg+xml" => "svg",
            "audio/mpeg" | "audio/mp3" => "mp3",
            "audio/wav" | "audio/x-wav" => "wav",
            "audio/ogg" => "ogg",
            _ => match self {
                MediaType::Image => "png",
                MediaType::Audio => "mp3",
            },
        }
    }
}
