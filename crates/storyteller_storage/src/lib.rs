//! Public object storage for generated story media.
//!
//! Every stored object is addressed by a publicly resolvable URL, which is what
//! the story pipeline hands to readers and feeds back in as a reference image.
//!
//! # Example
//!
//! ```rust
//! use storyteller_storage::{MediaMetadata, MediaStorage, MediaType, MemoryStorage};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = MemoryStorage::new();
//! let metadata = MediaMetadata::new(MediaType::Image, "image/png");
//!
//! let reference = storage.store(&[0u8; 16], &metadata).await?;
//! let bytes = storage.retrieve(&reference.url).await?;
//! assert_eq!(bytes.len(), 16);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod filesystem;
mod gcs;
mod key;
mod media_type;
mod memory;
mod reference;
mod storage;

pub use config::{StorageConfig, build_storage};
pub use filesystem::FileSystemStorage;
pub use gcs::GcsStorage;
pub use key::{new_object_key, object_key};
pub use media_type::MediaType;
pub use memory::MemoryStorage;
pub use reference::{MediaMetadata, MediaReference, content_hash};
pub use storage::MediaStorage;
pub use storyteller_error::{StorageError, StorageErrorKind};
