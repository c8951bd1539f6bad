//! Raw media returned by generation collaborators.

/// Bytes produced by an image or speech collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMedia {
    /// MIME type reported by the collaborator (e.g., "image/png")
    pub mime_type: String,
    /// Raw bytes
    pub data: Vec<u8>,
}

impl GeneratedMedia {
    /// Wrap bytes with their MIME type.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// True when no bytes were produced.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
