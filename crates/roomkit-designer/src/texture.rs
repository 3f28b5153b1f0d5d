//! Texture references and image loading.
//!
//! A texture is an opaque, shareable string (a `data:` URI). Loading happens
//! in two phases so the shell can read the file asynchronously: the editor
//! first captures the target cells in a [`PendingTexture`], then turns the
//! bytes into a reference once the read completes.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use roomkit_core::{CellKey, EditError};

/// Shared texture reference. Cheap to clone into many cells.
pub type TextureRef = Arc<str>;

/// A texture load waiting for its file contents.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTexture {
    mime: String,
    targets: Vec<CellKey>,
}

impl PendingTexture {
    pub(crate) fn new(mime: impl Into<String>, targets: Vec<CellKey>) -> Self {
        Self {
            mime: mime.into(),
            targets,
        }
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Cells captured when the load started.
    pub fn targets(&self) -> &[CellKey] {
        &self.targets
    }
}

/// True for `image/*` MIME types.
pub fn is_image_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

/// Encodes image bytes as a `data:<mime>;base64,...` texture reference.
///
/// The bytes must carry a recognizable image signature.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> Result<TextureRef, EditError> {
    if !is_image_mime(mime) {
        return Err(EditError::unsupported_input(mime));
    }
    let format = image::guess_format(bytes).map_err(|_| EditError::unsupported_input(mime))?;
    tracing::debug!("Encoding {:?} texture ({} bytes)", format, bytes.len());

    let encoded = STANDARD.encode(bytes);
    Ok(Arc::from(format!("data:{};base64,{}", mime.trim(), encoded)))
}
