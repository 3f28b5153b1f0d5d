//! Texture assignment on area and free selections.
//!
//! Loading is split in two so the shell can read the file asynchronously:
//! [`InteriorEditor::begin_texture_load`] validates the selection and MIME
//! type and captures the target cells, [`InteriorEditor::finish_texture_load`]
//! encodes the bytes and assigns them to whichever targets still exist.
//! Texture changes are cosmetic and update the current history entry in
//! place instead of adding one.

use std::io;

use roomkit_core::{CellKey, EditError};

use super::InteriorEditor;
use crate::texture::{encode_data_uri, is_image_mime, PendingTexture, TextureRef};

impl InteriorEditor {
    /// Starts loading a texture for the current selection.
    pub fn begin_texture_load(&mut self, mime: &str) -> Result<PendingTexture, EditError> {
        if !self.selection.allows_texture() {
            return self.reject(EditError::selection_unavailable(
                "Select blocks with an area or free selection to apply a texture",
            ));
        }
        if !is_image_mime(mime) {
            return self.reject(EditError::unsupported_input(mime));
        }

        let targets = self.selection.cell_keys().to_vec();
        tracing::debug!("Loading {} texture for {} cells", mime, targets.len());
        self.inform("Loading texture...");
        Ok(PendingTexture::new(mime, targets))
    }

    /// Completes a load started with [`begin_texture_load`](Self::begin_texture_load).
    pub fn finish_texture_load(
        &mut self,
        pending: PendingTexture,
        bytes: io::Result<Vec<u8>>,
    ) -> Result<usize, EditError> {
        let bytes = match bytes {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Failed to read texture: {}", e);
                return self.reject(EditError::read_failure(e.to_string()));
            }
        };

        let texture = match encode_data_uri(pending.mime(), &bytes) {
            Ok(texture) => texture,
            Err(err) => {
                tracing::warn!("Rejected texture: {}", err);
                return self.reject(err);
            }
        };

        self.texture_cells(pending.targets(), texture)
    }

    /// Assigns an already encoded texture to the selected cells.
    pub fn apply_texture(&mut self, texture: TextureRef) -> Result<usize, EditError> {
        if !self.selection.allows_texture() {
            return self.reject(EditError::selection_unavailable(
                "Select blocks with an area or free selection to apply a texture",
            ));
        }
        let targets = self.selection.cell_keys().to_vec();
        self.texture_cells(&targets, texture)
    }

    fn texture_cells(
        &mut self,
        targets: &[CellKey],
        texture: TextureRef,
    ) -> Result<usize, EditError> {
        let applied = targets
            .iter()
            .filter(|key| self.state.grid.set_texture(**key, texture.clone()))
            .count();
        if applied == 0 {
            return self.reject(EditError::stale("The selected blocks no longer exist"));
        }

        self.write_through();
        self.inform(format!("Texture applied to {} block(s)", applied));
        Ok(applied)
    }

    /// Removes textures from the selected cells.
    pub fn clear_texture(&mut self) -> Result<usize, EditError> {
        if !self.selection.allows_texture() {
            return self.reject(EditError::selection_unavailable(
                "Select blocks with an area or free selection to remove a texture",
            ));
        }

        let targets = self.selection.cell_keys().to_vec();
        let cleared = targets
            .iter()
            .filter(|key| self.state.grid.clear_texture(key))
            .count();
        if cleared == 0 {
            return self.reject(EditError::empty("No texture to remove in the selection"));
        }

        self.write_through();
        self.inform(format!("Textures removed from {} block(s)", cleared));
        Ok(cleared)
    }
}
