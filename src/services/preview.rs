//! Preview Handles
//!
//! Issues and releases the transient view URLs the UI shows for a selected
//! image. The session controller releases every handle it is given, so a
//! registry's live count is the number of images currently on screen.

use std::collections::HashSet;
use std::sync::Mutex;

use tracing::warn;
use uuid::Uuid;

use crate::models::image::{ImageResource, PreviewHandle};

/// Source of preview handles, implemented by the UI host.
pub trait PreviewRegistry: Send + Sync {
    /// Create a view handle for `image`.
    fn create(&self, image: &ImageResource) -> PreviewHandle;

    /// Release a handle previously returned by `create`.
    fn release(&self, handle: PreviewHandle);
}

/// Registry that mints `blob:`-style URLs and tracks which are still live.
#[derive(Debug, Default)]
pub struct InMemoryPreviewRegistry {
    live: Mutex<HashSet<Uuid>>,
}

impl InMemoryPreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles issued and not yet released.
    pub fn live_count(&self) -> usize {
        self.live.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_live(&self, id: Uuid) -> bool {
        self.live
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&id)
    }
}

impl PreviewRegistry for InMemoryPreviewRegistry {
    fn create(&self, _image: &ImageResource) -> PreviewHandle {
        let id = Uuid::new_v4();
        self.live
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id);
        PreviewHandle::new(id, format!("blob:face-analyzer/{}", id))
    }

    fn release(&self, handle: PreviewHandle) {
        let removed = self
            .live
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&handle.id());
        if !removed {
            warn!(id = %handle.id(), "released a preview handle that was not live");
        }
    }
}
