//! Upload rules for draft-form attachments, plus the preview-handle
//! registry that tracks live banner previews so superseded or discarded
//! ones are provably released.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, Weak},
};

use uuid::Uuid;

pub const MAX_BANNER_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
pub const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

pub const BANNER_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "image/webp"];

pub const DOCUMENT_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Metadata of a file handed to the form. Contents never enter the
/// validation path; type and size are all the rules look at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

/// Check a prospective banner image. Error strings are the exact inline
/// messages the form shows.
pub fn check_banner_image(upload: &FileUpload) -> Result<(), String> {
    if !BANNER_IMAGE_TYPES.contains(&upload.content_type.as_str()) {
        return Err("Please upload a valid image file (JPEG, PNG, GIF, WebP)".into());
    }
    if upload.size_bytes > MAX_BANNER_IMAGE_BYTES {
        return Err("Image size should be less than 5MB".into());
    }
    Ok(())
}

/// Check a batch of supporting documents. The whole batch is rejected on
/// the first broken rule: type problems first, then size.
pub fn check_documents(uploads: &[FileUpload]) -> Result<(), String> {
    if uploads.iter().any(|u| !DOCUMENT_TYPES.contains(&u.content_type.as_str())) {
        return Err("Please upload valid document files (PDF, DOC, DOCX)".into());
    }
    if uploads.iter().any(|u| u.size_bytes > MAX_DOCUMENT_BYTES) {
        return Err("Document size should be less than 10MB each".into());
    }
    Ok(())
}

/// Tracks minted preview URLs. A handle revokes itself on drop, so a
/// preview stays registered exactly as long as something still shows it.
#[derive(Default)]
pub struct PreviewRegistry {
    active: Mutex<HashSet<Uuid>>,
}

impl PreviewRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Mint a preview URL for an accepted upload.
    pub fn mint(self: &Arc<Self>, upload: &FileUpload) -> PreviewHandle {
        let id = Uuid::new_v4();
        self.lock().insert(id);
        PreviewHandle {
            id,
            url: format!("preview://{id}/{}", upload.file_name),
            registry: Arc::downgrade(self),
        }
    }

    /// Number of previews not yet released.
    pub fn active_count(&self) -> usize {
        self.lock().len()
    }

    pub fn is_active(&self, url: &str) -> bool {
        self.lock().iter().any(|id| url.starts_with(&format!("preview://{id}/")))
    }

    fn revoke(&self, id: Uuid) {
        self.lock().remove(&id);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<Uuid>> {
        self.active.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Scoped preview URL. Dropping the handle revokes the registration;
/// `into_url` detaches it when the URL is persisted into a record and must
/// outlive the form.
#[derive(Debug)]
pub struct PreviewHandle {
    id: Uuid,
    url: String,
    registry: Weak<PreviewRegistry>,
}

impl PreviewHandle {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Hand the URL over without revoking it. Used when a submitted draft
    /// keeps the banner the preview points at.
    pub fn into_url(mut self) -> String {
        self.registry = Weak::new();
        std::mem::take(&mut self.url)
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.revoke(self.id);
        }
    }
}
