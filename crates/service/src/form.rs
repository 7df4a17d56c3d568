//! Draft-form validation for new services. Collects every violation into a
//! field-keyed message map instead of failing fast, so the form can light
//! up all offending fields at once. Nothing here touches storage; a form
//! that validates hands a `ServiceDraft` to the catalog.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use models::service::{
    is_valid_contact_email, PricingModel, ServiceCategory, ServiceDraft, ServiceStatus,
    Visibility,
};

use crate::media::{self, FileUpload, PreviewHandle, PreviewRegistry};

/// Which submit button was pressed; decides the initial status of the
/// created record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum SubmitAction {
    #[serde(rename = "publish")]
    Publish,
    #[serde(rename = "draft")]
    SaveDraft,
}

impl SubmitAction {
    pub fn initial_status(self) -> ServiceStatus {
        match self {
            Self::Publish => ServiceStatus::Published,
            Self::SaveDraft => ServiceStatus::Draft,
        }
    }
}

/// Raw, untrusted field set as entered. Category stays a free string until
/// validation checks set membership; selects with a fixed option list
/// (pricing model, visibility) deserialize straight into their enums.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftFormData {
    pub name: String,
    pub short_description: String,
    pub detailed_description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub pricing_model: PricingModel,
    pub price: String,
    pub duration: String,
    pub is_active: bool,
    pub contact_email: String,
    pub visibility: Visibility,
    pub terms_agreed: bool,
    /// Pass-through for clients that already host the asset; a minted
    /// preview wins over this when both are present.
    pub banner_image_url: String,
}

impl Default for DraftFormData {
    fn default() -> Self {
        Self {
            name: String::new(),
            short_description: String::new(),
            detailed_description: String::new(),
            category: String::new(),
            tags: Vec::new(),
            pricing_model: PricingModel::Fixed,
            price: String::new(),
            duration: String::new(),
            is_active: true,
            contact_email: String::new(),
            visibility: Visibility::Public,
            terms_agreed: false,
            banner_image_url: String::new(),
        }
    }
}

pub const MAX_SHORT_DESCRIPTION_CHARS: usize = 200;

/// Field-keyed validation messages; keys are the wire field names.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug)]
pub struct ServiceDraftForm {
    pub fields: DraftFormData,
    errors: FieldErrors,
    banner: Option<PreviewHandle>,
    documents: Vec<FileUpload>,
}

impl ServiceDraftForm {
    pub fn new(fields: DraftFormData) -> Self {
        Self { fields, errors: FieldErrors::new(), banner: None, documents: Vec::new() }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn documents(&self) -> &[FileUpload] {
        &self.documents
    }

    pub fn banner_preview_url(&self) -> Option<&str> {
        self.banner.as_ref().map(|h| h.url())
    }

    /// Validate and attach a banner image. A rejected file leaves any
    /// previous banner in place; an accepted one supersedes it, releasing
    /// the prior preview.
    pub fn attach_banner_image(
        &mut self,
        upload: FileUpload,
        previews: &Arc<PreviewRegistry>,
    ) -> bool {
        match media::check_banner_image(&upload) {
            Err(message) => {
                self.errors.insert("bannerImage".into(), message);
                false
            }
            Ok(()) => {
                self.banner = Some(previews.mint(&upload));
                self.errors.remove("bannerImage");
                true
            }
        }
    }

    /// Validate and append a batch of supporting documents. All-or-nothing:
    /// one bad file rejects the whole batch.
    pub fn add_documents(&mut self, uploads: Vec<FileUpload>) -> bool {
        if uploads.is_empty() {
            return true;
        }
        match media::check_documents(&uploads) {
            Err(message) => {
                self.errors.insert("supportingDocuments".into(), message);
                false
            }
            Ok(()) => {
                self.documents.extend(uploads);
                self.errors.remove("supportingDocuments");
                true
            }
        }
    }

    /// Remove a previously added document. Out-of-range indexes are a
    /// no-op.
    pub fn remove_document(&mut self, index: usize) {
        if index < self.documents.len() {
            self.documents.remove(index);
        }
    }

    /// Run every field rule, replacing the error map. True iff the map
    /// ends up empty.
    pub fn validate(&mut self) -> bool {
        let f = &self.fields;
        let mut errors = FieldErrors::new();

        if f.name.trim().is_empty() {
            errors.insert("name".into(), "Service name is required".into());
        }
        if f.short_description.trim().is_empty() {
            errors.insert("shortDescription".into(), "Short description is required".into());
        } else if f.short_description.chars().count() > MAX_SHORT_DESCRIPTION_CHARS {
            errors.insert(
                "shortDescription".into(),
                "Short description must be less than 200 characters".into(),
            );
        }
        if f.detailed_description.trim().is_empty() {
            errors.insert(
                "detailedDescription".into(),
                "Detailed description is required".into(),
            );
        }
        if ServiceCategory::from_label(f.category.trim()).is_none() {
            errors.insert("category".into(), "Category is required".into());
        }
        if f.tags.is_empty() {
            errors.insert("tags".into(), "Please select at least one tag".into());
        }
        if f.pricing_model.requires_price() {
            if f.price.trim().is_empty() {
                errors.insert("price".into(), "Price is required".into());
            } else if models::service::validate_price(&f.price, f.pricing_model).is_err() {
                errors.insert("price".into(), "Price must be a valid number".into());
            }
        }
        if f.contact_email.trim().is_empty() {
            errors.insert("contactEmail".into(), "Contact email is required".into());
        } else if !is_valid_contact_email(&f.contact_email) {
            errors.insert("contactEmail".into(), "Please enter a valid email address".into());
        }
        if !f.terms_agreed {
            errors.insert(
                "termsAgreed".into(),
                "You must agree to the terms and conditions".into(),
            );
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validate, then assemble the creation payload. On failure the form
    /// comes back with its error map populated. The short description
    /// becomes the record's `description`; a minted banner preview is
    /// detached so its URL survives the form.
    pub fn submit(mut self, action: SubmitAction) -> Result<ServiceDraft, Self> {
        if !self.validate() {
            return Err(self);
        }
        let Some(category) = ServiceCategory::from_label(self.fields.category.trim()) else {
            return Err(self);
        };

        let banner_image_url = match self.banner.take() {
            Some(handle) => handle.into_url(),
            None => self.fields.banner_image_url.clone(),
        };

        let mut tags = Vec::new();
        for tag in &self.fields.tags {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }

        Ok(ServiceDraft {
            name: self.fields.name.clone(),
            description: self.fields.short_description.clone(),
            detailed_description: self.fields.detailed_description.clone(),
            category,
            tags,
            status: action.initial_status(),
            pricing_model: self.fields.pricing_model,
            price: self.fields.price.clone(),
            duration: self.fields.duration.clone(),
            is_active: self.fields.is_active,
            contact_email: self.fields.contact_email.clone(),
            visibility: self.fields.visibility,
            banner_image_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_fields() -> DraftFormData {
        DraftFormData {
            name: "GDPR Readiness Review".into(),
            short_description: "Assess your data practices against GDPR.".into(),
            detailed_description: "A structured review of processing activities, consent flows, and retention policies.".into(),
            category: "Legal".into(),
            tags: vec!["Compliance".into(), "Enterprise".into()],
            contact_email: "legal@example.com".into(),
            terms_agreed: true,
            price: "4500".into(),
            ..DraftFormData::default()
        }
    }

    fn png(size: u64) -> FileUpload {
        FileUpload { file_name: "banner.png".into(), content_type: "image/png".into(), size_bytes: size }
    }

    #[test]
    fn empty_form_collects_every_required_error() {
        let mut form = ServiceDraftForm::new(DraftFormData::default());
        assert!(!form.validate());

        let errors = form.errors();
        assert_eq!(errors["name"], "Service name is required");
        assert_eq!(errors["shortDescription"], "Short description is required");
        assert_eq!(errors["detailedDescription"], "Detailed description is required");
        assert_eq!(errors["category"], "Category is required");
        assert_eq!(errors["tags"], "Please select at least one tag");
        assert_eq!(errors["price"], "Price is required");
        assert_eq!(errors["contactEmail"], "Contact email is required");
        assert_eq!(errors["termsAgreed"], "You must agree to the terms and conditions");
        assert_eq!(errors.len(), 8);
    }

    #[test]
    fn over_long_short_description_gets_length_error() {
        let mut form = ServiceDraftForm::new(DraftFormData {
            short_description: "x".repeat(201),
            ..valid_fields()
        });
        assert!(!form.validate());
        assert_eq!(
            form.errors()["shortDescription"],
            "Short description must be less than 200 characters"
        );
    }

    #[test]
    fn price_format_error_and_custom_quote_exemption() {
        let mut form = ServiceDraftForm::new(DraftFormData {
            price: "abc".into(),
            ..valid_fields()
        });
        assert!(!form.validate());
        assert_eq!(form.errors()["price"], "Price must be a valid number");

        let mut form = ServiceDraftForm::new(DraftFormData {
            pricing_model: PricingModel::CustomQuote,
            price: String::new(),
            ..valid_fields()
        });
        assert!(form.validate(), "price rule skipped for Custom Quote: {:?}", form.errors());
    }

    #[test]
    fn contact_email_shape_rule() {
        let mut form = ServiceDraftForm::new(DraftFormData {
            contact_email: "not-an-email".into(),
            ..valid_fields()
        });
        assert!(!form.validate());
        assert_eq!(form.errors()["contactEmail"], "Please enter a valid email address");

        let mut form = ServiceDraftForm::new(DraftFormData {
            contact_email: "a@b.co".into(),
            ..valid_fields()
        });
        assert!(form.validate());
    }

    #[test]
    fn unknown_category_fails_set_membership() {
        let mut form = ServiceDraftForm::new(DraftFormData {
            category: "Gardening".into(),
            ..valid_fields()
        });
        assert!(!form.validate());
        assert_eq!(form.errors()["category"], "Category is required");
    }

    #[test]
    fn submit_maps_fields_and_stamps_status_by_action() {
        let draft = ServiceDraftForm::new(valid_fields())
            .submit(SubmitAction::Publish)
            .expect("valid form");
        assert_eq!(draft.status, ServiceStatus::Published);
        assert_eq!(draft.description, "Assess your data practices against GDPR.");
        assert_eq!(draft.category, ServiceCategory::Legal);

        let draft = ServiceDraftForm::new(valid_fields())
            .submit(SubmitAction::SaveDraft)
            .expect("valid form");
        assert_eq!(draft.status, ServiceStatus::Draft);
    }

    #[test]
    fn submit_dedupes_tags() {
        let draft = ServiceDraftForm::new(DraftFormData {
            tags: vec!["Cloud".into(), "Remote".into(), "Cloud".into()],
            ..valid_fields()
        })
        .submit(SubmitAction::SaveDraft)
        .expect("valid form");
        assert_eq!(draft.tags, vec!["Cloud".to_string(), "Remote".to_string()]);
    }

    #[test]
    fn failed_submit_returns_form_with_errors() {
        let form = ServiceDraftForm::new(DraftFormData::default());
        let form = form.submit(SubmitAction::Publish).expect_err("invalid form");
        assert!(!form.errors().is_empty());
    }

    #[test]
    fn rejected_banner_keeps_previous_preview() {
        let previews = PreviewRegistry::new();
        let mut form = ServiceDraftForm::new(valid_fields());

        assert!(form.attach_banner_image(png(1024), &previews));
        let first_url = form.banner_preview_url().unwrap().to_string();

        let rejected = FileUpload {
            file_name: "banner.bmp".into(),
            content_type: "image/bmp".into(),
            size_bytes: 10,
        };
        assert!(!form.attach_banner_image(rejected, &previews));
        assert_eq!(form.banner_preview_url(), Some(first_url.as_str()));
        assert_eq!(
            form.errors()["bannerImage"],
            "Please upload a valid image file (JPEG, PNG, GIF, WebP)"
        );
        assert_eq!(previews.active_count(), 1);
    }

    #[test]
    fn superseded_and_discarded_previews_are_released() {
        let previews = PreviewRegistry::new();
        let mut form = ServiceDraftForm::new(valid_fields());

        form.attach_banner_image(png(1), &previews);
        form.attach_banner_image(png(2), &previews);
        // replacing released the first preview
        assert_eq!(previews.active_count(), 1);

        drop(form);
        assert_eq!(previews.active_count(), 0);
    }

    #[test]
    fn submitted_banner_url_survives_the_form() {
        let previews = PreviewRegistry::new();
        let mut form = ServiceDraftForm::new(valid_fields());
        form.attach_banner_image(png(1), &previews);

        let draft = form.submit(SubmitAction::Publish).expect("valid form");
        assert!(draft.banner_image_url.starts_with("preview://"));
        assert!(previews.is_active(&draft.banner_image_url));
    }

    #[test]
    fn documents_append_and_remove_by_index() {
        let mut form = ServiceDraftForm::new(valid_fields());
        let pdf = |name: &str| FileUpload {
            file_name: name.into(),
            content_type: "application/pdf".into(),
            size_bytes: 100,
        };

        assert!(form.add_documents(vec![pdf("a.pdf"), pdf("b.pdf")]));
        assert!(form.add_documents(vec![pdf("c.pdf")]));
        assert_eq!(form.documents().len(), 3);

        form.remove_document(1);
        let names: Vec<_> = form.documents().iter().map(|d| d.file_name.as_str()).collect();
        assert_eq!(names, ["a.pdf", "c.pdf"]);

        // out of range is a no-op
        form.remove_document(9);
        assert_eq!(form.documents().len(), 2);
    }

    #[test]
    fn bad_document_batch_is_rejected_whole() {
        let mut form = ServiceDraftForm::new(valid_fields());
        let batch = vec![
            FileUpload { file_name: "ok.pdf".into(), content_type: "application/pdf".into(), size_bytes: 10 },
            FileUpload { file_name: "huge.pdf".into(), content_type: "application/pdf".into(), size_bytes: media::MAX_DOCUMENT_BYTES + 1 },
        ];
        assert!(!form.add_documents(batch));
        assert!(form.documents().is_empty());
        assert_eq!(form.errors()["supportingDocuments"], "Document size should be less than 10MB each");
    }
}
