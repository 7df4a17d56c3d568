use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ModelError;

/// Lifecycle state of a catalog entry. Transitions are caller-driven and
/// unrestricted; the store does not enforce a workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceStatus {
    Draft,
    Published,
    Archived,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
            Self::Archived => "Archived",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(Self::Draft),
            "Published" => Ok(Self::Published),
            "Archived" => Ok(Self::Archived),
            other => Err(ModelError::UnknownLabel(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Private,
    #[serde(rename = "Invite-only")]
    InviteOnly,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Private => "Private",
            Self::InviteOnly => "Invite-only",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingModel {
    Fixed,
    Hourly,
    Daily,
    Monthly,
    Annual,
    #[serde(rename = "Custom Quote")]
    CustomQuote,
}

impl PricingModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "Fixed",
            Self::Hourly => "Hourly",
            Self::Daily => "Daily",
            Self::Monthly => "Monthly",
            Self::Annual => "Annual",
            Self::CustomQuote => "Custom Quote",
        }
    }

    /// Whether a concrete price figure is expected alongside this model.
    pub fn requires_price(&self) -> bool {
        !matches!(self, Self::CustomQuote)
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const PRICING_MODELS: [PricingModel; 6] = [
    PricingModel::Fixed,
    PricingModel::Hourly,
    PricingModel::Daily,
    PricingModel::Monthly,
    PricingModel::Annual,
    PricingModel::CustomQuote,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceCategory {
    Consulting,
    Training,
    Implementation,
    Support,
    #[serde(rename = "Managed Service")]
    ManagedService,
    Integration,
    #[serde(rename = "Custom Development")]
    CustomDevelopment,
    #[serde(rename = "Data Migration")]
    DataMigration,
    Legal,
    Marketing,
    Financial,
    #[serde(rename = "HR & Recruiting")]
    HrRecruiting,
}

pub const SERVICE_CATEGORIES: [ServiceCategory; 12] = [
    ServiceCategory::Consulting,
    ServiceCategory::Training,
    ServiceCategory::Implementation,
    ServiceCategory::Support,
    ServiceCategory::ManagedService,
    ServiceCategory::Integration,
    ServiceCategory::CustomDevelopment,
    ServiceCategory::DataMigration,
    ServiceCategory::Legal,
    ServiceCategory::Marketing,
    ServiceCategory::Financial,
    ServiceCategory::HrRecruiting,
];

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Consulting => "Consulting",
            Self::Training => "Training",
            Self::Implementation => "Implementation",
            Self::Support => "Support",
            Self::ManagedService => "Managed Service",
            Self::Integration => "Integration",
            Self::CustomDevelopment => "Custom Development",
            Self::DataMigration => "Data Migration",
            Self::Legal => "Legal",
            Self::Marketing => "Marketing",
            Self::Financial => "Financial",
            Self::HrRecruiting => "HR & Recruiting",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        SERVICE_CATEGORIES.iter().copied().find(|c| c.as_str() == label)
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| ModelError::UnknownLabel(s.to_string()))
    }
}

/// Tags suggested by the creation form. Services may carry arbitrary tags;
/// this list only feeds the picker.
pub const SUGGESTED_TAGS: [&str; 14] = [
    "Enterprise",
    "SMB",
    "Cloud",
    "On-premise",
    "AI",
    "Security",
    "Compliance",
    "Data Analytics",
    "DevOps",
    "Remote",
    "Onsite",
    "Hybrid",
    "Agile",
    "Waterfall",
];

/// A partner-offered catalog entry. Field names on the wire match the
/// dashboard's GraphQL schema, so a later backend swap keeps the contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub detailed_description: String,
    pub category: ServiceCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: ServiceStatus,
    pub pricing_model: PricingModel,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub duration: String,
    pub is_active: bool,
    pub rating: f64,
    pub popularity: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub contact_email: String,
    pub visibility: Visibility,
    #[serde(default)]
    pub banner_image_url: String,
}

/// Creation payload handed to the catalog once the draft form has passed
/// validation. System fields (id, timestamps, rating, popularity) are
/// assigned by the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDraft {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub detailed_description: String,
    pub category: ServiceCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: ServiceStatus,
    pub pricing_model: PricingModel,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub duration: String,
    pub is_active: bool,
    pub contact_email: String,
    pub visibility: Visibility,
    #[serde(default)]
    pub banner_image_url: String,
}

/// Typed partial update. Enumerates the mutable fields; unknown keys are
/// rejected at the deserialization boundary rather than merged blindly.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ServiceCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ServiceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing_model: Option<PricingModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_image_url: Option<String>,
}

impl ServiceUpdate {
    /// Shorthand for the status-only mutation.
    pub fn status(status: ServiceStatus) -> Self {
        Self { status: Some(status), ..Self::default() }
    }

    /// Merge the set fields onto an existing record. Does not touch
    /// timestamps; the store refreshes `updated_at` itself.
    pub fn apply(&self, service: &mut Service) {
        if let Some(v) = &self.name { service.name = v.clone(); }
        if let Some(v) = &self.description { service.description = v.clone(); }
        if let Some(v) = &self.detailed_description {
            service.detailed_description = v.clone();
        }
        if let Some(v) = self.category { service.category = v; }
        if let Some(v) = &self.tags { service.tags = v.clone(); }
        if let Some(v) = self.status { service.status = v; }
        if let Some(v) = self.pricing_model { service.pricing_model = v; }
        if let Some(v) = &self.price { service.price = v.clone(); }
        if let Some(v) = &self.duration { service.duration = v.clone(); }
        if let Some(v) = self.is_active { service.is_active = v; }
        if let Some(v) = &self.contact_email { service.contact_email = v.clone(); }
        if let Some(v) = self.visibility { service.visibility = v; }
        if let Some(v) = &self.banner_image_url {
            service.banner_image_url = v.clone();
        }
    }
}

/// Result envelope of a delete. `success` stays true for unknown ids;
/// callers treat delete as idempotent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub id: String,
    pub success: bool,
}

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"));

/// Basic shape check used by the draft form and anywhere else an address
/// enters the system. Not RFC-grade on purpose.
pub fn is_valid_contact_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

pub fn validate_contact_email(email: &str) -> Result<(), ModelError> {
    if !is_valid_contact_email(email) {
        return Err(ModelError::Validation("contact email is malformed".into()));
    }
    Ok(())
}

/// A price must parse as a non-negative number whenever the pricing model
/// expects one; Custom Quote entries skip the check entirely.
pub fn validate_price(price: &str, model: PricingModel) -> Result<(), ModelError> {
    if !model.requires_price() {
        return Ok(());
    }
    match price.trim().parse::<f64>() {
        Ok(v) if v >= 0.0 => Ok(()),
        _ => Err(ModelError::Validation("price must be a non-negative number".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Service {
        Service {
            id: "42".into(),
            name: "Security Compliance Audit".into(),
            description: "Comprehensive security audit.".into(),
            detailed_description: String::new(),
            category: ServiceCategory::Consulting,
            tags: vec!["Security".into(), "Compliance".into()],
            status: ServiceStatus::Published,
            pricing_model: PricingModel::CustomQuote,
            price: String::new(),
            duration: "4 weeks".into(),
            is_active: true,
            rating: 4.9,
            popularity: 92,
            created_at: Utc.with_ymd_and_hms(2023, 4, 10, 13, 20, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2023, 7, 22, 9, 30, 0).unwrap(),
            contact_email: "audit@example.com".into(),
            visibility: Visibility::InviteOnly,
            banner_image_url: String::new(),
        }
    }

    #[test]
    fn wire_field_names_match_dashboard_schema() {
        let value = serde_json::to_value(sample()).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "id",
            "name",
            "description",
            "detailedDescription",
            "category",
            "tags",
            "status",
            "createdAt",
            "updatedAt",
            "rating",
            "popularity",
            "pricingModel",
            "price",
            "duration",
            "isActive",
            "bannerImageUrl",
            "contactEmail",
            "visibility",
        ] {
            assert!(obj.contains_key(key), "missing wire field {key}");
        }
        assert_eq!(obj["pricingModel"], "Custom Quote");
        assert_eq!(obj["visibility"], "Invite-only");
    }

    #[test]
    fn service_round_trips_through_json() {
        let svc = sample();
        let json = serde_json::to_string(&svc).unwrap();
        let back: Service = serde_json::from_str(&json).unwrap();
        assert_eq!(back, svc);
    }

    #[test]
    fn update_rejects_unknown_fields() {
        let err = serde_json::from_str::<ServiceUpdate>(r#"{"nmae":"typo"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn update_merges_only_set_fields() {
        let mut svc = sample();
        let update = ServiceUpdate {
            name: Some("Renamed".into()),
            status: Some(ServiceStatus::Archived),
            ..ServiceUpdate::default()
        };
        update.apply(&mut svc);
        assert_eq!(svc.name, "Renamed");
        assert_eq!(svc.status, ServiceStatus::Archived);
        assert_eq!(svc.popularity, 92);
        assert_eq!(svc.contact_email, "audit@example.com");
    }

    #[test]
    fn price_rule_skipped_for_custom_quote() {
        assert!(validate_price("", PricingModel::CustomQuote).is_ok());
        assert!(validate_price("abc", PricingModel::CustomQuote).is_ok());
        assert!(validate_price("150", PricingModel::Hourly).is_ok());
        assert!(validate_price("abc", PricingModel::Fixed).is_err());
        assert!(validate_price("-3", PricingModel::Fixed).is_err());
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_contact_email("a@b.co"));
        assert!(!is_valid_contact_email("not-an-email"));
        assert!(!is_valid_contact_email("a b@c.d"));
    }

    #[test]
    fn category_labels_round_trip() {
        for cat in SERVICE_CATEGORIES {
            assert_eq!(ServiceCategory::from_label(cat.as_str()), Some(cat));
        }
        assert_eq!(ServiceCategory::from_label("Gardening"), None);
    }
}
