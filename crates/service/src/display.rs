//! Derived presentation facts for list rows: badge tone per status, the
//! star breakdown for a rating, and short date labels. Kept server-side so
//! every client renders the same indicators.

use chrono::{DateTime, Utc};
use serde::Serialize;

use models::service::{Service, ServiceStatus};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: &'static str,
    pub tone: &'static str,
    pub icon: &'static str,
}

pub fn status_badge(status: ServiceStatus) -> StatusBadge {
    match status {
        ServiceStatus::Published => StatusBadge { label: "Published", tone: "green", icon: "check" },
        ServiceStatus::Draft => StatusBadge { label: "Draft", tone: "yellow", icon: "edit" },
        ServiceStatus::Archived => StatusBadge { label: "Archived", tone: "gray", icon: "cross" },
    }
}

/// Five-star breakdown. A zero rating means "no ratings yet" rather than a
/// zero-star review.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
    pub label: String,
}

pub fn star_rating(rating: f64) -> StarRating {
    if rating == 0.0 {
        return StarRating { full: 0, half: false, empty: 5, label: "No ratings yet".into() };
    }
    let clamped = rating.clamp(0.0, 5.0);
    let full = clamped.floor() as u8;
    let half = clamped.fract() >= 0.5;
    let empty = 5 - full - u8::from(half);
    StarRating { full, half, empty, label: format!("{clamped:.1}") }
}

/// en-US short date, e.g. "Jun 12, 2023".
pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y").to_string()
}

/// A service plus everything the list view derives from it. Flattening
/// keeps the record's wire fields untouched next to the derived ones.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRow {
    #[serde(flatten)]
    pub service: Service,
    pub badge: StatusBadge,
    pub stars: StarRating,
    pub created_label: String,
    pub updated_label: String,
}

pub fn service_row(service: Service) -> ServiceRow {
    let badge = status_badge(service.status);
    let stars = star_rating(service.rating);
    let created_label = format_date(&service.created_at);
    let updated_label = format_date(&service.updated_at);
    ServiceRow { service, badge, stars, created_label, updated_label }
}
