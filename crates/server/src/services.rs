use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use common::types::Notification;
use models::service::{
    Service, ServiceCategory, ServiceStatus, ServiceUpdate, PRICING_MODELS,
    SERVICE_CATEGORIES, SUGGESTED_TAGS,
};
use service::display::{service_row, ServiceRow};
use service::form::{DraftFormData, ServiceDraftForm, SubmitAction};
use service::listing::{filter_and_sort, ListQuery, SortKey, SortOrder};

use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct ListParams {
    pub search: Option<String>,
    /// Status label or the sentinel "All".
    pub status: Option<String>,
    /// Category label or the sentinel "All".
    pub category: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ListParams {
    /// "All" and absence both mean no constraint; unknown status/category
    /// labels are a caller mistake, unknown sort keys are not (they fall
    /// back to last-modified ordering).
    fn into_query(self) -> Result<ListQuery, ApiError> {
        let status = match self.status.as_deref() {
            None | Some("All") => None,
            Some(label) => Some(ServiceStatus::from_str(label).map_err(|e| {
                ApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string()))
            })?),
        };
        let category = match self.category.as_deref() {
            None | Some("All") => None,
            Some(label) => Some(ServiceCategory::from_str(label).map_err(|e| {
                ApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string()))
            })?),
        };
        Ok(ListQuery {
            search: self.search.unwrap_or_default(),
            status,
            category,
            sort_by: self.sort_by.as_deref().map(SortKey::parse).unwrap_or_default(),
            sort_order: self.sort_order.as_deref().map(SortOrder::parse).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateServiceInput {
    #[serde(flatten)]
    pub form: DraftFormData,
    /// "publish" or "draft"; defaults to saving a draft.
    #[serde(default = "default_action")]
    pub action: SubmitAction,
}

fn default_action() -> SubmitAction {
    SubmitAction::SaveDraft
}

#[derive(Debug, Serialize)]
pub struct CreateServiceResponse {
    pub service: Service,
    pub notification: Notification,
}

#[derive(Debug, Deserialize)]
pub struct StatusChangeInput {
    pub status: ServiceStatus,
}

#[derive(Debug, Serialize)]
pub struct StatusChangeResponse {
    pub service: Service,
    pub notification: Notification,
}

#[derive(Debug, Serialize)]
pub struct DeleteServiceResponse {
    pub id: String,
    pub success: bool,
    pub notification: Notification,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMeta {
    pub categories: Vec<&'static str>,
    pub suggested_tags: Vec<&'static str>,
    pub pricing_models: Vec<&'static str>,
}

#[utoipa::path(
    get, path = "/api/services", tag = "services",
    params(ListParams),
    responses(
        (status = 200, description = "Filtered, sorted listing"),
        (status = 400, description = "Unknown status or category filter")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ServiceRow>>, ApiError> {
    let query = params.into_query()?;
    let services = match state.catalog.get_services().await {
        Ok(services) => services,
        Err(e) => {
            // storage trouble should not blank the page; serve the seed
            error!(err = %e, "fetching services failed, serving seed catalog");
            models::seed::seed_services()
        }
    };
    let rows: Vec<ServiceRow> =
        filter_and_sort(&services, &query).into_iter().map(service_row).collect();
    info!(count = rows.len(), "list services");
    Ok(Json(rows))
}

#[utoipa::path(
    post, path = "/api/services", tag = "services",
    request_body = crate::openapi::CreateServiceInputDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CreateServiceInput>,
) -> Result<Json<CreateServiceResponse>, ApiError> {
    let action = input.action;
    let draft = match ServiceDraftForm::new(input.form).submit(action) {
        Ok(draft) => draft,
        Err(form) => {
            info!(fields = form.errors().len(), "service form failed validation");
            return Err(ApiError::validation(form.errors().clone()));
        }
    };

    match state.catalog.create_service(draft).await {
        Ok(service) => {
            let notification = Notification::success(match action {
                SubmitAction::Publish => "Your service has been published successfully!",
                SubmitAction::SaveDraft => "Your service has been saved as draft.",
            });
            Ok(Json(CreateServiceResponse { service, notification }))
        }
        Err(e) => {
            error!(err = %e, "create service failed");
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred. Please try again.",
                Some(e.to_string()),
            ))
        }
    }
}

#[utoipa::path(
    get, path = "/api/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Service>, StatusCode> {
    match state.catalog.get_service(&id).await {
        Ok(Some(service)) => Ok(Json(service)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    put, path = "/api/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service ID")),
    request_body = crate::openapi::ServiceUpdateDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(input): Json<ServiceUpdate>,
) -> Result<Json<Service>, ApiError> {
    match state.catalog.update_service(&id, input).await {
        Ok(Some(service)) => Ok(Json(service)),
        Ok(None) => Err(ApiError::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            Some(format!("service {id} not found")),
        )),
        Err(e) => {
            error!(err = %e, "update service failed");
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update service. Please try again.",
                Some(e.to_string()),
            ))
        }
    }
}

#[utoipa::path(
    put, path = "/api/services/{id}/status", tag = "services",
    params(("id" = String, Path, description = "Service ID")),
    request_body = crate::openapi::StatusChangeInputDoc,
    responses(
        (status = 200, description = "Status changed"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(input): Json<StatusChangeInput>,
) -> Result<Json<StatusChangeResponse>, ApiError> {
    match state.catalog.update_service_status(&id, input.status).await {
        Ok(Some(service)) => {
            let verb = match service.status {
                ServiceStatus::Published => "published",
                ServiceStatus::Archived => "archived",
                ServiceStatus::Draft => "saved as draft",
            };
            let notification = Notification::success(format!("Service {verb} successfully."));
            Ok(Json(StatusChangeResponse { service, notification }))
        }
        Ok(None) => Err(ApiError::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            Some(format!("service {id} not found")),
        )),
        Err(e) => {
            error!(err = %e, "update service status failed");
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update service status. Please try again.",
                Some(e.to_string()),
            ))
        }
    }
}

#[utoipa::path(
    delete, path = "/api/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Deleted (idempotent: unknown ids also succeed)"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteServiceResponse>, ApiError> {
    match state.catalog.delete_service(&id).await {
        Ok(outcome) => Ok(Json(DeleteServiceResponse {
            id: outcome.id,
            success: outcome.success,
            notification: Notification::success("Service deleted successfully."),
        })),
        Err(e) => {
            error!(err = %e, "delete service failed");
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to delete service. Please try again.",
                Some(e.to_string()),
            ))
        }
    }
}

#[utoipa::path(
    get, path = "/api/services/meta", tag = "services",
    responses((status = 200, description = "Fixed option lists for the creation form"))
)]
pub async fn meta() -> Json<CatalogMeta> {
    Json(CatalogMeta {
        categories: SERVICE_CATEGORIES.iter().map(|c| c.as_str()).collect(),
        suggested_tags: SUGGESTED_TAGS.to_vec(),
        pricing_models: PRICING_MODELS.iter().map(|p| p.as_str()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sentinel_and_absence_mean_no_constraint() {
        let query = ListParams::default().into_query().expect("valid");
        assert!(query.status.is_none());
        assert!(query.category.is_none());
        assert_eq!(query.sort_by, SortKey::Newest);
        assert_eq!(query.sort_order, SortOrder::Desc);

        let params = ListParams {
            status: Some("All".into()),
            category: Some("All".into()),
            ..ListParams::default()
        };
        let query = params.into_query().expect("valid");
        assert!(query.status.is_none());
        assert!(query.category.is_none());
    }

    #[test]
    fn filters_parse_or_reject() {
        let params = ListParams {
            status: Some("Published".into()),
            category: Some("Data Migration".into()),
            sort_by: Some("relevance".into()),
            sort_order: Some("asc".into()),
            ..ListParams::default()
        };
        let query = params.into_query().expect("valid");
        assert_eq!(query.status, Some(ServiceStatus::Published));
        assert_eq!(query.category, Some(ServiceCategory::DataMigration));
        assert_eq!(query.sort_by, SortKey::Updated);
        assert_eq!(query.sort_order, SortOrder::Asc);

        let params = ListParams { status: Some("Pending".into()), ..ListParams::default() };
        assert!(params.into_query().is_err());
    }
}
