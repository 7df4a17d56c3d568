use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Creation payload: the raw draft-form fields plus the submit action.
/// Wire casing is camelCase, matching the dashboard's GraphQL field names.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreateServiceInputDoc {
    pub name: String,
    pub short_description: String,
    pub detailed_description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub pricing_model: String,
    pub price: String,
    pub duration: String,
    pub is_active: bool,
    pub contact_email: String,
    pub visibility: String,
    pub terms_agreed: bool,
    pub banner_image_url: Option<String>,
    /// "publish" or "draft"
    pub action: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ServiceUpdateDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub detailed_description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
    pub pricing_model: Option<String>,
    pub price: Option<String>,
    pub duration: Option<String>,
    pub is_active: Option<bool>,
    pub contact_email: Option<String>,
    pub visibility: Option<String>,
    pub banner_image_url: Option<String>,
}

#[derive(ToSchema)]
pub struct StatusChangeInputDoc {
    /// "Draft", "Published", or "Archived"
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::services::list,
        crate::services::create,
        crate::services::meta,
        crate::services::get,
        crate::services::update,
        crate::services::update_status,
        crate::services::delete,
        crate::dashboard::summary,
    ),
    components(
        schemas(
            HealthResponse,
            CreateServiceInputDoc,
            ServiceUpdateDoc,
            StatusChangeInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "services"),
        (name = "dashboard")
    )
)]
pub struct ApiDoc;
