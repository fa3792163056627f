//! OpenAPI document assembly.
//!
//! Collects every utoipa-annotated handler into one OpenAPI 3.1 document,
//! served at `/openapi.json`. With the `swagger-ui` feature the Swagger UI
//! is mounted at `/swagger-ui` as well.

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI specification for the whole HTTP surface.
///
/// Collection endpoints are documented once under `/api/{collection}`;
/// they are mounted at `/api/user`, `/api/product`, `/api/category`,
/// `/api/brand`, `/api/contact`, `/api/cart`, `/api/order`, `/api/review`
/// and `/api/profile`.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "TECHSNACC storefront API",
        description = "Catalog, cart, order, review and profile documents for the TECHSNACC storefront."
    ),
    paths(
        crate::api::handlers::system::root_handler,
        crate::api::handlers::system::health_handler,
        crate::api::handlers::auth::session,
        crate::api::handlers::auth::logout,
        crate::api::handlers::documents::list_documents,
        crate::api::handlers::documents::create_document,
        crate::api::handlers::documents::get_document,
        crate::api::handlers::documents::replace_document,
        crate::api::handlers::documents::delete_document,
        crate::api::handlers::backup::export_backup,
    ),
    tags(
        (name = "System", description = "Welcome message and health"),
        (name = "Auth", description = "Session cookie inspection"),
        (name = "Documents", description = "Per-collection document CRUD"),
        (name = "Backup", description = "Whole-store export"),
    )
)]
pub struct ApiDoc;

/// Routes serving the OpenAPI document (and Swagger UI when enabled).
#[cfg(feature = "swagger-ui")]
pub fn routes() -> Router<AppState> {
    Router::new().merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url("/openapi.json", ApiDoc::openapi()),
    )
}

/// Routes serving the OpenAPI document (and Swagger UI when enabled).
#[cfg(not(feature = "swagger-ui"))]
pub fn routes() -> Router<AppState> {
    use axum::Json;
    use axum::routing::get;

    Router::new().route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
}
