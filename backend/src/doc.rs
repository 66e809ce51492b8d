//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API. It registers:
//!
//! - **Paths**: all HTTP endpoints from the inbound layer (auth, land plots,
//!   health probes)
//! - **Schemas**: domain type wrappers ([`ErrorSchema`], [`ErrorCodeSchema`])
//!   that provide OpenAPI definitions without coupling domain types to the
//!   utoipa framework
//! - **Security**: the session cookie authentication scheme
//!
//! The generated specification feeds Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
///
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Parcel registry backend API",
        description = "HTTP interface for recording user-owned land parcels \
                       as four-point polygons with computed planar areas."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::land_plots::list_plots,
        crate::inbound::http::land_plots::create_plot,
        crate::inbound::http::land_plots::get_plot,
        crate::inbound::http::land_plots::update_plot,
        crate::inbound::http::land_plots::delete_plot,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "auth", description = "Session establishment"),
        (name = "land-plots", description = "CRUD operations over owned parcels"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
