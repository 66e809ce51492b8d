//! Land plot HTTP handlers.
//!
//! ```text
//! GET    /api/v1/land-plots
//! POST   /api/v1/land-plots
//! GET    /api/v1/land-plots/{id}
//! PUT    /api/v1/land-plots/{id}
//! DELETE /api/v1/land-plots/{id}
//! ```
//!
//! All routes require an authenticated session; handlers never touch plots
//! belonging to other users (the domain service enforces ownership and the
//! adapter surfaces it as `403 Forbidden`).

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::ports::{CreateLandPlot, UpdateLandPlot};
use crate::domain::{Coordinate, Error, LandPlot, PlotId, RawPoint};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_boundary, parse_description, parse_plot_name};

/// One boundary vertex as submitted and rendered over the wire.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, utoipa::ToSchema)]
pub struct BoundaryPointDto {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl From<BoundaryPointDto> for RawPoint {
    fn from(value: BoundaryPointDto) -> Self {
        Self {
            lat: value.lat,
            lng: value.lng,
        }
    }
}

impl From<&Coordinate> for BoundaryPointDto {
    fn from(value: &Coordinate) -> Self {
        Self {
            lat: value.lat(),
            lng: value.lng(),
        }
    }
}

/// Request payload for creating a plot.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLandPlotRequest {
    /// Display name; required, at most 255 characters.
    pub name: String,
    /// Optional description; at most 1000 characters.
    #[serde(default)]
    pub description: Option<String>,
    /// Exactly four boundary vertices.
    pub boundary_points: Vec<BoundaryPointDto>,
}

/// Request payload for partially updating a plot.
///
/// Omitted fields stay untouched. An explicit `"description": null` clears
/// the description; re-submitting the full four-point array replaces the
/// boundary (there is no per-vertex patch).
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLandPlotRequest {
    /// Replacement name, if present.
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement description: omitted, null (clear), or a value.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    /// Replacement boundary ring, if present.
    #[serde(default)]
    pub boundary_points: Option<Vec<BoundaryPointDto>>,
}

/// Distinguish an absent JSON field from an explicit `null`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Stored plot as rendered to clients.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LandPlotResponse {
    /// Stable plot identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Boundary vertices in stored order.
    pub boundary_points: Vec<BoundaryPointDto>,
    /// Planar area in square metres, rounded to two decimals.
    pub area_m2: Option<f64>,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Last-modified timestamp, RFC 3339.
    pub updated_at: String,
}

impl From<LandPlot> for LandPlotResponse {
    fn from(value: LandPlot) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
            description: value.description.map(String::from),
            boundary_points: value.boundary.points().iter().map(Into::into).collect(),
            area_m2: value.area_m2,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

fn parse_create_request(payload: CreateLandPlotRequest) -> Result<CreateLandPlot, Error> {
    let name = parse_plot_name(payload.name)?;
    let description = parse_description(payload.description)?;
    let raw: Vec<RawPoint> = payload.boundary_points.into_iter().map(Into::into).collect();
    let boundary = parse_boundary(&raw)?;
    Ok(CreateLandPlot {
        name,
        description,
        boundary,
    })
}

fn parse_update_request(payload: UpdateLandPlotRequest) -> Result<UpdateLandPlot, Error> {
    let name = payload.name.map(parse_plot_name).transpose()?;
    let description = match payload.description {
        None => None,
        Some(raw) => Some(parse_description(raw)?),
    };
    let boundary = match payload.boundary_points {
        None => None,
        Some(points) => {
            let raw: Vec<RawPoint> = points.into_iter().map(Into::into).collect();
            Some(parse_boundary(&raw)?)
        }
    };
    Ok(UpdateLandPlot {
        name,
        description,
        boundary,
    })
}

/// List the authenticated user's plots, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/land-plots",
    responses(
        (status = 200, description = "Owned plots", body = [LandPlotResponse]),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["land-plots"],
    operation_id = "listLandPlots"
)]
#[get("/land-plots")]
pub async fn list_plots(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<LandPlotResponse>>> {
    let user_id = session.require_user_id()?;
    let plots = state.plots_query.list(&user_id).await?;
    Ok(web::Json(plots.into_iter().map(Into::into).collect()))
}

/// Create a plot from a validated boundary; its area is computed on the way
/// in and stored alongside the ring.
#[utoipa::path(
    post,
    path = "/api/v1/land-plots",
    request_body = CreateLandPlotRequest,
    responses(
        (status = 201, description = "Plot created", body = LandPlotResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["land-plots"],
    operation_id = "createLandPlot"
)]
#[post("/land-plots")]
pub async fn create_plot(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateLandPlotRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let draft = parse_create_request(payload.into_inner())?;
    let plot = state.plots.create(&user_id, draft).await?;
    Ok(HttpResponse::Created().json(LandPlotResponse::from(plot)))
}

/// Fetch one owned plot.
#[utoipa::path(
    get,
    path = "/api/v1/land-plots/{id}",
    params(("id" = Uuid, Path, description = "Plot identifier")),
    responses(
        (status = 200, description = "The plot", body = LandPlotResponse),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 403, description = "Owned by another user", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Unknown plot", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["land-plots"],
    operation_id = "getLandPlot"
)]
#[get("/land-plots/{id}")]
pub async fn get_plot(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<LandPlotResponse>> {
    let user_id = session.require_user_id()?;
    let plot_id = PlotId::from_uuid(path.into_inner());
    let plot = state.plots_query.get(&user_id, &plot_id).await?;
    Ok(web::Json(LandPlotResponse::from(plot)))
}

/// Partially update an owned plot.
///
/// Supplying a boundary re-runs the full validate-then-estimate sequence;
/// updates without one leave the stored area untouched.
#[utoipa::path(
    put,
    path = "/api/v1/land-plots/{id}",
    params(("id" = Uuid, Path, description = "Plot identifier")),
    request_body = UpdateLandPlotRequest,
    responses(
        (status = 200, description = "Updated plot", body = LandPlotResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 403, description = "Owned by another user", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Unknown plot", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["land-plots"],
    operation_id = "updateLandPlot"
)]
#[put("/land-plots/{id}")]
pub async fn update_plot(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateLandPlotRequest>,
) -> ApiResult<web::Json<LandPlotResponse>> {
    let user_id = session.require_user_id()?;
    let plot_id = PlotId::from_uuid(path.into_inner());
    let patch = parse_update_request(payload.into_inner())?;
    let plot = state.plots.update(&user_id, &plot_id, patch).await?;
    Ok(web::Json(LandPlotResponse::from(plot)))
}

/// Delete an owned plot.
#[utoipa::path(
    delete,
    path = "/api/v1/land-plots/{id}",
    params(("id" = Uuid, Path, description = "Plot identifier")),
    responses(
        (status = 204, description = "Plot deleted"),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 403, description = "Owned by another user", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Unknown plot", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["land-plots"],
    operation_id = "deleteLandPlot"
)]
#[delete("/land-plots/{id}")]
pub async fn delete_plot(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let plot_id = PlotId::from_uuid(path.into_inner());
    state.plots.delete(&user_id, &plot_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn square_dtos() -> Vec<BoundaryPointDto> {
        vec![
            BoundaryPointDto {
                lat: -6.2000,
                lng: 106.8000,
            },
            BoundaryPointDto {
                lat: -6.2000,
                lng: 106.8100,
            },
            BoundaryPointDto {
                lat: -6.2100,
                lng: 106.8100,
            },
            BoundaryPointDto {
                lat: -6.2100,
                lng: 106.8000,
            },
        ]
    }

    #[rstest]
    fn create_request_parses_with_a_valid_boundary() {
        let draft = parse_create_request(CreateLandPlotRequest {
            name: "Test Plot".into(),
            description: Some("A test plot".into()),
            boundary_points: square_dtos(),
        })
        .expect("valid request");

        assert_eq!(draft.name.as_str(), "Test Plot");
        assert_eq!(draft.boundary.points().len(), 4);
    }

    #[rstest]
    fn create_request_rejects_two_points_with_a_cardinality_violation() {
        let err = parse_create_request(CreateLandPlotRequest {
            name: "Test Plot".into(),
            description: None,
            boundary_points: square_dtos().into_iter().take(2).collect(),
        })
        .expect_err("must fail");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let violations = err
            .details()
            .and_then(|details| details.get("violations"))
            .and_then(Value::as_array)
            .cloned()
            .expect("violations present");
        assert_eq!(
            violations[0].get("code").and_then(Value::as_str),
            Some("invalid_cardinality")
        );
    }

    #[rstest]
    fn update_request_distinguishes_absent_from_null_description() {
        let absent: UpdateLandPlotRequest =
            serde_json::from_value(json!({ "name": "Renamed" })).expect("decode");
        assert_eq!(absent.description, None);

        let cleared: UpdateLandPlotRequest =
            serde_json::from_value(json!({ "description": null })).expect("decode");
        assert_eq!(cleared.description, Some(None));

        let set: UpdateLandPlotRequest =
            serde_json::from_value(json!({ "description": "west field" })).expect("decode");
        assert_eq!(set.description, Some(Some("west field".to_owned())));
    }

    #[rstest]
    fn update_request_without_boundary_leaves_the_patch_boundary_empty() {
        let patch = parse_update_request(
            serde_json::from_value(json!({ "name": "Renamed" })).expect("decode"),
        )
        .expect("valid patch");
        assert!(patch.boundary.is_none());
        assert!(patch.description.is_none());
        assert_eq!(patch.name.map(String::from), Some("Renamed".to_owned()));
    }

    #[rstest]
    fn update_request_with_bad_boundary_fails_validation() {
        let body = json!({
            "boundaryPoints": [
                { "lat": -100.0, "lng": 106.8 },
                { "lat": -6.2, "lng": 106.81 },
                { "lat": -6.21, "lng": 106.81 },
                { "lat": -6.21, "lng": 106.8 },
            ]
        });
        let err = parse_update_request(serde_json::from_value(body).expect("decode"))
            .expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn response_preserves_boundary_order() {
        use crate::domain::ports::{CreateLandPlot, LandPlotCommand};
        use crate::domain::ports::FixtureLandPlotRepository;
        use crate::domain::{LandPlotService, UserId};
        use std::sync::Arc;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");
        let response = runtime.block_on(async {
            let service = LandPlotService::new(Arc::new(FixtureLandPlotRepository::new()));
            let draft = parse_create_request(CreateLandPlotRequest {
                name: "Ordered".into(),
                description: None,
                boundary_points: square_dtos(),
            })
            .expect("valid request");
            let plot = service
                .create(&UserId::random(), draft)
                .await
                .expect("create");
            LandPlotResponse::from(plot)
        });

        let lats: Vec<f64> = response.boundary_points.iter().map(|p| p.lat).collect();
        assert_eq!(lats, vec![-6.2000, -6.2000, -6.2100, -6.2100]);
    }
}
