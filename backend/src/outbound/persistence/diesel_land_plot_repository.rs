//! PostgreSQL-backed `LandPlotRepository` implementation using Diesel ORM.
//!
//! A thin adapter: rows are translated to and from the domain aggregate and
//! every Diesel failure is mapped to a typed repository error. Boundary
//! rings round-trip through the JSONB column via the domain's own serde
//! contract, so malformed stored data surfaces as a typed error rather than
//! re-entering the domain unvalidated.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{LandPlotRepository, LandPlotRepositoryError};
use crate::domain::{
    Boundary, LandPlot, PlotDescription, PlotId, PlotName, UserId,
};

use super::models::{LandPlotRow, LandPlotUpdateRow, NewLandPlotRow};
use super::pool::{DbPool, PoolError};
use super::schema::land_plots;

/// Diesel-backed implementation of the `LandPlotRepository` port.
#[derive(Clone)]
pub struct DieselLandPlotRepository {
    pool: DbPool,
}

impl DieselLandPlotRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain land plot repository errors.
fn map_pool_error(error: PoolError) -> LandPlotRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            LandPlotRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain land plot repository errors.
fn map_diesel_error(error: diesel::result::Error) -> LandPlotRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => LandPlotRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            LandPlotRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            LandPlotRepositoryError::query("owning user does not exist")
        }
        _ => LandPlotRepositoryError::query("database error"),
    }
}

/// Convert a database row to the domain aggregate.
///
/// Stored values re-enter the domain through its validating constructors;
/// a row that no longer satisfies the invariants is reported instead of
/// silently accepted.
fn row_to_plot(row: LandPlotRow) -> Result<LandPlot, LandPlotRepositoryError> {
    let stored_validation_error = |what: &str, detail: String| {
        LandPlotRepositoryError::query(format!("stored plot failed validation ({what}): {detail}"))
    };

    let boundary: Boundary = serde_json::from_value(row.boundary_points)
        .map_err(|err| stored_validation_error("boundary", err.to_string()))?;
    let name = PlotName::new(row.name)
        .map_err(|err| stored_validation_error("name", err.to_string()))?;
    let description = row
        .description
        .map(PlotDescription::new)
        .transpose()
        .map_err(|err| stored_validation_error("description", err.to_string()))?;

    Ok(LandPlot {
        id: PlotId::from_uuid(row.id),
        owner: UserId::from_uuid(row.user_id),
        name,
        description,
        boundary,
        area_m2: row.area_m2,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn boundary_to_json(boundary: &Boundary) -> Result<serde_json::Value, LandPlotRepositoryError> {
    serde_json::to_value(boundary).map_err(|err| {
        LandPlotRepositoryError::query(format!("boundary serialisation failed: {err}"))
    })
}

#[async_trait]
impl LandPlotRepository for DieselLandPlotRepository {
    async fn insert(&self, plot: &LandPlot) -> Result<(), LandPlotRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let boundary_points = boundary_to_json(&plot.boundary)?;
        let new_row = NewLandPlotRow {
            id: *plot.id.as_uuid(),
            user_id: *plot.owner.as_uuid(),
            name: plot.name.as_str(),
            description: plot.description.as_ref().map(PlotDescription::as_str),
            boundary_points: &boundary_points,
            area_m2: plot.area_m2,
            created_at: plot.created_at,
            updated_at: plot.updated_at,
        };

        diesel::insert_into(land_plots::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find(&self, id: &PlotId) -> Result<Option<LandPlot>, LandPlotRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<LandPlotRow> = land_plots::table
            .filter(land_plots::id.eq(id.as_uuid()))
            .select(LandPlotRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_plot).transpose()
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<LandPlot>, LandPlotRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<LandPlotRow> = land_plots::table
            .filter(land_plots::user_id.eq(owner.as_uuid()))
            .order(land_plots::created_at.desc())
            .select(LandPlotRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_plot).collect()
    }

    async fn update(&self, plot: &LandPlot) -> Result<(), LandPlotRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let boundary_points = boundary_to_json(&plot.boundary)?;
        let update = LandPlotUpdateRow {
            name: plot.name.as_str(),
            description: plot.description.as_ref().map(PlotDescription::as_str),
            boundary_points: &boundary_points,
            area_m2: plot.area_m2,
            updated_at: plot.updated_at,
        };

        let updated_rows = diesel::update(land_plots::table)
            .filter(land_plots::id.eq(plot.id.as_uuid()))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated_rows == 0 {
            return Err(LandPlotRepositoryError::query(
                "land plot not found for update",
            ));
        }
        Ok(())
    }

    async fn delete(&self, id: &PlotId) -> Result<(), LandPlotRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted_rows = diesel::delete(land_plots::table)
            .filter(land_plots::id.eq(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if deleted_rows == 0 {
            return Err(LandPlotRepositoryError::query(
                "land plot not found for delete",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::json;

    fn sample_row() -> LandPlotRow {
        LandPlotRow {
            id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            name: "North Paddock".to_owned(),
            description: Some("grazing".to_owned()),
            boundary_points: json!([
                { "lat": -6.2000, "lng": 106.8000 },
                { "lat": -6.2000, "lng": 106.8100 },
                { "lat": -6.2100, "lng": 106.8100 },
                { "lat": -6.2100, "lng": 106.8000 },
            ]),
            area_m2: Some(1_231_954.35),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let pool_err = PoolError::checkout("connection refused");
        let repo_err = map_pool_error(pool_err);

        assert!(matches!(repo_err, LandPlotRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, LandPlotRepositoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn row_to_plot_round_trips_the_boundary_in_order() {
        let row = sample_row();
        let plot = row_to_plot(row).expect("valid row");

        let lats: Vec<f64> = plot.boundary.points().iter().map(|c| c.lat()).collect();
        assert_eq!(lats, vec![-6.2000, -6.2000, -6.2100, -6.2100]);
        assert_eq!(plot.name.as_str(), "North Paddock");
        assert_eq!(plot.area_m2, Some(1_231_954.35));
    }

    #[rstest]
    fn row_with_a_three_point_boundary_is_reported_not_accepted() {
        let mut row = sample_row();
        row.boundary_points = json!([
            { "lat": 0.0, "lng": 0.0 },
            { "lat": 0.0, "lng": 1.0 },
            { "lat": 1.0, "lng": 1.0 },
        ]);

        let err = row_to_plot(row).expect_err("must fail");
        assert!(matches!(err, LandPlotRepositoryError::Query { .. }));
        assert!(err.to_string().contains("boundary"));
    }

    #[rstest]
    fn row_with_an_out_of_range_latitude_is_reported() {
        let mut row = sample_row();
        row.boundary_points = json!([
            { "lat": -100.0, "lng": 0.0 },
            { "lat": 0.0, "lng": 1.0 },
            { "lat": 1.0, "lng": 1.0 },
            { "lat": 1.0, "lng": 0.0 },
        ]);

        let err = row_to_plot(row).expect_err("must fail");
        assert!(matches!(err, LandPlotRepositoryError::Query { .. }));
    }

    #[rstest]
    fn boundary_serialises_to_a_four_element_array() {
        let plot_boundary = Boundary::from_points(&[
            crate::domain::RawPoint { lat: 0.0, lng: 0.0 },
            crate::domain::RawPoint { lat: 0.0, lng: 1.0 },
            crate::domain::RawPoint { lat: 1.0, lng: 1.0 },
            crate::domain::RawPoint { lat: 1.0, lng: 0.0 },
        ])
        .expect("valid boundary");

        let value = boundary_to_json(&plot_boundary).expect("serialises");
        assert_eq!(value.as_array().map(Vec::len), Some(4));
    }
}
