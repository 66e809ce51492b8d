//! Land plot domain service.
//!
//! Plain orchestration over the two pure pieces of the domain: boundary
//! validation happens before a draft reaches this service, and the area
//! estimator runs here whenever a boundary is created or replaced. The
//! service owns the ownership invariant: every read and mutation checks the
//! caller against the stored owner before touching anything, and validation
//! always completes before any persisted state changes.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::domain::area::{estimate_area, round_for_storage};
use crate::domain::ports::{
    CreateLandPlot, LandPlotCommand, LandPlotQuery, LandPlotRepository, LandPlotRepositoryError,
    UpdateLandPlot,
};
use crate::domain::{Boundary, Error, LandPlot, PlotId, UserId};

/// Land plot use-cases implementing the driving ports.
#[derive(Clone)]
pub struct LandPlotService<R> {
    repo: Arc<R>,
}

impl<R> LandPlotService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_repository_error(error: LandPlotRepositoryError) -> Error {
    match error {
        LandPlotRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("land plot store unavailable: {message}"))
        }
        LandPlotRepositoryError::Query { message } => {
            Error::internal(format!("land plot store error: {message}"))
        }
    }
}

/// Run the estimator over a validated boundary and round for storage.
///
/// `Boundary` guarantees finite coordinates, so the estimator's non-finite
/// arm is unreachable from here; it is still mapped rather than unwrapped so
/// a future invariant slip surfaces as an internal error instead of a NaN in
/// the database.
fn computed_area(boundary: &Boundary) -> Result<f64, Error> {
    let area = estimate_area(&boundary.raw_points())
        .map_err(|err| Error::internal(format!("area estimation failed: {err}")))?;
    Ok(round_for_storage(area))
}

impl<R> LandPlotService<R>
where
    R: LandPlotRepository,
{
    /// Fetch a plot and enforce the ownership invariant.
    async fn fetch_owned(&self, owner: &UserId, id: &PlotId) -> Result<LandPlot, Error> {
        let plot = self
            .repo
            .find(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("land plot {id} not found")))?;

        if plot.owner != *owner {
            return Err(Error::forbidden("land plot belongs to another user"));
        }
        Ok(plot)
    }
}

#[async_trait]
impl<R> LandPlotCommand for LandPlotService<R>
where
    R: LandPlotRepository,
{
    async fn create(&self, owner: &UserId, draft: CreateLandPlot) -> Result<LandPlot, Error> {
        let area_m2 = computed_area(&draft.boundary)?;
        let now = Utc::now();
        let plot = LandPlot {
            id: PlotId::random(),
            owner: *owner,
            name: draft.name,
            description: draft.description,
            boundary: draft.boundary,
            area_m2: Some(area_m2),
            created_at: now,
            updated_at: now,
        };

        self.repo.insert(&plot).await.map_err(map_repository_error)?;
        debug!(plot_id = %plot.id, owner = %owner, area_m2, "land plot created");
        Ok(plot)
    }

    async fn update(
        &self,
        owner: &UserId,
        id: &PlotId,
        patch: UpdateLandPlot,
    ) -> Result<LandPlot, Error> {
        let mut plot = self.fetch_owned(owner, id).await?;

        if let Some(name) = patch.name {
            plot.name = name;
        }
        if let Some(description) = patch.description {
            plot.description = description;
        }
        // Recompute whenever a boundary is present, even an identical one;
        // updates without a boundary leave the stored area untouched.
        if let Some(boundary) = patch.boundary {
            plot.area_m2 = Some(computed_area(&boundary)?);
            plot.boundary = boundary;
        }
        plot.updated_at = Utc::now();

        self.repo.update(&plot).await.map_err(map_repository_error)?;
        debug!(plot_id = %plot.id, owner = %owner, "land plot updated");
        Ok(plot)
    }

    async fn delete(&self, owner: &UserId, id: &PlotId) -> Result<(), Error> {
        let plot = self.fetch_owned(owner, id).await?;
        self.repo
            .delete(&plot.id)
            .await
            .map_err(map_repository_error)?;
        debug!(plot_id = %plot.id, owner = %owner, "land plot deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> LandPlotQuery for LandPlotService<R>
where
    R: LandPlotRepository,
{
    async fn list(&self, owner: &UserId) -> Result<Vec<LandPlot>, Error> {
        self.repo
            .list_by_owner(owner)
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, owner: &UserId, id: &PlotId) -> Result<LandPlot, Error> {
        self.fetch_owned(owner, id).await
    }
}

#[cfg(test)]
#[path = "land_plot_service_tests.rs"]
mod tests;
