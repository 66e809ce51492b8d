//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (repositories, login) describe how the domain expects to
//! interact with adapters. Each trait exposes strongly typed errors so
//! adapters map their failures into predictable variants instead of
//! returning `anyhow::Result`. Driving ports (command/query) are what the
//! inbound HTTP layer depends on; the domain services implement them.
//!
//! Fixture implementations live here too: they back unit and endpoint tests
//! and let the server boot without a database during local development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;

use super::error::Error;
use super::geo::Boundary;
use super::land_plot::{LandPlot, PlotDescription, PlotId, PlotName};
use super::user::{DisplayName, LoginCredentials, User, UserId};

/// Errors surfaced by the persistence adapter when handling land plots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LandPlotRepositoryError {
    /// Database connectivity or checkout failures.
    #[error("land plot store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failures that bubble up from the adapter.
    #[error("land plot store query failed: {message}")]
    Query { message: String },
}

impl LandPlotRepositoryError {
    /// Helper for connection related adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Durable storage for land plots.
///
/// Implementations only translate between rows and domain types; ownership
/// rules and area computation stay in the domain service.
#[async_trait]
pub trait LandPlotRepository: Send + Sync {
    /// Persist a freshly created plot.
    async fn insert(&self, plot: &LandPlot) -> Result<(), LandPlotRepositoryError>;

    /// Fetch a plot by identifier regardless of owner.
    async fn find(&self, id: &PlotId) -> Result<Option<LandPlot>, LandPlotRepositoryError>;

    /// All plots belonging to `owner`, newest first.
    async fn list_by_owner(&self, owner: &UserId)
    -> Result<Vec<LandPlot>, LandPlotRepositoryError>;

    /// Replace a stored plot with the given state.
    async fn update(&self, plot: &LandPlot) -> Result<(), LandPlotRepositoryError>;

    /// Remove a plot by identifier.
    async fn delete(&self, id: &PlotId) -> Result<(), LandPlotRepositoryError>;
}

/// Validated input for creating a plot.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateLandPlot {
    /// Display name.
    pub name: PlotName,
    /// Optional description; empty submissions are normalised to `None`
    /// before reaching the domain.
    pub description: Option<PlotDescription>,
    /// Validated boundary ring.
    pub boundary: Boundary,
}

/// Validated patch for updating a plot.
///
/// Outer `None` always means "leave untouched". For the description the
/// inner option distinguishes clearing (`Some(None)`) from setting a value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateLandPlot {
    /// Replacement name, if supplied.
    pub name: Option<PlotName>,
    /// Replacement description: absent, cleared, or set.
    pub description: Option<Option<PlotDescription>>,
    /// Replacement boundary; triggers an area recomputation when present.
    pub boundary: Option<Boundary>,
}

/// Driving port for plot mutations.
#[async_trait]
pub trait LandPlotCommand: Send + Sync {
    /// Create a plot owned by `owner`; computes and stores its area.
    async fn create(&self, owner: &UserId, draft: CreateLandPlot) -> Result<LandPlot, Error>;

    /// Apply a partial update to an owned plot.
    async fn update(
        &self,
        owner: &UserId,
        id: &PlotId,
        patch: UpdateLandPlot,
    ) -> Result<LandPlot, Error>;

    /// Delete an owned plot.
    async fn delete(&self, owner: &UserId, id: &PlotId) -> Result<(), Error>;
}

/// Driving port for plot reads.
#[async_trait]
pub trait LandPlotQuery: Send + Sync {
    /// List the caller's plots, newest first.
    async fn list(&self, owner: &UserId) -> Result<Vec<LandPlot>, Error>;

    /// Fetch one owned plot.
    async fn get(&self, owner: &UserId, id: &PlotId) -> Result<LandPlot, Error>;
}

/// Driving port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Authenticate and return the user identity to persist in the session.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}

/// Fixture credentials accepted by [`FixtureLoginService`].
pub const FIXTURE_LOGIN_USERNAME: &str = "admin";
/// Fixture password accepted by [`FixtureLoginService`].
pub const FIXTURE_LOGIN_PASSWORD: &str = "password";
/// User id issued by [`FixtureLoginService`].
pub const FIXTURE_LOGIN_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// Login fixture honouring the development credential contract.
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        if credentials.username() == FIXTURE_LOGIN_USERNAME
            && credentials.password() == FIXTURE_LOGIN_PASSWORD
        {
            let id = UserId::new(FIXTURE_LOGIN_USER_ID)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
            let display_name = DisplayName::new("Admin")
                .map_err(|err| Error::internal(format!("invalid fixture display name: {err}")))?;
            Ok(User::new(id, display_name))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

/// In-memory land plot store for tests and pool-less startup.
///
/// The lock is only held for short synchronous sections; no await happens
/// while it is taken.
#[derive(Default)]
pub struct FixtureLandPlotRepository {
    plots: RwLock<HashMap<PlotId, LandPlot>>,
}

impl FixtureLandPlotRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_poisoned() -> LandPlotRepositoryError {
        LandPlotRepositoryError::connection("fixture store lock poisoned")
    }
}

#[async_trait]
impl LandPlotRepository for FixtureLandPlotRepository {
    async fn insert(&self, plot: &LandPlot) -> Result<(), LandPlotRepositoryError> {
        let mut plots = self.plots.write().map_err(|_| Self::lock_poisoned())?;
        plots.insert(plot.id, plot.clone());
        Ok(())
    }

    async fn find(&self, id: &PlotId) -> Result<Option<LandPlot>, LandPlotRepositoryError> {
        let plots = self.plots.read().map_err(|_| Self::lock_poisoned())?;
        Ok(plots.get(id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<LandPlot>, LandPlotRepositoryError> {
        let plots = self.plots.read().map_err(|_| Self::lock_poisoned())?;
        let mut owned: Vec<LandPlot> = plots
            .values()
            .filter(|plot| plot.owner == *owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn update(&self, plot: &LandPlot) -> Result<(), LandPlotRepositoryError> {
        let mut plots = self.plots.write().map_err(|_| Self::lock_poisoned())?;
        match plots.get_mut(&plot.id) {
            Some(stored) => {
                *stored = plot.clone();
                Ok(())
            }
            None => Err(LandPlotRepositoryError::query(
                "land plot not found for update",
            )),
        }
    }

    async fn delete(&self, id: &PlotId) -> Result<(), LandPlotRepositoryError> {
        let mut plots = self.plots.write().map_err(|_| Self::lock_poisoned())?;
        match plots.remove(id) {
            Some(_) => Ok(()),
            None => Err(LandPlotRepositoryError::query(
                "land plot not found for delete",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::geo::RawPoint;
    use chrono::{Duration, Utc};
    use rstest::rstest;

    fn plot_for(owner: &UserId, name: &str, age_minutes: i64) -> LandPlot {
        let boundary = Boundary::from_points(&[
            RawPoint { lat: 0.0, lng: 0.0 },
            RawPoint { lat: 0.0, lng: 0.1 },
            RawPoint { lat: 0.1, lng: 0.1 },
            RawPoint { lat: 0.1, lng: 0.0 },
        ])
        .expect("valid boundary");
        let created_at = Utc::now() - Duration::minutes(age_minutes);
        LandPlot {
            id: PlotId::random(),
            owner: *owner,
            name: PlotName::new(name).expect("valid name"),
            description: None,
            boundary,
            area_m2: Some(1.0),
            created_at,
            updated_at: created_at,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn list_by_owner_filters_and_orders_newest_first() {
        let repo = FixtureLandPlotRepository::new();
        let owner = UserId::random();
        let stranger = UserId::random();

        let old = plot_for(&owner, "old", 60);
        let fresh = plot_for(&owner, "fresh", 1);
        let foreign = plot_for(&stranger, "foreign", 5);
        for plot in [&old, &fresh, &foreign] {
            repo.insert(plot).await.expect("insert");
        }

        let listed = repo.list_by_owner(&owner).await.expect("list");
        let names: Vec<&str> = listed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["fresh", "old"]);
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_a_missing_plot_is_a_query_error() {
        let repo = FixtureLandPlotRepository::new();
        let plot = plot_for(&UserId::random(), "ghost", 0);
        let err = repo.update(&plot).await.expect_err("must fail");
        assert!(matches!(err, LandPlotRepositoryError::Query { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_login_accepts_only_the_contract_credentials() {
        let service = FixtureLoginService;
        let good = LoginCredentials::try_from_parts(FIXTURE_LOGIN_USERNAME, FIXTURE_LOGIN_PASSWORD)
            .expect("valid shape");
        let user = service.login(&good).await.expect("login succeeds");
        assert_eq!(user.id.to_string(), FIXTURE_LOGIN_USER_ID);

        let bad = LoginCredentials::try_from_parts("admin", "wrong").expect("valid shape");
        let err = service.login(&bad).await.expect_err("must fail");
        assert_eq!(err.code(), crate::domain::ErrorCode::Unauthorized);
    }
}
