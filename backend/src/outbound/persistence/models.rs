//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{land_plots, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub display_name: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub display_name: &'a str,
}

/// Row struct for reading from the land_plots table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = land_plots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LandPlotRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub boundary_points: serde_json::Value,
    pub area_m2: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new land plot records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = land_plots)]
pub(crate) struct NewLandPlotRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub boundary_points: &'a serde_json::Value,
    pub area_m2: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct replacing a stored plot's mutable state.
///
/// `treat_none_as_null` makes `description: None` clear the column instead of
/// skipping it; the repository always writes the full aggregate state.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = land_plots)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct LandPlotUpdateRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub boundary_points: &'a serde_json::Value,
    pub area_m2: Option<f64>,
    pub updated_at: DateTime<Utc>,
}
