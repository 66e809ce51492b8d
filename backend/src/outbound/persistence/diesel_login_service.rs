//! Diesel-backed `LoginService` adapter.
//!
//! Preserves the fixture login contract (`admin`/`password`) while ensuring
//! the authenticated user exists in PostgreSQL, so plot rows always have a
//! valid owner to reference. Credential persistence is a future concern;
//! until it lands, authentication semantics match the fixture service.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    FIXTURE_LOGIN_PASSWORD, FIXTURE_LOGIN_USER_ID, FIXTURE_LOGIN_USERNAME, LoginService,
};
use crate::domain::{DisplayName, Error, LoginCredentials, User, UserId};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const FIXTURE_DISPLAY_NAME: &str = "Admin";

/// Diesel-backed `LoginService` that preserves fixture-authentication
/// semantics.
#[derive(Clone)]
pub struct DieselLoginService {
    pool: DbPool,
}

impl DieselLoginService {
    /// Create a new service backed by the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Load the stored user, creating the row on first login so plot
    /// ownership always has a valid foreign-key target.
    async fn load_or_create(&self, user: &User) -> Result<User, Error> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let existing: Option<UserRow> = users::table
            .filter(users::id.eq(user.id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| Error::internal(format!("failed to read user row: {err}")))?;

        if let Some(row) = existing {
            let display_name = DisplayName::new(row.display_name)
                .map_err(|err| Error::internal(format!("stored display name invalid: {err}")))?;
            return Ok(User::new(UserId::from_uuid(row.id), display_name));
        }

        let new_row = NewUserRow {
            id: *user.id.as_uuid(),
            display_name: user.display_name.as_str(),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .on_conflict(users::id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(|err| Error::internal(format!("failed to ensure user row: {err}")))?;

        Ok(user.clone())
    }
}

fn map_pool_error(error: PoolError) -> Error {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
    }
}

fn fixture_user() -> Result<User, Error> {
    let id = UserId::new(FIXTURE_LOGIN_USER_ID)
        .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
    let display_name = DisplayName::new(FIXTURE_DISPLAY_NAME)
        .map_err(|err| Error::internal(format!("invalid fixture display name: {err}")))?;
    Ok(User::new(id, display_name))
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        if credentials.username() != FIXTURE_LOGIN_USERNAME
            || credentials.password() != FIXTURE_LOGIN_PASSWORD
        {
            return Err(Error::unauthorized("invalid credentials"));
        }

        let user = fixture_user()?;
        self.load_or_create(&user).await
    }
}
