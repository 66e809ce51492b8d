//! Authentication HTTP handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"admin","password":"password"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, LoginCredentials, LoginValidationError, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Authenticated user payload returned on login.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Stable user identifier.
    pub id: String,
    /// Name shown in client UIs.
    pub display_name: String,
}

impl From<User> for LoginResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id.to_string(),
            display_name: value.display_name.to_string(),
        }
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate the user and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (
            status = 200,
            description = "Login success",
            headers(("Set-Cookie" = String, description = "Session cookie")),
            body = LoginResponse
        ),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Invalid credentials", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user = state.login.login(&credentials).await?;
    session.persist_user(&user.id)?;
    Ok(web::Json(LoginResponse::from(user)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LandPlotService;
    use crate::domain::ports::{
        FIXTURE_LOGIN_PASSWORD, FIXTURE_LOGIN_USER_ID, FIXTURE_LOGIN_USERNAME,
        FixtureLandPlotRepository, FixtureLoginService,
    };
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::test_session_middleware;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use serde_json::Value;
    use std::sync::Arc;

    fn test_state() -> web::Data<HttpState> {
        let service = Arc::new(LandPlotService::new(Arc::new(
            FixtureLandPlotRepository::new(),
        )));
        web::Data::new(HttpState::new(HttpStatePorts {
            login: Arc::new(FixtureLoginService),
            plots: service.clone(),
            plots_query: service,
        }))
    }

    fn test_app(
        state: web::Data<HttpState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(state).service(
            web::scope("/api/v1")
                .wrap(test_session_middleware())
                .service(login),
        )
    }

    #[actix_web::test]
    async fn login_sets_a_session_cookie_and_returns_the_user() {
        let app = actix_test::init_service(test_app(test_state())).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(&LoginRequest {
                username: FIXTURE_LOGIN_USERNAME.into(),
                password: FIXTURE_LOGIN_PASSWORD.into(),
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session")
        );

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("id").and_then(Value::as_str),
            Some(FIXTURE_LOGIN_USER_ID)
        );
    }

    #[actix_web::test]
    async fn wrong_credentials_are_unauthorised() {
        let app = actix_test::init_service(test_app(test_state())).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(&LoginRequest {
                username: "admin".into(),
                password: "wrong".into(),
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn blank_username_is_a_field_level_error() {
        let app = actix_test::init_service(test_app(test_state())).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(&LoginRequest {
                username: "  ".into(),
                password: "password".into(),
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("details")
                .and_then(|details| details.get("field"))
                .and_then(Value::as_str),
            Some("username")
        );
    }
}
