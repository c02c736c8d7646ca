//! Account handlers: registration, token issue, refresh, logout and the
//! current-user view.
//!
//! ```text
//! POST /api/register/        {"email":"a@x.com","displayName":"Ada","password":"..."}
//! POST /api/token/           {"email":"a@x.com","password":"..."}
//! POST /api/token/refresh/   (refresh_token cookie)
//! POST /api/token/logout/
//! GET  /users/me/            (bearer)
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};

use crate::domain::{Error, Registration, TokenPair};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::dto::{
    AccessTokenResponse, LoginRequest, RegisterRequest, RegisterResponse, UserResponse,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_login;

fn token_response(state: &HttpState, tokens: TokenPair) -> HttpResponse {
    let TokenPair {
        access,
        refresh: refresh_token,
    } = tokens;
    HttpResponse::Ok()
        .cookie(state.refresh_cookie.issue(&refresh_token))
        .json(AccessTokenResponse { access })
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/register/",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse,
            headers(("Set-Cookie" = String, description = "Refresh token cookie"))),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register/")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        email,
        display_name,
        password,
    } = payload.into_inner();
    let registration = Registration::try_from_parts(
        email.as_deref(),
        display_name.as_deref(),
        password.as_deref(),
    )
    .map_err(Error::validation)?;

    let account = state.accounts.register(registration).await?;
    let TokenPair {
        access,
        refresh: refresh_token,
    } = account.tokens;
    Ok(HttpResponse::Created()
        .cookie(state.refresh_cookie.issue(&refresh_token))
        .json(RegisterResponse {
            user: UserResponse::from(&account.user),
            access,
        }))
}

/// Exchange email and password for an access token and a refresh cookie.
#[utoipa::path(
    post,
    path = "/api/token/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AccessTokenResponse,
            headers(("Set-Cookie" = String, description = "Refresh token cookie"))),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/token/")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = parse_login(email.as_deref(), password.as_deref())?;
    let tokens = state.accounts.login(credentials).await?;
    Ok(token_response(&state, tokens))
}

/// Rotate the refresh cookie and issue a new access token.
#[utoipa::path(
    post,
    path = "/api/token/refresh/",
    responses(
        (status = 200, description = "Tokens rotated", body = AccessTokenResponse,
            headers(("Set-Cookie" = String, description = "Rotated refresh token cookie"))),
        (status = 401, description = "Missing, expired or tampered refresh token", body = ErrorSchema),
    ),
    tags = ["accounts"],
    operation_id = "refreshToken",
    security([])
)]
#[post("/token/refresh/")]
pub async fn refresh(state: web::Data<HttpState>, req: HttpRequest) -> ApiResult<HttpResponse> {
    let presented = state.refresh_cookie.read(&req);
    let tokens = state.accounts.refresh(presented).await?;
    Ok(token_response(&state, tokens))
}

/// Clear the refresh cookie. Always succeeds.
#[utoipa::path(
    post,
    path = "/api/token/logout/",
    responses(
        (status = 204, description = "Refresh cookie cleared",
            headers(("Set-Cookie" = String, description = "Expired refresh token cookie"))),
    ),
    tags = ["accounts"],
    operation_id = "logout",
    security([])
)]
#[post("/token/logout/")]
pub async fn logout(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::NoContent()
        .cookie(state.refresh_cookie.removal())
        .finish()
}

/// The authenticated caller's account.
#[utoipa::path(
    get,
    path = "/users/me/",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
    ),
    tags = ["accounts"],
    operation_id = "currentUser"
)]
#[get("/users/me/")]
pub async fn current_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<UserResponse>> {
    let current = state.accounts_query.current_user(user.id()).await?;
    Ok(web::Json(UserResponse::from(&current)))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
