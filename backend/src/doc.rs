//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler in the inbound HTTP layer, the request
//! and response bodies, and the bearer-token security scheme. Domain types
//! stay framework-agnostic; their shapes are described by the wrappers in
//! [`crate::inbound::http::schemas`].
//!
//! The document is served by Swagger UI in debug builds and printed by the
//! `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::dto::{
    AccessTokenResponse, ListBody, ListResponse, LoginRequest, RegisterRequest, RegisterResponse,
    TaskBody, TaskResponse, UserResponse,
};
use crate::inbound::http::refresh_cookie::REFRESH_COOKIE_NAME;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Adds the bearer and refresh-cookie security schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token from POST /api/token/."))
                    .build(),
            ),
        );
        components.add_security_scheme(
            "RefreshCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                REFRESH_COOKIE_NAME,
                "HTTP-only refresh token scoped to /api/token/.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Tasking backend API",
        description = "Personal task lists and tasks behind token authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::refresh,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::current_user,
        crate::inbound::http::lists::list_lists,
        crate::inbound::http::lists::create_list,
        crate::inbound::http::lists::get_list,
        crate::inbound::http::lists::replace_list,
        crate::inbound::http::lists::update_list,
        crate::inbound::http::lists::delete_list,
        crate::inbound::http::tasks::list_tasks,
        crate::inbound::http::tasks::create_task,
        crate::inbound::http::tasks::get_task,
        crate::inbound::http::tasks::replace_task,
        crate::inbound::http::tasks::update_task,
        crate::inbound::http::tasks::delete_task,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserResponse,
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        AccessTokenResponse,
        ListBody,
        ListResponse,
        TaskBody,
        TaskResponse,
    )),
    tags(
        (name = "accounts", description = "Registration, tokens and the current user"),
        (name = "lists", description = "Task lists owned by the caller"),
        (name = "tasks", description = "Tasks inside a list"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
