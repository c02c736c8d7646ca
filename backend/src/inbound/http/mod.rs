//! HTTP inbound adapter exposing the REST endpoints.

pub mod accounts;
pub mod auth;
pub mod dto;
pub mod error;
pub mod health;
pub mod lists;
pub mod refresh_cookie;
pub mod schemas;
pub mod state;
pub mod tasks;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every route and the extractor error handlers.
///
/// Expects `web::Data<HttpState>` and `web::Data<HealthState>` to be
/// registered on the app.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use backend::inbound::http::{self, health::HealthState};
///
/// let _app = App::new()
///     .app_data(web::Data::new(HealthState::new()))
///     .configure(http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(
            web::scope("/api")
                .service(accounts::register)
                .service(accounts::login)
                .service(accounts::refresh)
                .service(accounts::logout)
                .service(lists::list_lists)
                .service(lists::create_list)
                .service(lists::get_list)
                .service(lists::replace_list)
                .service(lists::update_list)
                .service(lists::delete_list)
                .service(tasks::list_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::replace_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        )
        .service(accounts::current_user)
        .service(health::ready)
        .service(health::live);
}
