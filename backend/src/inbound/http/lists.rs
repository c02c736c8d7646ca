//! List handlers.
//!
//! ```text
//! GET    /api/lists/?page=1&page_size=10
//! POST   /api/lists/        {"name":"Groceries","priority":"low","status":"not-started"}
//! GET    /api/lists/{id}/
//! PUT    /api/lists/{id}/
//! PATCH  /api/lists/{id}/   {"status":"completed"}
//! DELETE /api/lists/{id}/
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, put, web};
use pagination::Page;
use serde::Deserialize;
use url::Url;
use utoipa::IntoParams;

use crate::domain::ports::{
    CreateListRequest, DeleteListRequest, GetListRequest, ListListsRequest, UpdateListRequest,
};
use crate::domain::{Error, ListChanges, ListDraft, ListId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::dto::{ListBody, ListResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_page_request;

/// Optional page-number pagination. Without either parameter the full
/// collection is returned as a plain array.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Results per page, at most 100.
    pub page_size: Option<u32>,
}

/// Absolute URL of the current request, used to build page links.
pub(crate) fn request_url(req: &HttpRequest) -> Result<Url, Error> {
    let info = req.connection_info();
    let raw = format!("{}://{}{}", info.scheme(), info.host(), req.uri());
    Url::parse(&raw).map_err(|err| Error::internal(format!("cannot build page links: {err}")))
}

/// Lists owned by the caller, newest first.
#[utoipa::path(
    get,
    path = "/api/lists/",
    params(PageQuery),
    responses(
        (status = 200, description = "Owned lists, paginated when page or page_size is given",
            body = [ListResponse]),
        (status = 400, description = "Invalid pagination", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
    ),
    tags = ["lists"],
    operation_id = "listLists"
)]
#[get("/lists/")]
pub async fn list_lists(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    query: web::Query<PageQuery>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let PageQuery { page, page_size } = query.into_inner();
    let page = parse_page_request(page, page_size)?;

    let slice = state
        .lists_query
        .list_lists(ListListsRequest {
            owner: user.id(),
            page,
        })
        .await?;
    let results: Vec<ListResponse> = slice.lists.iter().map(ListResponse::from).collect();

    match page {
        Some(request) => {
            let base = request_url(&req)?;
            Ok(HttpResponse::Ok().json(Page::new(results, slice.total, request, &base)))
        }
        None => Ok(HttpResponse::Ok().json(results)),
    }
}

/// Create a list owned by the caller.
///
/// Ownership always comes from the access token; an `owner` field in the
/// body is ignored.
#[utoipa::path(
    post,
    path = "/api/lists/",
    request_body = ListBody,
    responses(
        (status = 201, description = "List created", body = ListResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
    ),
    tags = ["lists"],
    operation_id = "createList"
)]
#[post("/lists/")]
pub async fn create_list(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<ListBody>,
) -> ApiResult<HttpResponse> {
    let draft = ListDraft::try_from_input(payload.into_inner().into()).map_err(Error::validation)?;
    let list = state
        .lists
        .create_list(CreateListRequest {
            owner: user.id(),
            draft,
        })
        .await?;
    Ok(HttpResponse::Created().json(ListResponse::from(&list)))
}

/// Fetch one list.
#[utoipa::path(
    get,
    path = "/api/lists/{list_id}/",
    params(("list_id" = i64, Path, description = "List identifier")),
    responses(
        (status = 200, description = "List", body = ListResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Owned by another user"),
        (status = 404, description = "No such list"),
    ),
    tags = ["lists"],
    operation_id = "getList"
)]
#[get("/lists/{list_id:\\d+}/")]
pub async fn get_list(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ListResponse>> {
    let list = state
        .lists_query
        .get_list(GetListRequest {
            caller: user.id(),
            list_id: ListId::new(path.into_inner()),
        })
        .await?;
    Ok(web::Json(ListResponse::from(&list)))
}

async fn apply_update(
    state: &HttpState,
    user: AuthenticatedUser,
    list_id: i64,
    changes: ListChanges,
) -> ApiResult<web::Json<ListResponse>> {
    let list = state
        .lists
        .update_list(UpdateListRequest {
            caller: user.id(),
            list_id: ListId::new(list_id),
            changes,
        })
        .await?;
    Ok(web::Json(ListResponse::from(&list)))
}

/// Replace a list. `name`, `priority` and `status` are required; an omitted
/// description is cleared.
#[utoipa::path(
    put,
    path = "/api/lists/{list_id}/",
    params(("list_id" = i64, Path, description = "List identifier")),
    request_body = ListBody,
    responses(
        (status = 200, description = "List replaced", body = ListResponse),
        (status = 403, description = "Owned by another user"),
        (status = 404, description = "No such list"),
        (status = 422, description = "Validation failed", body = ErrorSchema),
    ),
    tags = ["lists"],
    operation_id = "replaceList"
)]
#[put("/lists/{list_id:\\d+}/")]
pub async fn replace_list(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
    payload: web::Json<ListBody>,
) -> ApiResult<web::Json<ListResponse>> {
    let draft = ListDraft::try_from_input(payload.into_inner().into()).map_err(Error::validation)?;
    apply_update(&state, user, path.into_inner(), draft.into()).await
}

/// Change only the supplied fields of a list.
#[utoipa::path(
    patch,
    path = "/api/lists/{list_id}/",
    params(("list_id" = i64, Path, description = "List identifier")),
    request_body = ListBody,
    responses(
        (status = 200, description = "List updated", body = ListResponse),
        (status = 403, description = "Owned by another user"),
        (status = 404, description = "No such list"),
        (status = 422, description = "Validation failed", body = ErrorSchema),
    ),
    tags = ["lists"],
    operation_id = "updateList"
)]
#[patch("/lists/{list_id:\\d+}/")]
pub async fn update_list(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
    payload: web::Json<ListBody>,
) -> ApiResult<web::Json<ListResponse>> {
    let changes =
        ListChanges::try_from_input(payload.into_inner().into()).map_err(Error::validation)?;
    apply_update(&state, user, path.into_inner(), changes).await
}

/// Delete a list and every task in it.
#[utoipa::path(
    delete,
    path = "/api/lists/{list_id}/",
    params(("list_id" = i64, Path, description = "List identifier")),
    responses(
        (status = 204, description = "List deleted"),
        (status = 403, description = "Owned by another user"),
        (status = 404, description = "No such list"),
    ),
    tags = ["lists"],
    operation_id = "deleteList"
)]
#[delete("/lists/{list_id:\\d+}/")]
pub async fn delete_list(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .lists
        .delete_list(DeleteListRequest {
            caller: user.id(),
            list_id: ListId::new(path.into_inner()),
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "lists_tests.rs"]
mod tests;
