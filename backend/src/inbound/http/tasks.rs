//! Task handlers, always addressed through their parent list.
//!
//! ```text
//! GET    /api/lists/{list_id}/tasks/
//! POST   /api/lists/{list_id}/tasks/      {"name":"Milk","priority":"medium","status":"not-started"}
//! GET    /api/lists/{list_id}/tasks/{id}/
//! PUT    /api/lists/{list_id}/tasks/{id}/
//! PATCH  /api/lists/{list_id}/tasks/{id}/ {"isComplete":true}
//! DELETE /api/lists/{list_id}/tasks/{id}/
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};

use crate::domain::ports::{
    CreateTaskRequest, DeleteTaskRequest, GetTaskRequest, ListTasksRequest, UpdateTaskRequest,
};
use crate::domain::{Error, ListId, TaskChanges, TaskDraft, TaskId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::dto::{TaskBody, TaskResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Every task of a list the caller owns, newest first.
#[utoipa::path(
    get,
    path = "/api/lists/{list_id}/tasks/",
    params(("list_id" = i64, Path, description = "Parent list identifier")),
    responses(
        (status = 200, description = "Tasks", body = [TaskResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "List owned by another user"),
        (status = 404, description = "No such list"),
    ),
    tags = ["tasks"],
    operation_id = "listTasks"
)]
#[get("/lists/{list_id:\\d+}/tasks/")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<TaskResponse>>> {
    let tasks = state
        .tasks_query
        .list_tasks(ListTasksRequest {
            caller: user.id(),
            list_id: ListId::new(path.into_inner()),
        })
        .await?;
    Ok(web::Json(tasks.iter().map(TaskResponse::from).collect()))
}

/// Create a task under a list the caller owns. `isComplete` defaults to
/// false.
#[utoipa::path(
    post,
    path = "/api/lists/{list_id}/tasks/",
    params(("list_id" = i64, Path, description = "Parent list identifier")),
    request_body = TaskBody,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 403, description = "List owned by another user"),
        (status = 404, description = "No such list"),
        (status = 422, description = "Validation failed", body = ErrorSchema),
    ),
    tags = ["tasks"],
    operation_id = "createTask"
)]
#[post("/lists/{list_id:\\d+}/tasks/")]
pub async fn create_task(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
    payload: web::Json<TaskBody>,
) -> ApiResult<HttpResponse> {
    let draft = TaskDraft::try_from_input(payload.into_inner().into()).map_err(Error::validation)?;
    let task = state
        .tasks
        .create_task(CreateTaskRequest {
            caller: user.id(),
            list_id: ListId::new(path.into_inner()),
            draft,
        })
        .await?;
    Ok(HttpResponse::Created().json(TaskResponse::from(&task)))
}

/// Fetch one task of a list.
#[utoipa::path(
    get,
    path = "/api/lists/{list_id}/tasks/{task_id}/",
    params(
        ("list_id" = i64, Path, description = "Parent list identifier"),
        ("task_id" = i64, Path, description = "Task identifier"),
    ),
    responses(
        (status = 200, description = "Task", body = TaskResponse),
        (status = 403, description = "List owned by another user"),
        (status = 404, description = "No such list or task"),
    ),
    tags = ["tasks"],
    operation_id = "getTask"
)]
#[get("/lists/{list_id:\\d+}/tasks/{task_id:\\d+}/")]
pub async fn get_task(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<(i64, i64)>,
) -> ApiResult<web::Json<TaskResponse>> {
    let (list_id, task_id) = path.into_inner();
    let task = state
        .tasks_query
        .get_task(GetTaskRequest {
            caller: user.id(),
            list_id: ListId::new(list_id),
            task_id: TaskId::new(task_id),
        })
        .await?;
    Ok(web::Json(TaskResponse::from(&task)))
}

async fn apply_update(
    state: &HttpState,
    user: AuthenticatedUser,
    (list_id, task_id): (i64, i64),
    changes: TaskChanges,
) -> ApiResult<web::Json<TaskResponse>> {
    let task = state
        .tasks
        .update_task(UpdateTaskRequest {
            caller: user.id(),
            list_id: ListId::new(list_id),
            task_id: TaskId::new(task_id),
            changes,
        })
        .await?;
    Ok(web::Json(TaskResponse::from(&task)))
}

/// Replace a task. Omitting `isComplete` resets it to false.
#[utoipa::path(
    put,
    path = "/api/lists/{list_id}/tasks/{task_id}/",
    params(
        ("list_id" = i64, Path, description = "Parent list identifier"),
        ("task_id" = i64, Path, description = "Task identifier"),
    ),
    request_body = TaskBody,
    responses(
        (status = 200, description = "Task replaced", body = TaskResponse),
        (status = 403, description = "List owned by another user"),
        (status = 404, description = "No such list or task"),
        (status = 422, description = "Validation failed", body = ErrorSchema),
    ),
    tags = ["tasks"],
    operation_id = "replaceTask"
)]
#[put("/lists/{list_id:\\d+}/tasks/{task_id:\\d+}/")]
pub async fn replace_task(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<(i64, i64)>,
    payload: web::Json<TaskBody>,
) -> ApiResult<web::Json<TaskResponse>> {
    let draft = TaskDraft::try_from_input(payload.into_inner().into()).map_err(Error::validation)?;
    apply_update(&state, user, path.into_inner(), draft.into()).await
}

/// Change only the supplied fields of a task.
#[utoipa::path(
    patch,
    path = "/api/lists/{list_id}/tasks/{task_id}/",
    params(
        ("list_id" = i64, Path, description = "Parent list identifier"),
        ("task_id" = i64, Path, description = "Task identifier"),
    ),
    request_body = TaskBody,
    responses(
        (status = 200, description = "Task updated", body = TaskResponse),
        (status = 403, description = "List owned by another user"),
        (status = 404, description = "No such list or task"),
        (status = 422, description = "Validation failed", body = ErrorSchema),
    ),
    tags = ["tasks"],
    operation_id = "updateTask"
)]
#[patch("/lists/{list_id:\\d+}/tasks/{task_id:\\d+}/")]
pub async fn update_task(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<(i64, i64)>,
    payload: web::Json<TaskBody>,
) -> ApiResult<web::Json<TaskResponse>> {
    let changes =
        TaskChanges::try_from_input(payload.into_inner().into()).map_err(Error::validation)?;
    apply_update(&state, user, path.into_inner(), changes).await
}

/// Delete one task.
#[utoipa::path(
    delete,
    path = "/api/lists/{list_id}/tasks/{task_id}/",
    params(
        ("list_id" = i64, Path, description = "Parent list identifier"),
        ("task_id" = i64, Path, description = "Task identifier"),
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 403, description = "List owned by another user"),
        (status = 404, description = "No such list or task"),
    ),
    tags = ["tasks"],
    operation_id = "deleteTask"
)]
#[delete("/lists/{list_id:\\d+}/tasks/{task_id:\\d+}/")]
pub async fn delete_task(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<(i64, i64)>,
) -> ApiResult<HttpResponse> {
    let (list_id, task_id) = path.into_inner();
    state
        .tasks
        .delete_task(DeleteTaskRequest {
            caller: user.id(),
            list_id: ListId::new(list_id),
            task_id: TaskId::new(task_id),
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
