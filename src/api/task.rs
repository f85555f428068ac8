use crate::{
    auth::auth::{AuthUser, HrOnly},
    error::ApiError,
    model::task::{Task, TaskTotals},
    store::{Store, TASKS},
};
use actix_web::{HttpResponse, web};
use chrono::{NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct CreateTask {
    #[schema(example = "kX9f2LmQ7aRt")]
    pub uid: String,
    #[schema(example = "Sales")]
    pub task: String,
    #[schema(example = 5.0)]
    pub hours: f64,
    /// Work date; defaults to today (UTC).
    #[schema(example = "2026-01-15")]
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TaskQuery {
    pub uid: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllTasksResponse {
    pub tasks: Vec<Task>,
    pub total: u64,
    pub total_hours: f64,
}

/// Log worked hours for the caller
#[utoipa::path(
    post,
    path = "/task",
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task saved", body = Task),
        (status = 400, description = "Invalid hours or empty task"),
        (status = 401),
        (status = 403, description = "uid does not belong to the caller")
    ),
    security(("bearer_auth" = [])),
    tag = "Task"
)]
#[instrument(name = "task_submit", skip_all, fields(uid = %auth.uid))]
pub async fn create_task(
    auth: AuthUser,
    store: web::Data<dyn Store>,
    body: web::Json<CreateTask>,
) -> Result<HttpResponse, ApiError> {
    let CreateTask {
        uid,
        task,
        hours,
        date,
    } = body.into_inner();

    auth.require_self(&uid)?;

    if !hours.is_finite() || hours <= 0.0 {
        return Err(ApiError::bad_request("hours must be a positive number"));
    }
    if task.trim().is_empty() {
        return Err(ApiError::bad_request("task must not be empty"));
    }

    let created_at = Utc::now().trunc_subsecs(0);
    let task = Task {
        id: store.next_id(TASKS).await?,
        uid,
        task: task.trim().to_string(),
        hours,
        date: date.unwrap_or_else(|| created_at.date_naive()),
        created_at,
    };
    store.insert_task(&task).await?;

    info!(id = task.id, hours, "Task logged");
    Ok(HttpResponse::Created().json(task))
}

/// The caller's own tasks, newest first
#[utoipa::path(
    get,
    path = "/tasks",
    params(TaskQuery),
    responses(
        (status = 200, body = [Task]),
        (status = 401),
        (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Task"
)]
pub async fn list_tasks(
    auth: AuthUser,
    store: web::Data<dyn Store>,
    query: web::Query<TaskQuery>,
) -> Result<HttpResponse, ApiError> {
    auth.require_self(&query.uid)?;

    let tasks = store.tasks_by_owner(&query.uid).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Every task with count and summed hours (HR only)
#[utoipa::path(
    get,
    path = "/allTasks",
    responses(
        (status = 200, body = AllTasksResponse),
        (status = 401),
        (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Task"
)]
pub async fn list_all_tasks(
    _hr: HrOnly,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, ApiError> {
    let tasks = store.all_tasks().await?;
    let TaskTotals { total, total_hours } = TaskTotals::from_tasks(&tasks);

    Ok(HttpResponse::Ok().json(AllTasksResponse {
        tasks,
        total,
        total_hours,
    }))
}
