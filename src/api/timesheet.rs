use crate::{
    api::see_other,
    error::{AppError, ValidationError},
    model::timesheet::TimesheetWithEmployee,
    validate, view,
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

const LIST_SQL: &str = r#"
    SELECT timesheets.*, employees.full_name
    FROM timesheets
    JOIN employees ON timesheets.employee_id = employees.id
"#;

/// Timesheet form fields. Times arrive in the browser's datetime-local
/// shape ("2025-06-23T08:00") and are normalized before storage.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TimesheetInput {
    /// Soft reference; the picker constrains it, the server does not.
    #[schema(example = 1)]
    pub employee_id: i64,
    #[schema(example = "2025-06-23T08:00")]
    pub start_time: String,
    #[schema(example = "2025-06-23T17:00")]
    pub end_time: String,
    #[schema(example = "Worked on user authentication", nullable = true)]
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TimesheetQuery {
    /// Exact employee display-name match
    pub employee: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct TimesheetListResponse {
    pub data: Vec<TimesheetWithEmployee>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 5)]
    pub per_page: u32,
    #[schema(example = 6)]
    pub total: i64,
    #[schema(example = 2)]
    pub total_pages: u32,
}

/// Parse both endpoints, reject empty or inverted intervals, and hand back
/// the canonical storage strings.
fn validate_times(input: &TimesheetInput) -> Result<(String, String), ValidationError> {
    let start = validate::parse_datetime("start_time", &input.start_time)?;
    let end = validate::parse_datetime("end_time", &input.end_time)?;
    validate::validate_time_range(start, end)?;
    Ok((
        validate::normalize_datetime(start),
        validate::normalize_datetime(end),
    ))
}

pub async fn create_timesheet_record(
    pool: &SqlitePool,
    input: &TimesheetInput,
) -> Result<i64, AppError> {
    let (start_time, end_time) = validate_times(input)?;

    let result = sqlx::query(
        "INSERT INTO timesheets (employee_id, start_time, end_time, summary) VALUES (?, ?, ?, ?)",
    )
    .bind(input.employee_id)
    .bind(start_time)
    .bind(end_time)
    .bind(&input.summary)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Full replace of an existing row, summary included.
pub async fn update_timesheet_record(
    pool: &SqlitePool,
    id: i64,
    input: &TimesheetInput,
) -> Result<(), AppError> {
    sqlx::query_as::<_, (i64,)>("SELECT id FROM timesheets WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Timesheet"))?;

    let (start_time, end_time) = validate_times(input)?;

    sqlx::query(
        "UPDATE timesheets SET employee_id = ?, start_time = ?, end_time = ?, summary = ? WHERE id = ?",
    )
    .bind(input.employee_id)
    .bind(start_time)
    .bind(end_time)
    .bind(&input.summary)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn delete_timesheet_record(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    sqlx::query("DELETE FROM timesheets WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

// -------------------- Handlers --------------------

/// List timesheets
#[utoipa::path(
    get,
    path = "/timesheets",
    params(TimesheetQuery),
    responses(
        (status = 200, description = "Paginated timesheets joined with employee names", body = TimesheetListResponse)
    ),
    tag = "Timesheet"
)]
pub async fn list_timesheets(
    pool: web::Data<SqlitePool>,
    query: web::Query<TimesheetQuery>,
) -> Result<HttpResponse, AppError> {
    let rows = sqlx::query_as::<_, TimesheetWithEmployee>(LIST_SQL)
        .fetch_all(pool.get_ref())
        .await?;

    let rows: Vec<TimesheetWithEmployee> =
        match query.employee.as_deref().filter(|name| !name.is_empty()) {
            Some(name) => rows.into_iter().filter(|t| t.full_name == name).collect(),
            None => rows,
        };

    let page = view::paginate(rows, query.page, query.per_page);

    Ok(HttpResponse::Ok().json(TimesheetListResponse {
        data: page.data,
        page: page.page,
        per_page: page.per_page,
        total: page.total,
        total_pages: page.total_pages,
    }))
}

/// Get timesheet by id
#[utoipa::path(
    get,
    path = "/timesheets/{id}",
    params(("id", Path, description = "Timesheet ID")),
    responses(
        (status = 200, description = "Timesheet found", body = TimesheetWithEmployee),
        (status = 404, description = "Timesheet not found", body = Object, example = json!({
            "message": "Timesheet not found"
        }))
    ),
    tag = "Timesheet"
)]
pub async fn get_timesheet(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let sql = format!("{LIST_SQL} WHERE timesheets.id = ?");
    let timesheet = sqlx::query_as::<_, TimesheetWithEmployee>(&sql)
        .bind(id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or(AppError::NotFound("Timesheet"))?;

    Ok(HttpResponse::Ok().json(timesheet))
}

/// Create timesheet
#[utoipa::path(
    post,
    path = "/timesheets",
    request_body(content = TimesheetInput, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirects to the timesheet listing"),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "errors": { "time_validation": "Start time must be before end time" }
        }))
    ),
    tag = "Timesheet"
)]
pub async fn create_timesheet(
    pool: web::Data<SqlitePool>,
    form: web::Form<TimesheetInput>,
) -> Result<HttpResponse, AppError> {
    let id = create_timesheet_record(pool.get_ref(), &form).await?;

    debug!(id, "Timesheet created");

    Ok(see_other("/timesheets"))
}

/// Update timesheet
#[utoipa::path(
    put,
    path = "/timesheets/{id}",
    params(("id", Path, description = "Timesheet ID")),
    request_body(content = TimesheetInput, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirects to the timesheet detail view"),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Timesheet not found", body = Object, example = json!({
            "message": "Timesheet not found"
        }))
    ),
    tag = "Timesheet"
)]
pub async fn update_timesheet(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    form: web::Form<TimesheetInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    update_timesheet_record(pool.get_ref(), id, &form).await?;

    debug!(id, "Timesheet updated");

    Ok(see_other(&format!("/timesheets/{id}")))
}

/// Delete timesheet
#[utoipa::path(
    delete,
    path = "/timesheets/{id}",
    params(("id", Path, description = "Timesheet ID")),
    responses(
        (status = 303, description = "Deleted (or already absent); redirects to the listing")
    ),
    tag = "Timesheet"
)]
pub async fn delete_timesheet(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    delete_timesheet_record(pool.get_ref(), id).await?;

    debug!(id, "Timesheet deleted");

    Ok(see_other("/timesheets"))
}
