use crate::{
    api::see_other,
    error::{AppError, ValidationError},
    model::employee::{Employee, EmployeeFields, EmployeeOption},
    upload::{AttachmentStore, Category, UploadBlob},
    validate,
    view::{self, EmployeeView, SortField, SortOrder},
};
use actix_multipart::form::{MultipartForm, bytes::Bytes as MultipartBytes, text::Text};
use actix_web::{HttpResponse, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

/// Employee form as the browser submits it: every value a string, files as
/// optional parts. Parsing into typed values happens in the validation pass.
#[derive(Debug, MultipartForm, ToSchema)]
pub struct EmployeeForm {
    #[schema(value_type = Option<String>, example = "John Doe")]
    pub full_name: Option<Text<String>>,
    #[schema(value_type = Option<String>, example = "john.doe@example.com")]
    pub email: Option<Text<String>>,
    #[schema(value_type = Option<String>, example = "1234567890")]
    pub phone: Option<Text<String>>,
    #[schema(value_type = Option<String>, example = "1990-01-01")]
    pub date_of_birth: Option<Text<String>>,
    #[schema(value_type = Option<String>, example = "Software Engineer")]
    pub job_title: Option<Text<String>>,
    #[schema(value_type = Option<String>, example = "Engineering")]
    pub department: Option<Text<String>>,
    #[schema(value_type = Option<String>, example = "6000")]
    pub salary: Option<Text<String>>,
    #[schema(value_type = Option<String>, example = "2020-01-01")]
    pub start_date: Option<Text<String>>,
    #[schema(value_type = Option<String>, example = "")]
    pub end_date: Option<Text<String>>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub photo_file: Option<MultipartBytes>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub doc_file: Option<MultipartBytes>,
}

impl From<&EmployeeForm> for EmployeeFields {
    fn from(form: &EmployeeForm) -> Self {
        fn text(value: &Option<Text<String>>) -> Option<String> {
            value.as_ref().map(|t| t.0.clone())
        }

        EmployeeFields {
            full_name: text(&form.full_name),
            email: text(&form.email),
            phone: text(&form.phone),
            date_of_birth: text(&form.date_of_birth),
            job_title: text(&form.job_title),
            department: text(&form.department),
            salary: text(&form.salary),
            start_date: text(&form.start_date),
            end_date: text(&form.end_date),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EmployeeQuery {
    /// Case-insensitive name search
    pub search: Option<String>,
    /// Exact department match
    pub department: Option<String>,
    /// Salary ceiling; employees with no salary always pass
    pub max_salary: Option<f64>,
    pub sort: Option<SortField>,
    pub order: Option<SortOrder>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 5)]
    pub per_page: u32,
    #[schema(example = 12)]
    pub total: i64,
    #[schema(example = 3)]
    pub total_pages: u32,
}

/// Typed values produced by the validation pass; string columns are bound
/// from the raw field set as-is.
struct ParsedEmployee {
    date_of_birth: Option<NaiveDate>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    salary: Option<f64>,
}

/// The ordering is load-bearing: age, then date range, then (on creation)
/// the required-field sweep. All of it runs before any attachment I/O.
fn validate_employee(
    fields: &EmployeeFields,
    today: NaiveDate,
    require_all: bool,
) -> Result<ParsedEmployee, ValidationError> {
    let date_of_birth = validate::parse_date("date_of_birth", fields.date_of_birth.as_deref())?;
    if let Some(dob) = date_of_birth {
        validate::validate_age(dob, today)?;
    }

    let start_date = validate::parse_date("start_date", fields.start_date.as_deref())?;
    let end_date = validate::parse_date("end_date", fields.end_date.as_deref())?;
    validate::validate_date_range(start_date, end_date)?;

    if require_all {
        validate::validate_required_fields(&fields.required_pairs())?;
    }

    let salary = match fields.salary.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(validate::parse_salary(raw)?),
    };

    Ok(ParsedEmployee {
        date_of_birth,
        start_date,
        end_date,
        salary,
    })
}

/// Validate, store any attachments, insert. Returns the new row id.
pub async fn create_employee_record(
    pool: &SqlitePool,
    store: &AttachmentStore,
    fields: &EmployeeFields,
    photo: Option<UploadBlob>,
    document: Option<UploadBlob>,
    today: NaiveDate,
) -> Result<i64, AppError> {
    let parsed = validate_employee(fields, today, true)?;

    // Field checks all passed; attachments may hit disk or the network now.
    let mut photo_path = None;
    if let Some(blob) = &photo {
        photo_path = Some(store.store(blob, Category::Photo).await?);
    }
    let mut document_path = None;
    if let Some(blob) = &document {
        document_path = Some(store.store(blob, Category::Document).await?);
    }

    let result = sqlx::query(
        r#"
        INSERT INTO employees (
            full_name, email, phone, date_of_birth,
            job_title, department, salary, start_date, end_date,
            photo_path, document_path
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&fields.full_name)
    .bind(&fields.email)
    .bind(&fields.phone)
    .bind(parsed.date_of_birth)
    .bind(&fields.job_title)
    .bind(&fields.department)
    .bind(parsed.salary)
    .bind(parsed.start_date)
    .bind(parsed.end_date)
    .bind(&photo_path)
    .bind(&document_path)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Full-record replacement. A newly uploaded file replaces the stored
/// reference; otherwise the prior reference is carried over. Unlike
/// creation there is no required-field sweep, so absent optional fields
/// become NULL.
pub async fn update_employee_record(
    pool: &SqlitePool,
    store: &AttachmentStore,
    id: i64,
    fields: &EmployeeFields,
    photo: Option<UploadBlob>,
    document: Option<UploadBlob>,
    today: NaiveDate,
) -> Result<(), AppError> {
    let existing = sqlx::query_as::<_, (Option<String>, Option<String>)>(
        "SELECT photo_path, document_path FROM employees WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound("Employee"))?;

    let parsed = validate_employee(fields, today, false)?;

    let (mut photo_path, mut document_path) = existing;
    if let Some(blob) = &photo {
        photo_path = Some(store.store(blob, Category::Photo).await?);
    }
    if let Some(blob) = &document {
        document_path = Some(store.store(blob, Category::Document).await?);
    }

    sqlx::query(
        r#"
        UPDATE employees SET
            full_name = ?, email = ?, phone = ?, date_of_birth = ?,
            job_title = ?, department = ?, salary = ?, start_date = ?, end_date = ?,
            photo_path = ?, document_path = ?
        WHERE id = ?
        "#,
    )
    .bind(&fields.full_name)
    .bind(&fields.email)
    .bind(&fields.phone)
    .bind(parsed.date_of_birth)
    .bind(&fields.job_title)
    .bind(&fields.department)
    .bind(parsed.salary)
    .bind(parsed.start_date)
    .bind(parsed.end_date)
    .bind(&photo_path)
    .bind(&document_path)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Unconditional removal. Timesheets referencing the employee are left in
/// place; their link is a soft reference.
pub async fn delete_employee_record(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

// -------------------- Handlers --------------------

/// List employees
#[utoipa::path(
    get,
    path = "/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Filtered, sorted, paginated employee list", body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, AppError> {
    let employees = sqlx::query_as::<_, Employee>("SELECT * FROM employees")
        .fetch_all(pool.get_ref())
        .await?;

    debug!(loaded = employees.len(), "Shaping employee listing");

    let shaped = EmployeeView {
        search: query.search.clone(),
        department: query.department.clone(),
        max_salary: query.max_salary,
        sort: query.sort,
        order: query.order.unwrap_or_default(),
    }
    .apply(employees);

    let page = view::paginate(shaped, query.page, query.per_page);

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        data: page.data,
        page: page.page,
        per_page: page.per_page,
        total: page.total,
        total_pages: page.total_pages,
    }))
}

/// Employee picker options
#[utoipa::path(
    get,
    path = "/employees/options",
    responses(
        (status = 200, description = "Id and display name of every employee", body = [EmployeeOption])
    ),
    tag = "Employee"
)]
pub async fn employee_options(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let options = sqlx::query_as::<_, EmployeeOption>("SELECT id, full_name FROM employees")
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(options))
}

/// Get employee by id
#[utoipa::path(
    get,
    path = "/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or(AppError::NotFound("Employee"))?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Create employee
#[utoipa::path(
    post,
    path = "/employees",
    request_body(content = EmployeeForm, content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "Created; redirects to the employee listing"),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "errors": { "date_of_birth": "Employee must be at least 18 years old." }
        })),
        (status = 500, description = "Attachment or storage failure", body = Object, example = json!({
            "error": "File upload failed. Please try again."
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    store: web::Data<AttachmentStore>,
    MultipartForm(form): MultipartForm<EmployeeForm>,
) -> Result<HttpResponse, AppError> {
    let fields = EmployeeFields::from(&form);
    let photo = UploadBlob::from_field(form.photo_file.as_ref());
    let document = UploadBlob::from_field(form.doc_file.as_ref());

    let id = create_employee_record(
        pool.get_ref(),
        store.get_ref(),
        &fields,
        photo,
        document,
        Utc::now().date_naive(),
    )
    .await?;

    debug!(id, "Employee created");

    Ok(see_other("/employees"))
}

/// Update employee
#[utoipa::path(
    put,
    path = "/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    request_body(content = EmployeeForm, content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "Updated; redirects to the employee detail view"),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<SqlitePool>,
    store: web::Data<AttachmentStore>,
    path: web::Path<i64>,
    MultipartForm(form): MultipartForm<EmployeeForm>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let fields = EmployeeFields::from(&form);
    let photo = UploadBlob::from_field(form.photo_file.as_ref());
    let document = UploadBlob::from_field(form.doc_file.as_ref());

    update_employee_record(
        pool.get_ref(),
        store.get_ref(),
        id,
        &fields,
        photo,
        document,
        Utc::now().date_naive(),
    )
    .await?;

    debug!(id, "Employee updated");

    Ok(see_other(&format!("/employees/{id}")))
}

/// Delete employee
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 303, description = "Deleted (or already absent); redirects to the listing")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    delete_employee_record(pool.get_ref(), id).await?;

    debug!(id, "Employee deleted");

    Ok(see_other("/employees"))
}
