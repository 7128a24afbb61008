use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "full_name": "John Doe",
        "email": "john.doe@example.com",
        "phone": "1234567890",
        "date_of_birth": "1990-01-01",
        "job_title": "Software Engineer",
        "department": "Engineering",
        "salary": 6000,
        "start_date": "2020-01-01",
        "end_date": null,
        "photo_path": "/uploads/photos/john.jpg",
        "document_path": "/uploads/docs/john_cv.pdf"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "John Doe")]
    pub full_name: String,

    #[schema(example = "john.doe@example.com")]
    pub email: String,

    #[schema(example = "1234567890")]
    pub phone: String,

    #[schema(example = "1990-01-01", value_type = String, format = "date")]
    pub date_of_birth: NaiveDate,

    #[schema(example = "Software Engineer")]
    pub job_title: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = 6000.0, nullable = true)]
    pub salary: Option<f64>,

    #[schema(example = "2020-01-01", value_type = String, format = "date")]
    pub start_date: NaiveDate,

    /// Null means currently employed.
    #[schema(example = "2026-01-01", value_type = Option<String>, format = "date", nullable = true)]
    pub end_date: Option<NaiveDate>,

    #[schema(example = "/uploads/photos/john.jpg", nullable = true)]
    pub photo_path: Option<String>,

    #[schema(example = "/uploads/docs/john_cv.pdf", nullable = true)]
    pub document_path: Option<String>,
}

/// Slim projection for populating the timesheet employee picker.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct EmployeeOption {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "John Doe")]
    pub full_name: String,
}

/// Raw employee field set as submitted, before any parsing. Mutation paths
/// run this through the validation engine; absent optional fields are
/// written as NULL on update.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFields {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub salary: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl EmployeeFields {
    /// Fields that must be present on creation. end_date is the one
    /// optional column.
    pub fn required_pairs(&self) -> [(&'static str, Option<&str>); 8] {
        [
            ("full_name", self.full_name.as_deref()),
            ("email", self.email.as_deref()),
            ("phone", self.phone.as_deref()),
            ("date_of_birth", self.date_of_birth.as_deref()),
            ("job_title", self.job_title.as_deref()),
            ("department", self.department.as_deref()),
            ("salary", self.salary.as_deref()),
            ("start_date", self.start_date.as_deref()),
        ]
    }
}
