use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Timesheet row joined with the owning employee's display name. Every read
/// path serves this shape; the employee link itself is soft, so a row whose
/// employee was deleted drops out of the join.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": 1,
        "start_time": "2025-06-23 08:00:00",
        "end_time": "2025-06-23 17:00:00",
        "summary": "Worked on user authentication system and fixed login bugs",
        "full_name": "John Doe"
    })
)]
pub struct TimesheetWithEmployee {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 1)]
    pub employee_id: i64,

    /// Canonical "YYYY-MM-DD HH:MM:SS" storage form.
    #[schema(example = "2025-06-23 08:00:00")]
    pub start_time: String,

    #[schema(example = "2025-06-23 17:00:00")]
    pub end_time: String,

    #[schema(example = "Worked on user authentication system", nullable = true)]
    pub summary: Option<String>,

    #[schema(example = "John Doe")]
    pub full_name: String,
}
