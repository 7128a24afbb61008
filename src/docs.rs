use crate::api::employee::{EmployeeForm, EmployeeListResponse};
use crate::api::timesheet::{TimesheetInput, TimesheetListResponse};
use crate::model::employee::{Employee, EmployeeOption};
use crate::model::timesheet::TimesheetWithEmployee;
use crate::view::{SortField, SortOrder};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Timesheet Manager API",
        version = "1.0.0",
        description = r#"
## Employee & Timesheet Record Manager

This API manages **employee records** and their **logged working time**.

### Key Features
- **Employee Management**
  - Create, update, list, view, and delete employee records
  - Photo and document attachments (local disk or hosted)
  - Search, department and salary filters, sorting, pagination
- **Timesheet Management**
  - Log worked intervals against an employee
  - Calendar/table friendly listing joined with employee names

### Response Format
- JSON-based RESTful responses
- Successful form submissions answer **303 See Other** back to the listing
- Validation failures answer **400** with per-field error objects

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::employee_options,
        crate::api::employee::get_employee,
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::timesheet::list_timesheets,
        crate::api::timesheet::get_timesheet,
        crate::api::timesheet::create_timesheet,
        crate::api::timesheet::update_timesheet,
        crate::api::timesheet::delete_timesheet
    ),
    components(
        schemas(
            Employee,
            EmployeeOption,
            EmployeeForm,
            EmployeeListResponse,
            TimesheetWithEmployee,
            TimesheetInput,
            TimesheetListResponse,
            SortField,
            SortOrder
        )
    ),
    tags(
        (name = "Employee", description = "Employee record APIs"),
        (name = "Timesheet", description = "Timesheet record APIs"),
    )
)]
pub struct ApiDoc;
