//! In-memory browsing over a loaded record set: conjunctive filters, a
//! stable null-last sort, and page slicing. The record services load full
//! sets and this module shapes them for the presentation layer.

use serde::Deserialize;
use std::cmp::Ordering;
use utoipa::ToSchema;

use crate::model::employee::Employee;

pub const DEFAULT_PER_PAGE: u32 = 5;
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    FullName,
    Email,
    Phone,
    DateOfBirth,
    JobTitle,
    Department,
    Salary,
    StartDate,
    EndDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Filter and sort configuration for the employee listing.
#[derive(Debug, Clone, Default)]
pub struct EmployeeView {
    pub search: Option<String>,
    pub department: Option<String>,
    pub max_salary: Option<f64>,
    pub sort: Option<SortField>,
    pub order: SortOrder,
}

impl EmployeeView {
    /// Filter, then sort. Filters are conjunctive. Rows with no value for
    /// the sort field go last whatever the direction, and ties keep their
    /// incoming order.
    pub fn apply(&self, employees: Vec<Employee>) -> Vec<Employee> {
        let search = self
            .search
            .as_deref()
            .map(str::to_lowercase)
            .filter(|s| !s.is_empty());
        let department = self.department.as_deref().filter(|d| !d.is_empty());

        let mut rows: Vec<Employee> = employees
            .into_iter()
            .filter(|employee| {
                let name_match = search
                    .as_deref()
                    .is_none_or(|term| employee.full_name.to_lowercase().contains(term));
                let department_match = department.is_none_or(|d| employee.department == d);
                // A missing salary is never filtered out by the ceiling.
                let salary_match = self
                    .max_salary
                    .is_none_or(|ceiling| employee.salary.is_none_or(|salary| salary <= ceiling));

                name_match && department_match && salary_match
            })
            .collect();

        if let Some(field) = self.sort {
            let descending = self.order == SortOrder::Desc;
            rows.sort_by(|a, b| match (sort_key(a, field), sort_key(b, field)) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(ka), Some(kb)) => {
                    let ord = ka.compare(&kb);
                    if descending { ord.reverse() } else { ord }
                }
            });
        }

        rows
    }
}

/// Sort keys: id and salary compare numerically, everything else by string
/// form. Dates in YYYY-MM-DD form order correctly as strings.
enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            // A single field never mixes key kinds; keep the order total anyway.
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

fn sort_key(employee: &Employee, field: SortField) -> Option<SortKey> {
    match field {
        SortField::Id => Some(SortKey::Number(employee.id as f64)),
        SortField::FullName => Some(SortKey::Text(employee.full_name.clone())),
        SortField::Email => Some(SortKey::Text(employee.email.clone())),
        SortField::Phone => Some(SortKey::Text(employee.phone.clone())),
        SortField::DateOfBirth => Some(SortKey::Text(employee.date_of_birth.to_string())),
        SortField::JobTitle => Some(SortKey::Text(employee.job_title.clone())),
        SortField::Department => Some(SortKey::Text(employee.department.clone())),
        SortField::Salary => employee.salary.map(SortKey::Number),
        SortField::StartDate => Some(SortKey::Text(employee.start_date.to_string())),
        SortField::EndDate => employee.end_date.map(|d| SortKey::Text(d.to_string())),
    }
}

/// One page of a shaped record set.
#[derive(Debug)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
    pub total_pages: u32,
}

/// Slice out one page. Out-of-range pages come back empty rather than
/// failing; an empty set still reports one page.
pub fn paginate<T>(rows: Vec<T>, page: Option<u32>, per_page: Option<u32>) -> Page<T> {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);

    let total = rows.len() as i64;
    let total_pages = (total as u32).div_ceil(per_page).max(1);

    // Widened so an absurd page number lands past the end instead of
    // overflowing the multiply.
    let skip = u64::from(page - 1).saturating_mul(u64::from(per_page));
    let data: Vec<T> = rows
        .into_iter()
        .skip(skip as usize)
        .take(per_page as usize)
        .collect();

    Page {
        data,
        page,
        per_page,
        total,
        total_pages,
    }
}
