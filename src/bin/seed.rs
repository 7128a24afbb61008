//! Seeds the database with sample employees and timesheets.
//!
//! Usage: `cargo run --bin seed` (reads DATABASE_URL from the environment).

use anyhow::Result;
use dotenvy::dotenv;
use std::env;

use timesheet_manager::db::init_db;

struct SeedEmployee {
    full_name: &'static str,
    email: &'static str,
    phone: &'static str,
    date_of_birth: &'static str,
    job_title: &'static str,
    department: &'static str,
    salary: f64,
    start_date: &'static str,
    photo_path: &'static str,
    document_path: &'static str,
}

const EMPLOYEES: [SeedEmployee; 6] = [
    SeedEmployee {
        full_name: "John Doe",
        email: "john.doe@example.com",
        phone: "1234567890",
        date_of_birth: "1990-01-01",
        job_title: "Software Engineer",
        department: "Engineering",
        salary: 6000.0,
        start_date: "2020-01-01",
        photo_path: "/uploads/photos/john.jpg",
        document_path: "/uploads/docs/john_cv.pdf",
    },
    SeedEmployee {
        full_name: "Jane Smith",
        email: "jane.smith@example.com",
        phone: "9876543210",
        date_of_birth: "1992-03-15",
        job_title: "Product Manager",
        department: "Product",
        salary: 7500.0,
        start_date: "2019-06-10",
        photo_path: "/uploads/photos/jane.jpg",
        document_path: "/uploads/docs/jane_cv.pdf",
    },
    SeedEmployee {
        full_name: "Alice Johnson",
        email: "alice.johnson@example.com",
        phone: "1234567890",
        date_of_birth: "1988-11-25",
        job_title: "Designer",
        department: "Design",
        salary: 5000.0,
        start_date: "2021-04-20",
        photo_path: "/uploads/photos/alice.jpg",
        document_path: "/uploads/docs/alice_cv.pdf",
    },
    SeedEmployee {
        full_name: "Brayden Watkins",
        email: "brayden.watkins@example.com",
        phone: "1234567890",
        date_of_birth: "1988-11-25",
        job_title: "Software Engineer",
        department: "Engineering",
        salary: 7000.0,
        start_date: "2021-06-20",
        photo_path: "/uploads/photos/brayden.jpg",
        document_path: "/uploads/docs/brayden_cv.pdf",
    },
    SeedEmployee {
        full_name: "Leta Nelson",
        email: "leta.nelson@example.com",
        phone: "1234567890",
        date_of_birth: "1998-11-25",
        job_title: "Product Manager",
        department: "Product",
        salary: 4000.0,
        start_date: "2021-05-20",
        photo_path: "/uploads/photos/leta.jpg",
        document_path: "/uploads/docs/leta_cv.pdf",
    },
    SeedEmployee {
        full_name: "Scott George",
        email: "scott.george@example.com",
        phone: "1234567890",
        date_of_birth: "1988-12-25",
        job_title: "Product Manager",
        department: "Product",
        salary: 8000.0,
        start_date: "2021-05-20",
        photo_path: "/uploads/photos/scott.jpg",
        document_path: "/uploads/docs/scott_cv.pdf",
    },
];

// (employee_id, start_time, end_time, summary)
const TIMESHEETS: [(i64, &str, &str, &str); 6] = [
    (
        1,
        "2025-06-23 08:00:00",
        "2025-06-23 17:00:00",
        "Worked on user authentication system and fixed login bugs",
    ),
    (
        2,
        "2025-06-23 17:00:00",
        "2025-06-23 22:00:00",
        "Product roadmap planning and stakeholder meetings",
    ),
    (
        3,
        "2025-06-24 08:00:00",
        "2025-06-24 17:00:00",
        "UI/UX design for new dashboard components",
    ),
    (
        4,
        "2025-06-24 17:00:00",
        "2025-06-24 22:00:00",
        "Code review and database optimization tasks",
    ),
    (
        5,
        "2025-06-25 08:00:00",
        "2025-06-25 17:00:00",
        "Market research and competitive analysis",
    ),
    (
        6,
        "2025-06-25 17:00:00",
        "2025-06-25 22:00:00",
        "Team management and sprint planning activities",
    ),
];

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = init_db(&database_url).await;

    for employee in &EMPLOYEES {
        sqlx::query(
            r#"
            INSERT INTO employees (
                full_name, email, phone, date_of_birth,
                job_title, department, salary, start_date, end_date,
                photo_path, document_path
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, NULL, ?, ?)
            "#,
        )
        .bind(employee.full_name)
        .bind(employee.email)
        .bind(employee.phone)
        .bind(employee.date_of_birth)
        .bind(employee.job_title)
        .bind(employee.department)
        .bind(employee.salary)
        .bind(employee.start_date)
        .bind(employee.photo_path)
        .bind(employee.document_path)
        .execute(&pool)
        .await?;
    }

    for (employee_id, start_time, end_time, summary) in TIMESHEETS {
        sqlx::query(
            "INSERT INTO timesheets (employee_id, start_time, end_time, summary) VALUES (?, ?, ?, ?)",
        )
        .bind(employee_id)
        .bind(start_time)
        .bind(end_time)
        .bind(summary)
        .execute(&pool)
        .await?;
    }

    println!("Database seeded successfully.");
    Ok(())
}
