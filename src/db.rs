use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

pub async fn init_db(database_url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(database_url)
        .expect("Invalid DATABASE_URL")
        .create_if_missing(true);

    // One connection: overlapping requests serialize on the storage engine,
    // and an in-memory database stays a single database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to connect to database");

    ensure_schema(&pool)
        .await
        .expect("Failed to create schema");

    pool
}

pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            date_of_birth TEXT NOT NULL,
            job_title TEXT NOT NULL,
            department TEXT NOT NULL,
            salary REAL,
            start_date TEXT NOT NULL,
            end_date TEXT,
            photo_path TEXT,
            document_path TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    // employee_id is a soft reference: no FK constraint, so deleting an
    // employee neither cascades to nor blocks on these rows.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS timesheets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id INTEGER NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            summary TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
