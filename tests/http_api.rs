//! End-to-end HTTP behavior: multipart form handling, redirect-on-success,
//! error body shapes, and the browsing query surface.

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};
use std::net::SocketAddr;

use timesheet_manager::api::timesheet::TimesheetInput;
use timesheet_manager::config::Config;
use timesheet_manager::db::init_db;
use timesheet_manager::routes;
use timesheet_manager::upload::{AttachmentStore, UploadMode};

const BOUNDARY: &str = "form-boundary";

fn test_config() -> Config {
    Config {
        server_addr: "127.0.0.1:0".to_string(),
        database_url: "sqlite::memory:".to_string(),
        upload_mode: UploadMode::Local,
        upload_dir: String::new(),
        imgur_client_id: String::new(),
        // High enough that no test trips the limiter.
        rate_limit_per_min: 600,
    }
}

// The rate limiter keys on the peer IP, so every test request carries one.
fn peer() -> SocketAddr {
    "127.0.0.1:9000".parse().unwrap()
}

fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, file_name, data) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn with_multipart(
    req: test::TestRequest,
    fields: &[(&str, &str)],
    files: &[(&str, &str, &[u8])],
) -> test::TestRequest {
    req.peer_addr(peer())
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body(fields, files))
}

fn employee_fields(
    name: &'static str,
    department: &'static str,
    salary: &'static str,
) -> Vec<(&'static str, &'static str)> {
    vec![
        ("full_name", name),
        ("email", "someone@example.com"),
        ("phone", "1234567890"),
        ("date_of_birth", "1990-01-01"),
        ("job_title", "Software Engineer"),
        ("department", department),
        ("salary", salary),
        ("start_date", "2020-01-01"),
    ]
}

fn location(resp: &actix_web::dev::ServiceResponse) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

macro_rules! app {
    ($pool:expr, $store:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool.clone()))
                .app_data(web::Data::new($store))
                .configure(|cfg| routes::configure(cfg, test_config())),
        )
        .await
    };
}

#[actix_web::test]
async fn creating_an_employee_redirects_to_the_listing() {
    let pool = init_db("sqlite::memory:").await;
    let dir = tempfile::tempdir().unwrap();
    let app = app!(pool, AttachmentStore::local(dir.path()));

    let req = with_multipart(
        test::TestRequest::post().uri("/employees"),
        &employee_fields("John Doe", "Engineering", "6000"),
        &[],
    )
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/employees");

    let req = test::TestRequest::get()
        .uri("/employees")
        .peer_addr(peer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], json!(1));
    assert_eq!(body["data"][0]["full_name"], json!("John Doe"));
    assert_eq!(body["data"][0]["salary"], json!(6000.0));
}

#[actix_web::test]
async fn underage_submissions_get_a_field_keyed_error() {
    let pool = init_db("sqlite::memory:").await;
    let dir = tempfile::tempdir().unwrap();
    let app = app!(pool, AttachmentStore::local(dir.path()));

    let mut fields = employee_fields("Too Young", "Engineering", "6000");
    fields[3] = ("date_of_birth", "2010-01-01");

    let req = with_multipart(test::TestRequest::post().uri("/employees"), &fields, &[]).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "errors": { "date_of_birth": "Employee must be at least 18 years old." } })
    );
}

#[actix_web::test]
async fn missing_required_fields_come_back_as_one_message() {
    let pool = init_db("sqlite::memory:").await;
    let dir = tempfile::tempdir().unwrap();
    let app = app!(pool, AttachmentStore::local(dir.path()));

    // Only a name and a start date; everything else is absent.
    let fields = [("full_name", "John Doe"), ("start_date", "2020-01-01")];

    let req = with_multipart(test::TestRequest::post().uri("/employees"), &fields, &[]).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "message": "Missing required fields: email, phone, date_of_birth, job_title, department, salary"
        })
    );
}

#[actix_web::test]
async fn malformed_dates_are_field_keyed_errors() {
    let pool = init_db("sqlite::memory:").await;
    let dir = tempfile::tempdir().unwrap();
    let app = app!(pool, AttachmentStore::local(dir.path()));

    let mut fields = employee_fields("John Doe", "Engineering", "6000");
    fields[3] = ("date_of_birth", "01/01/1990");

    let req = with_multipart(test::TestRequest::post().uri("/employees"), &fields, &[]).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "errors": { "date_of_birth": "date_of_birth must be a date in YYYY-MM-DD form" } })
    );
}

#[actix_web::test]
async fn unknown_employees_are_not_found() {
    let pool = init_db("sqlite::memory:").await;
    let dir = tempfile::tempdir().unwrap();
    let app = app!(pool, AttachmentStore::local(dir.path()));

    let req = test::TestRequest::get()
        .uri("/employees/42")
        .peer_addr(peer())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Employee not found" }));
}

#[actix_web::test]
async fn options_endpoint_feeds_the_picker() {
    let pool = init_db("sqlite::memory:").await;
    let dir = tempfile::tempdir().unwrap();
    let app = app!(pool, AttachmentStore::local(dir.path()));

    let req = with_multipart(
        test::TestRequest::post().uri("/employees"),
        &employee_fields("John Doe", "Engineering", "6000"),
        &[],
    )
    .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/employees/options")
        .peer_addr(peer())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([{ "id": 1, "full_name": "John Doe" }]));
}

#[actix_web::test]
async fn listing_applies_filters_and_sort_order() {
    let pool = init_db("sqlite::memory:").await;
    let dir = tempfile::tempdir().unwrap();
    let app = app!(pool, AttachmentStore::local(dir.path()));

    for fields in [
        employee_fields("John Doe", "Engineering", "6000"),
        employee_fields("Jane Smith", "Product", "7500"),
        employee_fields("Brayden Watkins", "Engineering", "7000"),
    ] {
        let req =
            with_multipart(test::TestRequest::post().uri("/employees"), &fields, &[]).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    }

    let req = test::TestRequest::get()
        .uri("/employees?department=Engineering&sort=salary&order=desc")
        .peer_addr(peer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], json!(2));
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["full_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Brayden Watkins", "John Doe"]);
}

#[actix_web::test]
async fn listing_defaults_to_five_per_page() {
    let pool = init_db("sqlite::memory:").await;
    let dir = tempfile::tempdir().unwrap();
    let app = app!(pool, AttachmentStore::local(dir.path()));

    for name in [
        "John Doe",
        "Jane Smith",
        "Alice Johnson",
        "Brayden Watkins",
        "Leta Nelson",
        "Scott George",
    ] {
        let req = with_multipart(
            test::TestRequest::post().uri("/employees"),
            &employee_fields(name, "Engineering", "6000"),
            &[],
        )
        .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get()
        .uri("/employees")
        .peer_addr(peer())
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["total"], json!(6));
    assert_eq!(body["total_pages"], json!(2));

    let req = test::TestRequest::get()
        .uri("/employees?page=2")
        .peer_addr(peer())
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["full_name"], json!("Scott George"));
}

#[actix_web::test]
async fn put_replaces_the_record_and_redirects_to_its_detail_view() {
    let pool = init_db("sqlite::memory:").await;
    let dir = tempfile::tempdir().unwrap();
    let app = app!(pool, AttachmentStore::local(dir.path()));

    let req = with_multipart(
        test::TestRequest::post().uri("/employees"),
        &employee_fields("John Doe", "Engineering", "6000"),
        &[],
    )
    .to_request();
    test::call_service(&app, req).await;

    let mut fields = employee_fields("John Doe", "Engineering", "6500");
    fields[4] = ("job_title", "Staff Engineer");
    let req = with_multipart(
        test::TestRequest::put().uri("/employees/1"),
        &fields,
        &[("photo_file", "avatar.png", b"png-bytes".as_slice())],
    )
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/employees/1");

    let req = test::TestRequest::get()
        .uri("/employees/1")
        .peer_addr(peer())
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["job_title"], json!("Staff Engineer"));
    assert_eq!(body["salary"], json!(6500.0));
    let photo = body["photo_path"].as_str().unwrap();
    assert!(photo.starts_with("/uploads/photos/"));
    assert!(photo.ends_with("_avatar.png"));
}

#[actix_web::test]
async fn deleting_an_employee_hides_but_keeps_its_timesheets() {
    let pool = init_db("sqlite::memory:").await;
    let dir = tempfile::tempdir().unwrap();
    let app = app!(pool, AttachmentStore::local(dir.path()));

    let req = with_multipart(
        test::TestRequest::post().uri("/employees"),
        &employee_fields("John Doe", "Engineering", "6000"),
        &[],
    )
    .to_request();
    test::call_service(&app, req).await;

    let input = TimesheetInput {
        employee_id: 1,
        start_time: "2025-06-23T08:00".to_string(),
        end_time: "2025-06-23T17:00".to_string(),
        summary: None,
    };
    let req = test::TestRequest::post()
        .uri("/timesheets")
        .peer_addr(peer())
        .set_form(&input)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let req = test::TestRequest::delete()
        .uri("/employees/1")
        .peer_addr(peer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/employees");

    let req = test::TestRequest::get()
        .uri("/employees/1")
        .peer_addr(peer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // The orphaned row survives in storage but drops out of the joined listing.
    let remaining = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM timesheets")
        .fetch_one(&pool)
        .await
        .unwrap()
        .0;
    assert_eq!(remaining, 1);

    let req = test::TestRequest::get()
        .uri("/timesheets")
        .peer_addr(peer())
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["total"], json!(0));
}

#[actix_web::test]
async fn timesheet_create_normalizes_times_and_joins_names() {
    let pool = init_db("sqlite::memory:").await;
    let dir = tempfile::tempdir().unwrap();
    let app = app!(pool, AttachmentStore::local(dir.path()));

    let req = with_multipart(
        test::TestRequest::post().uri("/employees"),
        &employee_fields("John Doe", "Engineering", "6000"),
        &[],
    )
    .to_request();
    test::call_service(&app, req).await;

    let input = TimesheetInput {
        employee_id: 1,
        start_time: "2025-06-23T08:00".to_string(),
        end_time: "2025-06-23T17:00".to_string(),
        summary: Some("Worked on user authentication".to_string()),
    };
    let req = test::TestRequest::post()
        .uri("/timesheets")
        .peer_addr(peer())
        .set_form(&input)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/timesheets");

    let req = test::TestRequest::get()
        .uri("/timesheets")
        .peer_addr(peer())
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["total"], json!(1));
    assert_eq!(body["data"][0]["full_name"], json!("John Doe"));
    assert_eq!(body["data"][0]["start_time"], json!("2025-06-23 08:00:00"));
    assert_eq!(body["data"][0]["end_time"], json!("2025-06-23 17:00:00"));
}

#[actix_web::test]
async fn inverted_timesheet_intervals_get_a_field_keyed_error() {
    let pool = init_db("sqlite::memory:").await;
    let dir = tempfile::tempdir().unwrap();
    let app = app!(pool, AttachmentStore::local(dir.path()));

    let input = TimesheetInput {
        employee_id: 1,
        start_time: "2025-06-23T17:00".to_string(),
        end_time: "2025-06-23T17:00".to_string(),
        summary: None,
    };
    let req = test::TestRequest::post()
        .uri("/timesheets")
        .peer_addr(peer())
        .set_form(&input)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "errors": { "time_validation": "Start time must be before end time" } })
    );
}

#[actix_web::test]
async fn timesheet_listing_filters_on_exact_employee_name() {
    let pool = init_db("sqlite::memory:").await;
    let dir = tempfile::tempdir().unwrap();
    let app = app!(pool, AttachmentStore::local(dir.path()));

    for fields in [
        employee_fields("John Doe", "Engineering", "6000"),
        employee_fields("Jane Smith", "Product", "7500"),
    ] {
        let req =
            with_multipart(test::TestRequest::post().uri("/employees"), &fields, &[]).to_request();
        test::call_service(&app, req).await;
    }
    for employee_id in [1, 2] {
        let input = TimesheetInput {
            employee_id,
            start_time: "2025-06-23T08:00".to_string(),
            end_time: "2025-06-23T17:00".to_string(),
            summary: None,
        };
        let req = test::TestRequest::post()
            .uri("/timesheets")
            .peer_addr(peer())
            .set_form(&input)
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get()
        .uri("/timesheets?employee=Jane%20Smith")
        .peer_addr(peer())
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["total"], json!(1));
    assert_eq!(body["data"][0]["employee_id"], json!(2));

    // A prefix is not a match; the filter wants the whole display name.
    let req = test::TestRequest::get()
        .uri("/timesheets?employee=Jane")
        .peer_addr(peer())
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["total"], json!(0));
}

#[actix_web::test]
async fn timesheet_update_redirects_to_its_detail_view() {
    let pool = init_db("sqlite::memory:").await;
    let dir = tempfile::tempdir().unwrap();
    let app = app!(pool, AttachmentStore::local(dir.path()));

    let req = with_multipart(
        test::TestRequest::post().uri("/employees"),
        &employee_fields("John Doe", "Engineering", "6000"),
        &[],
    )
    .to_request();
    test::call_service(&app, req).await;

    let input = TimesheetInput {
        employee_id: 1,
        start_time: "2025-06-23T08:00".to_string(),
        end_time: "2025-06-23T17:00".to_string(),
        summary: Some("Morning shift".to_string()),
    };
    let req = test::TestRequest::post()
        .uri("/timesheets")
        .peer_addr(peer())
        .set_form(&input)
        .to_request();
    test::call_service(&app, req).await;

    let replacement = TimesheetInput {
        employee_id: 1,
        start_time: "2025-06-23T13:00".to_string(),
        end_time: "2025-06-23T18:00".to_string(),
        summary: None,
    };
    let req = test::TestRequest::put()
        .uri("/timesheets/1")
        .peer_addr(peer())
        .set_form(&replacement)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/timesheets/1");

    let req = test::TestRequest::get()
        .uri("/timesheets/1")
        .peer_addr(peer())
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["start_time"], json!("2025-06-23 13:00:00"));
    assert_eq!(body["summary"], json!(null));
}

#[actix_web::test]
async fn unknown_timesheets_are_not_found() {
    let pool = init_db("sqlite::memory:").await;
    let dir = tempfile::tempdir().unwrap();
    let app = app!(pool, AttachmentStore::local(dir.path()));

    let req = test::TestRequest::get()
        .uri("/timesheets/7")
        .peer_addr(peer())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Timesheet not found" }));
}
