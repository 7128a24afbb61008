use actix_multipart::form::MultipartFormConfig;
use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;

use timesheet_manager::config::Config;
use timesheet_manager::db::init_db;
use timesheet_manager::docs::ApiDoc;
use timesheet_manager::routes;
use timesheet_manager::upload::AttachmentStore;

use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Uploaded files are buffered in memory before the store sees them.
const UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[get("/")]
async fn index() -> impl Responder {
    "Timesheet Manager"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url).await;
    let store = AttachmentStore::from_config(&config);

    // Clone values for the closure (avoid move issues)
    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(store.clone()))
            .app_data(
                MultipartFormConfig::default()
                    .memory_limit(UPLOAD_LIMIT_BYTES)
                    .total_limit(UPLOAD_LIMIT_BYTES),
            )
            .service(index)
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
