use crate::upload::UploadMode;
use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,

    // Attachment storage
    pub upload_mode: UploadMode,
    pub upload_dir: String,
    pub imgur_client_id: String,

    // Rate limiting
    pub rate_limit_per_min: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),

            upload_mode: env::var("UPLOAD_MODE")
                .unwrap_or_else(|_| "local".to_string())
                .parse()
                .expect("UPLOAD_MODE must be 'local' or 'hosted'"),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "public".to_string()),
            // Only needed in hosted mode; checked when a photo is stored.
            imgur_client_id: env::var("IMGUR_CLIENT_ID").unwrap_or_default(),

            rate_limit_per_min: env::var("RATE_LIMIT_PER_MIN")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap(),
        }
    }
}
