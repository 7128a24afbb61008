//! Attachment storage behind a single `store` call. Local mode writes under
//! the upload root; hosted mode forwards photos to Imgur and documents to
//! Catbox. Which mode runs is a deployment decision made once at startup.

use actix_multipart::form::bytes::Bytes as MultipartBytes;
use actix_web::web::Bytes;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use strum_macros::{Display, EnumString};
use thiserror::Error;
use tracing::info;

use crate::config::Config;

const IMGUR_UPLOAD_URL: &str = "https://api.imgur.com/3/image";
const CATBOX_UPLOAD_URL: &str = "https://catbox.moe/user/api.php";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum UploadMode {
    Local,
    Hosted,
}

/// What kind of attachment is being stored; picks the directory in local
/// mode and the hosting service in hosted mode.
#[derive(Debug, Clone, Copy)]
pub enum Category {
    Photo,
    Document,
}

impl Category {
    fn dir(self) -> &'static str {
        match self {
            Category::Photo => "photos",
            Category::Document => "docs",
        }
    }
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    #[error("{service} rejected the upload: {detail}")]
    Rejected {
        service: &'static str,
        detail: String,
    },
    #[error("IMGUR_CLIENT_ID is not set")]
    MissingCredentials,
}

/// An uploaded file pulled out of a multipart field.
#[derive(Debug, Clone)]
pub struct UploadBlob {
    pub file_name: String,
    pub data: Bytes,
}

impl UploadBlob {
    /// A file input submitted with nothing selected still arrives as a
    /// field, just with an empty filename. Treat that as "no file".
    pub fn from_field(field: Option<&MultipartBytes>) -> Option<UploadBlob> {
        let field = field?;
        let name = field.file_name.as_deref()?.trim();
        if name.is_empty() {
            return None;
        }
        Some(UploadBlob {
            file_name: name.to_string(),
            data: field.data.clone(),
        })
    }
}

#[derive(Clone)]
pub struct AttachmentStore {
    mode: UploadMode,
    root: PathBuf,
    imgur_client_id: String,
    http: reqwest::Client,
}

impl AttachmentStore {
    pub fn from_config(config: &Config) -> Self {
        Self {
            mode: config.upload_mode,
            root: PathBuf::from(&config.upload_dir),
            imgur_client_id: config.imgur_client_id.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// Local-disk store rooted at `root`.
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self {
            mode: UploadMode::Local,
            root: root.into(),
            imgur_client_id: String::new(),
            http: reqwest::Client::new(),
        }
    }

    /// Store `blob` and return the opaque reference persisted on the
    /// employee row: a local `/uploads/...` path or a hosted URL.
    pub async fn store(&self, blob: &UploadBlob, category: Category) -> Result<String, UploadError> {
        let reference = match self.mode {
            UploadMode::Local => self.store_local(blob, category)?,
            UploadMode::Hosted => match category {
                Category::Photo => self.upload_imgur(blob).await?,
                Category::Document => self.upload_catbox(blob).await?,
            },
        };
        info!(file = %blob.file_name, reference = %reference, "Stored attachment");
        Ok(reference)
    }

    fn store_local(&self, blob: &UploadBlob, category: Category) -> Result<String, UploadError> {
        let dir = self.root.join("uploads").join(category.dir());
        fs::create_dir_all(&dir).map_err(|e| UploadError::Write {
            path: dir.clone(),
            source: e,
        })?;

        let name = format!(
            "{}_{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(&blob.file_name)
        );
        let dest = dir.join(&name);
        fs::write(&dest, &blob.data).map_err(|e| UploadError::Write {
            path: dest.clone(),
            source: e,
        })?;

        Ok(format!("/uploads/{}/{}", category.dir(), name))
    }

    /// Imgur wants the image as a base64 form field with a Client-ID header;
    /// the share link comes back in the JSON body.
    async fn upload_imgur(&self, blob: &UploadBlob) -> Result<String, UploadError> {
        if self.imgur_client_id.is_empty() {
            return Err(UploadError::MissingCredentials);
        }

        let encoded = STANDARD.encode(&blob.data);
        let form = reqwest::multipart::Form::new()
            .text("image", encoded)
            .text("type", "base64");

        let response = self
            .http
            .post(IMGUR_UPLOAD_URL)
            .header(
                "Authorization",
                format!("Client-ID {}", self.imgur_client_id),
            )
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let body: ImgurResponse = response.json().await?;
        Ok(body.data.link)
    }

    /// Catbox takes a plain multipart file part and answers with the share
    /// URL as text; anything that is not an https URL is a failure.
    async fn upload_catbox(&self, blob: &UploadBlob) -> Result<String, UploadError> {
        let part = reqwest::multipart::Part::bytes(blob.data.to_vec())
            .file_name(blob.file_name.clone())
            .mime_str("application/octet-stream")?;
        let form = reqwest::multipart::Form::new()
            .text("reqtype", "fileupload")
            .part("fileToUpload", part);

        let response = self.http.post(CATBOX_UPLOAD_URL).multipart(form).send().await?;
        if !response.status().is_success() {
            return Err(UploadError::Rejected {
                service: "catbox",
                detail: response.status().to_string(),
            });
        }

        catbox_link(response.text().await?)
    }
}

// Catbox answers with the bare share URL as text; anything else in the body
// is an error message.
fn catbox_link(body: String) -> Result<String, UploadError> {
    let link = body.trim();
    if link.starts_with("https://") {
        Ok(link.to_string())
    } else {
        Err(UploadError::Rejected {
            service: "catbox",
            detail: body,
        })
    }
}

// The client-supplied name becomes part of a filesystem path; keep it to a
// single component.
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect()
}

#[derive(Deserialize)]
struct ImgurResponse {
    data: ImgurImage,
}

#[derive(Deserialize)]
struct ImgurImage {
    link: String,
}
