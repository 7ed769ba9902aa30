use actix_web::{HttpRequest, HttpResponse, http::header, web};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};

use crate::auth::middleware::AuthenticatedUser;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::supabase::{SupabaseClient, storage_path};
use crate::validation::file::{MAX_FILE_SIZE, essence};
use crate::validation::{FileDescriptor, FileRejection, check_file, partition_files};

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub file_name: String,
}

#[derive(Debug, Serialize)]
struct RejectedFile {
    message: String,
    #[serde(flatten)]
    rejection: FileRejection,
}

#[derive(Debug, Serialize)]
struct CheckResponse {
    accepted: Vec<FileDescriptor>,
    rejected: Vec<RejectedFile>,
}

#[derive(Debug, Serialize)]
struct UploadResponse {
    url: String,
    path: String,
}

/// POST /api/uploads/check — vet a selection before uploading anything.
/// Rejected files are reported and left out of the batch.
pub async fn check_files(
    _user: AuthenticatedUser,
    body: web::Json<Vec<FileDescriptor>>,
) -> HttpResponse {
    let (accepted, rejected) = partition_files(body.into_inner());
    let rejected = rejected
        .into_iter()
        .map(|rejection| RejectedFile {
            message: rejection.to_string(),
            rejection,
        })
        .collect();

    HttpResponse::Ok().json(CheckResponse { accepted, rejected })
}

/// POST /api/uploads?file_name=… — upload one file to the caller's folder.
///
/// The type comes from `Content-Type`; the size is enforced while the
/// body streams in, so an oversized file is refused without buffering it.
pub async fn upload_file(
    user: AuthenticatedUser,
    supabase: web::Data<SupabaseClient>,
    config: web::Data<AppConfig>,
    req: HttpRequest,
    query: web::Query<UploadQuery>,
    mut payload: web::Payload,
) -> Result<HttpResponse, ApiError> {
    let name = query.file_name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::BadRequest("file_name is required".to_string()));
    }

    let mime_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let declared_size = req
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);

    check_file(&FileDescriptor {
        name: name.clone(),
        mime_type: mime_type.clone(),
        size: declared_size,
    })?;

    let mut bytes: Vec<u8> = Vec::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| ApiError::BadRequest(format!("Upload interrupted: {e}")))?;
        let size = (bytes.len() + chunk.len()) as u64;
        if size > MAX_FILE_SIZE {
            return Err(FileRejection::TooLarge { name, size }.into());
        }
        bytes.extend_from_slice(&chunk);
    }
    if bytes.is_empty() {
        return Err(ApiError::BadRequest(format!("{name} is empty")));
    }

    let path = storage_path(user.id(), &name);
    let url = supabase
        .upload_file(
            &user.access_token,
            &config.storage_bucket,
            &path,
            &essence(&mime_type),
            bytes,
        )
        .await?;

    tracing::info!(user_id = %user.id(), %path, "file uploaded");
    Ok(HttpResponse::Created().json(UploadResponse { url, path }))
}
