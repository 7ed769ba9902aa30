use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 10 MiB.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "video/mp4",
    "video/webm",
    "application/pdf",
];

/// What the checker needs to know about a candidate upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FileRejection {
    #[error("{name}: {mime_type} files are not supported. Upload an image, an MP4/WebM video or a PDF")]
    UnsupportedType { name: String, mime_type: String },
    #[error("{name} is too large. Files must be 10 MB or smaller")]
    TooLarge { name: String, size: u64 },
}

impl FileRejection {
    pub fn file_name(&self) -> &str {
        match self {
            FileRejection::UnsupportedType { name, .. } | FileRejection::TooLarge { name, .. } => {
                name
            }
        }
    }
}

/// Strip parameters (`; charset=...`) and normalize case.
pub fn essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

pub fn is_allowed_type(mime_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&essence(mime_type).as_str())
}

/// Accept or reject a single file. Type is checked before size.
pub fn check_file(file: &FileDescriptor) -> Result<(), FileRejection> {
    if !is_allowed_type(&file.mime_type) {
        return Err(FileRejection::UnsupportedType {
            name: file.name.clone(),
            mime_type: file.mime_type.clone(),
        });
    }
    if file.size > MAX_FILE_SIZE {
        return Err(FileRejection::TooLarge {
            name: file.name.clone(),
            size: file.size,
        });
    }
    Ok(())
}

/// Split a selection into the files that may be uploaded and the reasons
/// the rest were dropped. Order is preserved on both sides.
pub fn partition_files(files: Vec<FileDescriptor>) -> (Vec<FileDescriptor>, Vec<FileRejection>) {
    let mut accepted = Vec::with_capacity(files.len());
    let mut rejected = Vec::new();
    for file in files {
        match check_file(&file) {
            Ok(()) => accepted.push(file),
            Err(reason) => rejected.push(reason),
        }
    }
    (accepted, rejected)
}
