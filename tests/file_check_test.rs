//! File constraints checker.

use craftlink_backend::validation::file::{
    ALLOWED_MIME_TYPES, FileDescriptor, FileRejection, MAX_FILE_SIZE, check_file, essence,
    is_allowed_type, partition_files,
};

fn file(name: &str, mime_type: &str, size: u64) -> FileDescriptor {
    FileDescriptor {
        name: name.to_string(),
        mime_type: mime_type.to_string(),
        size,
    }
}

#[test]
fn test_ceiling_is_ten_mebibytes() {
    assert_eq!(MAX_FILE_SIZE, 10_485_760);
    assert!(check_file(&file("exact.png", "image/png", MAX_FILE_SIZE)).is_ok());
}

#[test]
fn test_oversized_image_is_rejected_for_size() {
    let rejection = check_file(&file("huge.jpg", "image/jpeg", 10_485_761)).unwrap_err();
    assert_eq!(
        rejection,
        FileRejection::TooLarge {
            name: "huge.jpg".to_string(),
            size: 10_485_761,
        }
    );
    assert!(rejection.to_string().contains("huge.jpg"));
}

#[test]
fn test_zip_is_rejected_for_type() {
    let rejection = check_file(&file("archive.zip", "application/zip", 1024)).unwrap_err();
    assert!(matches!(rejection, FileRejection::UnsupportedType { .. }));
    assert_eq!(rejection.file_name(), "archive.zip");
}

#[test]
fn test_type_is_checked_before_size() {
    let rejection = check_file(&file("huge.zip", "application/zip", MAX_FILE_SIZE + 1)).unwrap_err();
    assert!(matches!(rejection, FileRejection::UnsupportedType { .. }));
}

#[test]
fn test_tiny_pdf_is_accepted() {
    assert!(check_file(&file("brief.pdf", "application/pdf", 1)).is_ok());
}

#[test]
fn test_every_allowed_type_passes() {
    for mime in ALLOWED_MIME_TYPES {
        assert!(is_allowed_type(mime), "{mime} should be allowed");
    }
    assert!(!is_allowed_type("image/svg+xml"));
    assert!(!is_allowed_type(""));
}

#[test]
fn test_mime_parameters_and_case_are_ignored() {
    assert_eq!(essence("Application/PDF; charset=binary"), "application/pdf");
    assert!(check_file(&file("brief.pdf", "Application/PDF; charset=binary", 10)).is_ok());
}

#[test]
fn test_partition_drops_rejected_files_and_keeps_order() {
    let (accepted, rejected) = partition_files(vec![
        file("a.png", "image/png", 100),
        file("b.zip", "application/zip", 100),
        file("c.mp4", "video/mp4", MAX_FILE_SIZE + 1),
        file("d.webm", "video/webm", 100),
    ]);

    let names: Vec<_> = accepted.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["a.png", "d.webm"]);

    let rejected_names: Vec<_> = rejected.iter().map(|r| r.file_name()).collect();
    assert_eq!(rejected_names, vec!["b.zip", "c.mp4"]);
}

#[test]
fn test_rejection_serializes_with_reason() {
    let rejection = check_file(&file("b.zip", "application/zip", 1)).unwrap_err();
    let json = serde_json::to_value(&rejection).unwrap();
    assert_eq!(json["reason"], "unsupported_type");
    assert_eq!(json["name"], "b.zip");
}
