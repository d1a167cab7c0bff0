use parkki_apuri::session::Session;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn missing_file_yields_empty_session() {
    let session = Session::load(std::path::Path::new("/nonexistent/session.json")).unwrap();
    assert_eq!(session, Session::default());
    assert!(!session.is_signed_in());
}

#[test]
fn populated_file_reads_both_identifiers() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "user_id": "user-1", "registration": "ABC-123" }}"#
    )
    .unwrap();

    let session = Session::load(file.path()).unwrap();
    assert_eq!(session.user_id.as_deref(), Some("user-1"));
    assert_eq!(session.registration.as_deref(), Some("ABC-123"));
    assert!(session.is_signed_in());
}

#[test]
fn partial_file_leaves_missing_fields_empty() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "registration": "XYZ-789" }}"#).unwrap();

    let session = Session::load(file.path()).unwrap();
    assert_eq!(session.user_id, None);
    assert_eq!(session.registration.as_deref(), Some("XYZ-789"));
    assert!(!session.is_signed_in());
}

#[test]
fn malformed_file_is_an_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();

    assert!(Session::load(file.path()).is_err());
}
