/*!
 * Tests for error types
 */

use scripture_study::errors::{ACCEPTED_FORMATS, AppError, ProviderError, ReferenceError};

#[test]
fn test_reference_error_shouldSerializeAsErrorObject() {
    let error = ReferenceError::UnknownBook { book: "Hezekiah".to_string() };
    let json = serde_json::to_value(&error).unwrap();

    let message = json["error"].as_str().unwrap();
    assert!(message.starts_with("Unknown book \"Hezekiah\""));
    assert!(message.ends_with(ACCEPTED_FORMATS));
    assert_eq!(json.as_object().unwrap().len(), 1);
}

#[test]
fn test_provider_error_display_shouldIncludeStatus() {
    let error = ProviderError::ApiError { status_code: 503, message: "unavailable".to_string() };
    assert_eq!(error.to_string(), "API responded with error: 503 - unavailable");
}

#[test]
fn test_app_error_fromReferenceError_shouldWrap() {
    let error: AppError = ReferenceError::InvalidFormat { input: "x".to_string() }.into();
    assert!(matches!(error, AppError::Reference(_)));
    assert!(error.to_string().starts_with("Reference error: Invalid reference \"x\""));
}

#[test]
fn test_app_error_fromIoError_shouldBeFileError() {
    let error: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "conf.json").into();
    assert!(matches!(error, AppError::File(_)));
}
