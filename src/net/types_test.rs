use super::*;

#[test]
fn is_success_covers_2xx_only() {
    assert!(HttpResponse::new(200, "").is_success());
    assert!(HttpResponse::new(204, "").is_success());
    assert!(!HttpResponse::new(199, "").is_success());
    assert!(!HttpResponse::new(301, "").is_success());
    assert!(!HttpResponse::new(401, "").is_success());
}

#[test]
fn error_response_parses_full_shape() {
    let body = r#"{"message":"Invalid request","errors":["'x' is not valid a valid value for 'email'"]}"#;
    let parsed: ErrorResponse = serde_json::from_str(body).expect("parse");
    assert_eq!(parsed.message, "Invalid request");
    assert_eq!(parsed.error, None);
    assert_eq!(parsed.errors.len(), 1);
}

#[test]
fn error_response_requires_message() {
    assert!(serde_json::from_str::<ErrorResponse>(r#"{"error":"boom"}"#).is_err());
}

#[test]
fn token_response_ignores_extra_fields() {
    let parsed: TokenResponse = serde_json::from_str(r#"{"token":"abc","exp":1}"#).expect("parse");
    assert_eq!(parsed.token, "abc");
}
