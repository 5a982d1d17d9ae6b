use super::*;

#[test]
fn partial_failure_reports_counts() {
    let err = CliError::PartialFailure { failed: 1, total: 3 };
    assert_eq!(err.to_string(), "1 of 3 requests failed");
}

#[test]
fn session_errors_keep_backend_reason() {
    let err = CliError::from(SessionError::Login(ApiError::Status {
        status: 401,
        message: "Invalid credentials".to_owned(),
    }));
    assert_eq!(err.to_string(), "login failed: server returned 401: Invalid credentials");
}

#[test]
fn not_signed_in_points_at_login() {
    assert!(CliError::NotSignedIn.to_string().contains("portal-cli login"));
}
