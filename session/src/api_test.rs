use super::*;

#[test]
fn endpoint_url_joins_with_single_slash() {
    assert_eq!(endpoint_url("http://host/api/", "/user/info"), "http://host/api/user/info");
    assert_eq!(endpoint_url("http://host/api", "auth/login"), "http://host/api/auth/login");
    assert_eq!(endpoint_url("/api", IDENTITY_PATH), "/api/user/info");
}

#[test]
fn bearer_header_formats_token() {
    assert_eq!(bearer_header("r1"), "Bearer r1");
}
