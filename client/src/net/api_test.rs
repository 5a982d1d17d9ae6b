use super::*;

#[test]
fn new_trims_trailing_slash_and_whitespace() {
    let api = BrowserAuthApi::new(" https://portal.example.edu/api/ ");
    assert_eq!(api.base_url(), "https://portal.example.edu/api");
}

#[test]
fn new_falls_back_to_same_origin_default() {
    assert_eq!(BrowserAuthApi::new("  ").base_url(), DEFAULT_API_URL);
    assert_eq!(BrowserAuthApi::new("/").base_url(), DEFAULT_API_URL);
}

#[test]
fn url_joins_endpoint_paths() {
    let api = BrowserAuthApi::new("/api");
    assert_eq!(api.url(LOGIN_PATH), "/api/auth/login");
    assert_eq!(api.url(IDENTITY_PATH), "/api/user/info");
    assert_eq!(api.url(REGISTER_PATH), "/api/auth/register");
}
