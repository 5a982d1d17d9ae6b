use super::*;
use session::Role;
use session::store::TOKEN_MAX_AGE;

fn grant() -> LoginGrant {
    LoginGrant {
        access_token: "acc-1".to_owned(),
        refresh_token: "ref-1".to_owned(),
        role: Role::Admin,
    }
}

fn jar_in(dir: &tempfile::TempDir) -> CookieJar {
    CookieJar::new(dir.path().join("nested").join("cookies.json"))
}

// =============================================================================
// load
// =============================================================================

#[test]
fn missing_file_loads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(jar_in(&dir).load(), StoredCredentials::default());
}

#[test]
fn corrupt_file_loads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let jar = CookieJar::new(dir.path().join("cookies.json"));
    fs::write(jar.path(), "{not json").unwrap();
    assert_eq!(jar.load(), StoredCredentials::default());
}

// =============================================================================
// save / clear
// =============================================================================

#[test]
fn save_then_load_returns_all_three_cookies() {
    let dir = tempfile::tempdir().unwrap();
    let jar = jar_in(&dir);
    jar.save(&grant(), TOKEN_MAX_AGE).unwrap();

    let creds = jar.load();
    assert_eq!(creds.access_token.as_deref(), Some("acc-1"));
    assert_eq!(creds.refresh_token.as_deref(), Some("ref-1"));
    assert_eq!(creds.role, Some(Role::Admin));
}

#[test]
fn expired_cookies_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let jar = jar_in(&dir);
    jar.save(&grant(), Duration::ZERO).unwrap();
    assert!(jar.load().token_pair().is_none());
}

#[test]
fn clear_removes_credentials_but_keeps_other_cookies() {
    let dir = tempfile::tempdir().unwrap();
    let jar = jar_in(&dir);
    jar.save(&grant(), TOKEN_MAX_AGE).unwrap();
    let mut file = jar.read();
    file.cookies.push(JarCookie { name: "theme".to_owned(), value: "dark".to_owned(), expires_at: u64::MAX });
    jar.write(&file).unwrap();

    jar.clear().unwrap();

    assert_eq!(jar.load(), StoredCredentials::default());
    let names: Vec<String> = jar.read().cookies.into_iter().map(|c| c.name).collect();
    assert_eq!(names, ["theme".to_owned()]);
}

#[test]
fn save_replaces_previous_grant() {
    let dir = tempfile::tempdir().unwrap();
    let jar = jar_in(&dir);
    jar.save(&grant(), TOKEN_MAX_AGE).unwrap();
    let second = LoginGrant { refresh_token: "ref-2".to_owned(), role: Role::User, ..grant() };
    jar.save(&second, TOKEN_MAX_AGE).unwrap();

    assert_eq!(jar.read().cookies.len(), 3);
    assert_eq!(jar.load().refresh_token.as_deref(), Some("ref-2"));
    assert_eq!(jar.load().role, Some(Role::User));
}

#[cfg(unix)]
#[test]
fn jar_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;
    let dir = tempfile::tempdir().unwrap();
    let jar = jar_in(&dir);
    jar.save(&grant(), TOKEN_MAX_AGE).unwrap();
    let mode = fs::metadata(jar.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
