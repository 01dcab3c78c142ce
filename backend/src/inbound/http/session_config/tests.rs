//! Session configuration parsing tests.

use std::collections::HashMap;
use std::io::Write;

use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

fn env_with(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |name| vars.get(name).cloned());
    env
}

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create key file");
    file.write_all(&vec![b'k'; len]).expect("write key");
    file
}

#[fixture]
fn release_key() -> NamedTempFile {
    key_file(SESSION_KEY_MIN_LEN)
}

fn release_vars(key: &NamedTempFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key.path().to_string_lossy().into_owned()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

#[rstest]
#[case("1", Some(true))]
#[case("YES", Some(true))]
#[case(" n ", Some(false))]
#[case("false", Some(false))]
#[case("maybe", None)]
fn parses_bool_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}

#[rstest]
fn release_accepts_complete_configuration(release_key: NamedTempFile) {
    let env = env_with(release_vars(&release_key));
    let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid config");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_each_toggle(release_key: NamedTempFile, #[case] missing: &'static str) {
    let mut vars = release_vars(&release_key);
    vars.remove(missing);
    let err = session_settings_from_env(&env_with(vars), BuildMode::Release)
        .err()
        .expect("missing toggle");
    assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
fn release_rejects_short_key() {
    let short = key_file(SESSION_KEY_MIN_LEN - 1);
    let env = env_with(release_vars(&short));
    let err = session_settings_from_env(&env, BuildMode::Release)
        .err()
        .expect("short key");
    assert!(matches!(err, SessionConfigError::KeyTooShort { length: 63, .. }));
}

#[rstest]
fn release_rejects_ephemeral_keys(release_key: NamedTempFile) {
    let mut vars = release_vars(&release_key);
    vars.insert(ALLOW_EPHEMERAL_ENV, "1".to_owned());
    let err = session_settings_from_env(&env_with(vars), BuildMode::Release)
        .err()
        .expect("ephemeral rejected");
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_insecure_same_site_none(release_key: NamedTempFile) {
    let mut vars = release_vars(&release_key);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());
    let err = session_settings_from_env(&env_with(vars), BuildMode::Release)
        .err()
        .expect("insecure none");
    assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn release_rejects_unreadable_key_file() {
    let vars = HashMap::from([
        (KEY_FILE_ENV, "/nonexistent/reels/session_key".to_owned()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Lax".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ]);
    let err = session_settings_from_env(&env_with(vars), BuildMode::Release)
        .err()
        .expect("unreadable key");
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn debug_tolerates_garbage_values() {
    let vars = HashMap::from([
        (KEY_FILE_ENV, "/nonexistent/reels/session_key".to_owned()),
        (COOKIE_SECURE_ENV, "perhaps".to_owned()),
        (SAMESITE_ENV, "sideways".to_owned()),
    ]);
    let settings =
        session_settings_from_env(&env_with(vars), BuildMode::Debug).expect("debug fallback");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}
