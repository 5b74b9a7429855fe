//! Integration tests for onboarding, profile edits and logout.
//!
//! These run against the JSON file store so that every transition is also
//! checked across a simulated restart.

use little_lemon_app::profile::{ProfileError, Screen, ValidationError};
use little_lemon_app::state::AppState;
use little_lemon_app::storage::{JsonFileStore, KeyValueStore, keys};
use little_lemon_integration_tests::config_in;

fn open(dir: &tempfile::TempDir) -> AppState<JsonFileStore> {
    AppState::open(config_in(dir.path())).expect("state opens")
}

// =============================================================================
// Onboarding Gate
// =============================================================================

#[test]
fn test_first_launch_shows_onboarding() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = open(&dir);
    assert_eq!(state.screen(), Screen::Onboarding);
}

#[test]
fn test_rejected_registration_stores_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut state = open(&dir);

    let err = state
        .profile_mut()
        .register("", "a@b.com")
        .expect_err("empty name");
    assert!(matches!(
        err,
        ProfileError::Validation(ValidationError::EmptyName)
    ));

    let err = state
        .profile_mut()
        .register("Alice", "not-an-email")
        .expect_err("bad email");
    assert!(matches!(
        err,
        ProfileError::Validation(ValidationError::InvalidEmail(_))
    ));

    // Nothing was ever written, so there is no file.
    assert!(!config_in(dir.path()).profile_path().exists());
    assert_eq!(open(&dir).screen(), Screen::Onboarding);
}

#[test]
fn test_registration_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut state = open(&dir);
        state
            .profile_mut()
            .register("Alice", "a@b.com")
            .expect("valid registration");
        assert_eq!(state.screen(), Screen::Home);
    }

    let state = open(&dir);
    assert_eq!(state.screen(), Screen::Home);
    assert_eq!(state.profile().load().first_name, "Alice");
}

// =============================================================================
// Profile Edits
// =============================================================================

#[test]
fn test_saved_profile_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut state = open(&dir);
        state
            .profile_mut()
            .register("Alice", "a@b.com")
            .expect("valid registration");

        let mut draft = state.profile().load();
        draft.last_name = "Lemon".to_owned();
        draft.phone = "312-555-0100".to_owned();
        draft.notifications.special_offers = false;
        state.profile_mut().save(&draft).expect("valid save");
    }

    let profile = open(&dir).profile().load();
    assert_eq!(profile.first_name, "Alice");
    assert_eq!(profile.last_name, "Lemon");
    assert_eq!(profile.phone, "312-555-0100");
    assert!(!profile.notifications.special_offers);
    assert!(profile.notifications.newsletter);
}

// =============================================================================
// Logout
// =============================================================================

#[test]
fn test_logout_clears_fields_and_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut state = open(&dir);
        state
            .profile_mut()
            .register("Alice", "a@b.com")
            .expect("valid registration");
        state.profile_mut().logout().expect("logout");
        assert_eq!(state.screen(), Screen::Onboarding);
    }

    let state = open(&dir);
    assert_eq!(state.screen(), Screen::Onboarding);
    for key in keys::IDENTITY {
        assert_eq!(state.profile().store().get_or_default(key), "", "{key}");
    }
}
