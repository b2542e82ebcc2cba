use folio::core::theme::{ThemePreference, THEME_KEY};
use folio::core::{PreferenceStore, Theme};
use folio::FilePreferenceStore;
use tempfile::TempDir;
use tokio_test::block_on;

#[test]
fn test_nothing_stored_uses_system_preference() {
    let dir = TempDir::new().unwrap();
    let preference = ThemePreference::new(FilePreferenceStore::new(dir.path().join("prefs.json")));

    assert_eq!(block_on(preference.resolve(Theme::Light)), Theme::Light);
    assert_eq!(block_on(preference.resolve(Theme::Dark)), Theme::Dark);
}

#[test]
fn test_stored_theme_wins_over_system() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");
    let preference = ThemePreference::new(FilePreferenceStore::new(&path));

    block_on(preference.persist(Theme::Light)).unwrap();
    assert_eq!(block_on(preference.resolve(Theme::Dark)), Theme::Light);

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"theme\": \"light\""));
}

#[test]
fn test_garbage_value_falls_back() {
    let dir = TempDir::new().unwrap();
    let store = FilePreferenceStore::new(dir.path().join("prefs.json"));
    block_on(store.set(THEME_KEY, "solarized")).unwrap();

    let preference = ThemePreference::new(store);
    assert_eq!(block_on(preference.resolve(Theme::Dark)), Theme::Dark);
}

#[test]
fn test_unreadable_file_falls_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, "][").unwrap();

    let preference = ThemePreference::new(FilePreferenceStore::new(&path));
    assert_eq!(block_on(preference.resolve(Theme::Light)), Theme::Light);
}
