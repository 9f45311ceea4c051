use gacha_ev::preferences::{
    load_theme, save_theme, JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore,
    Theme, THEME_KEY,
};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "gacha-ev-{}-{}/preferences.json",
        name,
        std::process::id()
    ))
}

#[test]
fn theme_round_trips_through_json_file() {
    let path = temp_path("roundtrip");
    let _ = std::fs::remove_file(&path);

    let mut store = JsonFilePreferenceStore::open(&path).unwrap();
    assert_eq!(store.path(), path.as_path());
    assert!(!store.path().exists());
    assert_eq!(load_theme(&store, Theme::Dark), Theme::Dark);
    save_theme(&mut store, Theme::Light).unwrap();

    let reopened = JsonFilePreferenceStore::open(&path).unwrap();
    assert_eq!(reopened.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    assert_eq!(load_theme(&reopened, Theme::Dark), Theme::Light);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn unknown_stored_theme_falls_back_to_default() {
    let mut store = MemoryPreferenceStore::default();
    store.set(THEME_KEY, "sepia").unwrap();
    assert_eq!(load_theme(&store, Theme::Light), Theme::Light);
}

#[test]
fn corrupt_file_is_an_error() {
    let path = temp_path("corrupt");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{not json").unwrap();
    assert!(JsonFilePreferenceStore::open(&path).is_err());
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn theme_toggle_and_parse() {
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
    assert_eq!(Theme::parse(" DARK "), Some(Theme::Dark));
    assert_eq!(Theme::parse("blue"), None);
}
