use std::fs;

use game_view::core::{SettingsFile, SizeMode, ViewportRenderer};
use game_view::error::ViewportError;
use game_view::math::Size;
use game_view::traits::{NullBackend, NullHost};
use serde_json::json;

#[test]
fn test_missing_file_gives_empty_settings() {
    let dir = tempfile::tempdir().unwrap();

    let settings = SettingsFile::load(&dir.path().join("absent.json")).unwrap();

    assert!(settings.views.is_empty());
}

#[test]
fn test_save_creates_parent_dirs_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("views.json");

    let mut renderer = ViewportRenderer::new(NullBackend, NullHost, Size::new(1024, 768));
    renderer.set_mode(SizeMode::Fixed(Size::new(800, 600)));
    renderer.record_recent_size();

    let mut settings = SettingsFile::default();
    settings.set_view("GameView", renderer.save_settings().unwrap());
    settings.save(&path).unwrap();

    let loaded = SettingsFile::load(&path).unwrap();
    assert_eq!(loaded, settings);

    let mut restored = ViewportRenderer::new(NullBackend, NullHost, Size::new(1024, 768));
    restored.load_settings(loaded.view("GameView").unwrap());
    restored.activate();
    assert_eq!(restored.target_size(), Size::new(800, 600));
    assert_eq!(restored.recent_sizes().as_slice(), &[Size::new(800, 600)]);
}

#[test]
fn test_file_layout_uses_element_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("views.json");

    let mut renderer = ViewportRenderer::new(NullBackend, NullHost, Size::new(1024, 768));
    renderer.set_mode(SizeMode::MatchExternalTarget);

    let mut settings = SettingsFile::default();
    settings.set_view("GameView", renderer.save_settings().unwrap());
    settings.save(&path).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        raw,
        json!({
            "views": {
                "GameView": {
                    "SpecialRenderSize": "GameTarget",
                    "RecentRenderSizes": []
                }
            }
        })
    );
}

#[test]
fn test_hand_edited_file_is_loaded_leniently() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("views.json");
    fs::write(
        &path,
        r#"{"views": {"GameView": {
            "RenderSize": {"X": "1280", "Y": 99999},
            "RecentRenderSizes": [{"X": 640, "Y": 480}, {"X": -1, "Y": 480}, {"Y": 200}]
        }}}"#,
    )
    .unwrap();

    let settings = SettingsFile::load(&path).unwrap();
    let mut renderer = ViewportRenderer::new(NullBackend, NullHost, Size::new(1024, 768));
    renderer.load_settings(settings.view("GameView").unwrap());
    renderer.activate();

    assert_eq!(renderer.mode(), SizeMode::Fixed(Size::new(1280, 2160)));
    assert_eq!(renderer.recent_sizes().as_slice(), &[Size::new(640, 480)]);
}

#[test]
fn test_malformed_file_reports_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("views.json");
    fs::write(&path, "{ not json").unwrap();

    let err = SettingsFile::load(&path).unwrap_err();

    assert!(matches!(err, ViewportError::SettingsParse(_)));
}
