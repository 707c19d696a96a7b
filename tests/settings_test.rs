// LumosDesktop 設定モジュールテスト

#[cfg(test)]
mod settings_tests {
    use tempfile::tempdir;

    // 設定モジュールをインポート
    use lumos_edge_gesture::core::settings::{
        AppTarget, EdgeGestureSettings, EdgeHeightSetting, SettingsError, SwipeType,
    };
    use lumos_edge_gesture::core::window_manager::gesture_recognizer::{EdgeSide, LongSwipeAction};
    use lumos_edge_gesture::HapticProfile;

    // 保存と読み込み
    #[test]
    fn test_save_and_load() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("config").join("edge_gesture.json");

        let mut settings = EdgeGestureSettings::default();
        settings.edge_width_px = 36;
        settings.edge_height = EdgeHeightSetting::ThreeQuarters;
        settings.long_swipe = settings
            .long_swipe
            .with_swipe_type(SwipeType::Distance)
            .with_actions(LongSwipeAction::LaunchApp, LongSwipeAction::Screenshot)
            .with_app(EdgeSide::Left, AppTarget::new("org.example.mail").with_activity(".Inbox"))
            .with_haptics(true, HapticProfile::Click);

        // 親ディレクトリも作られる
        settings.save(&path)?;
        let loaded = EdgeGestureSettings::load(&path)?;
        assert_eq!(loaded, settings);
        Ok(())
    }

    // 欠けた項目は既定値
    #[test]
    fn test_partial_json_uses_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let settings = EdgeGestureSettings::from_json(r#"{ "edge_width_px": 30 }"#)?;
        assert_eq!(settings.edge_width_px, 30);
        assert_eq!(settings.edge_height, EdgeHeightSetting::Full);
        assert!(settings.block_ime_space);
        assert_eq!(settings.long_swipe.timeout_ms, 2000);
        assert_eq!(settings.long_swipe.left_action, LongSwipeAction::None);
        Ok(())
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let result = EdgeGestureSettings::from_json(r#"{ "edge_width_px": -4 }"#);
        assert!(matches!(result, Err(SettingsError::ValidationError(_))));

        let result = EdgeGestureSettings::from_json("{ not json");
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = tempdir().unwrap();
        let result = EdgeGestureSettings::load(&temp_dir.path().join("missing.json"));
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }

    #[test]
    fn test_geometry_for_display() {
        let mut settings = EdgeGestureSettings::default();
        settings.edge_height = EdgeHeightSetting::Quarter;
        settings.block_ime_space = false;

        let geometry = settings.geometry_for_display(1080, 2400, 126);
        assert_eq!(geometry.edge_width_px, settings.edge_width_px);
        assert_eq!(geometry.nav_bar_height_px, 126);
        assert_eq!(geometry.edge_height_limit_px, 600);
        assert!(!geometry.block_ime_space);
    }
}
