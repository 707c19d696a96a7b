// SPDX-License-Identifier: GPL-3.0-or-later
// This file is part of AetherOS LumosDesktop.
//
// エッジジェスチャー設定
// Copyright (c) 2023-2024 AetherOS Team.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{SettingsError, SettingsResult};
use crate::core::system::haptics::HapticProfile;
use crate::core::window_manager::gesture_recognizer::{EdgeSide, LongSwipeAction};

/// 長押し判定の上限（ミリ秒）
pub const MAX_LONG_PRESS_TIMEOUT_MS: u64 = 250;

/// システムのタッチスロップに掛ける係数
///
/// アプリが反応する前にジェスチャーを横取りできるよう小さめにする
pub const TOUCH_SLOP_SCALE: f32 = 0.75;

/// ロングスワイプのデフォルト待ち時間（ミリ秒）
pub const DEFAULT_LONG_SWIPE_TIMEOUT_MS: u64 = 2000;

/// エッジの有効な高さ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeHeightSetting {
    /// 画面全体
    #[default]
    Full,
    /// 下から 3/4
    ThreeQuarters,
    /// 下から 1/2
    Half,
    /// 下から 1/4
    Quarter,
}

impl EdgeHeightSetting {
    /// 数値設定（0〜3）から変換
    pub fn from_setting(value: i32) -> SettingsResult<Self> {
        match value {
            0 => Ok(EdgeHeightSetting::Full),
            1 => Ok(EdgeHeightSetting::ThreeQuarters),
            2 => Ok(EdgeHeightSetting::Half),
            3 => Ok(EdgeHeightSetting::Quarter),
            other => Err(SettingsError::ValidationError(format!(
                "エッジの高さ設定は 0〜3 です: {}",
                other
            ))),
        }
    }

    /// 画面の高さに対する制限値（0 は制限なし）
    pub fn limit_px(self, display_height: i32) -> i32 {
        match self {
            EdgeHeightSetting::Full => 0,
            EdgeHeightSetting::ThreeQuarters => (display_height * 3) / 4,
            EdgeHeightSetting::Half => display_height / 2,
            EdgeHeightSetting::Quarter => display_height / 4,
        }
    }
}

/// ロングスワイプの判定方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeType {
    /// ドラッグしたまま一定時間保持（設定値 0）
    #[default]
    Timed,
    /// 画面幅の 3/4 以上ドラッグ（設定値 1）
    Distance,
}

impl SwipeType {
    pub fn from_setting(value: i32) -> SettingsResult<Self> {
        match value {
            0 => Ok(SwipeType::Timed),
            1 => Ok(SwipeType::Distance),
            other => Err(SettingsError::ValidationError(format!(
                "スワイプ方式は 0 または 1 です: {}",
                other
            ))),
        }
    }

    pub fn as_setting(self) -> i32 {
        match self {
            SwipeType::Timed => 0,
            SwipeType::Distance => 1,
        }
    }
}

/// アプリ起動アクションの起動先
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppTarget {
    pub package: String,
    /// 未指定ならパッケージのランチャーアクティビティ
    pub activity: Option<String>,
}

impl AppTarget {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            activity: None,
        }
    }

    pub fn with_activity(mut self, activity: impl Into<String>) -> Self {
        self.activity = Some(activity.into());
        self
    }
}

/// 画面の形状スナップショット
///
/// ディスプレイ・IME・設定の変更時に作り直され、セッション中は読み取り専用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeGeometry {
    pub edge_width_px: i32,
    pub left_inset_px: i32,
    pub right_inset_px: i32,
    pub display_width: i32,
    pub display_height: i32,
    pub ime_height_px: i32,
    pub nav_bar_height_px: i32,
    /// 0 なら画面全体、それ以外は下端からの高さ
    pub edge_height_limit_px: i32,
    /// IMEの上をジェスチャー禁止領域にするか
    pub block_ime_space: bool,
}

impl EdgeGeometry {
    pub fn new(display_width: i32, display_height: i32, edge_width_px: i32) -> Self {
        Self {
            edge_width_px,
            left_inset_px: 0,
            right_inset_px: 0,
            display_width,
            display_height,
            ime_height_px: 0,
            nav_bar_height_px: 0,
            edge_height_limit_px: 0,
            block_ime_space: true,
        }
    }

    pub fn with_nav_bar_height(mut self, height: i32) -> Self {
        self.nav_bar_height_px = height;
        self
    }

    pub fn with_insets(mut self, left: i32, right: i32) -> Self {
        self.set_insets(left, right);
        self
    }

    pub fn with_edge_height(mut self, setting: EdgeHeightSetting) -> Self {
        self.edge_height_limit_px = setting.limit_px(self.display_height);
        self
    }

    pub fn set_insets(&mut self, left: i32, right: i32) {
        self.left_inset_px = left;
        self.right_inset_px = right;
    }

    /// ディスプレイサイズ変更時の再計算
    pub fn set_display_size(&mut self, width: i32, height: i32, edge_height: EdgeHeightSetting) {
        self.display_width = width;
        self.display_height = height;
        self.edge_height_limit_px = edge_height.limit_px(height);
        debug!(
            "ディスプレイサイズ更新: {}x{} (エッジ高さ {}px)",
            width, height, self.edge_height_limit_px
        );
    }

    pub fn on_ime_visibility_changed(&mut self, visible: bool, height: i32) {
        self.ime_height_px = if self.block_ime_space && visible { height } else { 0 };
    }

    /// 画面下端の禁止帯の高さ
    pub fn bottom_reserved_px(&self) -> i32 {
        self.ime_height_px.max(self.nav_bar_height_px)
    }

    pub fn is_left_edge(&self, x: i32) -> bool {
        x <= self.edge_width_px + self.left_inset_px
    }

    /// 左右どちらかのエッジ帯に入っているか
    pub fn is_within_edge_strips(&self, x: i32) -> bool {
        !(x > self.edge_width_px + self.left_inset_px
            && x < self.display_width - self.edge_width_px - self.right_inset_px)
    }

    /// IME・ナビゲーションバーとエッジ高さ制限を考慮した縦方向の判定
    pub fn is_within_vertical_band(&self, y: i32) -> bool {
        let bottom = self.display_height - self.bottom_reserved_px();
        if y > bottom {
            return false;
        }
        if self.edge_height_limit_px != 0 && y < bottom - self.edge_height_limit_px {
            return false;
        }
        true
    }

    /// 除外領域を無視してよい下端 1/4 の境界
    pub fn exclusion_carve_out_y(&self) -> i32 {
        (self.display_height / 4) * 3
    }

    /// 距離式ロングスワイプの発火距離
    pub fn long_swipe_distance_px(&self) -> i32 {
        (self.display_width / 4) * 3
    }
}

/// タッチ判定の閾値
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureTuning {
    /// 縦横の判定に使うスロップ
    pub touch_slop_px: f32,
    /// 閾値を越えるまでに許される時間
    pub long_press_timeout_ms: u64,
    /// 矢印を指から離す量
    pub finger_offset_px: i32,
    /// 矢印の最小Y座標
    pub min_arrow_y_px: i32,
    pub affordance_width_px: i32,
    pub affordance_height_px: i32,
}

impl GestureTuning {
    /// システム既定値から導出
    pub fn from_system(system_touch_slop: f32, system_long_press_timeout_ms: u64) -> Self {
        Self {
            touch_slop_px: system_touch_slop * TOUCH_SLOP_SCALE,
            long_press_timeout_ms: system_long_press_timeout_ms.min(MAX_LONG_PRESS_TIMEOUT_MS),
            ..Self::default()
        }
    }

    pub fn with_touch_slop(mut self, slop: f32) -> Self {
        self.touch_slop_px = slop;
        self
    }

    pub fn with_long_press_timeout(mut self, timeout_ms: u64) -> Self {
        self.long_press_timeout_ms = timeout_ms;
        self
    }
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            touch_slop_px: 24.0 * TOUCH_SLOP_SCALE,
            long_press_timeout_ms: MAX_LONG_PRESS_TIMEOUT_MS,
            finger_offset_px: 140,
            min_arrow_y_px: 200,
            affordance_width_px: 210,
            affordance_height_px: 288,
        }
    }
}

/// ロングスワイプ設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongSwipeConfig {
    pub timeout_ms: u64,
    pub left_action: LongSwipeAction,
    pub right_action: LongSwipeAction,
    pub swipe_type: SwipeType,
    pub haptic_enabled: bool,
    pub haptic_profile: HapticProfile,
    #[serde(default)]
    pub left_app: Option<AppTarget>,
    #[serde(default)]
    pub right_app: Option<AppTarget>,
}

impl Default for LongSwipeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_LONG_SWIPE_TIMEOUT_MS,
            left_action: LongSwipeAction::None,
            right_action: LongSwipeAction::None,
            swipe_type: SwipeType::Timed,
            haptic_enabled: true,
            haptic_profile: HapticProfile::HeavyClick,
            left_app: None,
            right_app: None,
        }
    }
}

impl LongSwipeConfig {
    pub fn with_actions(mut self, left: LongSwipeAction, right: LongSwipeAction) -> Self {
        self.left_action = left;
        self.right_action = right;
        self
    }

    pub fn with_swipe_type(mut self, swipe_type: SwipeType) -> Self {
        self.swipe_type = swipe_type;
        self
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_haptics(mut self, enabled: bool, profile: HapticProfile) -> Self {
        self.haptic_enabled = enabled;
        self.haptic_profile = profile;
        self
    }

    pub fn with_app(mut self, edge: EdgeSide, target: AppTarget) -> Self {
        match edge {
            EdgeSide::Left => self.left_app = Some(target),
            EdgeSide::Right => self.right_app = Some(target),
        }
        self
    }

    pub fn action_for(&self, edge: EdgeSide) -> LongSwipeAction {
        match edge {
            EdgeSide::Left => self.left_action,
            EdgeSide::Right => self.right_action,
        }
    }

    pub fn app_for(&self, edge: EdgeSide) -> Option<&AppTarget> {
        match edge {
            EdgeSide::Left => self.left_app.as_ref(),
            EdgeSide::Right => self.right_app.as_ref(),
        }
    }

    pub fn has_action_for(&self, edge: EdgeSide) -> bool {
        self.action_for(edge) != LongSwipeAction::None
    }

    /// パッケージ削除時、そのパッケージを起動するアクションを解除
    ///
    /// 解除したエッジがあれば `true`
    pub fn on_package_removed(&mut self, package: &str) -> bool {
        let mut changed = false;
        if self.left_app.as_ref().map_or(false, |app| app.package == package) {
            self.left_app = None;
            self.left_action = LongSwipeAction::None;
            changed = true;
        }
        if self.right_app.as_ref().map_or(false, |app| app.package == package) {
            self.right_app = None;
            self.right_action = LongSwipeAction::None;
            changed = true;
        }
        if changed {
            info!("削除されたパッケージのロングスワイプ設定を解除: {}", package);
        }
        changed
    }
}

/// 永続化されるエッジジェスチャー設定一式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeGestureSettings {
    pub edge_width_px: i32,
    #[serde(default)]
    pub edge_height: EdgeHeightSetting,
    #[serde(default = "default_block_ime_space")]
    pub block_ime_space: bool,
    #[serde(default)]
    pub long_swipe: LongSwipeConfig,
    #[serde(default)]
    pub tuning: GestureTuning,
}

fn default_block_ime_space() -> bool {
    true
}

impl Default for EdgeGestureSettings {
    fn default() -> Self {
        Self {
            edge_width_px: 48,
            edge_height: EdgeHeightSetting::Full,
            block_ime_space: true,
            long_swipe: LongSwipeConfig::default(),
            tuning: GestureTuning::default(),
        }
    }
}

impl EdgeGestureSettings {
    /// JSON文字列から読み込み、検証する
    pub fn from_json(json: &str) -> SettingsResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> SettingsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> SettingsResult<Self> {
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        debug!("エッジジェスチャー設定を読み込みました: {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn validate(&self) -> SettingsResult<()> {
        if self.edge_width_px < 0 {
            return Err(SettingsError::ValidationError(format!(
                "エッジ幅が負の値です: {}",
                self.edge_width_px
            )));
        }
        if !(self.tuning.touch_slop_px.is_finite() && self.tuning.touch_slop_px >= 0.0) {
            return Err(SettingsError::ValidationError(format!(
                "タッチスロップが不正です: {}",
                self.tuning.touch_slop_px
            )));
        }
        if self.tuning.affordance_width_px < 0 || self.tuning.affordance_height_px < 0 {
            return Err(SettingsError::ValidationError(
                "矢印パネルのサイズが負の値です".to_string(),
            ));
        }
        Ok(())
    }

    /// ディスプレイに合わせた形状スナップショットを作成
    pub fn geometry_for_display(
        &self,
        display_width: i32,
        display_height: i32,
        nav_bar_height: i32,
    ) -> EdgeGeometry {
        let mut geometry = EdgeGeometry::new(display_width, display_height, self.edge_width_px)
            .with_nav_bar_height(nav_bar_height)
            .with_edge_height(self.edge_height);
        geometry.block_ime_space = self.block_ime_space;
        geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> EdgeGeometry {
        EdgeGeometry::new(1080, 2400, 24).with_nav_bar_height(126)
    }

    #[test]
    fn test_edge_height_limits() {
        assert_eq!(EdgeHeightSetting::Full.limit_px(2400), 0);
        assert_eq!(EdgeHeightSetting::ThreeQuarters.limit_px(2400), 1800);
        assert_eq!(EdgeHeightSetting::Half.limit_px(2400), 1200);
        assert_eq!(EdgeHeightSetting::Quarter.limit_px(2400), 600);
        assert!(EdgeHeightSetting::from_setting(4).is_err());
        assert_eq!(EdgeHeightSetting::from_setting(2).unwrap(), EdgeHeightSetting::Half);
    }

    #[test]
    fn test_edge_strips() {
        let geometry = phone().with_insets(10, 20);
        assert!(geometry.is_left_edge(34));
        assert!(!geometry.is_left_edge(35));
        assert!(geometry.is_within_edge_strips(34));
        assert!(!geometry.is_within_edge_strips(500));
        // 右端: 1080 - 24 - 20 = 1036
        assert!(!geometry.is_within_edge_strips(1035));
        assert!(geometry.is_within_edge_strips(1036));
    }

    #[test]
    fn test_vertical_band_with_ime() {
        let mut geometry = phone();
        assert!(geometry.is_within_vertical_band(2274));
        assert!(!geometry.is_within_vertical_band(2275));

        geometry.on_ime_visibility_changed(true, 900);
        assert_eq!(geometry.bottom_reserved_px(), 900);
        assert!(!geometry.is_within_vertical_band(1600));

        // IMEブロックが無効ならIMEの高さは無視
        geometry.block_ime_space = false;
        geometry.on_ime_visibility_changed(true, 900);
        assert_eq!(geometry.bottom_reserved_px(), 126);
    }

    #[test]
    fn test_vertical_band_with_edge_height() {
        let geometry = phone().with_edge_height(EdgeHeightSetting::Half);
        // 帯は [2274 - 1200, 2274]
        assert!(!geometry.is_within_vertical_band(1073));
        assert!(geometry.is_within_vertical_band(1074));
        assert!(geometry.is_within_vertical_band(2000));
    }

    #[test]
    fn test_tuning_from_system() {
        let tuning = GestureTuning::from_system(40.0, 500);
        assert_eq!(tuning.touch_slop_px, 30.0);
        assert_eq!(tuning.long_press_timeout_ms, MAX_LONG_PRESS_TIMEOUT_MS);

        let tuning = GestureTuning::from_system(40.0, 100);
        assert_eq!(tuning.long_press_timeout_ms, 100);
    }

    #[test]
    fn test_package_removed_resets_launch_action() {
        let mut config = LongSwipeConfig::default()
            .with_actions(LongSwipeAction::LaunchApp, LongSwipeAction::LaunchApp)
            .with_app(EdgeSide::Left, AppTarget::new("org.lumos.camera"))
            .with_app(EdgeSide::Right, AppTarget::new("org.lumos.notes"));

        assert!(!config.on_package_removed("org.lumos.unknown"));
        assert!(config.on_package_removed("org.lumos.camera"));
        assert_eq!(config.left_action, LongSwipeAction::None);
        assert!(config.left_app.is_none());
        assert_eq!(config.right_action, LongSwipeAction::LaunchApp);
        assert!(config.app_for(EdgeSide::Right).is_some());
    }

    #[test]
    fn test_settings_json() {
        let json = r#"{
            "edge_width_px": 36,
            "edge_height": "half",
            "long_swipe": {
                "timeout_ms": 1500,
                "left_action": "camera",
                "right_action": "none",
                "swipe_type": "distance",
                "haptic_enabled": true,
                "haptic_profile": "click"
            }
        }"#;
        let settings = EdgeGestureSettings::from_json(json).unwrap();
        assert_eq!(settings.edge_width_px, 36);
        assert_eq!(settings.edge_height, EdgeHeightSetting::Half);
        assert!(settings.block_ime_space);
        assert_eq!(settings.long_swipe.left_action, LongSwipeAction::Camera);
        assert_eq!(settings.long_swipe.swipe_type, SwipeType::Distance);
        assert_eq!(settings.long_swipe.haptic_profile, HapticProfile::Click);
        assert_eq!(settings.tuning, GestureTuning::default());

        let geometry = settings.geometry_for_display(1080, 2400, 126);
        assert_eq!(geometry.edge_height_limit_px, 1200);
        assert_eq!(geometry.edge_width_px, 36);
    }

    #[test]
    fn test_settings_validation() {
        let result = EdgeGestureSettings::from_json(r#"{ "edge_width_px": -1 }"#);
        assert!(matches!(result, Err(SettingsError::ValidationError(_))));

        let result = EdgeGestureSettings::from_json("{ not json");
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }
}
