// LumosDesktop エッジ矢印アフォーダンス
// 指に追従する矢印パネルの位置計算と、パネル側のインターフェース

use super::exclusion::Rect;
use super::gesture_recognizer::EdgeSide;
use crate::core::settings::{EdgeGeometry, GestureTuning};
use crate::core::window_manager::input_translator::PointerSample;

/// 矢印パネルの上端Y座標を計算
///
/// 指の位置から `finger_offset` だけ上にずらし、`min_arrow_y` 未満にはしない。
/// パネルの高さの半分を引いて中心を合わせ、`[0, display_height]` に収める。
pub fn affordance_position(
    touch_y: f32,
    finger_offset: i32,
    min_arrow_y: i32,
    affordance_height: i32,
    display_height: i32,
) -> i32 {
    let position = (touch_y - finger_offset as f32).max(min_arrow_y as f32);
    let position = position - affordance_height as f32 / 2.0;
    (position as i32).clamp(0, display_height.max(0))
}

/// 輝度サンプリング用の矩形
pub fn sampling_rect(
    panel_y: i32,
    edge: EdgeSide,
    geometry: &EdgeGeometry,
    affordance_width: i32,
    affordance_height: i32,
) -> Rect {
    let left = match edge {
        EdgeSide::Left => geometry.left_inset_px,
        EdgeSide::Right => geometry.display_width - geometry.right_inset_px - affordance_width,
    };
    Rect::from_size(left, panel_y, affordance_width, affordance_height)
}

/// 位置とサンプリング矩形をまとめて計算
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffordancePlacement {
    pub panel_y: i32,
    pub sampling_rect: Rect,
}

impl AffordancePlacement {
    pub fn compute(touch_y: f32, edge: EdgeSide, geometry: &EdgeGeometry, tuning: &GestureTuning) -> Self {
        let panel_y = affordance_position(
            touch_y,
            tuning.finger_offset_px,
            tuning.min_arrow_y_px,
            tuning.affordance_height_px,
            geometry.display_height,
        );
        let sampling_rect = sampling_rect(
            panel_y,
            edge,
            geometry,
            tuning.affordance_width_px,
            tuning.affordance_height_px,
        );
        Self {
            panel_y,
            sampling_rect,
        }
    }
}

/// 指に追従する矢印パネル
///
/// 認識器は受理したセッションのイベントをすべてここへ転送する
pub trait EdgeAffordance {
    /// ダウンが受理された
    fn on_session_start(&mut self, edge: EdgeSide, sample: &PointerSample);

    /// パネル位置とサンプリング矩形の更新
    fn on_position_update(&mut self, panel_y: i32, sampling_rect: Rect);

    /// タッチイベントの転送
    fn handle_touch(&mut self, sample: &PointerSample);

    /// アップ時に戻る操作を確定してよいか
    fn should_trigger_back(&self) -> bool;

    /// ロングスワイプ発火時に静止位置へ戻す
    fn reset_on_down(&mut self);

    /// ジェスチャーの取り消し
    fn on_cancel(&mut self);

    /// パネル固有の描画範囲に矩形を合わせる
    fn adjust_sampling_rect(&self, rect: Rect) -> Rect {
        rect
    }
}
