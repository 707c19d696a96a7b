// LumosDesktop ジェスチャー認識器
// 認識器の共通トレイトとエッジジェスチャーのセッション状態

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::window_manager::input_translator::PointerSample;

/// ジェスチャーが始まった画面端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeSide {
    Left,
    Right,
}

impl EdgeSide {
    pub fn is_left(self) -> bool {
        self == EdgeSide::Left
    }
}

impl fmt::Display for EdgeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeSide::Left => write!(f, "左"),
            EdgeSide::Right => write!(f, "右"),
        }
    }
}

/// ジェスチャー状態
///
/// `Armed` と `Tracking` 以外は1イベント分だけ報告され、認識器は `Idle` に戻る。
/// ただしロングスワイプ発火後は次のイベントを飲み込むまで `CommittedLongSwipe` のまま。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GesturePhase {
    Idle,               // 待機
    Armed,              // ダウンを受理
    Tracking,           // 閾値を越えて追跡中
    CommittedBack,      // 戻る操作を確定
    CommittedLongSwipe, // ロングスワイプを発火
    Incomplete,         // 指が離れたが確定せず
    Cancelled,          // キャンセル
    Rejected,           // ダウンを拒否
}

impl GesturePhase {
    pub fn is_active(self) -> bool {
        matches!(self, GesturePhase::Armed | GesturePhase::Tracking)
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GesturePhase::CommittedBack
                | GesturePhase::CommittedLongSwipe
                | GesturePhase::Incomplete
                | GesturePhase::Cancelled
        )
    }
}

/// ジェスチャーセッション
///
/// 受理されたポインターダウンでのみ作られ、アップ・キャンセル・リセットで破棄される。
/// セッションがあること自体がダウン時の受理判定を表す
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    pub session_id: Uuid,
    pub start_point: Vec2,
    pub edge: EdgeSide,
    /// 一度 true になったらセッション中は戻らない
    pub threshold_crossed: bool,
    pub in_rejected_exclusion_zone: bool,
    pub down_time_ms: u64,
    pub block_next_event: bool,
}

impl GestureSession {
    pub fn new(start_point: Vec2, edge: EdgeSide, down_time_ms: u64) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            start_point,
            edge,
            threshold_crossed: false,
            in_rejected_exclusion_zone: false,
            down_time_ms,
            block_next_event: false,
        }
    }

    /// 閾値越えを記録（単調）
    pub fn mark_threshold_crossed(&mut self) -> bool {
        let first = !self.threshold_crossed;
        self.threshold_crossed = true;
        first
    }

    /// 開始点からの移動量の絶対値
    pub fn displacement(&self, sample: &PointerSample) -> Vec2 {
        (sample.position() - self.start_point).abs()
    }
}

/// ジェスチャー認識器ベース - すべての認識器の基底トレイト
pub trait GestureRecognizer {
    fn name(&self) -> &'static str;
    fn update(&mut self, sample: &PointerSample) -> GesturePhase;
    fn reset(&mut self);
    fn is_active(&self) -> bool;
}
