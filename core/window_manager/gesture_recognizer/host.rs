// LumosDesktop ジェスチャーホスト
// 認識器がOS側に要求する機能の集合と、統計用の結果コード

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::HostActionError;
use super::exclusion::ExclusionRegions;
use super::gesture_recognizer::EdgeSide;
use super::long_swipe::LongSwipeAction;
use crate::core::settings::AppTarget;
use crate::core::system::haptics::HapticProfile;

/// バックジェスチャーの結果コード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureOutcome {
    /// 戻る操作を実行
    Completed,
    /// 制限外の除外領域内で戻る操作を実行
    CompletedRejected,
    /// 指が離れたが実行せず
    Incomplete,
    /// 除外領域のためダウンを拒否
    IncompleteExcluded,
}

impl fmt::Display for GestureOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureOutcome::Completed => write!(f, "COMPLETED"),
            GestureOutcome::CompletedRejected => write!(f, "COMPLETED_REJECTED"),
            GestureOutcome::Incomplete => write!(f, "INCOMPLETE"),
            GestureOutcome::IncompleteExcluded => write!(f, "INCOMPLETE_EXCLUDED"),
        }
    }
}

/// 統計レポート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackGestureReport {
    /// 拒否されたダウンではセッションが作られないため `None`
    pub session_id: Option<Uuid>,
    pub outcome: GestureOutcome,
    pub y: i32,
    pub edge: EdgeSide,
    pub reported_at: DateTime<Utc>,
}

impl BackGestureReport {
    pub fn new(outcome: GestureOutcome, y: i32, edge: EdgeSide) -> Self {
        Self {
            session_id: None,
            outcome,
            y,
            edge,
            reported_at: Utc::now(),
        }
    }

    pub fn with_session(mut self, session_id: Uuid) -> Self {
        self.session_id = Some(session_id);
        self
    }
}

/// ホストに依頼するロングスワイプアクション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongSwipeRequest {
    pub action: LongSwipeAction,
    pub edge: EdgeSide,
    /// `LaunchApp` の起動先
    pub app: Option<AppTarget>,
}

/// ホストが提供する機能
///
/// 認識器はOSの入力系・ウィンドウ系を直接触らず、すべてこのトレイト経由で依頼する。
/// 通知系メソッドはデフォルトで何もしない。
pub trait GestureHost {
    /// ホストのポリシーでバックジェスチャーが無効か
    fn is_gestures_globally_disabled(&self) -> bool;

    /// 現在の除外領域
    fn exclusion_regions(&self) -> Arc<ExclusionRegions>;

    /// 以降のタッチイベントを独占する
    fn pilfer_input_ownership(&mut self);

    /// 戻るキーイベントを注入
    fn inject_back_key_event(&mut self);

    fn perform_haptic_feedback(&mut self, profile: HapticProfile);

    fn report_gesture_outcome(&mut self, report: &BackGestureReport);

    /// ロングスワイプのアクションを実行
    fn launch_configured_action(&mut self, request: &LongSwipeRequest) -> Result<(), HostActionError>;

    fn on_commit_back(&mut self) {}

    fn on_commit_long_swipe(&mut self, _action: LongSwipeAction) {}
}
