// LumosDesktop 入力マネージャー
// ポインターサンプルの定義と、ジェスチャー認識器への配送前の正規化を担当

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// ポインターアクション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerAction {
    /// 最初の指が触れた
    Down,
    /// 移動
    Move,
    /// 最後の指が離れた
    Up,
    /// 入力系からのキャンセル
    Cancel,
    /// 2本目以降の指が触れた
    PointerDown,
}

impl fmt::Display for PointerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerAction::Down => write!(f, "DOWN"),
            PointerAction::Move => write!(f, "MOVE"),
            PointerAction::Up => write!(f, "UP"),
            PointerAction::Cancel => write!(f, "CANCEL"),
            PointerAction::PointerDown => write!(f, "POINTER_DOWN"),
        }
    }
}

/// ポインターサンプル
///
/// 時刻はホストの単調クロック（ミリ秒）。`down_time_ms` は同じタッチ列の
/// `Down` の時刻で、列の全サンプルで同じ値を持ちます。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub action: PointerAction,
    pub event_time_ms: u64,
    pub down_time_ms: u64,
}

impl PointerSample {
    pub fn new(action: PointerAction, x: f32, y: f32, event_time_ms: u64, down_time_ms: u64) -> Self {
        Self {
            x,
            y,
            action,
            event_time_ms,
            down_time_ms,
        }
    }

    /// タッチ列の開始サンプル
    pub fn down(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerAction::Down, x, y, time_ms, time_ms)
    }

    pub fn moved(x: f32, y: f32, event_time_ms: u64, down_time_ms: u64) -> Self {
        Self::new(PointerAction::Move, x, y, event_time_ms, down_time_ms)
    }

    pub fn up(x: f32, y: f32, event_time_ms: u64, down_time_ms: u64) -> Self {
        Self::new(PointerAction::Up, x, y, event_time_ms, down_time_ms)
    }

    pub fn cancel(x: f32, y: f32, event_time_ms: u64, down_time_ms: u64) -> Self {
        Self::new(PointerAction::Cancel, x, y, event_time_ms, down_time_ms)
    }

    pub fn pointer_down(x: f32, y: f32, event_time_ms: u64, down_time_ms: u64) -> Self {
        Self::new(PointerAction::PointerDown, x, y, event_time_ms, down_time_ms)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// `Down` からの経過時間（ミリ秒）
    ///
    /// 時刻が逆転しているサンプルは 0 として扱う
    pub fn elapsed_since_down_ms(&self) -> u64 {
        self.event_time_ms.saturating_sub(self.down_time_ms)
    }

    /// 同じ位置・時刻のキャンセルサンプルを合成
    pub fn to_cancel(&self) -> Self {
        Self {
            action: PointerAction::Cancel,
            ..*self
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.action, PointerAction::Up | PointerAction::Cancel)
    }
}
