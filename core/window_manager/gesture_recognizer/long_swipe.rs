// LumosDesktop ロングスワイプ
// 長押しドラッグで発火する遅延アクションのタイマーと、アクション識別子

use std::fmt;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use super::gesture_recognizer::EdgeSide;

/// ロングスワイプで実行するアクション
///
/// 数値IDは設定値と互換（0 = なし、1〜16）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongSwipeAction {
    #[default]
    None,
    Assistant,
    VoiceSearch,
    Camera,
    Flashlight,
    LaunchApp,
    VolumePanel,
    ScreenOff,
    Screenshot,
    ToggleNotifications,
    ToggleQuickSettings,
    ClearNotifications,
    RingerMode,
    KillForegroundApp,
    MediaNext,
    MediaPrevious,
    PartialScreenshot,
}

impl LongSwipeAction {
    pub const ALL: [LongSwipeAction; 17] = [
        LongSwipeAction::None,
        LongSwipeAction::Assistant,
        LongSwipeAction::VoiceSearch,
        LongSwipeAction::Camera,
        LongSwipeAction::Flashlight,
        LongSwipeAction::LaunchApp,
        LongSwipeAction::VolumePanel,
        LongSwipeAction::ScreenOff,
        LongSwipeAction::Screenshot,
        LongSwipeAction::ToggleNotifications,
        LongSwipeAction::ToggleQuickSettings,
        LongSwipeAction::ClearNotifications,
        LongSwipeAction::RingerMode,
        LongSwipeAction::KillForegroundApp,
        LongSwipeAction::MediaNext,
        LongSwipeAction::MediaPrevious,
        LongSwipeAction::PartialScreenshot,
    ];

    /// 設定値から変換。範囲外は `None` と同じく何もしない
    pub fn from_id(id: i32) -> Self {
        usize::try_from(id)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .unwrap_or(LongSwipeAction::None)
    }

    pub fn id(self) -> i32 {
        Self::ALL
            .iter()
            .position(|action| *action == self)
            .map_or(0, |index| index as i32)
    }

    pub fn is_none(self) -> bool {
        self == LongSwipeAction::None
    }
}

impl fmt::Display for LongSwipeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LongSwipeAction::None => "なし",
            LongSwipeAction::Assistant => "アシスタント",
            LongSwipeAction::VoiceSearch => "音声検索",
            LongSwipeAction::Camera => "カメラ",
            LongSwipeAction::Flashlight => "ライト",
            LongSwipeAction::LaunchApp => "アプリ起動",
            LongSwipeAction::VolumePanel => "音量パネル",
            LongSwipeAction::ScreenOff => "画面オフ",
            LongSwipeAction::Screenshot => "スクリーンショット",
            LongSwipeAction::ToggleNotifications => "通知パネル",
            LongSwipeAction::ToggleQuickSettings => "クイック設定",
            LongSwipeAction::ClearNotifications => "通知を消去",
            LongSwipeAction::RingerMode => "着信モード",
            LongSwipeAction::KillForegroundApp => "アプリを終了",
            LongSwipeAction::MediaNext => "次の曲",
            LongSwipeAction::MediaPrevious => "前の曲",
            LongSwipeAction::PartialScreenshot => "部分スクリーンショット",
        };
        write!(f, "{}", label)
    }
}

/// 待機中のロングスワイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingLongSwipe {
    /// 再設定の区別に使う通し番号
    pub generation: u64,
    pub edge: EdgeSide,
    pub armed_at_ms: u64,
    pub delay: Duration,
}

impl PendingLongSwipe {
    pub fn deadline_ms(&self) -> u64 {
        self.armed_at_ms
            .saturating_add(self.delay.as_millis().min(u64::MAX as u128) as u64)
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms >= self.deadline_ms()
    }
}

/// 1枠だけの遅延実行タイマー
///
/// 同時に保持できる予約は1つだけ。`cancel` は何度呼んでもよい。
#[derive(Debug, Default)]
pub struct LongSwipeTimer {
    slot: Option<PendingLongSwipe>,
    next_generation: u64,
}

impl LongSwipeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 予約する。既存の予約は置き換える
    pub fn arm(&mut self, edge: EdgeSide, armed_at_ms: u64, delay: Duration) -> PendingLongSwipe {
        self.next_generation = self.next_generation.wrapping_add(1);
        let pending = PendingLongSwipe {
            generation: self.next_generation,
            edge,
            armed_at_ms,
            delay,
        };
        if self.slot.replace(pending).is_some() {
            debug!("既存のロングスワイプ予約を置き換えました");
        }
        pending
    }

    pub fn cancel(&mut self) {
        if self.slot.take().is_some() {
            debug!("ロングスワイプ予約を取り消しました");
        }
    }

    pub fn pending(&self) -> Option<&PendingLongSwipe> {
        self.slot.as_ref()
    }

    pub fn is_armed(&self) -> bool {
        self.slot.is_some()
    }

    /// 期限が来ていれば予約を取り出す
    pub fn take_due(&mut self, now_ms: u64) -> Option<PendingLongSwipe> {
        match self.slot {
            Some(pending) if pending.is_due(now_ms) => self.slot.take(),
            _ => None,
        }
    }

    /// 期限に関係なく予約を取り出す
    pub fn take(&mut self) -> Option<PendingLongSwipe> {
        self.slot.take()
    }
}
