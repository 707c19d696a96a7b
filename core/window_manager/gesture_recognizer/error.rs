// SPDX-License-Identifier: GPL-3.0-or-later
// This file is part of AetherOS LumosDesktop.
//
// エッジジェスチャー関連のエラー定義
// Copyright (c) 2023-2024 AetherOS Team.

use thiserror::Error;

use super::long_swipe::LongSwipeAction;
use crate::core::window_manager::input_translator::PointerAction;

/// エッジジェスチャーの異常
///
/// どれも致命的ではなく、認識器は現在のジェスチャーを諦めて次の入力を受け付ける
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EdgeGestureError {
    /// ダウンのないイベント列
    #[error("不正なイベント列: {action} をダウンなしで受信しました")]
    InvalidEventSequence { action: PointerAction },

    /// ジェスチャー中の2本目の指
    #[error("マルチタッチはサポートされていません")]
    MultiTouchRejected,

    /// ホスト側のアクション実行に失敗
    #[error("ホストアクションの実行に失敗しました ({action:?}): {source}")]
    HostActionFailed {
        action: LongSwipeAction,
        #[source]
        source: HostActionError,
    },
}

/// ホストが返すアクション実行エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostActionError {
    /// ホストがこの機能を持たない
    #[error("未対応の機能です: {0}")]
    Unsupported(String),

    /// 起動先が見つからない
    #[error("起動先が見つかりません: {0}")]
    TargetNotFound(String),

    /// その他のエラー
    #[error("ホストエラー: {0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = EdgeGestureError::InvalidEventSequence {
            action: PointerAction::Move,
        };
        assert!(error.to_string().contains("MOVE"));

        let error = EdgeGestureError::HostActionFailed {
            action: LongSwipeAction::Camera,
            source: HostActionError::TargetNotFound("camera".to_string()),
        };
        let message = error.to_string();
        assert!(message.contains("Camera"));
        assert!(message.contains("camera"));
    }
}
