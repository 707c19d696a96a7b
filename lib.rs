// SPDX-License-Identifier: GPL-3.0-or-later
// This file is part of AetherOS LumosDesktop.
//
// LumosDesktop エッジバックジェスチャー
// Copyright (c) 2023-2024 AetherOS Team.

//! # lumos-edge-gesture
//!
//! 画面端からのスワイプを「戻る」操作またはロングスワイプのカスタムアクションとして
//! 認識するジェスチャー認識器です。
//!
//! OSとの連携（入力の横取り、戻るキーの注入、ハプティクス、統計記録）はすべて
//! [`GestureHost`] トレイトを通じてホスト側に委ねられます。

pub mod core;

pub use crate::core::settings::{
    EdgeGeometry, EdgeGestureSettings, GestureTuning, LongSwipeConfig, SettingsError,
};
pub use crate::core::system::haptics::HapticProfile;
pub use crate::core::window_manager::gesture_recognizer::{
    EdgeAffordance, EdgeBackRecognizer, EdgeGestureError, EdgeGestureService, EdgeSide,
    ExclusionRegions, ExclusionTracker, GestureHost, GestureOutcome, GesturePhase,
    LongSwipeAction, Region,
};
pub use crate::core::window_manager::input_translator::{PointerAction, PointerSample};
