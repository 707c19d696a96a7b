// SPDX-License-Identifier: GPL-3.0-or-later
// This file is part of AetherOS LumosDesktop.
//
// ジェスチャー用ハプティックフィードバック定義
// Copyright (c) 2023-2024 AetherOS Team.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

// ハプティックイベント強度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HapticIntensity {
    #[default]
    Medium,     // 中程度 (デフォルト)
    Strong,     // 強い
}

// ハプティックパターン
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HapticPattern {
    #[default]
    Click,      // 標準クリック
    HeavyClick, // 重いクリック
}

/// ロングスワイプ発火時のプロファイル
///
/// 設定で選択される。代替バイブレーション設定のデバイスでは `Click`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HapticProfile {
    Click,
    #[default]
    HeavyClick,
}

impl HapticProfile {
    pub fn from_alt_vibration(alt_vibration: bool) -> Self {
        if alt_vibration {
            HapticProfile::Click
        } else {
            HapticProfile::HeavyClick
        }
    }

    /// ホストのハプティクス層に渡すイベントへ変換
    pub fn to_event(self) -> HapticEvent {
        let event = match self {
            HapticProfile::Click => {
                HapticEvent::new(HapticPattern::Click).with_intensity(HapticIntensity::Medium)
            }
            HapticProfile::HeavyClick => HapticEvent::new(HapticPattern::HeavyClick)
                .with_intensity(HapticIntensity::Strong),
        };
        debug!("ハプティックイベント生成: {:?} -> {:?}", self, event);
        event
    }
}

impl fmt::Display for HapticProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HapticProfile::Click => write!(f, "クリック"),
            HapticProfile::HeavyClick => write!(f, "重いクリック"),
        }
    }
}

// ハプティックイベント
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HapticEvent {
    pub pattern: HapticPattern,
    pub intensity: HapticIntensity,
}

impl HapticEvent {
    // 新しいハプティックイベントを作成
    pub fn new(pattern: HapticPattern) -> Self {
        HapticEvent {
            pattern,
            intensity: HapticIntensity::Medium,
        }
    }

    // 強度を設定
    pub fn with_intensity(mut self, intensity: HapticIntensity) -> Self {
        self.intensity = intensity;
        self
    }
}
