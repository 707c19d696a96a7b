// LumosDesktop 設定モジュール
// エッジジェスチャーの設定の管理と永続化を担当

//! # 設定モジュール
//!
//! エッジバックジェスチャーの設定を提供します。
//!
//! 主な機能：
//! - 画面の形状スナップショット（[`EdgeGeometry`]）
//! - ロングスワイプ設定（[`LongSwipeConfig`]）
//! - タッチ判定の閾値（[`GestureTuning`]）
//! - JSON形式での読み書きと値の検証
//!
//! 設定はセッションの途中では読み直されません。ホストが新しい値を渡すと、
//! 認識器は次のポインターダウンで切り替えます。

pub mod gesture_settings;

use std::io;

use thiserror::Error;

pub use gesture_settings::{
    AppTarget, EdgeGeometry, EdgeGestureSettings, EdgeHeightSetting, GestureTuning,
    LongSwipeConfig, SwipeType,
};

/// 設定モジュールの結果型
pub type SettingsResult<T> = Result<T, SettingsError>;

/// 設定モジュールのエラー型
#[derive(Error, Debug)]
pub enum SettingsError {
    /// I/Oエラー
    #[error("I/Oエラー: {0}")]
    Io(#[from] io::Error),

    /// JSONのパースエラー
    #[error("設定のパースに失敗しました: {0}")]
    Parse(#[from] serde_json::Error),

    /// 範囲外の値
    #[error("検証エラー: {0}")]
    ValidationError(String),
}
