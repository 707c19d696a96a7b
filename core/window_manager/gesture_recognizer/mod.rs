// LumosDesktop ジェスチャー認識モジュール
// 画面端からのスワイプで「戻る」を検出する機能を提供します

//! ジェスチャー認識モジュール
//!
//! エッジバックジェスチャーの認識器と、それを動かすための周辺部品をまとめています。
//! 認識器はOSへの依頼を [`GestureHost`] 経由で、矢印の表示を [`EdgeAffordance`] 経由で行います。
//! 非同期の環境では [`EdgeGestureService`] がイベントとタイマーを直列化します。

pub mod affordance;
pub mod edge_back_recognizer;
pub mod error;
pub mod exclusion;
pub mod gesture_recognizer;
pub mod host;
pub mod long_swipe;
pub mod service;

// 主要な型の再エクスポート
pub use affordance::{affordance_position, sampling_rect, AffordancePlacement, EdgeAffordance};
pub use edge_back_recognizer::EdgeBackRecognizer;
pub use error::{EdgeGestureError, HostActionError};
pub use exclusion::{ExclusionRegions, ExclusionTracker, Rect, Region};
pub use gesture_recognizer::{EdgeSide, GesturePhase, GestureRecognizer, GestureSession};
pub use host::{BackGestureReport, GestureHost, GestureOutcome, LongSwipeRequest};
pub use long_swipe::{LongSwipeAction, LongSwipeTimer, PendingLongSwipe};
pub use service::{EdgeGestureHandle, EdgeGestureService, GestureCommand, ServiceError};
