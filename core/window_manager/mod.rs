// LumosDesktop ウィンドウマネージャ
// AetherOS 用のエッジジェスチャー入力処理

//! WindowManagerモジュール
//!
//! ウィンドウマネージャのうち、画面端のバックジェスチャーに関わる部分を提供します。
//!
//! - 入力処理: ポインターサンプルの定義
//! - ジェスチャー認識: エッジスワイプの状態機械と、それを駆動する非同期サービス

pub mod gesture_recognizer;
pub mod input_translator;

// 主要コンポーネントの再エクスポート
pub use gesture_recognizer::{
    EdgeBackRecognizer, EdgeGestureService, GestureHost, GesturePhase, GestureRecognizer,
};
pub use input_translator::{PointerAction, PointerSample};
