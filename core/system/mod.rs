// LumosDesktop システムモジュール
// ジェスチャーが利用するシステムレベルの定義を提供します

pub mod haptics;

pub use haptics::{HapticEvent, HapticIntensity, HapticPattern, HapticProfile};
