// LumosDesktop 入力変換モジュール

pub mod input_manager;

pub use input_manager::{PointerAction, PointerSample};
