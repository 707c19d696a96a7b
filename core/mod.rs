// LumosDesktop コアモジュール

pub mod settings;
pub mod system;
pub mod window_manager;
