// SPDX-License-Identifier: GPL-3.0-or-later
// This file is part of AetherOS LumosDesktop.
//
// エッジジェスチャーサービス
// 入力イベントとロングスワイプのタイマーを1つのタスクで直列に処理する
// Copyright (c) 2023-2024 AetherOS Team.

use log::{debug, info};
use thiserror::Error;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{self, Instant};

use super::affordance::EdgeAffordance;
use super::edge_back_recognizer::EdgeBackRecognizer;
use super::gesture_recognizer::GesturePhase;
use super::host::GestureHost;
use crate::core::settings::{EdgeGeometry, EdgeHeightSetting, GestureTuning, LongSwipeConfig};
use crate::core::window_manager::input_translator::PointerSample;

/// コマンドキューの長さ
const COMMAND_QUEUE_SIZE: usize = 64;
/// 状態通知チャネルの長さ
const PHASE_CHANNEL_SIZE: usize = 16;

/// サービスのエラー
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceError {
    #[error("エッジジェスチャーサービスは停止しています")]
    Closed,

    /// 一時的なもの。サービスは動いている
    #[error("コマンドキューが満杯です")]
    QueueFull,
}

/// サービスへのコマンド
#[derive(Debug, Clone)]
pub enum GestureCommand {
    Pointer(PointerSample),
    Geometry(EdgeGeometry),
    Tuning(GestureTuning),
    LongSwipe(LongSwipeConfig),
    DisplayChanged {
        width: i32,
        height: i32,
        edge_height: EdgeHeightSetting,
    },
    ImeVisibility {
        visible: bool,
        height: i32,
    },
    Insets {
        left: i32,
        right: i32,
    },
    PackageRemoved(String),
    Attached(bool),
    GesturalMode(bool),
    TransientImmersiveSticky(bool),
    Cancel,
    Shutdown,
}

/// サービスへの送信ハンドル
#[derive(Debug, Clone)]
pub struct EdgeGestureHandle {
    tx: mpsc::Sender<GestureCommand>,
}

impl EdgeGestureHandle {
    pub async fn send(&self, command: GestureCommand) -> Result<(), ServiceError> {
        self.tx.send(command).await.map_err(|_| ServiceError::Closed)
    }

    /// 入力スレッドから待たずに送る
    pub fn try_send(&self, command: GestureCommand) -> Result<(), ServiceError> {
        self.tx.try_send(command).map_err(|error| match error {
            TrySendError::Full(_) => ServiceError::QueueFull,
            TrySendError::Closed(_) => ServiceError::Closed,
        })
    }

    pub async fn pointer(&self, sample: PointerSample) -> Result<(), ServiceError> {
        self.send(GestureCommand::Pointer(sample)).await
    }

    pub async fn cancel(&self) -> Result<(), ServiceError> {
        self.send(GestureCommand::Cancel).await
    }

    pub async fn shutdown(&self) -> Result<(), ServiceError> {
        self.send(GestureCommand::Shutdown).await
    }
}

/// エッジジェスチャーサービス
///
/// 認識器を所有し、コマンドとタイマー満了を `select!` で1つずつ処理する。
/// タイマーのコールバックがイベント処理と並行して走ることはない。
pub struct EdgeGestureService<H, A> {
    recognizer: EdgeBackRecognizer<H, A>,
    commands: mpsc::Receiver<GestureCommand>,
    phase_tx: broadcast::Sender<GesturePhase>,
}

impl<H: GestureHost, A: EdgeAffordance> EdgeGestureService<H, A> {
    pub fn new(recognizer: EdgeBackRecognizer<H, A>) -> (Self, EdgeGestureHandle) {
        let (tx, commands) = mpsc::channel(COMMAND_QUEUE_SIZE);
        let (phase_tx, _) = broadcast::channel(PHASE_CHANNEL_SIZE);
        let service = Self {
            recognizer,
            commands,
            phase_tx,
        };
        (service, EdgeGestureHandle { tx })
    }

    /// 状態変化の購読
    pub fn subscribe(&self) -> broadcast::Receiver<GesturePhase> {
        self.phase_tx.subscribe()
    }

    pub fn recognizer(&self) -> &EdgeBackRecognizer<H, A> {
        &self.recognizer
    }

    /// 停止するまでコマンドを処理し、最後に認識器を返す
    pub async fn run(mut self) -> EdgeBackRecognizer<H, A> {
        info!("エッジジェスチャーサービス開始");
        // (予約の通し番号, 満了時刻)
        let mut armed: Option<(u64, Instant)> = None;

        loop {
            let pending = self.recognizer.pending_long_swipe().copied();
            match (pending, armed) {
                (Some(pending), Some((generation, _))) if pending.generation == generation => {}
                (Some(pending), _) => {
                    armed = Some((pending.generation, Instant::now() + pending.delay));
                }
                (None, _) => armed = None,
            }
            let deadline = armed.map(|(_, deadline)| deadline);

            tokio::select! {
                biased;

                command = self.commands.recv() => {
                    match command {
                        None | Some(GestureCommand::Shutdown) => break,
                        Some(command) => self.handle(command),
                    }
                }
                _ = time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    armed = None;
                    let phase = self.recognizer.fire_pending_long_swipe();
                    self.publish(phase);
                }
            }
        }

        self.recognizer.cancel();
        info!("エッジジェスチャーサービス停止");
        self.recognizer
    }

    fn handle(&mut self, command: GestureCommand) {
        match command {
            GestureCommand::Pointer(sample) => {
                let phase = self.recognizer.on_pointer_event(&sample);
                self.publish(phase);
            }
            GestureCommand::Geometry(geometry) => self.recognizer.set_geometry(geometry),
            GestureCommand::Tuning(tuning) => self.recognizer.set_tuning(tuning),
            GestureCommand::LongSwipe(config) => self.recognizer.set_long_swipe_config(config),
            GestureCommand::DisplayChanged {
                width,
                height,
                edge_height,
            } => self.recognizer.on_display_changed(width, height, edge_height),
            GestureCommand::ImeVisibility { visible, height } => {
                self.recognizer.on_ime_visibility_changed(visible, height)
            }
            GestureCommand::Insets { left, right } => self.recognizer.set_insets(left, right),
            GestureCommand::PackageRemoved(package) => {
                self.recognizer.on_package_removed(&package);
            }
            GestureCommand::Attached(attached) => self.recognizer.set_attached(attached),
            GestureCommand::GesturalMode(enabled) => self.recognizer.set_gestural_mode(enabled),
            GestureCommand::TransientImmersiveSticky(sticky) => {
                self.recognizer.set_transient_immersive_sticky(sticky)
            }
            GestureCommand::Cancel => {
                self.recognizer.cancel();
                self.publish(GesturePhase::Idle);
            }
            GestureCommand::Shutdown => {}
        }
    }

    fn publish(&self, phase: GesturePhase) {
        // 購読者がいなくてもよい
        if self.phase_tx.send(phase).is_err() {
            debug!("状態通知の購読者なし: {:?}", phase);
        }
    }
}
