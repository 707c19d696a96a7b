// SPDX-License-Identifier: GPL-3.0-or-later
// This file is part of AetherOS LumosDesktop.
//
// エッジバックジェスチャー認識器
// 画面端から始まるタッチ列を「戻る」・ロングスワイプ・キャンセルに分類する
// Copyright (c) 2023-2024 AetherOS Team.

use std::fmt::Write as _;
use std::time::Duration;

use log::{debug, info, trace, warn};

use super::affordance::{AffordancePlacement, EdgeAffordance};
use super::error::EdgeGestureError;
use super::gesture_recognizer::{EdgeSide, GesturePhase, GestureRecognizer, GestureSession};
use super::host::{BackGestureReport, GestureHost, GestureOutcome, LongSwipeRequest};
use super::long_swipe::{LongSwipeTimer, PendingLongSwipe};
use crate::core::settings::{
    EdgeGeometry, EdgeGestureSettings, EdgeHeightSetting, GestureTuning, LongSwipeConfig,
    SwipeType,
};
use crate::core::window_manager::input_translator::{PointerAction, PointerSample};

/// ダウン時の受理判定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Admission {
    /// エッジ帯や縦方向の範囲外
    Outside,
    /// アプリの除外領域内
    Excluded,
    Allowed { in_rejected_exclusion_zone: bool },
}

/// エッジバックジェスチャー認識器
///
/// 入力スレッドから直列に呼ばれる前提で、内部でブロックすることはない。
/// 遅延実行はロングスワイプの1枠のみで、呼び出し側が [`fire_pending_long_swipe`]
/// または [`advance_time`] で同じ直列の流れに戻す。
///
/// [`fire_pending_long_swipe`]: EdgeBackRecognizer::fire_pending_long_swipe
/// [`advance_time`]: EdgeBackRecognizer::advance_time
pub struct EdgeBackRecognizer<H, A> {
    host: H,
    affordance: A,
    geometry: EdgeGeometry,
    tuning: GestureTuning,
    long_swipe: LongSwipeConfig,
    // セッション中に届いた設定は次のダウンで反映する
    staged_geometry: Option<EdgeGeometry>,
    staged_tuning: Option<GestureTuning>,
    staged_long_swipe: Option<LongSwipeConfig>,
    session: Option<GestureSession>,
    phase: GesturePhase,
    timer: LongSwipeTimer,
    placement: Option<AffordancePlacement>,
    // ダウンからアップ/キャンセルまでの間か
    sequence_open: bool,
    attached: bool,
    gestural_mode: bool,
    transient_immersive_sticky: bool,
    last_error: Option<EdgeGestureError>,
}

impl<H: GestureHost, A: EdgeAffordance> EdgeBackRecognizer<H, A> {
    pub fn new(
        host: H,
        affordance: A,
        geometry: EdgeGeometry,
        tuning: GestureTuning,
        long_swipe: LongSwipeConfig,
    ) -> Self {
        Self {
            host,
            affordance,
            geometry,
            tuning,
            long_swipe,
            staged_geometry: None,
            staged_tuning: None,
            staged_long_swipe: None,
            session: None,
            phase: GesturePhase::Idle,
            timer: LongSwipeTimer::new(),
            placement: None,
            sequence_open: false,
            attached: true,
            gestural_mode: true,
            transient_immersive_sticky: false,
            last_error: None,
        }
    }

    /// 永続化された設定から作成
    pub fn from_settings(
        host: H,
        affordance: A,
        settings: &EdgeGestureSettings,
        display_width: i32,
        display_height: i32,
        nav_bar_height: i32,
    ) -> Self {
        let geometry = settings.geometry_for_display(display_width, display_height, nav_bar_height);
        Self::new(
            host,
            affordance,
            geometry,
            settings.tuning.clone(),
            settings.long_swipe.clone(),
        )
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn affordance(&self) -> &A {
        &self.affordance
    }

    pub fn affordance_mut(&mut self) -> &mut A {
        &mut self.affordance
    }

    pub fn geometry(&self) -> &EdgeGeometry {
        &self.geometry
    }

    pub fn tuning(&self) -> &GestureTuning {
        &self.tuning
    }

    pub fn long_swipe_config(&self) -> &LongSwipeConfig {
        &self.long_swipe
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn pending_long_swipe(&self) -> Option<&PendingLongSwipe> {
        self.timer.pending()
    }

    pub fn last_error(&self) -> Option<&EdgeGestureError> {
        self.last_error.as_ref()
    }

    pub fn take_last_error(&mut self) -> Option<EdgeGestureError> {
        self.last_error.take()
    }

    pub fn is_enabled(&self) -> bool {
        self.attached && self.gestural_mode
    }

    // ---- 設定 ----

    pub fn set_geometry(&mut self, geometry: EdgeGeometry) {
        if self.session.is_some() {
            debug!("セッション中のため形状の更新を保留");
            self.staged_geometry = Some(geometry);
        } else {
            self.geometry = geometry;
            self.staged_geometry = None;
        }
    }

    pub fn set_tuning(&mut self, tuning: GestureTuning) {
        if self.session.is_some() {
            self.staged_tuning = Some(tuning);
        } else {
            self.tuning = tuning;
            self.staged_tuning = None;
        }
    }

    pub fn set_long_swipe_config(&mut self, config: LongSwipeConfig) {
        if self.session.is_some() {
            debug!("セッション中のためロングスワイプ設定の更新を保留");
            self.staged_long_swipe = Some(config);
        } else {
            self.long_swipe = config;
            self.staged_long_swipe = None;
        }
    }

    fn update_geometry(&mut self, update: impl FnOnce(&mut EdgeGeometry)) {
        let mut geometry = self
            .staged_geometry
            .clone()
            .unwrap_or_else(|| self.geometry.clone());
        update(&mut geometry);
        self.set_geometry(geometry);
    }

    pub fn on_display_changed(&mut self, width: i32, height: i32, edge_height: EdgeHeightSetting) {
        self.update_geometry(|geometry| geometry.set_display_size(width, height, edge_height));
    }

    pub fn on_ime_visibility_changed(&mut self, visible: bool, height: i32) {
        self.update_geometry(|geometry| geometry.on_ime_visibility_changed(visible, height));
    }

    pub fn set_insets(&mut self, left: i32, right: i32) {
        self.update_geometry(|geometry| geometry.set_insets(left, right));
    }

    /// パッケージ削除の通知。起動先が消えたアクションを解除する
    pub fn on_package_removed(&mut self, package: &str) -> bool {
        let mut config = self
            .staged_long_swipe
            .clone()
            .unwrap_or_else(|| self.long_swipe.clone());
        let changed = config.on_package_removed(package);
        if changed {
            self.set_long_swipe_config(config);
        }
        changed
    }

    pub fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
        self.on_enabled_changed();
    }

    pub fn set_gestural_mode(&mut self, enabled: bool) {
        self.gestural_mode = enabled;
        self.on_enabled_changed();
    }

    /// 一時的な没入モード中はエッジ帯内のタッチを除外領域に関係なく受理する
    pub fn set_transient_immersive_sticky(&mut self, sticky: bool) {
        self.transient_immersive_sticky = sticky;
    }

    fn on_enabled_changed(&mut self) {
        if !self.is_enabled() {
            self.cancel();
            self.sequence_open = false;
        }
        debug!("エッジジェスチャー有効状態: {}", self.is_enabled());
    }

    /// 保留中の設定を反映。セッションの外でのみ呼ぶ
    fn apply_staged(&mut self) {
        if let Some(geometry) = self.staged_geometry.take() {
            self.geometry = geometry;
        }
        if let Some(tuning) = self.staged_tuning.take() {
            self.tuning = tuning;
        }
        if let Some(config) = self.staged_long_swipe.take() {
            debug!("保留していたロングスワイプ設定を反映");
            self.long_swipe = config;
        }
    }

    // ---- 入力 ----

    /// ポインターサンプルを処理し、処理後の状態を返す
    pub fn on_pointer_event(&mut self, sample: &PointerSample) -> GesturePhase {
        if !self.is_enabled() {
            trace!("無効状態のためイベントを無視: {}", sample.action);
            return GesturePhase::Idle;
        }

        match sample.action {
            PointerAction::Down => self.on_down(sample),
            _ => self.on_follow_up(sample),
        }
    }

    fn on_down(&mut self, sample: &PointerSample) -> GesturePhase {
        // 古い予約は新しいダウンで無効
        self.timer.cancel();
        if self.session.take().is_some() {
            debug!("アップを受け取らないまま次のダウンを受信");
            self.affordance.on_cancel();
        }
        self.placement = None;
        self.phase = GesturePhase::Idle;
        self.sequence_open = true;
        self.apply_staged();

        let x = sample.x as i32;
        let y = sample.y as i32;
        let edge = if self.geometry.is_left_edge(x) {
            EdgeSide::Left
        } else {
            EdgeSide::Right
        };

        if self.host.is_gestures_globally_disabled() {
            debug!("ホストのポリシーでバックジェスチャーが無効");
            return GesturePhase::Rejected;
        }

        let in_rejected_exclusion_zone = match self.admission(x, y, edge) {
            Admission::Outside => {
                trace!("エッジ領域外のダウン: ({}, {})", x, y);
                return GesturePhase::Rejected;
            }
            Admission::Excluded => {
                debug!("除外領域内のダウンを拒否: ({}, {}) {}端", x, y, edge);
                let report = BackGestureReport::new(GestureOutcome::IncompleteExcluded, y, edge);
                self.host.report_gesture_outcome(&report);
                return GesturePhase::Rejected;
            }
            Admission::Allowed {
                in_rejected_exclusion_zone,
            } => in_rejected_exclusion_zone,
        };

        let mut session = GestureSession::new(sample.position(), edge, sample.down_time_ms);
        session.in_rejected_exclusion_zone = in_rejected_exclusion_zone;
        debug!(
            "エッジジェスチャー開始: {} {}端 ({}, {})",
            session.session_id, edge, sample.x, sample.y
        );
        self.session = Some(session);
        self.phase = GesturePhase::Armed;

        self.affordance.on_session_start(edge, sample);
        self.affordance.handle_touch(sample);
        self.placement = Some(AffordancePlacement::compute(
            sample.y,
            edge,
            &self.geometry,
            &self.tuning,
        ));
        self.publish_placement();

        GesturePhase::Armed
    }

    fn admission(&self, x: i32, y: i32, edge: EdgeSide) -> Admission {
        let geometry = &self.geometry;
        if !geometry.is_within_vertical_band(y) || !geometry.is_within_edge_strips(x) {
            return Admission::Outside;
        }

        if self.transient_immersive_sticky {
            return Admission::Allowed {
                in_rejected_exclusion_zone: false,
            };
        }

        let regions = self.host.exclusion_regions();
        // ロングスワイプが使える場合は画面下 1/4 で除外領域を無視する
        let carve_out =
            self.long_swipe.swipe_type == SwipeType::Distance || self.long_swipe.has_action_for(edge);
        let excluded = if carve_out {
            regions.is_excluded(x, y) && y < geometry.exclusion_carve_out_y()
        } else {
            regions.is_excluded(x, y)
        };

        if excluded {
            Admission::Excluded
        } else {
            Admission::Allowed {
                in_rejected_exclusion_zone: regions.is_unrestricted(x, y),
            }
        }
    }

    fn on_follow_up(&mut self, sample: &PointerSample) -> GesturePhase {
        let Some(session) = self.session.as_ref() else {
            if !self.sequence_open {
                let error = EdgeGestureError::InvalidEventSequence {
                    action: sample.action,
                };
                debug!("イベントを破棄: {}", error);
                self.last_error = Some(error);
            }
            if sample.is_terminal() {
                self.sequence_open = false;
            }
            return GesturePhase::Idle;
        };

        if session.block_next_event {
            // ロングスワイプ発火後の1イベントは飲み込み、二重確定を防ぐ
            debug!("ロングスワイプ発火後のイベントを破棄: {}", sample.action);
            self.cancel_gesture(sample, None);
            if sample.is_terminal() {
                self.sequence_open = false;
            }
            return GesturePhase::Idle;
        }

        let edge = session.edge;
        let start_point = session.start_point;
        let session_id = session.session_id;
        let in_rejected_exclusion_zone = session.in_rejected_exclusion_zone;

        if !session.threshold_crossed {
            match sample.action {
                PointerAction::PointerDown => {
                    return self.cancel_gesture(sample, Some(EdgeGestureError::MultiTouchRejected));
                }
                PointerAction::Move => {
                    let elapsed = sample.elapsed_since_down_ms();
                    if elapsed > self.tuning.long_press_timeout_ms {
                        debug!("長押しタイムアウトでキャンセル: {}ms", elapsed);
                        return self.cancel_gesture(sample, None);
                    }

                    let displacement = session.displacement(sample);
                    let slop = self.tuning.touch_slop_px;
                    // 縦方向を先に判定する
                    if displacement.y > displacement.x && displacement.y > slop {
                        debug!("縦方向の移動でキャンセル: dy={}", displacement.y);
                        return self.cancel_gesture(sample, None);
                    } else if displacement.x > displacement.y && displacement.x > slop {
                        self.on_threshold_crossed(sample, edge, elapsed);
                    }
                }
                _ => {}
            }
        }

        // 矢印パネルへ転送
        self.affordance.handle_touch(sample);

        match sample.action {
            PointerAction::Move => {
                // アクション未設定でも発火し、続くアップを飲み込む
                if self.long_swipe.swipe_type == SwipeType::Distance {
                    let delta_x = (sample.x - start_point.x).abs();
                    if delta_x > self.geometry.long_swipe_distance_px() as f32 {
                        return self.fire_long_swipe();
                    }
                }
                self.publish_placement();
                self.phase
            }
            PointerAction::Up => {
                self.timer.cancel();
                let perform_back = self.affordance.should_trigger_back();
                if perform_back {
                    self.host.inject_back_key_event();
                    self.host.on_commit_back();
                }

                let outcome = match (perform_back, in_rejected_exclusion_zone) {
                    (true, true) => GestureOutcome::CompletedRejected,
                    (true, false) => GestureOutcome::Completed,
                    (false, _) => GestureOutcome::Incomplete,
                };
                let report = BackGestureReport::new(outcome, start_point.y as i32, edge)
                    .with_session(session_id);
                self.host.report_gesture_outcome(&report);
                info!("エッジジェスチャー終了: {} {}端 {}", session_id, edge, outcome);

                self.end_session();
                self.sequence_open = false;
                if perform_back {
                    GesturePhase::CommittedBack
                } else {
                    GesturePhase::Incomplete
                }
            }
            PointerAction::Cancel => {
                self.timer.cancel();
                self.affordance.on_cancel();
                self.end_session();
                self.sequence_open = false;
                GesturePhase::Cancelled
            }
            PointerAction::PointerDown | PointerAction::Down => {
                self.publish_placement();
                self.phase
            }
        }
    }

    fn on_threshold_crossed(&mut self, sample: &PointerSample, edge: EdgeSide, elapsed_ms: u64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.mark_threshold_crossed() {
            return;
        }
        self.phase = GesturePhase::Tracking;

        if self.long_swipe.swipe_type == SwipeType::Timed && self.long_swipe.has_action_for(edge) {
            let delay = self.long_swipe.timeout_ms.saturating_sub(elapsed_ms);
            self.timer
                .arm(edge, sample.event_time_ms, Duration::from_millis(delay));
            debug!("ロングスワイプを予約: {}ms後", delay);
        }

        // 以降の入力を横取り
        self.host.pilfer_input_ownership();
    }

    /// ジェスチャーを取り消し、矢印パネルにキャンセルを合成して送る
    fn cancel_gesture(&mut self, sample: &PointerSample, error: Option<EdgeGestureError>) -> GesturePhase {
        self.timer.cancel();
        if let Some(error) = error {
            debug!("ジェスチャーを取り消し: {}", error);
            self.last_error = Some(error);
        }
        let cancel = sample.to_cancel();
        self.affordance.handle_touch(&cancel);
        self.affordance.on_cancel();
        self.end_session();
        GesturePhase::Cancelled
    }

    fn end_session(&mut self) {
        self.session = None;
        self.placement = None;
        self.phase = GesturePhase::Idle;
    }

    fn publish_placement(&mut self) {
        if let Some(placement) = self.placement {
            let rect = self.affordance.adjust_sampling_rect(placement.sampling_rect);
            self.affordance.on_position_update(placement.panel_y, rect);
        }
    }

    // ---- ロングスワイプ ----

    /// 予約中のロングスワイプを即座に実行する
    ///
    /// タイマーの期限をホスト側で計った場合の入口。予約がなければ何もしない。
    pub fn fire_pending_long_swipe(&mut self) -> GesturePhase {
        if self.timer.take().is_some() {
            self.fire_long_swipe()
        } else {
            self.phase
        }
    }

    /// 時刻を進め、期限の来た予約を実行する
    pub fn advance_time(&mut self, now_ms: u64) -> GesturePhase {
        if self.timer.take_due(now_ms).is_some() {
            self.fire_long_swipe()
        } else {
            self.phase
        }
    }

    fn fire_long_swipe(&mut self) -> GesturePhase {
        self.timer.cancel();
        let Some(session) = self.session.as_mut() else {
            return self.phase;
        };
        if session.block_next_event {
            return self.phase;
        }
        session.block_next_event = true;
        let edge = session.edge;
        let session_id = session.session_id;

        self.affordance.reset_on_down();

        let action = self.long_swipe.action_for(edge);
        info!("ロングスワイプ発火: {} {}端 {}", session_id, edge, action);
        self.host.on_commit_long_swipe(action);
        if !action.is_none() {
            let request = LongSwipeRequest {
                action,
                edge,
                app: self.long_swipe.app_for(edge).cloned(),
            };
            if let Err(source) = self.host.launch_configured_action(&request) {
                // ジェスチャー自体は成功として扱う
                let error = EdgeGestureError::HostActionFailed { action, source };
                warn!("{}", error);
                self.last_error = Some(error);
            }
        }

        if self.long_swipe.haptic_enabled {
            let profile = self.long_swipe.haptic_profile;
            debug!("ハプティクス再生: {:?}", profile.to_event());
            self.host.perform_haptic_feedback(profile);
        }

        self.phase = GesturePhase::CommittedLongSwipe;
        GesturePhase::CommittedLongSwipe
    }

    // ---- 制御 ----

    /// 現在のジェスチャーを破棄する。何度呼んでもよい
    pub fn cancel(&mut self) {
        self.timer.cancel();
        if self.session.take().is_some() {
            debug!("エッジジェスチャーを外部から取り消し");
            self.affordance.on_cancel();
        }
        self.placement = None;
        self.phase = GesturePhase::Idle;
    }

    /// デバッグ用の状態ダンプ
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let regions = self.host.exclusion_regions();
        let _ = writeln!(out, "EdgeBackRecognizer:");
        let _ = writeln!(out, "  enabled={}", self.is_enabled());
        let _ = writeln!(out, "  phase={:?}", self.phase);
        let _ = writeln!(out, "  allowed={}", self.session.is_some());
        let _ = writeln!(
            out,
            "  in_rejected_exclusion={}",
            self.session
                .as_ref()
                .map_or(false, |session| session.in_rejected_exclusion_zone)
        );
        let _ = writeln!(out, "  excluded={:?}", regions.excluded.rects());
        let _ = writeln!(out, "  unrestricted={:?}", regions.unrestricted.rects());
        let _ = writeln!(out, "  ime_height={}", self.geometry.ime_height_px);
        let _ = writeln!(out, "  attached={}", self.attached);
        let _ = writeln!(out, "  edge_width={}", self.geometry.edge_width_px);
        let _ = writeln!(out, "  long_swipe_armed={}", self.timer.is_armed());
        out
    }
}

impl<H: GestureHost, A: EdgeAffordance> GestureRecognizer for EdgeBackRecognizer<H, A> {
    fn name(&self) -> &'static str {
        "Edge Back Recognizer"
    }

    fn update(&mut self, sample: &PointerSample) -> GesturePhase {
        self.on_pointer_event(sample)
    }

    fn reset(&mut self) {
        self.cancel();
    }

    fn is_active(&self) -> bool {
        self.session.is_some()
    }
}
