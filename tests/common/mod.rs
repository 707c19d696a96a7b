// LumosDesktop エッジジェスチャーテスト用のホストと矢印パネル
// 呼び出しをすべて記録する

#![allow(dead_code)]

use std::sync::Arc;

use lumos_edge_gesture::core::window_manager::gesture_recognizer::{
    BackGestureReport, EdgeAffordance, EdgeSide, ExclusionRegions, ExclusionTracker, GestureHost,
    HostActionError, LongSwipeAction, LongSwipeRequest, Rect,
};
use lumos_edge_gesture::{EdgeBackRecognizer, EdgeGeometry, GestureTuning, HapticProfile, LongSwipeConfig};
use lumos_edge_gesture::{PointerAction, PointerSample};

pub const WIDTH: i32 = 1080;
pub const HEIGHT: i32 = 2400;
pub const EDGE_WIDTH: i32 = 24;
pub const SLOP: f32 = 10.0;

/// ホストへの呼び出し
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Pilfer,
    InjectBack,
    Haptic(HapticProfile),
    Report(BackGestureReport),
    Launch(LongSwipeRequest),
    CommitBack,
    CommitLongSwipe(LongSwipeAction),
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    pub globally_disabled: bool,
    pub exclusions: ExclusionTracker,
    pub fail_actions: bool,
    pub calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, predicate: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn pilfer_count(&self) -> usize {
        self.count(|call| matches!(call, HostCall::Pilfer))
    }

    pub fn back_count(&self) -> usize {
        self.count(|call| matches!(call, HostCall::InjectBack))
    }

    pub fn long_swipe_count(&self) -> usize {
        self.count(|call| matches!(call, HostCall::CommitLongSwipe(_)))
    }

    pub fn reports(&self) -> Vec<BackGestureReport> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Report(report) => Some(report.clone()),
                _ => None,
            })
            .collect()
    }
}

impl GestureHost for RecordingHost {
    fn is_gestures_globally_disabled(&self) -> bool {
        self.globally_disabled
    }

    fn exclusion_regions(&self) -> Arc<ExclusionRegions> {
        self.exclusions.snapshot()
    }

    fn pilfer_input_ownership(&mut self) {
        self.calls.push(HostCall::Pilfer);
    }

    fn inject_back_key_event(&mut self) {
        self.calls.push(HostCall::InjectBack);
    }

    fn perform_haptic_feedback(&mut self, profile: HapticProfile) {
        self.calls.push(HostCall::Haptic(profile));
    }

    fn report_gesture_outcome(&mut self, report: &BackGestureReport) {
        self.calls.push(HostCall::Report(report.clone()));
    }

    fn launch_configured_action(&mut self, request: &LongSwipeRequest) -> Result<(), HostActionError> {
        self.calls.push(HostCall::Launch(request.clone()));
        if self.fail_actions {
            Err(HostActionError::Unsupported(request.action.to_string()))
        } else {
            Ok(())
        }
    }

    fn on_commit_back(&mut self) {
        self.calls.push(HostCall::CommitBack);
    }

    fn on_commit_long_swipe(&mut self, action: LongSwipeAction) {
        self.calls.push(HostCall::CommitLongSwipe(action));
    }
}

/// 矢印パネルへの呼び出し
#[derive(Debug, Clone, PartialEq)]
pub enum PanelCall {
    SessionStart(EdgeSide),
    Position(i32, Rect),
    Touch(PointerAction),
    ResetOnDown,
    Cancel,
}

/// アップ時の判定を固定値で返す矢印パネル
#[derive(Debug)]
pub struct RecordingAffordance {
    pub trigger_back: bool,
    pub calls: Vec<PanelCall>,
}

impl Default for RecordingAffordance {
    fn default() -> Self {
        Self {
            trigger_back: true,
            calls: Vec::new(),
        }
    }
}

impl RecordingAffordance {
    pub fn session_starts(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, PanelCall::SessionStart(_)))
            .count()
    }

    pub fn touches(&self) -> Vec<PointerAction> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PanelCall::Touch(action) => Some(*action),
                _ => None,
            })
            .collect()
    }
}

impl EdgeAffordance for RecordingAffordance {
    fn on_session_start(&mut self, edge: EdgeSide, _sample: &PointerSample) {
        self.calls.push(PanelCall::SessionStart(edge));
    }

    fn on_position_update(&mut self, panel_y: i32, sampling_rect: Rect) {
        self.calls.push(PanelCall::Position(panel_y, sampling_rect));
    }

    fn handle_touch(&mut self, sample: &PointerSample) {
        self.calls.push(PanelCall::Touch(sample.action));
    }

    fn should_trigger_back(&self) -> bool {
        self.trigger_back
    }

    fn reset_on_down(&mut self) {
        self.calls.push(PanelCall::ResetOnDown);
    }

    fn on_cancel(&mut self) {
        self.calls.push(PanelCall::Cancel);
    }
}

pub type TestRecognizer = EdgeBackRecognizer<RecordingHost, RecordingAffordance>;

pub fn geometry() -> EdgeGeometry {
    EdgeGeometry::new(WIDTH, HEIGHT, EDGE_WIDTH)
}

pub fn tuning() -> GestureTuning {
    GestureTuning::default().with_touch_slop(SLOP)
}

pub fn recognizer_with(config: LongSwipeConfig) -> TestRecognizer {
    EdgeBackRecognizer::new(
        RecordingHost::new(),
        RecordingAffordance::default(),
        geometry(),
        tuning(),
        config,
    )
}

pub fn recognizer() -> TestRecognizer {
    recognizer_with(LongSwipeConfig::default())
}
