use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lumos_edge_gesture::core::window_manager::gesture_recognizer::{
    affordance_position, BackGestureReport, EdgeAffordance, EdgeSide, ExclusionRegions,
    ExclusionTracker, GestureHost, HostActionError, LongSwipeRequest, Rect, Region,
};
use lumos_edge_gesture::{
    EdgeBackRecognizer, EdgeGeometry, GestureTuning, HapticProfile, LongSwipeConfig, PointerSample,
};

struct NullHost {
    exclusions: ExclusionTracker,
}

impl GestureHost for NullHost {
    fn is_gestures_globally_disabled(&self) -> bool {
        false
    }

    fn exclusion_regions(&self) -> Arc<ExclusionRegions> {
        self.exclusions.snapshot()
    }

    fn pilfer_input_ownership(&mut self) {}

    fn inject_back_key_event(&mut self) {}

    fn perform_haptic_feedback(&mut self, _profile: HapticProfile) {}

    fn report_gesture_outcome(&mut self, report: &BackGestureReport) {
        black_box(report);
    }

    fn launch_configured_action(&mut self, _request: &LongSwipeRequest) -> Result<(), HostActionError> {
        Ok(())
    }
}

struct NullAffordance;

impl EdgeAffordance for NullAffordance {
    fn on_session_start(&mut self, _edge: EdgeSide, _sample: &PointerSample) {}

    fn on_position_update(&mut self, panel_y: i32, sampling_rect: Rect) {
        black_box((panel_y, sampling_rect));
    }

    fn handle_touch(&mut self, sample: &PointerSample) {
        black_box(sample);
    }

    fn should_trigger_back(&self) -> bool {
        true
    }

    fn reset_on_down(&mut self) {}

    fn on_cancel(&mut self) {}
}

fn create_recognizer(exclusion_rects: usize) -> EdgeBackRecognizer<NullHost, NullAffordance> {
    let exclusions = ExclusionTracker::new();
    // 右端側に細かい除外矩形を並べる
    let rects = (0..exclusion_rects as i32).map(|i| Rect::new(1000, i * 10, 1080, i * 10 + 5));
    exclusions.replace(Region::from_rects(rects), None);
    EdgeBackRecognizer::new(
        NullHost { exclusions },
        NullAffordance,
        EdgeGeometry::new(1080, 2400, 24),
        GestureTuning::default(),
        LongSwipeConfig::default(),
    )
}

fn benchmark_gesture_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_session");

    for rects in [0usize, 32, 200] {
        let mut recognizer = create_recognizer(rects);
        group.bench_function(format!("back_swipe_{}_exclusions", rects), |b| {
            b.iter(|| {
                recognizer.on_pointer_event(&PointerSample::down(2.0, 1200.0, 0));
                for step in 1..16u64 {
                    let x = 2.0 + step as f32 * 12.0;
                    recognizer.on_pointer_event(&PointerSample::moved(x, 1200.0, step * 8, 0));
                }
                black_box(recognizer.on_pointer_event(&PointerSample::up(200.0, 1200.0, 140, 0)))
            })
        });
    }

    let mut recognizer = create_recognizer(0);
    group.bench_function("rejected_down", |b| {
        b.iter(|| black_box(recognizer.on_pointer_event(&PointerSample::down(540.0, 1200.0, 0))))
    });

    group.finish();
}

fn benchmark_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");

    group.bench_function("affordance_position", |b| {
        b.iter(|| black_box(affordance_position(black_box(1200.0), 140, 200, 288, 2400)))
    });

    let tracker = ExclusionTracker::new();
    tracker.replace(
        Region::from_rects((0..200).map(|i| Rect::new(0, i * 12, 100, i * 12 + 6))),
        None,
    );
    group.bench_function("exclusion_snapshot_lookup", |b| {
        b.iter(|| {
            let regions = tracker.snapshot();
            black_box(regions.is_excluded(black_box(20), black_box(2390)))
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_gesture_session, benchmark_geometry);
criterion_main!(benches);
