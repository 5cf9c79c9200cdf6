use gesture_core::classifier::Gesture;
use gesture_core::engine::{Engine, EngineEvent, EngineParams};
use gesture_core::geometry::Vec3;
use gesture_core::hand::{
    FaceSample, HandLandmark, HandSample, TrackerFrame, NUM_HAND_JOINTS,
};
use gesture_core::registry::ObjectKind;
use gesture_core::spawn::SpawnEvent;

/// All 21 joints collapsed onto one point reads as a full-strength
/// pinch (tips touching, no finger extension).
fn pinch_frame() -> TrackerFrame {
    TrackerFrame {
        hand: Some(HandSample::from_flat(&[0.5; 63]).unwrap()),
        face: None,
    }
}

fn finger_chain(joints: &mut [HandLandmark; NUM_HAND_JOINTS], base: usize, x: f32, extended: bool) {
    let wrist_y = 0.9;
    joints[base] = HandLandmark::new(x, wrist_y - 0.2, 0.0);
    if extended {
        joints[base + 1] = HandLandmark::new(x, wrist_y - 0.35, 0.0);
        joints[base + 2] = HandLandmark::new(x, wrist_y - 0.45, 0.0);
        joints[base + 3] = HandLandmark::new(x, wrist_y - 0.6, 0.0);
    } else {
        joints[base + 1] = HandLandmark::new(x, wrist_y - 0.28, 0.0);
        joints[base + 2] = HandLandmark::new(x, wrist_y - 0.2, 0.0);
        joints[base + 3] = HandLandmark::new(x, wrist_y - 0.12, 0.0);
    }
}

fn pose_frame(extended: [bool; 5]) -> TrackerFrame {
    let mut joints = [HandLandmark::default(); NUM_HAND_JOINTS];
    joints[0] = HandLandmark::new(0.5, 0.9, 0.0);
    let columns = [0.30, 0.42, 0.50, 0.58, 0.66];
    for (finger, (&x, &ext)) in columns.iter().zip(extended.iter()).enumerate() {
        finger_chain(&mut joints, finger * 4 + 1, x, ext);
    }
    TrackerFrame {
        hand: Some(HandSample::new(joints)),
        face: None,
    }
}

fn absent_frame() -> TrackerFrame {
    TrackerFrame::default()
}

#[test]
fn sampling_clock_drops_render_rate_offers() {
    let mut engine = Engine::new_with_seed(EngineParams::default(), 1);
    let frame = pinch_frame();
    let mut admitted = 0;
    for i in 0..120 {
        if engine.ingest(&frame, i as f64 / 120.0) {
            admitted += 1;
        }
    }
    assert!((28..=31).contains(&admitted), "admitted={admitted}");
}

#[test]
fn gesture_state_is_held_between_samples() {
    let mut engine = Engine::new_with_seed(EngineParams::default(), 1);
    assert!(engine.ingest(&pinch_frame(), 0.0));
    // Offers inside the sampling interval are dropped but the render
    // loop keeps seeing the last classification.
    assert!(!engine.ingest(&absent_frame(), 0.01));
    assert_eq!(engine.gesture(), Gesture::Pinch);
    assert!(engine.hand_present());
}

#[test]
fn hand_lost_fires_exactly_once_over_repeated_absence() {
    let mut engine = Engine::new_with_seed(EngineParams::default(), 1);
    assert!(engine.ingest(&pinch_frame(), 0.0));
    let out = engine.step(0.0, false);
    assert!(out.events.contains(&EngineEvent::HandAppeared));

    // Three consecutive absent sampling cycles.
    for i in 1..=3 {
        engine.ingest(&absent_frame(), i as f64 / 25.0);
    }
    let out = engine.step(0.2, false);
    let lost = out
        .events
        .iter()
        .filter(|e| **e == EngineEvent::HandLost)
        .count();
    assert_eq!(lost, 1);
    assert_eq!(engine.gesture(), Gesture::None);
    assert!(!engine.hand_present());
    let m = engine.metrics();
    for value in [m.pinch, m.fist, m.palm, m.peace, m.pointing, m.pinky_up, m.three_fingers] {
        assert_eq!(value, 0.0);
    }
}

#[test]
fn gesture_changes_surface_as_events() {
    let mut engine = Engine::new_with_seed(EngineParams::default(), 1);
    engine.ingest(&pinch_frame(), 0.0);
    engine.step(0.0, false);

    engine.ingest(&pose_frame([false; 5]), 0.1);
    let out = engine.step(0.1, false);
    assert!(out.events.contains(&EngineEvent::GestureChanged {
        from: Gesture::Pinch,
        to: Gesture::ClosedFist,
    }));
}

#[test]
fn events_are_one_shot() {
    let mut engine = Engine::new_with_seed(EngineParams::default(), 1);
    engine.ingest(&pinch_frame(), 0.0);
    let first = engine.step(0.0, false);
    assert!(!first.events.is_empty());
    let second = engine.step(0.01, false);
    assert!(second.events.is_empty());
}

#[test]
fn pinch_grabs_an_object_at_the_interaction_point() {
    let mut engine = Engine::new_with_seed(EngineParams::default(), 1);
    engine.ingest(&pinch_frame(), 0.0);
    let point = engine.interaction_point().expect("hand is present");
    let id = engine
        .registry_mut()
        .spawn(ObjectKind::Solid, point.add(Vec3::new(1.0, 0.0, 0.0)), None);

    let out = engine.step(0.0, false);
    assert!(engine.is_grabbed(id));
    let d = out.directives.iter().find(|d| d.id == id).unwrap();
    assert!(d.force.is_some());
    assert!(d.wake);
}

#[test]
fn pointing_hold_spawns_solids_into_the_registry() {
    let mut engine = Engine::new_with_seed(EngineParams::default(), 1);
    let frame = pose_frame([false, true, false, false, false]);
    let mut spawned = 0;
    for i in 0..30 {
        let t = i as f64 / 30.0;
        engine.ingest(&frame, t);
        if matches!(engine.step(t, false).spawn_event, Some(SpawnEvent::Solid(_))) {
            spawned += 1;
        }
    }
    assert!(spawned > 0);
    assert_eq!(engine.registry().len(), spawned);
    // Rate-limited: strictly fewer spawns than evaluated frames.
    assert!(spawned < 30);
}

#[test]
fn pinky_up_hold_clears_twice_in_three_seconds() {
    let mut engine = Engine::new_with_seed(EngineParams::default(), 1);
    engine
        .registry_mut()
        .spawn(ObjectKind::Solid, Vec3::zero(), None);

    let frame = pose_frame([false, false, false, false, true]);
    let mut clears = 0;
    for i in 0..90 {
        let t = i as f64 / 30.0;
        engine.ingest(&frame, t);
        if engine.step(t, false).spawn_event == Some(SpawnEvent::Cleared) {
            clears += 1;
        }
    }
    assert_eq!(clears, 2);
}

#[test]
fn face_sample_drives_camera_signal() {
    let mut engine = Engine::new_with_seed(EngineParams::default(), 1);
    let frame = TrackerFrame {
        hand: None,
        face: Some(FaceSample {
            nose: HandLandmark::new(0.7, 0.5, 0.0),
            left_eye: HandLandmark::new(0.62, 0.45, 0.0),
            right_eye: HandLandmark::new(0.78, 0.45, 0.0),
        }),
    };
    engine.ingest(&frame, 0.0);
    assert!(engine.face_present());
    let camera = engine.camera_signal();
    assert!(camera.yaw < 0.0, "nose right of center pans left");
    assert!(camera.dolly > 1.0, "wide eye spacing reads as close");
}

#[test]
fn reset_returns_to_absent_defaults() {
    let mut engine = Engine::new_with_seed(EngineParams::default(), 1);
    engine.ingest(&pinch_frame(), 0.0);
    let point = engine.interaction_point().unwrap();
    let id = engine.registry_mut().spawn(ObjectKind::Solid, point, None);
    engine.step(0.0, false);
    assert!(engine.is_grabbed(id));

    engine.reset();
    assert!(!engine.hand_present());
    assert_eq!(engine.gesture(), Gesture::None);
    assert!(!engine.is_grabbed(id));
    assert!(engine.interaction_point().is_none());
    // A fresh sample is admitted immediately after reset.
    assert!(engine.ingest(&pinch_frame(), 100.0));
}
