use gesture_core::classifier::{Gesture, GestureClassifier, GestureThresholds};
use gesture_core::features::{FeatureExtractor, FingerScores, HandFeatures};
use gesture_core::geometry::Vec3;
use gesture_core::hand::{HandLandmark, HandSample, INDEX_TIP, NUM_HAND_JOINTS, THUMB_TIP};

fn features_from_scores(
    index: f32,
    middle: f32,
    ring: f32,
    pinky: f32,
    pinch_score: f32,
) -> HandFeatures {
    HandFeatures {
        rig: [Vec3::zero(); NUM_HAND_JOINTS],
        scores: FingerScores {
            thumb: 0.3,
            index,
            middle,
            ring,
            pinky,
            avg_extension: (index + middle + ring + pinky) / 4.0,
            three_composite: index * middle * ring * (1.0 - pinky),
        },
        pinch_distance: (1.0 - pinch_score) * 0.12,
        pinch_score,
    }
}

/// Four-segment finger chain, either reaching away from the wrist or
/// folded back toward it.
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

/// Build a geometric hand pose; `extended` flags are thumb, index,
/// middle, ring, pinky.
fn hand_pose(extended: [bool; 5]) -> HandSample {
    let mut joints = [HandLandmark::default(); NUM_HAND_JOINTS];
    joints[0] = HandLandmark::new(0.5, 0.9, 0.0);
    let columns = [0.30, 0.42, 0.50, 0.58, 0.66];
    for (finger, (&x, &ext)) in columns.iter().zip(extended.iter()).enumerate() {
        finger_chain(&mut joints, finger * 4 + 1, x, ext);
    }
    HandSample::new(joints)
}

#[test]
fn middle_finger_wins_for_all_qualifying_scores() {
    let classifier = GestureClassifier::default();
    // Sweep adversarial values of the other metrics; the middle-finger
    // rule must win whenever middle > 0.8 and index/ring/pinky < 0.2.
    for middle in [0.81, 0.9, 1.0] {
        for others in [0.0, 0.1, 0.19] {
            let f = features_from_scores(others, middle, others, others, 0.0);
            assert_eq!(
                classifier.classify(&f).gesture,
                Gesture::MiddleFinger,
                "middle={middle} others={others}"
            );
        }
    }
}

#[test]
fn pinch_wins_over_pointing_and_peace() {
    let classifier = GestureClassifier::default();
    // A shape satisfying pointing.
    let f = features_from_scores(1.0, 0.0, 0.0, 0.0, 0.7);
    assert_eq!(classifier.classify(&f).gesture, Gesture::Pinch);
    // A shape satisfying peace.
    let f = features_from_scores(1.0, 1.0, 0.0, 0.0, 0.7);
    assert_eq!(classifier.classify(&f).gesture, Gesture::Pinch);
}

#[test]
fn three_fingers_is_checked_before_peace() {
    let classifier = GestureClassifier::default();
    // index+middle+ring up, pinky down: peace average is 0.75 but the
    // three-finger composite must take priority.
    let f = features_from_scores(1.0, 1.0, 1.0, 0.0, 0.0);
    assert_eq!(classifier.classify(&f).gesture, Gesture::ThreeFingers);
}

#[test]
fn fist_and_palm_from_average_extension() {
    let classifier = GestureClassifier::default();
    let fist = features_from_scores(0.1, 0.1, 0.1, 0.1, 0.0);
    assert_eq!(classifier.classify(&fist).gesture, Gesture::ClosedFist);
    let palm = features_from_scores(0.9, 0.9, 0.9, 0.9, 0.0);
    assert_eq!(classifier.classify(&palm).gesture, Gesture::OpenPalm);
}

#[test]
fn ambiguous_shape_yields_none() {
    let classifier = GestureClassifier::default();
    let f = features_from_scores(0.4, 0.4, 0.4, 0.4, 0.0);
    assert_eq!(classifier.classify(&f).gesture, Gesture::None);
}

#[test]
fn metrics_are_always_fully_computed() {
    let classifier = GestureClassifier::default();
    let f = features_from_scores(1.0, 0.0, 0.0, 0.0, 0.9);
    let out = classifier.classify(&f);
    assert_eq!(out.gesture, Gesture::Pinch);
    // The losing pointing metric is still reported for telemetry.
    assert!(out.metrics.pointing > 0.9);
    assert!(out.metrics.pinch > 0.8);
}

#[test]
fn geometric_pointing_pose_classifies_end_to_end() {
    let sample = hand_pose([false, true, false, false, false]);
    let features = FeatureExtractor::default().extract(&sample);
    assert!(features.scores.index > 0.8, "index={}", features.scores.index);
    assert!(features.scores.middle < 0.2);
    assert!(features.pinch_score < 0.6);
    let out = GestureClassifier::default().classify(&features);
    assert_eq!(out.gesture, Gesture::Pointing);
    assert!(out.present);
}

#[test]
fn geometric_fist_and_palm_poses_classify_end_to_end() {
    let extractor = FeatureExtractor::default();
    let classifier = GestureClassifier::default();

    let fist = extractor.extract(&hand_pose([false; 5]));
    assert_eq!(classifier.classify(&fist).gesture, Gesture::ClosedFist);

    let palm = extractor.extract(&hand_pose([true; 5]));
    assert_eq!(classifier.classify(&palm).gesture, Gesture::OpenPalm);
}

#[test]
fn pinch_interaction_point_is_thumb_index_midpoint() {
    let mut sample = hand_pose([false, true, false, false, false]);
    // Touch thumb tip to index tip to force a pinch.
    sample.joints[THUMB_TIP] = sample.joints[INDEX_TIP];
    let features = FeatureExtractor::default().extract(&sample);
    let out = GestureClassifier::default().classify(&features);
    assert_eq!(out.gesture, Gesture::Pinch);
    let midpoint = features.rig[THUMB_TIP].midpoint(features.rig[INDEX_TIP]);
    assert!(out.interaction_point.distance(midpoint) < 1e-6);
}

#[test]
fn custom_thresholds_shift_the_decision() {
    let strict = GestureClassifier::new(GestureThresholds {
        pinch_on: 0.95,
        ..GestureThresholds::default()
    });
    let f = features_from_scores(1.0, 0.0, 0.0, 0.0, 0.9);
    // 0.9 no longer clears the raised pinch threshold, so pointing wins.
    assert_eq!(strict.classify(&f).gesture, Gesture::Pointing);
}

#[test]
fn metrics_serde_round_trip() {
    let classifier = GestureClassifier::default();
    let f = features_from_scores(0.8, 0.6, 0.2, 0.1, 0.4);
    let metrics = classifier.metrics(&f);
    let json = serde_json::to_string(&metrics).expect("serialize");
    let decoded: gesture_core::classifier::GestureMetrics =
        serde_json::from_str(&json).expect("deserialize");
    assert_eq!(metrics, decoded);
}
