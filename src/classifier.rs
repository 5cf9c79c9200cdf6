//! Gesture classification
//!
//! Maps extracted finger scores to exactly one discrete gesture plus a
//! full confidence vector. The decision policy is an ordered table of
//! (predicate, gesture) rules evaluated top-to-bottom with
//! first-match-wins semantics: mutually similar hand shapes (Peace vs
//! ThreeFingers, Pinch vs Pointing) are disambiguated by evaluation
//! order rather than by exclusive thresholds, which holds up better
//! against noisy per-joint extension scores.

use serde::{Deserialize, Serialize};

use crate::features::{Finger, HandFeatures};
use crate::geometry::Vec3;
use crate::hand::{INDEX_TIP, THUMB_TIP};

/// Discrete hand pose for one processed frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gesture {
    #[default]
    None,
    OpenPalm,
    ClosedFist,
    Pinch,
    Peace,
    MiddleFinger,
    Pointing,
    PinkyUp,
    ThreeFingers,
}

impl Gesture {
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::None => "none",
            Gesture::OpenPalm => "open_palm",
            Gesture::ClosedFist => "closed_fist",
            Gesture::Pinch => "pinch",
            Gesture::Peace => "peace",
            Gesture::MiddleFinger => "middle_finger",
            Gesture::Pointing => "pointing",
            Gesture::PinkyUp => "pinky_up",
            Gesture::ThreeFingers => "three_fingers",
        }
    }
}

/// Named confidence values in [0, 1], always fully computed regardless
/// of which gesture wins so external telemetry sees the whole vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureMetrics {
    pub pinch: f32,
    pub fist: f32,
    pub palm: f32,
    pub peace: f32,
    pub pointing: f32,
    pub pinky_up: f32,
    pub three_fingers: f32,
}

impl GestureMetrics {
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Every tuned constant of the decision policy. The defaults carry the
/// empirically tuned values; they are tunables, not contracts.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GestureThresholds {
    /// Middle extension above this (with the rest curled) is the rude one.
    pub middle_up: f32,
    /// Curl ceiling for "the other fingers are down" checks.
    pub curl_max: f32,
    /// Pinch score above this wins immediately after MiddleFinger.
    pub pinch_on: f32,
    pub index_up: f32,
    pub pinky_up: f32,
    /// Tighter curl ceiling used by the pinky-up rule.
    pub pinky_curl_max: f32,
    pub three_fingers: f32,
    pub peace: f32,
    /// Average extension below this reads as a closed fist.
    pub fist_avg: f32,
    /// Average extension above this reads as an open palm.
    pub palm_avg: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            middle_up: 0.8,
            curl_max: 0.2,
            pinch_on: 0.6,
            index_up: 0.8,
            pinky_up: 0.75,
            pinky_curl_max: 0.15,
            three_fingers: 0.6,
            peace: 0.6,
            fist_avg: 0.15,
            palm_avg: 0.5,
        }
    }
}

/// Classifier output for one processed frame. With no hand present the
/// output degrades to `present = false`, `Gesture::None` and all-zero
/// metrics.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassifierOutput {
    pub present: bool,
    pub gesture: Gesture,
    pub metrics: GestureMetrics,
    /// Single 3D point other components treat as "where the hand is".
    pub interaction_point: Vec3,
}

type Rule = (fn(&HandFeatures, &GestureThresholds) -> bool, Gesture);

/// Ordered decision table. The order is deliberate: earlier rows win
/// over later rows even when both predicates hold, and ThreeFingers is
/// checked before Peace because the Peace shape is a subset of it.
const RULES: [Rule; 8] = [
    (rule_middle_finger, Gesture::MiddleFinger),
    (rule_pinch, Gesture::Pinch),
    (rule_pointing, Gesture::Pointing),
    (rule_pinky_up, Gesture::PinkyUp),
    (rule_three_fingers, Gesture::ThreeFingers),
    (rule_peace, Gesture::Peace),
    (rule_closed_fist, Gesture::ClosedFist),
    (rule_open_palm, Gesture::OpenPalm),
];

fn rule_middle_finger(f: &HandFeatures, t: &GestureThresholds) -> bool {
    let s = &f.scores;
    s.middle > t.middle_up && s.index < t.curl_max && s.ring < t.curl_max && s.pinky < t.curl_max
}

fn rule_pinch(f: &HandFeatures, t: &GestureThresholds) -> bool {
    f.pinch_score > t.pinch_on
}

fn rule_pointing(f: &HandFeatures, t: &GestureThresholds) -> bool {
    let s = &f.scores;
    s.index > t.index_up && s.middle < t.curl_max && s.ring < t.curl_max && s.pinky < t.curl_max
}

fn rule_pinky_up(f: &HandFeatures, t: &GestureThresholds) -> bool {
    let s = &f.scores;
    s.pinky > t.pinky_up
        && s.index < t.pinky_curl_max
        && s.middle < t.pinky_curl_max
        && s.ring < t.pinky_curl_max
}

fn rule_three_fingers(f: &HandFeatures, t: &GestureThresholds) -> bool {
    f.scores.three_composite > t.three_fingers
}

fn rule_peace(f: &HandFeatures, t: &GestureThresholds) -> bool {
    peace_metric(f) > t.peace
}

fn rule_closed_fist(f: &HandFeatures, t: &GestureThresholds) -> bool {
    f.scores.avg_extension < t.fist_avg
}

fn rule_open_palm(f: &HandFeatures, t: &GestureThresholds) -> bool {
    f.scores.avg_extension > t.palm_avg
}

fn peace_metric(f: &HandFeatures) -> f32 {
    let s = &f.scores;
    (s.index + s.middle + (1.0 - s.ring) + (1.0 - s.pinky)) / 4.0
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GestureClassifier {
    pub thresholds: GestureThresholds,
}

impl GestureClassifier {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self { thresholds }
    }

    /// Classify one processed frame. Exactly one gesture is active;
    /// `Gesture::None` when no rule matches.
    pub fn classify(&self, features: &HandFeatures) -> ClassifierOutput {
        let gesture = RULES
            .iter()
            .find(|(predicate, _)| predicate(features, &self.thresholds))
            .map(|(_, gesture)| *gesture)
            .unwrap_or(Gesture::None);

        ClassifierOutput {
            present: true,
            gesture,
            metrics: self.metrics(features),
            interaction_point: interaction_point(features, gesture),
        }
    }

    /// The full confidence vector, independent of which rule won.
    pub fn metrics(&self, features: &HandFeatures) -> GestureMetrics {
        let s = &features.scores;
        GestureMetrics {
            pinch: features.pinch_score,
            fist: (1.0 - s.avg_extension).clamp(0.0, 1.0),
            palm: s.avg_extension.clamp(0.0, 1.0),
            peace: peace_metric(features).clamp(0.0, 1.0),
            pointing: (s.index * s.others_curled(Finger::Index)).clamp(0.0, 1.0),
            pinky_up: (s.pinky * s.others_curled(Finger::Pinky)).clamp(0.0, 1.0),
            three_fingers: s.three_composite.clamp(0.0, 1.0),
        }
    }
}

/// Pinch grips at the thumb/index midpoint; every other gesture points
/// with the index tip.
fn interaction_point(features: &HandFeatures, gesture: Gesture) -> Vec3 {
    match gesture {
        Gesture::Pinch => features.rig[THUMB_TIP].midpoint(features.rig[INDEX_TIP]),
        _ => features.rig[INDEX_TIP],
    }
}
