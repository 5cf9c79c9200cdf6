//! Hand feature extraction
//!
//! Converts one normalized hand sample into rig-space joint positions
//! and per-finger extension/pinch scores. Everything here is pure and
//! stateless per frame; smoothing is deliberately left to the
//! interaction layer so the extractor stays a plain function of its
//! input.
//!
//! The finger extension score is the ratio of tip-to-wrist distance
//! over mid-joint-to-wrist distance, remapped from [0.8, 1.2] into
//! [0, 1]. The ratio form makes the score roughly invariant to hand
//! scale and distance from the camera.

use crate::geometry::Vec3;
use crate::hand::{
    HandSample, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, NUM_HAND_JOINTS, PINKY_PIP,
    PINKY_TIP, RING_PIP, RING_TIP, THUMB_MCP, THUMB_TIP, WRIST,
};

/// Extension ratio below this maps to score 0.
pub const EXTENSION_RATIO_LOW: f32 = 0.8;
/// Extension ratio above this maps to score 1.
pub const EXTENSION_RATIO_HIGH: f32 = 1.2;
/// Thumb-to-index distance (normalized space) at which pinch score hits 0.
pub const PINCH_RANGE: f32 = 0.12;

/// Projection constants mapping normalized tracker space into
/// simulation space. One sensitivity per axis, a fixed vertical
/// offset, then a uniform scale.
#[derive(Clone, Copy, Debug)]
pub struct RigParams {
    pub sensitivity_x: f32,
    pub sensitivity_y: f32,
    pub sensitivity_z: f32,
    pub y_offset: f32,
    pub scale: f32,
}

impl Default for RigParams {
    fn default() -> Self {
        Self {
            sensitivity_x: 22.0,
            sensitivity_y: 16.0,
            sensitivity_z: 30.0,
            y_offset: 6.0,
            scale: 1.0,
        }
    }
}

/// Per-finger extension scores in [0, 1] plus the derived aggregates
/// the classifier consumes.
#[derive(Clone, Copy, Debug, Default)]
pub struct FingerScores {
    pub thumb: f32,
    pub index: f32,
    pub middle: f32,
    pub ring: f32,
    pub pinky: f32,
    /// Average extension of the four non-thumb fingers.
    pub avg_extension: f32,
    /// Composite index·middle·ring·(1 − pinky) score for the
    /// three-finger pose.
    pub three_composite: f32,
}

impl FingerScores {
    /// Probability that every finger except the named one is curled,
    /// as a product of (1 − extension) terms.
    pub fn others_curled(&self, except: Finger) -> f32 {
        let mut p = 1.0;
        for (finger, score) in [
            (Finger::Index, self.index),
            (Finger::Middle, self.middle),
            (Finger::Ring, self.ring),
            (Finger::Pinky, self.pinky),
        ] {
            if finger != except {
                p *= 1.0 - score;
            }
        }
        p
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

/// Full extractor output for one processed frame.
#[derive(Clone, Copy, Debug)]
pub struct HandFeatures {
    /// The 21 joints projected into simulation space.
    pub rig: [Vec3; NUM_HAND_JOINTS],
    pub scores: FingerScores,
    /// Thumb-tip to index-tip distance in normalized input space.
    pub pinch_distance: f32,
    /// clamp(1 − pinch_distance / PINCH_RANGE, 0, 1).
    pub pinch_score: f32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FeatureExtractor {
    pub rig: RigParams,
}

impl FeatureExtractor {
    pub fn new(rig: RigParams) -> Self {
        Self { rig }
    }

    /// Extract rig positions and all finger scores from one sample.
    pub fn extract(&self, sample: &HandSample) -> HandFeatures {
        let rig = self.project_rig(sample);

        let thumb = extension_score(sample, THUMB_TIP, THUMB_MCP);
        let index = extension_score(sample, INDEX_TIP, INDEX_PIP);
        let middle = extension_score(sample, MIDDLE_TIP, MIDDLE_PIP);
        let ring = extension_score(sample, RING_TIP, RING_PIP);
        let pinky = extension_score(sample, PINKY_TIP, PINKY_PIP);

        let avg_extension = (index + middle + ring + pinky) / 4.0;
        let three_composite = index * middle * ring * (1.0 - pinky);

        let pinch_distance = sample.joints[THUMB_TIP].distance(&sample.joints[INDEX_TIP]);
        let pinch_score = (1.0 - pinch_distance / PINCH_RANGE).clamp(0.0, 1.0);

        HandFeatures {
            rig,
            scores: FingerScores {
                thumb,
                index,
                middle,
                ring,
                pinky,
                avg_extension,
                three_composite,
            },
            pinch_distance,
            pinch_score,
        }
    }

    /// Project every joint from normalized tracker space into
    /// simulation space. Pure per-joint affine transform.
    pub fn project_rig(&self, sample: &HandSample) -> [Vec3; NUM_HAND_JOINTS] {
        let p = self.rig;
        let mut rig = [Vec3::zero(); NUM_HAND_JOINTS];
        for (out, lm) in rig.iter_mut().zip(sample.joints.iter()) {
            // The tracker image is mirrored relative to the scene, so
            // x and y flip around the frame center.
            *out = Vec3::new(
                (0.5 - lm.x) * p.sensitivity_x,
                (0.5 - lm.y) * p.sensitivity_y + p.y_offset,
                -lm.z * p.sensitivity_z,
            )
            .scale(p.scale);
        }
        rig
    }
}

/// Scale-invariant extension score for one finger.
fn extension_score(sample: &HandSample, tip: usize, mid: usize) -> f32 {
    let wrist = &sample.joints[WRIST];
    let tip_dist = sample.joints[tip].distance(wrist);
    let mid_dist = sample.joints[mid].distance(wrist);
    if mid_dist < 1e-6 {
        return 0.0;
    }
    let ratio = tip_dist / mid_dist;
    ((ratio - EXTENSION_RATIO_LOW) / (EXTENSION_RATIO_HIGH - EXTENSION_RATIO_LOW)).clamp(0.0, 1.0)
}
