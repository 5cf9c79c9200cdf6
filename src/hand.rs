//! Hand and face landmark vocabulary
//!
//! Input types produced by the external tracker: one optional hand
//! sample of 21 ordered joints in normalized [0, 1] space, and one
//! optional face sample reduced to nose and eye positions. The joint
//! ordering follows the MediaPipe hand model.

use serde::{Deserialize, Serialize};

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

pub const NUM_HAND_JOINTS: usize = 21;

/// Bone connections for debug skeleton rendering.
pub const HAND_SKELETON: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (WRIST, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (WRIST, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (WRIST, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    (INDEX_MCP, MIDDLE_MCP),
];

/// One normalized tracker landmark. x/y lie roughly in [0, 1]; z is a
/// small signed depth relative to the wrist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HandLandmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl HandLandmark {
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn distance(&self, other: &HandLandmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// One complete hand observation, immutable per frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandSample {
    pub joints: [HandLandmark; NUM_HAND_JOINTS],
}

impl HandSample {
    pub fn new(joints: [HandLandmark; NUM_HAND_JOINTS]) -> Self {
        Self { joints }
    }

    /// Build from a flat xyz buffer of at least 63 floats.
    pub fn from_flat(data: &[f32]) -> Result<Self, &'static str> {
        if data.len() < NUM_HAND_JOINTS * 3 {
            return Err("hand landmark buffer is smaller than 21 * 3 floats");
        }
        let mut joints = [HandLandmark::default(); NUM_HAND_JOINTS];
        for (i, joint) in joints.iter_mut().enumerate() {
            let base = i * 3;
            *joint = HandLandmark::new(data[base], data[base + 1], data[base + 2]);
        }
        Ok(Self { joints })
    }
}

/// Face landmarks reduced to the points the camera mapper needs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceSample {
    pub nose: HandLandmark,
    pub left_eye: HandLandmark,
    pub right_eye: HandLandmark,
}

/// One tracker cycle: zero-or-one hand, zero-or-one face.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackerFrame {
    pub hand: Option<HandSample>,
    pub face: Option<FaceSample>,
}
