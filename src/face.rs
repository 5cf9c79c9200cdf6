//! Face-to-camera mapping
//!
//! Maps the reduced face sample (nose plus eyes) to camera-control
//! signals for the external renderer: nose offset from frame center
//! drives yaw/pitch, inter-eye distance drives a dolly factor. The
//! mapper is stateless; smoothing belongs to the camera rig itself.

use serde::{Deserialize, Serialize};

use crate::hand::FaceSample;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FaceMapperParams {
    /// Radians of yaw per unit of horizontal nose offset.
    pub yaw_sensitivity: f32,
    /// Radians of pitch per unit of vertical nose offset.
    pub pitch_sensitivity: f32,
    /// Inter-eye distance that maps to dolly factor 1.
    pub reference_eye_distance: f32,
}

impl Default for FaceMapperParams {
    fn default() -> Self {
        Self {
            yaw_sensitivity: 0.9,
            pitch_sensitivity: 0.6,
            reference_eye_distance: 0.12,
        }
    }
}

/// Camera-control directive derived from one face sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraSignal {
    pub yaw: f32,
    pub pitch: f32,
    /// >1 when the face is closer than the reference distance.
    pub dolly: f32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FaceTrackingMapper {
    pub params: FaceMapperParams,
}

impl FaceTrackingMapper {
    pub fn new(params: FaceMapperParams) -> Self {
        Self { params }
    }

    pub fn map(&self, face: &FaceSample) -> CameraSignal {
        let p = self.params;
        let dx = face.nose.x - 0.5;
        let dy = face.nose.y - 0.5;
        let eye_distance = face.left_eye.distance(&face.right_eye);
        CameraSignal {
            yaw: -dx * p.yaw_sensitivity,
            pitch: -dy * p.pitch_sensitivity,
            dolly: if p.reference_eye_distance > 1e-6 {
                eye_distance / p.reference_eye_distance
            } else {
                1.0
            },
        }
    }
}
