//! Emitter proximity tinting
//!
//! For each non-emitter object, per evaluated frame: the squared
//! distance to every registered emitter is scanned and the minimum
//! kept. Inside the effect radius the object's tint is pulled toward a
//! glow color scaled by a distance blend; outside, it relaxes back to
//! the base color. The pull rate is asymmetric on purpose: proximity
//! reacts quickly but fades gently.
//!
//! The scan is O(objects × emitters) and stays cheap because the
//! emitter set is bounded by user-triggered spawns, not by simulation
//! throughput.

use serde::{Deserialize, Serialize};

use crate::geometry::Color;
use crate::registry::{ObjectKind, ObjectRegistry};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ProximityParams {
    /// Effect radius; beyond it the tint only relaxes.
    pub radius: f32,
    /// Distance at which the blend factor saturates at 1.
    pub inner_distance: f32,
    /// Width of the linear falloff past `inner_distance`.
    pub falloff: f32,
    /// Blend scale applied to the glow color.
    pub intensity: f32,
    /// Per-frame lerp rate while the blend is rising.
    pub approach_rate: f32,
    /// Per-frame lerp rate while the blend is falling.
    pub recede_rate: f32,
    /// Glow variant used under bright ambient light.
    pub glow_bright: Color,
    /// Glow variant used under dark ambient light.
    pub glow_dark: Color,
}

impl Default for ProximityParams {
    fn default() -> Self {
        Self {
            radius: 15.0,
            inner_distance: 5.0,
            falloff: 10.0,
            intensity: 0.9,
            approach_rate: 0.25,
            recede_rate: 0.06,
            glow_bright: Color::new(1.0, 0.55, 0.15),
            glow_dark: Color::new(0.55, 0.2, 0.85),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ProximityEffectEngine {
    pub params: ProximityParams,
}

impl ProximityEffectEngine {
    pub fn new(params: ProximityParams) -> Self {
        Self { params }
    }

    /// Blend factor for a given nearest-emitter distance, 1 at
    /// `inner_distance` and 0 at the edge of the falloff band.
    pub fn blend_for_distance(&self, distance: f32) -> f32 {
        1.0 - ((distance - self.params.inner_distance) / self.params.falloff).clamp(0.0, 1.0)
    }

    /// Re-evaluate tint and emissive intensity for every non-emitter
    /// object against the current emitter set. `ambient_dark` selects
    /// the glow variant and comes from an external brightness signal.
    pub fn step(&self, registry: &mut ObjectRegistry, ambient_dark: bool) {
        let p = self.params;
        let emitters = registry.emitter_positions();
        let radius_sq = p.radius * p.radius;
        let glow = if ambient_dark { p.glow_dark } else { p.glow_bright };

        for object in registry.objects_mut() {
            if object.kind == ObjectKind::Emitter {
                continue;
            }

            let nearest_sq = emitters
                .iter()
                .map(|e| object.position.distance_sq(*e))
                .fold(f32::INFINITY, f32::min);

            let target_blend = if nearest_sq < radius_sq {
                self.blend_for_distance(nearest_sq.sqrt())
            } else {
                0.0
            };

            let rate = if target_blend > object.emissive {
                p.approach_rate
            } else {
                p.recede_rate
            };
            object.emissive += (target_blend - object.emissive) * rate;

            let target_tint = object
                .base_color
                .lerp(glow, p.intensity * object.emissive);
            object.tint = object.tint.lerp(target_tint, rate.max(p.recede_rate));
        }
    }
}
