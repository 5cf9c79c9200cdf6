//! Grab state machine and force synthesis
//!
//! Per-object {Free, Grabbed} state driven every simulation step by
//! the current gesture and interaction point. Acquisition and release
//! use different radii so an object resting near the acquisition
//! boundary cannot flicker between states.
//!
//! While grabbed, the controller synthesises a critically damped
//! spring force toward the interaction point and asks the integrator
//! to wake the body, zero its linear damping and raise its angular
//! damping so the object tracks the hand without excess spin. A
//! closed fist freezes free objects with near-maximum damping, which
//! is distinct from physical rest.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::classifier::Gesture;
use crate::geometry::Vec3;
use crate::registry::{ObjectId, ObjectKind, ObjectRegistry};

/// Tuning constants for the grab state machine.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GrabParams {
    /// Free → Grabbed only inside this radius (simulation units).
    pub acquire_radius: f32,
    /// Grabbed → Free once outside this radius. Must exceed
    /// `acquire_radius` to form the hysteresis band.
    pub release_radius: f32,
    /// Spring stiffness toward the interaction point, per axis.
    pub stiffness: f32,
    /// Velocity damping term of the spring, per axis.
    pub spring_damping: f32,
    /// Angular damping applied while grabbed.
    pub grab_angular_damping: f32,
    /// Linear and angular damping of the closed-fist freeze.
    pub freeze_damping: f32,
}

impl Default for GrabParams {
    fn default() -> Self {
        Self {
            acquire_radius: 3.5,
            release_radius: 5.0,
            stiffness: 150.0,
            spring_damping: 10.0,
            grab_angular_damping: 0.9,
            freeze_damping: 0.99,
        }
    }
}

/// Baseline damping restored when an object is free and the hand is
/// not making a fist.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DampingPair {
    pub linear: f32,
    pub angular: f32,
}

impl DampingPair {
    pub fn baseline(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Solid => Self { linear: 0.1, angular: 0.1 },
            ObjectKind::Liquid => Self { linear: 0.4, angular: 0.4 },
            ObjectKind::Emitter => Self { linear: 0.0, angular: 0.0 },
        }
    }
}

/// One per-body instruction for the external physics integrator.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BodyDirective {
    pub id: ObjectId,
    /// Spring force to apply this step, if any.
    pub force: Option<Vec3>,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Force the body out of any rest/sleep state.
    pub wake: bool,
}

pub struct GrabController {
    params: GrabParams,
    grabbed: HashSet<ObjectId>,
}

impl GrabController {
    pub fn new(params: GrabParams) -> Self {
        Self {
            params,
            grabbed: HashSet::new(),
        }
    }

    pub fn params(&self) -> &GrabParams {
        &self.params
    }

    pub fn is_grabbed(&self, id: ObjectId) -> bool {
        self.grabbed.contains(&id)
    }

    pub fn grabbed_count(&self) -> usize {
        self.grabbed.len()
    }

    /// Drop all interaction state (teardown or hand loss).
    pub fn reset(&mut self) {
        self.grabbed.clear();
    }

    /// Advance every non-emitter object one step and emit integrator
    /// directives. Malformed or stale ids simply fall out of the
    /// grabbed set; this never errors.
    pub fn step(
        &mut self,
        gesture: Gesture,
        interaction_point: Option<Vec3>,
        registry: &mut ObjectRegistry,
    ) -> Vec<BodyDirective> {
        let p = self.params;
        let pinching = gesture == Gesture::Pinch && interaction_point.is_some();
        let acquire_sq = p.acquire_radius * p.acquire_radius;
        let release_sq = p.release_radius * p.release_radius;

        // Ids of objects that no longer exist must not stay grabbed.
        let live: HashSet<ObjectId> = registry.objects().iter().map(|o| o.id).collect();
        self.grabbed.retain(|id| live.contains(id));

        let mut directives = Vec::with_capacity(registry.len());
        let emitter_ids: HashSet<ObjectId> = registry
            .objects()
            .iter()
            .filter(|o| o.kind == ObjectKind::Emitter)
            .map(|o| o.id)
            .collect();

        for object in registry.objects_mut() {
            if emitter_ids.contains(&object.id) {
                continue;
            }

            let was_grabbed = self.grabbed.contains(&object.id);
            let now_grabbed = match (was_grabbed, pinching) {
                (true, true) => {
                    let target = interaction_point.unwrap_or_default();
                    object.position.distance_sq(target) <= release_sq
                }
                (true, false) => false,
                (false, true) => {
                    let target = interaction_point.unwrap_or_default();
                    object.position.distance_sq(target) < acquire_sq
                }
                (false, false) => false,
            };

            if now_grabbed {
                self.grabbed.insert(object.id);
            } else {
                self.grabbed.remove(&object.id);
            }
            object.grabbed = now_grabbed;

            let directive = if now_grabbed {
                let target = interaction_point.unwrap_or_default();
                let force = target
                    .sub(object.position)
                    .scale(p.stiffness)
                    .sub(object.velocity.scale(p.spring_damping));
                BodyDirective {
                    id: object.id,
                    force: Some(force),
                    linear_damping: 0.0,
                    angular_damping: p.grab_angular_damping,
                    wake: true,
                }
            } else if gesture == Gesture::ClosedFist {
                BodyDirective {
                    id: object.id,
                    force: None,
                    linear_damping: p.freeze_damping,
                    angular_damping: p.freeze_damping,
                    wake: false,
                }
            } else {
                let baseline = DampingPair::baseline(object.kind);
                BodyDirective {
                    id: object.id,
                    force: None,
                    linear_damping: baseline.linear,
                    angular_damping: baseline.angular,
                    wake: false,
                }
            };
            directives.push(directive);
        }

        directives
    }
}

impl Default for GrabController {
    fn default() -> Self {
        Self::new(GrabParams::default())
    }
}
