//! Gesture-triggered spawning
//!
//! Translates gestures into registry operations, each independently
//! rate-limited so a held pose cannot flood the simulation: pointing
//! drops solids on a minimum-interval timer, peace spawns liquid
//! probabilistically per evaluated frame, and pinky-up clears the
//! world behind a debounce.
//!
//! Time is caller-supplied seconds; the controller never reads a wall
//! clock, which keeps it portable to wasm and deterministic in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::classifier::Gesture;
use crate::geometry::Vec3;
use crate::registry::{ObjectId, ObjectKind, ObjectRegistry};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SpawnParams {
    /// Minimum seconds between pointing-triggered solid spawns.
    pub solid_interval: f64,
    /// How far below the interaction point solids materialize.
    pub solid_drop_offset: f32,
    /// Per-evaluated-frame probability of a peace-triggered liquid.
    pub liquid_chance: f32,
    /// Positional jitter half-range applied to liquid spawns.
    pub liquid_jitter: f32,
    /// Minimum seconds between pinky-up clear-alls.
    pub clear_debounce: f64,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            solid_interval: 0.12,
            solid_drop_offset: 2.0,
            liquid_chance: 0.3,
            liquid_jitter: 0.6,
            clear_debounce: 1.5,
        }
    }
}

/// What the controller did this frame, for telemetry and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnEvent {
    Solid(ObjectId),
    Liquid(ObjectId),
    Cleared,
}

pub struct SpawnController {
    params: SpawnParams,
    rng: StdRng,
    last_solid_t: f64,
    last_clear_t: f64,
}

impl SpawnController {
    pub fn new(params: SpawnParams) -> Self {
        let mut seed_rng = rand::thread_rng();
        let seed: u64 = seed_rng.gen();
        Self::new_with_seed(params, seed)
    }

    /// Deterministic construction; the seed drives liquid spawn
    /// probability rolls and positional jitter.
    pub fn new_with_seed(params: SpawnParams, seed: u64) -> Self {
        Self {
            params,
            rng: StdRng::seed_from_u64(seed),
            last_solid_t: f64::NEG_INFINITY,
            last_clear_t: f64::NEG_INFINITY,
        }
    }

    pub fn params(&self) -> &SpawnParams {
        &self.params
    }

    /// Forget rate-limit history (teardown).
    pub fn reset(&mut self) {
        self.last_solid_t = f64::NEG_INFINITY;
        self.last_clear_t = f64::NEG_INFINITY;
    }

    /// Evaluate one frame. `t` is the current time in seconds on the
    /// caller's clock; it must be monotonic.
    pub fn step(
        &mut self,
        gesture: Gesture,
        interaction_point: Option<Vec3>,
        t: f64,
        registry: &mut ObjectRegistry,
    ) -> Option<SpawnEvent> {
        match gesture {
            Gesture::Pointing => {
                let point = interaction_point?;
                if t - self.last_solid_t < self.params.solid_interval {
                    return None;
                }
                self.last_solid_t = t;
                let position = point.sub(Vec3::new(0.0, self.params.solid_drop_offset, 0.0));
                let id = registry.spawn(ObjectKind::Solid, position, None);
                Some(SpawnEvent::Solid(id))
            }
            Gesture::Peace => {
                let point = interaction_point?;
                // Stochastic by design, no timer.
                if self.rng.gen::<f32>() >= self.params.liquid_chance {
                    return None;
                }
                let j = self.params.liquid_jitter;
                let jitter = Vec3::new(
                    self.rng.gen_range(-j..=j),
                    self.rng.gen_range(-j..=j),
                    self.rng.gen_range(-j..=j),
                );
                let id = registry.spawn(ObjectKind::Liquid, point.add(jitter), None);
                Some(SpawnEvent::Liquid(id))
            }
            Gesture::PinkyUp => {
                if t - self.last_clear_t < self.params.clear_debounce {
                    return None;
                }
                self.last_clear_t = t;
                registry.clear_all();
                Some(SpawnEvent::Cleared)
            }
            _ => None,
        }
    }
}

impl Default for SpawnController {
    fn default() -> Self {
        Self::new(SpawnParams::default())
    }
}
