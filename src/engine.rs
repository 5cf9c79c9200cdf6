//! Frame pipeline, sampling cadence and edge events
//!
//! Ties the components together under a single cooperative timeline.
//! Two cadences stay decoupled: tracker ingestion is throttled by a
//! [`SampleClock`] (default 30 Hz) to bound classifier jitter, while
//! the render/physics step may run faster and simply reads the
//! gesture state most recently produced, stale by at most one
//! sampling interval.
//!
//! Presence and gesture transitions are surfaced as one-shot events
//! drained by the next `step`, so audio/UI collaborators never have to
//! poll for edges.

use serde::{Deserialize, Serialize};

use crate::classifier::{ClassifierOutput, Gesture, GestureClassifier, GestureMetrics, GestureThresholds};
use crate::face::{CameraSignal, FaceMapperParams, FaceTrackingMapper};
use crate::features::{FeatureExtractor, RigParams};
use crate::geometry::Vec3;
use crate::grab::{BodyDirective, GrabController, GrabParams};
use crate::hand::TrackerFrame;
use crate::proximity::{ProximityEffectEngine, ProximityParams};
use crate::registry::ObjectRegistry;
use crate::spawn::{SpawnController, SpawnEvent, SpawnParams};

/// Default tracker sampling cadence.
pub const DEFAULT_SAMPLE_HZ: f64 = 30.0;

/// Admits at most one sample per interval regardless of how often the
/// host offers them.
#[derive(Clone, Copy, Debug)]
pub struct SampleClock {
    interval: f64,
    last_t: f64,
}

impl SampleClock {
    pub fn new(hz: f64) -> Self {
        Self {
            interval: 1.0 / hz.max(1e-3),
            last_t: f64::NEG_INFINITY,
        }
    }

    /// True when enough time has passed since the last admitted
    /// sample; admitting consumes the slot.
    pub fn admit(&mut self, t: f64) -> bool {
        if t - self.last_t >= self.interval {
            self.last_t = t;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.last_t = f64::NEG_INFINITY;
    }
}

/// One-shot transition notifications for external collaborators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    HandAppeared,
    HandLost,
    GestureChanged { from: Gesture, to: Gesture },
}

/// Everything the render/physics side consumes after one step.
#[derive(Clone, Debug, Default)]
pub struct FrameOutput {
    pub directives: Vec<BodyDirective>,
    pub spawn_event: Option<SpawnEvent>,
    pub events: Vec<EngineEvent>,
}

/// Aggregate tuning for the whole pipeline.
#[derive(Clone, Copy, Debug, Default)]
pub struct EngineParams {
    pub rig: RigParams,
    pub thresholds: GestureThresholds,
    pub grab: GrabParams,
    pub spawn: SpawnParams,
    pub proximity: ProximityParams,
    pub face: FaceMapperParams,
}

pub struct Engine {
    clock: SampleClock,
    extractor: FeatureExtractor,
    classifier: GestureClassifier,
    grab: GrabController,
    spawner: SpawnController,
    proximity: ProximityEffectEngine,
    face_mapper: FaceTrackingMapper,
    registry: ObjectRegistry,
    current: ClassifierOutput,
    camera: CameraSignal,
    face_present: bool,
    events: Vec<EngineEvent>,
}

impl Engine {
    pub fn new(params: EngineParams) -> Self {
        use rand::Rng;
        let seed: u64 = rand::thread_rng().gen();
        Self::new_with_seed(params, seed)
    }

    /// Deterministic construction; the seed feeds the registry's hue
    /// rng and the spawner's probability rolls.
    pub fn new_with_seed(params: EngineParams, seed: u64) -> Self {
        Self {
            clock: SampleClock::new(DEFAULT_SAMPLE_HZ),
            extractor: FeatureExtractor::new(params.rig),
            classifier: GestureClassifier::new(params.thresholds),
            grab: GrabController::new(params.grab),
            spawner: SpawnController::new_with_seed(params.spawn, seed ^ 0x9e3779b97f4a7c15),
            proximity: ProximityEffectEngine::new(params.proximity),
            face_mapper: FaceTrackingMapper::new(params.face),
            registry: ObjectRegistry::new_with_seed(seed),
            current: ClassifierOutput::default(),
            camera: CameraSignal::default(),
            face_present: false,
            events: Vec::new(),
        }
    }

    pub fn set_sample_rate(&mut self, hz: f64) {
        self.clock = SampleClock::new(hz);
    }

    /// Offer one tracker frame at time `t` (seconds). Returns false if
    /// the sampling clock dropped it; the previous gesture state is
    /// then simply held. A `None` hand degrades to absent-state
    /// defaults rather than erroring.
    pub fn ingest(&mut self, frame: &TrackerFrame, t: f64) -> bool {
        if !self.clock.admit(t) {
            return false;
        }

        let previous = self.current;
        match &frame.hand {
            Some(sample) => {
                let features = self.extractor.extract(sample);
                self.current = self.classifier.classify(&features);
                if !previous.present {
                    self.events.push(EngineEvent::HandAppeared);
                }
            }
            None => {
                self.current = ClassifierOutput::default();
                if previous.present {
                    self.events.push(EngineEvent::HandLost);
                }
            }
        }
        if self.current.gesture != previous.gesture {
            self.events.push(EngineEvent::GestureChanged {
                from: previous.gesture,
                to: self.current.gesture,
            });
        }

        match &frame.face {
            Some(face) => {
                self.camera = self.face_mapper.map(face);
                self.face_present = true;
            }
            None => {
                self.face_present = false;
            }
        }
        true
    }

    /// Advance the interaction layer one render/physics frame. Runs
    /// spawn, grab and proximity against the current registry snapshot
    /// in that order (one logical owner at a time) and drains pending
    /// one-shot events.
    pub fn step(&mut self, t: f64, ambient_dark: bool) -> FrameOutput {
        let interaction_point = self
            .current
            .present
            .then_some(self.current.interaction_point);

        let spawn_event =
            self.spawner
                .step(self.current.gesture, interaction_point, t, &mut self.registry);
        let directives =
            self.grab
                .step(self.current.gesture, interaction_point, &mut self.registry);
        self.proximity.step(&mut self.registry, ambient_dark);

        FrameOutput {
            directives,
            spawn_event,
            events: std::mem::take(&mut self.events),
        }
    }

    /// Teardown: presence resets to absent, per-object interaction
    /// state and rate-limit history are dropped. Registry contents are
    /// left to the host to clear explicitly.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.current = ClassifierOutput::default();
        self.camera = CameraSignal::default();
        self.face_present = false;
        self.grab.reset();
        self.spawner.reset();
        self.events.clear();
    }

    /// JSON snapshot of the renderer-facing object list, for
    /// telemetry and debugging collaborators.
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self.registry.objects())
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.registry
    }

    pub fn hand_present(&self) -> bool {
        self.current.present
    }

    pub fn gesture(&self) -> Gesture {
        self.current.gesture
    }

    pub fn metrics(&self) -> GestureMetrics {
        self.current.metrics
    }

    pub fn interaction_point(&self) -> Option<Vec3> {
        self.current
            .present
            .then_some(self.current.interaction_point)
    }

    pub fn face_present(&self) -> bool {
        self.face_present
    }

    pub fn camera_signal(&self) -> CameraSignal {
        self.camera
    }

    pub fn is_grabbed(&self, id: crate::registry::ObjectId) -> bool {
        self.grab.is_grabbed(id)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineParams::default())
    }
}
