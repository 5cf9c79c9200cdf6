//! WebAssembly bindings
//!
//! Exposes the engine to a JavaScript host via `wasm-bindgen`. The
//! host owns the camera, the landmark tracker and the render/physics
//! loop; this layer only moves flat `f32` buffers across the boundary
//! and keeps the Rust side the single owner of all interaction state.
//!
//! Buffer layouts (floats per entry):
//! - objects: `[id, kind, px, py, pz, tint_r, tint_g, tint_b, emissive, grabbed]`
//! - directives: `[id, has_force, fx, fy, fz, linear_damping, angular_damping, wake]`
//! - events: `[code, from, to]` where code 1 = hand appeared,
//!   2 = hand lost, 3 = gesture changed.

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

use crate::classifier::Gesture;
use crate::engine::{Engine, EngineEvent, EngineParams, FrameOutput};
use crate::hand::{FaceSample, HandLandmark, HandSample, TrackerFrame};
use crate::registry::ObjectKind;

pub const OBJECT_STRIDE: usize = 10;
pub const DIRECTIVE_STRIDE: usize = 8;
pub const EVENT_STRIDE: usize = 3;

fn gesture_code(gesture: Gesture) -> u32 {
    match gesture {
        Gesture::None => 0,
        Gesture::OpenPalm => 1,
        Gesture::ClosedFist => 2,
        Gesture::Pinch => 3,
        Gesture::Peace => 4,
        Gesture::MiddleFinger => 5,
        Gesture::Pointing => 6,
        Gesture::PinkyUp => 7,
        Gesture::ThreeFingers => 8,
    }
}

fn kind_code(kind: ObjectKind) -> f32 {
    match kind {
        ObjectKind::Solid => 0.0,
        ObjectKind::Liquid => 1.0,
        ObjectKind::Emitter => 2.0,
    }
}

/// Engine handle owned by the JavaScript host.
#[wasm_bindgen]
pub struct InteractionEngine {
    inner: Engine,
    pending: TrackerFrame,
    last_output: FrameOutput,
}

#[wasm_bindgen]
impl InteractionEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> InteractionEngine {
        InteractionEngine {
            inner: Engine::new(EngineParams::default()),
            pending: TrackerFrame::default(),
            last_output: FrameOutput::default(),
        }
    }

    /// Deterministic variant for reproducible sessions.
    pub fn new_with_seed(seed: u64) -> InteractionEngine {
        InteractionEngine {
            inner: Engine::new_with_seed(EngineParams::default(), seed),
            pending: TrackerFrame::default(),
            last_output: FrameOutput::default(),
        }
    }

    pub fn set_sample_rate(&mut self, hz: f64) {
        self.inner.set_sample_rate(hz);
    }

    /// Stage one hand observation (21 xyz triples) for the next
    /// `ingest` call.
    pub fn push_hand_landmarks(&mut self, data: &[f32]) -> Result<(), JsValue> {
        let sample = HandSample::from_flat(data).map_err(JsValue::from_str)?;
        self.pending.hand = Some(sample);
        Ok(())
    }

    /// Stage one reduced face observation: nose, left eye, right eye
    /// as three xyz triples.
    pub fn push_face_landmarks(&mut self, data: &[f32]) -> Result<(), JsValue> {
        if data.len() < 9 {
            return Err(JsValue::from_str("face landmark buffer needs 3 * 3 floats"));
        }
        self.pending.face = Some(FaceSample {
            nose: HandLandmark::new(data[0], data[1], data[2]),
            left_eye: HandLandmark::new(data[3], data[4], data[5]),
            right_eye: HandLandmark::new(data[6], data[7], data[8]),
        });
        Ok(())
    }

    /// Offer the staged frame to the sampling clock. Consumes the
    /// staged data either way; a cycle with nothing staged is a
    /// legitimate "tracker saw nothing" observation.
    pub fn ingest(&mut self, t: f64) -> bool {
        let frame = std::mem::take(&mut self.pending);
        self.inner.ingest(&frame, t)
    }

    /// Advance one render/physics frame and cache the outputs for the
    /// getter methods below.
    pub fn step(&mut self, t: f64, ambient_dark: bool) {
        self.last_output = self.inner.step(t, ambient_dark);
    }

    /// Per-object draw state, `OBJECT_STRIDE` floats per object.
    pub fn object_state(&self) -> Float32Array {
        let objects = self.inner.registry().objects();
        let mut flat = Vec::with_capacity(objects.len() * OBJECT_STRIDE);
        for o in objects {
            flat.extend_from_slice(&[
                o.id as f32,
                kind_code(o.kind),
                o.position.x,
                o.position.y,
                o.position.z,
                o.tint.r,
                o.tint.g,
                o.tint.b,
                o.emissive,
                if o.grabbed { 1.0 } else { 0.0 },
            ]);
        }
        Float32Array::from(flat.as_slice())
    }

    /// Integrator directives from the last step, `DIRECTIVE_STRIDE`
    /// floats per body.
    pub fn directives(&self) -> Float32Array {
        let mut flat = Vec::with_capacity(self.last_output.directives.len() * DIRECTIVE_STRIDE);
        for d in &self.last_output.directives {
            let force = d.force.unwrap_or_default();
            flat.extend_from_slice(&[
                d.id as f32,
                if d.force.is_some() { 1.0 } else { 0.0 },
                force.x,
                force.y,
                force.z,
                d.linear_damping,
                d.angular_damping,
                if d.wake { 1.0 } else { 0.0 },
            ]);
        }
        Float32Array::from(flat.as_slice())
    }

    /// One-shot events drained by the last step, `EVENT_STRIDE` floats
    /// per event.
    pub fn events(&self) -> Float32Array {
        let mut flat = Vec::with_capacity(self.last_output.events.len() * EVENT_STRIDE);
        for event in &self.last_output.events {
            match event {
                EngineEvent::HandAppeared => flat.extend_from_slice(&[1.0, 0.0, 0.0]),
                EngineEvent::HandLost => flat.extend_from_slice(&[2.0, 0.0, 0.0]),
                EngineEvent::GestureChanged { from, to } => flat.extend_from_slice(&[
                    3.0,
                    gesture_code(*from) as f32,
                    gesture_code(*to) as f32,
                ]),
            }
        }
        Float32Array::from(flat.as_slice())
    }

    pub fn hand_present(&self) -> bool {
        self.inner.hand_present()
    }

    pub fn gesture(&self) -> u32 {
        gesture_code(self.inner.gesture())
    }

    pub fn gesture_name(&self) -> String {
        self.inner.gesture().name().to_string()
    }

    /// The full confidence vector: pinch, fist, palm, peace, pointing,
    /// pinky_up, three_fingers.
    pub fn metrics(&self) -> Float32Array {
        let m = self.inner.metrics();
        Float32Array::from(
            [m.pinch, m.fist, m.palm, m.peace, m.pointing, m.pinky_up, m.three_fingers].as_slice(),
        )
    }

    /// Interaction point as xyz, or an empty array with no hand.
    pub fn interaction_point(&self) -> Float32Array {
        match self.inner.interaction_point() {
            Some(p) => Float32Array::from([p.x, p.y, p.z].as_slice()),
            None => Float32Array::new_with_length(0),
        }
    }

    /// Camera yaw/pitch/dolly from the face mapper.
    pub fn camera_signal(&self) -> Float32Array {
        let c = self.inner.camera_signal();
        Float32Array::from([c.yaw, c.pitch, c.dolly].as_slice())
    }

    pub fn face_present(&self) -> bool {
        self.inner.face_present()
    }

    /// Mirror the integrator's positions/velocities back into the
    /// registry: `[id, px, py, pz, vx, vy, vz]` per body.
    pub fn sync_bodies(&mut self, data: &[f32]) -> Result<(), JsValue> {
        if data.len() % 7 != 0 {
            return Err(JsValue::from_str("body sync buffer needs 7 floats per body"));
        }
        for chunk in data.chunks_exact(7) {
            let id = chunk[0] as u64;
            self.inner.registry_mut().update(
                id,
                crate::registry::ObjectUpdate {
                    position: Some(crate::geometry::Vec3::new(chunk[1], chunk[2], chunk[3])),
                    velocity: Some(crate::geometry::Vec3::new(chunk[4], chunk[5], chunk[6])),
                },
            );
        }
        Ok(())
    }

    pub fn remove_object(&mut self, id: u64) {
        self.inner.registry_mut().remove(id);
    }

    pub fn clear_all(&mut self) {
        self.inner.registry_mut().clear_all();
    }

    /// Lifecycle teardown: sampling state, presence and interaction
    /// state reset; the host releases the tracker itself.
    pub fn reset(&mut self) {
        self.pending = TrackerFrame::default();
        self.last_output = FrameOutput::default();
        self.inner.reset();
    }
}

impl Default for InteractionEngine {
    fn default() -> Self {
        Self::new()
    }
}
